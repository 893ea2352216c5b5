use crate::dates::parse_date;
use crate::error::{ConnTimeError, Result};
use crate::types::LogFile;
use chrono::NaiveDate;
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

// YYYY-MM-DD#HH-MM-SS.txt, whole name only
static LOG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})#[0-9]{2}-[0-9]{2}-[0-9]{2}\.txt$")
        .expect("regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrder {
    /// Whatever order the directory listing yields.
    Listing,
    /// Ascending by file name, which is also chronological.
    ByName,
}

/// Extract the logical date of a log file from its name.
///
/// Returns `None` for names that are not log files at all, and
/// `Some(Err(InvalidFileDate))` when the name has the right shape but the
/// date part is not a real calendar day.
#[must_use]
pub fn parse_log_file_name(name: &str) -> Option<Result<NaiveDate>> {
    let caps = LOG_NAME.captures(name)?;
    let date_str = caps.get(1)?.as_str();
    Some(parse_date(date_str).ok_or_else(|| ConnTimeError::InvalidFileDate(name.to_string())))
}

/// List the log files directly inside `dir` dated on or after `cursor`.
///
/// Subdirectories are never descended into, and entries that match the
/// name pattern but are not regular files are skipped with a warning.
pub fn select_log_files(dir: &Path, cursor: NaiveDate, order: FileOrder) -> Result<Vec<LogFile>> {
    let unlistable = |source| ConnTimeError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    // walkdir yields nothing at min_depth(1) for a plain file
    let meta = fs::metadata(dir).map_err(unlistable)?;
    if !meta.is_dir() {
        return Err(unlistable(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    let mut selected = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(unlistable(e.into())),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        let date = match parse_log_file_name(&name) {
            None => continue,
            Some(Ok(date)) => date,
            Some(Err(e)) => {
                warn!("Skipping {name}: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            warn!("Skipping {name}: not a regular file");
            continue;
        }

        if date < cursor {
            debug!("Skipping {name}: dated before {cursor}");
            continue;
        }

        selected.push(LogFile {
            name,
            path: entry.into_path(),
            date,
        });
    }

    if order == FileOrder::ByName {
        selected.sort_by(|a, b| a.name.cmp(&b.name));
    }

    Ok(selected)
}
