use crate::duration::{ConnectionTime, parse_connection_time};
use crate::error::{ConnTimeError, Result};
use crate::types::{Finding, LogFile};
use chrono::NaiveDate;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};

pub const MARKER: &str = "Connection time:";

/// What to do with an unreadable file or a malformed connection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort on the first failure.
    Strict,
    /// Log the failure, keep it as a warning and carry on.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTally {
    pub name: String,
    pub date: NaiveDate,
    pub entries: usize,
    pub subtotal: ConnectionTime,
}

#[derive(Debug, Default)]
pub struct Aggregate {
    pub total: ConnectionTime,
    pub files: Vec<FileTally>,
    pub warnings: Vec<ConnTimeError>,
}

/// The trimmed text following the first marker on `line`, if any.
#[must_use]
pub fn connection_time_value(line: &str) -> Option<&str> {
    line.split_once(MARKER).map(|(_, rest)| rest.trim())
}

/// Sum every connection time found in `files`, in the order given and
/// line by line within each file. `on_found` sees each finding as soon as
/// it is parsed.
pub fn accumulate<F>(files: &[LogFile], policy: ErrorPolicy, on_found: F) -> Result<Aggregate>
where
    F: FnMut(&Finding),
{
    let mut acc = Accumulator {
        policy,
        on_found,
        aggregate: Aggregate::default(),
    };

    for file in files {
        acc.scan(file)?;
    }

    Ok(acc.aggregate)
}

struct Accumulator<F> {
    policy: ErrorPolicy,
    on_found: F,
    aggregate: Aggregate,
}

impl<F: FnMut(&Finding)> Accumulator<F> {
    fn scan(&mut self, file: &LogFile) -> Result<()> {
        debug!("Scanning {}", file.path.display());

        let mut tally = FileTally {
            name: file.name.clone(),
            date: file.date,
            entries: 0,
            subtotal: ConnectionTime::ZERO,
        };
        let result = self.scan_lines(file, &mut tally);
        self.aggregate.files.push(tally);

        match result {
            Ok(()) => Ok(()),
            Err(e) => self.recover(e),
        }
    }

    // The handle is dropped on return, including the early error returns.
    fn scan_lines(&mut self, file: &LogFile, tally: &mut FileTally) -> Result<()> {
        let unreadable = |source| ConnTimeError::FileUnreadable {
            path: file.path.clone(),
            source,
        };
        let handle = File::open(&file.path).map_err(unreadable)?;

        for line in BufReader::new(handle).lines() {
            let line = line.map_err(unreadable)?;
            let Some(value) = connection_time_value(&line) else {
                continue;
            };

            match parse_connection_time(value) {
                Ok(duration) => {
                    tally.entries += 1;
                    tally.subtotal += duration;
                    self.record(Finding {
                        file_name: file.name.clone(),
                        duration,
                    });
                }
                Err(reason) => self.recover(ConnTimeError::MalformedDuration {
                    file: file.name.clone(),
                    value: value.to_string(),
                    reason,
                })?,
            }
        }

        Ok(())
    }

    fn record(&mut self, finding: Finding) {
        (self.on_found)(&finding);
        self.aggregate.total += finding.duration;
    }

    fn recover(&mut self, err: ConnTimeError) -> Result<()> {
        match self.policy {
            ErrorPolicy::Strict => Err(err),
            ErrorPolicy::Lenient => {
                warn!("{err}");
                self.aggregate.warnings.push(err);
                Ok(())
            }
        }
    }
}
