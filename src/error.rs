use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while summing connection times.
#[derive(Error, Debug)]
pub enum ConnTimeError {
    /// The start date given on the command line is not `YYYY-MM-DD`.
    #[error("Invalid start date '{0}' (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    /// A log file name matched the pattern but its date is not a real day.
    #[error("Invalid date in file name {0}")]
    InvalidFileDate(String),

    /// The directory to scan could not be listed.
    #[error("Failed to list directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A selected log file could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed connection time '{value}' in file {file}: {reason}")]
    MalformedDuration {
        file: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ConnTimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_date_format() {
        let err = ConnTimeError::InvalidDateFormat("2024/01/01".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid start date '2024/01/01' (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_error_display_file_unreadable() {
        let err = ConnTimeError::FileUnreadable {
            path: PathBuf::from("logs/2024-01-01#10-00-00.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("2024-01-01#10-00-00.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_malformed_duration() {
        let err = ConnTimeError::MalformedDuration {
            file: "2024-01-01#10-00-00.txt".to_string(),
            value: "abc".to_string(),
            reason: "expected H:MM:SS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed connection time 'abc' in file 2024-01-01#10-00-00.txt: expected H:MM:SS"
        );
    }
}
