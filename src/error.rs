//! Error types for password file lookups.
//!
//! Error messages never include a password. `InvalidField` only ever carries
//! the value of the field that failed validation, and passwords are never
//! validated.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PgPassError {
    #[error("No such file \"{}\"", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid Permissions for {}: {mode}", .path.display())]
    InvalidPermissions { path: PathBuf, mode: String },

    #[error("Error validating {field} value \"{value}\"{}", line_suffix(.line))]
    InvalidField {
        field: &'static str,
        value: String,
        line: Option<usize>,
    },

    #[error("No match for connection entry \"{0}\"")]
    NoMatchingEntry(String),

    #[error("Invalid {name} argument \"{value}\"")]
    InvalidArgument { name: String, value: String },

    #[error("Unable to determine home directory and {} is not set", crate::config::PGPASSFILE_ENV)]
    HomeNotFound,

    #[error("Failed to read password file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PgPassError {
    /// Attach a source line number to a field validation error.
    pub(crate) fn at_line(self, line_number: usize) -> Self {
        match self {
            PgPassError::InvalidField { field, value, .. } => PgPassError::InvalidField {
                field,
                value,
                line: Some(line_number),
            },
            other => other,
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" on line {}", line),
        None => String::new(),
    }
}
