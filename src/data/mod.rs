//! Loading and saving the tabular per-user record format.
//!
//! The on-disk format is a CSV with one row per user:
//!
//! ```csv
//! arm,converted,retained_day7,engagement_score
//! control,true,false,287.44
//! treatment,false,true,301.02
//! ```
//!
//! The core never consumes the file format itself; callers load it
//! into memory here and hand the records over.

mod csv;

pub use csv::{load_records, write_records};

use std::fmt;

use crate::types::Arm;

/// Errors that can occur while loading record files.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading or writing the file.
    Io(std::io::Error),

    /// Malformed row.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// A cell could not be parsed as its column's type.
    InvalidValue {
        /// Line number (1-indexed).
        line: usize,
        /// Column name.
        column: &'static str,
        /// The offending cell contents.
        value: String,
    },

    /// The file contained no rows for one of the arms.
    MissingArm {
        /// The arm with no rows.
        arm: Arm,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse { line, message } => {
                write!(f, "parse error at line {}: {}", line, message)
            }
            DataError::InvalidValue { line, column, value } => {
                write!(f, "invalid {} value {:?} at line {}", column, value, line)
            }
            DataError::MissingArm { arm } => {
                write!(f, "no rows found for the {} arm", arm)
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}
