//! Error types for recal-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the recal-io crate.
///
/// Covers NetCDF failures, calendar and conversion problems surfaced while
/// rebuilding a dataset, data-model inconsistencies, and output-file rules.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps a filesystem error.
    #[error("i/o error on {}: {reason}", path.display())]
    Fs {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps an error originating from the recal-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from the recal-convert crate.
    #[error("conversion error: {reason}")]
    Convert {
        /// Description of the underlying conversion failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a required attribute is absent or has the wrong type.
    #[error("variable '{variable}' has no usable '{attribute}' attribute")]
    MissingAttribute {
        /// Variable the attribute belongs to.
        variable: String,
        /// Attribute name.
        attribute: String,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when the output path exists and overwriting is disabled.
    #[error("output already exists: {} (enable overwrite to replace it)", path.display())]
    OutputExists {
        /// Existing output path.
        path: PathBuf,
    },

    /// Returned when a file name lacks the `_YYYYMMDD-YYYYMMDD` date suffix.
    #[error("invalid file name '{name}': {reason}")]
    InvalidFileName {
        /// The file name as given.
        name: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<recal_calendar::CalendarError> for IoError {
    fn from(e: recal_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<recal_convert::ConvertError> for IoError {
    fn from(e: recal_convert::ConvertError) -> Self {
        IoError::Convert {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "tasmax".to_string(),
            path: PathBuf::from("/data/cpm.nc"),
        };
        assert_eq!(err.to_string(), "variable 'tasmax' not found in /data/cpm.nc");
    }

    #[test]
    fn display_missing_attribute() {
        let err = IoError::MissingAttribute {
            variable: "time".to_string(),
            attribute: "units".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "variable 'time' has no usable 'units' attribute"
        );
    }

    #[test]
    fn display_output_exists() {
        let err = IoError::OutputExists {
            path: PathBuf::from("out.nc"),
        };
        assert_eq!(
            err.to_string(),
            "output already exists: out.nc (enable overwrite to replace it)"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "a; b".to_string(),
        };
        assert_eq!(err.to_string(), "2 validation error(s): a; b");
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_calendar_error() {
        let err: IoError = recal_calendar::CalendarError::NotDay360 {
            calendar: "standard".to_string(),
        }
        .into();
        assert!(matches!(err, IoError::Calendar { .. }));
        assert!(err.to_string().contains("360_day"));
    }

    #[test]
    fn from_convert_error() {
        let err: IoError = recal_convert::ConvertError::EmptySeries.into();
        assert_eq!(err.to_string(), "conversion error: input series is empty");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
