//! Accumulated validation utilities.
//!
//! [`ValidationCollector`] gathers every problem found in a dataset into a
//! single [`IoError::Validation`] so a broken file reports all of them at
//! once.

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that the data variable is laid out along the time dimension.
pub(crate) fn validate_time_dependent(
    variable: &str,
    dims: &[String],
    time_dim: &str,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    if !dims.iter().any(|d| d == time_dim) {
        c.push(format!(
            "variable '{variable}' has no '{time_dim}' dimension (dims: {dims:?})"
        ));
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collector_is_ok() {
        let c = ValidationCollector::new();
        assert!(c.is_empty());
        assert!(c.finish().is_ok());
    }

    #[test]
    fn messages_are_joined() {
        let mut c = ValidationCollector::new();
        c.push("first");
        c.push("second".to_string());
        match c.finish() {
            Err(IoError::Validation { count, details }) => {
                assert_eq!(count, 2);
                assert_eq!(details, "first; second");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn time_dependent_ok() {
        let dims = vec!["ensemble_member".to_string(), "time".to_string()];
        assert!(validate_time_dependent("tasmax", &dims, "time").finish().is_ok());
    }

    #[test]
    fn time_dependent_missing_dim() {
        let dims = vec!["y".to_string(), "x".to_string()];
        let err = validate_time_dependent("orog", &dims, "time").finish().unwrap_err();
        assert!(err.to_string().contains("no 'time' dimension"));
    }
}
