//! Error types.
//!
//! Instance problems are fatal and reported before search starts.
//! Schedule construction errors signal an instance that cannot be
//! scheduled within its horizon or an activity list that is not a
//! permutation of the jobs. Operator failures are not errors: a mutation
//! that finds no feasible neighbour keeps the unmodified child.

use thiserror::Error;

use crate::models::{JobId, Time};
use crate::validation::ValidationError;

/// An instance rejected by [`validate_input`](crate::validation::validate_input).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid instance ({} problem(s)): {}", .0.len(), join_messages(.0))]
pub struct InstanceError(pub Vec<ValidationError>);

impl InstanceError {
    /// The individual validation problems.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure of the serial schedule generation scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The job could not be placed before the end of the horizon.
    #[error("job {job} cannot be scheduled within the horizon of {horizon} periods")]
    HorizonExceeded { job: JobId, horizon: Time },
    /// The activity list is not a permutation of `0..n`.
    #[error("invalid activity list: {0}")]
    InvalidActivityList(String),
    /// A start-time vector whose length does not match the instance.
    #[error("expected {expected} start times, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Failure while reading the textual instance format.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Input ended while a value was still expected.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
    /// A token could not be read as a non-negative integer.
    #[error("token {position} ({token:?}) is not a valid {expected}")]
    InvalidNumber {
        token: String,
        position: usize,
        expected: String,
    },
    /// A 1-based successor number outside `1..=n`.
    #[error("job {job} lists successor {value}, expected a number in 1..={job_count}")]
    SuccessorOutOfRange {
        job: JobId,
        value: usize,
        job_count: usize,
    },
    /// The parsed data failed instance validation.
    #[error(transparent)]
    Instance(#[from] InstanceError),
}

/// Crate-level error for callers that drive the whole pipeline.
#[derive(Debug, Error)]
pub enum RcpspError {
    #[error(transparent)]
    Instance(#[from] InstanceError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_instance_error_lists_all_messages() {
        let err = InstanceError(vec![
            ValidationError::new(ValidationErrorKind::SelfLoop, "job 1 succeeds itself"),
            ValidationError::new(ValidationErrorKind::InvalidSuccessor, "job 2 -> 9"),
        ]);
        let text = err.to_string();
        assert!(text.contains("2 problem(s)"));
        assert!(text.contains("job 1 succeeds itself"));
        assert!(text.contains("job 2 -> 9"));
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn test_parse_error_wraps_instance_error() {
        let inner = InstanceError(vec![ValidationError::new(
            ValidationErrorKind::CyclicDependency,
            "cycle",
        )]);
        let err: ParseError = inner.clone().into();
        assert_eq!(err, ParseError::Instance(inner));
    }
}
