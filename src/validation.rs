//! Input validation for RCPSP instances.
//!
//! Checks structural integrity of jobs and resources before scheduling.
//! Detects:
//! - Demand rows whose length differs from the number of resources
//! - Jobs demanding more of a resource than its capacity
//! - Successor references outside the job range, and self-loops
//! - Circular precedence dependencies (DAG validation)
//! - Horizons (sum of durations) that overflow the time type
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Job, JobId, Time};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A job's demand vector does not have one entry per resource.
    DimensionMismatch,
    /// A job needs more units of a resource than are available per period.
    DemandExceedsCapacity,
    /// A successor index does not name a job.
    InvalidSuccessor,
    /// A job lists itself as a successor.
    SelfLoop,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// The sum of all durations does not fit in [`Time`].
    HorizonOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an RCPSP instance.
///
/// Checks:
/// 1. Every demand row has one entry per resource
/// 2. No demand exceeds the capacity of its resource
/// 3. Every successor index is in range and differs from its job
/// 4. The sum of durations fits in [`Time`]
/// 5. No circular precedence dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(capacities: &[u32], jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let n = jobs.len();

    for (job, spec) in jobs.iter().enumerate() {
        if spec.demands.len() != capacities.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DimensionMismatch,
                format!(
                    "Job {job} has {} demands but the instance has {} resources",
                    spec.demands.len(),
                    capacities.len()
                ),
            ));
        }

        for (resource, (&demand, &capacity)) in spec.demands.iter().zip(capacities).enumerate() {
            if demand > capacity {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DemandExceedsCapacity,
                    format!(
                        "Job {job} demands {demand} units of resource {resource} (capacity {capacity})"
                    ),
                ));
            }
        }

        for &succ in &spec.successors {
            if succ >= n {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSuccessor,
                    format!("Job {job} references unknown successor {succ}"),
                ));
            } else if succ == job {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfLoop,
                    format!("Job {job} lists itself as a successor"),
                ));
            }
        }
    }

    let horizon = jobs
        .iter()
        .try_fold(0 as Time, |acc, j| acc.checked_add(j.duration));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            format!("Sum of job durations exceeds {}", Time::MAX),
        ));
    }

    if let Some(cycle_err) = detect_cycles(jobs) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the successor graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS with an explicit stack of `(job, next successor
/// slot)` frames. If a back-edge is found (reaching a node currently on the
/// DFS stack), a cycle exists. Out-of-range successors and self-loops are
/// skipped; they are reported separately.
///
/// # Complexity
/// O(n + e) time, O(n) memory independent of chain depth.
fn detect_cycles(jobs: &[Job]) -> Option<ValidationError> {
    let n = jobs.len();
    let mut visited = vec![false; n];
    let mut in_stack = vec![false; n];
    let mut stack: Vec<(JobId, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        in_stack[root] = true;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, slot) = *frame;
            let Some(&next) = jobs[node].successors.get(slot) else {
                in_stack[node] = false;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if next >= n || next == node {
                continue;
            }
            if in_stack[next] {
                // Back edge → cycle
                return Some(ValidationError::new(
                    ValidationErrorKind::CyclicDependency,
                    format!("Circular dependency detected involving job {next}"),
                ));
            }
            if !visited[next] {
                visited[next] = true;
                in_stack[next] = true;
                stack.push((next, 0));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_input() {
        let jobs = vec![
            Job::new(2).with_demands(vec![2]).with_successor(1),
            Job::new(3).with_demands(vec![3]),
            Job::new(1).with_demands(vec![5]),
        ];
        assert!(validate_input(&[5], &jobs).is_ok());
    }

    #[test]
    fn test_dimension_mismatch() {
        let jobs = vec![Job::new(1).with_demands(vec![1])];
        let errors = validate_input(&[1, 1], &jobs).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::DimensionMismatch));
    }

    #[test]
    fn test_demand_exceeds_capacity() {
        let jobs = vec![Job::new(1).with_demands(vec![1, 7])];
        let errors = validate_input(&[3, 6], &jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DemandExceedsCapacity);
        assert!(errors[0].message.contains("resource 1"));
    }

    #[test]
    fn test_invalid_successor() {
        let jobs = vec![Job::new(1).with_demands(vec![0]).with_successor(4)];
        let errors = validate_input(&[1], &jobs).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvalidSuccessor));
    }

    #[test]
    fn test_self_loop() {
        let jobs = vec![Job::new(1).with_demands(vec![0]).with_successor(0)];
        let errors = validate_input(&[1], &jobs).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::SelfLoop));
        assert!(!has_kind(&errors, ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_cyclic_dependency() {
        // 0 → 1 → 2 → 0 (cycle)
        let jobs = vec![
            Job::new(1).with_demands(vec![0]).with_successor(1),
            Job::new(1).with_demands(vec![0]).with_successor(2),
            Job::new(1).with_demands(vec![0]).with_successor(0),
        ];
        let errors = validate_input(&[1], &jobs).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_no_cycle_in_chain() {
        // 0 → 1 → 2 and 0 → 2 (diamond-like, no cycle)
        let jobs = vec![
            Job::new(1).with_demands(vec![0]).with_successors([1, 2]),
            Job::new(1).with_demands(vec![0]).with_successor(2),
            Job::new(1).with_demands(vec![0]),
        ];
        assert!(validate_input(&[1], &jobs).is_ok());
    }

    #[test]
    fn test_long_chain_no_cycle() {
        let n = 200_000;
        let jobs: Vec<Job> = (0..n)
            .map(|j| {
                let job = Job::new(1).with_demands(vec![1]);
                if j + 1 < n {
                    job.with_successor(j + 1)
                } else {
                    job
                }
            })
            .collect();
        assert!(validate_input(&[1], &jobs).is_ok());
    }

    #[test]
    fn test_long_chain_closed_into_cycle() {
        let n = 200_000;
        let jobs: Vec<Job> = (0..n)
            .map(|j| Job::new(1).with_demands(vec![1]).with_successor((j + 1) % n))
            .collect();
        let errors = validate_input(&[1], &jobs).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_horizon_overflow() {
        let jobs = vec![
            Job::new(Time::MAX).with_demands(vec![]),
            Job::new(1).with_demands(vec![]),
        ];
        let errors = validate_input(&[], &jobs).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::HorizonOverflow));
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![
            Job::new(1).with_demands(vec![9]).with_successor(5),
            Job::new(1).with_demands(vec![1, 1]),
        ];
        let errors = validate_input(&[2], &jobs).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
