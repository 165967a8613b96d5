//! Plain-text instance and solution files.
//!
//! # Instance format
//!
//! Whitespace-separated integers; line breaks carry no meaning.
//!
//! ```text
//! n r
//! capacity_1 .. capacity_r
//! duration demand_1 .. demand_r successor_count successor_1 .. successor_k   (n times)
//! ```
//!
//! Successors are numbered from 1 in the file and from 0 in memory.
//!
//! # Solution format
//!
//! ```text
//! n
//! job start        (n lines, job numbered from 1)
//! ```

use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::error::{ParseError, RcpspError};
use crate::models::{Job, ProblemInstance, Solution};

/// Parses an instance from its textual form and validates it.
///
/// # Example
/// ```
/// use u_rcpsp::io::parse_instance;
///
/// let instance = parse_instance("3 1\n5\n2 2 1 2\n3 3 0\n1 5 0\n").unwrap();
/// assert_eq!(instance.job_count(), 3);
/// assert_eq!(instance.successors(0), &[1]);
/// ```
pub fn parse_instance(text: &str) -> Result<ProblemInstance, ParseError> {
    let mut tokens = Tokens::new(text);

    let job_count: usize = tokens.next("job count")?;
    let resource_count: usize = tokens.next("resource count")?;

    // Header counts are untrusted: vectors grow with the tokens actually read.
    let mut capacities = Vec::new();
    for k in 0..resource_count {
        capacities.push(tokens.next(&format!("capacity of resource {}", k + 1))?);
    }

    let mut jobs = Vec::new();
    for job in 0..job_count {
        let duration = tokens.next(&format!("duration of job {}", job + 1))?;
        let mut demands = Vec::new();
        for k in 0..resource_count {
            demands.push(tokens.next(&format!("demand of job {} on resource {}", job + 1, k + 1))?);
        }
        let successor_count: usize =
            tokens.next(&format!("successor count of job {}", job + 1))?;

        let mut successors = Vec::new();
        for _ in 0..successor_count {
            let value: usize = tokens.next(&format!("successor of job {}", job + 1))?;
            if value == 0 || value > job_count {
                return Err(ParseError::SuccessorOutOfRange {
                    job,
                    value,
                    job_count,
                });
            }
            successors.push(value - 1);
        }

        jobs.push(
            Job::new(duration)
                .with_demands(demands)
                .with_successors(successors),
        );
    }

    Ok(ProblemInstance::new(capacities, jobs)?)
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<ProblemInstance, RcpspError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_instance(&text)?)
}

/// Renders a solution in the solution file format.
pub fn format_solution(solution: &Solution<'_>) -> String {
    let mut out = format!("{}\n", solution.len());
    for (job, start) in solution.start_times().iter().enumerate() {
        out.push_str(&format!("{} {}\n", job + 1, start));
    }
    out
}

/// Writes a solution file.
pub fn write_solution(solution: &Solution<'_>, path: impl AsRef<Path>) -> Result<(), RcpspError> {
    fs::write(path, format_solution(solution))?;
    Ok(())
}

/// Numbered whitespace tokens.
struct Tokens<'t> {
    inner: SplitWhitespace<'t>,
    position: usize,
}

impl<'t> Tokens<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    fn next<T: FromStr>(&mut self, expected: &str) -> Result<T, ParseError> {
        let token = self.inner.next().ok_or_else(|| ParseError::UnexpectedEof {
            expected: expected.to_string(),
        })?;
        self.position += 1;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
            position: self.position,
            expected: expected.to_string(),
        })
    }
}
