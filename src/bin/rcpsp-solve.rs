//! Solves an RCPSP instance file within a time budget.
//!
//! ```text
//! rcpsp-solve <instance-path> <solution-path> <time-limit-seconds> <seed>
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use u_rcpsp::ga::{EvolutionEngine, GaConfig, TimeLimit};
use u_rcpsp::io::{read_instance, write_solution};
use u_rcpsp::scheduler::check;
use u_rcpsp::RcpspError;

const USAGE: &str = "usage: rcpsp-solve <instance-path> <solution-path> <time-limit-seconds> <seed>";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

struct Args {
    instance: String,
    solution: String,
    time_limit: Duration,
    seed: u64,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let [instance, solution, seconds, seed] = args else {
        return None;
    };
    let seconds: f64 = seconds.parse().ok()?;
    Some(Args {
        instance: instance.clone(),
        solution: solution.clone(),
        time_limit: Duration::try_from_secs_f64(seconds).ok()?,
        seed: seed.parse().ok()?,
    })
}

fn config_for(args: &Args) -> GaConfig {
    GaConfig::default().with_seed(args.seed)
}

fn solve(args: &Args) -> Result<(), RcpspError> {
    let instance = read_instance(&args.instance)?;
    tracing::info!(
        "Loaded {}: {} jobs, {} resources, horizon {}",
        args.instance,
        instance.job_count(),
        instance.resource_count(),
        instance.horizon()
    );

    let mut stop = TimeLimit::new(args.time_limit);
    let outcome = EvolutionEngine::new(&instance, config_for(args)).run_seeded(&mut stop)?;

    match check(&outcome.best) {
        Ok(()) => tracing::info!("Solution is valid"),
        Err(violation) => tracing::error!("Solution is invalid: {}", violation),
    }
    tracing::info!(
        "Makespan {} after {} iterations ({} evaluations, population {})",
        outcome.best.makespan(),
        outcome.iterations,
        outcome.evaluations,
        outcome.population_size
    );

    write_solution(&outcome.best, Path::new(&args.solution))?;
    tracing::info!("Wrote {}", args.solution);
    Ok(())
}

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&raw) else {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    };

    enable_tracing();
    match solve(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&strings(&["j30.rcp", "j30.sol", "2.5", "42"])).unwrap();
        assert_eq!(args.instance, "j30.rcp");
        assert_eq!(args.solution, "j30.sol");
        assert_eq!(args.time_limit, Duration::from_millis(2500));
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn test_seed_reaches_engine_config() {
        let args = parse_args(&strings(&["a", "b", "0", "1234"])).unwrap();
        assert_eq!(config_for(&args).seed, 1234);
    }

    #[test]
    fn test_parse_args_rejects_bad_usage() {
        assert!(parse_args(&strings(&["j30.rcp", "j30.sol", "2"])).is_none());
        assert!(parse_args(&strings(&["a", "b", "-1", "42"])).is_none());
        assert!(parse_args(&strings(&["a", "b", "1", "seed"])).is_none());
    }
}
