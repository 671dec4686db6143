//! symem: runs the built-in memory-model scenarios against an SMT solver.
//!
//! Usage:
//!   symem                          run every scenario with auto-detected Z3
//!   symem --scenario test6 -v      one scenario, debug logging
//!   symem --solver cvc5 --format json
//!
//! Exits non-zero when any scenario's final status differs from its
//! expectation.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use symem_driver::config::SolverOptions;
use symem_driver::scenarios::{self, Scenario};
use symem_driver::{json_output, output, runner};
use symem_memory::{Session, SessionConfig};
use symem_solver::SolverKind;

#[derive(Parser)]
#[command(name = "symem")]
#[command(about = "Check pointer programs with a symbolic memory model over SMT")]
#[command(version)]
struct Cli {
    /// Solver to use (z3, cvc5, yices); defaults to $SYMEM_SOLVER, then z3
    #[arg(long)]
    solver: Option<SolverKind>,
    /// Path to the solver binary; auto-detected when omitted
    #[arg(long)]
    solver_path: Option<PathBuf>,
    /// Per-check timeout in milliseconds (0 = none)
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// SMT-LIB logic to declare, e.g. QF_LIA
    #[arg(long)]
    logic: Option<String>,
    /// Run only these scenarios (repeatable)
    #[arg(long = "scenario", value_name = "NAME")]
    scenarios: Vec<String>,
    /// List scenarios and exit
    #[arg(long)]
    list: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Print each scenario's final SMT-LIB script
    #[arg(long)]
    dump_smt: bool,
    /// Debug logging and per-scenario timing
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list {
        for scenario in scenarios::all() {
            println!(
                "{:<7} {:<22} expect {}",
                scenario.name,
                scenario.title,
                scenario.expected.as_str()
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let selected = select(&cli.scenarios)?;

    let solver = SolverOptions {
        kind: cli.solver,
        path: cli.solver_path.clone(),
        timeout_ms: cli.timeout_ms,
    }
    .resolve()
    .context("no usable SMT solver")?;

    let config = SessionConfig {
        solver: Some(solver),
        logic: cli.logic.clone(),
    };
    let mut session = Session::from_config(config).context("failed to start session")?;
    let backend = session.backend_name();

    let results = runner::run_scenarios(&mut session, &selected, cli.dump_smt);

    match cli.format {
        Format::Text => {
            output::print_header(&backend);
            output::print_results(&results, true, cli.verbose);
        }
        Format::Json => {
            let report = json_output::build_report(&backend, &results);
            json_output::print_json_report(&report).context("failed to serialize report")?;
        }
    }

    Ok(if results.iter().all(|r| r.passed()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn select(names: &[String]) -> Result<Vec<&'static Scenario>> {
    if names.is_empty() {
        return Ok(scenarios::all().iter().collect());
    }
    names
        .iter()
        .map(|name| match scenarios::find(name) {
            Some(scenario) => Ok(scenario),
            None => bail!("unknown scenario `{name}` (see --list)"),
        })
        .collect()
}
