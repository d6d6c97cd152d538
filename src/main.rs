//! Grid Puzzle Solvers
//!
//! Reads one day's puzzle input from standard input and prints the answers to
//! both parts. Logs go to standard error so answers can be piped cleanly.

use std::time::Instant;

use anyhow::{anyhow, Context};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use advent2024::{days, input, Answers, RunConfig};

/// Solves daily grid puzzles from input given on standard input.
#[derive(Parser)]
#[command(name = "advent2024")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one day, reading its input from standard input.
    Solve {
        /// Day of the calendar.
        day: u8,
        /// Log rendered maps before and after simulations.
        #[arg(long)]
        render: bool,
        /// Verify warehouse invariants after every push.
        #[arg(long)]
        check_invariants: bool,
        /// Log every warehouse step (needs trace-level logging).
        #[arg(long)]
        trace_steps: bool,
    },
    /// List the available days.
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Some(Command::Solve {
            day,
            render,
            check_invariants,
            trace_steps,
        }) => {
            let config = RunConfig {
                render,
                check_invariants,
                trace_steps,
            };
            run_solve(day, &config)?;
        }
        // default: show what can be solved
        Some(Command::List) | None => print!("{}", listing()),
    }
    Ok(())
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn")),
        1 => EnvFilter::try_new("info"),
        2 => EnvFilter::try_new("debug"),
        _ => EnvFilter::try_new("trace"),
    }
    .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

/// Solves one day and prints both answers.
fn run_solve(day: u8, config: &RunConfig) -> anyhow::Result<()> {
    let puzzle = days::find(day).ok_or_else(|| anyhow!("no solver for day {day}"))?;
    let input = input::read_stdin().context("failed to read puzzle input from stdin")?;

    let started = Instant::now();
    let answers = puzzle
        .solve(&input, config)
        .with_context(|| format!("day {day} ({}) rejected its input", puzzle.title()))?;
    info!(day, elapsed = ?started.elapsed(), "solved");

    print!("{}", format_answers(&answers));
    Ok(())
}

fn format_answers(answers: &Answers) -> String {
    format!("Part 1: {}\nPart 2: {}\n", answers.part1, answers.part2)
}

fn listing() -> String {
    days::PUZZLES
        .iter()
        .map(|puzzle| format!("{:02}  {}\n", puzzle.day(), puzzle.title()))
        .collect()
}
