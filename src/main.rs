///
/// baton CLI - round-robin string printing from the command line
///
/// Usage: baton <TEXT> <CHARS_PER_TURN> <THREADS> [--pacing-ms N] [--turns N] [-v...]
///
/// Runs until interrupted (Ctrl-C) or until `--turns` turns are printed,
/// then prints "Program exiting." and exits successfully.
///

use baton::{PrinterBuilder, Termination, signal};
use clap::{ArgAction, Parser};
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;

#[derive(Parser)]
#[command(name = "baton")]
#[command(version, about = "Print a string round-robin from cooperating threads", long_about = None)]
struct Cli {
    /// The string to print
    text: String,

    /// Number of characters each thread prints per turn
    chars_per_turn: usize,

    /// Number of printing threads
    threads: usize,

    /// Pause between turns, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pacing_ms: u64,

    /// Stop after this many turns instead of waiting for Ctrl-C
    #[arg(long)]
    turns: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut builder = PrinterBuilder::new(&cli.text)
        .chars_per_turn(cli.chars_per_turn)
        .workers(cli.threads)
        .pacing(Duration::from_millis(cli.pacing_ms))
        .termination(Termination::process());

    if let Some(turns) = cli.turns {
        builder = builder.max_turns(turns);
    }

    let _guard = match signal::install() {
        Ok(guard) => Some(guard),
        Err(e) => {
            tracing::warn!(error = %e, "interrupt hook unavailable; use --turns to bound the run");
            None
        }
    };

    let dispatcher = match builder.build() {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            tracing::error!(kind = e.as_label(), "startup failed");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let summary = dispatcher.run();
    tracing::info!(turns = summary.turns, cursor = summary.cursor, "run finished");

    println!("Program exiting.");
    ExitCode::SUCCESS
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}
