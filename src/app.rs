//! Top-level application orchestration.
//!
//! The binary is intentionally tiny; this module is the "real main" that
//! parses the CLI, sets up logging, and dispatches to the pipeline.

use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::cli::{Cli, Command, InspectArgs};
use crate::domain::AxisDecision;
use crate::error::EngineError;
use crate::io::Sheet;
use crate::report;
use crate::traverse::ReportTraverser;

pub mod pipeline;

/// Entry point for the `rentroll` binary.
pub fn run() -> Result<(), EngineError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Eval(args) => pipeline::run_eval(&args),
        Command::Inspect(args) => run_inspect(&args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A second init (e.g. under a test harness) is harmless; keep the first.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

fn run_inspect(args: &InspectArgs) -> Result<(), EngineError> {
    let sheet = Sheet::load(&args.file)?;
    let decision = AxisDecision::decide_sheet(&sheet)?;
    let traverser = ReportTraverser::from_sheet(sheet, decision)?;

    println!("{}", report::format_decision(&args.file, &decision));
    println!("{}", report::format_labels("dates", &traverser.get_dates()));
    println!("{}", report::format_labels("titles", &traverser.get_titles()));
    Ok(())
}
