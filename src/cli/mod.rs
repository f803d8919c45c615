//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the inference/evaluation code.
//!
//! Notes:
//! - We use `clap` for a predictable CLI surface.
//! - Formulas address reports by 0-based index in `-f` order, so
//!   `rentroll eval -f a.csv -f b.csv "Add(get_cell_by_index(0,2,10), get_cell_by_index(1,5,10))"`
//!   combines two files in one expression.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rentroll", version, about = "Rolling rent report formula engine")]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate formulas against one or more report CSVs.
    Eval(EvalArgs),
    /// Print the inferred axis decision and labels of a report CSV.
    Inspect(InspectArgs),
}

/// Options for `eval`.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    /// Input report CSV. Repeatable; formulas select a report by its
    /// 0-based position in this list.
    #[arg(short = 'f', long = "file", value_name = "CSV", required = true)]
    pub files: Vec<PathBuf>,

    /// Formula text, e.g. "Ceiling(Average(get_cells_by_date(0, SEP 17)))".
    /// Repeatable; formulas are evaluated in order.
    #[arg(value_name = "FORMULA", required = true)]
    pub formulas: Vec<String>,

    /// Expect sequence results and print every cell (default prints the
    /// first cell of each result).
    #[arg(long)]
    pub list: bool,

    /// Write results, including axis decisions, to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for `inspect`.
#[derive(Debug, Parser, Clone)]
pub struct InspectArgs {
    /// Report CSV to inspect.
    #[arg(short = 'f', long = "file", value_name = "CSV")]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_collects_files_and_formulas_in_order() {
        let cli = Cli::try_parse_from([
            "rentroll",
            "eval",
            "-f",
            "a.csv",
            "-f",
            "b.csv",
            "Add(2,1)",
            "Count(get_dates(0))",
        ])
        .unwrap();

        let Command::Eval(args) = cli.command else {
            panic!("expected eval subcommand");
        };
        assert_eq!(args.files, [PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(args.formulas, ["Add(2,1)", "Count(get_dates(0))"]);
        assert!(!args.list);
    }

    #[test]
    fn eval_requires_a_file_and_a_formula() {
        assert!(Cli::try_parse_from(["rentroll", "eval", "Add(2,1)"]).is_err());
        assert!(Cli::try_parse_from(["rentroll", "eval", "-f", "a.csv"]).is_err());
    }

    #[test]
    fn verbosity_counts_occurrences() {
        let cli = Cli::try_parse_from(["rentroll", "-vv", "inspect", "-f", "a.csv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
