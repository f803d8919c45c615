//! Shared evaluation pipeline for the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! axis inference -> traverser construction -> parse -> evaluate -> render/export.

use log::debug;

use crate::cli::EvalArgs;
use crate::domain::Cell;
use crate::error::EngineError;
use crate::formula::ParseTree;
use crate::io::{FormulaExport, RenderedCell, ReportExport, RunExport, write_results_json};
use crate::report;
use crate::traverse::ReportTraverser;

/// All computed outputs of a single `eval` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub reports: Vec<ReportExport>,
    pub results: Vec<(String, Vec<Cell>)>,
}

/// Execute the evaluation pipeline and return the computed outputs.
pub fn evaluate(args: &EvalArgs) -> Result<RunOutput, EngineError> {
    // 1) Decide axes and build one traverser per report, in -f order.
    let mut reports = Vec::with_capacity(args.files.len());
    let mut traversers = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let traverser = ReportTraverser::open(path)?;
        reports.push(ReportExport::new(path, traverser.decision()));
        traversers.push(traverser);
    }

    // 2) Parse every formula up front so a late typo cannot waste a run.
    let mut trees = Vec::with_capacity(args.formulas.len());
    for formula in &args.formulas {
        trees.push(ParseTree::parse(formula)?);
    }

    // 3) Evaluate in order.
    let mut results = Vec::with_capacity(trees.len());
    for (formula, tree) in args.formulas.iter().zip(&trees) {
        debug!("evaluating '{formula}'");
        let cells = if args.list {
            tree.evaluate_cells(&traversers)?
        } else {
            vec![tree.evaluate_cell(&traversers)?]
        };
        results.push((formula.clone(), cells));
    }

    Ok(RunOutput { reports, results })
}

/// Run `eval`, print results, and export when asked.
pub fn run_eval(args: &EvalArgs) -> Result<(), EngineError> {
    let output = evaluate(args)?;

    for (formula, cells) in &output.results {
        println!("{formula}");
        println!("{}", report::format_cells(cells));
    }

    if let Some(export_path) = &args.export {
        let results = output
            .results
            .iter()
            .map(|(formula, cells)| FormulaExport {
                formula: formula.clone(),
                cells: cells.iter().map(RenderedCell::from).collect(),
            })
            .collect();
        write_results_json(export_path, &RunExport::new(output.reports, results))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;
    use crate::testutil::cashflow_fixture;

    fn eval_args(files: Vec<std::path::PathBuf>, formulas: Vec<String>) -> EvalArgs {
        EvalArgs {
            files,
            formulas,
            list: false,
            export: None,
        }
    }

    #[test]
    fn pipeline_evaluates_formulas_in_order() {
        let file = cashflow_fixture();
        let args = eval_args(
            vec![file.path().to_path_buf()],
            vec!["Add(2,1)".to_string(), "Count(get_dates(0))".to_string()],
        );

        let output = evaluate(&args).unwrap();
        assert_eq!(output.reports.len(), 1);
        assert_eq!(output.reports[0].date_axis, "row");
        assert_eq!(output.results.len(), 2);
        assert_eq!(output.results[0].1[0].value, CellValue::Number(3.0));
        assert_eq!(output.results[1].1[0].value, CellValue::Number(14.0));
    }

    #[test]
    fn list_mode_returns_whole_sequences() {
        let file = cashflow_fixture();
        let mut args = eval_args(
            vec![file.path().to_path_buf()],
            vec!["get_dates(0)".to_string()],
        );
        args.list = true;

        let output = evaluate(&args).unwrap();
        assert_eq!(output.results[0].1.len(), 14);
    }

    #[test]
    fn pipeline_surfaces_formula_errors() {
        let file = cashflow_fixture();
        let args = eval_args(
            vec![file.path().to_path_buf()],
            vec!["IDONTEXIST()".to_string()],
        );
        assert!(matches!(
            evaluate(&args),
            Err(EngineError::UnknownFunction(_))
        ));
    }
}
