//! Export evaluation results to JSON.
//!
//! The export is the "portable" representation of a run: which reports were
//! read (and how their axes were decided), which formulas ran, and the
//! `(value, title, date)` triple of every result cell. Consumers must treat
//! `title`/`date` as optional — not every cell is annotated.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::domain::{AxisDecision, Cell};
use crate::error::EngineError;

/// One result cell, rendered for downstream consumers.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedCell {
    pub value: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
}

impl From<&Cell> for RenderedCell {
    fn from(cell: &Cell) -> RenderedCell {
        RenderedCell {
            value: if cell.value.is_absent() {
                None
            } else {
                Some(cell.value.render())
            },
            title: cell.title_text(),
            date: cell.date_text(),
        }
    }
}

/// A report that participated in the run, with its inferred axes.
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport {
    pub path: PathBuf,
    pub date_axis: String,
    pub date_index: usize,
    pub title_axis: String,
    pub title_index: usize,
}

impl ReportExport {
    pub fn new(path: &Path, decision: AxisDecision) -> ReportExport {
        ReportExport {
            path: path.to_path_buf(),
            date_axis: decision.date_axis.display_name().to_string(),
            date_index: decision.date_index,
            title_axis: decision.title_axis.display_name().to_string(),
            title_index: decision.title_index,
        }
    }
}

/// One formula and the cells it produced.
#[derive(Debug, Clone, Serialize)]
pub struct FormulaExport {
    pub formula: String,
    pub cells: Vec<RenderedCell>,
}

/// The whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunExport {
    pub tool: String,
    pub generated: String,
    pub reports: Vec<ReportExport>,
    pub results: Vec<FormulaExport>,
}

impl RunExport {
    pub fn new(reports: Vec<ReportExport>, results: Vec<FormulaExport>) -> RunExport {
        RunExport {
            tool: "rentroll".to_string(),
            generated: Local::now().to_rfc3339(),
            reports,
            results,
        }
    }
}

/// Write a run export as pretty-printed JSON.
pub fn write_results_json(path: &Path, export: &RunExport) -> Result<(), EngineError> {
    let file = File::create(path).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::to_writer_pretty(file, export).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    Ok(())
}
