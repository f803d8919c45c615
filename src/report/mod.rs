//! Terminal rendering of decisions and evaluated cells.
//!
//! We keep formatting code in one place so:
//! - the inference/evaluation code stays clean and testable
//! - output changes are localized

use std::path::Path;

use crate::domain::{AxisDecision, Cell};

/// One line describing an inferred axis decision.
pub fn format_decision(path: &Path, decision: &AxisDecision) -> String {
    format!(
        "{}: dates on {} {}, titles on {} {}",
        path.display(),
        decision.date_axis.display_name(),
        decision.date_index,
        decision.title_axis.display_name(),
        decision.title_index,
    )
}

/// One line per cell: the value, then whatever annotations it carries.
pub fn format_cells(cells: &[Cell]) -> String {
    cells.iter().map(format_cell).collect::<Vec<_>>().join("\n")
}

fn format_cell(cell: &Cell) -> String {
    let value = if cell.value.is_absent() {
        "<absent>".to_string()
    } else {
        cell.value.render()
    };
    match (cell.title_text(), cell.date_text()) {
        (Some(title), Some(date)) => format!("{value}  [{title} | {date}]"),
        (Some(title), None) => format!("{value}  [{title}]"),
        (None, Some(date)) => format!("{value}  [{date}]"),
        (None, None) => value,
    }
}

/// A labels listing for `inspect`: one line per label.
pub fn format_labels(kind: &str, labels: &[Cell]) -> String {
    let mut out = format!("{kind} ({}):", labels.len());
    for label in labels {
        out.push_str("\n  ");
        out.push_str(&label.value.render());
    }
    out
}
