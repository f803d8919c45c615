//! Numeric coercion of report cells.
//!
//! Report cells are text at read time; formulas need floats. Coercion goes
//! through [`CellValue::parse_number`] so currency noise (`$`, thousands `,`)
//! is stripped in one place. Bulk coercion can either fail fast or silently
//! drop uncoercible entries — the latter is the one intentionally lossy path
//! in the system, used when a formula aggregates over a label's whole slice
//! (header junk and blank cells should not poison a sum).

use log::warn;

use crate::domain::{Cell, CellValue};
use crate::error::EngineError;

/// Re-cast a cell to a numeric value, preserving annotations.
pub fn cell_to_float(cell: &Cell) -> Result<Cell, EngineError> {
    match cell.value.as_number() {
        Some(n) => Ok(Cell {
            value: CellValue::Number(n),
            title: cell.title.clone(),
            date: cell.date.clone(),
        }),
        None => Err(EngineError::NumericCoercion(cell.value.render())),
    }
}

/// Re-cast a sequence of cells to numeric values.
///
/// With `skips` set, uncoercible cells are dropped (and logged) instead of
/// failing the whole sequence; the result may be shorter than the input.
pub fn cells_to_floats(cells: &[Cell], skips: bool) -> Result<Vec<Cell>, EngineError> {
    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell_to_float(cell) {
            Ok(c) => out.push(c),
            Err(_) if skips => {
                warn!(
                    "skipping uncoercible cell '{}' in numeric context",
                    cell.value.render()
                );
            }
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}
