//! Label- and index-based lookups over one report.

use std::path::Path;

use crate::domain::{Axis, AxisDecision, Cell, CellValue};
use crate::error::EngineError;
use crate::io::Sheet;

/// Lookup service over a single report sheet.
///
/// Construction requires a complete axis decision; the sheet is parsed once
/// and queried in memory from then on. Logical indices address the data body
/// only: index 0 on either axis is the first row/column past the opposite
/// label's slice, so labels and data stay aligned position by position.
#[derive(Debug, Clone)]
pub struct ReportTraverser {
    sheet: Sheet,
    decision: AxisDecision,
}

impl ReportTraverser {
    /// Build a traverser for `path` with a known decision.
    pub fn new(path: &Path, decision: AxisDecision) -> Result<ReportTraverser, EngineError> {
        ReportTraverser::from_sheet(Sheet::load(path)?, decision)
    }

    /// Build a traverser from an already loaded sheet.
    pub fn from_sheet(sheet: Sheet, decision: AxisDecision) -> Result<ReportTraverser, EngineError> {
        if decision.date_axis == Axis::None || decision.title_axis == Axis::None {
            return Err(EngineError::Argument(
                "report traversal requires both date and title axes".to_string(),
            ));
        }
        Ok(ReportTraverser { sheet, decision })
    }

    /// Infer the axes of `path` and build a traverser in one step.
    pub fn open(path: &Path) -> Result<ReportTraverser, EngineError> {
        let sheet = Sheet::load(path)?;
        let decision = AxisDecision::decide_sheet(&sheet)?;
        ReportTraverser::from_sheet(sheet, decision)
    }

    pub fn decision(&self) -> AxisDecision {
        self.decision
    }

    /// The date labels, in axis order. Annotations are absent.
    pub fn get_dates(&self) -> Vec<Cell> {
        self.labels(
            self.decision.date_axis,
            self.decision.date_index,
            self.decision.title_index,
        )
    }

    /// The title labels, in axis order. Annotations are absent.
    pub fn get_titles(&self) -> Vec<Cell> {
        self.labels(
            self.decision.title_axis,
            self.decision.title_index,
            self.decision.date_index,
        )
    }

    /// The cell at logical position (`title_index`, `date_index`), annotated
    /// with the label cells at those indices. Negative or out-of-range
    /// indices yield an absent cell, not an error.
    pub fn get_cell_by_index(&self, title_index: isize, date_index: isize) -> Cell {
        if title_index < 0 || date_index < 0 {
            return Cell::absent();
        }
        let title_pos = self.decision.date_index + 1 + title_index as usize;
        let date_pos = self.decision.title_index + 1 + date_index as usize;
        self.cell_at(title_pos, date_pos)
    }

    /// The cell addressed by exact label texts. Unresolved labels yield an
    /// absent cell.
    pub fn get_cell_by_text(&self, title_text: &str, date_text: &str) -> Cell {
        let (Some(title_pos), Some(date_pos)) = (
            self.find_title_position(title_text),
            self.find_date_position(date_text),
        ) else {
            return Cell::absent();
        };
        self.cell_at(title_pos, date_pos)
    }

    /// All data cells under the given date label, one per title position,
    /// each annotated with its title and the shared date. An unresolved
    /// label yields an empty sequence.
    pub fn get_cells_by_date(&self, date_text: &str) -> Vec<Cell> {
        let Some(date_pos) = self.find_date_position(date_text) else {
            return Vec::new();
        };
        self.title_positions()
            .map(|title_pos| self.cell_at(title_pos, date_pos))
            .collect()
    }

    /// All data cells along the given title label, one per date position,
    /// each annotated with the shared title and its date. An unresolved
    /// label yields an empty sequence.
    pub fn get_cells_by_title(&self, title_text: &str) -> Vec<Cell> {
        let Some(title_pos) = self.find_title_position(title_text) else {
            return Vec::new();
        };
        self.date_positions()
            .map(|date_pos| self.cell_at(title_pos, date_pos))
            .collect()
    }

    /// Label cells along `axis` at `slice_index`, starting past the opposite
    /// label's offset.
    fn labels(&self, axis: Axis, slice_index: usize, other_index: usize) -> Vec<Cell> {
        let extent = self.extent_along(axis);
        (other_index + 1..extent)
            .filter_map(|pos| self.label_text(axis, slice_index, pos))
            .map(Cell::text)
            .collect()
    }

    /// Positions a label slice runs across: columns for a row slice, rows
    /// for a column slice.
    fn extent_along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column | Axis::None => self.sheet.height(),
            Axis::Row => self.sheet.width(),
        }
    }

    /// Text of the label at `pos` along the `axis` slice at `slice_index`.
    fn label_text(&self, axis: Axis, slice_index: usize, pos: usize) -> Option<&str> {
        match axis {
            Axis::Row => self.sheet.cell(slice_index, pos),
            Axis::Column | Axis::None => self.sheet.cell(pos, slice_index),
        }
    }

    /// Physical title positions of the data body, in order.
    fn title_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.decision.date_index + 1..self.extent_along(self.decision.title_axis)
    }

    /// Physical date positions of the data body, in order.
    fn date_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.decision.title_index + 1..self.extent_along(self.decision.date_axis)
    }

    /// Resolve a title label to its physical position.
    fn find_title_position(&self, text: &str) -> Option<usize> {
        let axis = self.decision.title_axis;
        let slice_index = self.decision.title_index;
        self.title_positions()
            .find(|pos| self.label_text(axis, slice_index, *pos) == Some(text))
    }

    /// Resolve a date label to its physical position.
    fn find_date_position(&self, text: &str) -> Option<usize> {
        let axis = self.decision.date_axis;
        let slice_index = self.decision.date_index;
        self.date_positions()
            .find(|pos| self.label_text(axis, slice_index, *pos) == Some(text))
    }

    /// The annotated cell at physical (title, date) positions.
    fn cell_at(&self, title_pos: usize, date_pos: usize) -> Cell {
        let (row, col) = match self.decision.date_axis {
            // Dates in a row: date positions are columns, title positions rows.
            Axis::Row => (title_pos, date_pos),
            Axis::Column | Axis::None => (date_pos, title_pos),
        };
        let value = match self.sheet.cell(row, col) {
            Some(text) => CellValue::Text(text.to_string()),
            None => CellValue::Absent,
        };
        let title = self
            .label_text(self.decision.title_axis, self.decision.title_index, title_pos)
            .map(Cell::text);
        let date = self
            .label_text(self.decision.date_axis, self.decision.date_index, date_pos)
            .map(Cell::text);
        Cell {
            value,
            title: title.map(Box::new),
            date: date.map(Box::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        CASHFLOW_DATES, CASHFLOW_TITLES, cashflow_fixture, transposed_cashflow_fixture,
    };

    fn texts(cells: &[Cell]) -> Vec<String> {
        cells.iter().map(|c| c.value.render()).collect()
    }

    #[test]
    fn labels_skip_the_opposite_slice() {
        let file = cashflow_fixture();
        let traverser = ReportTraverser::open(file.path()).unwrap();

        let dates = traverser.get_dates();
        assert_eq!(texts(&dates), CASHFLOW_DATES);
        assert!(dates.iter().all(|c| c.title.is_none() && c.date.is_none()));

        assert_eq!(texts(&traverser.get_titles()), CASHFLOW_TITLES);
    }

    #[test]
    fn by_index_addresses_the_data_body() {
        let file = cashflow_fixture();
        let traverser = ReportTraverser::open(file.path()).unwrap();

        let first = traverser.get_cell_by_index(0, 0);
        assert_eq!(first.value, CellValue::Text("$4,500.00".to_string()));
        assert_eq!(first.title_text().as_deref(), Some("Scheduled Rent"));
        assert_eq!(first.date_text().as_deref(), Some("JAN 17"));

        let collected_nov = traverser.get_cell_by_index(2, 10);
        assert_eq!(collected_nov.value, CellValue::Text("4579".to_string()));
        assert_eq!(collected_nov.title_text().as_deref(), Some("Collected Rent"));
        assert_eq!(collected_nov.date_text().as_deref(), Some("NOV 17"));
    }

    #[test]
    fn negative_or_out_of_range_indices_are_absent() {
        let file = cashflow_fixture();
        let traverser = ReportTraverser::open(file.path()).unwrap();

        assert_eq!(traverser.get_cell_by_index(-1, 0), Cell::absent());
        assert_eq!(traverser.get_cell_by_index(0, -1), Cell::absent());
        assert!(traverser.get_cell_by_index(100, 0).value.is_absent());
    }

    #[test]
    fn by_text_resolves_exact_labels() {
        let file = cashflow_fixture();
        let traverser = ReportTraverser::open(file.path()).unwrap();

        let cell = traverser.get_cell_by_text("Late Fees", "APR 17");
        assert_eq!(cell.value, CellValue::Text("82.5".to_string()));
        assert_eq!(cell.title_text().as_deref(), Some("Late Fees"));
        assert_eq!(cell.date_text().as_deref(), Some("APR 17"));

        assert!(traverser.get_cell_by_text("No Such Row", "APR 17").value.is_absent());
        assert!(traverser.get_cell_by_text("Late Fees", "APR 99").value.is_absent());
    }

    #[test]
    fn cells_by_date_walk_the_title_axis() {
        let file = cashflow_fixture();
        let traverser = ReportTraverser::open(file.path()).unwrap();

        let sep = traverser.get_cells_by_date("SEP 17");
        assert_eq!(
            texts(&sep),
            vec!["$4,800.00", "-350", "4450", "-150", "230", "4520", "82.5", "-92.5"]
        );
        assert!(sep.iter().all(|c| c.date_text().as_deref() == Some("SEP 17")));
        assert_eq!(sep[0].title_text().as_deref(), Some("Scheduled Rent"));
        assert_eq!(sep[7].title_text().as_deref(), Some("Bad Debt"));

        assert!(traverser.get_cells_by_date("SEP 99").is_empty());
    }

    #[test]
    fn cells_by_title_walk_the_date_axis() {
        let file = cashflow_fixture();
        let traverser = ReportTraverser::open(file.path()).unwrap();

        let discounts = traverser.get_cells_by_title("Discount/Promotion");
        assert_eq!(discounts.len(), 14);
        assert!(
            discounts
                .iter()
                .all(|c| c.title_text().as_deref() == Some("Discount/Promotion"))
        );
        let dates: Vec<String> = discounts.iter().filter_map(|c| c.date_text()).collect();
        assert_eq!(dates, CASHFLOW_DATES);

        assert!(traverser.get_cells_by_title("No Such Row").is_empty());
    }

    #[test]
    fn transposed_sheet_answers_identically() {
        let file = cashflow_fixture();
        let transposed = transposed_cashflow_fixture();
        let a = ReportTraverser::open(file.path()).unwrap();
        let b = ReportTraverser::open(transposed.path()).unwrap();

        assert_eq!(a.get_dates(), b.get_dates());
        assert_eq!(a.get_titles(), b.get_titles());
        assert_eq!(a.get_cell_by_index(2, 10), b.get_cell_by_index(2, 10));
        assert_eq!(
            a.get_cells_by_date("SEP 17"),
            b.get_cells_by_date("SEP 17")
        );
    }

    #[test]
    fn construction_rejects_unassigned_axes() {
        let file = cashflow_fixture();
        let decision = AxisDecision {
            date_axis: Axis::None,
            date_index: 0,
            title_axis: Axis::Column,
            title_index: 0,
        };
        let err = ReportTraverser::new(file.path(), decision).unwrap_err();
        assert!(matches!(err, EngineError::Argument(_)));
    }
}
