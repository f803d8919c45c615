//! Shared domain types for report ingestion and formula evaluation.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the axis decider, the traverser, and the evaluator
//! - exported to JSON for downstream consumers
//! - asserted on directly in tests

use serde::Serialize;

/// One of the two directions of a 2-D tabular report.
///
/// `Row` means the labels in question live in a single row (and therefore run
/// across columns); `Column` means they live in a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    None,
    Row,
    Column,
}

impl Axis {
    /// The other direction. `None` has no opposite.
    pub fn opposite(self) -> Axis {
        match self {
            Axis::None => Axis::None,
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Axis::None => "none",
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

/// The inferred assignment of date and title roles to the two report axes.
///
/// `date_index` is the row or column index (along the non-date axis) at which
/// the date labels live; `title_index` symmetrically. After a successful
/// `decide`, both axes are non-`None`, they differ, and both indices are
/// in-bounds for the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisDecision {
    pub date_axis: Axis,
    pub date_index: usize,
    pub title_axis: Axis,
    pub title_index: usize,
}

/// Scalar payload of a [`Cell`].
///
/// Report cells are strings at read time; arithmetic produces numbers; lookups
/// that miss produce `Absent`. The string → number step always goes through
/// [`CellValue::parse_number`] so that currency noise is stripped in exactly
/// one place.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Absent,
}

impl CellValue {
    /// Strip formatting noise (`$` currency markers, `,` thousands
    /// separators) ahead of numeric parsing.
    pub fn denoise(text: &str) -> String {
        text.chars().filter(|c| *c != '$' && *c != ',').collect()
    }

    /// Parse `text` as a number after denoising. Returns `None` when the
    /// cleaned text is not a float.
    pub fn parse_number(text: &str) -> Option<f64> {
        Self::denoise(text).trim().parse::<f64>().ok()
    }

    /// Numeric view of this value, coercing text through [`Self::parse_number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(t) => Self::parse_number(t),
            CellValue::Absent => None,
        }
    }

    /// Render for display and for re-use as a query argument. Absent renders
    /// empty; numbers use their shortest representation.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(t) => t.clone(),
            CellValue::Number(n) => format!("{n}"),
            CellValue::Absent => String::new(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }
}

/// A value plus its title and date annotations.
///
/// Annotations are themselves cells (typically text-valued, never annotated
/// in turn) so downstream consumers can render the full
/// `(value, title, date)` triple. Cells produced by arithmetic inherit the
/// annotations of their first operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub title: Option<Box<Cell>>,
    pub date: Option<Box<Cell>>,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Cell {
        Cell {
            value: CellValue::Text(value.into()),
            title: None,
            date: None,
        }
    }

    pub fn number(value: f64) -> Cell {
        Cell {
            value: CellValue::Number(value),
            title: None,
            date: None,
        }
    }

    pub fn absent() -> Cell {
        Cell {
            value: CellValue::Absent,
            title: None,
            date: None,
        }
    }

    /// Attach title/date annotations, consuming self.
    pub fn annotated(mut self, title: Option<Cell>, date: Option<Cell>) -> Cell {
        self.title = title.map(Box::new);
        self.date = date.map(Box::new);
        self
    }

    /// Rendered title annotation, if present.
    pub fn title_text(&self) -> Option<String> {
        self.title.as_ref().map(|c| c.value.render())
    }

    /// Rendered date annotation, if present.
    pub fn date_text(&self) -> Option<String> {
        self.date.as_ref().map(|c| c.value.render())
    }
}
