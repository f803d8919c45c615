//! Combining row and column scans into an axis decision.

use std::path::Path;

use log::{debug, info};

use crate::axis::{AxisScan, DateDecider, Decider, TitleDecider};
use crate::domain::{Axis, AxisDecision};
use crate::error::EngineError;
use crate::io::Sheet;

/// Run one decider over both orientations of the sheet and pick a side.
///
/// When both orientations claim the axis, the higher top score wins and a tie
/// prefers rows. Returns the winning axis with its slice index and score.
fn find_axis<D: Decider>(decider: &D, sheet: &Sheet) -> Option<(Axis, usize, f64)> {
    let row_scan = AxisScan::run(decider, &sheet.row_slices());
    let col_scan = AxisScan::run(decider, &sheet.column_slices());

    match (row_scan.top(), col_scan.top()) {
        (Some((ri, rs)), Some((ci, cs))) => {
            if rs >= cs {
                Some((Axis::Row, ri, rs))
            } else {
                Some((Axis::Column, ci, cs))
            }
        }
        (Some((ri, rs)), None) => Some((Axis::Row, ri, rs)),
        (None, Some((ci, cs))) => Some((Axis::Column, ci, cs)),
        (None, None) => None,
    }
}

impl AxisDecision {
    /// Infer the date and title axes of the report at `path`.
    pub fn decide(path: &Path) -> Result<AxisDecision, EngineError> {
        let sheet = Sheet::load(path)?;
        AxisDecision::decide_sheet(&sheet)
    }

    /// Infer the date and title axes of an already loaded sheet.
    ///
    /// Date inference is authoritative: a sheet without a date axis is not a
    /// report we can evaluate. Title inference may fail or collide with the
    /// date axis; either way it falls back to the opposite axis.
    pub fn decide_sheet(sheet: &Sheet) -> Result<AxisDecision, EngineError> {
        let date = find_axis(&DateDecider::new(), sheet);
        debug!("date scan of '{}': {:?}", sheet.path().display(), date);
        let Some((date_axis, date_index, _)) = date else {
            return Err(EngineError::AxisInference {
                path: sheet.path().to_path_buf(),
            });
        };

        let title = find_axis(&TitleDecider::new(), sheet);
        debug!("title scan of '{}': {:?}", sheet.path().display(), title);
        let (mut title_axis, title_index) = match title {
            Some((axis, index, _)) => (axis, index),
            None => (date_axis.opposite(), 0),
        };

        // Date inference wins collisions; titles must sit on the other axis.
        if title_axis == date_axis {
            title_axis = date_axis.opposite();
        }

        let decision = AxisDecision {
            date_axis,
            date_index,
            title_axis,
            title_index,
        };
        info!(
            "'{}': dates on {} {}, titles on {} {}",
            sheet.path().display(),
            decision.date_axis.display_name(),
            decision.date_index,
            decision.title_axis.display_name(),
            decision.title_index,
        );
        Ok(decision)
    }
}
