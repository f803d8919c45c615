//! Axis inference.
//!
//! A rolling report is a 2-D matrix with time on one axis and row titles on
//! the other, but files in the wild disagree about which axis is which and
//! where the labels start. This module scores every row and every column of a
//! sheet with two deciders:
//!
//! - `DateDecider` rewards cells that look like dates ("SEP 17", "1/5/2017")
//! - `TitleDecider` penalizes cells that lead with digits
//!
//! and combines the row/column scans into an [`AxisDecision`](crate::domain::AxisDecision).

pub mod date;
pub mod decider;
pub mod decision;
pub mod title;

pub use date::DateDecider;
pub use decider::{AxisScan, Decider};
pub use title::TitleDecider;
