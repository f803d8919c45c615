//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the report axes (`Axis`) and the inferred axis assignment (`AxisDecision`)
//! - the universal datum of the system (`Cell`, `CellValue`)

pub mod types;

pub use types::*;
