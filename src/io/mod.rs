//! Input/output helpers.
//!
//! - CSV report loading (`sheet`)
//! - result exports (JSON) (`export`)

pub mod export;
pub mod sheet;

pub use export::*;
pub use sheet::*;
