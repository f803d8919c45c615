//! The formula engine.
//!
//! Formulas are fully-parenthesized prefix calls with comma-separated
//! arguments and no quoting: `Ceiling(Average(get_cells_by_date(0, SEP 17)))`.
//! Anything between delimiters that is not a recognized function name is a
//! literal.
//!
//! - `tree`: the linear-scan parser and the arena-allocated parse tree
//! - `functions`: the registry of evaluatable functions and their contracts
//! - `eval`: the bottom-up evaluator, including traverser bindings

pub mod eval;
pub mod functions;
pub mod tree;

pub use eval::{Value, evaluate_trees};
pub use functions::FunctionKind;
pub use tree::{NodeKind, ParseTree, ParseTreeNode};
