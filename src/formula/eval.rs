//! Bottom-up evaluation of a parse tree.
//!
//! Every node evaluates to a [`Value`]: one annotated cell, or a sequence of
//! them. How a parent merges its children's values depends on the function:
//! most flatten every child into one argument list, vector functions keep
//! each child as a whole vector, and `IfElse` keeps its branches' shapes so
//! the chosen branch passes through unchanged.
//!
//! Traverser bindings read from the shared, ordered traverser sequence; their
//! first argument selects a traverser by index, which is what lets a single
//! formula combine several reports.

use crate::domain::{Cell, CellValue};
use crate::error::EngineError;
use crate::formula::functions::FunctionKind;
use crate::formula::tree::{NodeKind, ParseTree, ParseTreeNode};
use crate::traverse::{ReportTraverser, cell_to_float, cells_to_floats};

/// Result shape of evaluating a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Cell),
    Vector(Vec<Cell>),
}

impl Value {
    /// Flatten to a sequence (a scalar becomes a one-element sequence).
    pub fn into_cells(self) -> Vec<Cell> {
        match self {
            Value::Scalar(cell) => vec![cell],
            Value::Vector(cells) => cells,
        }
    }

    /// First cell of the result; absent when the sequence is empty.
    pub fn into_first(self) -> Cell {
        match self {
            Value::Scalar(cell) => cell,
            Value::Vector(cells) => cells.into_iter().next().unwrap_or_else(Cell::absent),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::Vector(_))
    }
}

impl ParseTree {
    /// Evaluate against `traversers`.
    ///
    /// With `expecting_list` the full sequence comes back; otherwise only the
    /// first element does, which is the common case for scalar formulas.
    pub fn evaluate(
        &self,
        traversers: &[ReportTraverser],
        expecting_list: bool,
    ) -> Result<Value, EngineError> {
        let value = Evaluator {
            tree: self,
            traversers,
        }
        .eval(self.root())?;
        Ok(if expecting_list {
            Value::Vector(value.into_cells())
        } else {
            Value::Scalar(value.into_first())
        })
    }

    /// Evaluate to a single cell.
    pub fn evaluate_cell(&self, traversers: &[ReportTraverser]) -> Result<Cell, EngineError> {
        Ok(self.evaluate(traversers, false)?.into_first())
    }

    /// Evaluate to a sequence of cells.
    pub fn evaluate_cells(&self, traversers: &[ReportTraverser]) -> Result<Vec<Cell>, EngineError> {
        Ok(self.evaluate(traversers, true)?.into_cells())
    }
}

/// Evaluate independent trees in order, returning their singleton results.
pub fn evaluate_trees(
    trees: &[ParseTree],
    traversers: &[ReportTraverser],
) -> Result<Vec<Cell>, EngineError> {
    trees.iter().map(|t| t.evaluate_cell(traversers)).collect()
}

struct Evaluator<'a> {
    tree: &'a ParseTree,
    traversers: &'a [ReportTraverser],
}

impl Evaluator<'_> {
    fn eval(&self, id: usize) -> Result<Value, EngineError> {
        let node = &self.tree.nodes()[id];
        match node.kind {
            NodeKind::Constant => Ok(Value::Scalar(Cell::text(node.text.clone()))),
            NodeKind::Function => self.eval_function(node),
        }
    }

    fn eval_function(&self, node: &ParseTreeNode) -> Result<Value, EngineError> {
        let kind = FunctionKind::lookup(&node.text)
            .ok_or_else(|| EngineError::UnknownFunction(node.text.clone()))?;

        match kind {
            FunctionKind::Add => self.eval_reduce(kind, node, |a, b| a + b),
            FunctionKind::Subtract => self.eval_reduce(kind, node, |a, b| a - b),
            FunctionKind::Multiply => self.eval_reduce(kind, node, |a, b| a * b),
            FunctionKind::Divide => self.eval_reduce(kind, node, |a, b| a / b),
            FunctionKind::FloorDivide => self.eval_reduce(kind, node, |a, b| (a / b).floor()),
            FunctionKind::GreaterThan => self.eval_compare(kind, node, |a, b| a > b),
            FunctionKind::GreaterEqualThan => self.eval_compare(kind, node, |a, b| a >= b),
            FunctionKind::LessThan => self.eval_compare(kind, node, |a, b| a < b),
            FunctionKind::LessEqualThan => self.eval_compare(kind, node, |a, b| a <= b),
            FunctionKind::Count => self.eval_count(kind, node),
            FunctionKind::Average => self.eval_average(kind, node),
            FunctionKind::Floor => self.eval_rounding(kind, node, f64::floor),
            FunctionKind::Ceiling => self.eval_rounding(kind, node, f64::ceil),
            FunctionKind::Round => self.eval_round(kind, node),
            FunctionKind::IfElse => self.eval_if_else(kind, node),
            FunctionKind::VectorAdd => self.eval_vector(kind, node, |a, b| a + b),
            FunctionKind::VectorSubtract => self.eval_vector(kind, node, |a, b| a - b),
            FunctionKind::VectorMultiply => self.eval_vector(kind, node, |a, b| a * b),
            FunctionKind::VectorDivide => self.eval_vector(kind, node, |a, b| a / b),
            FunctionKind::VectorFloorDivide => {
                self.eval_vector(kind, node, |a, b| (a / b).floor())
            }
            FunctionKind::GetDates => {
                self.eval_binding(kind, node, |t, _| Ok(Value::Vector(t.get_dates())))
            }
            FunctionKind::GetTitles => {
                self.eval_binding(kind, node, |t, _| Ok(Value::Vector(t.get_titles())))
            }
            FunctionKind::GetCellByIndex => self.eval_binding(kind, node, |t, args| {
                let title_index = parse_cell_index(&args[0])?;
                let date_index = parse_cell_index(&args[1])?;
                Ok(Value::Scalar(t.get_cell_by_index(title_index, date_index)))
            }),
            FunctionKind::GetCellByText => self.eval_binding(kind, node, |t, args| {
                Ok(Value::Scalar(t.get_cell_by_text(&args[0], &args[1])))
            }),
            FunctionKind::GetCellsByDate => self.eval_binding(kind, node, |t, args| {
                Ok(Value::Vector(t.get_cells_by_date(&args[0])))
            }),
            FunctionKind::GetCellsByTitle => self.eval_binding(kind, node, |t, args| {
                Ok(Value::Vector(t.get_cells_by_title(&args[0])))
            }),
        }
    }

    /// Flatten every child result into one argument list and enforce arity.
    fn args_of(&self, kind: FunctionKind, node: &ParseTreeNode) -> Result<Vec<Cell>, EngineError> {
        let mut args = Vec::new();
        for child in &node.children {
            args.extend(self.eval(*child)?.into_cells());
        }
        kind.check_arity(args.len())?;
        Ok(args)
    }

    fn eval_reduce(
        &self,
        kind: FunctionKind,
        node: &ParseTreeNode,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Value, EngineError> {
        let args = self.args_of(kind, node)?;
        let mut total = numeric_value(&args[0])?;
        for arg in &args[1..] {
            total = op(total, numeric_value(arg)?);
        }
        Ok(Value::Scalar(inherit(total, args.first())))
    }

    fn eval_compare(
        &self,
        kind: FunctionKind,
        node: &ParseTreeNode,
        cmp: impl Fn(f64, f64) -> bool,
    ) -> Result<Value, EngineError> {
        let args = self.args_of(kind, node)?;
        let mut holds = true;
        let mut prev = numeric_value(&args[0])?;
        for arg in &args[1..] {
            let next = numeric_value(arg)?;
            holds = holds && cmp(prev, next);
            prev = next;
        }
        Ok(Value::Scalar(inherit(
            if holds { 1.0 } else { 0.0 },
            args.first(),
        )))
    }

    fn eval_count(&self, kind: FunctionKind, node: &ParseTreeNode) -> Result<Value, EngineError> {
        let args = self.args_of(kind, node)?;
        Ok(Value::Scalar(inherit(args.len() as f64, args.first())))
    }

    /// Average of whatever cells actually arrived: when a list binding below
    /// skipped uncoercible entries, the divisor is the coerced count.
    fn eval_average(&self, kind: FunctionKind, node: &ParseTreeNode) -> Result<Value, EngineError> {
        let args = self.args_of(kind, node)?;
        let mut sum = 0.0;
        for arg in &args {
            sum += numeric_value(arg)?;
        }
        Ok(Value::Scalar(inherit(sum / args.len() as f64, args.first())))
    }

    fn eval_rounding(
        &self,
        kind: FunctionKind,
        node: &ParseTreeNode,
        round: impl Fn(f64) -> f64,
    ) -> Result<Value, EngineError> {
        let args = self.args_of(kind, node)?;
        let value = numeric_value(&args[0])?;
        Ok(Value::Scalar(inherit(round(value), args.first())))
    }

    fn eval_round(&self, kind: FunctionKind, node: &ParseTreeNode) -> Result<Value, EngineError> {
        let args = self.args_of(kind, node)?;
        let value = numeric_value(&args[0])?;
        let digits = numeric_value(&args[1])?;
        if digits.fract() != 0.0 {
            return Err(EngineError::Argument(format!(
                "Round digit count '{}' is not an integer",
                args[1].value.render()
            )));
        }
        let factor = 10f64.powi(digits as i32);
        Ok(Value::Scalar(inherit(
            (value * factor).round() / factor,
            args.first(),
        )))
    }

    /// Both branches are evaluated; the chosen one passes through with its
    /// shape (scalar or vector) intact.
    fn eval_if_else(&self, kind: FunctionKind, node: &ParseTreeNode) -> Result<Value, EngineError> {
        kind.check_arity(node.children.len())?;
        let condition = self.eval(node.children[0])?.into_first();
        let then_branch = self.eval(node.children[1])?;
        let else_branch = self.eval(node.children[2])?;
        Ok(if numeric_value(&condition)? > 0.0 {
            then_branch
        } else {
            else_branch
        })
    }

    /// Element-wise fold over whole vectors, padding shorter inputs with
    /// numeric zero on the right. Output annotations come from the first
    /// vector's cell at each position.
    fn eval_vector(
        &self,
        kind: FunctionKind,
        node: &ParseTreeNode,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Value, EngineError> {
        let mut vectors: Vec<Vec<Cell>> = Vec::with_capacity(node.children.len());
        for child in &node.children {
            vectors.push(self.eval(*child)?.into_cells());
        }
        kind.check_arity(vectors.len())?;

        let width = vectors.iter().map(Vec::len).max().unwrap_or(0);
        let mut out = Vec::with_capacity(width);
        for i in 0..width {
            let mut total = vector_operand(&vectors[0], i)?;
            for vector in &vectors[1..] {
                total = op(total, vector_operand(vector, i)?);
            }
            out.push(inherit(total, vectors[0].get(i)));
        }
        Ok(Value::Vector(out))
    }

    /// Evaluate a binding: resolve the traverser by the first argument,
    /// render the rest to strings, delegate, then re-cast the result to
    /// numeric iff the parent node is a numeric function.
    fn eval_binding(
        &self,
        kind: FunctionKind,
        node: &ParseTreeNode,
        call: impl FnOnce(&ReportTraverser, &[String]) -> Result<Value, EngineError>,
    ) -> Result<Value, EngineError> {
        let args = self.args_of(kind, node)?;
        let traverser = self.resolve_traverser(&args[0])?;
        let rest: Vec<String> = args[1..].iter().map(|c| c.value.render()).collect();
        let value = call(traverser, &rest)?;

        if !self.parent_is_numeric(node) {
            return Ok(value);
        }
        match value {
            Value::Scalar(cell) => Ok(Value::Scalar(cell_to_float(&cell)?)),
            Value::Vector(cells) => Ok(Value::Vector(cells_to_floats(&cells, true)?)),
        }
    }

    /// The traverser selected by a binding's first argument (float-cast to
    /// an integer index into the shared sequence).
    fn resolve_traverser(&self, arg: &Cell) -> Result<&ReportTraverser, EngineError> {
        let number = arg.value.as_number().ok_or_else(|| {
            EngineError::Argument(format!(
                "traverser index '{}' is not numeric",
                arg.value.render()
            ))
        })?;
        let index = number.trunc();
        if index < 0.0 || self.traversers.get(index as usize).is_none() {
            return Err(EngineError::Argument(format!(
                "traverser index {} out of range (have {})",
                index,
                self.traversers.len()
            )));
        }
        Ok(&self.traversers[index as usize])
    }

    fn parent_is_numeric(&self, node: &ParseTreeNode) -> bool {
        node.parent
            .and_then(|p| FunctionKind::lookup(&self.tree.nodes()[p].text))
            .is_some_and(FunctionKind::is_numeric)
    }
}

/// Numeric view of a cell, failing with the cell's rendered text.
fn numeric_value(cell: &Cell) -> Result<f64, EngineError> {
    cell.value
        .as_number()
        .ok_or_else(|| EngineError::NumericCoercion(cell.value.render()))
}

/// Element `i` of a vector operand; positions past the end read as zero.
fn vector_operand(vector: &[Cell], i: usize) -> Result<f64, EngineError> {
    match vector.get(i) {
        Some(cell) => numeric_value(cell),
        None => Ok(0.0),
    }
}

/// A numeric cell carrying the annotations of `source`, if any.
fn inherit(value: f64, source: Option<&Cell>) -> Cell {
    let mut cell = Cell::number(value);
    if let Some(source) = source {
        cell.title = source.title.clone();
        cell.date = source.date.clone();
    }
    cell
}

/// Parse a by-index binding argument: numeric, integer-valued, possibly
/// negative (negative indices address nothing and resolve to absent cells).
fn parse_cell_index(text: &str) -> Result<isize, EngineError> {
    let number = CellValue::parse_number(text)
        .ok_or_else(|| EngineError::Argument(format!("cell index '{text}' is not numeric")))?;
    if number.fract() != 0.0 {
        return Err(EngineError::Argument(format!(
            "cell index '{text}' is not an integer"
        )));
    }
    Ok(number as isize)
}
