//! The function registry.
//!
//! Every evaluatable function is a [`FunctionKind`]; name lookup happens once
//! per node during evaluation and everything downstream dispatches on the
//! enum. The registry also records each function's contracts: arity, whether
//! its arguments are vectors, whether it reads from a traverser, and whether
//! it consumes numbers (which controls how binding results are re-cast).

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    GreaterThan,
    GreaterEqualThan,
    LessThan,
    LessEqualThan,
    Count,
    Average,
    Floor,
    Ceiling,
    Round,
    IfElse,
    VectorAdd,
    VectorSubtract,
    VectorMultiply,
    VectorDivide,
    VectorFloorDivide,
    GetDates,
    GetTitles,
    GetCellByIndex,
    GetCellByText,
    GetCellsByDate,
    GetCellsByTitle,
}

impl FunctionKind {
    /// Look a function up by its formula-language name.
    pub fn lookup(name: &str) -> Option<FunctionKind> {
        Some(match name {
            "Add" => FunctionKind::Add,
            "Subtract" => FunctionKind::Subtract,
            "Multiply" => FunctionKind::Multiply,
            "Divide" => FunctionKind::Divide,
            "FloorDivide" => FunctionKind::FloorDivide,
            "GreaterThan" => FunctionKind::GreaterThan,
            "GreaterEqualThan" => FunctionKind::GreaterEqualThan,
            "LessThan" => FunctionKind::LessThan,
            "LessEqualThan" => FunctionKind::LessEqualThan,
            "Count" => FunctionKind::Count,
            "Average" => FunctionKind::Average,
            "Floor" => FunctionKind::Floor,
            "Ceiling" => FunctionKind::Ceiling,
            "Round" => FunctionKind::Round,
            "IfElse" => FunctionKind::IfElse,
            "VectorAdd" => FunctionKind::VectorAdd,
            "VectorSubtract" => FunctionKind::VectorSubtract,
            "VectorMultiply" => FunctionKind::VectorMultiply,
            "VectorDivide" => FunctionKind::VectorDivide,
            "VectorFloorDivide" => FunctionKind::VectorFloorDivide,
            "get_dates" => FunctionKind::GetDates,
            "get_titles" => FunctionKind::GetTitles,
            "get_cell_by_index" => FunctionKind::GetCellByIndex,
            "get_cell_by_text" => FunctionKind::GetCellByText,
            "get_cells_by_date" => FunctionKind::GetCellsByDate,
            "get_cells_by_title" => FunctionKind::GetCellsByTitle,
            _ => return None,
        })
    }

    /// Formula-language name (inverse of [`Self::lookup`]).
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Add => "Add",
            FunctionKind::Subtract => "Subtract",
            FunctionKind::Multiply => "Multiply",
            FunctionKind::Divide => "Divide",
            FunctionKind::FloorDivide => "FloorDivide",
            FunctionKind::GreaterThan => "GreaterThan",
            FunctionKind::GreaterEqualThan => "GreaterEqualThan",
            FunctionKind::LessThan => "LessThan",
            FunctionKind::LessEqualThan => "LessEqualThan",
            FunctionKind::Count => "Count",
            FunctionKind::Average => "Average",
            FunctionKind::Floor => "Floor",
            FunctionKind::Ceiling => "Ceiling",
            FunctionKind::Round => "Round",
            FunctionKind::IfElse => "IfElse",
            FunctionKind::VectorAdd => "VectorAdd",
            FunctionKind::VectorSubtract => "VectorSubtract",
            FunctionKind::VectorMultiply => "VectorMultiply",
            FunctionKind::VectorDivide => "VectorDivide",
            FunctionKind::VectorFloorDivide => "VectorFloorDivide",
            FunctionKind::GetDates => "get_dates",
            FunctionKind::GetTitles => "get_titles",
            FunctionKind::GetCellByIndex => "get_cell_by_index",
            FunctionKind::GetCellByText => "get_cell_by_text",
            FunctionKind::GetCellsByDate => "get_cells_by_date",
            FunctionKind::GetCellsByTitle => "get_cells_by_title",
        }
    }

    /// Exact argument count, for functions with a fixed contract.
    fn exact_arity(self) -> Option<usize> {
        match self {
            FunctionKind::Floor | FunctionKind::Ceiling => Some(1),
            FunctionKind::Round => Some(2),
            FunctionKind::IfElse => Some(3),
            // Binding arities include the leading traverser index.
            FunctionKind::GetDates | FunctionKind::GetTitles => Some(1),
            FunctionKind::GetCellByIndex | FunctionKind::GetCellByText => Some(3),
            FunctionKind::GetCellsByDate | FunctionKind::GetCellsByTitle => Some(2),
            _ => None,
        }
    }

    /// Minimum argument count, for varargs functions.
    fn min_arity(self) -> usize {
        match self {
            FunctionKind::Count => 0,
            FunctionKind::Add
            | FunctionKind::Subtract
            | FunctionKind::Multiply
            | FunctionKind::Divide
            | FunctionKind::FloorDivide
            | FunctionKind::Average => 1,
            _ => 2,
        }
    }

    /// Enforce this function's arity contract against `found` arguments.
    pub fn check_arity(self, found: usize) -> Result<(), EngineError> {
        match self.exact_arity() {
            Some(expected) if found != expected => Err(EngineError::Arity {
                name: self.name().to_string(),
                expected: expected.to_string(),
                found,
            }),
            Some(_) => Ok(()),
            None if found < self.min_arity() => Err(EngineError::Arity {
                name: self.name().to_string(),
                expected: format!("at least {}", self.min_arity()),
                found,
            }),
            None => Ok(()),
        }
    }

    /// Whether arguments are consumed as whole vectors instead of being
    /// flattened.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            FunctionKind::VectorAdd
                | FunctionKind::VectorSubtract
                | FunctionKind::VectorMultiply
                | FunctionKind::VectorDivide
                | FunctionKind::VectorFloorDivide
        )
    }

    /// Whether this function reads from a report traverser.
    pub fn is_binding(self) -> bool {
        matches!(
            self,
            FunctionKind::GetDates
                | FunctionKind::GetTitles
                | FunctionKind::GetCellByIndex
                | FunctionKind::GetCellByText
                | FunctionKind::GetCellsByDate
                | FunctionKind::GetCellsByTitle
        )
    }

    /// Whether this binding returns a sequence (as opposed to one cell).
    pub fn is_list_binding(self) -> bool {
        matches!(
            self,
            FunctionKind::GetDates
                | FunctionKind::GetTitles
                | FunctionKind::GetCellsByDate
                | FunctionKind::GetCellsByTitle
        )
    }

    /// Whether this function consumes numbers. Binding results are re-cast
    /// to numeric exactly when their parent node is one of these. `Count` is
    /// deliberately absent: counting a label sequence must not drop the
    /// labels that fail numeric coercion.
    pub fn is_numeric(self) -> bool {
        match self {
            FunctionKind::Add
            | FunctionKind::Subtract
            | FunctionKind::Multiply
            | FunctionKind::Divide
            | FunctionKind::FloorDivide
            | FunctionKind::GreaterThan
            | FunctionKind::GreaterEqualThan
            | FunctionKind::LessThan
            | FunctionKind::LessEqualThan
            | FunctionKind::Average
            | FunctionKind::Floor
            | FunctionKind::Ceiling
            | FunctionKind::Round => true,
            FunctionKind::VectorAdd
            | FunctionKind::VectorSubtract
            | FunctionKind::VectorMultiply
            | FunctionKind::VectorDivide
            | FunctionKind::VectorFloorDivide => true,
            FunctionKind::Count
            | FunctionKind::IfElse
            | FunctionKind::GetDates
            | FunctionKind::GetTitles
            | FunctionKind::GetCellByIndex
            | FunctionKind::GetCellByText
            | FunctionKind::GetCellsByDate
            | FunctionKind::GetCellsByTitle => false,
        }
    }
}
