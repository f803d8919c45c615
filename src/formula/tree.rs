//! Parse tree construction.
//!
//! The grammar is small enough that no lexer is needed: a single scan over
//! the input with a pending-token cursor builds the whole tree. `(` opens a
//! function node and descends, `,` flushes the pending token as a constant
//! argument, `)` flushes and ascends. Function names and argument counts are
//! *not* validated here; those are evaluation-time concerns.

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Constant,
    Function,
}

/// One node of the tree. Children are ordered; the parent back-reference is
/// an arena index (the tree owns all nodes, so no cycles of ownership).
#[derive(Debug, Clone)]
pub struct ParseTreeNode {
    pub text: String,
    pub kind: NodeKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// An immutable parse tree over one formula string.
///
/// Built once, then read-only: evaluation walks the arena without mutating
/// it, so a tree can be evaluated repeatedly (and concurrently) against
/// different traverser sequences.
#[derive(Debug, Clone)]
pub struct ParseTree {
    nodes: Vec<ParseTreeNode>,
    root: usize,
}

impl ParseTree {
    /// Build a tree from formula text.
    pub fn parse(input: &str) -> Result<ParseTree, EngineError> {
        let mut nodes: Vec<ParseTreeNode> = Vec::new();
        let mut root: Option<usize> = None;
        let mut curr: Option<usize> = None;
        let mut stutter = 0usize;

        for (index, c) in input.char_indices() {
            match c {
                '(' => {
                    let id = nodes.len();
                    nodes.push(ParseTreeNode {
                        text: input[stutter..index].trim().to_string(),
                        kind: NodeKind::Function,
                        parent: curr,
                        children: Vec::new(),
                    });
                    match curr {
                        Some(parent) => nodes[parent].children.push(id),
                        None if root.is_none() => root = Some(id),
                        None => {
                            return Err(EngineError::Parse(format!(
                                "unexpected second expression at byte {index}"
                            )));
                        }
                    }
                    curr = Some(id);
                    stutter = index + 1;
                }
                ',' => {
                    flush_constant(&mut nodes, curr, &input[stutter..index])?;
                    stutter = index + 1;
                }
                ')' => {
                    flush_constant(&mut nodes, curr, &input[stutter..index])?;
                    let Some(open) = curr else {
                        return Err(EngineError::Parse(format!(
                            "unbalanced ')' at byte {index}"
                        )));
                    };
                    curr = nodes[open].parent;
                    stutter = index + 1;
                }
                _ => {}
            }
        }

        if curr.is_some() {
            return Err(EngineError::Parse("unclosed '('".to_string()));
        }

        // A formula with no delimiters at all is a bare literal root.
        let root = match root {
            Some(root) => root,
            None => {
                let text = input.trim();
                if text.is_empty() {
                    return Err(EngineError::Parse("empty formula".to_string()));
                }
                nodes.push(ParseTreeNode {
                    text: text.to_string(),
                    kind: NodeKind::Constant,
                    parent: None,
                    children: Vec::new(),
                });
                nodes.len() - 1
            }
        };

        Ok(ParseTree { nodes, root })
    }

    pub fn nodes(&self) -> &[ParseTreeNode] {
        &self.nodes
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Render the tree back to canonical formula text. Two trees are
    /// structurally equivalent iff their unparsed forms are equal.
    pub fn unparse(&self) -> String {
        self.unparse_node(self.root)
    }

    fn unparse_node(&self, id: usize) -> String {
        let node = &self.nodes[id];
        match node.kind {
            NodeKind::Constant => node.text.clone(),
            NodeKind::Function => {
                let args: Vec<String> = node
                    .children
                    .iter()
                    .map(|child| self.unparse_node(*child))
                    .collect();
                format!("{}({})", node.text, args.join(","))
            }
        }
    }
}

/// Append the pending span as a constant child of `curr`, if it is non-empty.
fn flush_constant(
    nodes: &mut Vec<ParseTreeNode>,
    curr: Option<usize>,
    span: &str,
) -> Result<(), EngineError> {
    let text = span.trim();
    if text.is_empty() {
        return Ok(());
    }
    let Some(parent) = curr else {
        return Err(EngineError::Parse(format!(
            "argument '{text}' outside any function call"
        )));
    };
    // Arg before a delimiter must have been a constant.
    let id = nodes.len();
    nodes.push(ParseTreeNode {
        text: text.to_string(),
        kind: NodeKind::Constant,
        parent: Some(parent),
        children: Vec::new(),
    });
    nodes[parent].children.push(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParseTree {
        ParseTree::parse(input).unwrap()
    }

    #[test]
    fn builds_function_and_constant_nodes() {
        let tree = parse("Add(2,1)");
        let root = &tree.nodes()[tree.root()];
        assert_eq!(root.text, "Add");
        assert_eq!(root.kind, NodeKind::Function);
        assert_eq!(root.children.len(), 2);

        let args: Vec<&ParseTreeNode> = root.children.iter().map(|c| &tree.nodes()[*c]).collect();
        assert_eq!(args[0].text, "2");
        assert_eq!(args[0].kind, NodeKind::Constant);
        assert_eq!(args[1].text, "1");
        assert_eq!(args[0].parent, Some(tree.root()));
    }

    #[test]
    fn nesting_descends_and_ascends() {
        let tree = parse("Subtract( Multiply(   2.5, 3.5), Add(3,     1))");
        assert_eq!(tree.unparse(), "Subtract(Multiply(2.5,3.5),Add(3,1))");
    }

    #[test]
    fn whitespace_inside_tokens_is_trimmed() {
        let tree = parse("Subtract( Add(2, 3), Add (3,4))");
        assert_eq!(tree.unparse(), "Subtract(Add(2,3),Add(3,4))");
    }

    #[test]
    fn multi_word_literals_survive() {
        let tree = parse("get_cells_by_date(0, SEP 17)");
        assert_eq!(tree.unparse(), "get_cells_by_date(0,SEP 17)");
    }

    #[test]
    fn zero_arg_calls_have_function_kind() {
        let tree = parse("IDONTEXIST()");
        let root = &tree.nodes()[tree.root()];
        assert_eq!(root.kind, NodeKind::Function);
        assert!(root.children.is_empty());
    }

    #[test]
    fn bare_literal_is_a_constant_root() {
        let tree = parse("  5 ");
        let root = &tree.nodes()[tree.root()];
        assert_eq!(root.kind, NodeKind::Constant);
        assert_eq!(root.text, "5");
    }

    #[test]
    fn parse_then_unparse_is_structurally_stable() {
        for formula in [
            "Add(2,1)",
            "IfElse(GreaterThan(2,1), 1, -1)",
            "Ceiling(Average(get_cells_by_date(0, SEP 17)))",
            "VectorAdd(get_dates(0), get_dates(1))",
        ] {
            let once = parse(formula).unparse();
            let twice = parse(&once).unparse();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        for bad in ["", "   ", "Add(1,2", "Add(1))", "1,2", ")("] {
            let err = ParseTree::parse(bad).unwrap_err();
            assert!(matches!(err, EngineError::Parse(_)), "{bad}");
        }
    }
}
