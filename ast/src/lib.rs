use std::fmt;

use serde::{Deserialize, Serialize};
use span::Spanned;

/// Abstract syntax tree for a template
///
/// Top level nodes in source order. Together they cover the whole template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ast(Vec<Spanned<AstNode>>);

impl Ast {
    /// Create an [AST](Ast) from a collection of [nodes](AstNode)
    pub fn new(nodes: Vec<Spanned<AstNode>>) -> Self {
        Self(nodes)
    }

    /// Iterate over the [nodes](AstNode)
    pub fn iter(&self) -> impl Iterator<Item = &Spanned<AstNode>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get all [blocks](Block)
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.iter().filter_map(|(node, _)| match node {
            AstNode::Block(block) => Some(block),
            AstNode::RawText(_) => None,
        })
    }
}

impl IntoIterator for Ast {
    type Item = Spanned<AstNode>;
    type IntoIter = std::vec::IntoIter<Spanned<AstNode>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstNode {
    /// Text copied to the output as is
    RawText(String),
    /// A delimited expression evaluated to text
    Block(Block),
}

/// A filter chain: the head expression followed by the filters applied to it,
/// left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Written `?head|...`: an empty head suppresses the whole chain
    pub optional: bool,
    pub head: Expr,
    pub filters: Vec<Expr>,
}

impl Block {
    pub fn new(optional: bool, head: Expr, filters: Vec<Expr>) -> Self {
        Self {
            optional,
            head,
            filters,
        }
    }

    /// Head and filters in evaluation order
    pub fn chain(&self) -> impl Iterator<Item = &Expr> {
        std::iter::once(&self.head).chain(self.filters.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A bare identifier: a variable, or a function called without arguments
    /// when no variable has that name
    FunctionOrVariable(String),
    /// An identifier followed by an argument list, possibly empty
    Function { name: String, args: Vec<Expr> },
    String(String),
    /// Number literal, kept as written
    Number(String),
}

impl Expr {
    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    /// Name of the variable or function, `None` for literals
    pub fn name(&self) -> Option<&str> {
        match self {
            Expr::FunctionOrVariable(name) | Expr::Function { name, .. } => Some(name),
            Expr::String(_) | Expr::Number(_) => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::FunctionOrVariable(name) => f.write_str(name),
            Expr::Function { name, args } => {
                write!(f, "{name}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::String(value) => write!(f, "{}", quote(value)),
            Expr::Number(value) => f.write_str(value),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            f.write_str("?")?;
        }
        for (index, expr) in self.chain().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_display_round_trips_syntax() {
        let block = Block::new(
            true,
            Expr::FunctionOrVariable("var".to_string()),
            vec![
                Expr::FunctionOrVariable("lowercase".to_string()),
                Expr::function(
                    "wrap",
                    vec![Expr::String("[\"@\"]\n".to_string()), Expr::Number("-2".to_string())],
                ),
                Expr::function("now", vec![]),
            ],
        );

        assert_eq!(r#"?var|lowercase|wrap("[\"@\"]\n", -2)|now()"#, block.to_string());
    }

    #[test]
    fn chain_starts_with_head() {
        let block = Block::new(
            false,
            Expr::Number("1".to_string()),
            vec![Expr::FunctionOrVariable("f".to_string())],
        );

        let names: Vec<Option<&str>> = block.chain().map(Expr::name).collect();

        assert_eq!(vec![None, Some("f")], names);
    }

    #[test]
    fn blocks_skips_raw_text() {
        let ast = Ast::new(vec![
            (AstNode::RawText("a ".to_string()), 0..2),
            (
                AstNode::Block(Block::new(
                    false,
                    Expr::FunctionOrVariable("b".to_string()),
                    vec![],
                )),
                2..5,
            ),
        ]);

        assert_eq!(2, ast.len());
        assert_eq!(1, ast.blocks().count());
    }

    #[test]
    fn serializes_as_tagged_nodes() {
        let ast = Ast::new(vec![(AstNode::RawText("hi".to_string()), 0..2)]);

        assert_eq!(
            r#"[[{"RawText":"hi"},{"start":0,"end":2}]]"#,
            serde_json::to_string(&ast).unwrap()
        );
    }
}
