use serde::{Deserialize, Serialize};
use span::Span;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Literal text outside of a block
    RawText,
    BlockOpen,
    BlockClose,
    /// `(`
    BracketOpen,
    /// `)`
    BracketClose,
    /// `|`
    Filter,
    /// `,`
    Comma,
    Ident,
    /// `?`
    Question,
    /// `>`, reserved: no rule of the grammar accepts it
    Gt,
    /// Quoted string, the value has escape sequences already translated
    String,
    /// Integer literal kept as written, sign included
    Number,
}

/// A token and the byte range it was scanned from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Byte offset of the first source character of the token
    pub fn begin(&self) -> usize {
        self.span.start
    }

    /// The exact source text the token was scanned from
    pub fn source<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
