pub use crate::ast::{Ast, AstNode, Block, Expr};
pub use crate::errors::{FunctionError, TemplateError};
pub use crate::functions::{Function, WithFormatting};
pub use crate::lexer::TokenizeOptions;
pub use crate::parser::parse;
pub use crate::span::{Span, Spanned};
pub use crate::templater::{ProcessorOptions, PropsResolver, TemplateProcessor, VarResolver};
pub use crate::types::{Formatting, Value};
