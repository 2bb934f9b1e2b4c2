pub mod prelude;

pub use ast;
pub use diagnostics;
pub use errors;
pub use errors::TemplateError;
pub use functions;
pub use functions::{
    Function, WithFormatting, bind_args, default_function, default_function_names,
};
pub use helpers::{
    PropercaseOptions, propercase, propercase_with, roman_to_number, strict_parse_float,
    strict_parse_int,
};
pub use lexer;
pub use lexer::{TokenizeOptions, replace_escape_sequences, tokenize};
pub use parser;
pub use parser::{is_valid_template, parse};
pub use span;
pub use span::{Span, Spanned};
pub use templater;
pub use templater::*;
pub use token::{Token, TokenKind};
pub use types;
pub use types::{Formatting, Value};

/// Expand `template` against the properties of a JSON object
pub async fn render(
    template: &str,
    vars: serde_json::Value,
) -> Result<String, Spanned<TemplateError>> {
    TemplateProcessor::with_resolver(PropsResolver::from(vars), ProcessorOptions::default())
        .process(template)
        .await
}
