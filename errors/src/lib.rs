use serde::{Deserialize, Serialize};
use span::{Span, Spanned};
use thiserror::Error;

/// Common error for tokenizing, parsing and evaluating templates
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum TemplateError {
    #[error("LexicalError: {0}")]
    LexicalError(LexicalError),
    #[error("SyntaxError: {0}")]
    SyntaxError(SyntaxError),
    #[error("ResolutionError: {0}")]
    ResolutionError(ResolutionError),
}

/// Malformed character sequence inside a block
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum LexicalError {
    #[error("Unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("Unexpected end of input, quoted string is unclosed")]
    UnterminatedString,
    #[error("Unsupported escape sequence: \\{0}")]
    UnsupportedEscape(char),
    #[error("Unexpected end of input: escape sequence interrupted")]
    InterruptedEscape,
    #[error("Identifier cannot start with a number: {0}")]
    AmbiguousNumber(String),
    #[error("Sign without digits: {0}")]
    LoneSign(char),
}

/// Structurally invalid token sequence
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum SyntaxError {
    #[error("Unexpected end of input: {expected} expected")]
    UnexpectedEnd { expected: String },
    #[error("{expected} expected, but got this: {found}")]
    UnexpectedToken { found: String, expected: String },
    #[error("Unexpected end of block: a block needs a variable, function or literal")]
    EmptyBlock,
}

/// Failure while evaluating a block
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum ResolutionError {
    #[error("Function {0} not found")]
    UnknownFunction(String),
    #[error("Cannot resolve variable named \"{0}\" (strict mode set)")]
    UnresolvedVariable(String),
    #[error("Error while calling function {name}: {source}")]
    FunctionFailed { name: String, source: FunctionError },
    #[error("Error while resolving variable {name}: {message}")]
    VariableResolverFailed { name: String, message: String },
}

/// Failure reported by a function called from a template
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum FunctionError {
    #[error("Invalid number of arguments: {expected} expected{}", input_note(.with_input))]
    ArgumentCount { expected: usize, with_input: bool },
    #[error("{} argument is invalid: should be {expected}", ordinal(.position))]
    InvalidArgument { position: usize, expected: String },
    #[error("{0}")]
    Failed(String),
}

impl FunctionError {
    pub fn invalid_argument(position: usize, expected: impl Into<String>) -> Self {
        FunctionError::InvalidArgument {
            position,
            expected: expected.into(),
        }
    }
}

fn input_note(with_input: &bool) -> &'static str {
    if *with_input {
        " (and first one is filter's input value)"
    } else {
        ""
    }
}

fn ordinal(position: &usize) -> &'static str {
    match position {
        0 => "First",
        1 => "Second",
        2 => "Third",
        _ => "An",
    }
}

/// Failure when registering a function on a processor
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum RegistrationError {
    #[error("Cannot add a new function named {0}: this is an invalid name for a function")]
    InvalidFunctionName(String),
    #[error("Cannot add a new function named {0}: function already registered")]
    FunctionAlreadyRegistered(String),
}

macro_rules! impl_from_error {
    ($($error:tt),+) => {$(
        impl From<$error> for TemplateError {
            fn from(e: $error) -> Self {
                TemplateError::$error(e)
            }
        }
    )+};
}

impl_from_error!(LexicalError, SyntaxError, ResolutionError);

/// Attach a span to any error convertible to [TemplateError]
pub fn spanned(err: impl Into<TemplateError>, span: Span) -> Spanned<TemplateError> {
    (err.into(), span)
}
