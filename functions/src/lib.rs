use async_trait::async_trait;
use errors::FunctionError;
use types::{Formatting, Value};

pub use binding::bind_args;
pub use defaults::{default_function, default_function_names};
pub use number::format_number;

mod binding;
mod defaults;
mod number;

/// A function callable from a template
///
/// `input` is the value flowing through the filter chain (`Null` when the
/// function heads a block or is used as an argument), `args` are the
/// evaluated explicit arguments. `formatting` holds the processor's list
/// separator and date pattern, for functions that stringify their values.
#[async_trait]
pub trait Function: Send + Sync {
    async fn call(
        &self,
        input: Value,
        args: Vec<Value>,
        formatting: Formatting<'_>,
    ) -> Result<Value, FunctionError>;
}

#[async_trait]
impl<F> Function for F
where
    F: Fn(Value, Vec<Value>) -> Result<Value, FunctionError> + Send + Sync,
{
    async fn call(
        &self,
        input: Value,
        args: Vec<Value>,
        _formatting: Formatting<'_>,
    ) -> Result<Value, FunctionError> {
        self(input, args)
    }
}

/// Function that stringifies values the way the calling processor does
pub struct WithFormatting<F>(pub F);

#[async_trait]
impl<F> Function for WithFormatting<F>
where
    F: Fn(Value, Vec<Value>, Formatting<'_>) -> Result<Value, FunctionError> + Send + Sync,
{
    async fn call(
        &self,
        input: Value,
        args: Vec<Value>,
        formatting: Formatting<'_>,
    ) -> Result<Value, FunctionError> {
        (self.0)(input, args, formatting)
    }
}

/// A letter or `_` followed by letters, digits or `_`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}
