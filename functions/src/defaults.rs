use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, Utc};
use errors::FunctionError;
use helpers::{propercase as to_propercase, strict_parse_float, strict_parse_int};
use once_cell::sync::Lazy;
use types::{Formatting, Value, date};

use crate::{Function, WithFormatting, bind_args, format_number};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
    tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
    exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor \
    in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur \
    sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est \
    laborum";

type FunctionTable = HashMap<&'static str, Arc<dyn Function>>;

static DEFAULT_FUNCTIONS: Lazy<FunctionTable> = Lazy::new(|| {
    let mut table: FunctionTable = HashMap::new();

    table.insert("lowercase", Arc::new(WithFormatting(lowercase)));
    table.insert("uppercase", Arc::new(WithFormatting(uppercase)));
    table.insert("trim", Arc::new(WithFormatting(trim)));
    table.insert("def", Arc::new(def));
    table.insert("propercase", Arc::new(WithFormatting(propercase)));
    table.insert("add", Arc::new(add));
    table.insert("sub", Arc::new(sub));
    table.insert("wrap", Arc::new(wrap));
    table.insert("_lorem", Arc::new(lorem));
    table.insert("list", Arc::new(list));
    table.insert("join", Arc::new(WithFormatting(join)));
    table.insert("now", Arc::new(now));
    table.insert("utc", Arc::new(utc));
    table.insert("format_date", Arc::new(format_date));
    table.insert("format_num", Arc::new(format_num));

    table
});

/// Look up a function of the default table, case insensitive
pub fn default_function(name: &str) -> Option<Arc<dyn Function>> {
    DEFAULT_FUNCTIONS.get(name.to_lowercase().as_str()).cloned()
}

/// Names of the default table, sorted
pub fn default_function_names() -> Vec<&'static str> {
    let mut names: Vec<_> = DEFAULT_FUNCTIONS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Stringified input, or first argument when there is no input
///
/// Nothing at all stringifies to "".
fn text(input: Value, args: Vec<Value>, formatting: Formatting<'_>) -> String {
    if input.is_null() {
        formatting.format(&args.into_iter().next().unwrap_or_default())
    } else {
        formatting.format(&input)
    }
}

fn lowercase(
    input: Value,
    args: Vec<Value>,
    formatting: Formatting<'_>,
) -> Result<Value, FunctionError> {
    Ok(text(input, args, formatting).to_lowercase().into())
}

fn uppercase(
    input: Value,
    args: Vec<Value>,
    formatting: Formatting<'_>,
) -> Result<Value, FunctionError> {
    Ok(text(input, args, formatting).to_uppercase().into())
}

fn trim(
    input: Value,
    args: Vec<Value>,
    formatting: Formatting<'_>,
) -> Result<Value, FunctionError> {
    Ok(text(input, args, formatting).trim().into())
}

fn propercase(
    input: Value,
    args: Vec<Value>,
    formatting: Formatting<'_>,
) -> Result<Value, FunctionError> {
    Ok(to_propercase(&text(input, args, formatting)).into())
}

/// `{value|def("fallback")}`, `{def(value, "fallback")}` or `{def("fallback")}`
fn def(input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let with_input = !input.is_null();
    let mut args = args.into_iter();

    let (value, default) = match (with_input, args.next(), args.next()) {
        (true, Some(default), _) => (input, default),
        (false, Some(default), None) => (Value::Null, default),
        (false, Some(value), Some(default)) => (value, default),
        (_, None, _) => {
            return Err(FunctionError::ArgumentCount {
                expected: 2,
                with_input,
            });
        }
    };

    if !value.is_empty() {
        Ok(value)
    } else if !default.is_empty() {
        Ok(default)
    } else {
        Err(FunctionError::invalid_argument(1, "a non-empty default value"))
    }
}

fn integers(input: Value, args: Vec<Value>) -> Result<(i64, i64), FunctionError> {
    let [a, b] = bind_args::<2>(input, args)?;

    let a = strict_parse_int(&a.to_string())
        .ok_or_else(|| FunctionError::invalid_argument(0, "a number"))?;
    let b = strict_parse_int(&b.to_string())
        .ok_or_else(|| FunctionError::invalid_argument(1, "a number"))?;

    Ok((a, b))
}

fn add(input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let (a, b) = integers(input, args)?;

    a.checked_add(b)
        .map(Value::Integer)
        .ok_or_else(|| FunctionError::Failed("Integer overflow".to_string()))
}

fn sub(input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let (a, b) = integers(input, args)?;

    a.checked_sub(b)
        .map(Value::Integer)
        .ok_or_else(|| FunctionError::Failed("Integer overflow".to_string()))
}

fn wrap(input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let [text, format] = bind_args::<2>(input, args)?;
    let format = format.to_string();

    if !format.contains('@') {
        return Err(FunctionError::Failed(
            "You must provide a format string where @ denotes the position of text to wrap"
                .to_string(),
        ));
    }

    Ok(format.replacen('@', &text.to_string(), 1).into())
}

/// First N words of the lorem ipsum corpus, filter input is ignored
fn lorem(_input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let count = args
        .into_iter()
        .next()
        .filter(|count| !count.is_null())
        .ok_or(FunctionError::ArgumentCount {
            expected: 1,
            with_input: false,
        })?;

    let count = strict_parse_int(&count.to_string())
        .ok_or_else(|| FunctionError::invalid_argument(0, "a number"))?;
    let count = usize::try_from(count).unwrap_or(0);

    Ok(LOREM
        .split(' ')
        .take(count)
        .collect::<Vec<_>>()
        .join(" ")
        .into())
}

fn list(_input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    Ok(Value::List(args))
}

/// Items are stringified with the processor's date pattern
fn join(
    input: Value,
    args: Vec<Value>,
    formatting: Formatting<'_>,
) -> Result<Value, FunctionError> {
    let [items, separator] = bind_args::<2>(input, args)?;

    if items.as_list().is_none() {
        return Err(FunctionError::invalid_argument(0, "a list"));
    }

    let separator = formatting.format(&separator);

    Ok(items.format(&separator, formatting.date_format).into())
}

fn now(_input: Value, _args: Vec<Value>) -> Result<Value, FunctionError> {
    Ok(Local::now().fixed_offset().into())
}

fn utc(input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let [value] = bind_args::<1>(input, args)?;

    value
        .as_date()
        .map(|date| Value::Date(date.with_timezone(&Utc).fixed_offset()))
        .ok_or_else(|| FunctionError::invalid_argument(0, "a date"))
}

fn format_date(input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let [value, pattern] = bind_args::<2>(input, args)?;

    value
        .as_date()
        .map(|d| Value::String(date::format(d, &pattern.to_string())))
        .ok_or_else(|| FunctionError::invalid_argument(0, "a date"))
}

fn format_num(input: Value, args: Vec<Value>) -> Result<Value, FunctionError> {
    let [value, pattern] = bind_args::<2>(input, args)?;

    let number = strict_parse_float(&value.to_string()).ok_or_else(|| {
        FunctionError::invalid_argument(0, "a number or a floating-point number")
    })?;

    Ok(format_number(number, &pattern.to_string()).into())
}
