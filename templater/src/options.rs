use lexer::TokenizeOptions;
use serde::{Deserialize, Serialize};
use types::{DEFAULT_DATE_FORMAT, DEFAULT_LIST_SEPARATOR, Formatting};

/// Settings of a [crate::TemplateProcessor]
///
/// Deserializes from partial documents, missing keys take their default:
///
/// ```toml
/// open_block_marker = "<%"
/// close_block_marker = "%>"
/// strict_var_resolve = true
/// list_separator = " / "
/// date_format = "YYYY-MM-DD"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
    #[serde(flatten)]
    pub tokenize: TokenizeOptions,
    /// Fail on block heads that resolve to nothing instead of printing ""
    pub strict_var_resolve: bool,
    /// Separator used when a list is printed
    pub list_separator: String,
    /// Moment style pattern used when a date is printed
    pub date_format: String,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            tokenize: TokenizeOptions::default(),
            strict_var_resolve: false,
            list_separator: DEFAULT_LIST_SEPARATOR.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ProcessorOptions {
    /// How printed values and function arguments are stringified
    pub fn formatting(&self) -> Formatting<'_> {
        Formatting {
            list_separator: &self.list_separator,
            date_format: &self.date_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_empty() {
        let options: ProcessorOptions = toml::from_str("").unwrap();

        assert_eq!(ProcessorOptions::default(), options);
    }

    #[test]
    fn deserialize_partial() {
        let options: ProcessorOptions = toml::from_str(concat!(
            "open_block_marker = \"<%\"\n",
            "close_block_marker = \"%>\"\n",
            "strict_var_resolve = true\n",
        ))
        .unwrap();

        assert_eq!(
            ProcessorOptions {
                tokenize: TokenizeOptions::new("<%", "%>"),
                strict_var_resolve: true,
                ..Default::default()
            },
            options
        );
    }
}
