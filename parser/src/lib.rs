pub use builder::AstBuilder;

mod builder;

use ast::Ast;
use errors::TemplateError;
use lexer::{TokenizeOptions, tokenize};
use span::Spanned;

/// Tokenize and build the [Ast] of a template
pub fn parse(input: &str, options: &TokenizeOptions) -> Result<Ast, Spanned<TemplateError>> {
    let tokens = tokenize(input, options)?;
    AstBuilder::new(tokens).build()
}

/// A template is valid if it parses in to at least one node
pub fn is_valid_template(input: &str, options: &TokenizeOptions) -> bool {
    parse(input, options).is_ok_and(|ast| !ast.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_templates() {
        let options = TokenizeOptions::default();

        assert!(is_valid_template("plain", &options));
        assert!(is_valid_template("{a|b(c, 'd')}", &options));
        assert!(!is_valid_template("", &options));
        assert!(!is_valid_template("{a", &options));
        assert!(!is_valid_template("{1x}", &options));
    }

    #[test]
    fn custom_markers_are_used() {
        let options = TokenizeOptions::new("<%", "%>");

        let ast = parse("{literal} <% name %>", &options).unwrap();

        assert_eq!(2, ast.len());
        assert_eq!(1, ast.blocks().count());
    }
}
