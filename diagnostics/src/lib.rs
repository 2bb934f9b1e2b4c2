use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{self, SimpleFile};
use codespan_reporting::term::{self, termcolor::Buffer};
use errors::{LexicalError, ResolutionError, SyntaxError, TemplateError};
use serde::{Deserialize, Serialize};
use span::{Span, Spanned};
use str_idxpos::index_to_position;

/// Get a list of diagnostics from a list of errors
pub fn get_diagnostics(errs: &[Spanned<TemplateError>], source: &str) -> Vec<Diagnosis> {
    errs.iter()
        .map(|(err, span)| Diagnosis {
            range: get_range(source, span),
            severity: Some(DiagnosisSeverity::ERROR),
            message: err.to_string(),
        })
        .collect()
}

/// Render an error as a plain text report pointing in to `source`
pub fn render(err: &Spanned<TemplateError>, name: &str, source: &str) -> Result<String, files::Error> {
    let (err, span) = err;
    let file = SimpleFile::new(name, source);
    let mut buffer = Buffer::no_color();

    term::emit(
        &mut buffer,
        &term::Config::default(),
        &file,
        &err.as_diagnostic(span),
    )?;

    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

fn get_range(source: &str, span: &Span) -> DiagnosisRange {
    DiagnosisRange {
        start: get_position(source, span.start),
        end: get_position(source, span.end),
    }
}

fn get_position(source: &str, idx: usize) -> DiagnosisPosition {
    let position = index_to_position(source, idx);

    DiagnosisPosition {
        line: position.line as u32,
        character: position.column as u32,
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub range: DiagnosisRange,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<DiagnosisSeverity>,

    pub message: String,
}

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DiagnosisSeverity(i32);
impl DiagnosisSeverity {
    pub const ERROR: DiagnosisSeverity = DiagnosisSeverity(1);
    pub const WARNING: DiagnosisSeverity = DiagnosisSeverity(2);
}

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Default, Deserialize, Serialize)]
pub struct DiagnosisPosition {
    pub line: u32,
    pub character: u32,
}

impl DiagnosisPosition {
    pub fn new(line: u32, character: u32) -> DiagnosisPosition {
        DiagnosisPosition { line, character }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Deserialize, Serialize)]
pub struct DiagnosisRange {
    /// The range's start position (inclusive)
    pub start: DiagnosisPosition,
    /// The range's end position (exclusive)
    pub end: DiagnosisPosition,
}

impl DiagnosisRange {
    pub fn new(start: DiagnosisPosition, end: DiagnosisPosition) -> DiagnosisRange {
        DiagnosisRange { start, end }
    }
}

trait AsDiagnostic {
    fn as_diagnostic(&self, span: &Span) -> Diagnostic<()>;
}

macro_rules! impl_as_diagnostic {
    ($($error:tt),+) => {$(
        impl AsDiagnostic for $error {
            fn as_diagnostic(&self, span: &Span) -> Diagnostic<()> {
                Diagnostic::error()
                    .with_code(stringify!($error))
                    .with_message(self.to_string())
                    .with_labels(vec![Label::primary((), span.clone())])
            }
        }
    )+};
}

impl_as_diagnostic!(LexicalError, SyntaxError, ResolutionError);

impl AsDiagnostic for TemplateError {
    fn as_diagnostic(&self, span: &Span) -> Diagnostic<()> {
        match self {
            TemplateError::LexicalError(e) => e.as_diagnostic(span),
            TemplateError::SyntaxError(e) => e.as_diagnostic(span),
            TemplateError::ResolutionError(e) => e.as_diagnostic(span),
        }
    }
}

#[cfg(test)]
mod tests {
    use lexer::TokenizeOptions;
    use parser::parse;
    use pretty_assertions::assert_eq;

    use crate::{
        Diagnosis, DiagnosisPosition, DiagnosisRange, DiagnosisSeverity, get_diagnostics, render,
    };

    fn parse_err(source: &str) -> errors::TemplateError {
        parse(source, &TokenizeOptions::default()).unwrap_err().0
    }

    #[test]
    fn unclosed_block() {
        let source = "Hello\n{name";

        let err = parse(source, &TokenizeOptions::default()).unwrap_err();

        assert_eq!(
            vec![Diagnosis {
                range: DiagnosisRange::new(
                    DiagnosisPosition::new(1, 5),
                    DiagnosisPosition::new(1, 5)
                ),
                severity: Some(DiagnosisSeverity::ERROR),
                message: parse_err(source).to_string(),
            }],
            get_diagnostics(&[err], source)
        );
    }

    #[test]
    fn lexical_error_range() {
        let source = "a\nb {x @}";

        let err = parse(source, &TokenizeOptions::default()).unwrap_err();

        assert_eq!(
            vec![Diagnosis {
                range: DiagnosisRange::new(
                    DiagnosisPosition::new(1, 5),
                    DiagnosisPosition::new(1, 6)
                ),
                severity: Some(DiagnosisSeverity::ERROR),
                message: String::from("LexicalError: Unexpected char: @"),
            }],
            get_diagnostics(&[err], source)
        );
    }

    #[test]
    fn serialize() {
        let diagnosis = Diagnosis {
            range: DiagnosisRange::default(),
            severity: Some(DiagnosisSeverity::ERROR),
            message: String::from("SyntaxError: Unexpected end of block"),
        };

        assert_eq!(
            concat!(
                "{\"range\":{\"start\":{\"line\":0,\"character\":0},",
                "\"end\":{\"line\":0,\"character\":0}},",
                "\"severity\":1,",
                "\"message\":\"SyntaxError: Unexpected end of block\"}"
            ),
            serde_json::to_string(&diagnosis).unwrap()
        );
    }

    #[test]
    fn render_report() {
        let source = "Hi {1abc}!";

        let err = parse(source, &TokenizeOptions::default()).unwrap_err();
        let report = render(&err, "greeting.tmpl", source).unwrap();

        assert!(report.starts_with("error[LexicalError]: "), "{report}");
        assert!(report.contains("greeting.tmpl:1:5"), "{report}");
    }
}
