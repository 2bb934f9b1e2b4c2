use serde::{Deserialize, Serialize};

use errors::{LexicalError, TemplateError, spanned};
use span::Spanned;
use token::{Token, TokenKind};

pub const DEFAULT_OPEN_BLOCK_MARKER: &str = "{";
pub const DEFAULT_CLOSE_BLOCK_MARKER: &str = "}";

/// Markers delimiting blocks in a template
///
/// Markers can be longer than one character (`%[` and `]%`), they are matched
/// literally. An empty marker means the default one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizeOptions {
    pub open_block_marker: String,
    pub close_block_marker: String,
}

impl TokenizeOptions {
    pub fn new(open_block_marker: impl Into<String>, close_block_marker: impl Into<String>) -> Self {
        Self {
            open_block_marker: open_block_marker.into(),
            close_block_marker: close_block_marker.into(),
        }
    }

    pub fn open_marker(&self) -> &str {
        non_empty_or(&self.open_block_marker, DEFAULT_OPEN_BLOCK_MARKER)
    }

    pub fn close_marker(&self) -> &str {
        non_empty_or(&self.close_block_marker, DEFAULT_CLOSE_BLOCK_MARKER)
    }
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_BLOCK_MARKER, DEFAULT_CLOSE_BLOCK_MARKER)
    }
}

fn non_empty_or<'a>(marker: &'a str, default: &'a str) -> &'a str {
    if marker.is_empty() { default } else { marker }
}

/// Scan `input` into tokens
///
/// Fails on the first lexical error, no tokens are returned in that case.
pub fn tokenize(
    input: &str,
    options: &TokenizeOptions,
) -> Result<Vec<Token>, Spanned<TemplateError>> {
    let tokens = Lexer::new(input, options)
        .map(|result| result.map_err(|(err, span)| spanned(err, span)))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(count = tokens.len(), "tokenized template");

    Ok(tokens)
}

/// Translate `\\ \' \" \n \r \t \b` in the content of a quoted string
pub fn replace_escape_sequences(input: &str) -> Result<String, LexicalError> {
    if !input.contains('\\') {
        return Ok(input.to_string());
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let replacement = match chars.next() {
            None => return Err(LexicalError::InterruptedEscape),
            Some('\\') => '\\',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('b') => '\u{8}',
            Some(other) => return Err(LexicalError::UnsupportedEscape(other)),
        };
        out.push(replacement);
    }

    Ok(out)
}

/// Iterator over the tokens of a template
///
/// Outside a block everything is raw text. Inside a block whitespace is
/// skipped and the small expression grammar is scanned. The iterator stops
/// after the first error.
pub struct Lexer<'a> {
    input: &'a str,
    open: &'a str,
    close: &'a str,
    pos: usize,
    inside_block: bool,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, options: &'a TokenizeOptions) -> Self {
        Self {
            input,
            open: options.open_marker(),
            close: options.close_marker(),
            pos: 0,
            inside_block: false,
            failed: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[offset..].chars().next()
    }

    fn emit(&mut self, kind: TokenKind, end: usize) -> Token {
        let span = self.pos..end;
        let token = Token::new(kind, &self.input[span.clone()], span);
        self.pos = end;
        token
    }

    fn scan_raw_text(&mut self) -> Token {
        match self.rest().find(self.open) {
            Some(0) => {
                self.inside_block = true;
                self.emit(TokenKind::BlockOpen, self.pos + self.open.len())
            }
            Some(offset) => self.emit(TokenKind::RawText, self.pos + offset),
            None => self.emit(TokenKind::RawText, self.input.len()),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !is_whitespace(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_block(&mut self) -> Option<Result<Token, Spanned<LexicalError>>> {
        self.skip_whitespace();

        let ch = self.peek()?;
        let start = self.pos;

        if self.rest().starts_with(self.close) {
            self.inside_block = false;
            return Some(Ok(self.emit(TokenKind::BlockClose, start + self.close.len())));
        }

        if self.rest().starts_with(self.open) {
            return Some(Ok(self.emit(TokenKind::BlockOpen, start + self.open.len())));
        }

        let single = match ch {
            '|' => Some(TokenKind::Filter),
            ',' => Some(TokenKind::Comma),
            '(' => Some(TokenKind::BracketOpen),
            ')' => Some(TokenKind::BracketClose),
            '?' => Some(TokenKind::Question),
            '>' => Some(TokenKind::Gt),
            _ => None,
        };

        if let Some(kind) = single {
            return Some(Ok(self.emit(kind, start + 1)));
        }

        let result = if ch.is_ascii_alphabetic() || ch == '_' {
            let end = self.scan_while(start, is_name_char);
            Ok(self.emit(TokenKind::Ident, end))
        } else if ch == '\'' || ch == '"' {
            self.scan_string(ch)
        } else if ch.is_ascii_digit() || ch == '+' || ch == '-' {
            self.scan_number(ch)
        } else {
            Err((
                LexicalError::UnexpectedChar(ch),
                start..start + ch.len_utf8(),
            ))
        };

        Some(result)
    }

    fn scan_while(&self, from: usize, predicate: impl Fn(char) -> bool) -> usize {
        let mut end = from;
        while let Some(ch) = self.peek_at(end) {
            if end > from && !predicate(ch) {
                break;
            }
            end += ch.len_utf8();
        }
        end
    }

    fn scan_string(&mut self, quote: char) -> Result<Token, Spanned<LexicalError>> {
        let start = self.pos;
        let mut chars = self.input[start + 1..].char_indices();

        let close = loop {
            match chars.next() {
                None => {
                    return Err((LexicalError::UnterminatedString, start..self.input.len()));
                }
                Some((offset, ch)) if ch == quote => break start + 1 + offset,
                Some((_, '\\')) => {
                    if chars.next().is_none() {
                        return Err((LexicalError::UnterminatedString, start..self.input.len()));
                    }
                }
                Some(_) => {}
            }
        };

        let span = start..close + quote.len_utf8();
        let value = replace_escape_sequences(&self.input[start + 1..close])
            .map_err(|err| (err, span.clone()))?;

        self.pos = span.end;

        Ok(Token::new(TokenKind::String, value, span))
    }

    fn scan_number(&mut self, first: char) -> Result<Token, Spanned<LexicalError>> {
        let start = self.pos;
        let digits_start = if first.is_ascii_digit() {
            start
        } else {
            start + 1
        };

        let mut end = digits_start;
        while let Some(ch) = self.peek_at(end) {
            if !ch.is_ascii_digit() {
                break;
            }
            end += 1;
        }

        if end == digits_start {
            return Err((LexicalError::LoneSign(first), start..start + 1));
        }

        if self.peek_at(end).is_some_and(is_name_char) {
            let bad_end = self.scan_while(end, is_name_char);
            return Err((
                LexicalError::AmbiguousNumber(self.input[start..bad_end].to_string()),
                start..bad_end,
            ));
        }

        Ok(self.emit(TokenKind::Number, end))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Spanned<LexicalError>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.input.len() {
            return None;
        }

        let item = if self.inside_block {
            self.scan_block()?
        } else {
            Ok(self.scan_raw_text())
        };

        if item.is_err() {
            self.failed = true;
        }

        Some(item)
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '#' | '.')
}

fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{A0}' | '\u{2028}' | '\u{2029}'
    )
}
