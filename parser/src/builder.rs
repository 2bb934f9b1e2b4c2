use ast::{Ast, AstNode, Block, Expr};
use errors::{SyntaxError, TemplateError, spanned};
use span::{Span, Spanned, point};
use token::{Token, TokenKind};

type BuildResult<T> = Result<T, Spanned<TemplateError>>;

/// Recursive descent over a token list, one token of lookahead
///
/// ```text
/// template   := (RawText | block)*
/// block      := BlockOpen '?'? filterList BlockClose
/// filterList := expr (Filter expr)*
/// expr       := String | Number | Ident ('(' (expr (',' expr)*)? ')')?
/// ```
pub struct AstBuilder {
    tokens: Vec<Token>,
    index: usize,
}

impl AstBuilder {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    /// Consume every token in to an [Ast]
    pub fn build(mut self) -> BuildResult<Ast> {
        let mut nodes: Vec<Spanned<AstNode>> = vec![];

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::RawText => {
                    let token = self.advance_unchecked();
                    nodes.push((AstNode::RawText(token.value.clone()), token.span.clone()));
                }
                TokenKind::BlockOpen => {
                    let (block, span) = self.block()?;
                    nodes.push((AstNode::Block(block), span));
                }
                _ => return Err(self.unexpected("Raw text or block")),
            }
        }

        tracing::trace!(nodes = nodes.len(), "built template ast");

        Ok(Ast::new(nodes))
    }

    fn block(&mut self) -> BuildResult<Spanned<Block>> {
        let open = self.advance_unchecked().span.clone();

        let optional = self.eat(TokenKind::Question);

        match self.peek() {
            None => return Err(self.unexpected_end("Function or variable name")),
            Some(token) if token.is(TokenKind::BlockClose) => {
                return Err(spanned(SyntaxError::EmptyBlock, open.start..token.span.end));
            }
            Some(_) => {}
        }

        let head = self.expr()?;
        let mut filters = vec![];

        loop {
            match self.peek() {
                None => return Err(self.unexpected_end("Block ending")),
                Some(token) if token.is(TokenKind::Filter) => {
                    self.index += 1;
                    filters.push(self.expr()?);
                }
                Some(token) if token.is(TokenKind::BlockClose) => {
                    let close = token.span.clone();
                    self.index += 1;
                    return Ok((Block::new(optional, head, filters), open.start..close.end));
                }
                Some(_) => return Err(self.unexpected("Filter or end of block")),
            }
        }
    }

    fn expr(&mut self) -> BuildResult<Expr> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected_end("Function or variable name"));
        };

        let expr = match token.kind {
            TokenKind::String => Expr::String(token.value.clone()),
            TokenKind::Number => Expr::Number(token.value.clone()),
            TokenKind::Ident => {
                let name = token.value.clone();
                self.index += 1;
                return if self.eat(TokenKind::BracketOpen) {
                    Ok(Expr::Function {
                        name,
                        args: self.arguments()?,
                    })
                } else {
                    Ok(Expr::FunctionOrVariable(name))
                };
            }
            _ => return Err(self.unexpected("Function or variable name")),
        };

        self.index += 1;
        Ok(expr)
    }

    /// Arguments after an opening bracket, up to and including the closing one
    fn arguments(&mut self) -> BuildResult<Vec<Expr>> {
        let mut args = vec![];

        if self.eat(TokenKind::BracketClose) {
            return Ok(args);
        }

        loop {
            args.push(self.expr()?);

            match self.peek() {
                None => return Err(self.unexpected_end("Closing bracket")),
                Some(token) if token.is(TokenKind::BracketClose) => {
                    self.index += 1;
                    return Ok(args);
                }
                Some(token) if token.is(TokenKind::Comma) => {
                    self.index += 1;
                }
                Some(_) => return Err(self.unexpected("Argument or closing bracket")),
            }
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance_unchecked(&mut self) -> &Token {
        self.index += 1;
        &self.tokens[self.index - 1]
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.is(kind)) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn end_of_input(&self) -> Span {
        point(self.tokens.last().map(|token| token.span.end).unwrap_or(0))
    }

    fn unexpected(&self, expected: &str) -> Spanned<TemplateError> {
        match self.peek() {
            Some(token) => spanned(
                SyntaxError::UnexpectedToken {
                    found: token.value.clone(),
                    expected: expected.to_string(),
                },
                token.span.clone(),
            ),
            None => self.unexpected_end(expected),
        }
    }

    fn unexpected_end(&self, expected: &str) -> Spanned<TemplateError> {
        spanned(
            SyntaxError::UnexpectedEnd {
                expected: expected.to_lowercase(),
            },
            self.end_of_input(),
        )
    }
}
