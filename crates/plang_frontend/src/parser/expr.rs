use super::{ParseError, ParseErrorKind, Parser};
use crate::ast::*;
use crate::token::*;

const MAX_NESTING: usize = 256;

fn strip_quotes(lexeme: &str, quote: char) -> String {
    lexeme
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .unwrap_or(lexeme)
        .to_owned()
}

impl Parser {
    /// All four operators share one precedence level and associate to the
    /// left, so `a * b + c` and `a + b * c` both group from the left.
    pub fn parse_expr(&mut self) -> Expr {
        let mut expr = self.parse_atom();

        while let Some(op) = self.peek_bin_op() {
            self.tokens.advance();

            let rhs = self.parse_atom();
            expr = Expr::binary(op, expr, rhs);
        }

        expr
    }

    fn parse_atom(&mut self) -> Expr {
        let Token { kind, lexeme, line } = self.tokens.current().clone();

        match kind {
            TokenKind::Id => {
                self.tokens.advance();
                Expr::var(lexeme, line)
            }

            TokenKind::IntConst => {
                self.tokens.advance();
                match lexeme.parse() {
                    Ok(value) => Expr::IntConst { value, line },
                    Err(_) => self.bad_constant(ParseErrorKind::IntegerOutOfRange(lexeme), line),
                }
            }

            TokenKind::FloatConst => {
                self.tokens.advance();
                match lexeme.parse() {
                    Ok(value) => Expr::FloatConst { value, line },
                    Err(_) => self.bad_constant(ParseErrorKind::InvalidFloat(lexeme), line),
                }
            }

            TokenKind::CharLiteral => {
                self.tokens.advance();
                Expr::CharConst {
                    value: strip_quotes(&lexeme, '\''),
                    line,
                }
            }

            TokenKind::FmtString => {
                self.tokens.advance();
                Expr::StringLit {
                    value: strip_quotes(&lexeme, '"'),
                    line,
                }
            }

            TokenKind::LBracket if self.depth >= MAX_NESTING => {
                self.errors.push(ParseError {
                    kind: ParseErrorKind::TooDeeplyNested,
                    line,
                });
                self.skip_bracketed();
                Expr::ParseError { line }
            }

            TokenKind::LBracket => {
                self.tokens.advance();

                self.depth += 1;
                let expr = self.parse_expr();
                self.depth -= 1;

                self.eat(TokenKind::RBracket);
                expr
            }

            _ => {
                self.report_expected("an expression");
                self.tokens.advance();
                Expr::ParseError { line }
            }
        }
    }

    /// Skips from an opening bracket past its matching close, or to the end.
    fn skip_bracketed(&mut self) {
        let mut open = 0usize;

        while !self.tokens.at_end() {
            match self.current_kind() {
                TokenKind::LBracket => open += 1,
                TokenKind::RBracket => open -= 1,
                _ => {}
            }
            self.tokens.advance();

            if open == 0 {
                break;
            }
        }
    }

    fn bad_constant(&mut self, kind: ParseErrorKind, line: usize) -> Expr {
        self.errors.push(ParseError { kind, line });
        Expr::ParseError { line }
    }

    fn peek_bin_op(&self) -> Option<BinOp> {
        let op = match self.current_kind() {
            TokenKind::Plus => BinOp::Plus,
            TokenKind::Minus => BinOp::Minus,
            TokenKind::Mult => BinOp::Mult,
            TokenKind::Div => BinOp::Div,
            _ => return None,
        };

        Some(op)
    }
}
