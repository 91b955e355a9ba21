
mod expr;

use std::fmt;

use plang_session::diagnostics::prelude::*;
use serde::ser::SerializeStruct;

use crate::ast::*;
use crate::lexer::TokenStream;
use crate::symbols::{Category, DuplicateSymbol, SymbolTable};
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: TokenKind },

    #[error(transparent)]
    Duplicate(#[from] DuplicateSymbol),

    #[error("integer constant '{0}' is out of range")]
    IntegerOutOfRange(String),

    #[error("invalid float constant '{0}'")]
    InvalidFloat(String),

    #[error("expression nested too deeply")]
    TooDeeplyNested,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.kind, self.line)
    }
}

impl serde::Serialize for ParseError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("ParseError", 2)?;
        s.serialize_field("line", &self.line)?;
        s.serialize_field("message", &self.kind.to_string())?;
        s.end()
    }
}

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        let diagnostic = Diagnostic::error().with_message(self.kind.to_string());

        match self.kind {
            ParseErrorKind::Expected { expected, .. } => diagnostic.with_snippet(
                Snippet::primary(format!("expected {expected} here"), *source_id, self.line),
            ),
            ParseErrorKind::Duplicate(DuplicateSymbol { first_line, .. }) => diagnostic
                .with_snippet(Snippet::primary("declared again here", *source_id, self.line))
                .with_snippet(Snippet::secondary(
                    "first declared here",
                    *source_id,
                    first_line,
                )),
            ParseErrorKind::TooDeeplyNested => diagnostic.with_snippet(Snippet::primary(
                "this bracket",
                *source_id,
                self.line,
            )),
            ParseErrorKind::IntegerOutOfRange(_) | ParseErrorKind::InvalidFloat(_) => {
                diagnostic.with_snippet(Snippet::primary("this constant", *source_id, self.line))
            }
        }
    }
}

/// Recursive-descent parser that never stops at an error: a mismatched token
/// is reported and consumed, so every production makes progress.
pub struct Parser {
    tokens: TokenStream,
    errors: Vec<ParseError>,

    /// Open brackets around the expression being parsed.
    depth: usize,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self {
            tokens,
            errors: vec![],
            depth: 0,
        }
    }

    pub fn parse(mut self) -> (Program, Vec<ParseError>) {
        let mut functions = vec![];

        while !self.tokens.at_end() {
            if self.current_kind() == TokenKind::Fn {
                functions.push(self.parse_function());
            } else {
                self.report_expected("a function declaration");
                self.tokens.advance();
            }
        }

        (Program { functions }, self.errors)
    }

    fn parse_function(&mut self) -> Function {
        let line = self.tokens.current().line;
        self.eat(TokenKind::Fn);

        let name = self.tokens.current().lexeme.clone();
        if matches!(self.current_kind(), TokenKind::Id | TokenKind::Main) {
            self.tokens.advance();
        } else {
            self.eat(TokenKind::Id);
        }

        let mut symbols = SymbolTable::new(name.as_str());

        self.eat(TokenKind::LBracket);
        let params = self.parse_params(&mut symbols);
        self.eat(TokenKind::RBracket);

        let body = self.parse_block(&mut symbols);

        Function {
            name,
            params,
            body,
            symbols,
            line,
        }
    }

    fn parse_params(&mut self, scope: &mut SymbolTable) -> Vec<Param> {
        let mut params = vec![];

        if self.current_kind() != TokenKind::Id {
            return params;
        }

        loop {
            let Token { lexeme, line, .. } = self.tokens.current().clone();
            self.eat(TokenKind::Id);
            self.eat(TokenKind::Colon);
            let ty = self.parse_type();

            self.declare(scope, lexeme.clone(), ty, Category::Parameter, line);
            params.push(Param {
                name: lexeme,
                ty,
                line,
            });

            if !self.eat_kind(TokenKind::Comma) {
                break;
            }
        }

        params
    }

    fn parse_type(&mut self) -> Option<Type> {
        let ty = match self.current_kind() {
            TokenKind::Int => Some(Type::Int),
            TokenKind::Float => Some(Type::Float),
            TokenKind::Char => Some(Type::Char),
            TokenKind::String => Some(Type::String),
            _ => None,
        };

        if ty.is_none() {
            self.report_expected("a type name");
        }
        self.tokens.advance();

        ty
    }

    fn parse_block(&mut self, scope: &mut SymbolTable) -> Block {
        self.eat(TokenKind::LBrace);

        let mut commands = vec![];
        while !matches!(self.current_kind(), TokenKind::RBrace | TokenKind::Eof) {
            if self.current_kind() == TokenKind::Let {
                self.parse_var_decl(scope);
            } else {
                commands.push(self.parse_statement(scope));
            }
        }

        self.eat(TokenKind::RBrace);

        Block { commands }
    }

    /// `let a, b, c: float;`
    fn parse_var_decl(&mut self, scope: &mut SymbolTable) {
        self.eat(TokenKind::Let);

        let mut names = vec![];
        loop {
            let token = self.tokens.current().clone();
            self.eat(TokenKind::Id);

            if token.kind == TokenKind::Id {
                names.push(token);
            }

            if !self.eat_kind(TokenKind::Comma) {
                break;
            }
        }

        self.eat(TokenKind::Colon);
        let ty = self.parse_type();
        self.eat(TokenKind::Semicolon);

        for name in names {
            self.declare(scope, name.lexeme, ty, Category::Variable, name.line);
        }
    }

    // always advances at least one token (unless at end)
    fn parse_statement(&mut self, scope: &mut SymbolTable) -> Stmt {
        let token = self.tokens.current().clone();

        match token.kind {
            TokenKind::Id if self.tokens.lookahead(1).kind == TokenKind::Assign => {
                self.tokens.advance();
                self.tokens.advance();

                let expr = self.parse_expr();
                self.eat(TokenKind::Semicolon);

                Stmt::Assign {
                    name: token.lexeme,
                    expr,
                    line: token.line,
                }
            }

            TokenKind::Println => {
                self.tokens.advance();
                self.eat(TokenKind::LBracket);

                let mut args = vec![];
                if self.current_kind() != TokenKind::RBracket {
                    args.push(self.parse_expr());
                    while self.eat_kind(TokenKind::Comma) {
                        args.push(self.parse_expr());
                    }
                }

                self.eat(TokenKind::RBracket);
                self.eat(TokenKind::Semicolon);

                if !scope.contains(&token.lexeme) {
                    self.declare(
                        scope,
                        token.lexeme,
                        Some(Type::Void),
                        Category::Call,
                        token.line,
                    );
                }

                Stmt::Print {
                    args,
                    line: token.line,
                }
            }

            TokenKind::Return => {
                self.tokens.advance();

                let expr = self.parse_expr();
                self.eat(TokenKind::Semicolon);

                Stmt::Return {
                    expr,
                    line: token.line,
                }
            }

            _ => {
                let expr = self.parse_expr();

                // left in place so a closing brace still ends the block
                if !self.eat_kind(TokenKind::Semicolon) {
                    self.report_expected(TokenKind::Semicolon.name());
                }

                Stmt::Expr { expr }
            }
        }
    }

    fn declare(
        &mut self,
        scope: &mut SymbolTable,
        name: String,
        ty: Option<Type>,
        category: Category,
        line: usize,
    ) {
        if let Err(err) = scope.add_symbol(name, ty, category, line) {
            self.errors.push(ParseError {
                kind: err.into(),
                line,
            });
        }
    }

    fn current_kind(&self) -> TokenKind {
        self.tokens.current().kind
    }

    /// Consumes the current token whether or not it has the expected kind.
    fn eat(&mut self, kind: TokenKind) {
        if self.current_kind() != kind {
            self.report_expected(kind.name());
        }
        self.tokens.advance();
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.current_kind() == kind {
            self.tokens.advance();
            true
        } else {
            false
        }
    }

    fn report_expected(&mut self, expected: impl Into<String>) {
        let found = self.tokens.current();
        let error = ParseError {
            kind: ParseErrorKind::Expected {
                expected: expected.into(),
                found: found.kind,
            },
            line: found.line,
        };

        self.errors.push(error);
    }
}
