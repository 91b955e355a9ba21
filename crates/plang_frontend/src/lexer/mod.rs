
use std::fmt;
use std::str::Chars;

use plang_interner::Interner;
use plang_session::diagnostics::prelude::*;
use plang_utils::peek::Peek;
use serde::ser::SerializeStruct;

use crate::dfa::{self, is_ident, is_ident_start};
use crate::token::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub line: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerErrorKind {
    #[error("unrecognized token '{0}'")]
    UnrecognizedToken(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated character literal")]
    UnterminatedChar,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.kind, self.line)
    }
}

impl serde::Serialize for LexerError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("LexerError", 2)?;
        s.serialize_field("line", &self.line)?;
        s.serialize_field("message", &self.kind.to_string())?;
        s.end()
    }
}

impl IntoDiagnostic<SourceId> for LexerError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_message("lexical error")
            .with_snippet(Snippet::primary(
                self.kind.to_string(),
                *source_id,
                self.line,
            ))
    }
}

/// Deduplicated lexemes in order of first occurrence. Only used for reporting.
#[derive(Debug, Default, serde::Serialize)]
pub struct LexemeTables {
    pub identifiers: Interner<String>,
    pub integers: Interner<String>,
    pub floats: Interner<String>,
    pub strings: Interner<String>,
}

impl LexemeTables {
    fn record(&mut self, kind: TokenKind, lexeme: &str) {
        let table = match kind {
            TokenKind::Id => &mut self.identifiers,
            TokenKind::IntConst => &mut self.integers,
            TokenKind::FloatConst => &mut self.floats,
            TokenKind::FmtString => &mut self.strings,
            _ => return,
        };

        table.intern(lexeme);
    }
}

/// How an extracted lexeme ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extracted {
    Complete,
    UnterminatedString,
    UnterminatedChar,
}

pub struct Lexer<'src> {
    all: &'src str,
    chars: Chars<'src>,

    line: usize,
    token_start: usize,

    tokens: Vec<Token>,
    errors: Vec<LexerError>,
    tables: LexemeTables,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            line: 1,
            token_start: 0,

            tokens: vec![],
            errors: vec![],
            tables: LexemeTables::default(),
        }
    }

    pub fn lex(self) -> (TokenStream, Vec<LexerError>) {
        let (tokens, errors, _) = self.lex_with_tables();
        (tokens, errors)
    }

    pub fn lex_with_tables(mut self) -> (TokenStream, Vec<LexerError>, LexemeTables) {
        loop {
            self.skip_whitespace();

            self.token_start = self.byte_pos();
            let Some(extracted) = self.extract() else {
                break;
            };

            let all = self.all;
            let lexeme = &all[self.token_start..self.byte_pos()];
            self.push_lexeme(lexeme, extracted);

            self.line += lexeme.matches('\n').count();
        }

        self.tokens.push(Token::new(TokenKind::Eof, "", self.line));

        (TokenStream::new(self.tokens), self.errors, self.tables)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }

            if ch == '\n' {
                self.line += 1;
            }
            self.chars.next();
        }
    }

    /// Consumes the longest lexeme starting at the current position.
    fn extract(&mut self) -> Option<Extracted> {
        let extracted = match self.chars.next()? {
            '"' => {
                self.chars.eat_while(|&ch| ch != '"');

                if self.chars.eat('"') {
                    Extracted::Complete
                } else {
                    Extracted::UnterminatedString
                }
            }

            '\'' => {
                if self.chars.eat('\'') {
                    // ''
                    Extracted::Complete
                } else if self.chars.next().is_some() && self.chars.eat('\'') {
                    Extracted::Complete
                } else {
                    Extracted::UnterminatedChar
                }
            }

            ch if is_ident_start(ch) => {
                self.chars.eat_while(|&ch| is_ident(ch));
                Extracted::Complete
            }

            '0'..='9' => {
                self.chars.eat_while(char::is_ascii_digit);

                // at most one dot; a second one starts a new lexeme
                if self.chars.eat('.') {
                    self.chars.eat_while(char::is_ascii_digit);
                }

                Extracted::Complete
            }

            _ => {
                let rest = &self.all[self.token_start..];
                if rest
                    .get(..2)
                    .and_then(TokenKind::two_char_operator)
                    .is_some()
                {
                    self.chars.next();
                }

                Extracted::Complete
            }
        };

        Some(extracted)
    }

    fn push_lexeme(&mut self, lexeme: &str, extracted: Extracted) {
        let mut kind = dfa::classify(dfa::run(lexeme), lexeme);

        if kind == TokenKind::Unknown {
            let error = match extracted {
                Extracted::Complete => LexerErrorKind::UnrecognizedToken(lexeme.to_owned()),
                Extracted::UnterminatedString => LexerErrorKind::UnterminatedString,
                Extracted::UnterminatedChar => LexerErrorKind::UnterminatedChar,
            };

            self.report_error(error);
            kind = TokenKind::Error;
        }

        self.tables.record(kind, lexeme);
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }

    fn report_error(&mut self, kind: LexerErrorKind) {
        self.errors.push(LexerError {
            kind,
            line: self.line,
        });
    }
}

/// The lexer's output, with a cursor for the parser. Always ends in an `EOF`
/// token.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::Eof, "", line));
        }

        Self { tokens, pos: 0 }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn current(&self) -> &Token {
        self.lookahead(0)
    }

    /// The token `n` positions past the current one, clamped to `EOF`.
    pub fn lookahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }
}

impl serde::Serialize for TokenStream {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(&self.tokens)
    }
}
