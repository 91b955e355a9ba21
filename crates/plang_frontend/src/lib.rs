#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod dfa;
pub mod symbols;
pub mod token;

pub use lexer::{LexemeTables, LexerError, LexerErrorKind, TokenStream};
pub use parser::{ParseError, ParseErrorKind};

use ast::Program;
use lexer::Lexer;
use parser::Parser;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, serde::Serialize)];
}

pub fn lex(source: &str) -> (TokenStream, Vec<LexerError>) {
    Lexer::new(source).lex()
}

pub fn lex_with_tables(source: &str) -> (TokenStream, Vec<LexerError>, LexemeTables) {
    Lexer::new(source).lex_with_tables()
}

pub fn parse(tokens: TokenStream) -> (Program, Vec<ParseError>) {
    Parser::new(tokens).parse()
}
