use std::fmt;

use crate::Node;

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    #[serde(rename = "FUNCTION")]
    Fn,
    Main,
    Let,
    Int,
    Float,
    Char,
    String,
    If,
    Else,
    While,
    Println,
    Return,

    Plus,
    Minus,
    Mult,
    Div,
    Assign,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Arrow,

    #[serde(rename = "LBRACKET")]
    LBracket,
    #[serde(rename = "RBRACKET")]
    RBracket,
    #[serde(rename = "LBRACE")]
    LBrace,
    #[serde(rename = "RBRACE")]
    RBrace,
    Semicolon,
    Comma,
    Colon,

    Id,
    IntConst,
    FloatConst,
    CharLiteral,
    FmtString,

    Eof,
    Unknown,
    #[serde(rename = "ERRO")]
    Error,
}

impl TokenKind {
    /// Keyword kind for a reserved word.
    pub fn keyword(s: &str) -> Option<Self> {
        let kind = match s {
            "fn" => Self::Fn,
            "main" => Self::Main,
            "let" => Self::Let,
            "int" => Self::Int,
            "float" => Self::Float,
            "char" => Self::Char,
            "string" => Self::String,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "println" => Self::Println,
            "return" => Self::Return,
            _ => return None,
        };

        Some(kind)
    }

    /// Kind for a two-character operator lexeme.
    pub fn two_char_operator(s: &str) -> Option<Self> {
        let kind = match s {
            "->" => Self::Arrow,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            _ => return None,
        };

        Some(kind)
    }

    /// Kind for a single punctuation character.
    pub fn punctuation(ch: char) -> Option<Self> {
        let kind = match ch {
            '(' => Self::LBracket,
            ')' => Self::RBracket,
            '{' => Self::LBrace,
            '}' => Self::RBrace,
            ';' => Self::Semicolon,
            ':' => Self::Colon,
            ',' => Self::Comma,
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Mult,
            '/' => Self::Div,
            '=' => Self::Assign,
            '<' => Self::Lt,
            '>' => Self::Gt,
            _ => return None,
        };

        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fn => "FUNCTION",
            Self::Main => "MAIN",
            Self::Let => "LET",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Char => "CHAR",
            Self::String => "STRING",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::While => "WHILE",
            Self::Println => "PRINTLN",
            Self::Return => "RETURN",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mult => "MULT",
            Self::Div => "DIV",
            Self::Assign => "ASSIGN",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Le => "LE",
            Self::Ge => "GE",
            Self::Arrow => "ARROW",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Semicolon => "SEMICOLON",
            Self::Comma => "COMMA",
            Self::Colon => "COLON",
            Self::Id => "ID",
            Self::IntConst => "INT_CONST",
            Self::FloatConst => "FLOAT_CONST",
            Self::CharLiteral => "CHAR_LITERAL",
            Self::FmtString => "FMT_STRING",
            Self::Eof => "EOF",
            Self::Unknown => "UNKNOWN",
            Self::Error => "ERRO",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
