use std::fmt;

use crate::symbols::SymbolTable;
use crate::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Float,
    Char,
    String,
    Void,
}

impl Type {
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Char => "char",
            Type::String => "string",
            Type::Void => "void",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinOp {
    Plus,
    Minus,
    Mult,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Plus => "PLUS",
            BinOp::Minus => "MINUS",
            BinOp::Mult => "MULT",
            BinOp::Div => "DIV",
        })
    }
}

#[derive(Node!, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    /// One table per function, in declaration order.
    pub fn symbol_tables(&self) -> impl Iterator<Item = &SymbolTable> {
        self.functions.iter().map(|func| &func.symbols)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "node", rename = "Function")]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
    #[serde(skip)]
    pub symbols: SymbolTable,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<Type>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "node", rename = "Block")]
pub struct Block {
    pub commands: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "node")]
pub enum Stmt {
    Assign {
        name: String,
        expr: Expr,
        line: usize,
    },

    Print {
        args: Vec<Expr>,
        line: usize,
    },

    Return {
        expr: Expr,
        line: usize,
    },

    /// A bare expression used as a statement.
    Expr { expr: Expr },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "node")]
pub enum Expr {
    Var {
        name: String,
        line: usize,
        #[serde(rename = "type")]
        ty: Option<Type>,
    },

    IntConst {
        value: i64,
        line: usize,
    },

    FloatConst {
        value: f64,
        line: usize,
    },

    CharConst {
        value: String,
        line: usize,
    },

    StringLit {
        value: String,
        line: usize,
    },

    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        line: usize,
        #[serde(rename = "type")]
        ty: Option<Type>,
    },

    /// Stands in for an atom that failed to parse.
    ParseError { line: usize },
}

impl Expr {
    pub fn var(name: impl Into<String>, line: usize) -> Self {
        Expr::Var {
            name: name.into(),
            line,
            ty: None,
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            line: left.line(),
            left: Box::new(left),
            right: Box::new(right),
            ty: None,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Expr::Var { line, .. }
            | Expr::IntConst { line, .. }
            | Expr::FloatConst { line, .. }
            | Expr::CharConst { line, .. }
            | Expr::StringLit { line, .. }
            | Expr::BinaryOp { line, .. }
            | Expr::ParseError { line } => *line,
        }
    }
}
