
use std::fmt;

use plang_frontend::ast::*;
use plang_frontend::symbols::SymbolTable;
use plang_session::diagnostics::prelude::*;
use serde::ser::SerializeStruct;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub line: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    #[error("variable '{0}' is not declared")]
    Undeclared(String),

    #[error("mismatched types in assignment to '{name}': expected {expected}, found {found}")]
    AssignMismatch {
        name: String,
        expected: Type,
        found: Type,
    },

    #[error("mismatched operand types for {op}: {left} and {right}")]
    OperandMismatch { op: BinOp, left: Type, right: Type },

    #[error("operator {op} requires int or float operands, found {ty}")]
    NonNumericOperands { op: BinOp, ty: Type },
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.kind, self.line)
    }
}

impl serde::Serialize for SemanticError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("SemanticError", 2)?;
        s.serialize_field("line", &self.line)?;
        s.serialize_field("message", &self.kind.to_string())?;
        s.end()
    }
}

impl IntoDiagnostic<SourceId> for SemanticError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        let label = match &self.kind {
            SemanticErrorKind::Undeclared(_) => "not declared".to_owned(),
            SemanticErrorKind::AssignMismatch { expected, .. } => {
                format!("expected {expected} due to the declaration")
            }
            SemanticErrorKind::OperandMismatch { .. } => "operands differ in type".to_owned(),
            SemanticErrorKind::NonNumericOperands { ty, .. } => format!("operands are {ty}"),
        };

        Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_snippet(Snippet::primary(label, *source_id, self.line))
    }
}

/// Checks every function against its own symbol table, in order. Analysis
/// never stops early: all errors are collected.
pub fn analyze(functions: &mut [Function]) -> Vec<SemanticError> {
    let mut errors = vec![];

    for func in functions {
        errors.extend(TypeChecker::new(&func.symbols).run(&mut func.body));
    }

    errors
}

pub struct TypeChecker<'t> {
    symbols: &'t SymbolTable,
    errors: Vec<SemanticError>,
}

impl<'t> TypeChecker<'t> {
    pub fn new(symbols: &'t SymbolTable) -> Self {
        Self {
            symbols,
            errors: vec![],
        }
    }

    pub fn run(mut self, block: &mut Block) -> Vec<SemanticError> {
        for stmt in &mut block.commands {
            self.check_stmt(stmt);
        }

        self.errors
    }

    fn check_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Assign { name, expr, line } => {
                let Some(symbol) = self.symbols.get(name) else {
                    self.report(SemanticErrorKind::Undeclared(name.clone()), *line);
                    return;
                };
                let declared = symbol.ty;

                let found = self.check_expr(expr);
                if let (Some(expected), Some(found)) = (declared, found) {
                    if expected != found {
                        self.report(
                            SemanticErrorKind::AssignMismatch {
                                name: name.clone(),
                                expected,
                                found,
                            },
                            *line,
                        );
                    }
                }
            }

            // any argument type is accepted
            Stmt::Print { args, .. } => {
                for arg in args {
                    self.check_expr(arg);
                }
            }

            Stmt::Return { expr, .. } | Stmt::Expr { expr } => {
                self.check_expr(expr);
            }
        }
    }

    /// Infers the type of `expr`, writing it into the nodes that carry one.
    /// `None` means the type is unknown and has already been reported, so
    /// enclosing expressions stay quiet about it.
    fn check_expr(&mut self, expr: &mut Expr) -> Option<Type> {
        match expr {
            Expr::Var { name, line, ty } => {
                *ty = match self.symbols.get(name) {
                    Some(symbol) => symbol.ty,
                    None => {
                        self.report(SemanticErrorKind::Undeclared(name.clone()), *line);
                        None
                    }
                };
                *ty
            }

            Expr::IntConst { .. } => Some(Type::Int),
            Expr::FloatConst { .. } => Some(Type::Float),
            Expr::CharConst { .. } => Some(Type::Char),
            Expr::StringLit { .. } => Some(Type::String),

            Expr::BinaryOp {
                op,
                left,
                right,
                line,
                ty,
            } => {
                let left = self.check_expr(left);
                let right = self.check_expr(right);

                *ty = self.check_bin_op(*op, left, right, *line);
                *ty
            }

            Expr::ParseError { .. } => None,
        }
    }

    fn check_bin_op(
        &mut self,
        op: BinOp,
        left: Option<Type>,
        right: Option<Type>,
        line: usize,
    ) -> Option<Type> {
        let (left, right) = (left?, right?);

        if left != right {
            self.report(SemanticErrorKind::OperandMismatch { op, left, right }, line);
            return None;
        }

        if !left.is_numeric() {
            self.report(SemanticErrorKind::NonNumericOperands { op, ty: left }, line);
            return None;
        }

        // no implicit int -> float promotion
        Some(left)
    }

    fn report(&mut self, kind: SemanticErrorKind, line: usize) {
        self.errors.push(SemanticError { kind, line });
    }
}
