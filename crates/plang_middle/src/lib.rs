pub mod type_check;

pub use type_check::{analyze, SemanticError, SemanticErrorKind};
