use std::collections::HashMap;
use std::fmt;

use crate::ast::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Parameter,
    Variable,
    Call,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Parameter => "parameter",
            Category::Variable => "variable",
            Category::Call => "call",
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Symbol {
    pub name: String,
    /// Absent when the declared type name could not be parsed.
    #[serde(rename = "type")]
    pub ty: Option<Type>,
    pub category: Category,
    pub line: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("'{name}' is already declared in scope '{scope}'")]
pub struct DuplicateSymbol {
    pub name: String,
    pub scope: String,
    /// Where the name was first declared.
    pub first_line: usize,
}

/// The flat namespace of one function. Lookups never reach outside it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SymbolTable {
    scope_name: String,
    symbols: Vec<Symbol>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new(scope_name: impl Into<String>) -> Self {
        Self {
            scope_name: scope_name.into(),
            symbols: vec![],
            index: HashMap::new(),
        }
    }

    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    /// Inserts a symbol unless the name is taken, in which case the table is
    /// left untouched.
    pub fn add_symbol(
        &mut self,
        name: impl Into<String>,
        ty: Option<Type>,
        category: Category,
        line: usize,
    ) -> Result<(), DuplicateSymbol> {
        let name = name.into();

        if let Some(&i) = self.index.get(&name) {
            return Err(DuplicateSymbol {
                name,
                scope: self.scope_name.clone(),
                first_line: self.symbols[i].line,
            });
        }

        self.index.insert(name.clone(), self.symbols.len());
        self.symbols.push(Symbol {
            name,
            ty,
            category,
            line,
        });

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_declaration_wins() {
        let mut table = SymbolTable::new("main");

        assert_eq!(
            table.add_symbol("a", Some(Type::Int), Category::Variable, 2),
            Ok(())
        );

        let err = table
            .add_symbol("a", Some(Type::Float), Category::Variable, 3)
            .unwrap_err();
        assert_eq!(err.to_string(), "'a' is already declared in scope 'main'");
        assert_eq!(err.first_line, 2);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").and_then(|s| s.ty), Some(Type::Int));
        assert_eq!(table.get("a").map(|s| s.line), Some(2));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut table = SymbolTable::new("f");
        for name in ["z", "a", "m"] {
            table
                .add_symbol(name, Some(Type::Char), Category::Parameter, 1)
                .unwrap();
        }

        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert!(table.contains("m"));
        assert!(table.get("missing").is_none());
    }
}
