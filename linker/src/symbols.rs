use indexmap::IndexMap;
use std::fmt;

use crate::module::Module;

/// Global symbol table: name -> absolute value, in order of definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable(IndexMap<String, usize>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// Assign every definition its module's base address.
    ///
    /// Expects multiple definitions to have been rejected already; should one
    /// slip through, the first definition wins.
    pub fn build(modules: &[Module]) -> Self {
        let mut table = SymbolTable::new();
        for module in modules {
            for def in module.defs() {
                let value = def.value + module.base_address();
                if let Some(prev) = table.0.get(&def.symbol) {
                    tracing::warn!("{} already defined as {}, ignoring {}", def.symbol, prev, value);
                    continue;
                }
                table.insert(def.symbol.clone(), value);
            }
        }
        table
    }

    pub fn insert(&mut self, name: String, value: usize) -> Option<usize> {
        self.0.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Length of the longest symbol name (0 when empty).
    pub fn name_width(&self) -> usize {
        self.0.keys().map(String::len).max().unwrap_or(0)
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, value)) in self.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}
