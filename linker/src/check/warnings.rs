use arch::Mode;
use std::collections::HashSet;
use std::fmt;

use crate::error::Section;
use crate::module::Module;
use crate::msg::{Diagnostic, Kind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    DefinedButUnused { symbol: String, module: usize },
    UnusedUseEntry { symbol: String, module: usize },
}

impl Warning {
    pub fn kind(&self) -> Kind {
        match self {
            Warning::DefinedButUnused { .. } => Kind::DefinedButUnused,
            Warning::UnusedUseEntry { .. } => Kind::UnusedUseEntry,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Warning::DefinedButUnused { symbol, .. } | Warning::UnusedUseEntry { symbol, .. } => {
                symbol
            }
        }
    }

    pub fn module(&self) -> usize {
        match self {
            Warning::DefinedButUnused { module, .. } | Warning::UnusedUseEntry { module, .. } => {
                *module
            }
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Warning::DefinedButUnused { .. } => Section::Def,
            Warning::UnusedUseEntry { .. } => Section::Use,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic {
            kind: self.kind(),
            message: self.to_string(),
            module: Some(self.module()),
            section: Some(self.section()),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DefinedButUnused { symbol, module } => write!(
                f,
                "{} was defined in Module {} but was never used",
                symbol, module
            ),
            Warning::UnusedUseEntry { symbol, module } => write!(
                f,
                "{} appeared in the use list in Module {} but not used",
                symbol, module
            ),
        }
    }
}

/// Unused definitions first, then unused use entries.
pub fn collect(modules: &[Module]) -> Vec<Warning> {
    let mut warnings = defined_but_unused(modules);
    warnings.extend(unused_use_entries(modules));
    warnings
}

pub fn defined_but_unused(modules: &[Module]) -> Vec<Warning> {
    let used: HashSet<&str> = modules
        .iter()
        .flat_map(|m| m.uses())
        .map(String::as_str)
        .collect();
    modules
        .iter()
        .flat_map(|m| m.defs().iter().map(move |def| (m.number(), def)))
        .filter(|(_, def)| !used.contains(def.symbol.as_str()))
        .map(|(module, def)| Warning::DefinedButUnused {
            symbol: def.symbol.clone(),
            module,
        })
        .collect()
}

pub fn unused_use_entries(modules: &[Module]) -> Vec<Warning> {
    let mut warnings = vec![];
    for module in modules {
        let referenced: HashSet<usize> = module.words(Mode::E).map(|addr| addr.field()).collect();
        for (idx, name) in module.uses().iter().enumerate() {
            if !referenced.contains(&idx) {
                warnings.push(Warning::UnusedUseEntry {
                    symbol: name.clone(),
                    module: module.number(),
                });
            }
        }
    }
    warnings
}
