use arch::{Mode, MACHINE_SIZE};
use std::collections::HashSet;
use tracing::trace;

use crate::error::{Error, Loc, Section};
use crate::module::Module;

type Rule = fn(&[Module]) -> Result<(), Error>;

// Later rules rely on what earlier ones have established
const RULES: [(&str, Rule); 7] = [
    ("multiply defined", multiply_defined),
    ("used but not defined", used_but_undefined),
    ("definition exceeds module size", definition_exceeds_module),
    ("external address out of range", external_out_of_range),
    ("absolute address exceeds machine size", absolute_exceeds_machine),
    ("relative address exceeds module size", relative_exceeds_module),
    ("total size exceeds machine size", total_exceeds_machine),
];

/// Run every rule in order and stop at the first failure.
pub fn check(modules: &[Module]) -> Result<(), Error> {
    for (name, rule) in RULES {
        trace!("checking: {}", name);
        rule(modules)?;
    }
    Ok(())
}

pub fn multiply_defined(modules: &[Module]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for module in modules {
        for def in module.defs() {
            if !seen.insert(def.symbol.as_str()) {
                return Err(Error::MultiplyDefined {
                    symbol: def.symbol.clone(),
                    loc: Loc::new(module.number(), Section::Def),
                });
            }
        }
    }
    Ok(())
}

pub fn used_but_undefined(modules: &[Module]) -> Result<(), Error> {
    let defined: HashSet<&str> = modules
        .iter()
        .flat_map(|m| m.defs())
        .map(|def| def.symbol.as_str())
        .collect();
    for module in modules {
        for name in module.uses() {
            if !defined.contains(name.as_str()) {
                return Err(Error::UndefinedSymbol {
                    symbol: name.clone(),
                    loc: Loc::new(module.number(), Section::Use),
                });
            }
        }
    }
    Ok(())
}

pub fn definition_exceeds_module(modules: &[Module]) -> Result<(), Error> {
    for module in modules {
        for def in module.defs() {
            if def.value >= module.size() {
                return Err(Error::DefinitionExceedsModuleSize {
                    symbol: def.symbol.clone(),
                    value: def.value,
                    size: module.size(),
                    loc: Loc::new(module.number(), Section::Def),
                });
            }
        }
    }
    Ok(())
}

pub fn external_out_of_range(modules: &[Module]) -> Result<(), Error> {
    for module in modules {
        let uses = module.uses().len();
        if let Some(addr) = module.words(Mode::E).find(|addr| addr.field() >= uses) {
            return Err(Error::ExternalAddressOutOfRange {
                addr: *addr,
                uses,
                loc: Loc::new(module.number(), Section::Code),
            });
        }
    }
    Ok(())
}

pub fn absolute_exceeds_machine(modules: &[Module]) -> Result<(), Error> {
    for module in modules {
        if let Some(addr) = module
            .words(Mode::A)
            .find(|addr| addr.field() >= MACHINE_SIZE)
        {
            return Err(Error::AbsoluteAddressExceedsMachine {
                addr: *addr,
                loc: Loc::new(module.number(), Section::Code),
            });
        }
    }
    Ok(())
}

pub fn relative_exceeds_module(modules: &[Module]) -> Result<(), Error> {
    for module in modules {
        let size = module.size();
        if let Some(addr) = module.words(Mode::R).find(|addr| addr.field() >= size) {
            return Err(Error::RelativeAddressExceedsModule {
                addr: *addr,
                size,
                loc: Loc::new(module.number(), Section::Code),
            });
        }
    }
    Ok(())
}

pub fn total_exceeds_machine(modules: &[Module]) -> Result<(), Error> {
    let total: usize = modules.iter().map(Module::size).sum();
    if total > MACHINE_SIZE {
        return Err(Error::TotalSizeExceedsMachine { total });
    }
    Ok(())
}
