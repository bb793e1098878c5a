use arch::{Mode, Word, MACHINE_SIZE};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, trace};

use crate::check::{self, Warning};
use crate::error::{Error, Loc, Section};
use crate::module::{self, CodeWord, Def, Module};
use crate::symbols::SymbolTable;

// Link stages. A module moves through them exactly once, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocated;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved;

/// A module with its use list bound to absolute symbol values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedModule<S = Resolved> {
    number: usize,
    base: usize,
    defs: Vec<Def>,
    uses: Vec<String>,
    code: Vec<CodeWord>,
    use_values: Vec<usize>,
    stage: PhantomData<S>,
}

impl<S> LinkedModule<S> {
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn base_address(&self) -> usize {
        self.base
    }

    pub fn size(&self) -> usize {
        self.code.len()
    }

    pub fn defs(&self) -> &[Def] {
        &self.defs
    }

    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    pub fn code(&self) -> &[CodeWord] {
        &self.code
    }

    /// Absolute value of each use entry, by position.
    pub fn use_values(&self) -> &[usize] {
        &self.use_values
    }

    fn advance<T>(self, code: Vec<CodeWord>) -> LinkedModule<T> {
        LinkedModule {
            number: self.number,
            base: self.base,
            defs: self.defs,
            uses: self.uses,
            code,
            use_values: self.use_values,
            stage: PhantomData,
        }
    }

    fn loc(&self) -> Loc {
        Loc::new(self.number, Section::Code)
    }
}

impl LinkedModule<Pending> {
    pub fn new(module: &Module, table: &SymbolTable) -> Result<Self, Error> {
        let use_values = module
            .uses()
            .iter()
            .map(|name| {
                table.get(name).ok_or_else(|| Error::UndefinedSymbol {
                    symbol: name.clone(),
                    loc: Loc::new(module.number(), Section::Use),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(LinkedModule {
            number: module.number(),
            base: module.base_address(),
            defs: module.defs().to_vec(),
            uses: module.uses().to_vec(),
            code: module.code().to_vec(),
            use_values,
            stage: PhantomData,
        })
    }

    /// Add the base address to every relative field.
    pub fn relocate(self) -> Result<LinkedModule<Relocated>, Error> {
        let mut code = Vec::with_capacity(self.code.len());
        for cw in &self.code {
            if cw.mode != Mode::R {
                code.push(*cw);
                continue;
            }
            let field = cw.addr.field() + self.base;
            if field >= MACHINE_SIZE {
                return Err(Error::RelocatedAddressExceedsMachine {
                    relocated: cw.addr.value() + self.base,
                    original: cw.addr,
                    loc: self.loc(),
                });
            }
            code.push(CodeWord::new(cw.mode, cw.addr.with_field(field)?));
        }
        trace!("relocated module {} by {}", self.number, self.base);
        Ok(self.advance(code))
    }
}

impl LinkedModule<Relocated> {
    /// Replace the field of every external word with the value of the use
    /// entry it indexes.
    pub fn resolve(self) -> Result<LinkedModule<Resolved>, Error> {
        let mut code = Vec::with_capacity(self.code.len());
        for cw in &self.code {
            if cw.mode != Mode::E {
                code.push(*cw);
                continue;
            }
            let value = self.use_values.get(cw.addr.field()).ok_or_else(|| {
                Error::ExternalAddressOutOfRange {
                    addr: cw.addr,
                    uses: self.use_values.len(),
                    loc: self.loc(),
                }
            })?;
            code.push(CodeWord::new(cw.mode, cw.addr.with_field(*value)?));
        }
        trace!("resolved module {}", self.number);
        Ok(self.advance(code))
    }
}

impl LinkedModule<Resolved> {
    pub fn addresses(&self) -> impl Iterator<Item = Word> + '_ {
        self.code.iter().map(|cw| cw.addr)
    }
}

impl fmt::Display for LinkedModule<Resolved> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Module {}", self.number)?;
        writeln!(f, "Base Address: {}", self.base)?;
        module::write_defs(f, &self.defs)?;
        module::write_uses(f, &self.uses)?;
        module::write_code(f, &self.code)
    }
}

/// Relocate then resolve one module against the global table.
pub fn link_module(module: &Module, table: &SymbolTable) -> Result<LinkedModule, Error> {
    LinkedModule::new(module, table)?.relocate()?.resolve()
}

/// Result of a successful link.
#[derive(Debug, Clone)]
pub struct Linked {
    modules: Vec<LinkedModule>,
    table: SymbolTable,
    warnings: Vec<Warning>,
}

impl Linked {
    pub fn modules(&self) -> &[LinkedModule] {
        &self.modules
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Number of modules linked.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Final memory image, in module then code order.
    pub fn addresses(&self) -> impl Iterator<Item = Word> + '_ {
        self.modules.iter().flat_map(LinkedModule::addresses)
    }
}

/// Link already parsed modules.
pub fn link_modules(modules: &[Module]) -> Result<Linked, Error> {
    let warnings = check::check(modules)?;
    debug!("checks passed with {} warning(s)", warnings.len());

    let table = SymbolTable::build(modules);
    debug!("symbol table built with {} symbol(s)", table.len());

    let linked = modules
        .iter()
        .map(|module| link_module(module, &table))
        .collect::<Result<Vec<_>, Error>>()?;
    debug!("{} module(s) linked", linked.len());

    Ok(Linked {
        modules: linked,
        table,
        warnings,
    })
}

/// Full pipeline: parse, check, build the symbol table, relocate and resolve.
pub fn link(text: &str) -> Result<Linked, Error> {
    let modules = module::parse(text)?;
    debug!("parsed {} module(s)", modules.len());
    link_modules(&modules)
}
