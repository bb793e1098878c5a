use arch::{Mode, Word, WordError};
use std::fmt;
use strum::Display;
use thiserror::Error;

use crate::msg::{Diagnostic, Kind};

/// The three sections every module is made of, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Section {
    #[strum(serialize = "Def list")]
    Def,
    #[strum(serialize = "Use list")]
    Use,
    #[strum(serialize = "Code")]
    Code,
}

/// Module number (1-based) and section a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loc {
    pub module: usize,
    pub section: Section,
}

impl Loc {
    pub fn new(module: usize, section: Section) -> Self {
        Loc { module, section }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Module {}: {}", self.module, self.section)
    }
}

// Malformed input, detected before any link rule runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("invalid starting index `{found}` for {loc}, must be a non-negative integer")]
    InvalidCount { found: String, loc: Loc },

    #[error("unexpected end of input in {loc}, {missing} more token(s) expected")]
    Truncated { loc: Loc, missing: usize },

    // Negative values are rejected as well: a definition is an offset into
    // its own module and cannot point below the module base.
    #[error("invalid value `{value}` for symbol {symbol} ({loc}), must be a non-negative integer")]
    InvalidValue {
        symbol: String,
        value: String,
        loc: Loc,
    },

    #[error("invalid addressing mode `{mode}` ({loc}), must be one of I, A, R, E")]
    InvalidMode { mode: String, loc: Loc },

    #[error("invalid address `{addr}` for {mode} ({loc}), must be an integer")]
    NonNumericAddress { mode: Mode, addr: String, loc: Loc },

    #[error("invalid address `{addr}` for {mode} ({loc}), must be a 4-digit word")]
    AddressWidth { mode: Mode, addr: String, loc: Loc },
}

impl SyntaxError {
    pub fn loc(&self) -> Loc {
        match self {
            SyntaxError::InvalidCount { loc, .. }
            | SyntaxError::Truncated { loc, .. }
            | SyntaxError::InvalidValue { loc, .. }
            | SyntaxError::InvalidMode { loc, .. }
            | SyntaxError::NonNumericAddress { loc, .. }
            | SyntaxError::AddressWidth { loc, .. } => *loc,
        }
    }

    pub(crate) fn from_word(err: WordError, mode: Mode, addr: &str, loc: Loc) -> Self {
        match err {
            WordError::Width(_) => SyntaxError::AddressWidth {
                mode,
                addr: addr.to_string(),
                loc,
            },
            WordError::NotNumeric(_) | WordError::FieldOverflow(_) => {
                SyntaxError::NonNumericAddress {
                    mode,
                    addr: addr.to_string(),
                    loc,
                }
            }
        }
    }
}

fn external_reason(uses: &usize) -> &'static str {
    if *uses == 0 {
        "is unable to reference any entry because the use list is empty"
    } else {
        "is too large to reference an entry in the use list"
    }
}

// Unified error type for the linker
#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("{symbol} multiply defined ({loc})")]
    MultiplyDefined { symbol: String, loc: Loc },

    #[error("{symbol} used but not defined ({loc})")]
    UndefinedSymbol { symbol: String, loc: Loc },

    #[error("address {value} of {symbol} exceeds the module size of {size} ({loc})")]
    DefinitionExceedsModuleSize {
        symbol: String,
        value: usize,
        size: usize,
        loc: Loc,
    },

    #[error("external address {addr} {} ({loc})", external_reason(.uses))]
    ExternalAddressOutOfRange { addr: Word, uses: usize, loc: Loc },

    #[error("absolute address {addr} exceeds the size of the machine ({loc})")]
    AbsoluteAddressExceedsMachine { addr: Word, loc: Loc },

    #[error("relative address {addr} exceeds the module size of {size} ({loc})")]
    RelativeAddressExceedsModule { addr: Word, size: usize, loc: Loc },

    #[error("relocated absolute address {relocated:04} (original R address: {original}) exceeds the size of the machine ({loc})")]
    RelocatedAddressExceedsMachine {
        relocated: usize,
        original: Word,
        loc: Loc,
    },

    #[error("the summed size of all modules, which is {total}, exceeds the size of the machine")]
    TotalSizeExceedsMachine { total: usize },

    #[error(transparent)]
    Word(#[from] WordError),

    // Errors raised by the command-line front end
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("{0}")]
    Path(String),
}

impl Error {
    pub fn kind(&self) -> Kind {
        match self {
            Error::Syntax(_) => Kind::SyntaxError,
            Error::MultiplyDefined { .. } => Kind::MultiplyDefined,
            Error::UndefinedSymbol { .. } => Kind::UndefinedSymbol,
            Error::DefinitionExceedsModuleSize { .. } => Kind::DefinitionExceedsModuleSize,
            Error::ExternalAddressOutOfRange { .. } => Kind::ExternalAddressOutOfRange,
            Error::AbsoluteAddressExceedsMachine { .. } => Kind::AbsoluteAddressExceedsMachine,
            Error::RelativeAddressExceedsModule { .. } => Kind::RelativeAddressExceedsModule,
            Error::RelocatedAddressExceedsMachine { .. } => Kind::RelocatedAddressExceedsMachine,
            Error::TotalSizeExceedsMachine { .. } => Kind::TotalSizeExceedsMachine,
            Error::Word(_) => Kind::SyntaxError,
            Error::Io(_) | Error::Config(_) | Error::Path(_) => Kind::Io,
        }
    }

    pub fn loc(&self) -> Option<Loc> {
        match self {
            Error::Syntax(e) => Some(e.loc()),
            Error::MultiplyDefined { loc, .. }
            | Error::UndefinedSymbol { loc, .. }
            | Error::DefinitionExceedsModuleSize { loc, .. }
            | Error::ExternalAddressOutOfRange { loc, .. }
            | Error::AbsoluteAddressExceedsMachine { loc, .. }
            | Error::RelativeAddressExceedsModule { loc, .. }
            | Error::RelocatedAddressExceedsMachine { loc, .. } => Some(*loc),
            _ => None,
        }
    }

    pub fn module(&self) -> Option<usize> {
        self.loc().map(|loc| loc.module)
    }

    pub fn section(&self) -> Option<Section> {
        self.loc().map(|loc| loc.section)
    }

    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic {
            kind: self.kind(),
            message: self.to_string(),
            module: self.module(),
            section: self.section(),
        }
    }
}
