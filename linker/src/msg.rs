use color_print::cformat;
use std::fmt;
use strum::Display;

use crate::error::Section;

/// Every condition the linker can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Kind {
    SyntaxError,
    MultiplyDefined,
    UndefinedSymbol,
    DefinitionExceedsModuleSize,
    ExternalAddressOutOfRange,
    AbsoluteAddressExceedsMachine,
    RelativeAddressExceedsModule,
    RelocatedAddressExceedsMachine,
    TotalSizeExceedsMachine,
    DefinedButUnused,
    UnusedUseEntry,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
}

impl Kind {
    pub fn level(&self) -> Level {
        match self {
            Kind::DefinedButUnused | Kind::UnusedUseEntry => Level::Warn,
            _ => Level::Error,
        }
    }
}

/// A single reportable message, independent of how it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: Kind,
    pub message: String,
    pub module: Option<usize>,
    pub section: Option<Section>,
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        self.kind.level()
    }

    /// Colored rendering for a terminal.
    pub fn cformat(&self) -> String {
        match self.level() {
            Level::Error => cformat!("<red,bold>error</>[{}]: {}", self.kind, self.message),
            Level::Warn => cformat!("<yellow,bold>warn</>[{}]: {}", self.kind, self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level() {
            Level::Error => write!(f, "error[{}]: {}", self.kind, self.message),
            Level::Warn => write!(f, "warn[{}]: {}", self.kind, self.message),
        }
    }
}
