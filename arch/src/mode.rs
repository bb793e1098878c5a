use color_print::cformat;
use strum::{Display, EnumString};

/// Addressing mode tagging each code word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum Mode {
    /// Immediate operand, never rewritten
    I,
    /// Absolute address, already final
    A,
    /// Offset from the owning module's base address
    R,
    /// Index into the owning module's use list
    E,
}

impl Mode {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(m) => Ok(m),
            Err(_) => Err(format!("Unknown addressing mode: {s}")),
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Mode::I => cformat!("<y>I</>"),
            Mode::A => cformat!("<c>A</>"),
            Mode::R => cformat!("<g>R</>"),
            Mode::E => cformat!("<m>E</>"),
        }
    }
}
