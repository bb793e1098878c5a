pub mod mode;
pub mod word;

pub use mode::Mode;
pub use word::{Word, WordError};

/// Number of addressable words in the target machine.
pub const MACHINE_SIZE: usize = 600;

/// Every address in a code section is written with exactly this many digits.
pub const WORD_WIDTH: usize = 4;

/// Exclusive upper bound of the 3-digit address field.
pub const FIELD_LIMIT: usize = 1000;
