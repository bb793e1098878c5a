pub mod errors;
pub mod warnings;

pub use warnings::Warning;

use crate::error::Error;
use crate::module::Module;

/// Fatal rules first; warnings are only collected once every rule passes.
pub fn check(modules: &[Module]) -> Result<Vec<Warning>, Error> {
    errors::check(modules)?;
    Ok(warnings::collect(modules))
}
