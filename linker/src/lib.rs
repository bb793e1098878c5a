mod check;
mod config;
mod display;
mod error;
mod files;
mod link;
mod module;
mod msg;
mod symbols;
mod token;

pub use check::errors;
pub use check::warnings::{self, Warning};
pub use config::Config;
pub use display::{file_content, human, human_colored, output, warnings as warning_text};
pub use error::{Error, Loc, Section, SyntaxError};
pub use files::{check_input, check_output, keep_both, next_copy_index};
pub use link::{link, link_module, link_modules, Linked, LinkedModule, Pending, Relocated, Resolved};
pub use module::{parse, split, CodeWord, Def, Module, RawModule};
pub use msg::{Diagnostic, Kind, Level};
pub use symbols::SymbolTable;
pub use token::Tokens;
