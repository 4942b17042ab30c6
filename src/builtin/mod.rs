//! Bundled language definitions
//!
//! Each language lives in its own module as a factory taking the mode
//! library it wires its descriptor from.

mod branescript;

pub use branescript::branescript;

use crate::error::Result;
use crate::language::LanguageDescriptor;
use crate::modes::ModeLibrary;

/// Every bundled language, built against the given mode library
pub fn all_languages(modes: &ModeLibrary) -> Result<Vec<LanguageDescriptor>> {
    Ok(vec![branescript(modes)?])
}
