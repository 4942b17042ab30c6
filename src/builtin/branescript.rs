//! BraneScript, the workflow language of the Brane framework

use crate::error::Result;
use crate::language::LanguageDescriptor;
use crate::modes::ModeLibrary;

/// The BraneScript workflow language
///
/// Resolvable as `bs`, `bscript` or `branescript`. The built-ins are the
/// two intermediate data classes a workflow passes between tasks.
pub fn branescript(modes: &ModeLibrary) -> Result<LanguageDescriptor> {
    LanguageDescriptor::builder("BraneScript")
        .alias("bs")
        .alias("bscript")
        .alias("branescript")
        .keywords("break class continue else for func if import let new on parallel return while")
        .literals("true false null")
        .built_ins("Data IntermediateResult")
        .expect_counts(14, 3, 2)
        .mode(modes.quoted_string())
        .mode(modes.number())
        .mode(modes.line_comment())
        .mode(modes.block_comment())
        .build()
}
