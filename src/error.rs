//! Error types for bscript-highlight

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors raised while building descriptors, registering languages, or
/// loading themes. Scanning itself never fails: any input yields a valid
/// span sequence.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("language {incoming:?} collides with registered language {existing:?} on key {key:?}")]
    DuplicateLanguage {
        /// The lookup key (lowercased name or alias) that is already taken
        key: String,
        /// Display name of the descriptor that holds the key
        existing: String,
        /// Display name of the descriptor that was being registered
        incoming: String,
    },

    #[error("malformed {bucket} vocabulary: {detail}")]
    MalformedVocabulary {
        /// Which bucket declaration failed ("keyword", "literal", "built_in")
        bucket: &'static str,
        detail: String,
    },

    #[error("{mode} marker must not be empty")]
    EmptyMarker {
        /// Which mode constructor rejected its marker
        mode: &'static str,
    },

    #[error("language name {0:?} is invalid")]
    InvalidName(String),

    #[error("language {language:?} has invalid alias {alias:?}")]
    InvalidAlias { language: String, alias: String },

    #[error("invalid mode pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("theme is not valid TOML: {0}")]
    ThemeSyntax(#[from] toml::de::Error),

    #[error("invalid theme: {0}")]
    Theme(String),
}
