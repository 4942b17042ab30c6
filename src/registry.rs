//! The language registry
//!
//! A registry owns the mode library and every registered descriptor.
//! Names and aliases share one case-insensitive key space. Registration
//! is atomic: a collision on any key is reported with both language names
//! and leaves the registry exactly as it was.

use std::collections::HashMap;

use crate::builtin;
use crate::error::{HighlightError, Result};
use crate::language::LanguageDescriptor;
use crate::modes::ModeLibrary;
use crate::scanner::Scanner;

/// All languages known to one highlighting setup
///
/// Build and populate the registry during startup, then share it behind
/// an `Arc` or a `&`; every lookup and scan takes `&self`.
pub struct Registry {
    /// Registered languages, in registration order
    languages: Vec<LanguageDescriptor>,
    /// Lowercased name and alias keys, each pointing into `languages`
    keys: HashMap<String, usize>,
    modes: ModeLibrary,
}

impl Registry {
    /// Create an empty registry with a freshly compiled mode library
    pub fn new() -> Result<Self> {
        Ok(Self {
            languages: Vec::new(),
            keys: HashMap::new(),
            modes: ModeLibrary::new()?,
        })
    }

    /// Create a registry preloaded with every bundled language
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new()?;
        for language in builtin::all_languages(registry.modes())? {
            registry.register(language)?;
        }
        Ok(registry)
    }

    /// The shared mode library descriptors draw their modes from
    pub fn modes(&self) -> &ModeLibrary {
        &self.modes
    }

    /// Register a language under its name and every alias
    ///
    /// Every key is checked before any is inserted, so a rejected
    /// language leaves no partial entries behind.
    pub fn register(&mut self, language: LanguageDescriptor) -> Result<()> {
        let keys = language.lookup_keys();
        for key in &keys {
            if let Some(&index) = self.keys.get(key) {
                return Err(HighlightError::DuplicateLanguage {
                    key: key.clone(),
                    existing: self.languages[index].name().to_string(),
                    incoming: language.name().to_string(),
                });
            }
        }
        let index = self.languages.len();
        self.languages.push(language);
        for key in keys {
            self.keys.insert(key, index);
        }
        Ok(())
    }

    /// Build a language against this registry's mode library and register it
    pub fn register_language<F>(&mut self, define: F) -> Result<()>
    where
        F: FnOnce(&ModeLibrary) -> Result<LanguageDescriptor>,
    {
        let language = define(&self.modes)?;
        self.register(language)
    }

    /// Look up a language by name or alias, case-insensitively
    pub fn resolve(&self, key: &str) -> Option<&LanguageDescriptor> {
        self.keys
            .get(&key.to_lowercase())
            .map(|&index| &self.languages[index])
    }

    /// Scan a document in the named language
    ///
    /// `None` means no registered language matches the key.
    pub fn scan<'a>(&'a self, key: &str, document: &'a str) -> Option<Scanner<'a>> {
        self.resolve(key).map(|language| language.scan(document))
    }

    /// Display names of every registered language, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.iter().map(|l| l.name()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered languages
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Check if no language is registered
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
