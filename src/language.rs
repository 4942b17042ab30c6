//! Language descriptors
//!
//! A descriptor is pure data: a display name, lookup aliases, a
//! vocabulary, and an ordered list of shared mode references. All
//! validation happens when the descriptor is built, so a language that
//! made it into a registry can never fail mid-scan.

use std::fmt;

use crate::error::{HighlightError, Result};
use crate::modes::{LineState, ModeRef};
use crate::scanner::{LineScan, Scanner};
use crate::vocabulary::Vocabulary;

/// A complete, validated language definition
pub struct LanguageDescriptor {
    name: String,
    aliases: Vec<String>,
    vocabulary: Vocabulary,
    modes: Vec<ModeRef>,
}

impl LanguageDescriptor {
    /// Start building a descriptor with the given display name
    pub fn builder(name: &str) -> LanguageBuilder {
        LanguageBuilder::new(name)
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate lookup names
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The classified word lists
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The mode list, in matching order
    pub fn modes(&self) -> &[ModeRef] {
        &self.modes
    }

    /// Every key this language resolves under, lowercased and deduplicated
    pub fn lookup_keys(&self) -> Vec<String> {
        let mut keys = vec![self.name.to_lowercase()];
        for alias in &self.aliases {
            let key = alias.to_lowercase();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Scan a whole document
    ///
    /// Returns a lazy iterator of classified spans covering every byte of
    /// the document in order.
    pub fn scan<'a>(&'a self, document: &'a str) -> Scanner<'a> {
        Scanner::new(self, document)
    }

    /// Scan a single line, resuming from the state the previous line
    /// ended in
    ///
    /// Feed the returned end state into the next line's scan to carry
    /// line-spanning constructs forward.
    pub fn scan_line(&self, line: &str, state: LineState) -> LineScan {
        Scanner::with_state(self, line, state).collect_line()
    }
}

impl fmt::Debug for LanguageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Modes are trait objects; show their names instead
        let modes: Vec<_> = self.modes.iter().map(|m| m.name()).collect();
        f.debug_struct("LanguageDescriptor")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("vocabulary", &self.vocabulary)
            .field("modes", &modes)
            .finish()
    }
}

/// Builder for [`LanguageDescriptor`]
///
/// Vocabulary buckets are declared as space-joined word lists; an omitted
/// bucket stays empty. `expect_counts` pins the parsed bucket sizes so a
/// missing separator in a long declaration fails construction instead of
/// silently merging two words.
pub struct LanguageBuilder {
    name: String,
    aliases: Vec<String>,
    keywords: Option<String>,
    literals: Option<String>,
    built_ins: Option<String>,
    modes: Vec<ModeRef>,
    expected_counts: Option<(usize, usize, usize)>,
}

impl LanguageBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            keywords: None,
            literals: None,
            built_ins: None,
            modes: Vec::new(),
            expected_counts: None,
        }
    }

    /// Add an alternate lookup name
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Declare the keyword bucket
    pub fn keywords(mut self, declaration: &str) -> Self {
        self.keywords = Some(declaration.to_string());
        self
    }

    /// Declare the literal bucket
    pub fn literals(mut self, declaration: &str) -> Self {
        self.literals = Some(declaration.to_string());
        self
    }

    /// Declare the built-in bucket
    pub fn built_ins(mut self, declaration: &str) -> Self {
        self.built_ins = Some(declaration.to_string());
        self
    }

    /// Append a mode to the ordered mode list
    pub fn mode(mut self, mode: ModeRef) -> Self {
        self.modes.push(mode);
        self
    }

    /// Pin the expected word count of each bucket
    pub fn expect_counts(mut self, keywords: usize, literals: usize, built_ins: usize) -> Self {
        self.expected_counts = Some((keywords, literals, built_ins));
        self
    }

    /// Validate everything and produce the descriptor
    pub fn build(self) -> Result<LanguageDescriptor> {
        if self.name.is_empty() {
            return Err(HighlightError::InvalidName(self.name));
        }
        for alias in &self.aliases {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(HighlightError::InvalidAlias {
                    language: self.name.clone(),
                    alias: alias.clone(),
                });
            }
        }
        let vocabulary = Vocabulary::from_declarations(
            self.keywords.as_deref(),
            self.literals.as_deref(),
            self.built_ins.as_deref(),
        )?;
        if let Some((keywords, literals, built_ins)) = self.expected_counts {
            check_count("keyword", vocabulary.keyword_count(), keywords)?;
            check_count("literal", vocabulary.literal_count(), literals)?;
            check_count("built_in", vocabulary.built_in_count(), built_ins)?;
        }
        Ok(LanguageDescriptor {
            name: self.name,
            aliases: self.aliases,
            vocabulary,
            modes: self.modes,
        })
    }
}

fn check_count(bucket: &'static str, found: usize, expected: usize) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(HighlightError::MalformedVocabulary {
            bucket,
            detail: format!("expected {expected} words, found {found}"),
        })
    }
}
