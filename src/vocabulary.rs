//! Classified word lists for a language descriptor
//!
//! A descriptor declares its vocabulary as up to three space-joined word
//! lists. Parsing is strict: a malformed declaration fails descriptor
//! construction instead of silently producing a vocabulary that matches
//! the wrong words.

use std::collections::HashSet;

use crate::category::Category;
use crate::error::{HighlightError, Result};

/// The vocabulary of one language, split into three buckets
///
/// The buckets share a single lookup. A word listed in more than one
/// bucket classifies by fixed priority: keyword over literal over
/// built-in.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    keywords: HashSet<String>,
    literals: HashSet<String>,
    built_ins: HashSet<String>,
}

impl Vocabulary {
    /// Parse bucket declarations into a vocabulary
    ///
    /// Each declaration is a list of words joined by single spaces. An
    /// omitted declaration leaves its bucket empty; an empty or doubled
    /// separator and a word repeated within one bucket are rejected.
    pub fn from_declarations(
        keywords: Option<&str>,
        literals: Option<&str>,
        built_ins: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            keywords: parse_bucket("keyword", keywords)?,
            literals: parse_bucket("literal", literals)?,
            built_ins: parse_bucket("built_in", built_ins)?,
        })
    }

    /// Classify a word
    ///
    /// Matching is exact and case-sensitive. Priority when buckets
    /// overlap: keyword, then literal, then built-in.
    pub fn lookup(&self, word: &str) -> Option<Category> {
        if self.keywords.contains(word) {
            Some(Category::Keyword)
        } else if self.literals.contains(word) {
            Some(Category::Literal)
        } else if self.built_ins.contains(word) {
            Some(Category::BuiltIn)
        } else {
            None
        }
    }

    /// Number of keyword words
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Number of literal words
    pub fn literal_count(&self) -> usize {
        self.literals.len()
    }

    /// Number of built-in words
    pub fn built_in_count(&self) -> usize {
        self.built_ins.len()
    }

    /// Check if every bucket is empty
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.literals.is_empty() && self.built_ins.is_empty()
    }
}

/// Split one declaration into its word set
fn parse_bucket(bucket: &'static str, declaration: Option<&str>) -> Result<HashSet<String>> {
    let mut words = HashSet::new();
    let Some(declaration) = declaration else {
        return Ok(words);
    };
    for word in declaration.split(' ') {
        if word.is_empty() {
            return Err(HighlightError::MalformedVocabulary {
                bucket,
                detail: format!("empty word in declaration {declaration:?}"),
            });
        }
        if !words.insert(word.to_string()) {
            return Err(HighlightError::MalformedVocabulary {
                bucket,
                detail: format!("word {word:?} listed twice"),
            });
        }
    }
    Ok(words)
}
