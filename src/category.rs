//! Lexical categories for classified spans
//!
//! This module defines the fixed set of categories a scan can assign to
//! a span of source text and their default visual styles.

use crate::style::{Color, Style};

/// Lexical category assigned to a classified span
///
/// The set is fixed and exhaustive: the three vocabulary buckets, the three
/// mode-produced classes, and the plain-text fallback for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Control-flow and declaration words (if, for, func, ...)
    Keyword,
    /// Fixed literal words (true, false, null)
    Literal,
    /// Intrinsic type names recognized without import
    BuiltIn,
    /// Quoted string literals
    String,
    /// Numeric literals
    Number,
    /// Line and block comments
    Comment,
    /// Anything not matched by a mode or vocabulary bucket
    Plain,
}

impl Category {
    /// Every category, in vocabulary-priority-then-mode order
    pub const ALL: [Category; 7] = [
        Category::Keyword,
        Category::Literal,
        Category::BuiltIn,
        Category::String,
        Category::Number,
        Category::Comment,
        Category::Plain,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Keyword => Style::fg(Color::Magenta).with_bold(),
            Category::Literal => Style::fg(Color::BrightRed),
            Category::BuiltIn => Style::fg(Color::Yellow),
            Category::String => Style::fg(Color::Green),
            Category::Number => Style::fg(Color::Cyan),
            Category::Comment => Style::fg(Color::BrightBlack).with_italic(),
            Category::Plain => Style::default(),
        }
    }

    /// Get the canonical name for this category
    ///
    /// These are the bucket names used in vocabulary declarations and the
    /// table keys accepted by theme files.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Keyword => "keyword",
            Category::Literal => "literal",
            Category::BuiltIn => "built_in",
            Category::String => "string",
            Category::Number => "number",
            Category::Comment => "comment",
            Category::Plain => "plain",
        }
    }

    /// Parse a category from its canonical name (for theme loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "keyword" => Some(Category::Keyword),
            "literal" => Some(Category::Literal),
            "built_in" => Some(Category::BuiltIn),
            "string" => Some(Category::String),
            "number" => Some(Category::Number),
            "comment" => Some(Category::Comment),
            "plain" => Some(Category::Plain),
            _ => None,
        }
    }

    /// CSS class emitted for this category by the HTML renderer
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Keyword => "hl-keyword",
            Category::Literal => "hl-literal",
            Category::BuiltIn => "hl-built_in",
            Category::String => "hl-string",
            Category::Number => "hl-number",
            Category::Comment => "hl-comment",
            Category::Plain => "hl-plain",
        }
    }
}
