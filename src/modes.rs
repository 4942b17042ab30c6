//! Lexical modes for the scanning engine
//!
//! A mode is a small reusable matcher for one construct (quoted string,
//! number, line comment, block comment). The engine owns the standard
//! modes; language descriptors reference them through [`ModeLibrary`] and
//! never define one from scratch.

use std::sync::Arc;

use regex::Regex;

use crate::category::Category;
use crate::error::{HighlightError, Result};

/// Outcome of advancing a mode through the body of its construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEnd {
    /// The terminator was found; offset just past it
    Closed(usize),
    /// The input, or the line for line-bounded modes, ran out before the
    /// terminator; offset where scanning stopped
    Open(usize),
}

impl ModeEnd {
    /// The offset where the span ends, terminated or not
    pub fn offset(&self) -> usize {
        match self {
            ModeEnd::Closed(end) | ModeEnd::Open(end) => *end,
        }
    }

    /// Whether the construct found its terminator
    pub fn is_closed(&self) -> bool {
        matches!(self, ModeEnd::Closed(_))
    }
}

/// A lexical sub-pattern matcher
///
/// Each mode is a state machine with its own start and end conditions.
/// Modes are tried in the order a descriptor lists them; the first mode
/// whose start condition matches at the scan position wins.
pub trait Mode: Send + Sync {
    /// Name for debugging
    fn name(&self) -> &'static str;

    /// Category assigned to spans this mode produces
    fn category(&self) -> Category;

    /// Where this mode's start condition matches at `pos`, the offset just
    /// past the start marker
    fn try_start(&self, text: &str, pos: usize) -> Option<usize>;

    /// Advance from just past the start marker to the end of the span
    fn try_end(&self, text: &str, pos: usize) -> ModeEnd;

    /// Resume scanning inside an already-open construct
    ///
    /// Used by the line scanner when a construct carried over from the
    /// previous line.
    fn try_continue(&self, text: &str, pos: usize) -> ModeEnd {
        self.try_end(text, pos)
    }

    /// Whether an open construct carries into the next line
    fn spans_lines(&self) -> bool {
        false
    }
}

/// Shared handle to a mode
///
/// One compiled mode serves every descriptor that lists it and any number
/// of concurrent scans.
pub type ModeRef = Arc<dyn Mode>;

/// Quoted string literal, single-line
///
/// Starts at the quote character. An escape-prefixed character (including
/// an escaped quote) never terminates. Ends at the matching unescaped
/// quote; a bare newline ends the span without terminating it, so an
/// unterminated string never leaks past its line.
pub struct QuotedStringMode {
    quote: char,
    escape: Option<char>,
}

impl QuotedStringMode {
    /// Create a string mode without escape support
    pub fn new(quote: char) -> Self {
        Self {
            quote,
            escape: None,
        }
    }

    /// Create a string mode with an escape character (usually backslash)
    pub fn with_escape(quote: char, escape: char) -> Self {
        Self {
            quote,
            escape: Some(escape),
        }
    }
}

impl Mode for QuotedStringMode {
    fn name(&self) -> &'static str {
        "quoted_string"
    }

    fn category(&self) -> Category {
        Category::String
    }

    fn try_start(&self, text: &str, pos: usize) -> Option<usize> {
        text[pos..]
            .starts_with(self.quote)
            .then(|| pos + self.quote.len_utf8())
    }

    fn try_end(&self, text: &str, pos: usize) -> ModeEnd {
        let mut chars = text[pos..].char_indices();
        while let Some((off, ch)) = chars.next() {
            if Some(ch) == self.escape {
                // Escaped character, whatever it is, stays inside the string
                chars.next();
            } else if ch == self.quote {
                return ModeEnd::Closed(pos + off + ch.len_utf8());
            } else if ch == '\n' {
                return ModeEnd::Open(pos + off);
            }
        }
        ModeEnd::Open(text.len())
    }
}

/// Numeric literal: integer or decimal run with optional exponent
pub struct NumberMode {
    pattern: Regex,
}

impl NumberMode {
    /// Compile the default numeric grammar
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"^\d+(\.\d+)?([eE][+-]?\d+)?")?,
        })
    }
}

impl Mode for NumberMode {
    fn name(&self) -> &'static str {
        "number"
    }

    fn category(&self) -> Category {
        Category::Number
    }

    fn try_start(&self, text: &str, pos: usize) -> Option<usize> {
        // Anchored pattern, so a find on the tail only matches at pos
        self.pattern.find(&text[pos..]).map(|m| pos + m.end())
    }

    fn try_end(&self, _text: &str, pos: usize) -> ModeEnd {
        // The start match consumes the whole literal
        ModeEnd::Closed(pos)
    }
}

/// Line comment: marker to end of line
pub struct LineCommentMode {
    marker: String,
}

impl LineCommentMode {
    /// Create a line comment mode with the given start marker
    ///
    /// An empty marker would match at every position without consuming
    /// anything, so it is rejected.
    pub fn new(marker: &str) -> Result<Self> {
        if marker.is_empty() {
            return Err(HighlightError::EmptyMarker {
                mode: "line_comment",
            });
        }
        Ok(Self {
            marker: marker.to_string(),
        })
    }
}

impl Mode for LineCommentMode {
    fn name(&self) -> &'static str {
        "line_comment"
    }

    fn category(&self) -> Category {
        Category::Comment
    }

    fn try_start(&self, text: &str, pos: usize) -> Option<usize> {
        text[pos..]
            .starts_with(&self.marker)
            .then(|| pos + self.marker.len())
    }

    fn try_end(&self, text: &str, pos: usize) -> ModeEnd {
        // End of line or end of input both satisfy the end condition;
        // the newline itself is not part of the comment
        match text[pos..].find('\n') {
            Some(off) => ModeEnd::Closed(pos + off),
            None => ModeEnd::Closed(text.len()),
        }
    }
}

/// Block comment: open marker to the matching close marker
///
/// An unterminated block comment consumes the remainder of the document.
/// That is documented behavior, not an error: the scan still completes and
/// the remainder becomes one comment span.
pub struct BlockCommentMode {
    open: String,
    close: String,
}

impl BlockCommentMode {
    /// Create a block comment mode with the given open/close markers
    ///
    /// Both markers must be non-empty.
    pub fn new(open: &str, close: &str) -> Result<Self> {
        if open.is_empty() || close.is_empty() {
            return Err(HighlightError::EmptyMarker {
                mode: "block_comment",
            });
        }
        Ok(Self {
            open: open.to_string(),
            close: close.to_string(),
        })
    }
}

impl Mode for BlockCommentMode {
    fn name(&self) -> &'static str {
        "block_comment"
    }

    fn category(&self) -> Category {
        Category::Comment
    }

    fn try_start(&self, text: &str, pos: usize) -> Option<usize> {
        text[pos..]
            .starts_with(&self.open)
            .then(|| pos + self.open.len())
    }

    fn try_end(&self, text: &str, pos: usize) -> ModeEnd {
        match text[pos..].find(&self.close) {
            Some(off) => ModeEnd::Closed(pos + off + self.close.len()),
            None => ModeEnd::Open(text.len()),
        }
    }

    fn spans_lines(&self) -> bool {
        true
    }
}

/// Scanner state carried between consecutive line scans
///
/// Only modes that span lines (block comments in this grammar) ever leave
/// a scan in a non-normal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineState {
    /// Index into the descriptor's mode list, when a construct is open
    mode: Option<usize>,
}

impl LineState {
    /// Create state for being inside an open construct
    pub fn inside(mode_index: usize) -> Self {
        Self {
            mode: Some(mode_index),
        }
    }

    /// Index of the open construct's mode, if any
    pub fn mode_index(&self) -> Option<usize> {
        self.mode
    }

    /// Check if a construct is open
    pub fn is_inside_mode(&self) -> bool {
        self.mode.is_some()
    }

    /// Check if the scan ended outside every construct
    pub fn is_normal(&self) -> bool {
        self.mode.is_none()
    }
}

/// The engine's standard mode library
///
/// Descriptor factories receive a reference to the library and wire shared
/// mode references into their ordered mode lists. This is the boundary
/// that keeps language definitions free of mode implementation detail.
pub struct ModeLibrary {
    quoted_string: ModeRef,
    number: ModeRef,
    line_comment: ModeRef,
    block_comment: ModeRef,
}

impl ModeLibrary {
    /// Compile the standard modes
    pub fn new() -> Result<Self> {
        Ok(Self {
            quoted_string: Arc::new(QuotedStringMode::with_escape('"', '\\')),
            number: Arc::new(NumberMode::new()?),
            line_comment: Arc::new(LineCommentMode::new("//")?),
            block_comment: Arc::new(BlockCommentMode::new("/*", "*/")?),
        })
    }

    /// Double-quoted single-line string with backslash escapes
    pub fn quoted_string(&self) -> ModeRef {
        Arc::clone(&self.quoted_string)
    }

    /// Integer/decimal numeric literal with optional exponent
    pub fn number(&self) -> ModeRef {
        Arc::clone(&self.number)
    }

    /// `//` comment to end of line
    pub fn line_comment(&self) -> ModeRef {
        Arc::clone(&self.line_comment)
    }

    /// `/* ... */` comment, line-spanning
    pub fn block_comment(&self) -> ModeRef {
        Arc::clone(&self.block_comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_string_simple() {
        let mode = QuotedStringMode::with_escape('"', '\\');
        assert_eq!(mode.try_start(r#""hello""#, 0), Some(1));
        assert_eq!(mode.try_start("no quote", 0), None);
        assert_eq!(mode.try_end(r#""hello""#, 1), ModeEnd::Closed(7));
    }

    #[test]
    fn test_quoted_string_escaped_quote() {
        // "a\"b" is one literal, the inner quote does not terminate
        let text = r#""a\"b""#;
        let mode = QuotedStringMode::with_escape('"', '\\');
        assert_eq!(mode.try_start(text, 0), Some(1));
        assert_eq!(mode.try_end(text, 1), ModeEnd::Closed(text.len()));
    }

    #[test]
    fn test_quoted_string_line_bounded() {
        let text = "\"open\nnext line";
        let mode = QuotedStringMode::with_escape('"', '\\');
        // The span stops at the newline without terminating
        assert_eq!(mode.try_end(text, 1), ModeEnd::Open(5));
        assert!(!mode.spans_lines());
    }

    #[test]
    fn test_quoted_string_unterminated_at_end() {
        let mode = QuotedStringMode::with_escape('"', '\\');
        assert_eq!(mode.try_end("\"abc", 1), ModeEnd::Open(4));
    }

    #[test]
    fn test_number_forms() {
        let mode = NumberMode::new().unwrap();
        assert_eq!(mode.try_start("42", 0), Some(2));
        assert_eq!(mode.try_start("3.14", 0), Some(4));
        assert_eq!(mode.try_start("6.02e23", 0), Some(7));
        assert_eq!(mode.try_start("1.5E-3", 0), Some(6));
        assert_eq!(mode.try_start("x = 42;", 4), Some(6));
        assert_eq!(mode.try_start("abc", 0), None);
    }

    #[test]
    fn test_number_partial_forms() {
        let mode = NumberMode::new().unwrap();
        // Trailing dot and dangling exponent are not part of the literal
        assert_eq!(mode.try_start("1.", 0), Some(1));
        assert_eq!(mode.try_start("1.5e", 0), Some(3));
    }

    #[test]
    fn test_line_comment() {
        let mode = LineCommentMode::new("//").unwrap();
        assert_eq!(mode.try_start("// note", 0), Some(2));
        assert_eq!(mode.try_start("/ not", 0), None);
        assert_eq!(mode.try_end("// note\ncode", 2), ModeEnd::Closed(7));
        assert_eq!(mode.try_end("// eof", 2), ModeEnd::Closed(6));
    }

    #[test]
    fn test_block_comment() {
        let mode = BlockCommentMode::new("/*", "*/").unwrap();
        assert_eq!(mode.try_start("/* x */", 0), Some(2));
        assert_eq!(mode.try_end("/* x */", 2), ModeEnd::Closed(7));
        assert!(mode.spans_lines());
    }

    #[test]
    fn test_block_comment_unterminated() {
        let mode = BlockCommentMode::new("/*", "*/").unwrap();
        assert_eq!(mode.try_end("/* abc", 2), ModeEnd::Open(6));
    }

    #[test]
    fn test_block_comment_continue() {
        let mode = BlockCommentMode::new("/*", "*/").unwrap();
        // Resuming on a fresh line that closes the construct
        assert_eq!(mode.try_continue("end */ code", 0), ModeEnd::Closed(6));
        assert_eq!(mode.try_continue("still open", 0), ModeEnd::Open(10));
    }

    #[test]
    fn test_empty_markers_rejected() {
        assert!(matches!(
            LineCommentMode::new("").err(),
            Some(HighlightError::EmptyMarker { mode: "line_comment" })
        ));
        assert!(BlockCommentMode::new("", "*/").is_err());
        assert!(BlockCommentMode::new("/*", "").is_err());
    }

    #[test]
    fn test_line_state() {
        let normal = LineState::default();
        assert!(normal.is_normal());
        assert!(!normal.is_inside_mode());

        let inside = LineState::inside(3);
        assert!(!inside.is_normal());
        assert!(inside.is_inside_mode());
        assert_eq!(inside.mode_index(), Some(3));
    }

    #[test]
    fn test_library_modes() {
        let library = ModeLibrary::new().unwrap();
        assert_eq!(library.quoted_string().category(), Category::String);
        assert_eq!(library.number().category(), Category::Number);
        assert_eq!(library.line_comment().category(), Category::Comment);
        assert_eq!(library.block_comment().category(), Category::Comment);
    }
}
