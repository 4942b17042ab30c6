//! The scanning engine
//!
//! Scanning walks a document left to right. At each position the
//! descriptor's modes are tried in listed order and the first start match
//! wins; failing that, an identifier run is read and classified against
//! the vocabulary; anything else joins the current plain run. Spans are
//! produced lazily and tile the input exactly: every byte lands in
//! exactly one span and consecutive plain bytes always share one.

use crate::category::Category;
use crate::language::LanguageDescriptor;
use crate::modes::LineState;

/// One classified region of the scanned text
///
/// `start` and `end` are byte offsets into the scanned text, always on
/// character boundaries, with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedSpan {
    pub start: usize,
    pub end: usize,
    pub category: Category,
}

impl ClassifiedSpan {
    /// Create a span covering `start..end`
    pub fn new(start: usize, end: usize, category: Category) -> Self {
        Self {
            start,
            end,
            category,
        }
    }

    /// The slice of the scanned text this span covers
    pub fn text<'a>(&self, document: &'a str) -> &'a str {
        &document[self.start..self.end]
    }
}

/// Lazy span iterator over one document or line
///
/// Holds only the scan position and at most one buffered span, so
/// consuming a handful of spans from a large document does not pay for
/// the rest.
pub struct Scanner<'a> {
    language: &'a LanguageDescriptor,
    text: &'a str,
    /// Next unconsumed byte offset
    pos: usize,
    /// Start of the open plain run, if one is accumulating
    plain_start: Option<usize>,
    /// Classified span held back until the plain run before it is emitted
    pending: Option<ClassifiedSpan>,
    /// Carried-in state, consumed by the first step
    state: LineState,
    end_state: LineState,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(language: &'a LanguageDescriptor, text: &'a str) -> Self {
        Self::with_state(language, text, LineState::default())
    }

    pub(crate) fn with_state(
        language: &'a LanguageDescriptor,
        text: &'a str,
        state: LineState,
    ) -> Self {
        Self {
            language,
            text,
            pos: 0,
            plain_start: None,
            pending: None,
            state,
            end_state: LineState::default(),
        }
    }

    /// State the scan ended in, meaningful once the iterator is exhausted
    ///
    /// Feed this into the next line's scan to carry an open line-spanning
    /// construct forward.
    pub fn end_state(&self) -> LineState {
        self.end_state
    }

    pub(crate) fn collect_line(mut self) -> LineScan {
        let mut spans = Vec::new();
        for span in &mut self {
            spans.push(span);
        }
        LineScan {
            spans,
            end_state: self.end_state(),
        }
    }

    /// Route `span` out, flushing the plain run accumulated before it
    fn emit(&mut self, span: ClassifiedSpan) -> ClassifiedSpan {
        match self.plain_start.take() {
            Some(plain_start) => {
                self.pending = Some(span);
                ClassifiedSpan::new(plain_start, span.start, Category::Plain)
            }
            None => span,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ClassifiedSpan;

    fn next(&mut self) -> Option<ClassifiedSpan> {
        if let Some(span) = self.pending.take() {
            return Some(span);
        }
        let language = self.language;
        let text = self.text;
        while self.pos < text.len() {
            // Resume a construct carried over from the previous line.
            // This runs before anything else, so no plain run is open yet.
            if let Some(index) = self.state.mode_index() {
                self.state = LineState::default();
                if let Some(mode) = language.modes().get(index) {
                    let start = self.pos;
                    let end = mode.try_continue(text, start);
                    if end.offset() > start {
                        self.pos = end.offset();
                        if !end.is_closed() && mode.spans_lines() {
                            self.end_state = LineState::inside(index);
                        }
                        return Some(ClassifiedSpan::new(start, self.pos, mode.category()));
                    }
                }
            }

            // First mode whose start condition matches wins. A match that
            // cannot form a non-empty span is skipped, so a misbehaving
            // mode can never wedge the scan in place.
            let mut matched = None;
            for (index, mode) in language.modes().iter().enumerate() {
                if let Some(body) = mode.try_start(text, self.pos) {
                    let end = mode.try_end(text, body);
                    if end.offset() > self.pos {
                        matched = Some((index, mode, end));
                        break;
                    }
                }
            }
            if let Some((index, mode, end)) = matched {
                let start = self.pos;
                self.pos = end.offset();
                if !end.is_closed() && mode.spans_lines() {
                    self.end_state = LineState::inside(index);
                }
                return Some(self.emit(ClassifiedSpan::new(start, self.pos, mode.category())));
            }

            let rest = &text[self.pos..];
            match rest.chars().next() {
                // A word classifies whole or not at all, so a vocabulary
                // miss like `abc123` can never match as a number halfway
                Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                    let word_len = rest
                        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                        .unwrap_or(rest.len());
                    let start = self.pos;
                    self.pos += word_len;
                    match language.vocabulary().lookup(&rest[..word_len]) {
                        Some(category) => {
                            return Some(self.emit(ClassifiedSpan::new(
                                start,
                                self.pos,
                                category,
                            )));
                        }
                        None => {
                            self.plain_start.get_or_insert(start);
                        }
                    }
                }
                Some(ch) => {
                    self.plain_start.get_or_insert(self.pos);
                    self.pos += ch.len_utf8();
                }
                None => break,
            }
        }

        // Input exhausted: a carried construct that saw no text stays open
        if self.state.is_inside_mode() {
            self.end_state = self.state;
            self.state = LineState::default();
        }
        self.plain_start
            .take()
            .map(|start| ClassifiedSpan::new(start, text.len(), Category::Plain))
    }
}

/// Spans and carry-over state from scanning one line
#[derive(Debug)]
pub struct LineScan {
    spans: Vec<ClassifiedSpan>,
    end_state: LineState,
}

impl LineScan {
    /// The line's spans, tiling it start to end
    pub fn spans(&self) -> &[ClassifiedSpan] {
        &self.spans
    }

    /// State to seed the next line's scan with
    pub fn end_state(&self) -> LineState {
        self.end_state
    }

    /// Consume the result, keeping only the spans
    pub fn into_spans(self) -> Vec<ClassifiedSpan> {
        self.spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{BlockCommentMode, LineCommentMode, Mode, ModeEnd, ModeLibrary};
    use std::sync::Arc;

    fn demo_language() -> LanguageDescriptor {
        let library = ModeLibrary::new().unwrap();
        LanguageDescriptor::builder("Demo")
            .keywords("let if while")
            .literals("true false")
            .built_ins("print")
            .mode(library.quoted_string())
            .mode(library.number())
            .mode(library.line_comment())
            .mode(library.block_comment())
            .build()
            .unwrap()
    }

    fn scan_all(language: &LanguageDescriptor, text: &str) -> Vec<ClassifiedSpan> {
        let spans: Vec<_> = language.scan(text).collect();
        assert_covers(&spans, text);
        spans
    }

    fn assert_covers(spans: &[ClassifiedSpan], text: &str) {
        let mut pos = 0;
        for span in spans {
            assert_eq!(span.start, pos, "gap or overlap at {pos}");
            assert!(span.end > span.start, "empty span at {pos}");
            assert!(text.is_char_boundary(span.start));
            assert!(text.is_char_boundary(span.end));
            pos = span.end;
        }
        assert_eq!(pos, text.len(), "spans do not reach the end");
        for pair in spans.windows(2) {
            assert!(
                pair[0].category != Category::Plain || pair[1].category != Category::Plain,
                "adjacent plain spans at {}",
                pair[1].start
            );
        }
    }

    #[test]
    fn test_empty_document() {
        let lang = demo_language();
        assert!(scan_all(&lang, "").is_empty());
    }

    #[test]
    fn test_mixed_statement() {
        let lang = demo_language();
        let spans = scan_all(&lang, "let x = 5");
        assert_eq!(
            spans,
            [
                ClassifiedSpan::new(0, 3, Category::Keyword),
                ClassifiedSpan::new(3, 8, Category::Plain),
                ClassifiedSpan::new(8, 9, Category::Number),
            ]
        );
    }

    #[test]
    fn test_vocabulary_priority_over_plain() {
        let lang = demo_language();
        let spans = scan_all(&lang, "if true print");
        assert_eq!(spans[0].category, Category::Keyword);
        assert_eq!(spans[2].category, Category::Literal);
        assert_eq!(spans[4].category, Category::BuiltIn);
    }

    #[test]
    fn test_unknown_word_swallows_digits() {
        let lang = demo_language();
        // No number span may appear inside an identifier
        let spans = scan_all(&lang, "abc123");
        assert_eq!(spans, [ClassifiedSpan::new(0, 6, Category::Plain)]);
    }

    #[test]
    fn test_number_after_identifier_boundary() {
        let lang = demo_language();
        // `a1` is one unknown word; the `5` after the dot stands alone
        let spans = scan_all(&lang, "a1.5");
        assert_eq!(
            spans,
            [
                ClassifiedSpan::new(0, 3, Category::Plain),
                ClassifiedSpan::new(3, 4, Category::Number),
            ]
        );
    }

    #[test]
    fn test_keyword_not_matched_inside_word() {
        let lang = demo_language();
        let spans = scan_all(&lang, "iffy letter");
        assert_eq!(spans, [ClassifiedSpan::new(0, 11, Category::Plain)]);
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let lang = demo_language();
        let text = r#""a\"b""#;
        let spans = scan_all(&lang, text);
        assert_eq!(spans, [ClassifiedSpan::new(0, 6, Category::String)]);
    }

    #[test]
    fn test_adjacent_strings_stay_separate() {
        let lang = demo_language();
        let spans = scan_all(&lang, r#""a""b""#);
        assert_eq!(
            spans,
            [
                ClassifiedSpan::new(0, 3, Category::String),
                ClassifiedSpan::new(3, 6, Category::String),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let lang = demo_language();
        let spans = scan_all(&lang, "\"abc\nrest");
        assert_eq!(spans[0], ClassifiedSpan::new(0, 4, Category::String));
        assert_eq!(spans[1], ClassifiedSpan::new(4, 9, Category::Plain));
    }

    #[test]
    fn test_line_comment_runs_to_end_of_line() {
        let lang = demo_language();
        let spans = scan_all(&lang, "let // note\nx");
        assert_eq!(spans[1], ClassifiedSpan::new(3, 4, Category::Plain));
        assert_eq!(spans[2], ClassifiedSpan::new(4, 11, Category::Comment));
        assert_eq!(spans[3], ClassifiedSpan::new(11, 13, Category::Plain));
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let lang = demo_language();
        let spans = scan_all(&lang, "a /* x\ny */ b");
        assert_eq!(spans[1], ClassifiedSpan::new(2, 11, Category::Comment));
    }

    #[test]
    fn test_unterminated_block_comment_reaches_end() {
        let lang = demo_language();
        let mut scanner = lang.scan("x /* open");
        let spans: Vec<_> = (&mut scanner).collect();
        assert_covers(&spans, "x /* open");
        assert_eq!(spans[1], ClassifiedSpan::new(2, 9, Category::Comment));
        assert!(scanner.end_state().is_inside_mode());
    }

    #[test]
    fn test_vocabulary_ignored_inside_modes() {
        let lang = demo_language();
        let spans = scan_all(&lang, "\"let\" // if true");
        assert_eq!(spans[0].category, Category::String);
        assert_eq!(spans[2].category, Category::Comment);
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn test_mode_order_decides_overlapping_starts() {
        // Both modes start with the same marker; the listed order wins,
        // not the longer match
        let line_first = LanguageDescriptor::builder("LineFirst")
            .mode(Arc::new(LineCommentMode::new("/*").unwrap()))
            .mode(Arc::new(BlockCommentMode::new("/*", "*/").unwrap()))
            .build()
            .unwrap();
        let text = "/* a\nb */";
        let spans: Vec<_> = line_first.scan(text).collect();
        assert_eq!(spans[0], ClassifiedSpan::new(0, 4, Category::Comment));

        let block_first = LanguageDescriptor::builder("BlockFirst")
            .mode(Arc::new(BlockCommentMode::new("/*", "*/").unwrap()))
            .mode(Arc::new(LineCommentMode::new("/*").unwrap()))
            .build()
            .unwrap();
        let spans: Vec<_> = block_first.scan(text).collect();
        assert_eq!(spans, [ClassifiedSpan::new(0, 9, Category::Comment)]);
    }

    #[test]
    fn test_multibyte_text_stays_on_boundaries() {
        let lang = demo_language();
        let spans = scan_all(&lang, "π = 3.14 // τ½");
        let number = spans
            .iter()
            .find(|s| s.category == Category::Number)
            .unwrap();
        assert_eq!(number.text("π = 3.14 // τ½"), "3.14");
    }

    #[test]
    fn test_scan_is_deterministic() {
        let lang = demo_language();
        let text = "let s = \"a\" // x";
        let first: Vec<_> = lang.scan(text).collect();
        let second: Vec<_> = lang.scan(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_line_scan_carries_block_comment() {
        let lang = demo_language();
        let first = lang.scan_line("let /* note", LineState::default());
        assert_eq!(
            first.spans().last(),
            Some(&ClassifiedSpan::new(4, 11, Category::Comment))
        );
        assert!(first.end_state().is_inside_mode());

        let second = lang.scan_line("still */ 42", first.end_state());
        assert!(second.end_state().is_normal());
        assert_eq!(
            second.into_spans(),
            [
                ClassifiedSpan::new(0, 8, Category::Comment),
                ClassifiedSpan::new(8, 9, Category::Plain),
                ClassifiedSpan::new(9, 11, Category::Number),
            ]
        );
    }

    #[test]
    fn test_line_scan_string_does_not_carry() {
        let lang = demo_language();
        let scan = lang.scan_line("x = \"open", LineState::default());
        assert_eq!(
            scan.spans().last(),
            Some(&ClassifiedSpan::new(4, 9, Category::String))
        );
        assert!(scan.end_state().is_normal());
    }

    #[test]
    fn test_empty_line_keeps_carried_state() {
        let lang = demo_language();
        let open = lang.scan_line("/* open", LineState::default());
        let blank = lang.scan_line("", open.end_state());
        assert!(blank.spans().is_empty());
        assert_eq!(blank.end_state(), open.end_state());
    }

    #[test]
    fn test_comment_keeps_vocabulary_and_numbers_inert() {
        let lang = demo_language();
        let spans = scan_all(&lang, "/* let 42 \"s\" */");
        assert_eq!(spans, [ClassifiedSpan::new(0, 16, Category::Comment)]);
    }

    /// Matches everywhere but never consumes anything
    struct StuckMode;

    impl Mode for StuckMode {
        fn name(&self) -> &'static str {
            "stuck"
        }

        fn category(&self) -> Category {
            Category::Comment
        }

        fn try_start(&self, _text: &str, pos: usize) -> Option<usize> {
            Some(pos)
        }

        fn try_end(&self, _text: &str, pos: usize) -> ModeEnd {
            ModeEnd::Closed(pos)
        }
    }

    #[test]
    fn test_zero_width_mode_match_is_skipped() {
        let library = ModeLibrary::new().unwrap();
        let lang = LanguageDescriptor::builder("Sticky")
            .mode(Arc::new(StuckMode))
            .mode(library.number())
            .build()
            .unwrap();
        // The scan must terminate, emit no empty spans, and still reach
        // the mode listed after the stuck one
        let spans = scan_all(&lang, "ab 12");
        assert_eq!(
            spans,
            [
                ClassifiedSpan::new(0, 3, Category::Plain),
                ClassifiedSpan::new(3, 5, Category::Number),
            ]
        );

        // A carried-in state that makes no progress is dropped the same way
        let line = lang.scan_line("xy", LineState::inside(0));
        assert_eq!(line.spans(), [ClassifiedSpan::new(0, 2, Category::Plain)]);
        assert!(line.end_state().is_normal());
    }
}
