//! Rendering classified spans to output formats
//!
//! The scanner stays pure; renderers consume its spans. Terminal output
//! styles through crossterm so the escape sequences match the rest of a
//! crossterm-based screen, and clipping measures display cells rather
//! than bytes.

use std::fmt::Write;

use crossterm::style::{Attribute, ContentStyle};
use unicode_width::UnicodeWidthChar;

use crate::category::Category;
use crate::language::LanguageDescriptor;
use crate::style::{Color, Style, Theme};

/// Render a document as HTML
///
/// Classified regions become `<span>` elements carrying the category's
/// `hl-` class, so a stylesheet addresses `.hl-keyword` and friends.
/// Plain regions are emitted bare. Text is escaped for use in an HTML
/// text node.
pub fn html(language: &LanguageDescriptor, document: &str) -> String {
    let mut out = String::with_capacity(document.len() * 2);
    for span in language.scan(document) {
        let text = span.text(document);
        if span.category == Category::Plain {
            escape_into(&mut out, text);
        } else {
            out.push_str("<span class=\"");
            out.push_str(span.category.css_class());
            out.push_str("\">");
            escape_into(&mut out, text);
            out.push_str("</span>");
        }
    }
    out
}

/// Render a document for a terminal using the given theme
///
/// Every styled span carries its own escape sequence and reset, so the
/// output can be split at span boundaries without leaking styling into
/// neighboring text.
pub fn ansi(language: &LanguageDescriptor, document: &str, theme: &Theme) -> String {
    let mut out = String::with_capacity(document.len() * 2);
    for span in language.scan(document) {
        push_styled(&mut out, span.text(document), theme.style(span.category));
    }
    out
}

/// Render one line for a fixed terminal cell budget
///
/// Clipping happens on the text before styling, so escape sequences never
/// count against the width. The output is a strict prefix of the line: a
/// character that would straddle the boundary (a wide CJK glyph,
/// typically) is dropped, and everything after the cut is dropped with
/// it rather than slid left into the freed columns.
pub fn ansi_clipped(
    language: &LanguageDescriptor,
    line: &str,
    theme: &Theme,
    max_width: usize,
) -> String {
    let mut out = String::new();
    let mut used = 0;
    for span in language.scan(line) {
        if used >= max_width {
            break;
        }
        let full = span.text(line);
        let text = clip_to_width(full, max_width - used);
        if !text.is_empty() {
            used += measure_width(text);
            push_styled(&mut out, text, theme.style(span.category));
        }
        // A partial clip means the boundary fell inside this span; later
        // spans lie beyond the cut
        if text.len() < full.len() {
            break;
        }
    }
    out
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn push_styled(out: &mut String, text: &str, style: Style) {
    if style.is_default() {
        out.push_str(text);
    } else {
        let _ = write!(out, "{}", content_style(style).apply(text));
    }
}

/// Translate a style into crossterm's terms
fn content_style(style: Style) -> ContentStyle {
    let mut out = ContentStyle::new();
    out.foreground_color = terminal_color(style.fg);
    out.background_color = terminal_color(style.bg);
    if style.bold {
        out.attributes.set(Attribute::Bold);
    }
    if style.italic {
        out.attributes.set(Attribute::Italic);
    }
    if style.underline {
        out.attributes.set(Attribute::Underlined);
    }
    if style.reverse {
        out.attributes.set(Attribute::Reverse);
    }
    out
}

/// Map the palette onto crossterm's naming, where `Dark` prefixes the
/// low-intensity half
fn terminal_color(color: Color) -> Option<crossterm::style::Color> {
    use crossterm::style::Color as Ct;
    match color {
        Color::Default => None,
        Color::Black => Some(Ct::Black),
        Color::Red => Some(Ct::DarkRed),
        Color::Green => Some(Ct::DarkGreen),
        Color::Yellow => Some(Ct::DarkYellow),
        Color::Blue => Some(Ct::DarkBlue),
        Color::Magenta => Some(Ct::DarkMagenta),
        Color::Cyan => Some(Ct::DarkCyan),
        Color::White => Some(Ct::Grey),
        Color::BrightBlack => Some(Ct::DarkGrey),
        Color::BrightRed => Some(Ct::Red),
        Color::BrightGreen => Some(Ct::Green),
        Color::BrightYellow => Some(Ct::Yellow),
        Color::BrightBlue => Some(Ct::Blue),
        Color::BrightMagenta => Some(Ct::Magenta),
        Color::BrightCyan => Some(Ct::Cyan),
        Color::BrightWhite => Some(Ct::White),
    }
}

/// Longest prefix of `text` no wider than `budget` cells
fn clip_to_width(text: &str, budget: usize) -> &str {
    let mut width = 0;
    for (offset, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > budget {
            return &text[..offset];
        }
        width += ch_width;
    }
    text
}

/// Display width with control characters priced at one cell, matching
/// the clip
fn measure_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(1)).sum()
}
