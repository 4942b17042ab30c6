//! Style types for the rendering layer
//!
//! Scanning only assigns categories; these types describe how a renderer
//! turns categories into visual styling. Themes can be built in code or
//! loaded from a TOML table keyed by category name.

use std::collections::HashMap;

use crate::category::Category;
use crate::error::{HighlightError, Result};

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color from its theme-file name (lowercase, kebab-case)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Color::Default),
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "bright-black" => Some(Color::BrightBlack),
            "bright-red" => Some(Color::BrightRed),
            "bright-green" => Some(Color::BrightGreen),
            "bright-yellow" => Some(Color::BrightYellow),
            "bright-blue" => Some(Color::BrightBlue),
            "bright-magenta" => Some(Color::BrightMagenta),
            "bright-cyan" => Some(Color::BrightCyan),
            "bright-white" => Some(Color::BrightWhite),
            _ => None,
        }
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a style with just background color
    pub fn bg(color: Color) -> Self {
        Self {
            bg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set reverse video
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Mapping from lexical category to rendering style
///
/// The default theme uses each category's built-in style. A TOML theme
/// replaces the style of every category it mentions and leaves the rest at
/// their defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<Category, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut styles = HashMap::new();
        for category in Category::ALL {
            styles.insert(category, category.default_style());
        }
        Self { styles }
    }
}

impl Theme {
    /// Get the style for a category
    pub fn style(&self, category: Category) -> Style {
        self.styles
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_style())
    }

    /// Override the style for a category
    pub fn set(&mut self, category: Category, style: Style) {
        self.styles.insert(category, style);
    }

    /// Load a theme from TOML text
    ///
    /// One table per category, keyed by the category's canonical name:
    ///
    /// ```toml
    /// [keyword]
    /// fg = "magenta"
    /// bold = true
    ///
    /// [comment]
    /// fg = "bright-black"
    /// italic = true
    /// ```
    ///
    /// Unknown category names, unknown colors, and wrongly-typed fields are
    /// errors; a theme is rejected whole rather than half-applied.
    pub fn from_toml(text: &str) -> Result<Self> {
        let table: toml::Table = text.parse()?;
        let mut theme = Theme::default();

        for (key, value) in &table {
            let category = Category::from_name(key).ok_or_else(|| {
                HighlightError::Theme(format!("unknown category {key:?}"))
            })?;
            let entry = value.as_table().ok_or_else(|| {
                HighlightError::Theme(format!("category {key:?} is not a table"))
            })?;
            theme.set(category, parse_style(key, entry)?);
        }

        Ok(theme)
    }
}

/// Parse one category table into a style
fn parse_style(category: &str, entry: &toml::Table) -> Result<Style> {
    let mut style = Style::default();

    for (field, value) in entry {
        match field.as_str() {
            "fg" => style.fg = parse_color(category, field, value)?,
            "bg" => style.bg = parse_color(category, field, value)?,
            "bold" => style.bold = parse_flag(category, field, value)?,
            "italic" => style.italic = parse_flag(category, field, value)?,
            "underline" => style.underline = parse_flag(category, field, value)?,
            "reverse" => style.reverse = parse_flag(category, field, value)?,
            _ => {
                return Err(HighlightError::Theme(format!(
                    "unknown field {field:?} in category {category:?}"
                )))
            }
        }
    }

    Ok(style)
}

fn parse_color(category: &str, field: &str, value: &toml::Value) -> Result<Color> {
    let name = value.as_str().ok_or_else(|| {
        HighlightError::Theme(format!("{category}.{field} must be a string"))
    })?;
    Color::from_name(name).ok_or_else(|| {
        HighlightError::Theme(format!("unknown color {name:?} in {category}.{field}"))
    })
}

fn parse_flag(category: &str, field: &str, value: &toml::Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        HighlightError::Theme(format!("{category}.{field} must be a boolean"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_bg(Color::Blue);
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Blue);
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("magenta"), Some(Color::Magenta));
        assert_eq!(Color::from_name("bright-black"), Some(Color::BrightBlack));
        assert_eq!(Color::from_name("Magenta"), None);
        assert_eq!(Color::from_name("pink"), None);
    }

    #[test]
    fn test_default_theme_matches_category_defaults() {
        let theme = Theme::default();
        for category in Category::ALL {
            assert_eq!(theme.style(category), category.default_style());
        }
    }

    #[test]
    fn test_theme_from_toml() {
        let theme = Theme::from_toml(
            r#"
[keyword]
fg = "blue"
bold = true

[comment]
fg = "bright-black"
italic = true
"#,
        )
        .unwrap();

        let keyword = theme.style(Category::Keyword);
        assert_eq!(keyword.fg, Color::Blue);
        assert!(keyword.bold);

        let comment = theme.style(Category::Comment);
        assert_eq!(comment.fg, Color::BrightBlack);
        assert!(comment.italic);

        // Unmentioned categories keep their defaults
        assert_eq!(
            theme.style(Category::String),
            Category::String.default_style()
        );
    }

    #[test]
    fn test_theme_replaces_mentioned_category() {
        // A theme entry replaces the whole style, it does not merge
        let theme = Theme::from_toml("[keyword]\nfg = \"blue\"\n").unwrap();
        assert!(!theme.style(Category::Keyword).bold);
    }

    #[test]
    fn test_theme_rejects_unknown_category() {
        let err = Theme::from_toml("[operator]\nfg = \"red\"\n").unwrap_err();
        assert!(matches!(err, HighlightError::Theme(_)));
    }

    #[test]
    fn test_theme_rejects_unknown_color() {
        let err = Theme::from_toml("[keyword]\nfg = \"pink\"\n").unwrap_err();
        assert!(matches!(err, HighlightError::Theme(_)));
    }

    #[test]
    fn test_theme_rejects_bad_toml() {
        let err = Theme::from_toml("[keyword\nfg = \"red\"\n").unwrap_err();
        assert!(matches!(err, HighlightError::ThemeSyntax(_)));
    }
}
