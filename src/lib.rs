//! Syntax highlighting for BraneScript and kindred small languages
//!
//! A language is described declaratively: a name and aliases, three
//! classified word lists, and an ordered list of shared lexical modes
//! drawn from the engine's mode library. Scanning a document yields a
//! lazy stream of classified spans that tile the input exactly; what a
//! span looks like is left to the rendering layer.
//!
//! ```
//! use bscript_highlight::{Category, Registry};
//!
//! let registry = Registry::with_builtins().unwrap();
//! let language = registry.resolve("bs").unwrap();
//!
//! let spans: Vec<_> = language.scan("let x := 5;").collect();
//! assert_eq!(spans[0].category, Category::Keyword);
//! assert_eq!(spans[2].category, Category::Number);
//! ```
//!
//! New languages register at startup and the registry is shared behind
//! `&` or `Arc` afterwards; scanning never needs a lock.

pub mod builtin;
pub mod category;
pub mod error;
pub mod language;
pub mod modes;
pub mod registry;
pub mod render;
pub mod scanner;
pub mod style;
pub mod vocabulary;

pub use category::Category;
pub use error::{HighlightError, Result};
pub use language::{LanguageBuilder, LanguageDescriptor};
pub use modes::{LineState, Mode, ModeEnd, ModeLibrary, ModeRef};
pub use registry::Registry;
pub use scanner::{ClassifiedSpan, LineScan, Scanner};
pub use style::{Color, Style, Theme};
pub use vocabulary::Vocabulary;
