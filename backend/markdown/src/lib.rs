//! Markdown to HTML conversion for the live preview service.
//!
//! A hand-written lexical scanner feeds a state-machine parser; together
//! they turn a restricted markdown subset into an HTML fragment. The
//! whole pipeline is synchronous and allocation-light: one scanner and
//! one parser per document, no shared state between conversions.

pub mod parser;
pub mod scanner;
pub mod token;

pub use parser::{Parser, Rendered};
pub use scanner::Scanner;
pub use token::{Item, Token};

/// Convert a markdown document to an HTML fragment.
///
/// Malformed constructs truncate the output silently; use [`render`]
/// when the caller needs to know.
pub fn to_html(input: &str) -> String {
    Parser::new(input).render().html
}

/// Convert a markdown document, reporting whether the parse stopped
/// before the end of the input.
pub fn render(input: &str) -> Rendered {
    Parser::new(input).render()
}
