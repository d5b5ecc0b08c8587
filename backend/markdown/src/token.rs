//! Token vocabulary shared by the scanner and the parser.

use serde::{Deserialize, Serialize};

/// Lexical category of one scanned unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    /// Never produced by the scanner; kept so the parser can reject a
    /// token it does not know how to route.
    Illegal,
    /// End of input. Sticky: scanning past the end keeps returning it.
    Eof,

    /// `#` — heading level 1.
    H1,
    /// `##` — heading level 2.
    H2,
    /// `###` — heading level 3.
    H3,
    /// `####` or longer — heading level 4.
    H4,

    /// `*` — emphasis, or a list marker when followed by whitespace.
    Asterisk,
    /// `**` — strong emphasis.
    DoubleAsterisk,
    /// `***` — horizontal rule.
    TripleAsterisk,

    /// `>` — blockquote marker.
    Gt,
    /// `[`
    BracketOpen,
    /// `]`
    BracketClose,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `!` — image marker.
    Bang,

    /// A run of plain text characters.
    Literal,

    /// A tab character, or four consecutive spaces.
    Tab,
    /// One to three consecutive spaces.
    Whitespace,
    /// A newline character.
    Newline,
}

/// One scan step's result: the token kind plus the matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub tok: Token,
    pub lit: String,
}

impl Item {
    pub fn new(tok: Token, lit: impl Into<String>) -> Self {
        Self {
            tok,
            lit: lit.into(),
        }
    }
}
