//! Lexical scanner: classifies raw characters into markdown tokens.
//!
//! `scan` is total — unrecognized characters are absorbed into literal
//! runs, so scanning never fails. The scanner owns the input cursor plus
//! a single-slot pushback buffer; at most one character is ever unread.

use std::str::Chars;

use crate::token::{Item, Token};

/// Sentinel returned by `read` once the input is exhausted.
const EOF_CHAR: char = '\0';

/// Punctuation allowed inside a literal run, in addition to ASCII
/// alphanumerics and plain spaces. Structural markers and whitespace
/// control characters are deliberately absent.
const LITERAL_PUNCT: &[char] = &[
    '.', ',', ';', ':', '\'', '"', '?', '-', '_', '/', '\\', '&', '%', '$', '@', '+', '=', '~',
    '^', '|',
];

/// Pull-based tokenizer over one document.
pub struct Scanner<'a> {
    chars: Chars<'a>,
    pushback: Option<char>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            pushback: None,
        }
    }

    /// Returns the next token and its matched text. Always succeeds;
    /// once the input is exhausted every further call returns `Eof`.
    pub fn scan(&mut self) -> Item {
        let ch = self.read();

        match ch {
            '#' => self.scan_hashes(),
            '*' => self.scan_asterisks(),
            '!' => Item::new(Token::Bang, "!"),
            '[' => Item::new(Token::BracketOpen, "["),
            ']' => Item::new(Token::BracketClose, "]"),
            '(' => Item::new(Token::ParenOpen, "("),
            ')' => Item::new(Token::ParenClose, ")"),
            '>' => Item::new(Token::Gt, ">"),
            ' ' => self.scan_spaces(),
            '\t' => Item::new(Token::Tab, "\t"),
            '\n' => Item::new(Token::Newline, "\n"),
            EOF_CHAR => Item::new(Token::Eof, "\0"),
            other => self.scan_literal(other),
        }
    }

    /// Counts a `#` chain: 1–3 map to heading levels 1–3, anything
    /// longer collapses to level 4.
    fn scan_hashes(&mut self) -> Item {
        let mut count = 1;
        loop {
            let ch = self.read();
            if ch == '#' {
                count += 1;
            } else {
                self.unread(ch);
                break;
            }
        }

        match count {
            1 => Item::new(Token::H1, "#"),
            2 => Item::new(Token::H2, "##"),
            3 => Item::new(Token::H3, "###"),
            _ => Item::new(Token::H4, "####"),
        }
    }

    /// Counts a `*` chain: 1/2/3 are emphasis markers, a longer run
    /// demotes to a literal of that many asterisks.
    fn scan_asterisks(&mut self) -> Item {
        let mut count = 1;
        loop {
            let ch = self.read();
            if ch == '*' {
                count += 1;
            } else {
                self.unread(ch);
                break;
            }
        }

        match count {
            1 => Item::new(Token::Asterisk, "*"),
            2 => Item::new(Token::DoubleAsterisk, "**"),
            3 => Item::new(Token::TripleAsterisk, "***"),
            n => Item::new(Token::Literal, "*".repeat(n)),
        }
    }

    /// Counts consecutive spaces. The moment the run reaches four the
    /// item becomes a tab (markdown's space-indent convention); shorter
    /// runs are a single short-whitespace token.
    fn scan_spaces(&mut self) -> Item {
        let mut count = 1;
        loop {
            let ch = self.read();
            if ch == ' ' {
                count += 1;
                if count == 4 {
                    return Item::new(Token::Tab, "\t");
                }
            } else {
                self.unread(ch);
                break;
            }
        }
        Item::new(Token::Whitespace, " ")
    }

    /// Extends a literal run greedily; the first ineligible character is
    /// pushed back for the next scan. The run's opening character is
    /// absorbed unconditionally so an unrecognized character cannot
    /// wedge the scanner.
    fn scan_literal(&mut self, first: char) -> Item {
        let mut literal = String::new();
        literal.push(first);
        loop {
            let ch = self.read();
            if is_literal_char(ch) {
                literal.push(ch);
            } else {
                self.unread(ch);
                break;
            }
        }

        Item::new(Token::Literal, literal)
    }

    fn read(&mut self) -> char {
        if let Some(ch) = self.pushback.take() {
            return ch;
        }
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    fn unread(&mut self, ch: char) {
        // End-of-input needs no pushback; reads past the end keep
        // returning the sentinel anyway.
        if ch != EOF_CHAR {
            debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
            self.pushback = Some(ch);
        }
    }
}

fn is_literal_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == ' ' || LITERAL_PUNCT.contains(&ch)
}
