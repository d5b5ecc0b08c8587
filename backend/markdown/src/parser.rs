//! State-machine parser: pulls tokens from the scanner and accumulates
//! an HTML fragment.
//!
//! Each state handles one syntactic construct. A state consumes tokens,
//! appends zero or more fragments to the output, and either yields the
//! next state or ends the parse. Malformed constructs that cannot be
//! demoted to plain text stop the whole parse: remaining input is
//! dropped and the HTML accumulated so far is returned with the
//! `truncated` flag set.

use serde::Serialize;

use crate::scanner::Scanner;
use crate::token::{Item, Token};

/// Result of one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// The accumulated HTML fragment.
    pub html: String,
    /// True when the parse stopped before consuming all input.
    pub truncated: bool,
}

/// The syntactic construct currently being parsed.
enum State {
    Dispatch,
    Heading { level: u8, marker: String },
    Emphasis,
    Strong,
    Rule,
    List,
    Blockquote,
    CodeBlock,
    Link,
    Image,
    Paragraph(String),
    LineBreak,
}

/// One-shot parser over a single document. State is private to one
/// invocation; every document gets a fresh scanner/parser pair.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    lookahead: Option<Item>,
    output: String,
    truncated: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            scanner: Scanner::new(input),
            lookahead: None,
            output: String::new(),
            truncated: false,
        }
    }

    /// Runs the state machine to completion and returns the result.
    pub fn render(mut self) -> Rendered {
        let mut state = State::Dispatch;
        while let Some(next) = self.step(state) {
            state = next;
        }
        Rendered {
            html: self.output,
            truncated: self.truncated,
        }
    }

    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Dispatch => self.dispatch(),
            State::Heading { level, marker } => self.heading(level, &marker),
            State::Emphasis => self.emphasis(),
            State::Strong => self.strong(),
            State::Rule => self.rule(),
            State::List => self.list(),
            State::Blockquote => self.blockquote(),
            State::CodeBlock => self.code_block(),
            State::Link => self.link(),
            State::Image => self.image(),
            State::Paragraph(text) => self.paragraph(&text),
            State::LineBreak => self.line_break(),
        }
    }

    /// Reads one token and routes to the state handling it.
    fn dispatch(&mut self) -> Option<State> {
        let item = self.next_item();
        match item.tok {
            Token::H1 => Some(State::Heading { level: 1, marker: item.lit }),
            Token::H2 => Some(State::Heading { level: 2, marker: item.lit }),
            Token::H3 => Some(State::Heading { level: 3, marker: item.lit }),
            Token::H4 => Some(State::Heading { level: 4, marker: item.lit }),
            Token::Asterisk => Some(State::Emphasis),
            Token::DoubleAsterisk => Some(State::Strong),
            Token::TripleAsterisk => Some(State::Rule),
            Token::Gt => Some(State::Blockquote),
            Token::Tab => Some(State::CodeBlock),
            Token::BracketOpen => Some(State::Link),
            Token::Bang => Some(State::Image),
            Token::Literal => Some(State::Paragraph(item.lit)),
            Token::Newline => Some(State::LineBreak),
            Token::Whitespace => Some(State::Dispatch),
            Token::Eof => None,
            // A closer with no construct open is broken grammar.
            Token::BracketClose | Token::ParenOpen | Token::ParenClose | Token::Illegal => {
                self.fail()
            }
        }
    }

    /// A heading marker run. Expects whitespace then a literal; anything
    /// else demotes the marker back to plain paragraph text.
    fn heading(&mut self, level: u8, marker: &str) -> Option<State> {
        let first = self.next_item();

        if first.tok == Token::Whitespace {
            let body = self.next_item();
            if body.tok == Token::Literal {
                self.output
                    .push_str(&format!("<h{level}>{}</h{level}>", body.lit));
                return Some(State::Dispatch);
            }
            // Marker plus the separating space, demoted.
            self.output.push_str(&format!("<p>{marker} </p>"));
            if body.tok != Token::Eof {
                self.push_back(body);
            }
            return Some(State::Dispatch);
        }

        if first.tok == Token::Literal {
            // No space between marker and text: the whole thing is text.
            self.output.push_str(&format!("<p>{marker}{}</p>", first.lit));
            return Some(State::Dispatch);
        }

        self.output.push_str(&format!("<p>{marker}</p>"));
        if first.tok != Token::Eof {
            self.push_back(first);
        }
        Some(State::Dispatch)
    }

    /// A single asterisk: either emphasis, or a list when followed by
    /// whitespace (the `* item` marker pair).
    fn emphasis(&mut self) -> Option<State> {
        let item = self.next_item();
        match item.tok {
            Token::Whitespace => Some(State::List),
            Token::Literal => {
                let closing = self.next_item();
                if closing.tok != Token::Asterisk {
                    return self.fail();
                }
                self.output.push_str(&format!("<em>{}</em>", item.lit));
                Some(State::Dispatch)
            }
            _ => self.fail(),
        }
    }

    /// Double asterisk: one literal, then the matching closing marker.
    fn strong(&mut self) -> Option<State> {
        let text = self.expect(Token::Literal)?;
        self.expect(Token::DoubleAsterisk)?;
        self.output.push_str(&format!("<strong>{}</strong>", text.lit));
        Some(State::Dispatch)
    }

    /// Triple asterisk: a horizontal rule, nothing further consumed.
    fn rule(&mut self) -> Option<State> {
        self.output.push_str("<hr/>");
        Some(State::Dispatch)
    }

    /// Unordered list. Entered with the first `*` and whitespace already
    /// consumed. Loops over (literal, newline, marker, whitespace)
    /// quartets; the first slot breaking the pattern ends the list and
    /// the breaking token is discarded.
    fn list(&mut self) -> Option<State> {
        self.output.push_str("<ul>");
        loop {
            let entry = self.next_item();
            if entry.tok != Token::Literal {
                break;
            }
            self.output.push_str(&format!("<li>{}</li>", entry.lit));

            if self.next_item().tok != Token::Newline {
                break;
            }
            if self.next_item().tok != Token::Asterisk {
                break;
            }
            if self.next_item().tok != Token::Whitespace {
                break;
            }
        }
        self.output.push_str("</ul>");
        Some(State::Dispatch)
    }

    /// Blockquote: one paragraph joining every quoted line with single
    /// spaces. Loops over (whitespace, literal, newline, quote-marker)
    /// quartets; a non-marker in the fourth slot is pushed back for the
    /// dispatcher, a break anywhere earlier is discarded.
    fn blockquote(&mut self) -> Option<State> {
        self.output.push_str("<blockquote><p>");
        let mut first = true;
        loop {
            if self.next_item().tok != Token::Whitespace {
                break;
            }
            let line = self.next_item();
            if line.tok != Token::Literal {
                break;
            }
            if !first {
                self.output.push(' ');
            }
            self.output.push_str(&line.lit);
            first = false;

            if self.next_item().tok != Token::Newline {
                break;
            }
            let marker = self.next_item();
            if marker.tok != Token::Gt {
                if marker.tok != Token::Eof {
                    self.push_back(marker);
                }
                break;
            }
        }
        self.output.push_str("</p></blockquote>");
        Some(State::Dispatch)
    }

    /// Code block: skips indentation tokens, then wraps the next literal.
    fn code_block(&mut self) -> Option<State> {
        loop {
            let item = self.next_item();
            match item.tok {
                Token::Whitespace | Token::Tab => continue,
                Token::Literal => {
                    self.output
                        .push_str(&format!("<pre><code>{}</code></pre>", item.lit));
                    return Some(State::Dispatch);
                }
                Token::Eof => return None,
                _ => return self.fail(),
            }
        }
    }

    /// Link: `[text](url)` in strict sequence.
    fn link(&mut self) -> Option<State> {
        let text = self.expect(Token::Literal)?;
        self.expect(Token::BracketClose)?;
        self.expect(Token::ParenOpen)?;
        let url = self.expect(Token::Literal)?;
        self.expect(Token::ParenClose)?;
        self.output
            .push_str(&format!("<a href=\"{}\">{}</a>", url.lit, text.lit));
        Some(State::Dispatch)
    }

    /// Image: `![alt](url)` in strict sequence.
    fn image(&mut self) -> Option<State> {
        self.expect(Token::BracketOpen)?;
        let alt = self.expect(Token::Literal)?;
        self.expect(Token::BracketClose)?;
        self.expect(Token::ParenOpen)?;
        let url = self.expect(Token::Literal)?;
        self.expect(Token::ParenClose)?;
        self.output
            .push_str(&format!("<img src=\"{}\" alt=\"{}\"/>", url.lit, alt.lit));
        Some(State::Dispatch)
    }

    /// A bare literal becomes one paragraph.
    fn paragraph(&mut self, text: &str) -> Option<State> {
        self.output.push_str(&format!("<p>{text}</p>"));
        Some(State::Dispatch)
    }

    fn line_break(&mut self) -> Option<State> {
        self.output.push_str("<br/>");
        Some(State::Dispatch)
    }

    /// Single-slot token lookahead, mirroring the scanner's character
    /// pushback one layer up.
    fn next_item(&mut self) -> Item {
        self.lookahead
            .take()
            .unwrap_or_else(|| self.scanner.scan())
    }

    fn push_back(&mut self, item: Item) {
        debug_assert!(self.lookahead.is_none(), "lookahead slot already occupied");
        self.lookahead = Some(item);
    }

    /// Consumes one token, requiring an exact kind. A mismatch is a
    /// structural failure: the parse stops and the output is truncated.
    fn expect(&mut self, tok: Token) -> Option<Item> {
        let item = self.next_item();
        if item.tok == tok {
            Some(item)
        } else {
            self.truncated = true;
            None
        }
    }

    fn fail(&mut self) -> Option<State> {
        self.truncated = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(input: &str) -> String {
        Parser::new(input).render().html
    }

    fn rendered(input: &str) -> Rendered {
        Parser::new(input).render()
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(html(""), "");
        assert_eq!(html("\0"), "");
    }

    #[test]
    fn test_plain_literal_becomes_paragraph() {
        assert_eq!(html("just some text."), "<p>just some text.</p>");
    }

    #[test]
    fn test_headings() {
        assert_eq!(html("# header"), "<h1>header</h1>");
        assert_eq!(html("## header"), "<h2>header</h2>");
        assert_eq!(html("### header"), "<h3>header</h3>");
        assert_eq!(html("#### header"), "<h4>header</h4>");
        // Longer marker chains collapse to level 4.
        assert_eq!(html("###### header"), "<h4>header</h4>");
    }

    #[test]
    fn test_heading_without_space_demotes_to_paragraph() {
        assert_eq!(html("#header"), "<p>#header</p>");
    }

    #[test]
    fn test_heading_marker_alone_demotes_to_paragraph() {
        assert_eq!(html("##"), "<p>##</p>");
        assert_eq!(html("## "), "<p>## </p>");
    }

    #[test]
    fn test_emphasis_and_strong() {
        assert_eq!(html("*text*"), "<em>text</em>");
        assert_eq!(html("**text**"), "<strong>text</strong>");
    }

    #[test]
    fn test_triple_asterisk_is_horizontal_rule() {
        assert_eq!(html("***"), "<hr/>");
        // Nothing further is consumed by the rule itself.
        assert_eq!(html("***\n"), "<hr/><br/>");
    }

    #[test]
    fn test_unterminated_emphasis_truncates() {
        let out = rendered("*text");
        assert_eq!(out.html, "");
        assert!(out.truncated);

        let out = rendered("**text*");
        assert_eq!(out.html, "");
        assert!(out.truncated);
    }

    #[test]
    fn test_list() {
        assert_eq!(
            html("* a\n* b\n* c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn test_list_halts_at_first_broken_quartet() {
        // The second entry is missing its marker; the list closes and
        // the breaking tokens are dropped.
        let out = rendered("* a\nb");
        assert_eq!(out.html, "<ul><li>a</li></ul>");
        assert!(!out.truncated);
    }

    #[test]
    fn test_blockquote_joins_lines_into_one_paragraph() {
        assert_eq!(
            html("> first line\n> second line"),
            "<blockquote><p>first line second line</p></blockquote>"
        );
    }

    #[test]
    fn test_blockquote_followed_by_paragraph() {
        assert_eq!(
            html("> quoted\ntrailing"),
            "<blockquote><p>quoted</p></blockquote><p>trailing</p>"
        );
    }

    #[test]
    fn test_code_block_from_tab_and_four_spaces() {
        let expected = "<pre><code>code</code></pre>";
        assert_eq!(html("\tcode"), expected);
        assert_eq!(html("\t code"), expected);
        assert_eq!(html("    code"), expected);
    }

    #[test]
    fn test_link() {
        assert_eq!(
            html("[text](url)"),
            "<a href=\"url\">text</a>"
        );
        assert_eq!(
            html("[site](http://example.com/page)"),
            "<a href=\"http://example.com/page\">site</a>"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            html("![alt](url)"),
            "<img src=\"url\" alt=\"alt\"/>"
        );
    }

    #[test]
    fn test_malformed_link_truncates() {
        let out = rendered("[text](url");
        assert_eq!(out.html, "");
        assert!(out.truncated);

        let out = rendered("[text]url)");
        assert_eq!(out.html, "");
        assert!(out.truncated);
    }

    #[test]
    fn test_malformed_image_truncates() {
        let out = rendered("!alt](url)");
        assert_eq!(out.html, "");
        assert!(out.truncated);
    }

    #[test]
    fn test_stray_closer_truncates() {
        for input in [")x", "]x", "(x"] {
            let out = rendered(input);
            assert_eq!(out.html, "", "input {input:?}");
            assert!(out.truncated, "input {input:?}");
        }
    }

    #[test]
    fn test_non_literal_after_code_indent_truncates() {
        let out = rendered("\t*x*");
        assert_eq!(out.html, "");
        assert!(out.truncated);

        let out = rendered("# title\n\t[");
        assert_eq!(out.html, "<h1>title</h1><br/>");
        assert!(out.truncated);
    }

    #[test]
    fn test_truncation_keeps_accumulated_output() {
        let out = rendered("# title\n*broken");
        assert_eq!(out.html, "<h1>title</h1><br/>");
        assert!(out.truncated);
    }

    #[test]
    fn test_clean_parse_is_not_truncated() {
        let out = rendered("# title\nbody text");
        assert_eq!(out.html, "<h1>title</h1><br/><p>body text</p>");
        assert!(!out.truncated);
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(html("a\nb"), "<p>a</p><br/><p>b</p>");
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let input = "# title\n> a\n> b\n* x\n* y";
        assert_eq!(html(input), html(input));
    }

    #[test]
    fn test_rendered_serializes_with_truncation_flag() {
        let out = rendered("*oops");
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(json, "{\"html\":\"\",\"truncated\":true}");
    }
}
