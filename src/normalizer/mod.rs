// WHY: typographic cleanup runs line by line but quote and italic toggles must
// survive line breaks, so the normalizer owns them for the whole document

use std::borrow::Cow;
use tracing::{info, warn};

pub mod state;
pub mod tokens;

pub use state::{ItalicState, QuoteState};

use crate::config::NormalizerConfig;
use crate::markup::{self, AMPERSAND, EM_DASH, NBSP};
use state::{LEFT_SINGLE_QUOTE, RIGHT_SINGLE_QUOTE};
use tokens::tokenize;

/// Longest leading space run converted to `&nbsp;` markers
pub const MAX_INDENT: usize = 6;

/// Stateful per-document typographic normalizer
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
    quote: QuoteState,
    italic: ItalicState,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            quote: QuoteState::default(),
            italic: ItalicState::default(),
        }
    }

    pub fn quote_state(&self) -> QuoteState {
        self.quote
    }

    pub fn italic_state(&self) -> ItalicState {
        self.italic
    }

    /// Normalize one line. Classifier wrappers are left intact and only
    /// the text inside them is rewritten.
    pub fn normalize_line(&mut self, line: &str) -> String {
        match markup::split_wrapped(line) {
            Some(wrapped) => {
                let inner = self.normalize_text(wrapped.inner);
                wrapped.rewrap(&inner)
            }
            None => self.normalize_text(line),
        }
    }

    fn normalize_text(&mut self, line: &str) -> String {
        // Whitespace-only lines stay blank paragraph separators
        if line.trim().is_empty() {
            if self.config.reset_quotes_on_blank {
                self.quote = QuoteState::Closed;
            }
            return line.to_string();
        }

        let (indent, rest) = if self.config.preserve_spaces {
            split_indent(line)
        } else {
            (0, line)
        };

        let mut text = Cow::Borrowed(rest);
        if self.config.em_dashes && text.contains("--") {
            text = Cow::Owned(text.replace("--", EM_DASH));
        }
        if self.config.smart_quotes && text.contains('\'') {
            text = Cow::Owned(convert_apostrophes(&text));
        }

        let mut out = String::with_capacity(text.len() + indent * NBSP.len());
        // Markers contain `&` and must bypass the escaping below
        for _ in 0..indent {
            out.push_str(NBSP);
        }

        for token in tokenize(&text) {
            if self.config.smart_quotes && token == "\"" {
                out.push(self.quote.flip());
            } else if self.config.italics && token.contains('_') {
                for ch in token.chars() {
                    if ch == '_' {
                        out.push_str(self.italic.flip());
                    } else {
                        out.push(ch);
                    }
                }
            } else if token.contains('&') {
                out.push_str(&token.replace('&', AMPERSAND));
            } else {
                out.push_str(token);
            }
        }
        out
    }

    /// Normalize a whole document
    pub fn process<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<String> {
        let output: Vec<String> = lines
            .iter()
            .map(|line| self.normalize_line(line.as_ref()))
            .collect();

        if self.quote == QuoteState::Open {
            warn!("Document ends inside an open double quote; check the source quotes by hand");
        }
        if self.italic == ItalicState::Italic {
            warn!("Document ends inside an open italic span");
        }
        info!("Normalized {} lines", output.len());
        output
    }
}

/// Count of leading spaces to convert (at most `MAX_INDENT`) and the rest
fn split_indent(line: &str) -> (usize, &str) {
    let spaces = line.bytes().take_while(|&b| b == b' ').count();
    let indent = spaces.min(MAX_INDENT);
    (indent, &line[indent..])
}

/// Best-effort straight apostrophe conversion.
///
/// An apostrophe after a non-letter (or at line start) and before a letter or
/// em-dash opens a quotation; every other one is a closing quote or elision.
/// Ambiguous cases such as leading elisions need manual follow-up.
pub fn convert_apostrophes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 2);

    for (idx, &ch) in chars.iter().enumerate() {
        if ch != '\'' {
            out.push(ch);
            continue;
        }
        let after_letter = idx > 0 && chars[idx - 1].is_ascii_alphabetic();
        let before_letter = chars
            .get(idx + 1)
            .is_some_and(|next| next.is_ascii_alphabetic() || *next == '\u{2014}');
        out.push(if !after_letter && before_letter {
            LEFT_SINGLE_QUOTE
        } else {
            RIGHT_SINGLE_QUOTE
        });
    }
    out
}
