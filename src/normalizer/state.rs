//! Document-wide toggles carried by the normalizer across lines

use crate::markup::{ITALIC_CLOSE, ITALIC_OPEN};

pub const LEFT_DOUBLE_QUOTE: char = '\u{201C}';
pub const RIGHT_DOUBLE_QUOTE: char = '\u{201D}';
pub const LEFT_SINGLE_QUOTE: char = '\u{2018}';
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

/// Whether a double quotation is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Closed,
    Open,
}

impl QuoteState {
    /// Typographic quote for the next straight double quote, flipping the state
    pub fn flip(&mut self) -> char {
        match self {
            QuoteState::Closed => {
                *self = QuoteState::Open;
                LEFT_DOUBLE_QUOTE
            }
            QuoteState::Open => {
                *self = QuoteState::Closed;
                RIGHT_DOUBLE_QUOTE
            }
        }
    }
}

/// Whether an underscore-delimited emphasis span is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItalicState {
    #[default]
    Roman,
    Italic,
}

impl ItalicState {
    /// Tag for the next underscore delimiter, flipping the state
    pub fn flip(&mut self) -> &'static str {
        match self {
            ItalicState::Roman => {
                *self = ItalicState::Italic;
                ITALIC_OPEN
            }
            ItalicState::Italic => {
                *self = ItalicState::Roman;
                ITALIC_CLOSE
            }
        }
    }
}
