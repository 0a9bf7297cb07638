//! Markup vocabulary shared by every stage.
//!
//! Each stage writes lines the next stage must recognize, so construction and
//! recognition of the tags live side by side here.

use std::fmt;

pub const PARAGRAPH_OPEN: &str = "<p>";
pub const PARAGRAPH_CLOSE: &str = "</p>";
/// Hard line break used by justified layout
pub const LINE_BREAK: &str = "<br>";
/// Soft line break used by ragged-right layout
pub const SOFT_BREAK: &str = r#"<span class="break"></span>"#;
pub const NBSP: &str = "&nbsp;";
pub const AMPERSAND: &str = "&amp;";
pub const EM_DASH: &str = "\u{2014}";
pub const ITALIC_OPEN: &str = "<i>";
pub const ITALIC_CLOSE: &str = "</i>";

const CHAPTER_PREFIX: &str = r#"<ch id="ch"#;
const CHAPTER_CLOSE: &str = "</ch>";
const STAGE_OPEN: &str = "<stage>";
const STAGE_CLOSE: &str = "</stage>";
const WORD_PREFIX: &str = r#"<word id=""#;
const WORD_COUNT_PREFIX: &str = "page@";

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Plain,
    ChapterHead,
    StageDirection,
    Blank,
}

impl LineKind {
    /// Recover the classification of a line from the markup the classifier wrote
    pub fn of_markup(line: &str) -> Self {
        if line.trim().is_empty() {
            LineKind::Blank
        } else if line.starts_with(CHAPTER_PREFIX) && line.ends_with(CHAPTER_CLOSE) {
            LineKind::ChapterHead
        } else if line.starts_with(STAGE_OPEN) && line.ends_with(STAGE_CLOSE) {
            LineKind::StageDirection
        } else {
            LineKind::Plain
        }
    }
}

/// A chapter heading paired with its sequential chapter number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMarker<'a> {
    pub number: u32,
    pub title: &'a str,
}

impl fmt::Display for ChapterMarker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"{CHAPTER_PREFIX}{}">{}{CHAPTER_CLOSE}"#, self.number, self.title)
    }
}

/// A line split into its classifier wrapper and the wrapped text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrapped<'a> {
    pub open: &'a str,
    pub inner: &'a str,
    pub close: &'a str,
}

impl Wrapped<'_> {
    pub fn rewrap(&self, inner: &str) -> String {
        format!("{}{}{}", self.open, inner, self.close)
    }
}

/// Split a chapter or stage-direction line into wrapper and content
pub fn split_wrapped(line: &str) -> Option<Wrapped<'_>> {
    match LineKind::of_markup(line) {
        LineKind::ChapterHead => {
            let open_end = line.find('>')? + 1;
            let close_start = line.len() - CHAPTER_CLOSE.len();
            if open_end > close_start {
                return None;
            }
            Some(Wrapped {
                open: &line[..open_end],
                inner: &line[open_end..close_start],
                close: &line[close_start..],
            })
        }
        LineKind::StageDirection => {
            let close_start = line.len() - STAGE_CLOSE.len();
            if STAGE_OPEN.len() > close_start {
                return None;
            }
            Some(Wrapped {
                open: STAGE_OPEN,
                inner: &line[STAGE_OPEN.len()..close_start],
                close: STAGE_CLOSE,
            })
        }
        _ => None,
    }
}

/// Chapter number carried by a `<ch id="chN">` line
pub fn chapter_number(line: &str) -> Option<u32> {
    let rest = line.strip_prefix(CHAPTER_PREFIX)?;
    let digits = rest.split('"').next()?;
    digits.parse().ok()
}

pub fn chapter(number: u32, title: &str) -> String {
    ChapterMarker { number, title }.to_string()
}

pub fn stage(text: &str) -> String {
    format!("{STAGE_OPEN}{text}{STAGE_CLOSE}")
}

pub fn word(id: u64, text: &str) -> String {
    format!(r#"{WORD_PREFIX}{id}">{text}</word>"#)
}

pub fn line_span(index: u32, body: &str) -> String {
    format!(r#"<span class="line" id="l{index}">{body}</span>"#)
}

/// Line-count paginator marker closing `page`
pub fn page_break(page: u32) -> String {
    format!("@{page}{{}}")
}

/// Word-count paginator marker opening `page` at input line `position`
pub fn word_count_marker(page: u32, position: usize) -> String {
    format!("{WORD_COUNT_PREFIX}{page}@{position}")
}

pub fn is_page_break(line: &str) -> bool {
    line.strip_prefix('@')
        .and_then(|rest| rest.strip_suffix("{}"))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub fn is_word_count_marker(line: &str) -> bool {
    line.strip_prefix(WORD_COUNT_PREFIX).is_some_and(|rest| {
        let mut parts = rest.split('@');
        let numeric = |p: Option<&str>| {
            p.is_some_and(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        };
        numeric(parts.next()) && numeric(parts.next()) && parts.next().is_none()
    })
}

pub fn is_paragraph_open(line: &str) -> bool {
    line.trim() == PARAGRAPH_OPEN
}

/// Lines that carry document structure rather than text
fn is_structural(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == PARAGRAPH_OPEN
        || trimmed == PARAGRAPH_CLOSE
        || is_page_break(trimmed)
        || is_word_count_marker(trimmed)
        || LineKind::of_markup(trimmed) == LineKind::ChapterHead
}

/// Remove every `<...>` tag, keeping the text between them
pub fn strip_tags(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_tag = false;
    for ch in line.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Number of words a line contributes to the word-count paginator.
///
/// Tagged lines count their `<word>` tags; untagged text lines count
/// whitespace tokens of their tag-free text; structural lines count zero.
pub fn count_words(line: &str) -> usize {
    let tagged = line.matches(WORD_PREFIX).count();
    if tagged > 0 {
        return tagged;
    }
    if is_structural(line) {
        return 0;
    }
    strip_tags(line)
        .replace(NBSP, " ")
        .split_whitespace()
        .count()
}
