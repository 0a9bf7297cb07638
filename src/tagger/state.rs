use std::fmt;

/// Paragraph tagger state, named after what the previous line left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaggerState {
    /// Nothing but blank lines seen so far
    Beginning,
    /// Last counted line was a chapter heading
    InChapter,
    /// Inside a paragraph, after at least one text line (`text`)
    InParagraph,
    /// A paragraph was opened after a heading but holds no line yet (`p`)
    ParagraphOpen,
    /// The last paragraph was closed (`/p`)
    ParagraphClosed,
}

impl TaggerState {
    /// Whether a `<p>` has been emitted without its `</p>`
    pub fn paragraph_is_open(self) -> bool {
        matches!(self, TaggerState::InParagraph | TaggerState::ParagraphOpen)
    }
}

impl fmt::Display for TaggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaggerState::Beginning => "beginning",
            TaggerState::InChapter => "ch",
            TaggerState::InParagraph => "text",
            TaggerState::ParagraphOpen => "p",
            TaggerState::ParagraphClosed => "/p",
        };
        f.write_str(name)
    }
}

/// Page on which a chapter heading landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakRecord {
    pub chapter: u32,
    pub page: u32,
    pub title: Option<String>,
}

impl fmt::Display for BreakRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{}@{}@{}", self.chapter, self.page, title),
            None => write!(f, "{}@{}", self.chapter, self.page),
        }
    }
}
