// WHY: paragraph boundaries, word ids and line-count pages all depend on the
// order of everything before them, so one state machine owns all three

use tracing::{debug, info, warn};

pub mod state;
pub mod words;

pub use state::{BreakRecord, TaggerState};

use crate::config::{Layout, TaggerConfig};
use crate::error::Result;
use crate::markup::{self, LineKind, LINE_BREAK, PARAGRAPH_CLOSE, PARAGRAPH_OPEN, SOFT_BREAK};
use words::EmphasisBalancer;

/// Everything the tagger produced for one document
#[derive(Debug, Clone, Default)]
pub struct TaggedDocument {
    pub lines: Vec<String>,
    pub breaks: Vec<BreakRecord>,
    /// Highest word id assigned
    pub words: u64,
    /// Number of line-count pages
    pub pages: u32,
}

/// Paragraph & word tagger with line-count pagination
#[derive(Debug)]
pub struct ParagraphTagger {
    config: TaggerConfig,
    layout: Layout,
    state: TaggerState,
    word_id: u64,
    page: u32,
    lines_on_page: u32,
    emphasis: EmphasisBalancer,
    breaks: Vec<BreakRecord>,
    out: Vec<String>,
}

impl ParagraphTagger {
    /// Fails with a configuration error when the layout is unset
    pub fn new(config: TaggerConfig) -> Result<Self> {
        let layout = config.validate()?;
        if !config.break_on_paragraph && config.min_chapter_lines > config.lines_per_page {
            warn!(
                "min_chapter_lines {} exceeds lines_per_page {}; chapters will never force a page break",
                config.min_chapter_lines, config.lines_per_page
            );
        }
        Ok(Self {
            config,
            layout,
            state: TaggerState::Beginning,
            word_id: 0,
            page: 1,
            lines_on_page: 0,
            emphasis: EmphasisBalancer::default(),
            breaks: Vec::new(),
            out: Vec::new(),
        })
    }

    pub fn state(&self) -> TaggerState {
        self.state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn lines_on_page(&self) -> u32 {
        self.lines_on_page
    }

    /// Feed one line of classified, normalized text
    pub fn tag_line(&mut self, line: &str) {
        match LineKind::of_markup(line) {
            LineKind::Blank => self.blank(),
            LineKind::ChapterHead => self.chapter(line),
            LineKind::StageDirection => self.stage(line),
            LineKind::Plain => self.text(line),
        }
    }

    /// Close the document and hand back the markup
    pub fn finish(mut self) -> TaggedDocument {
        self.close_paragraph();
        self.emit(markup::page_break(self.page));
        info!(
            "Tagged {} words on {} pages, {} chapter breaks",
            self.word_id,
            self.page,
            self.breaks.len()
        );
        TaggedDocument {
            lines: self.out,
            breaks: self.breaks,
            words: self.word_id,
            pages: self.page,
        }
    }

    /// Tag a whole document
    pub fn process<S: AsRef<str>>(mut self, lines: &[S]) -> TaggedDocument {
        for line in lines {
            self.tag_line(line.as_ref());
        }
        self.finish()
    }

    fn blank(&mut self) {
        match self.state {
            TaggerState::InChapter => {
                self.emit(PARAGRAPH_OPEN);
                self.state = TaggerState::ParagraphOpen;
            }
            TaggerState::InParagraph => {
                self.emit(PARAGRAPH_CLOSE);
                self.state = TaggerState::ParagraphClosed;
                self.break_at_paragraph_end();
            }
            // A stage direction already closed the paragraph
            TaggerState::ParagraphClosed => self.break_at_paragraph_end(),
            TaggerState::Beginning | TaggerState::ParagraphOpen => {}
        }
    }

    fn break_at_paragraph_end(&mut self) {
        if self.config.break_on_paragraph && self.lines_on_page >= self.config.lines_per_page {
            self.page_break();
        }
    }

    fn chapter(&mut self, line: &str) {
        self.close_paragraph();
        if self.state != TaggerState::Beginning
            && self.lines_on_page > 0
            && self.lines_on_page >= self.config.min_chapter_lines
        {
            self.page_break();
        }

        if let Some(chapter) = markup::chapter_number(line) {
            let title = self
                .config
                .record_titles
                .then(|| markup::split_wrapped(line).map(|w| w.inner.to_string()))
                .flatten();
            debug!(chapter, page = self.page, "Chapter break");
            self.breaks.push(BreakRecord {
                chapter,
                page: self.page,
                title,
            });
        }

        self.emit(line);
        self.lines_on_page += 1;
        self.state = TaggerState::InChapter;
        self.check_page_full();
    }

    fn stage(&mut self, line: &str) {
        self.close_paragraph();
        let inner = markup::split_wrapped(line).map_or(line, |w| w.inner);
        let span = self.span(inner);
        self.emit(format!("{}{}", markup::stage(&span), self.terminator()));
        self.lines_on_page += 1;
        self.state = TaggerState::ParagraphClosed;
        self.check_page_full();
    }

    fn text(&mut self, line: &str) {
        if !self.state.paragraph_is_open() {
            self.emit(PARAGRAPH_OPEN);
        }
        let span = self.span(line);
        self.emit(format!("{}{}", span, self.terminator()));
        self.lines_on_page += 1;
        self.state = TaggerState::InParagraph;
        self.check_page_full();
    }

    /// Line span with every word stamped
    fn span(&mut self, text: &str) -> String {
        let (indent, rest) = words::split_indent(text);
        let stamped: Vec<String> = rest
            .split_whitespace()
            .map(|word| self.stamp(word))
            .collect();
        markup::line_span(self.lines_on_page + 1, &format!("{indent}{}", stamped.join(" ")))
    }

    fn stamp(&mut self, word: &str) -> String {
        self.word_id += 1;
        let word = words::em_dashes(word);
        if self.config.debug {
            return word;
        }
        let balanced = self.emphasis.balance(&word);
        markup::word(self.word_id, &balanced)
    }

    fn terminator(&self) -> &'static str {
        match self.layout {
            Layout::Justified => LINE_BREAK,
            Layout::RaggedRight => SOFT_BREAK,
        }
    }

    /// Mid-paragraph break when pages are bounded by line count alone. The
    /// interrupted paragraph reopens with the next text line.
    fn check_page_full(&mut self) {
        if !self.config.break_on_paragraph && self.lines_on_page >= self.config.lines_per_page {
            self.close_paragraph();
            self.page_break();
        }
    }

    fn close_paragraph(&mut self) {
        if self.state.paragraph_is_open() {
            self.emit(PARAGRAPH_CLOSE);
            self.state = TaggerState::ParagraphClosed;
        }
    }

    fn page_break(&mut self) {
        debug!(page = self.page, lines = self.lines_on_page, "Page break");
        self.emit(markup::page_break(self.page));
        self.lines_on_page = 0;
        self.page += 1;
    }

    fn emit(&mut self, line: impl Into<String>) {
        self.out.push(line.into());
    }
}
