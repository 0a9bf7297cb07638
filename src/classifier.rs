//! Line classifier: tags chapter headings and stage directions.
//!
//! Rules are an ordered table evaluated top to bottom, first match wins. The
//! chapter rule always precedes the stage direction rule.

use regex_automata::meta::Regex;
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::error::{MarkupError, Result};
use crate::markup::{self, LineKind};

/// Built-in chapter pattern for scriptural book and epistle headings
pub const SCRIPTURE_PRESET: &str = r"(^(The Gospel According|The Lamentations|The Acts|The Revelation)|^(The Revelation|Ezra|The Proverbs|Ecclesiastes|The Song of Solomon|The Acts|Hosea|Joel|Obadiah|Jonah|Micah|Amos|Nahum|Habakkuk|Zephaniah|Haggai|Zechariah|Malachi)$|(Book|Epistle))";

/// One row of the rule table
#[derive(Debug)]
struct ClassificationRule {
    pattern: Regex,
    kind: LineKind,
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| MarkupError::PatternCompile {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Stateful classifier; the chapter counter lives for one document
#[derive(Debug)]
pub struct LineClassifier {
    rules: Vec<ClassificationRule>,
    chapters: u32,
}

impl LineClassifier {
    /// Build the rule table, failing before any input is read when the
    /// configuration names no usable pattern
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let chapter_pattern = match (&config.chapter_pattern, config.scripture) {
            (Some(_), true) => {
                return Err(MarkupError::config(
                    "a custom chapter pattern and the scripture preset are mutually exclusive",
                ))
            }
            (Some(pattern), false) => Some(pattern.as_str()),
            (None, true) => Some(SCRIPTURE_PRESET),
            (None, false) => None,
        };

        let mut rules = Vec::with_capacity(2);
        if let Some(pattern) = chapter_pattern {
            rules.push(ClassificationRule {
                pattern: compile(pattern)?,
                kind: LineKind::ChapterHead,
            });
        }
        if let Some(pattern) = &config.stage_pattern {
            rules.push(ClassificationRule {
                pattern: compile(pattern)?,
                kind: LineKind::StageDirection,
            });
        }

        if rules.is_empty() {
            return Err(MarkupError::config(
                "no chapter pattern, scripture preset or stage direction pattern given",
            ));
        }

        debug!("Classifier built with {} rules", rules.len());
        Ok(Self { rules, chapters: 0 })
    }

    /// Kind of a raw line according to the rule table, without side effects
    pub fn kind_of(&self, line: &str) -> LineKind {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(line))
            .map_or(LineKind::Plain, |rule| rule.kind)
    }

    /// Classify one line and return its rewritten form
    pub fn classify_line(&mut self, line: &str) -> String {
        // Already tagged lines pass through so reclassification is a no-op
        if matches!(
            LineKind::of_markup(line),
            LineKind::ChapterHead | LineKind::StageDirection
        ) {
            return line.to_string();
        }

        match self.kind_of(line) {
            LineKind::ChapterHead => {
                self.chapters += 1;
                debug!(chapter = self.chapters, "Chapter heading: {}", line);
                markup::chapter(self.chapters, line)
            }
            LineKind::StageDirection => markup::stage(line),
            LineKind::Plain | LineKind::Blank => line.to_string(),
        }
    }

    /// Classify a whole document
    pub fn process<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<String> {
        let output: Vec<String> = lines
            .iter()
            .map(|line| self.classify_line(line.as_ref()))
            .collect();
        info!(
            "Classified {} lines: {} chapter headings",
            output.len(),
            self.chapters
        );
        output
    }

    /// Number of chapter headings numbered so far
    pub fn chapters(&self) -> u32 {
        self.chapters
    }
}
