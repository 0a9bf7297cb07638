//! Full pipeline: classify, normalize, tag, repaginate.
//!
//! Stages are rebuilt for every document so no counter or toggle leaks from
//! one run into the next.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::classifier::LineClassifier;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::paginator::{self, PageMarker, WordCountPaginator};
use crate::tagger::{BreakRecord, ParagraphTagger};

/// Per-run statistics, written as JSON by the CLI
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines_read: u64,
    pub lines_written: u64,
    pub chapters: u32,
    pub words_tagged: u64,
    /// Pages by line count
    pub line_pages: u32,
    /// Pages by word count
    pub word_pages: u32,
    pub duration_ms: u64,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Tagged markup with word-count page markers interleaved
    pub lines: Vec<String>,
    pub markers: Vec<PageMarker>,
    pub breaks: Vec<BreakRecord>,
    pub stats: RunStats,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build every stage once so configuration errors surface before any
    /// input is read
    pub fn validate(&self) -> Result<()> {
        LineClassifier::new(&self.config.classifier)?;
        ParagraphTagger::new(self.config.tagger.clone())?;
        WordCountPaginator::new(self.config.paginator.clone())?;
        Ok(())
    }

    pub fn run<S: AsRef<str>>(&self, lines: &[S]) -> Result<PipelineOutput> {
        let start_time = Instant::now();
        let mut classifier = LineClassifier::new(&self.config.classifier)?;
        let mut normalizer = Normalizer::new(self.config.normalizer.clone());
        let tagger = ParagraphTagger::new(self.config.tagger.clone())?;
        let paginator = WordCountPaginator::new(self.config.paginator.clone())?;

        let classified = classifier.process(lines);
        let normalized = normalizer.process(&classified);
        let tagged = tagger.process(&normalized);
        let markers = paginator.process(&tagged.lines);
        let output = paginator::render_interleaved(&tagged.lines, &markers);

        let stats = RunStats {
            lines_read: lines.len() as u64,
            lines_written: output.len() as u64,
            chapters: classifier.chapters(),
            words_tagged: tagged.words,
            line_pages: tagged.pages,
            word_pages: markers.len() as u32,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(
            "Pipeline complete: {} lines in, {} lines out, {} words",
            stats.lines_read, stats.lines_written, stats.words_tagged
        );

        Ok(PipelineOutput {
            lines: output,
            markers,
            breaks: tagged.breaks,
            stats,
        })
    }
}
