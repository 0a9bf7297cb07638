//! Word-count paginator.
//!
//! A second, independent pagination of already paragraph-tagged markup: a new
//! page starts at the first paragraph opening once enough words have passed.

use std::fmt;
use tracing::{debug, info};

use crate::config::PaginatorConfig;
use crate::error::{MarkupError, Result};
use crate::markup;

/// Start of a word-count page at a 1-based input line position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub page: u32,
    pub position: usize,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&markup::word_count_marker(self.page, self.position))
    }
}

#[derive(Debug)]
pub struct WordCountPaginator {
    config: PaginatorConfig,
    position: usize,
    words: usize,
    page: u32,
    markers: Vec<PageMarker>,
}

impl WordCountPaginator {
    pub fn new(config: PaginatorConfig) -> Result<Self> {
        if config.words_per_page == 0 {
            return Err(MarkupError::config("words per page must be at least 1"));
        }
        Ok(Self {
            config,
            position: 1,
            words: 0,
            page: 1,
            // Page 1 starts before any input is read
            markers: vec![PageMarker { page: 1, position: 1 }],
        })
    }

    /// Words accumulated since the last reset
    pub fn words(&self) -> usize {
        self.words
    }

    pub fn observe(&mut self, line: &str) {
        self.words += markup::count_words(line);

        if self.words >= self.config.words_per_page && markup::is_paragraph_open(line) {
            self.page += 1;
            debug!(page = self.page, position = self.position, words = self.words, "Word-count page");
            self.markers.push(PageMarker {
                page: self.page,
                position: self.position,
            });
            if self.config.reset_after_page {
                self.words = 0;
            }
        }
        self.position += 1;
    }

    pub fn finish(self) -> Vec<PageMarker> {
        info!(
            "Word-count pagination: {} pages over {} lines",
            self.page,
            self.position - 1
        );
        self.markers
    }

    pub fn process<S: AsRef<str>>(mut self, lines: &[S]) -> Vec<PageMarker> {
        for line in lines {
            self.observe(line.as_ref());
        }
        self.finish()
    }
}

/// Marker lines only
pub fn render_index(markers: &[PageMarker]) -> Vec<String> {
    markers.iter().map(ToString::to_string).collect()
}

/// The document with each marker placed before the line it points at
pub fn render_interleaved<S: AsRef<str>>(lines: &[S], markers: &[PageMarker]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + markers.len());
    let mut pending = markers.iter().peekable();

    for (idx, line) in lines.iter().enumerate() {
        let position = idx + 1;
        while let Some(marker) = pending.next_if(|m| m.position <= position) {
            out.push(marker.to_string());
        }
        out.push(line.as_ref().to_string());
    }
    out.extend(pending.map(ToString::to_string));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A paragraph of `words` single-word tagged lines
    fn paragraph(first_id: u64, words: u64) -> Vec<String> {
        let mut lines = vec!["<p>".to_string()];
        for id in first_id..first_id + words {
            lines.push(format!(
                "{}<br>",
                markup::line_span(1, &markup::word(id, "w"))
            ));
        }
        lines.push("</p>".to_string());
        lines
    }

    fn config(words_per_page: usize, reset_after_page: bool) -> PaginatorConfig {
        PaginatorConfig {
            words_per_page,
            reset_after_page,
        }
    }

    #[test]
    fn test_initial_marker_only() {
        let markers = WordCountPaginator::new(PaginatorConfig::default())
            .unwrap()
            .process(&paragraph(1, 10));
        assert_eq!(markers, vec![PageMarker { page: 1, position: 1 }]);
        assert_eq!(render_index(&markers), vec!["page@1@1".to_string()]);
    }

    #[test]
    fn test_new_page_at_paragraph_after_threshold() {
        let mut doc = paragraph(1, 3);
        doc.extend(paragraph(4, 3));
        doc.extend(paragraph(7, 3));
        // lines: 1 <p>, 2-4 words, 5 </p>, 6 <p>, ...
        let markers = WordCountPaginator::new(config(3, true)).unwrap().process(&doc);
        assert_eq!(
            markers,
            vec![
                PageMarker { page: 1, position: 1 },
                PageMarker { page: 2, position: 6 },
                PageMarker { page: 3, position: 11 },
            ]
        );
    }

    #[test]
    fn test_reset_controls_subsequent_pages() {
        let mut doc = paragraph(1, 5);
        doc.extend(paragraph(6, 1));
        doc.extend(paragraph(7, 1));

        let reset = WordCountPaginator::new(config(5, true)).unwrap().process(&doc);
        assert_eq!(reset.len(), 2);

        // Without reset every later paragraph starts a page
        let sticky = WordCountPaginator::new(config(5, false)).unwrap().process(&doc);
        assert_eq!(sticky.len(), 3);
        assert_eq!(sticky[2], PageMarker { page: 3, position: 11 });
    }

    #[test]
    fn test_threshold_needs_paragraph_line() {
        let doc = paragraph(1, 10);
        let mut paginator = WordCountPaginator::new(config(2, true)).unwrap();
        for line in &doc {
            paginator.observe(line);
        }
        assert_eq!(paginator.words(), 10);
        assert_eq!(paginator.finish().len(), 1);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        assert!(WordCountPaginator::new(config(0, true)).is_err());
    }

    #[test]
    fn test_render_interleaved() {
        let lines = ["<p>", "a", "</p>", "<p>", "b", "</p>"];
        let markers = [
            PageMarker { page: 1, position: 1 },
            PageMarker { page: 2, position: 4 },
        ];
        assert_eq!(
            render_interleaved(&lines, &markers),
            vec!["page@1@1", "<p>", "a", "</p>", "page@2@4", "<p>", "b", "</p>"]
        );
    }

    #[test]
    fn test_render_interleaved_empty_document() {
        let markers = [PageMarker { page: 1, position: 1 }];
        assert_eq!(render_interleaved::<&str>(&[], &markers), vec!["page@1@1"]);
    }
}
