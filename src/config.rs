//! Stage configuration.
//!
//! Every stage takes its own config struct. `PipelineConfig` bundles them and
//! can be loaded from a TOML file; CLI flags are applied on top of it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MarkupError, Result};

/// Line classifier patterns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Regex matching chapter heading lines
    pub chapter_pattern: Option<String>,
    /// Regex matching stage direction lines
    pub stage_pattern: Option<String>,
    /// Use the built-in scripture book/epistle heading pattern for chapters
    pub scripture: bool,
}

/// Typographic normalizer toggles, all off by default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Leading spaces become `&nbsp;` markers
    pub preserve_spaces: bool,
    /// `--` becomes an em-dash
    pub em_dashes: bool,
    /// Straight quotes become typographic quotes
    pub smart_quotes: bool,
    /// `_text_` becomes `<i>text</i>`
    pub italics: bool,
    /// Close an unbalanced double quote at every blank line
    pub reset_quotes_on_blank: bool,
}

/// How each tagged line is terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Lines end with an explicit `<br>`
    Justified,
    /// Lines end with a soft break span and wrap freely
    RaggedRight,
}

/// Paragraph & word tagger settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaggerConfig {
    pub lines_per_page: u32,
    /// Lines a page needs before a chapter heading may start a new page
    pub min_chapter_lines: u32,
    /// Only break pages at paragraph ends
    pub break_on_paragraph: bool,
    /// Leave words untagged
    pub debug: bool,
    /// Required; there is no default layout
    pub layout: Option<Layout>,
    /// Include chapter titles in break records
    pub record_titles: bool,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            lines_per_page: 30,
            min_chapter_lines: 0,
            break_on_paragraph: false,
            debug: false,
            layout: None,
            record_titles: false,
        }
    }
}

impl TaggerConfig {
    /// Check the settings the tagger cannot run without
    pub fn validate(&self) -> Result<Layout> {
        if self.lines_per_page == 0 {
            return Err(MarkupError::config("lines per page must be at least 1"));
        }
        self.layout.ok_or_else(|| {
            MarkupError::config("line layout must be set explicitly (justified or ragged-right)")
        })
    }
}

/// Word-count paginator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorConfig {
    pub words_per_page: usize,
    /// Restart the word count after each page marker
    pub reset_after_page: bool,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            words_per_page: 500,
            reset_after_page: true,
        }
    }
}

/// Configuration for a full pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub classifier: ClassifierConfig,
    pub normalizer: NormalizerConfig,
    pub tagger: TaggerConfig,
    pub paginator: PaginatorConfig,
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| MarkupError::ConfigFile {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a pipeline config from a TOML file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MarkupError::io(path, e))?;
        Self::from_toml_str(&content, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagger_defaults() {
        let config = TaggerConfig::default();
        assert_eq!(config.lines_per_page, 30);
        assert_eq!(config.min_chapter_lines, 0);
        assert!(!config.break_on_paragraph);
        assert!(config.layout.is_none());
    }

    #[test]
    fn test_tagger_requires_layout() {
        let config = TaggerConfig::default();
        assert!(matches!(config.validate(), Err(MarkupError::Configuration(_))));

        let config = TaggerConfig {
            layout: Some(Layout::RaggedRight),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap(), Layout::RaggedRight);
    }

    #[test]
    fn test_tagger_rejects_zero_page_size() {
        let config = TaggerConfig {
            lines_per_page: 0,
            layout: Some(Layout::Justified),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pipeline_config_from_toml() {
        let content = r#"
[classifier]
chapter_pattern = "^CHAPTER"

[normalizer]
em_dashes = true
smart_quotes = true

[tagger]
lines_per_page = 40
layout = "ragged-right"

[paginator]
reset_after_page = false
"#;
        let config = PipelineConfig::from_toml_str(content, Path::new("book.toml")).unwrap();
        assert_eq!(config.classifier.chapter_pattern.as_deref(), Some("^CHAPTER"));
        assert!(config.normalizer.em_dashes);
        assert!(!config.normalizer.italics);
        assert_eq!(config.tagger.lines_per_page, 40);
        assert_eq!(config.tagger.layout, Some(Layout::RaggedRight));
        assert_eq!(config.paginator.words_per_page, 500);
        assert!(!config.paginator.reset_after_page);
    }

    #[test]
    fn test_pipeline_config_rejects_unknown_keys() {
        let result = PipelineConfig::from_toml_str("[tagger]\npage_size = 3\n", Path::new("bad.toml"));
        assert!(matches!(result, Err(MarkupError::ConfigFile { .. })));
    }
}
