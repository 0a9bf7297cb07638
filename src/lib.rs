pub mod classifier;
pub mod config;
pub mod error;
pub mod markup;
pub mod normalizer;
pub mod paginator;
pub mod pipeline;
pub mod reader;
pub mod tagger;

// Re-export the stage types for convenient access
pub use classifier::LineClassifier;
pub use config::{
    ClassifierConfig, Layout, NormalizerConfig, PaginatorConfig, PipelineConfig, TaggerConfig,
};
pub use error::{MarkupError, Result};
pub use normalizer::Normalizer;
pub use paginator::{PageMarker, WordCountPaginator};
pub use pipeline::{Pipeline, PipelineOutput, RunStats};
pub use tagger::{BreakRecord, ParagraphTagger, TaggedDocument};
