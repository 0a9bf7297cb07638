use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};

use folio::classifier::LineClassifier;
use folio::config::{
    ClassifierConfig, Layout, NormalizerConfig, PaginatorConfig, PipelineConfig, TaggerConfig,
};
use folio::normalizer::Normalizer;
use folio::paginator::{self, PageMarker, WordCountPaginator};
use folio::pipeline::{Pipeline, RunStats};
use folio::reader::{self, AsyncLineReader, InputSource, OutputSink, PendingOutput, ReaderConfig};
use folio::tagger::{BreakRecord, ParagraphTagger};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Converts plaintext literary works into word-addressable, paginated markup")]
#[command(version)]
struct Cli {
    /// Log per-page and per-chapter events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tag chapter headings and stage directions
    Classify {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        classify: ClassifyArgs,
    },
    /// Rewrite indentation, dashes, quotes, italics and ampersands
    Normalize {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        normalize: NormalizeArgs,
    },
    /// Tag paragraphs, lines and words and paginate by line count
    Tag {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        tag: TagArgs,
    },
    /// Paginate tagged markup by word count
    Paginate {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        paginate: PaginateArgs,
    },
    /// Run every stage in order
    Pipeline {
        #[command(flatten)]
        io: IoArgs,
        /// TOML file with pipeline settings; flags override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        classify: ClassifyArgs,
        #[command(flatten)]
        normalize: NormalizeArgs,
        #[command(flatten)]
        tag: TagArgs,
        #[command(flatten)]
        paginate: PaginateArgs,
    },
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write run statistics as JSON
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Regex for chapter heading lines
    #[arg(short = 'c', long = "chapter")]
    chapter_pattern: Option<String>,

    /// Use the built-in scripture book heading pattern
    #[arg(long, conflicts_with = "chapter_pattern")]
    scripture: bool,

    /// Regex for stage direction lines
    #[arg(short = 's', long = "stage")]
    stage_pattern: Option<String>,
}

impl ClassifyArgs {
    fn apply(&self, config: &mut ClassifierConfig) {
        if let Some(pattern) = &self.chapter_pattern {
            config.chapter_pattern = Some(pattern.clone());
            config.scripture = false;
        }
        if self.scripture {
            config.chapter_pattern = None;
            config.scripture = true;
        }
        if let Some(pattern) = &self.stage_pattern {
            config.stage_pattern = Some(pattern.clone());
        }
    }
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// Convert leading spaces to &nbsp; markers
    #[arg(long = "spaces")]
    preserve_spaces: bool,

    /// Convert -- to em-dashes
    #[arg(short = 'e', long)]
    em_dashes: bool,

    /// Convert straight quotes to smart quotes (needs manual review)
    #[arg(short = 'q', long = "quotes")]
    smart_quotes: bool,

    /// Process _underscores_ as italics
    #[arg(short = 'u', long)]
    italics: bool,

    /// Close unbalanced double quotes at blank lines
    #[arg(long)]
    reset_quotes_on_blank: bool,
}

impl NormalizeArgs {
    fn apply(&self, config: &mut NormalizerConfig) {
        config.preserve_spaces |= self.preserve_spaces;
        config.em_dashes |= self.em_dashes;
        config.smart_quotes |= self.smart_quotes;
        config.italics |= self.italics;
        config.reset_quotes_on_blank |= self.reset_quotes_on_blank;
    }
}

#[derive(Args, Debug)]
struct TagArgs {
    /// Lines per page (default: 30)
    #[arg(short = 'l', long)]
    lines_per_page: Option<u32>,

    /// Minimum lines on a page before a chapter heading starts a new one (default: 0)
    #[arg(short = 'm', long)]
    min_chapter_lines: Option<u32>,

    /// Break pages only at paragraph ends
    #[arg(short = 'p', long)]
    break_on_paragraph: bool,

    /// Debug mode: do not wrap words in tags
    #[arg(short = 'd', long)]
    debug: bool,

    /// End lines with soft break spans
    #[arg(long, conflicts_with = "justified")]
    ragged_right: bool,

    /// End lines with <br>
    #[arg(long)]
    justified: bool,

    /// Write chapter@page break records to a file
    #[arg(long)]
    breaks: Option<PathBuf>,

    /// Include chapter titles in break records
    #[arg(long)]
    record_titles: bool,
}

impl TagArgs {
    fn apply(&self, config: &mut TaggerConfig) {
        if let Some(lines) = self.lines_per_page {
            config.lines_per_page = lines;
        }
        if let Some(lines) = self.min_chapter_lines {
            config.min_chapter_lines = lines;
        }
        config.break_on_paragraph |= self.break_on_paragraph;
        config.debug |= self.debug;
        config.record_titles |= self.record_titles;
        if self.ragged_right {
            config.layout = Some(Layout::RaggedRight);
        } else if self.justified {
            config.layout = Some(Layout::Justified);
        }
    }
}

#[derive(Args, Debug)]
struct PaginateArgs {
    /// Words per page (default: 500)
    #[arg(short = 'w', long)]
    words_per_page: Option<usize>,

    /// Keep counting words after a page marker instead of restarting at zero
    #[arg(long)]
    no_reset: bool,

    /// Emit only the page marker index
    #[arg(long)]
    index_only: bool,
}

impl PaginateArgs {
    fn apply(&self, config: &mut PaginatorConfig) {
        if let Some(words) = self.words_per_page {
            config.words_per_page = words;
        }
        if self.no_reset {
            config.reset_after_page = false;
        }
    }

    fn render(&self, lines: &[String], markers: &[PageMarker]) -> Vec<String> {
        if self.index_only {
            paginator::render_index(markers)
        } else {
            paginator::render_interleaved(lines, markers)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the markup, so logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .json()
        .init();

    info!(?cli.command, "Parsed CLI arguments");

    match cli.command {
        Command::Classify { io, classify } => {
            let mut config = ClassifierConfig::default();
            classify.apply(&mut config);
            let mut classifier = LineClassifier::new(&config)?;

            let start = Instant::now();
            let lines = read_input(&io).await?;
            let output = classifier.process(&lines);
            let stats = RunStats {
                lines_read: lines.len() as u64,
                lines_written: output.len() as u64,
                chapters: classifier.chapters(),
                duration_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            };
            commit_outputs(&io, &output, None, &stats).await?;
        }
        Command::Normalize { io, normalize } => {
            let mut config = NormalizerConfig::default();
            normalize.apply(&mut config);
            let mut normalizer = Normalizer::new(config);

            let start = Instant::now();
            let lines = read_input(&io).await?;
            let output = normalizer.process(&lines);
            let stats = RunStats {
                lines_read: lines.len() as u64,
                lines_written: output.len() as u64,
                duration_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            };
            commit_outputs(&io, &output, None, &stats).await?;
        }
        Command::Tag { io, tag } => {
            let mut config = TaggerConfig::default();
            tag.apply(&mut config);
            let tagger = ParagraphTagger::new(config)?;

            let start = Instant::now();
            let lines = read_input(&io).await?;
            let doc = tagger.process(&lines);
            let stats = RunStats {
                lines_read: lines.len() as u64,
                lines_written: doc.lines.len() as u64,
                chapters: doc.breaks.len() as u32,
                words_tagged: doc.words,
                line_pages: doc.pages,
                duration_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            };
            let breaks = tag.breaks.as_deref().map(|path| (path, doc.breaks.as_slice()));
            commit_outputs(&io, &doc.lines, breaks, &stats).await?;
        }
        Command::Paginate { io, paginate } => {
            let mut config = PaginatorConfig::default();
            paginate.apply(&mut config);
            let paginator = WordCountPaginator::new(config)?;

            let start = Instant::now();
            let lines = read_input(&io).await?;
            let markers = paginator.process(&lines);
            let output = paginate.render(&lines, &markers);
            let stats = RunStats {
                lines_read: lines.len() as u64,
                lines_written: output.len() as u64,
                word_pages: markers.len() as u32,
                duration_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            };
            commit_outputs(&io, &output, None, &stats).await?;
        }
        Command::Pipeline {
            io,
            config,
            classify,
            normalize,
            tag,
            paginate,
        } => {
            let mut pipeline_config = match &config {
                Some(path) => PipelineConfig::load(path).await?,
                None => PipelineConfig::default(),
            };
            classify.apply(&mut pipeline_config.classifier);
            normalize.apply(&mut pipeline_config.normalizer);
            tag.apply(&mut pipeline_config.tagger);
            paginate.apply(&mut pipeline_config.paginator);

            let pipeline = Pipeline::new(pipeline_config);
            pipeline.validate()?;

            let lines = read_input(&io).await?;
            let run = pipeline.run(&lines)?;
            let output = if paginate.index_only {
                paginator::render_index(&run.markers)
            } else {
                run.lines
            };
            let breaks = tag.breaks.as_deref().map(|path| (path, run.breaks.as_slice()));
            commit_outputs(&io, &output, breaks, &run.stats).await?;
        }
    }

    Ok(())
}

async fn read_input(io: &IoArgs) -> Result<Vec<String>> {
    let source = InputSource::from_arg(io.input.clone());
    let reader = AsyncLineReader::new(ReaderConfig::default());
    let (lines, stats) = reader
        .read_lines(&source)
        .await
        .with_context(|| format!("Failed to read input {source:?}"))?;
    if stats.lossy_lines > 0 {
        tracing::warn!("{} lines held invalid UTF-8 and were decoded lossily", stats.lossy_lines);
    }
    Ok(lines)
}

/// Render the document, breaks file and stats, then write them all at once
async fn commit_outputs(
    io: &IoArgs,
    lines: &[String],
    breaks: Option<(&Path, &[BreakRecord])>,
    stats: &RunStats,
) -> Result<()> {
    let sink = OutputSink::from_arg(io.output.clone());
    let mut outputs = vec![PendingOutput::lines(sink, lines)];

    if let Some((path, records)) = breaks {
        let rendered: Vec<String> = records.iter().map(ToString::to_string).collect();
        outputs.push(PendingOutput::lines(OutputSink::File(path.to_path_buf()), &rendered));
        info!("Rendered {} break records for {}", records.len(), path.display());
    }
    if let Some(path) = &io.stats_out {
        let json = serde_json::to_string_pretty(stats).context("Failed to serialize stats")?;
        outputs.push(PendingOutput::text(OutputSink::File(path.clone()), json));
    }

    reader::commit(&outputs)
        .await
        .context("Failed to write outputs; no output was produced")?;
    Ok(())
}
