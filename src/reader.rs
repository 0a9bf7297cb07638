use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::error::{MarkupError, Result};

const BOM: char = '\u{feff}';

/// Where document lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        path.map_or(InputSource::Stdin, InputSource::File)
    }

    fn label(&self) -> PathBuf {
        match self {
            InputSource::Stdin => PathBuf::from("<stdin>"),
            InputSource::File(path) => path.clone(),
        }
    }
}

/// Where markup lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        path.map_or(OutputSink::Stdout, OutputSink::File)
    }
}

/// Configuration for line reading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for one read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub source: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    /// Lines that held invalid UTF-8 and were decoded lossily
    pub lossy_lines: u64,
}

/// Async reader that collects a whole document as lines
pub struct AsyncLineReader {
    config: ReaderConfig,
}

impl AsyncLineReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read every line of `source`, without line terminators.
    /// A leading byte order mark is dropped and invalid UTF-8 is replaced.
    pub async fn read_lines(&self, source: &InputSource) -> Result<(Vec<String>, ReadStats)> {
        let label = source.label();
        debug!("Starting async read of {}", label.display());

        match source {
            InputSource::Stdin => {
                let reader = BufReader::with_capacity(self.config.buffer_size, tokio::io::stdin());
                collect_lines(reader, &label).await
            }
            InputSource::File(path) => {
                let file = File::open(path)
                    .await
                    .map_err(|e| MarkupError::io(path, e))?;
                let reader = BufReader::with_capacity(self.config.buffer_size, file);
                collect_lines(reader, &label).await
            }
        }
    }
}

async fn collect_lines<R: AsyncBufRead + Unpin>(
    mut reader: R,
    label: &Path,
) -> Result<(Vec<String>, ReadStats)> {
    let start_time = std::time::Instant::now();
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut bytes_read = 0u64;
    let mut lossy_lines = 0u64;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| MarkupError::io(label, e))?;
        if n == 0 {
            break;
        }
        bytes_read += n as u64;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let mut line = match String::from_utf8(buf.clone()) {
            Ok(line) => line,
            Err(_) => {
                lossy_lines += 1;
                String::from_utf8_lossy(&buf).into_owned()
            }
        };
        if lines.is_empty() {
            if let Some(stripped) = line.strip_prefix(BOM) {
                line = stripped.to_string();
            }
        }
        lines.push(line);
    }

    let stats = ReadStats {
        source: label.display().to_string(),
        lines_read: lines.len() as u64,
        bytes_read,
        duration_ms: start_time.elapsed().as_millis() as u64,
        lossy_lines,
    };
    info!(
        "Read {}: {} lines, {} bytes in {}ms",
        stats.source, stats.lines_read, stats.bytes_read, stats.duration_ms
    );
    Ok((lines, stats))
}

/// A fully rendered output waiting to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOutput {
    pub sink: OutputSink,
    pub content: String,
}

impl PendingOutput {
    /// Render `lines`, each newline-terminated
    pub fn lines<S: AsRef<str>>(sink: OutputSink, lines: &[S]) -> Self {
        let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        Self { sink, content }
    }

    pub fn text(sink: OutputSink, content: String) -> Self {
        Self { sink, content }
    }
}

/// Sibling staging path that is renamed over `path` on commit
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy());
    path.with_file_name(format!(".{name}.partial"))
}

async fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        // Best effort; the commit error is what gets reported
        let _ = tokio::fs::remove_file(tmp).await;
    }
}

/// Write every output or none of them.
///
/// File outputs are staged next to their targets and renamed into place
/// only once all of them were written. Stdout goes last, after every file
/// is in place. Returns the number of bytes written.
pub async fn commit(outputs: &[PendingOutput]) -> Result<u64> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::new();
    for output in outputs {
        if let OutputSink::File(path) = &output.sink {
            let tmp = staging_path(path);
            if let Err(e) = tokio::fs::write(&tmp, output.content.as_bytes()).await {
                discard(&staged).await;
                return Err(MarkupError::io(path, e));
            }
            staged.push((tmp, path));
        }
    }

    for (idx, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = tokio::fs::rename(tmp, path).await {
            discard(&staged[idx..]).await;
            return Err(MarkupError::io(*path, e));
        }
    }

    let label = Path::new("<stdout>");
    let mut stdout = tokio::io::stdout();
    for output in outputs.iter().filter(|o| o.sink == OutputSink::Stdout) {
        stdout
            .write_all(output.content.as_bytes())
            .await
            .map_err(|e| MarkupError::io(label, e))?;
    }
    stdout.flush().await.map_err(|e| MarkupError::io(label, e))?;

    let written: u64 = outputs.iter().map(|o| o.content.len() as u64).sum();
    debug!("Committed {} outputs, {} bytes", outputs.len(), written);
    Ok(written)
}

/// Write all lines, each newline-terminated, in a single write.
/// Nothing is written until the caller has the complete document.
pub async fn write_lines<S: AsRef<str>>(sink: &OutputSink, lines: &[S]) -> Result<u64> {
    commit(&[PendingOutput::lines(sink.clone(), lines)]).await
}

/// Convenience function for reading a single file with default configuration
pub async fn read_file_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let reader = AsyncLineReader::new(ReaderConfig::default());
    let (lines, _stats) = reader
        .read_lines(&InputSource::File(path.as_ref().to_path_buf()))
        .await?;
    Ok(lines)
}
