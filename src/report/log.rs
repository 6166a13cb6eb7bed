//! Append-only run log
//!
//! Tees every report line to stdout and to the log file. The file is
//! opened in append/create mode and never truncated, so successive runs
//! accumulate in one log.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::report::LineSink;
use crate::{BenchError, Result};

/// Console + log file sink for one run
pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
    echo: Option<Box<dyn Write>>,
}

impl fmt::Debug for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLog")
            .field("path", &self.path)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

impl RunLog {
    /// Open (or create) the log file for appending, echoing lines to stdout
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                BenchError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("failed to open log file {}: {}", path.display(), e),
                ))
            })?;

        debug!(path = %path.display(), "run log opened");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            echo: Some(Box::new(io::stdout())),
        })
    }

    /// Enable or disable the stdout echo
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = if echo { Some(Box::new(io::stdout())) } else { None };
        self
    }

    /// Echo lines to `console` instead of stdout
    pub fn with_echo_to(mut self, console: impl Write + 'static) -> Self {
        self.echo = Some(Box::new(console));
        self
    }

    /// Whether lines are still echoed to the console
    pub fn is_echoing(&self) -> bool {
        self.echo.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered lines to disk and close the log
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl LineSink for RunLog {
    fn line(&mut self, text: &str) -> Result<()> {
        if let Some(console) = self.echo.as_mut() {
            match writeln!(console, "{}", text).and_then(|_| console.flush()) {
                Ok(()) => {}
                // Reader went away (e.g. piped into `head`); the log file still gets every line
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!(path = %self.path.display(), "console closed, logging to file only");
                    self.echo = None;
                }
                Err(e) => return Err(BenchError::IoError(e)),
            }
        }
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!(path = %self.path.display(), error = %e, "failed to flush run log");
        }
    }
}
