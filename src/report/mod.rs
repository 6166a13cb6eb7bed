//! Console and log reporting
//!
//! Everything the harness prints goes through a [`LineSink`]. The
//! production sink is [`RunLog`], which echoes each line to stdout and
//! appends it to the run log file.

pub mod export;
pub mod log;
pub mod summary;

use crate::Result;

pub use export::RunReport;
pub use log::RunLog;

/// Destination for human-readable report lines
pub trait LineSink {
    /// Emit one line (without trailing newline)
    fn line(&mut self, text: &str) -> Result<()>;

    /// Emit every line in order
    fn lines(&mut self, lines: &[String]) -> Result<()> {
        for text in lines {
            self.line(text)?;
        }
        Ok(())
    }
}

/// Captures lines in memory
impl LineSink for Vec<String> {
    fn line(&mut self, text: &str) -> Result<()> {
        self.push(text.to_string());
        Ok(())
    }
}
