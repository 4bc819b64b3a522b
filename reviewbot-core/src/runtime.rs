//! Channels back to the workflow runner: step outputs and failure reporting
//!
//! Log lines go through `tracing`; this module only covers the two channels
//! that change what the runner sees as the step result.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::{Error, Result};

/// Sink for step outputs and the failure message
pub trait Runtime {
    /// Publish a named output
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.set_outputs(&[(name, value)])
    }

    /// Publish several outputs at once
    ///
    /// Either all outputs are published or none are.
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()>;

    /// Mark the run as failed with a message
    fn set_failed(&mut self, message: &str) -> Result<()>;
}

/// Runtime backed by the GitHub Actions runner
///
/// Outputs are appended to the `GITHUB_OUTPUT` file when one is configured,
/// otherwise they are emitted as legacy `::set-output` commands.
pub struct ActionsRuntime {
    output_file: Option<PathBuf>,
    out: Box<dyn Write + Send>,
}

impl ActionsRuntime {
    /// Create a runtime writing workflow commands to stdout
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self::with_writer(output_file, Box::new(std::io::stdout()))
    }

    /// Create a runtime writing workflow commands to `out`
    pub fn with_writer(output_file: Option<PathBuf>, out: Box<dyn Write + Send>) -> Self {
        Self {
            output_file: output_file.filter(|p| !p.as_os_str().is_empty()),
            out,
        }
    }
}

impl Runtime for ActionsRuntime {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
                let block = key_value_block(outputs, &delimiter)?;
                debug!(path = %path.display(), count = outputs.len(), "Writing outputs to file");
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(block.as_bytes())?;
            }
            None => {
                let block: String = outputs
                    .iter()
                    .map(|(name, value)| {
                        format!(
                            "::set-output name={}::{}\n",
                            escape_property(name),
                            escape_data(value)
                        )
                    })
                    .collect();
                self.out.write_all(block.as_bytes())?;
            }
        }
        Ok(())
    }

    fn set_failed(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "::error::{}", escape_data(message))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Runtime that records everything in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRuntime {
    /// Outputs in the order they were set
    pub outputs: Vec<(String, String)>,
    /// Failure message, if the run failed
    pub failure: Option<String>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value set for an output
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Runtime for MemoryRuntime {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()> {
        self.outputs.extend(
            outputs
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        Ok(())
    }

    fn set_failed(&mut self, message: &str) -> Result<()> {
        self.failure = Some(message.to_string());
        Ok(())
    }
}

fn key_value_message(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) {
        return Err(Error::Output(format!(
            "name should not contain the delimiter \"{}\"",
            delimiter
        )));
    }
    if value.contains(delimiter) {
        return Err(Error::Output(format!(
            "value should not contain the delimiter \"{}\"",
            delimiter
        )));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}"))
}

/// Render outputs in the heredoc format of the outputs file
///
/// Every entry is validated before anything is rendered.
fn key_value_block(outputs: &[(&str, &str)], delimiter: &str) -> Result<String> {
    let entries = outputs
        .iter()
        .map(|(name, value)| key_value_message(name, value, delimiter))
        .collect::<Result<Vec<_>>>()?;
    Ok(entries.iter().map(|entry| format!("{}\n", entry)).collect())
}

/// Escape a message for a workflow command
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
