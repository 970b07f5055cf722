pub mod config;
pub mod run;
pub mod steps;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use countup_core::config::OutputConfig;
use countup_core::{AnimationConfig, Endpoint, OutputFormat, ProgressOptions};

// Arguments shared by `run` and `steps`
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Start value, or @FILE to read it from a file
    #[arg(allow_hyphen_values = true)]
    pub from: String,
    /// End value, or @FILE to read it from a file
    #[arg(allow_hyphen_values = true)]
    pub to: String,
    /// Fractional digits to show
    #[arg(short, long)]
    pub decimals: Option<u32>,
    /// Total duration in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,
    /// Delay between steps in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
    /// Rewrite a single line instead of printing one line per step
    #[arg(long)]
    pub inline: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Plain,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plain => OutputFormat::Plain,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl CountArgs {
    /// Command-line flags over configured defaults
    pub fn options(&self, animation: &AnimationConfig) -> ProgressOptions {
        let mut options = animation.options();
        if let Some(decimals) = self.decimals {
            options.decimals = decimals;
        }
        if let Some(ms) = self.duration_ms {
            options.duration = Duration::from_millis(ms);
        }
        if let Some(ms) = self.delay_ms {
            options.delay = Duration::from_millis(ms);
        }
        options
    }

    pub fn printer(&self, output: &OutputConfig) -> StepPrinter {
        let format = self.format.map(OutputFormat::from).unwrap_or(output.format);
        StepPrinter::new(format, self.inline || output.inline)
    }

    pub fn endpoints(&self) -> Result<(Endpoint, Endpoint)> {
        Ok((parse_endpoint(&self.from)?, parse_endpoint(&self.to)?))
    }
}

/// Parse a literal number, or defer reading `@FILE` until construction
pub fn parse_endpoint(text: &str) -> Result<Endpoint> {
    if let Some(path) = text.strip_prefix('@') {
        let path = PathBuf::from(path);
        return Ok(Endpoint::try_computed(move || read_number(&path)));
    }

    let value: f64 = text
        .trim()
        .parse()
        .with_context(|| format!("Invalid number: {}", text))?;
    Ok(Endpoint::from(value))
}

fn read_number(path: &std::path::Path) -> std::result::Result<f64, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    content
        .trim()
        .parse()
        .map_err(|e| format!("{}: {}", path.display(), e))
}

#[derive(Serialize)]
struct StepLine<'a> {
    value: &'a str,
    step: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    at_ms: Option<u128>,
}

/// Writes steps to stdout in the chosen format
#[derive(Debug, Clone, Copy)]
pub struct StepPrinter {
    format: OutputFormat,
    inline: bool,
}

impl StepPrinter {
    pub fn new(format: OutputFormat, inline: bool) -> Self {
        Self { format, inline }
    }

    /// Print a value reported by a running animation
    pub fn value(&self, value: &str, step: u64) -> io::Result<()> {
        self.write(StepLine {
            value,
            step,
            done: None,
            at_ms: None,
        })
    }

    /// Print a precomputed step with its offset from the start
    pub fn planned(&self, value: &str, step: u64, done: bool, at: Duration) -> io::Result<()> {
        self.write(StepLine {
            value,
            step,
            done: Some(done),
            at_ms: Some(at.as_millis()),
        })
    }

    fn write(&self, line: StepLine<'_>) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let text = match self.format {
            OutputFormat::Plain => match line.at_ms {
                Some(at_ms) => format!("{:>6}ms  #{:<5} {}", at_ms, line.step, line.value),
                None => line.value.to_string(),
            },
            OutputFormat::Json => serde_json::to_string(&line)?,
        };

        if self.inline {
            // Clear the rest of the line in case the new value is shorter
            write!(out, "\r{}\x1b[K", text)?;
        } else {
            writeln!(out, "{}", text)?;
        }
        out.flush()
    }

    /// Terminate an inline line
    pub fn finish(&self) -> io::Result<()> {
        if self.inline {
            let mut out = io::stdout().lock();
            writeln!(out)?;
            out.flush()?;
        }
        Ok(())
    }
}
