//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use std::fmt;
use std::io::{self, IsTerminal, Write};

use clap::ValueEnum;
use kanjideck_core::error::ErrorCode;
use serde::Serialize;

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line; empty values are skipped.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    let value = value.as_ref();
    if value.is_empty() {
        return Ok(());
    }
    writeln!(w, "{:<18} {}", format!("{key}:"), value)
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Plain tab-separated rows for pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {}
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, and TTY defaults.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, json_flag, env_val.as_deref(), is_tty)
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut *out)?,
        OutputMode::Pretty => pretty_fn(value, &mut *out)?,
    }
    out.flush()?;
    Ok(())
}

/// [`render_mode_to`] on stdout.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_mode_to(&mut out, mode, value, text_fn, pretty_fn)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A command failure tagged with its machine-readable code.
#[derive(Debug)]
pub struct CodedError {
    pub code: ErrorCode,
    pub source: anyhow::Error,
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.source)
    }
}

impl std::error::Error for CodedError {}

/// Attach an [`ErrorCode`] to a fallible result.
pub trait WithCode<T> {
    fn with_code(self, code: ErrorCode) -> anyhow::Result<T>;
}

impl<T, E: Into<anyhow::Error>> WithCode<T> for Result<T, E> {
    fn with_code(self, code: ErrorCode) -> anyhow::Result<T> {
        self.map_err(|err| {
            CodedError {
                code,
                source: err.into(),
            }
            .into()
        })
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// What kind of failure the code stands for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (`E####`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// An error carrying the code's hint as its suggestion.
    pub fn with_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            summary: Some(code.message().to_string()),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CodedError>() {
            Some(coded) => Self::with_code(coded.to_string(), coded.code),
            None => Self::with_code(format!("{err:#}"), ErrorCode::InternalUnexpected),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            write_error_text(&mut out, error)?;
        }
    }
    Ok(())
}

fn write_error_text(out: &mut dyn Write, error: &CliError) -> io::Result<()> {
    match (&error.error_code, &error.summary) {
        (Some(code), Some(summary)) => writeln!(out, "error[{code}]: {summary}: {}", error.message),
        (Some(code), None) => writeln!(out, "error[{code}]: {}", error.message),
        _ => writeln!(out, "error: {}", error.message),
    }?;
    if let Some(ref suggestion) = error.suggestion {
        writeln!(out, "  suggestion: {suggestion}")?;
    }
    Ok(())
}
