//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes user-facing output according to the resolved format.
///
/// Progress lines go to stdout; warnings and errors go to stderr.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
    err_term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto → Human on a TTY, Plain when piped.
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.decorate("\u{2713}", msg, Tone::Good))
    }

    /// Stderr. Never suppressed.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.err_term.write_line(&self.decorate("\u{2717}", msg, Tone::Bad))
    }

    /// Stderr.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.err_term.write_line(&self.decorate("\u{26a0}", msg, Tone::Warn))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.decorate("\u{2139}", msg, Tone::Note))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout. Written even in quiet mode, since it is the
    /// requested result rather than progress.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn decorate(&self, glyph: &str, msg: &str, tone: Tone) -> String {
        if self.no_color {
            return format!("{glyph} {msg}");
        }
        match tone {
            Tone::Good => format!("{} {}", glyph.green().bold(), msg.green()),
            Tone::Bad => format!("{} {}", glyph.red().bold(), msg.red()),
            Tone::Warn => format!("{} {}", glyph.yellow().bold(), msg.yellow()),
            Tone::Note => format!("{} {}", glyph.blue().bold(), msg.blue()),
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Bad,
    Warn,
    Note,
}

// ── tests ─────────────────────────────────────────────────────────────────────
