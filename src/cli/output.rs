//! Terminal output with colors.

use colored::Colorize;
use std::io::{self, Write};

/// Writes user-facing messages; diagnostics go through `log` instead.
#[derive(Debug, Clone, Default)]
pub struct OutputManager;

impl OutputManager {
    pub fn new() -> Self {
        Self
    }

    /// Plain line on stdout
    pub fn println(&self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message)
    }

    /// Yellow notice on stdout
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message.yellow())
    }

    /// Plain line on stderr
    pub fn eprintln(&self, message: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", message)
    }

    /// Red error line on stderr
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", message.red())
    }
}
