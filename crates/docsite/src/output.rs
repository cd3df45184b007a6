//! Terminal output for docsite commands.
//!
//! Command results (JSON trees, rewritten URLs) are written uncolored to
//! stdout so they can be piped. Status lines, warnings and errors go to
//! stderr with colors.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a status line to stderr.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.stderr.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.stderr.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.stderr.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.stderr.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .stderr
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a command result to stdout.
    pub(crate) fn data(&self, text: &str) {
        let _ = self.stdout.write_line(text);
    }
}
