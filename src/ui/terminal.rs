//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, PiprTheme, UserInterface};

/// Writes messages to stdout and diagnostics to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: PiprTheme,
}

impl TerminalUI {
    /// Create a terminal UI, colored unless disabled or not a TTY.
    pub fn new(colors: bool) -> Self {
        let theme = if colors && should_use_colors() {
            PiprTheme::new()
        } else {
            PiprTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}
