//! Where click handlers report what happened.
//!
//! The console is user-facing output, separate from `tracing` diagnostics.

pub mod recording;

use std::io::{self, Write};

/// A line-oriented log sink. Could be stdout, a buffer, a UI pane.
pub trait Console: Send + Sync {
    fn log(&self, line: &str);

    /// Log `lines` back to back. Lines from other callers never land in
    /// between them.
    fn log_all(&self, lines: &[&str]);
}

/// Writes each line to stdout.
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn log(&self, line: &str) {
        self.log_all(&[line]);
    }

    fn log_all(&self, lines: &[&str]) {
        let mut out = io::stdout().lock();
        for line in lines {
            if writeln!(out, "{line}").is_err() {
                return;
            }
        }
        let _ = out.flush();
    }
}
