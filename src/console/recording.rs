use std::sync::Mutex;

use super::Console;

/// Keeps every logged line in memory. Used by tests.
#[derive(Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Console for RecordingConsole {
    fn log(&self, line: &str) {
        self.log_all(&[line]);
    }

    fn log_all(&self, lines: &[&str]) {
        let mut recorded = self.lines.lock().unwrap();
        recorded.extend(lines.iter().map(|line| line.to_string()));
    }
}
