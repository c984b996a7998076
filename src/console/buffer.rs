use bevy::prelude::*;
use chrono::{Local, Timelike};

/// Scrolling console text. Slot 0 holds the newest line.
#[derive(Resource, Debug, Clone)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: vec![String::new(); capacity],
        }
    }

    /// Prints `line` stamped with the current local time.
    pub fn print(&mut self, line: impl AsRef<str>) {
        self.print_at(line, Local::now());
    }

    /// Prints `line` stamped with `time`, pushing every older line down one slot.
    pub fn print_at(&mut self, line: impl AsRef<str>, time: impl Timelike) {
        let line = line.as_ref();
        info!(target: "console", "{line}");

        if self.lines.is_empty() {
            return;
        }
        // Oldest line wraps around to slot 0 and is overwritten
        self.lines.rotate_right(1);
        self.lines[0] = format!(
            "{}:{}:{}: {}",
            time.hour(),
            time.minute(),
            time.second(),
            line
        );
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
