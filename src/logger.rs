use std::cell::RefCell;

/// Side-channel for the plugin's console lines.
///
/// The resolution code only ever writes to this; nothing it returns depends on
/// what a logger does with a line.
pub trait Logger {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn info(&self, msg: &str) {
        (**self).info(msg)
    }

    fn warn(&self, msg: &str) {
        (**self).warn(msg)
    }
}

/// Forwards to `tracing`, which the binary wires to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, msg: &str) {
        tracing::info!(target: "offline_env", "{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "offline_env", "{msg}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub message: String,
}

/// Keeps every line in memory (tests, dry runs).
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: RefCell<Vec<LogLine>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.borrow().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|l| l.level == level)
            .map(|l| l.message.clone())
            .collect()
    }

    fn push(&self, level: Level, msg: &str) {
        self.lines.borrow_mut().push(LogLine {
            level,
            message: msg.to_string(),
        });
    }
}

impl Logger for RecordingLogger {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }
}
