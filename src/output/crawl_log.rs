use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Sink for the human-readable crawl log
///
/// Writing is best effort; a failing sink never affects a crawl.
pub trait CrawlLog: Send + Sync {
    fn record(&self, message: &str);
}

/// Appends `[YYYY-mm-dd HH:MM:SS] message` lines to a text file
#[derive(Debug)]
pub struct FileCrawlLog {
    path: PathBuf,
    // Serializes appends from concurrent crawls
    write_lock: Mutex<()>,
}

impl FileCrawlLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl CrawlLog for FileCrawlLog {
    fn record(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Err(e) = self.append(&format!("[{}] {}", timestamp, message)) {
            tracing::warn!("Failed to write crawl log {}: {}", self.path.display(), e);
        }
    }
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCrawlLog;

impl CrawlLog for NoopCrawlLog {
    fn record(&self, _message: &str) {}
}
