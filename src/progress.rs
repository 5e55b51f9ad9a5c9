// src/progress.rs
use crate::specs::ItemId;

/// Lightweight progress reporting used by long-running operations (scrape/export).
/// Hosts implement this to surface status to users.
pub trait Progress {
    /// Called once the report count is known.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One report fetched (possibly with zero activities).
    fn item_done(&mut self, _id: &ItemId, _records: usize) {}

    /// One report failed and contributes nothing.
    fn item_failed(&mut self, _id: &ItemId, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Status lines on stderr for the command-line host.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, id: &ItemId, records: usize) {
        self.done += 1;
        eprintln!("  #{id}: {records} activities ({}/{})", self.done + self.failed, self.total);
    }

    fn item_failed(&mut self, id: &ItemId, error: &str) {
        self.failed += 1;
        eprintln!("  #{id}: failed: {error} ({}/{})", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        if self.total > 0 {
            eprintln!("Scraped {}/{} reports ({} failed)", self.done, self.total, self.failed);
        }
    }
}
