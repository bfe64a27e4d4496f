// src/progress.rs
use std::path::Path;

/// Progress reporting for a run. Frontends implement this to surface status.
pub trait Progress {
    /// Called at the start with the number of exports to produce.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One export file was written.
    fn item_done(&mut self, _path: &Path) {}

    /// Called at the end of a successful run.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
