// src/progress.rs
/// Lightweight progress reporting for reloads.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called when a reload starts, with the source description.
    fn begin(&mut self, _source: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self, _ok: bool) {}
}
