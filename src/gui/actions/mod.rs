// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy, export, spawn_*, poll_jobs}.

mod copy;     // src/gui/actions/copy.rs
mod export;   // src/gui/actions/export.rs
mod refresh;  // src/gui/actions/refresh.rs

pub use copy::copy;
pub use export::export;
pub use refresh::{JobResult, poll_jobs, spawn_check, spawn_reload};
