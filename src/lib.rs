// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod filter;
pub mod gui;
pub mod model;
pub mod normalize;
pub mod progress;
pub mod rank;
pub mod refresh;
pub mod source;
pub mod stats;
