// src/gui/components/mod.rs
pub mod data_table;
pub mod error_panel;
pub mod stats_panel;
pub mod toolbar;
pub mod top_bar;
