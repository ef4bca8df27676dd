//! Command-line dashboard generating bicycle-rental analytics charts

pub mod app;

pub use app::{run, AppOptions};
