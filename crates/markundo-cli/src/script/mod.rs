//! Replay scripts
//!
//! A script describes an initial document and a sequence of editing steps.
//! The document is loaded before the engine attaches, so only the steps
//! are undoable.

pub mod format_v0;
pub mod parser;
pub mod paths;
pub mod runner;

pub use parser::parse_script_file;
pub use runner::run_script;
