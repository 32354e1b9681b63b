//! Schema layer: serde types for the JSON log list and how to load them.
//!
//! This module is kept separate from rendering. It owns:
//! - Log / Operator / LogList shapes
//! - Reading a list from a file or stdin

pub mod log_list;

pub use log_list::{Log, LogList, Operator, load_log_list};
