//! Command-line interface for doclens.

mod commands;
pub mod helpers;

pub use commands::{is_verbose, run};
