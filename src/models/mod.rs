//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`OutputLine`], [`OutputLineData`] - Terminal output types
//! - [`Focus`] - Which component receives keystrokes

mod terminal;

pub use terminal::{Focus, OutputLine, OutputLineData};
