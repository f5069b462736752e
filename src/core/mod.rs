//! Core logic of the terminal, independent of the browser.
//!
//! This module provides:
//! - [`Session`], which owns all state and routes keystrokes
//! - [`commands`] parsing and execution on top of the [`parser`]
//! - [`VirtualFs`], the in-memory workspace
//! - [`git`], the repository model, and [`remote`], the hosting boundary
//! - [`editor`], the modal editor

pub mod commands;
pub mod editor;
pub mod error;
mod filesystem;
pub mod git;
pub mod parser;
pub mod remote;
pub mod session;
mod shell;

pub use editor::Key;
pub use filesystem::VirtualFs;
pub use session::{Effect, Session, SessionConfig, SubmitOutcome};
pub use shell::Shell;
