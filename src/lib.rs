//! A browser terminal for a small Verilog workspace: a command
//! interpreter, a git model over an in-memory filesystem with push to
//! GitHub, and a vi-like editor.
//!
//! [`core`] holds all behavior and runs natively in tests; [`app`] and
//! [`components`] are the Leptos front end.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
