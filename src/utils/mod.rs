//! Utility modules shared by the core and the UI.
//!
//! Provides:
//! - [`RingBuffer`] - Fixed-capacity buffer backing the scrollback
//! - [`logging`] - `tracing` subscriber that writes to the browser console

pub mod logging;
mod ring_buffer;

pub use ring_buffer::RingBuffer;
