//! # Prospector Bot
//!
//! Engine adapter for the Prospector bot.
//!
//! - [`protocol`] - Halite III text protocol: handshake, turn frames, commands
//! - [`session`] - One game's conversation with the engine
//! - [`logging`] - Per-player log file setup
//!
//! stdout is the command channel, so nothing in this crate prints; all
//! diagnostics go through `tracing` into the log file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod protocol;
pub mod session;

pub use protocol::{ProtocolError, Result};
pub use session::Session;
