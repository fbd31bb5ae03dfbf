//! xboard front end for the MinMax engine.
//!
//! Reads protocol commands line by line, keeps the game in a [`Session`]
//! and answers on stdout. Logging goes to stderr so it never mixes with the
//! protocol.

pub mod config;
pub mod protocol;
pub mod session;

pub use config::EngineConfig;
pub use protocol::{is_move_string, Command, Response};
pub use session::Session;
