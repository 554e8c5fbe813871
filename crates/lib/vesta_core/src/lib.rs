//! # vesta_core
//!
//! Core domain logic for Vesta chat.

pub mod echo;
pub mod models;
pub mod session;

pub use models::{ChatRequest, ChatResponse, Message, Role};
pub use session::{ChatSession, ChatTransport, SessionState, TransportError};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
