//! Model Context Protocol server layer.

pub mod handler;
pub mod transport;

pub use handler::EmbedServer;
