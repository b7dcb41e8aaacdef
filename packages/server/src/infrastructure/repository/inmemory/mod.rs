//! InMemory Repository 実装

pub mod connection;
pub mod whiteboard;

pub use connection::InMemoryConnectionRegistry;
pub use whiteboard::InMemoryWhiteboardRepository;
