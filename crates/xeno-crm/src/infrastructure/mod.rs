//! Infrastructure layer

pub mod memory;

pub use memory::InMemoryBackend;
