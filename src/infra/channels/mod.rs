// Implementations for the channel registry.

pub mod in_memory;

pub use in_memory::InMemoryChannelStore;
