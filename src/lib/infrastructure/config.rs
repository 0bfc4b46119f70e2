//! Configuration stores

mod memory;

pub use memory::InMemoryConfigStore;
