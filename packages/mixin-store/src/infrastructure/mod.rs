//! Infrastructure layer - ModSource adapters

pub mod fs;
pub mod memory;

pub use fs::DirectoryModSource;
pub use memory::InMemoryModSource;
