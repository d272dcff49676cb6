//! Declaration model implementations

mod in_memory;

pub use in_memory::InMemoryDeclarations;
