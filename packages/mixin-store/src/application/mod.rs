//! Application layer: environment discovery, config loading and the store

pub mod environment;
pub mod store;

pub use environment::{ConfigLoader, Environment, LoadedMod, ProjectBinding};
pub use store::MixinStore;
