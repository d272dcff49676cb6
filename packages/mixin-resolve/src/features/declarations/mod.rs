//! Declarations - boundary to the declared-type model
//!
//! - ports/          - `DeclarationModel` trait
//! - infrastructure/ - DashMap-backed in-memory catalogue

pub mod infrastructure;
pub mod ports;

pub use infrastructure::InMemoryDeclarations;
pub use ports::DeclarationModel;
