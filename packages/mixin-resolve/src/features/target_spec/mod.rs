//! Target Specifier Parser
//!
//! Turns the textual target mini-language into a [`TargetSpecifier`]:
//!
//! ```text
//! func_1234_a                      name only, first occurrence
//! func_1234_a{,3}                  up to three occurrences
//! *(III)Z                          every member taking three ints
//! <init>(Ljava/lang/String;)V      constructor
//! Lfoo/bar/Baz;func_1234_a(DDD)V   bytecode-style owner
//! foo.bar.Baz.func_1234_a(DDD)V    dotted owner, same target
//! ```

mod parser;
mod specifier;

pub use specifier::{Descriptor, TargetSpecifier};
