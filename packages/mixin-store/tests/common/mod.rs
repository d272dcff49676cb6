//! Common test utilities for mixin-store

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
