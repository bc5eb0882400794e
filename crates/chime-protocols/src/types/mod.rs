//! Common types used across chime crates.

mod common;

pub use common::*;
