//! Error types for the protocol layer.

mod extension;
mod tool;

pub use extension::*;
pub use tool::*;
