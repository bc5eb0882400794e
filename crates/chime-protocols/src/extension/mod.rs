//! Extension protocol definitions.
//!
//! Extensions bundle tools and register them with the host at startup.

mod traits;
mod manifest;
mod context;

pub use traits::*;
pub use manifest::*;
pub use context::*;
