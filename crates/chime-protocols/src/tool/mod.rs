//! Tool protocol definitions.
//!
//! Tools are the operations a host exposes to its callers.

mod traits;
mod definition;
mod context;
mod result;

pub use traits::*;
pub use definition::*;
pub use context::*;
pub use result::*;
