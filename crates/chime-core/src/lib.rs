//! # Chime Core
//!
//! Host-side plumbing for chime.
//!
//! ## Components
//!
//! - [`Kernel`] - Loads extensions and drives their lifecycle
//! - [`ToolRegistry`] - Registry and dispatcher for tools

pub mod kernel;
pub mod registry;

pub use kernel::Kernel;
pub use registry::ToolRegistry;
