//! # Chime Protocols
//!
//! Interface definitions shared between a chime host and its extensions.
//! Contains only traits and plain data types - no implementations.
//!
//! ## Core Traits
//!
//! - [`Extension`] - Base trait for all extensions
//! - [`Tool`] - Trait for tool implementations

pub mod error;
pub mod extension;
pub mod tool;
pub mod types;

// Re-export core traits
pub use extension::{Extension, ExtensionContext, ExtensionManifest};
pub use tool::{Tool, ToolContext, ToolDefinition, ToolResult};
pub use error::{ExtensionError, ToolError};
