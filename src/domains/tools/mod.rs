//! Tools domain module.
//!
//! Tools are executable functions that can be called by MCP clients via
//! `tool/call` and enumerated via `tool/list`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Central tool registry: registration and lookup
//! - `schema.rs` - Explicit input schema declaration
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define `NAME`, `DESCRIPTION`, `schema()`, and `execute()`
//! 3. Export it in `definitions/mod.rs`
//! 4. Call its `register()` from `main.rs` before the transport starts

pub mod definitions;
mod error;
mod registry;
mod schema;

pub use error::ToolError;
pub use registry::{ToolDescriptor, ToolHandler, ToolRegistry};
pub use schema::{InputSchema, NO_ANNOTATION, SchemaBuilder};
