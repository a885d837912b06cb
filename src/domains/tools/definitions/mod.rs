//! Individual tool implementations (one file per tool).
//!
//! Each tool declares its name, description, and input schema, and registers
//! an execute closure with the [`ToolRegistry`](super::ToolRegistry) at
//! startup.

mod create_csv;

pub use create_csv::CreateCsvTool;
