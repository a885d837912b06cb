//! CSV creation tool definition.
//!
//! Writes rows of JSON data to a CSV file under a configured output
//! directory and returns the created path. The core imposes nothing on what
//! a tool does internally; this one owns its own filesystem access.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::domains::tools::{InputSchema, ToolError, ToolRegistry};

/// CSV tool - creates a CSV file from a row object or an array of rows.
pub struct CreateCsvTool;

impl CreateCsvTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_csv";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a CSV file with the given data. \
        Data can be a single object or an array of objects; an optional column \
        list selects and orders the output columns. Returns the created path.";

    /// The tool's declared input contract.
    pub fn schema() -> InputSchema {
        InputSchema::builder()
            .required("filename", "str")
            .required("data", "list | dict")
            .optional("columns", "list")
            .build()
    }

    /// Register this tool, binding it to an output directory.
    pub fn register(registry: &mut ToolRegistry, output_dir: &Path) {
        let output_dir = output_dir.to_path_buf();
        registry.register(Self::NAME, Self::DESCRIPTION, Self::schema(), move |args| {
            Self::execute(&output_dir, args)
        });
    }

    /// Execute the tool logic.
    fn execute(output_dir: &Path, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let filename = args
            .get("filename")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_arguments("filename must be a string"))?;

        let data = args
            .get("data")
            .ok_or_else(|| ToolError::invalid_arguments("data is required"))?;

        let rows = collect_rows(data)?;
        let columns = match args.get("columns") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => collect_columns(value)?,
        };
        // An absent or empty column list means "infer from the rows".
        let columns = if columns.is_empty() {
            infer_columns(&rows)
        } else {
            columns
        };

        let filepath = resolve_path(output_dir, filename)?;
        let csv = render_csv(&columns, &rows);
        fs::write(&filepath, csv)?;

        info!("CSV tool wrote {} row(s) to {}", rows.len(), filepath.display());
        Ok(Value::String(filepath.display().to_string()))
    }
}

/// Accept a single row object or an array of row objects.
fn collect_rows(data: &Value) -> Result<Vec<&Map<String, Value>>, ToolError> {
    match data {
        Value::Object(row) => Ok(vec![row]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object().ok_or_else(|| {
                    ToolError::invalid_arguments("data rows must be objects")
                })
            })
            .collect(),
        _ => Err(ToolError::invalid_arguments(
            "data must be an object or an array of objects",
        )),
    }
}

fn collect_columns(value: &Value) -> Result<Vec<String>, ToolError> {
    let items = value
        .as_array()
        .ok_or_else(|| ToolError::invalid_arguments("columns must be an array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ToolError::invalid_arguments("columns must be an array of strings")
            })
        })
        .collect()
}

/// Column order when none is given: first appearance across all rows.
fn infer_columns(rows: &[&Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Normalize the filename to a `.csv` path under the output directory,
/// creating the directory if needed.
fn resolve_path(output_dir: &Path, filename: &str) -> Result<PathBuf, ToolError> {
    let filename = if filename.ends_with(".csv") {
        filename.to_string()
    } else {
        format!("{filename}.csv")
    };
    fs::create_dir_all(output_dir)?;
    Ok(output_dir.join(filename))
}

fn render_csv(columns: &[String], rows: &[&Map<String, Value>]) -> String {
    let mut out = String::new();
    append_record(&mut out, columns.iter().map(String::as_str));
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| render_cell(row.get(column)))
            .collect();
        append_record(&mut out, cells.iter().map(String::as_str));
    }
    out
}

fn append_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// Missing cells render empty; strings render raw; anything else renders as
/// its JSON text.
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// RFC-4180 style quoting: quote fields containing separators or quotes,
/// doubling embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
