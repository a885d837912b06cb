//! Tool Registry - central registration and lookup for all tools.
//!
//! Tools register themselves imperatively at startup; after the transport
//! loop starts the registry is shared read-only, so no locking is needed
//! during a run.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use super::error::ToolError;
use super::schema::InputSchema;

/// A tool's callable. Receives the request's `arguments` object and returns
/// a value convertible to text, or a structured error.
pub type ToolHandler = Box<dyn Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync>;

/// An immutable named tool entry: name, description, input contract, handler.
pub struct ToolDescriptor {
    name: String,
    description: String,
    schema: InputSchema,
    handler: ToolHandler,
}

impl ToolDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &InputSchema {
        &self.schema
    }

    /// Invoke the handler with the given named arguments.
    pub fn invoke(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        (self.handler)(arguments)
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Tool registry - manages all available tools.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under a unique name.
    ///
    /// Re-registration under the same name silently replaces the previous
    /// descriptor (last write wins).
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        schema: InputSchema,
        handler: impl Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync + 'static,
    ) {
        let descriptor = ToolDescriptor {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Box::new(handler),
        };

        match self.index.get(&descriptor.name) {
            Some(&slot) => {
                debug!("Overwriting tool registration: {}", descriptor.name);
                self.tools[slot] = descriptor;
            }
            None => {
                self.index.insert(descriptor.name.clone(), self.tools.len());
                self.tools.push(descriptor);
            }
        }
    }

    /// Look up a tool by name. Absence is a normal outcome, not a fault.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    /// All registered tools, in registration order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo_schema() -> InputSchema {
        InputSchema::builder().required("text", "str").build()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register("echo", "Echo the input back", echo_schema(), |args| {
            Ok(args.get("text").cloned().unwrap_or(Value::Null))
        });

        let tool = registry.get("echo").expect("tool should be registered");
        assert_eq!(tool.name(), "echo");
        assert_eq!(tool.description(), "Echo the input back");

        let mut args = Map::new();
        args.insert("text".to_string(), json!("hi"));
        assert_eq!(tool.invoke(&args).unwrap(), json!("hi"));
    }

    #[test]
    fn test_get_missing_is_none() {
        let registry = ToolRegistry::new();
        assert!(registry.get("missing").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = ToolRegistry::new();
        registry.register("b", "", echo_schema(), |_| Ok(Value::Null));
        registry.register("a", "", echo_schema(), |_| Ok(Value::Null));

        let names: Vec<_> = registry.tools().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_registration_overwrites_silently() {
        let mut registry = ToolRegistry::new();
        registry.register("echo", "first", echo_schema(), |_| Ok(json!(1)));
        registry.register("echo", "second", echo_schema(), |_| Ok(json!(2)));

        assert_eq!(registry.len(), 1);
        let tool = registry.get("echo").unwrap();
        assert_eq!(tool.description(), "second");
        assert_eq!(tool.invoke(&Map::new()).unwrap(), json!(2));
    }
}
