//! Input schema declaration for tools.
//!
//! A tool declares its parameter contract explicitly through
//! [`InputSchema::builder`] at registration time. The schema is a
//! best-effort structural hint for clients, not a validator: type names are
//! whatever the tool author declares, unnormalized.
//!
//! A parameter is required iff it has no default value; defaulted
//! parameters still appear in `properties` but not in `required`.

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};

/// Type string recorded for a parameter without a declared type.
pub const NO_ANNOTATION: &str = "no annotation";

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParamSpec {
    name: String,
    ty: String,
    has_default: bool,
}

/// The input contract of a tool.
///
/// Serializes as `{"type": "object", "properties": {...}, "required": [...]}`
/// with parameters in declaration order, so `tool/list` output is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSchema {
    params: Vec<ParamSpec>,
}

impl InputSchema {
    /// Start declaring a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { params: Vec::new() }
    }

    /// Names of parameters without a default, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| !p.has_default)
            .map(|p| p.name.as_str())
    }

    /// All declared parameter names, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// Builder for [`InputSchema`]; pure, no side effects.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    params: Vec<ParamSpec>,
}

impl SchemaBuilder {
    /// Declare a parameter without a default value.
    pub fn required(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            ty: ty.into(),
            has_default: false,
        });
        self
    }

    /// Declare a parameter that carries a default value.
    pub fn optional(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            ty: ty.into(),
            has_default: true,
        });
        self
    }

    pub fn build(self) -> InputSchema {
        InputSchema {
            params: self.params,
        }
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut schema = serializer.serialize_struct("InputSchema", 3)?;
        schema.serialize_field("type", "object")?;
        schema.serialize_field("properties", &Properties(&self.params))?;
        schema.serialize_field("required", &self.required().collect::<Vec<_>>())?;
        schema.end()
    }
}

/// Serializes `properties` as a map in declaration order.
struct Properties<'a>(&'a [ParamSpec]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for param in self.0 {
            map.serialize_entry(&param.name, &Property { ty: &param.ty })?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Property<'a> {
    #[serde(rename = "type")]
    ty: &'a str,
}
