//! Attribute requests and the JSON declaration boundary.
//!
//! A declaration arrives as JSON, e.g.
//!   { "name": "twist", "dataType": "Scalar", "arrayType": "Single Value",
//!     "portMode": "In", "options": { "uiMin": 0, "uiMax": 360, "scalarUnit": "angle" } }
//! and is classified once into a strongly typed [`AttributeRequest`].

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::builder::Outcome;
use crate::config::BuilderConfig;
use crate::declared::{Cardinality, Classified, DeclaredType, PortMode};
use crate::error::BuildError;
use crate::options::AttributeOptions;
use crate::variant::Variant;

/// Everything the builder needs for one attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRequest {
    pub name: String,
    pub data_type: DeclaredType,
    pub cardinality: Cardinality,
    pub is_input: bool,
    pub is_output: bool,
    /// Nested structure; required for `CompoundParam`, ignored otherwise.
    pub structure: Option<Variant>,
    pub options: AttributeOptions,
}

impl AttributeRequest {
    /// An input attribute with no structure and default options.
    pub fn new(
        name: impl Into<String>,
        data_type: DeclaredType,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            cardinality,
            is_input: true,
            is_output: false,
            structure: None,
            options: AttributeOptions::default(),
        }
    }

    pub fn with_direction(mut self, is_input: bool, is_output: bool) -> Self {
        self.is_input = is_input;
        self.is_output = is_output;
        self
    }

    pub fn with_port_mode(self, mode: PortMode) -> Self {
        self.with_direction(mode.is_input(), mode.is_output())
    }

    pub fn with_structure(mut self, structure: Variant) -> Self {
        self.structure = Some(structure);
        self
    }

    pub fn with_options(mut self, options: AttributeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn port_mode(&self) -> Option<PortMode> {
        PortMode::from_flags(self.is_input, self.is_output)
    }

    /// Classify raw type/array strings into a request.
    ///
    /// Without an explicit `array_type`, an array annotation on the type string
    /// (`Scalar[]`, `Scalar[3]`) selects `Array (Multi)`. Legacy type names come
    /// back as [`Outcome::Ignored`]. Range and unit hints are read from
    /// `options`, or from `structure` when no options are given.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        config: &BuilderConfig,
        name: &str,
        data_type: &str,
        array_type: Option<&str>,
        is_input: bool,
        is_output: bool,
        structure: Option<&Variant>,
        options: Option<&Variant>,
    ) -> Result<Outcome<AttributeRequest>, BuildError> {
        let spec = config.classify(data_type)?;
        let data_type = match spec.classified {
            Classified::Type(t) => t,
            Classified::Legacy(type_name) => return Ok(Outcome::Ignored { type_name }),
        };
        let cardinality = match array_type {
            Some(label) => label.parse::<Cardinality>()?,
            None => spec.implied_cardinality(),
        };
        Ok(Outcome::Built(AttributeRequest {
            name: name.to_string(),
            data_type,
            cardinality,
            is_input,
            is_output,
            structure: structure.filter(|s| !s.is_null()).cloned(),
            options: AttributeOptions::from_variant(options.or(structure)),
        }))
    }
}

/// Serialized form of one parameter declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDeclaration {
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_type: Option<String>,
    /// `In`, `Out` or `IO`. Takes precedence over the flag pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_input: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_output: Option<bool>,
    #[serde(default, alias = "compoundStructure", skip_serializing_if = "Option::is_none")]
    pub structure: Option<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Variant>,
}

impl AttributeDeclaration {
    pub fn from_json(value: JsonValue) -> Result<Self, BuildError> {
        serde_json::from_value(value).map_err(|e| BuildError::InvalidDeclaration(e.to_string()))
    }

    /// Input/output flags. With neither a port mode nor flags the attribute
    /// is an input; a lone flag leaves the other side off.
    pub fn direction(&self) -> Result<(bool, bool), BuildError> {
        if let Some(mode) = &self.port_mode {
            let mode: PortMode = mode.parse()?;
            return Ok((mode.is_input(), mode.is_output()));
        }
        Ok(match (self.is_input, self.is_output) {
            (None, None) => (true, false),
            (input, output) => (input.unwrap_or(false), output.unwrap_or(false)),
        })
    }

    pub fn to_request(
        &self,
        config: &BuilderConfig,
    ) -> Result<Outcome<AttributeRequest>, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::InvalidDeclaration(format!(
                "declaration of type '{}' has an empty name",
                self.data_type
            )));
        }
        let (is_input, is_output) = self.direction()?;
        AttributeRequest::from_parts(
            config,
            &self.name,
            &self.data_type,
            self.array_type.as_deref(),
            is_input,
            is_output,
            self.structure.as_ref(),
            self.options.as_ref(),
        )
    }
}

/// Decode a declaration list. Accepts a bare array, an object with an
/// `attributes` array, or a single declaration object.
pub fn declarations_from_json(value: JsonValue) -> Result<Vec<AttributeDeclaration>, BuildError> {
    match value {
        JsonValue::Array(items) => items
            .into_iter()
            .map(AttributeDeclaration::from_json)
            .collect(),
        JsonValue::Object(mut obj) => match obj.remove("attributes") {
            Some(JsonValue::Array(items)) => {
                items.into_iter().map(AttributeDeclaration::from_json).collect()
            }
            Some(other) => Err(BuildError::InvalidDeclaration(format!(
                "'attributes' must be an array, found {}",
                Variant::from_json(other).kind().as_str()
            ))),
            None => Ok(vec![AttributeDeclaration::from_json(JsonValue::Object(obj))?]),
        },
        other => Err(BuildError::InvalidDeclaration(format!(
            "expected a declaration object or array, found {}",
            Variant::from_json(other).kind().as_str()
        ))),
    }
}
