//! Compound expansion: turns a nested structure dictionary into child
//! attributes under one compound parent.
//!
//! Structure entries take three shapes:
//!   "speed": { "dataType": "Scalar", "uiMin": 0, "uiMax": 10 }   primitive child
//!   "ids":   "Integer[]"                                          raw sub-type string
//!   "pose":  { "offset": { "dataType": "Vec3" } }                 nested compound
//!   "items": { "dataType": "CompoundParam[]", "w": "Scalar" }      typed compound
//! A typed entry doubles as the structure of its child, so a typed compound
//! finds its members beside its own `dataType`. Null entries and the owner's
//! own `dataType` string are skipped.

use log::{debug, warn};

use crate::builder::AttributeBuilder;
use crate::config::BuilderConfig;
use crate::declared::{Cardinality, Classified, DeclaredType};
use crate::error::BuildError;
use crate::host::AttributeHost;
use crate::options::AttributeOptions;
use crate::request::AttributeRequest;
use crate::variant::Variant;

/// One decoded structure entry.
#[derive(Clone, Debug, PartialEq)]
pub enum CompoundChild {
    Primitive {
        name: String,
        data_type: DeclaredType,
        cardinality: Cardinality,
        options: AttributeOptions,
        /// The entry dictionary itself; members of a typed compound live here.
        structure: Option<Variant>,
    },
    /// Entry without a type string; expanded as a `CompoundParam` in its own right.
    Nested { name: String, structure: Variant },
    Legacy { name: String, type_name: String },
}

impl CompoundChild {
    pub fn name(&self) -> &str {
        match self {
            CompoundChild::Primitive { name, .. }
            | CompoundChild::Nested { name, .. }
            | CompoundChild::Legacy { name, .. } => name,
        }
    }
}

/// Decode the structure of compound `owner` into its children, in key order.
pub fn decode_structure(
    owner: &str,
    structure: Option<&Variant>,
    config: &BuilderConfig,
) -> Result<Vec<CompoundChild>, BuildError> {
    let structure = match structure {
        None | Some(Variant::Null) => {
            return Err(BuildError::MissingStructure {
                name: owner.to_string(),
            })
        }
        Some(s) => s,
    };
    let entries = structure
        .as_dict()
        .ok_or_else(|| BuildError::MalformedStructure {
            name: owner.to_string(),
            found: structure.kind().as_str(),
        })?;

    let mut children = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let child = match value {
            Variant::Null => {
                warn!("compound '{owner}': skipping null entry '{key}'");
                continue;
            }
            Variant::String(_) if *key == config.type_key => continue,
            Variant::String(raw) => primitive_child(key, raw, None, config)?,
            Variant::Dict(_) => match value.str_member(&config.type_key) {
                Some(raw) => primitive_child(key, raw, Some(value), config)?,
                None => CompoundChild::Nested {
                    name: key.clone(),
                    structure: value.clone(),
                },
            },
            // Rejected when the nested expansion finds it is not a dictionary.
            other => CompoundChild::Nested {
                name: key.clone(),
                structure: other.clone(),
            },
        };
        children.push(child);
    }
    Ok(children)
}

fn primitive_child(
    name: &str,
    raw: &str,
    entry: Option<&Variant>,
    config: &BuilderConfig,
) -> Result<CompoundChild, BuildError> {
    let spec = config
        .classify(raw)
        .map_err(|e| BuildError::in_child(name, e))?;
    let cardinality = spec.implied_cardinality();
    Ok(match spec.classified {
        Classified::Legacy(type_name) => CompoundChild::Legacy {
            name: name.to_string(),
            type_name,
        },
        Classified::Type(data_type) => CompoundChild::Primitive {
            name: name.to_string(),
            data_type,
            cardinality,
            options: AttributeOptions::from_variant(entry),
            structure: entry.cloned(),
        },
    })
}

impl<'h, H: AttributeHost> AttributeBuilder<'h, H> {
    /// Build every child first, then the compound parent once over all of them.
    pub(crate) fn build_compound(
        &mut self,
        request: &AttributeRequest,
    ) -> Result<H::Handle, BuildError> {
        let children = decode_structure(&request.name, request.structure.as_ref(), &self.config)?;

        let mut handles = Vec::with_capacity(children.len());
        for child in children {
            let child_request = match child {
                CompoundChild::Legacy { name, type_name } => {
                    warn!(
                        "compound '{}': skipping child '{name}' of legacy type '{type_name}'",
                        request.name
                    );
                    continue;
                }
                CompoundChild::Primitive {
                    name,
                    data_type,
                    cardinality,
                    options,
                    structure,
                } => AttributeRequest {
                    name,
                    data_type,
                    cardinality,
                    is_input: request.is_input,
                    is_output: request.is_output,
                    structure,
                    options,
                },
                CompoundChild::Nested { name, structure } => AttributeRequest {
                    name,
                    data_type: DeclaredType::CompoundParam,
                    cardinality: Cardinality::Single,
                    is_input: request.is_input,
                    is_output: request.is_output,
                    structure: Some(structure),
                    options: AttributeOptions::default(),
                },
            };
            let handle = self
                .build_node(&child_request)
                .map_err(|e| BuildError::in_child(&child_request.name, e))?;
            handles.push(handle);
        }

        let count = handles.len();
        let handle = self.host.create_compound(&request.name, handles)?;
        self.finalize(&handle, request)?;
        debug!(
            "built compound '{}' ({}) with {count} children",
            request.name, request.cardinality
        );
        Ok(handle)
    }
}
