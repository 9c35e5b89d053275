//! Attribute builder: runs the dispatch table against an [`AttributeHost`].

use log::{debug, warn};
use serde_json::Value as JsonValue;

use crate::config::BuilderConfig;
use crate::declared::{Cardinality, DeclaredType};
use crate::error::BuildError;
use crate::host::{AttributeFlags, AttributeHost, NumericKind};
use crate::options::ScalarUnit;
use crate::request::{declarations_from_json, AttributeDeclaration, AttributeRequest};
use crate::table::{strategy_for, Strategy};
use crate::variant::Variant;

/// Result of a build that may legitimately produce nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Built(T),
    /// The declaration used a legacy type name and was skipped.
    Ignored { type_name: String },
}

impl<T> Outcome<T> {
    pub fn built(self) -> Option<T> {
        match self {
            Outcome::Built(v) => Some(v),
            Outcome::Ignored { .. } => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Built(v) => Outcome::Built(f(v)),
            Outcome::Ignored { type_name } => Outcome::Ignored { type_name },
        }
    }
}

/// Flags the finalize step applies to an attribute.
///
/// Complex data (meshes, curves, lines, plugin data) is never storable or
/// keyable. Only `Array (Multi)` attributes are arrays, and all of them except
/// keyframe tracks use the array data builder.
pub fn finalize_flags(
    data_type: DeclaredType,
    cardinality: Cardinality,
    is_input: bool,
    is_output: bool,
) -> AttributeFlags {
    let persistent = is_input && !is_output && !data_type.is_complex_data();
    let array = cardinality == Cardinality::ArrayOfCompounds;
    AttributeFlags {
        readable: is_output,
        writable: is_input,
        storable: persistent,
        keyable: persistent,
        array,
        uses_array_data_builder: array && data_type != DeclaredType::KeyframeTrack,
    }
}

/// Builds host attributes from requests. Borrows the host for its lifetime.
pub struct AttributeBuilder<'h, H: AttributeHost> {
    pub(crate) host: &'h mut H,
    pub(crate) config: BuilderConfig,
}

impl<'h, H: AttributeHost> AttributeBuilder<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Self::with_config(host, BuilderConfig::default())
    }

    pub fn with_config(host: &'h mut H, config: BuilderConfig) -> Self {
        Self { host, config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build one attribute (and any children) and return its handle.
    ///
    /// A failure anywhere in the request, nested children included, rolls the
    /// host back to where it stood before the call.
    pub fn build(&mut self, request: &AttributeRequest) -> Result<H::Handle, BuildError> {
        let checkpoint = self.host.checkpoint();
        let result = self.build_node(request);
        if let Err(err) = &result {
            debug!("rolling back '{}': {err}", request.name);
            self.host.rollback(checkpoint);
        }
        result
    }

    pub(crate) fn build_node(
        &mut self,
        request: &AttributeRequest,
    ) -> Result<H::Handle, BuildError> {
        let strategy = strategy_for(request.data_type, request.cardinality)?;
        let name = request.name.as_str();
        let handle = match strategy {
            Strategy::Compound => return self.build_compound(request),
            Strategy::Numeric(kind) => self.host.create_numeric(name, kind)?,
            Strategy::Scalar => match request.options.scalar_unit {
                Some(unit) => self.host.create_unit(name, unit)?,
                None => self.host.create_numeric(name, NumericKind::Double)?,
            },
            Strategy::Typed(data) => self.host.create_typed(name, data)?,
            Strategy::Vec3Components => {
                let [x, y, z] = self.build_components(request, Component::Double)?;
                self.host.create_numeric_compound(name, [x, y, z])?
            }
            Strategy::EulerComponents => {
                let [x, y, z] = self.build_components(request, Component::Angle)?;
                self.host.create_numeric_compound(name, [x, y, z])?
            }
            Strategy::Matrix => self.host.create_matrix(name)?,
            Strategy::Color => {
                let [r, g, b] = self.build_components(request, Component::Channel)?;
                self.host.create_color(name, [r, g, b])?
            }
            Strategy::Message => self.host.create_message(name)?,
        };

        if strategy.takes_range() {
            if let Some(range) = request.options.range() {
                self.host.set_range(&handle, &range)?;
            }
        }
        self.finalize(&handle, request)?;
        debug!(
            "built {} attribute '{}' ({})",
            request.data_type, request.name, request.cardinality
        );
        Ok(handle)
    }

    /// Classify and build from raw type/array strings.
    #[allow(clippy::too_many_arguments)]
    pub fn build_attribute(
        &mut self,
        name: &str,
        data_type: &str,
        array_type: &str,
        is_input: bool,
        is_output: bool,
        structure: Option<&Variant>,
        options: Option<&Variant>,
    ) -> Result<Outcome<H::Handle>, BuildError> {
        let request = AttributeRequest::from_parts(
            &self.config,
            name,
            data_type,
            Some(array_type),
            is_input,
            is_output,
            structure,
            options,
        )?;
        self.build_outcome(name, request)
    }

    pub fn build_declaration(
        &mut self,
        decl: &AttributeDeclaration,
    ) -> Result<Outcome<H::Handle>, BuildError> {
        let request = decl.to_request(&self.config)?;
        self.build_outcome(&decl.name, request)
    }

    /// Build every declaration in a JSON document, stopping at the first error.
    pub fn build_json(&mut self, value: JsonValue) -> Result<Vec<Outcome<H::Handle>>, BuildError> {
        let decls = declarations_from_json(value)?;
        decls.iter().map(|d| self.build_declaration(d)).collect()
    }

    fn build_outcome(
        &mut self,
        name: &str,
        request: Outcome<AttributeRequest>,
    ) -> Result<Outcome<H::Handle>, BuildError> {
        match request {
            Outcome::Built(request) => self.build(&request).map(Outcome::Built),
            Outcome::Ignored { type_name } => {
                warn!("skipping attribute '{name}': legacy type '{type_name}'");
                Ok(Outcome::Ignored { type_name })
            }
        }
    }

    pub(crate) fn finalize(
        &mut self,
        handle: &H::Handle,
        request: &AttributeRequest,
    ) -> Result<(), BuildError> {
        let flags = finalize_flags(
            request.data_type,
            request.cardinality,
            request.is_input,
            request.is_output,
        );
        self.host.set_flags(handle, flags)
    }

    // X/Y/Z and R/G/B children share the parent's direction flags but are never arrays.
    fn build_components(
        &mut self,
        request: &AttributeRequest,
        component: Component,
    ) -> Result<[H::Handle; 3], BuildError> {
        let flags = AttributeFlags {
            array: false,
            uses_array_data_builder: false,
            ..finalize_flags(
                request.data_type,
                Cardinality::Single,
                request.is_input,
                request.is_output,
            )
        };
        let [s0, s1, s2] = match component {
            Component::Channel => self.config.color_suffixes.clone(),
            Component::Double | Component::Angle => self.config.component_suffixes.clone(),
        };
        let a = self.build_component(&format!("{}{s0}", request.name), component, flags)?;
        let b = self.build_component(&format!("{}{s1}", request.name), component, flags)?;
        let c = self.build_component(&format!("{}{s2}", request.name), component, flags)?;
        Ok([a, b, c])
    }

    fn build_component(
        &mut self,
        name: &str,
        component: Component,
        flags: AttributeFlags,
    ) -> Result<H::Handle, BuildError> {
        let handle = match component {
            Component::Double => self.host.create_numeric(name, NumericKind::Double)?,
            Component::Angle => self.host.create_unit(name, ScalarUnit::Angle)?,
            Component::Channel => self.host.create_numeric(name, NumericKind::Float)?,
        };
        self.host.set_flags(&handle, flags)?;
        Ok(handle)
    }
}

/// Storage of one child of a three-component attribute.
#[derive(Copy, Clone, Debug)]
enum Component {
    Double,
    Angle,
    Channel,
}
