//! The host attribute system, as seen by the builder.
//!
//! A plugin implements [`AttributeHost`] over its SDK's attribute function
//! sets; [`crate::registry::AttributeRegistry`] is the in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::options::ScalarUnit;
use crate::range::NumericRange;

/// Plain numeric attribute storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    Boolean,
    Int,
    /// Single-precision; color channels.
    Float,
    Double,
}

/// Generic typed-data attribute payloads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedDataKind {
    String,
    Mesh,
    /// Curves and line sets alike.
    NurbsCurve,
    IntArray,
    DoubleArray,
    VectorArray,
    /// Data type registered by the plugin itself.
    PluginData,
}

/// Property flags applied by the finalize step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFlags {
    pub readable: bool,
    pub writable: bool,
    pub storable: bool,
    pub keyable: bool,
    pub array: bool,
    pub uses_array_data_builder: bool,
}

/// Attribute construction primitives and property setters.
///
/// Handles are cheap to clone; ownership of the underlying attribute stays
/// with the host.
pub trait AttributeHost {
    type Handle: Clone;

    fn create_numeric(&mut self, name: &str, kind: NumericKind)
        -> Result<Self::Handle, BuildError>;

    /// Three existing numeric or unit children composed into one numeric parent.
    fn create_numeric_compound(
        &mut self,
        name: &str,
        children: [Self::Handle; 3],
    ) -> Result<Self::Handle, BuildError>;

    fn create_unit(&mut self, name: &str, unit: ScalarUnit) -> Result<Self::Handle, BuildError>;

    fn create_typed(&mut self, name: &str, data: TypedDataKind)
        -> Result<Self::Handle, BuildError>;

    fn create_matrix(&mut self, name: &str) -> Result<Self::Handle, BuildError>;

    /// A color parent over three existing float channels (R, G, B).
    fn create_color(
        &mut self,
        name: &str,
        channels: [Self::Handle; 3],
    ) -> Result<Self::Handle, BuildError>;

    fn create_message(&mut self, name: &str) -> Result<Self::Handle, BuildError>;

    /// A compound parent over already-built children, kept in the given order.
    fn create_compound(
        &mut self,
        name: &str,
        children: Vec<Self::Handle>,
    ) -> Result<Self::Handle, BuildError>;

    fn set_flags(&mut self, handle: &Self::Handle, flags: AttributeFlags)
        -> Result<(), BuildError>;

    fn set_range(&mut self, handle: &Self::Handle, range: &NumericRange)
        -> Result<(), BuildError>;

    /// Opaque position in the host's creation history.
    fn checkpoint(&self) -> usize {
        0
    }

    /// Discard every attribute created after `checkpoint`. Called when a
    /// request fails part way through. Hosts that cannot delete keep the default.
    fn rollback(&mut self, checkpoint: usize) {
        let _ = checkpoint;
    }
}
