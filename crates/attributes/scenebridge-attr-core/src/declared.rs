//! Declared data types, array cardinalities and port modes, parsed from the
//! literal strings the scene engine uses in its parameter declarations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;

/// Opens the array annotation of a type string: `Integer[]`, `Scalar[3]`.
/// Everything from the first marker on is dropped before lookup.
pub const ARRAY_MARKER: char = '[';

/// Type names kept only for old scenes. They classify successfully but never
/// produce an attribute.
pub const LEGACY_TYPE_NAMES: [&str; 3] = ["Execute", "ManipHandle", "DrawingHandle"];

/// Engine storage types that map onto one of the semantic kinds.
const TYPE_ALIASES: [(&str, DeclaredType); 15] = [
    ("Float32", DeclaredType::Scalar),
    ("Float64", DeclaredType::Scalar),
    ("SInt8", DeclaredType::Integer),
    ("SInt16", DeclaredType::Integer),
    ("SInt32", DeclaredType::Integer),
    ("SInt64", DeclaredType::Integer),
    ("Byte", DeclaredType::Integer),
    ("UInt8", DeclaredType::Integer),
    ("UInt16", DeclaredType::Integer),
    ("UInt32", DeclaredType::Integer),
    ("UInt64", DeclaredType::Integer),
    ("Count", DeclaredType::Integer),
    ("Index", DeclaredType::Integer),
    ("Size", DeclaredType::Integer),
    ("DataSize", DeclaredType::Integer),
];

/// Semantic data kind requested for an attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclaredType {
    Boolean,
    Integer,
    Scalar,
    String,
    Vec3,
    Euler,
    Mat44,
    Color,
    PolygonMesh,
    Curve,
    Curves,
    Lines,
    KeyframeTrack,
    CompoundParam,
    /// Opaque data owned by the host plugin itself.
    #[serde(rename = "SpliceMayaData")]
    HostData,
}

impl DeclaredType {
    pub const ALL: [DeclaredType; 15] = [
        DeclaredType::Boolean,
        DeclaredType::Integer,
        DeclaredType::Scalar,
        DeclaredType::String,
        DeclaredType::Vec3,
        DeclaredType::Euler,
        DeclaredType::Mat44,
        DeclaredType::Color,
        DeclaredType::PolygonMesh,
        DeclaredType::Curve,
        DeclaredType::Curves,
        DeclaredType::Lines,
        DeclaredType::KeyframeTrack,
        DeclaredType::CompoundParam,
        DeclaredType::HostData,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeclaredType::Boolean => "Boolean",
            DeclaredType::Integer => "Integer",
            DeclaredType::Scalar => "Scalar",
            DeclaredType::String => "String",
            DeclaredType::Vec3 => "Vec3",
            DeclaredType::Euler => "Euler",
            DeclaredType::Mat44 => "Mat44",
            DeclaredType::Color => "Color",
            DeclaredType::PolygonMesh => "PolygonMesh",
            DeclaredType::Curve => "Curve",
            DeclaredType::Curves => "Curves",
            DeclaredType::Lines => "Lines",
            DeclaredType::KeyframeTrack => "KeyframeTrack",
            DeclaredType::CompoundParam => "CompoundParam",
            DeclaredType::HostData => "SpliceMayaData",
        }
    }

    /// Exact-name lookup over canonical names and storage-type aliases,
    /// without array marker handling.
    pub fn from_name(name: &str) -> Option<Self> {
        DeclaredType::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .or_else(|| {
                TYPE_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map(|(_, t)| *t)
            })
    }

    /// Geometry and plugin data that must never be written to the scene file
    /// as a plain value or keyed.
    pub fn is_complex_data(self) -> bool {
        matches!(
            self,
            DeclaredType::PolygonMesh
                | DeclaredType::Curves
                | DeclaredType::Curve
                | DeclaredType::Lines
                | DeclaredType::HostData
        )
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many values an attribute holds and how the host exposes them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "Single Value")]
    Single,
    /// Multi-plug array; each element is a full attribute instance.
    #[serde(rename = "Array (Multi)")]
    ArrayOfCompounds,
    /// One attribute holding a host-native list (int/double/vector array data).
    #[serde(rename = "Array (Native)")]
    NativeArray,
}

impl Cardinality {
    pub const ALL: [Cardinality; 3] = [
        Cardinality::Single,
        Cardinality::ArrayOfCompounds,
        Cardinality::NativeArray,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::Single => "Single Value",
            Cardinality::ArrayOfCompounds => "Array (Multi)",
            Cardinality::NativeArray => "Array (Native)",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = BuildError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cardinality::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BuildError::UnrecognizedCardinality(s.to_string()))
    }
}

/// Result of classifying a type string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classified {
    Type(DeclaredType),
    /// One of the legacy names; callers skip it without error.
    Legacy(String),
}

/// A classified type string plus whether it carried an array annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSpec {
    pub classified: Classified,
    pub is_array: bool,
}

impl TypeSpec {
    pub fn declared(&self) -> Option<DeclaredType> {
        match self.classified {
            Classified::Type(t) => Some(t),
            Classified::Legacy(_) => None,
        }
    }

    /// Cardinality implied by the annotation alone.
    pub fn implied_cardinality(&self) -> Cardinality {
        if self.is_array {
            Cardinality::ArrayOfCompounds
        } else {
            Cardinality::Single
        }
    }
}

/// Classify a type string using the built-in array marker and legacy names.
pub fn classify_type(raw: &str) -> Result<TypeSpec, BuildError> {
    classify_with(raw, ARRAY_MARKER, |name| LEGACY_TYPE_NAMES.contains(&name))
}

pub(crate) fn classify_with(
    raw: &str,
    marker: char,
    is_legacy: impl Fn(&str) -> bool,
) -> Result<TypeSpec, BuildError> {
    let trimmed = raw.trim();
    let (name, is_array) = match trimmed.split_once(marker) {
        Some((base, _)) => (base.trim_end(), true),
        None => (trimmed, false),
    };

    if let Some(t) = DeclaredType::from_name(name) {
        return Ok(TypeSpec {
            classified: Classified::Type(t),
            is_array,
        });
    }
    if is_legacy(name) {
        return Ok(TypeSpec {
            classified: Classified::Legacy(name.to_string()),
            is_array,
        });
    }
    Err(BuildError::UnrecognizedType(raw.to_string()))
}

/// Direction of a port on the scene-engine side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortMode {
    In,
    Out,
    IO,
}

impl PortMode {
    pub fn from_flags(is_input: bool, is_output: bool) -> Option<Self> {
        match (is_input, is_output) {
            (true, false) => Some(PortMode::In),
            (false, true) => Some(PortMode::Out),
            (true, true) => Some(PortMode::IO),
            (false, false) => None,
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, PortMode::In | PortMode::IO)
    }

    pub fn is_output(self) -> bool {
        matches!(self, PortMode::Out | PortMode::IO)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PortMode::In => "In",
            PortMode::Out => "Out",
            PortMode::IO => "IO",
        }
    }
}

impl FromStr for PortMode {
    type Err = BuildError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In" => Ok(PortMode::In),
            "Out" => Ok(PortMode::Out),
            "IO" => Ok(PortMode::IO),
            other => Err(BuildError::UnrecognizedPortMode(other.to_string())),
        }
    }
}
