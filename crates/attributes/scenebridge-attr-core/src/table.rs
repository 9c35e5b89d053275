//! The (type, cardinality) dispatch table.
//!
//! Legality and construction strategy live in one static table so both can be
//! checked without touching a host.

use crate::declared::{Cardinality, DeclaredType};
use crate::error::BuildError;
use crate::host::{NumericKind, TypedDataKind};

/// How the builder constructs an attribute for a legal (type, cardinality).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    Numeric(NumericKind),
    /// Plain double, or a unit attribute when the options carry a unit.
    Scalar,
    Typed(TypedDataKind),
    /// Three double children composed into a numeric parent.
    Vec3Components,
    /// Three angle children composed into a numeric parent.
    EulerComponents,
    Matrix,
    Color,
    Message,
    Compound,
}

impl Strategy {
    /// Whether UI range hints apply to attributes built this way.
    pub fn takes_range(self) -> bool {
        matches!(self, Strategy::Numeric(NumericKind::Int) | Strategy::Scalar)
    }
}

use Cardinality::{ArrayOfCompounds as Multi, NativeArray as Native, Single};
use DeclaredType as T;

const TABLE: &[(DeclaredType, Cardinality, Strategy)] = &[
    (T::Boolean, Single, Strategy::Numeric(NumericKind::Boolean)),
    (T::Boolean, Multi, Strategy::Numeric(NumericKind::Boolean)),
    (T::Integer, Single, Strategy::Numeric(NumericKind::Int)),
    (T::Integer, Multi, Strategy::Numeric(NumericKind::Int)),
    (T::Integer, Native, Strategy::Typed(TypedDataKind::IntArray)),
    (T::Scalar, Single, Strategy::Scalar),
    (T::Scalar, Multi, Strategy::Scalar),
    (T::Scalar, Native, Strategy::Typed(TypedDataKind::DoubleArray)),
    (T::String, Single, Strategy::Typed(TypedDataKind::String)),
    (T::String, Multi, Strategy::Typed(TypedDataKind::String)),
    (T::Vec3, Single, Strategy::Vec3Components),
    (T::Vec3, Multi, Strategy::Vec3Components),
    (T::Vec3, Native, Strategy::Typed(TypedDataKind::VectorArray)),
    (T::Euler, Single, Strategy::EulerComponents),
    (T::Euler, Multi, Strategy::EulerComponents),
    (T::Mat44, Single, Strategy::Matrix),
    (T::Mat44, Multi, Strategy::Matrix),
    (T::Color, Single, Strategy::Color),
    (T::Color, Multi, Strategy::Color),
    (T::PolygonMesh, Single, Strategy::Typed(TypedDataKind::Mesh)),
    (T::PolygonMesh, Multi, Strategy::Typed(TypedDataKind::Mesh)),
    (T::Curve, Single, Strategy::Typed(TypedDataKind::NurbsCurve)),
    (T::Curves, Multi, Strategy::Typed(TypedDataKind::NurbsCurve)),
    (T::Lines, Single, Strategy::Typed(TypedDataKind::NurbsCurve)),
    (T::Lines, Multi, Strategy::Typed(TypedDataKind::NurbsCurve)),
    (T::KeyframeTrack, Single, Strategy::Message),
    (T::KeyframeTrack, Multi, Strategy::Message),
    (T::CompoundParam, Single, Strategy::Compound),
    (T::CompoundParam, Multi, Strategy::Compound),
    (T::HostData, Single, Strategy::Typed(TypedDataKind::PluginData)),
    (T::HostData, Multi, Strategy::Typed(TypedDataKind::PluginData)),
];

/// Look up the construction strategy, or the error for an illegal pairing.
pub fn strategy_for(
    data_type: DeclaredType,
    cardinality: Cardinality,
) -> Result<Strategy, BuildError> {
    if let Some((_, _, strategy)) = TABLE
        .iter()
        .find(|(t, c, _)| *t == data_type && *c == cardinality)
    {
        return Ok(*strategy);
    }
    Err(match (data_type, cardinality) {
        (T::Curve, Multi) => BuildError::CurveArray,
        (T::Curves, Single) => BuildError::CurvesSingle,
        _ => BuildError::Incompatible {
            data_type: data_type.as_str().to_string(),
            cardinality: cardinality.as_str().to_string(),
        },
    })
}

/// Cardinalities `data_type` accepts, in table order.
pub fn legal_cardinalities(data_type: DeclaredType) -> Vec<Cardinality> {
    TABLE
        .iter()
        .filter(|(t, _, _)| *t == data_type)
        .map(|(_, c, _)| *c)
        .collect()
}

pub fn is_legal(data_type: DeclaredType, cardinality: Cardinality) -> bool {
    TABLE
        .iter()
        .any(|(t, c, _)| *t == data_type && *c == cardinality)
}
