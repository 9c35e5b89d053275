//! Per-request option hints, decoded once from the declaration's option
//! dictionary.

use serde::{Deserialize, Serialize};

use crate::range::{resolve_range, NumericRange};
use crate::variant::Variant;

pub const UI_MIN: &str = "uiMin";
pub const UI_MAX: &str = "uiMax";
pub const UI_SOFT_MIN: &str = "uiSoftMin";
pub const UI_SOFT_MAX: &str = "uiSoftMax";
pub const SCALAR_UNIT: &str = "scalarUnit";

/// Unit semantics a Scalar attribute can carry on the host side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarUnit {
    Time,
    Angle,
    Distance,
}

impl ScalarUnit {
    /// Exact, lowercase names only; anything else means "no unit".
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "time" => Some(ScalarUnit::Time),
            "angle" => Some(ScalarUnit::Angle),
            "distance" => Some(ScalarUnit::Distance),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarUnit::Time => "time",
            ScalarUnit::Angle => "angle",
            ScalarUnit::Distance => "distance",
        }
    }
}

/// UI range and unit hints. Missing numeric hints read as `0.0`, which leaves
/// the range degenerate (and therefore unapplied) unless both ends are given
/// or one end straddles zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeOptions {
    pub ui_min: f64,
    pub ui_max: f64,
    pub ui_soft_min: f64,
    pub ui_soft_max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar_unit: Option<ScalarUnit>,
}

impl AttributeOptions {
    /// Decode from an optional option dictionary. Numeric members of any
    /// width are accepted; absent or non-numeric members fall back to `0.0`.
    pub fn from_variant(options: Option<&Variant>) -> Self {
        let Some(options) = options else {
            return Self::default();
        };
        AttributeOptions {
            ui_min: options.number_or(UI_MIN, 0.0),
            ui_max: options.number_or(UI_MAX, 0.0),
            ui_soft_min: options.number_or(UI_SOFT_MIN, 0.0),
            ui_soft_max: options.number_or(UI_SOFT_MAX, 0.0),
            scalar_unit: options.str_member(SCALAR_UNIT).and_then(ScalarUnit::parse),
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.ui_min = min;
        self.ui_max = max;
        self
    }

    pub fn with_soft_range(mut self, soft_min: f64, soft_max: f64) -> Self {
        self.ui_soft_min = soft_min;
        self.ui_soft_max = soft_max;
        self
    }

    pub fn with_unit(mut self, unit: ScalarUnit) -> Self {
        self.scalar_unit = Some(unit);
        self
    }

    /// The bounds to apply, if any. See [`resolve_range`].
    pub fn range(&self) -> Option<NumericRange> {
        resolve_range(self)
    }
}
