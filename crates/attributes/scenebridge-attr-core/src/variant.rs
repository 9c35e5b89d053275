//! Variant: the scene engine's dynamic value, as it arrives at the boundary.
//!
//! Option dictionaries and compound structures are carried as `Variant`s until
//! the builder decodes them once into typed structs.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

/// Coarse kind of a [`Variant`], handy for dispatch and error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VariantKind {
    Null,
    Bool,
    String,
    Int,
    UInt,
    Float,
    Array,
    Dict,
}

impl VariantKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariantKind::Null => "null",
            VariantKind::Bool => "boolean",
            VariantKind::String => "string",
            VariantKind::Int => "signed integer",
            VariantKind::UInt => "unsigned integer",
            VariantKind::Float => "float",
            VariantKind::Array => "array",
            VariantKind::Dict => "dictionary",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Variant {
    #[default]
    Null,
    Bool(bool),
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Array(Vec<Variant>),
    /// Key order is preserved; compound children are built in this order.
    Dict(IndexMap<String, Variant>),
}

impl Variant {
    #[inline]
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Null => VariantKind::Null,
            Variant::Bool(_) => VariantKind::Bool,
            Variant::String(_) => VariantKind::String,
            Variant::I8(_) | Variant::I16(_) | Variant::I32(_) | Variant::I64(_) => {
                VariantKind::Int
            }
            Variant::U8(_) | Variant::U16(_) | Variant::U32(_) | Variant::U64(_) => {
                VariantKind::UInt
            }
            Variant::F32(_) | Variant::F64(_) => VariantKind::Float,
            Variant::Array(_) => VariantKind::Array,
            Variant::Dict(_) => VariantKind::Dict,
        }
    }

    /// Build a dictionary from `(key, value)` pairs, keeping their order.
    pub fn dict(pairs: impl IntoIterator<Item = (impl Into<String>, Variant)>) -> Self {
        Variant::Dict(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    pub fn as_dict(&self) -> Option<&IndexMap<String, Variant>> {
        match self {
            Variant::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce any numeric variant to `f64`. Non-numeric variants yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Variant::I8(v) => Some(f64::from(*v)),
            Variant::I16(v) => Some(f64::from(*v)),
            Variant::I32(v) => Some(f64::from(*v)),
            Variant::I64(v) => Some(*v as f64),
            Variant::U8(v) => Some(f64::from(*v)),
            Variant::U16(v) => Some(f64::from(*v)),
            Variant::U32(v) => Some(f64::from(*v)),
            Variant::U64(v) => Some(*v as f64),
            Variant::F32(v) => Some(f64::from(*v)),
            Variant::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Look up a key when this is a dictionary.
    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.as_dict().and_then(|map| map.get(key))
    }

    /// Numeric member `key` coerced to `f64`, or `default` when the member is
    /// absent or not a number (or `self` is not a dictionary).
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Variant::as_f64).unwrap_or(default)
    }

    /// String member `key`, if present and a string.
    pub fn str_member(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Variant::as_str)
    }

    /// Decode a JSON value. Integers become `I64` (or `U64` above `i64::MAX`),
    /// other numbers `F64`; object key order is kept.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Variant::Null,
            JsonValue::Bool(b) => Variant::Bool(b),
            JsonValue::String(s) => Variant::String(s),
            JsonValue::Number(n) => number_to_variant(&n),
            JsonValue::Array(items) => {
                Variant::Array(items.into_iter().map(Variant::from_json).collect())
            }
            JsonValue::Object(obj) => Variant::Dict(
                obj.into_iter()
                    .map(|(k, v)| (k, Variant::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Variant::Null => JsonValue::Null,
            Variant::Bool(b) => JsonValue::Bool(*b),
            Variant::String(s) => JsonValue::String(s.clone()),
            Variant::I8(v) => JsonValue::from(*v),
            Variant::I16(v) => JsonValue::from(*v),
            Variant::I32(v) => JsonValue::from(*v),
            Variant::I64(v) => JsonValue::from(*v),
            Variant::U8(v) => JsonValue::from(*v),
            Variant::U16(v) => JsonValue::from(*v),
            Variant::U32(v) => JsonValue::from(*v),
            Variant::U64(v) => JsonValue::from(*v),
            // Non-finite floats have no JSON form and map to null.
            Variant::F32(v) => Number::from_f64(f64::from(*v))
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Variant::F64(v) => Number::from_f64(*v)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Variant::Array(items) => JsonValue::Array(items.iter().map(Variant::to_json).collect()),
            Variant::Dict(map) => {
                let mut obj = Map::new();
                for (key, val) in map.iter() {
                    obj.insert(key.clone(), val.to_json());
                }
                JsonValue::Object(obj)
            }
        }
    }
}

fn number_to_variant(n: &Number) -> Variant {
    if let Some(i) = n.as_i64() {
        Variant::I64(i)
    } else if let Some(u) = n.as_u64() {
        Variant::U64(u)
    } else {
        Variant::F64(n.as_f64().unwrap_or(0.0))
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}

impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Variant::I32(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::F64(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_string())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}

impl From<JsonValue> for Variant {
    fn from(v: JsonValue) -> Self {
        Variant::from_json(v)
    }
}

// Serde support goes through the JSON form.
impl Serialize for Variant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D>(deserializer: D) -> Result<Variant, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = JsonValue::deserialize(deserializer)?;
        Ok(Variant::from_json(v))
    }
}
