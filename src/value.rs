//! The closed set of value kinds the store accepts.
//!
//! Every cyclic row, every static entry, and every parameter of an acyclic event carries a
//! [`Value`]. The set of kinds is fixed at compile time: a scalar of one of seven primitive
//! kinds, or a homogeneous sequence of one of them. Anything else has no `From` conversion and
//! simply does not type-check.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Separator used when printing the elements of a sequence value.
pub const SEQUENCE_DELIMITER: &str = "|";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Bool(bool),
    Char(char),
    Int(i32),
    Size(usize),
    Float(f32),
    Double(f64),
    String(String),
    BoolVec(Vec<bool>),
    CharVec(Vec<char>),
    IntVec(Vec<i32>),
    SizeVec(Vec<usize>),
    FloatVec(Vec<f32>),
    DoubleVec(Vec<f64>),
    StringVec(Vec<String>),
}

/// A generic set of named values attached to an acyclic event. Ordered by name so that equality
/// and iteration do not depend on insertion order.
pub type Parameter = BTreeMap<String, Value>;

/// The discriminant of a [`Value`], without its payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Char,
    Int,
    Size,
    Float,
    Double,
    String,
    BoolVec,
    CharVec,
    IntVec,
    SizeVec,
    FloatVec,
    DoubleVec,
    StringVec,
}

impl ValueKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Char => "char",
            ValueKind::Int => "int",
            ValueKind::Size => "size",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::BoolVec => "bool[]",
            ValueKind::CharVec => "char[]",
            ValueKind::IntVec => "int[]",
            ValueKind::SizeVec => "size[]",
            ValueKind::FloatVec => "float[]",
            ValueKind::DoubleVec => "double[]",
            ValueKind::StringVec => "string[]",
        }
    }

    #[must_use]
    pub fn is_sequence(self) -> bool {
        matches!(
            self,
            ValueKind::BoolVec
                | ValueKind::CharVec
                | ValueKind::IntVec
                | ValueKind::SizeVec
                | ValueKind::FloatVec
                | ValueKind::DoubleVec
                | ValueKind::StringVec
        )
    }
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::Int(_) => ValueKind::Int,
            Value::Size(_) => ValueKind::Size,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::BoolVec(_) => ValueKind::BoolVec,
            Value::CharVec(_) => ValueKind::CharVec,
            Value::IntVec(_) => ValueKind::IntVec,
            Value::SizeVec(_) => ValueKind::SizeVec,
            Value::FloatVec(_) => ValueKind::FloatVec,
            Value::DoubleVec(_) => ValueKind::DoubleVec,
            Value::StringVec(_) => ValueKind::StringVec,
        }
    }
}

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            f.write_str(SEQUENCE_DELIMITER)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// Scalars print plainly, sequences print their elements joined by `SEQUENCE_DELIMITER`.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Size(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::BoolVec(v) => write_joined(f, v),
            Value::CharVec(v) => write_joined(f, v),
            Value::IntVec(v) => write_joined(f, v),
            Value::SizeVec(v) => write_joined(f, v),
            Value::FloatVec(v) => write_joined(f, v),
            Value::DoubleVec(v) => write_joined(f, v),
            Value::StringVec(v) => write_joined(f, v),
        }
    }
}

macro_rules! impl_from_for_value {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_value!(
    bool => Bool,
    char => Char,
    i32 => Int,
    usize => Size,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<bool> => BoolVec,
    Vec<char> => CharVec,
    Vec<i32> => IntVec,
    Vec<usize> => SizeVec,
    Vec<f32> => FloatVec,
    Vec<f64> => DoubleVec,
    Vec<String> => StringVec,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::StringVec(value.into_iter().map(str::to_string).collect())
    }
}
