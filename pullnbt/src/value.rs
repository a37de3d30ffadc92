use std::fmt::Display;

use indexmap::IndexMap;
use serde::Serialize;

use crate::Tag;

/// The entries of an NBT compound. Names are unique within a compound. The
/// order entries appeared in the input is kept, which makes dumps easier to
/// compare with other tools, but carries no meaning in NBT.
pub type Compound = IndexMap<String, Value>;

/// A numeric NBT payload, remembering the width it was stored with.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// The tag this number was stored as.
    pub fn tag(&self) -> Tag {
        match self {
            Number::Byte(_) => Tag::Byte,
            Number::Short(_) => Tag::Short,
            Number::Int(_) => Tag::Int,
            Number::Long(_) => Tag::Long,
            Number::Float(_) => Tag::Float,
            Number::Double(_) => Tag::Double,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Byte(v) => v as i64,
            Number::Short(v) => v as i64,
            Number::Int(v) => v as i64,
            Number::Long(v) => v,
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Byte(v) => v as f64,
            Number::Short(v) => v as f64,
            Number::Int(v) => v as f64,
            Number::Long(v) => v as f64,
            Number::Float(v) => v as f64,
            Number::Double(v) => v,
        }
    }

    /// The value as an i8, only if it was stored as a byte.
    pub fn as_byte(&self) -> Option<i8> {
        match *self {
            Number::Byte(v) => Some(v),
            _ => None,
        }
    }

    /// The value as an i32, only if it was stored as an int.
    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Number::Int(v) => Some(v),
            _ => None,
        }
    }

    /// The value as an i64, only if it was stored as a long.
    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Number::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Byte(v) => write!(f, "{}b", v),
            Number::Short(v) => write!(f, "{}s", v),
            Number::Int(v) => write!(f, "{}", v),
            Number::Long(v) => write!(f, "{}L", v),
            Number::Float(v) => write!(f, "{}f", v),
            Number::Double(v) => write!(f, "{}d", v),
        }
    }
}

/// An NBT list. The element tag is kept even when the list is empty, since it
/// can not be worked out from the elements then.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct List {
    pub element: Tag,
    pub values: Vec<Value>,
}

impl List {
    pub fn new(element: Tag) -> Self {
        Self {
            element,
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Value is a complete NBT value. It owns its data. Compounds and lists are
/// built recursively. Names live in the compound holding the value, or in the
/// [`Document`][crate::Document] for the root.
///
/// ```
/// # use pullnbt::{Number, Value};
/// let v = Value::Number(Number::Int(3));
/// assert_eq!(v.as_number().map(|n| n.as_i64()), Some(3));
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Compound(Compound),
    List(List),
    String(String),
    Number(Number),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    /// The tag this value is stored as.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Compound(_) => Tag::Compound,
            Value::List(_) => Tag::List,
            Value::String(_) => Tag::String,
            Value::Number(n) => n.tag(),
            Value::ByteArray(_) => Tag::ByteArray,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().map(|n| n.as_i64())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }

    /// Look up an entry by name, if this is a compound.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_compound()?.get(name)
    }
}

// ------------- From<T> impls -------------

macro_rules! from_number {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Number {
            fn from(val: $type) -> Self {
                Self::$variant(val)
            }
        }
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::Number(Number::$variant(val))
            }
        }
    };
}
from_number!(i8, Byte);
from_number!(i16, Short);
from_number!(i32, Int);
from_number!(i64, Long);
from_number!(f32, Float);
from_number!(f64, Double);

impl From<String> for Value {
    fn from(val: String) -> Self {
        Self::String(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Self::String(val.to_owned())
    }
}

impl From<Compound> for Value {
    fn from(val: Compound) -> Self {
        Self::Compound(val)
    }
}

impl From<List> for Value {
    fn from(val: List) -> Self {
        Self::List(val)
    }
}
