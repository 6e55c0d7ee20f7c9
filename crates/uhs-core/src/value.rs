//! Recursive tagged values for structured command output.
//!
//! Every command populates its result through a [`TypedValue`]: a closed sum
//! type holding one of seven scalar kinds or one of two recursive containers.
//! Commands never need to agree on an output schema up front; the renderer
//! walks whatever tree a command built.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use uhs_core::value::{TypedValue, ValueType};
//!
//! let mut value = TypedValue::map();
//! assert!(value.set_key("balance", "$1.00"));
//! assert!(value.set_key("UTXOs", 3u64));
//!
//! assert_eq!(value.type_at_key("UTXOs"), ValueType::ULong);
//! assert_eq!(value.type_at_key("missing"), ValueType::Invalid);
//!
//! let map = value.get::<HashMap<String, TypedValue>>().expect("map-shaped");
//! assert_eq!(map.len(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Text rendered in place of a value whose tag could not be resolved.
pub const UNKNOWN_DATA: &str = "Unknown data";

/// The tag of a [`TypedValue`].
///
/// `Invalid` is never the tag of a value itself; it is returned by the
/// nested introspection methods ([`TypedValue::type_at`] and
/// [`TypedValue::type_at_key`]) when the requested element does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// No such element.
    Invalid,
    /// 32-bit signed integer.
    Int,
    /// 32-bit unsigned integer.
    UInt,
    /// 64-bit signed integer.
    Long,
    /// 64-bit unsigned integer.
    ULong,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// UTF-8 text.
    String,
    /// Ordered sequence of values.
    Array,
    /// Keyed mapping from text to values.
    Map,
}

impl ValueType {
    /// Lowercase name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Long => "long",
            Self::ULong => "ulong",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Array => "array",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar or container value produced by a command.
///
/// Serializes untagged, so a map of scalars becomes a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    /// 32-bit signed integer.
    Int(i32),
    /// 32-bit unsigned integer.
    UInt(u32),
    /// 64-bit signed integer.
    Long(i64),
    /// 64-bit unsigned integer.
    ULong(u64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// UTF-8 text.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<TypedValue>),
    /// Keyed mapping; iteration order is unspecified.
    Map(HashMap<String, TypedValue>),
}

impl TypedValue {
    /// An empty `Map`.
    #[must_use]
    pub fn map() -> Self {
        Self::Map(HashMap::new())
    }

    /// An empty `Array`.
    #[must_use]
    pub const fn array() -> Self {
        Self::Array(Vec::new())
    }

    /// Returns the current tag.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Int(_) => ValueType::Int,
            Self::UInt(_) => ValueType::UInt,
            Self::Long(_) => ValueType::Long,
            Self::ULong(_) => ValueType::ULong,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
            Self::Map(_) => ValueType::Map,
        }
    }

    /// Returns a copy of the contained value if the tag matches `T`.
    ///
    /// There is no conversion between numeric widths: a `ULong` is never
    /// returned as `u32`.
    ///
    /// ```
    /// use uhs_core::value::TypedValue;
    ///
    /// let value = TypedValue::from(7u32);
    /// assert_eq!(value.get::<u32>(), Some(7));
    /// assert_eq!(value.get::<u64>(), None);
    /// assert_eq!(value.get::<i32>(), None);
    /// ```
    #[must_use]
    pub fn get<T: Narrow>(&self) -> Option<T> {
        T::narrow(self)
    }

    /// Tag of the element at `index`, or `Invalid` if this is not an
    /// `Array` or the index is out of range.
    #[must_use]
    pub fn type_at(&self, index: usize) -> ValueType {
        match self {
            Self::Array(items) => items
                .get(index)
                .map_or(ValueType::Invalid, Self::value_type),
            _ => ValueType::Invalid,
        }
    }

    /// Tag of the entry under `key`, or `Invalid` if this is not a `Map` or
    /// the key is absent.
    #[must_use]
    pub fn type_at_key(&self, key: &str) -> ValueType {
        match self {
            Self::Map(entries) => entries
                .get(key)
                .map_or(ValueType::Invalid, Self::value_type),
            _ => ValueType::Invalid,
        }
    }

    /// Replaces the whole value. Always succeeds.
    pub fn set(&mut self, value: impl Into<Self>) -> bool {
        *self = value.into();
        true
    }

    /// Replaces the element at `index`.
    ///
    /// Returns `false` without modifying anything if this is not an `Array`
    /// or `index` is out of bounds.
    pub fn set_at(&mut self, index: usize, value: impl Into<Self>) -> bool {
        match self {
            Self::Array(items) => match items.get_mut(index) {
                Some(slot) => {
                    *slot = value.into();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Inserts or overwrites the entry under `key`.
    ///
    /// Returns `false` without modifying anything if this is not a `Map`.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<Self>) -> bool {
        match self {
            Self::Map(entries) => {
                entries.insert(key.into(), value.into());
                true
            }
            _ => false,
        }
    }

    /// Borrow the elements if this is an `Array`.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Borrow the entries if this is a `Map`.
    #[must_use]
    pub const fn as_map(&self) -> Option<&HashMap<String, Self>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Borrow the text if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for TypedValue {
    fn default() -> Self {
        Self::map()
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Types that a [`TypedValue`] can be narrowed to with [`TypedValue::get`].
///
/// Implemented for exactly the nine payload types and sealed against
/// further implementations.
pub trait Narrow: sealed::Sealed + Sized {
    /// The tag a value must carry to narrow to `Self`.
    const TYPE: ValueType;

    /// Copy the payload out if the tag matches.
    fn narrow(value: &TypedValue) -> Option<Self>;
}

macro_rules! typed_payload {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Narrow for $ty {
            const TYPE: ValueType = ValueType::$variant;

            #[allow(clippy::clone_on_copy)]
            fn narrow(value: &TypedValue) -> Option<Self> {
                match value {
                    TypedValue::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }

        impl From<$ty> for TypedValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

typed_payload!(i32, Int);
typed_payload!(u32, UInt);
typed_payload!(i64, Long);
typed_payload!(u64, ULong);
typed_payload!(f32, Float);
typed_payload!(f64, Double);
typed_payload!(String, String);
typed_payload!(Vec<TypedValue>, Array);
typed_payload!(HashMap<String, TypedValue>, Map);

/// The standard text renderer.
///
/// - scalars use their `Display` form
/// - arrays render each element as `"<index> <element>"`, concatenated
/// - maps render each entry as `"<key> <value>\n"` in map order
///
/// ```
/// use uhs_core::value::{render, TypedValue};
///
/// let list = TypedValue::Array(vec!["a".into(), "b".into()]);
/// assert_eq!(render(&list), "0 a1 b");
/// ```
#[must_use]
pub fn render(value: &TypedValue) -> String {
    match value {
        TypedValue::Int(v) => v.to_string(),
        TypedValue::UInt(v) => v.to_string(),
        TypedValue::Long(v) => v.to_string(),
        TypedValue::ULong(v) => v.to_string(),
        TypedValue::Float(v) => v.to_string(),
        TypedValue::Double(v) => v.to_string(),
        TypedValue::String(v) => v.clone(),
        TypedValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{index} {}", render(item)))
            .collect(),
        TypedValue::Map(entries) => entries
            .iter()
            .map(|(key, item)| format!("{key} {}\n", render(item)))
            .collect(),
    }
}

/// Renders the value as pretty-printed JSON.
#[must_use]
pub fn render_json(value: &TypedValue) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| UNKNOWN_DATA.to_string())
}
