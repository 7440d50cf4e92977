//! Tagged representation of nested observation and configuration data.
//!
//! A [`Nested`] value is `Null`, a container (list, fixed-arity tuple, plain
//! mapping or attribute-style mapping) or a [`Leaf`]. The container tag is
//! part of the value: mapping over a tuple yields a tuple, never a list.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::core::attr_dict::AttrDict;

/// Insertion-ordered, string-keyed mapping.
pub type Mapping = IndexMap<String, Nested>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Nested {
    #[default]
    Null,
    List(Vec<Nested>),
    /// Fixed-arity sequence; consumers may destructure it positionally.
    Tuple(Vec<Nested>),
    Map(Mapping),
    Attrs(AttrDict),
    Leaf(Leaf),
}

/// A value at the bottom of a nested structure.
#[derive(Debug, Clone)]
pub enum Leaf {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Reference to a type (a policy or environment class, say).
    Type(TypeRef),
    /// Opaque object, possibly carrying a human-readable name.
    Object(Arc<dyn LeafObject>),
}

/// Opaque leaf payload.
pub trait LeafObject: fmt::Debug + Send + Sync {
    /// Runtime type name, used in error reports.
    fn type_name(&self) -> &str;

    /// Human-readable name, if the object exposes one.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Reference to a Rust type, identified by its short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: &'static str,
}

impl TypeRef {
    pub fn of<T: ?Sized>() -> Self {
        Self {
            name: short_type_name(std::any::type_name::<T>()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Strip the module path (and generic arguments) from a `type_name` output.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl Leaf {
    /// Runtime type name of the leaf.
    pub fn type_name(&self) -> &str {
        match self {
            Leaf::Bool(_) => "bool",
            Leaf::Int(_) => "int",
            Leaf::Float(_) => "float",
            Leaf::Str(_) => "str",
            Leaf::Type(_) => "type",
            Leaf::Object(obj) => obj.type_name(),
        }
    }
}

impl PartialEq for Leaf {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Leaf::Bool(a), Leaf::Bool(b)) => a == b,
            (Leaf::Int(a), Leaf::Int(b)) => a == b,
            (Leaf::Float(a), Leaf::Float(b)) => a == b,
            (Leaf::Str(a), Leaf::Str(b)) => a == b,
            (Leaf::Type(a), Leaf::Type(b)) => a == b,
            // Opaque objects compare by identity.
            (Leaf::Object(a), Leaf::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Nested {
    pub fn object(obj: impl LeafObject + 'static) -> Self {
        Nested::Leaf(Leaf::Object(Arc::new(obj)))
    }

    pub fn type_ref<T: ?Sized>() -> Self {
        Nested::Leaf(Leaf::Type(TypeRef::of::<T>()))
    }

    pub fn tuple(items: impl IntoIterator<Item = Nested>) -> Self {
        Nested::Tuple(items.into_iter().collect())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Nested::Leaf(Leaf::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Nested::Leaf(Leaf::Float(v)) => Some(*v),
            Nested::Leaf(Leaf::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    /// Entries of either mapping kind.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Nested::Map(map) => Some(map),
            Nested::Attrs(attrs) => Some(attrs.as_mapping()),
            _ => None,
        }
    }

    /// Elements of either sequence kind.
    pub fn as_slice(&self) -> Option<&[Nested]> {
        match self {
            Nested::List(items) | Nested::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Nested {
    fn from(v: bool) -> Self {
        Nested::Leaf(Leaf::Bool(v))
    }
}

impl From<i64> for Nested {
    fn from(v: i64) -> Self {
        Nested::Leaf(Leaf::Int(v))
    }
}

impl From<i32> for Nested {
    fn from(v: i32) -> Self {
        Nested::Leaf(Leaf::Int(i64::from(v)))
    }
}

impl From<u32> for Nested {
    fn from(v: u32) -> Self {
        Nested::Leaf(Leaf::Int(i64::from(v)))
    }
}

impl From<f64> for Nested {
    fn from(v: f64) -> Self {
        Nested::Leaf(Leaf::Float(v))
    }
}

impl From<&str> for Nested {
    fn from(v: &str) -> Self {
        Nested::Leaf(Leaf::Str(v.to_string()))
    }
}

impl From<String> for Nested {
    fn from(v: String) -> Self {
        Nested::Leaf(Leaf::Str(v))
    }
}

impl Serialize for Nested {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nested::Null => serializer.serialize_unit(),
            Nested::List(items) | Nested::Tuple(items) => serializer.collect_seq(items),
            Nested::Map(map) => serializer.collect_map(map),
            Nested::Attrs(attrs) => serializer.collect_map(attrs.as_mapping()),
            Nested::Leaf(leaf) => leaf.serialize(serializer),
        }
    }
}

impl Serialize for Leaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Leaf::Bool(v) => serializer.serialize_bool(*v),
            Leaf::Int(v) => serializer.serialize_i64(*v),
            Leaf::Float(v) => serializer.serialize_f64(*v),
            Leaf::Str(v) => serializer.serialize_str(v),
            // Map through `to_display_value` first.
            Leaf::Type(_) | Leaf::Object(_) => Err(S::Error::custom(format!(
                "leaf of type {} is not serializable",
                self.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gripper;

    #[test]
    fn type_ref_uses_short_name() {
        assert_eq!(TypeRef::of::<Gripper>().name(), "Gripper");
        assert_eq!(TypeRef::of::<Vec<u8>>().name(), "Vec");
    }

    #[test]
    fn tuple_and_list_are_distinct() {
        let list = Nested::List(vec![Nested::from(1), Nested::from(2)]);
        let tuple = Nested::tuple([Nested::from(1), Nested::from(2)]);
        assert_ne!(list, tuple);
        assert_eq!(list.as_slice(), tuple.as_slice());
    }

    #[test]
    fn serializes_plain_tree_in_key_order() {
        let mut map = Mapping::new();
        map.insert("zeta".to_string(), Nested::tuple([Nested::from(1), Nested::from(0.5)]));
        map.insert("alpha".to_string(), Nested::Null);
        let json = serde_json::to_string(&Nested::Map(map)).expect("serialize");
        assert_eq!(json, r#"{"zeta":[1,0.5],"alpha":null}"#);
    }

    #[test]
    fn type_leaf_refuses_serialization() {
        let err = serde_json::to_string(&Nested::type_ref::<Gripper>()).unwrap_err();
        assert!(err.to_string().contains("not serializable"));
    }
}
