//! Shape-preserving maps over [`Nested`] trees.
//!
//! The traversal is generic: it rebuilds every container with the same tag
//! and key order and hands each leaf to an injected transform. What the
//! transform does (scaling, display naming) is the caller's business.

use crate::core::errors::{BoxError, RecursiveMapError};
use crate::core::nested::{Leaf, Mapping, Nested};

/// Result of a leaf transform.
pub type LeafResult = Result<Leaf, BoxError>;

/// Apply `f` to each value of one mapping level, keeping key order.
pub fn map_dict<F, E>(mut f: F, mapping: &Mapping) -> Result<Mapping, E>
where
    F: FnMut(&Nested) -> Result<Nested, E>,
{
    mapping
        .iter()
        .map(|(key, value)| Ok((key.clone(), f(value)?)))
        .collect()
}

/// Turn a leaf transform into a reusable tree transform.
pub fn make_recursive<F>(mut f: F) -> impl FnMut(&Nested) -> Result<Nested, RecursiveMapError>
where
    F: FnMut(&Leaf) -> LeafResult,
{
    move |value: &Nested| map_inner(&mut f, value)
}

/// Apply `f` to every leaf of `value`.
///
/// `Null` passes through without calling `f`. The first failing leaf aborts
/// the traversal; no partial tree is returned.
pub fn map_recursive<F>(f: F, value: &Nested) -> Result<Nested, RecursiveMapError>
where
    F: FnMut(&Leaf) -> LeafResult,
{
    make_recursive(f)(value)
}

fn map_inner<F>(f: &mut F, value: &Nested) -> Result<Nested, RecursiveMapError>
where
    F: FnMut(&Leaf) -> LeafResult,
{
    match value {
        Nested::Null => Ok(Nested::Null),
        Nested::List(items) => map_items(f, items).map(Nested::List),
        Nested::Tuple(items) => map_items(f, items).map(Nested::Tuple),
        Nested::Map(map) => map_dict(|v| map_inner(f, v), map).map(Nested::Map),
        Nested::Attrs(attrs) => {
            map_dict(|v| map_inner(f, v), attrs.as_mapping()).map(|m| Nested::Attrs(m.into()))
        }
        Nested::Leaf(leaf) => f(leaf).map(Nested::Leaf).map_err(|source| RecursiveMapError {
            type_name: leaf.type_name().to_string(),
            source,
        }),
    }
}

fn map_items<F>(f: &mut F, items: &[Nested]) -> Result<Vec<Nested>, RecursiveMapError>
where
    F: FnMut(&Leaf) -> LeafResult,
{
    items.iter().map(|item| map_inner(f, item)).collect()
}

/// Replace type references and named objects with their names.
///
/// Every other leaf is returned unchanged.
pub fn to_display_value(leaf: &Leaf) -> LeafResult {
    Ok(match leaf {
        Leaf::Type(type_ref) => Leaf::Str(type_ref.name().to_string()),
        Leaf::Object(obj) => match obj.name() {
            Some(name) => Leaf::Str(name.to_string()),
            None => leaf.clone(),
        },
        other => other.clone(),
    })
}

/// Map a configuration tree to plain display values, ready to serialize.
pub fn to_display_tree(value: &Nested) -> Result<Nested, RecursiveMapError> {
    map_recursive(to_display_value, value)
}
