//! Mapping with attribute-style access, used for hyperparameter sets.

use serde::Serialize;
use tracing::debug;

use crate::core::errors::AttributeNotFoundError;
use crate::core::nested::{Mapping, Nested};

/// Ordered mapping whose entries double as attributes.
///
/// Reads through [`AttrDict::attr`] fail with [`AttributeNotFoundError`]
/// rather than a plain missing-key `None`. Writes through
/// [`AttrDict::set_attr`] insert or overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttrDict(Mapping);

impl AttrDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for declaring default hyperparameters.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Nested>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Result<&Nested, AttributeNotFoundError> {
        self.0.get(name).ok_or_else(|| AttributeNotFoundError {
            attr: name.to_string(),
        })
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Nested>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Nested> {
        self.0.get(key)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Nested> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    /// Copy every entry of `overrides` into `self`.
    ///
    /// Keys are not checked against the existing set: an unknown key is
    /// inserted as a new entry, so a misspelled override is silently kept
    /// rather than rejected.
    pub fn override_with(&mut self, overrides: &Mapping) {
        for (key, value) in overrides {
            if !self.0.contains_key(key) {
                debug!(key = %key, "override introduces new hyperparameter");
            }
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl From<Mapping> for AttrDict {
    fn from(map: Mapping) -> Self {
        Self(map)
    }
}
