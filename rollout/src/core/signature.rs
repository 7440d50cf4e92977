//! Statically declared parameter lists for policies.
//!
//! A policy describes what it consumes by building a [`Signature`] once,
//! next to its `act` logic. The resolver reads names and defaults from it.

use std::collections::HashSet;

use crate::core::errors::SignatureError;
use crate::core::nested::Nested;

/// Name of the catch-all parameter that disables resolution.
pub const VARIADIC: &str = "args";

/// One declared parameter of a callable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    default: Option<Nested>,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<Nested>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared default. `Some(Nested::Null)` is a real default of `Null`.
    pub fn default(&self) -> Option<&Nested> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered parameter list of a named callable.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    callable: String,
    params: Vec<ParameterSpec>,
}

impl Signature {
    pub fn builder(callable: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder {
            callable: callable.into(),
            params: Vec::new(),
        }
    }

    pub fn callable(&self) -> &str {
        &self.callable
    }

    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    pub fn is_variadic(&self) -> bool {
        self.params.iter().any(|p| p.name == VARIADIC)
    }
}

#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    callable: String,
    params: Vec<ParameterSpec>,
}

impl SignatureBuilder {
    /// Declare a required parameter.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParameterSpec::required(name));
        self
    }

    /// Declare a parameter with a default value.
    pub fn param_or(mut self, name: impl Into<String>, default: impl Into<Nested>) -> Self {
        self.params.push(ParameterSpec::with_default(name, default));
        self
    }

    /// Declare the catch-all `args` parameter.
    pub fn variadic(self) -> Self {
        self.param(VARIADIC)
    }

    /// Finish the signature. Parameter names must be unique.
    pub fn build(self) -> Result<Signature, SignatureError> {
        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParameter {
                    callable: self.callable.clone(),
                    param: param.name.clone(),
                });
            }
        }
        Ok(Signature {
            callable: self.callable,
            params: self.params,
        })
    }
}
