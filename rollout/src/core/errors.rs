//! Typed failures raised by the core.
//!
//! Each variant names a precise condition. None of them are recovered inside
//! the core: a policy invoked with an incomplete argument set must fail loudly
//! instead of receiving a substituted `Null`.

use thiserror::Error;

/// Boxed error returned by leaf transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to build a complete argument set for a callable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No source supplied the parameter and it declares no default.
    #[error("required parameter `{param}` of `{callable}` is not set by any source")]
    MissingRequiredParameter { callable: String, param: String },

    /// A strictly resolved field (`goal_pos`) is absent from step data.
    #[error("`{callable}` requests `{field}` but step data does not provide it")]
    MissingField { callable: String, field: String },
}

/// Failure while declaring a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("parameter `{param}` declared twice in signature of `{callable}`")]
    DuplicateParameter { callable: String, param: String },
}

/// A leaf transform failed during a recursive map.
///
/// Carries the runtime type name of the offending leaf and the transform's
/// original error as its source.
#[derive(Debug, Error)]
#[error("type {type_name} not supported for recursive map")]
pub struct RecursiveMapError {
    pub type_name: String,
    #[source]
    pub source: BoxError,
}

/// Attribute-style read of a key that is not present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("attribute `{attr}` not found")]
pub struct AttributeNotFoundError {
    pub attr: String,
}
