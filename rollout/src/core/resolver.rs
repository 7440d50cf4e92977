//! Argument resolution: fill a policy's declared parameters from loop state.
//!
//! Sources are consulted in a fixed priority order, highest first:
//!
//! 1. the observation mapping,
//! 2. the step-data mapping,
//! 3. the scalar context values `t` (timestep) and `i_tr` (trial index),
//! 4. the whole observation, requested as `obs`,
//! 5. the whole step data, requested as `step_data`,
//! 6. `step_data["goal_pos"]`, requested as `goal_pos` (strict).
//!
//! A parameter that no source supplies falls back to its declared default.
//! Without a default, resolution fails with
//! [`ResolveError::MissingRequiredParameter`].

use tracing::trace;

use crate::core::errors::ResolveError;
use crate::core::nested::{Mapping, Nested};
use crate::core::signature::{ParameterSpec, Signature};

pub const TIMESTEP: &str = "t";
pub const TRIAL_INDEX: &str = "i_tr";
pub const OBSERVATION: &str = "obs";
pub const STEP_DATA: &str = "step_data";
pub const GOAL_POS: &str = "goal_pos";

/// Loop state available to a policy at one timestep.
#[derive(Debug, Clone, Copy)]
pub struct SourceSet<'a> {
    pub observation: &'a Mapping,
    pub step_data: Option<&'a Mapping>,
    pub timestep: i64,
    pub trial_index: i64,
}

/// Concrete arguments for one invocation, in signature order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArguments(Mapping);

impl ResolvedArguments {
    pub fn get(&self, name: &str) -> Option<&Nested> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Values in declaration order, for positional calls.
    pub fn positional(&self) -> impl Iterator<Item = &Nested> {
        self.0.values()
    }
}

impl<'a> SourceSet<'a> {
    pub fn new(observation: &'a Mapping, timestep: i64, trial_index: i64) -> Self {
        Self {
            observation,
            step_data: None,
            timestep,
            trial_index,
        }
    }

    pub fn with_step_data(mut self, step_data: Option<&'a Mapping>) -> Self {
        self.step_data = step_data;
        self
    }

    /// Build the argument set for `signature`.
    ///
    /// A signature declaring the catch-all `args` parameter resolves to an
    /// empty set without consulting any source.
    pub fn resolve(&self, signature: &Signature) -> Result<ResolvedArguments, ResolveError> {
        if signature.is_variadic() {
            trace!(callable = signature.callable(), "variadic signature, no arguments resolved");
            return Ok(ResolvedArguments::default());
        }

        let mut resolved = Mapping::with_capacity(signature.params().len());
        for param in signature.params() {
            let (value, source) = self.resolve_param(signature.callable(), param)?;
            trace!(
                callable = signature.callable(),
                param = param.name(),
                source,
                "resolved parameter"
            );
            resolved.insert(param.name().to_string(), value);
        }
        Ok(ResolvedArguments(resolved))
    }

    fn resolve_param(
        &self,
        callable: &str,
        param: &ParameterSpec,
    ) -> Result<(Nested, &'static str), ResolveError> {
        let name = param.name();
        if let Some(value) = self.observation.get(name) {
            return Ok((value.clone(), "observation"));
        }
        if let Some(value) = self.step_data.and_then(|data| data.get(name)) {
            return Ok((value.clone(), "step_data"));
        }

        let special = match name {
            TIMESTEP => Some(Nested::from(self.timestep)),
            TRIAL_INDEX => Some(Nested::from(self.trial_index)),
            OBSERVATION => Some(Nested::Map(self.observation.clone())),
            STEP_DATA => Some(self.step_data.cloned().map_or(Nested::Null, Nested::Map)),
            // No fallback to the declared default here.
            GOAL_POS => {
                let value = self
                    .step_data
                    .and_then(|data| data.get(GOAL_POS))
                    .cloned()
                    .ok_or_else(|| ResolveError::MissingField {
                        callable: callable.to_string(),
                        field: GOAL_POS.to_string(),
                    })?;
                Some(value)
            }
            _ => None,
        };
        if let Some(value) = special {
            return Ok((value, "context"));
        }

        match param.default() {
            Some(default) => Ok((default.clone(), "default")),
            None => Err(ResolveError::MissingRequiredParameter {
                callable: callable.to_string(),
                param: name.to_string(),
            }),
        }
    }
}

/// Resolve `signature` against a single timestep's loop state.
pub fn resolve(
    signature: &Signature,
    observation: &Mapping,
    timestep: i64,
    trial_index: i64,
    step_data: Option<&Mapping>,
) -> Result<ResolvedArguments, ResolveError> {
    SourceSet::new(observation, timestep, trial_index)
        .with_step_data(step_data)
        .resolve(signature)
}
