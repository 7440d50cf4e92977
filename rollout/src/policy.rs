//! Policy abstraction driven by the control loop.
//!
//! A policy declares the parameters its `act` step consumes as a
//! [`Signature`]; the loop resolves them from the current observation and step
//! data before every call. New inputs can be added to a policy without
//! touching the loop, as long as their names match a recognized source or
//! carry a default.

use anyhow::Result;

use crate::core::attr_dict::AttrDict;
use crate::core::nested::{Mapping, Nested};
use crate::core::resolver::ResolvedArguments;
use crate::core::signature::Signature;

/// A callable the control loop invokes once per timestep.
pub trait Policy {
    /// Declared parameters of [`Policy::act`].
    fn signature(&self) -> &Signature;

    /// Compute the next action from resolved arguments.
    fn act(&mut self, args: &ResolvedArguments) -> Result<Nested>;

    /// Called before each trajectory.
    fn reset(&mut self) {}
}

/// Component carrying a hyperparameter set with overridable defaults.
pub trait Configurable {
    /// Defaults declared by the implementing type.
    fn default_hparams() -> AttrDict
    where
        Self: Sized;

    fn hparams(&self) -> &AttrDict;

    fn hparams_mut(&mut self) -> &mut AttrDict;

    /// Apply `overrides` on top of the current hyperparameters.
    ///
    /// `None` leaves them untouched. Unknown keys are added, not rejected
    /// (see [`AttrDict::override_with`]).
    fn override_defaults(&mut self, overrides: Option<&Mapping>) {
        if let Some(overrides) = overrides {
            self.hparams_mut().override_with(overrides);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::GainPolicy;

    #[test]
    fn override_defaults_none_is_noop() {
        let mut policy = GainPolicy::new(None);
        policy.override_defaults(None);
        assert_eq!(policy.hparams(), &GainPolicy::default_hparams());
    }

    #[test]
    fn override_defaults_replaces_and_extends() {
        let mut overrides = Mapping::new();
        overrides.insert("gain".to_string(), Nested::from(3.0));
        overrides.insert("newKey".to_string(), Nested::from(5));
        let policy = GainPolicy::new(Some(&overrides));

        assert_eq!(policy.hparams().attr("gain").expect("gain").as_f64(), Some(3.0));
        assert_eq!(policy.hparams().attr("newKey").expect("newKey").as_i64(), Some(5));
    }
}
