//! Test-only helpers: mapping builders, scripted policies and environments.

use anyhow::{Result, anyhow};

use crate::core::attr_dict::AttrDict;
use crate::core::nested::{Mapping, Nested};
use crate::core::resolver::ResolvedArguments;
use crate::core::signature::Signature;
use crate::looping::Environment;
use crate::policy::{Configurable, Policy};

/// Build a mapping from `(key, value)` pairs, keeping their order.
pub fn mapping<const N: usize>(entries: [(&str, Nested); N]) -> Mapping {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Policy that records every argument set it receives.
///
/// Its action is the resolved `action` argument when present, else the
/// resolved `t`, else `Null`.
pub struct RecordingPolicy {
    signature: Signature,
    pub calls: Vec<ResolvedArguments>,
    pub resets: u32,
}

impl RecordingPolicy {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            calls: Vec::new(),
            resets: 0,
        }
    }
}

impl Policy for RecordingPolicy {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn act(&mut self, args: &ResolvedArguments) -> Result<Nested> {
        let action = args
            .get("action")
            .or_else(|| args.get("t"))
            .cloned()
            .unwrap_or_default();
        self.calls.push(args.clone());
        Ok(action)
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Proportional policy with a `gain` hyperparameter.
pub struct GainPolicy {
    signature: Signature,
    hp: AttrDict,
}

impl GainPolicy {
    pub fn new(overrides: Option<&Mapping>) -> Self {
        let mut policy = Self {
            signature: Signature::builder("GainPolicy")
                .param("state")
                .param_or("target", 0.0)
                .build()
                .expect("valid signature"),
            hp: Self::default_hparams(),
        };
        policy.override_defaults(overrides);
        policy
    }
}

impl Configurable for GainPolicy {
    fn default_hparams() -> AttrDict {
        AttrDict::new().with("gain", 0.5).with("clip", 1.0)
    }

    fn hparams(&self) -> &AttrDict {
        &self.hp
    }

    fn hparams_mut(&mut self) -> &mut AttrDict {
        &mut self.hp
    }
}

impl Policy for GainPolicy {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn act(&mut self, args: &ResolvedArguments) -> Result<Nested> {
        let state = args
            .get("state")
            .and_then(Nested::as_f64)
            .ok_or_else(|| anyhow!("state must be numeric"))?;
        let target = args.get("target").and_then(Nested::as_f64).unwrap_or(0.0);
        let gain = self.hp.attr("gain")?.as_f64().unwrap_or(0.0);
        let clip = self.hp.attr("clip")?.as_f64().unwrap_or(f64::INFINITY);
        Ok(Nested::from((gain * (target - state)).clamp(-clip, clip)))
    }
}

/// Environment whose observation is `{"state": <steps taken>}`.
///
/// When `goal` is set, every step also provides `{"goal_pos": goal}` as step
/// data.
#[derive(Default)]
pub struct CountingEnv {
    pub goal: Option<Nested>,
    pub resets: u32,
    pub steps: u32,
    pub actions: Vec<Nested>,
}

impl CountingEnv {
    pub fn with_goal(goal: Nested) -> Self {
        Self {
            goal: Some(goal),
            ..Self::default()
        }
    }
}

impl Environment for CountingEnv {
    fn reset(&mut self) -> Result<Mapping> {
        self.resets += 1;
        self.steps = 0;
        Ok(mapping([("state", Nested::from(0))]))
    }

    fn step_data(&self, _t: u32) -> Option<Mapping> {
        self.goal
            .as_ref()
            .map(|goal| mapping([("goal_pos", goal.clone())]))
    }

    fn step(&mut self, action: &Nested) -> Result<Mapping> {
        self.steps += 1;
        self.actions.push(action.clone());
        Ok(mapping([("state", Nested::from(self.steps))]))
    }
}
