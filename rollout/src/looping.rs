//! Control loop: drive a policy against an environment for fixed-length
//! trajectories.

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::core::nested::{Mapping, Nested};
use crate::core::resolver::SourceSet;
use crate::io::config::LoopConfig;
use crate::logging::timed;
use crate::policy::Policy;

/// Source of observations the loop steps through.
pub trait Environment {
    /// Start a trajectory and return the initial observation.
    fn reset(&mut self) -> Result<Mapping>;

    /// Per-step data offered to the policy alongside the observation.
    fn step_data(&self, _t: u32) -> Option<Mapping> {
        None
    }

    /// Apply `action` and return the next observation.
    fn step(&mut self, action: &Nested) -> Result<Mapping>;
}

/// Actions taken during one trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub trial_index: u32,
    pub steps: u32,
    pub actions: Vec<Nested>,
}

/// Run one trajectory of `cfg.horizon` steps.
///
/// At every step the policy's arguments are resolved from the current
/// observation, the environment's step data, `t` and `trial_index`. A
/// resolution or policy failure aborts the trajectory; the underlying
/// [`crate::core::errors::ResolveError`] stays reachable via `downcast_ref`.
#[instrument(skip_all, fields(i_tr = trial_index, horizon = cfg.horizon))]
pub fn run_trajectory<E: Environment, P: Policy>(
    env: &mut E,
    policy: &mut P,
    cfg: &LoopConfig,
    trial_index: u32,
) -> Result<Trajectory> {
    let mut obs = env.reset().context("reset environment")?;
    let mut actions = Vec::new();

    for t in 0..cfg.horizon {
        let step_data = env.step_data(t);
        let args = SourceSet::new(&obs, i64::from(t), i64::from(trial_index))
            .with_step_data(step_data.as_ref())
            .resolve(policy.signature())
            .with_context(|| {
                format!(
                    "resolve arguments for {} at t={}",
                    policy.signature().callable(),
                    t
                )
            })?;
        let action = policy
            .act(&args)
            .with_context(|| format!("policy act at t={}", t))?;
        obs = env
            .step(&action)
            .with_context(|| format!("environment step at t={}", t))?;
        if cfg.log_every > 0 && t % cfg.log_every == 0 {
            debug!(t, "step complete");
        }
        actions.push(action);
    }

    Ok(Trajectory {
        trial_index,
        steps: cfg.horizon,
        actions,
    })
}

/// Run trials `cfg.start_index..cfg.end_index`, resetting the policy before
/// each one.
///
/// Stops at the first failing trajectory. Returns the number of completed
/// trials.
pub fn run_trials<E, P, F>(
    env: &mut E,
    policy: &mut P,
    cfg: &LoopConfig,
    mut on_trial: F,
) -> Result<u32>
where
    E: Environment,
    P: Policy,
    F: FnMut(&Trajectory),
{
    cfg.validate()?;
    let mut completed = 0u32;
    for trial_index in cfg.start_index..cfg.end_index {
        policy.reset();
        let trajectory = timed("trajectory", || run_trajectory(env, policy, cfg, trial_index))
            .with_context(|| format!("trial {}", trial_index))?;
        on_trial(&trajectory);
        completed += 1;
    }
    info!(completed, "trials finished");
    Ok(completed)
}
