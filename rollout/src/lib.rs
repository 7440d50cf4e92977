//! Policy argument resolution and shape-preserving config mapping for robot
//! control loops.
//!
//! A control loop drives policies without knowing what each one consumes:
//! every policy declares a [`core::signature::Signature`], and the loop fills
//! it from the current observation, per-step data and context values through
//! [`core::resolver`]. Configuration trees holding type references and named
//! objects are flattened to plain JSON through [`core::recursive_map`].
//!
//! - **[`core`]**: Pure, deterministic logic (nested values, resolution,
//!   recursive mapping). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config files, JSON snapshots).
//!
//! [`looping`] and [`policy`] tie the two together for running trajectories.

pub mod core;
pub mod io;
pub mod logging;
pub mod looping;
pub mod policy;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
