//! End-to-end resolution through the public loop API.

use rollout::core::errors::ResolveError;
use rollout::core::nested::Nested;
use rollout::core::signature::Signature;
use rollout::io::config::LoopConfig;
use rollout::looping::run_trials;
use rollout::test_support::{CountingEnv, RecordingPolicy};

fn loop_config(horizon: u32, trials: u32) -> LoopConfig {
    LoopConfig {
        horizon,
        start_index: 0,
        end_index: trials,
        log_every: 0,
    }
}

#[test]
fn policy_defaults_fill_unsupplied_parameters() {
    let signature = Signature::builder("Teleop")
        .param("state")
        .param_or("gripper_open", true)
        .build()
        .expect("signature");
    let mut policy = RecordingPolicy::new(signature);
    let mut env = CountingEnv::default();

    let completed = run_trials(&mut env, &mut policy, &loop_config(2, 2), |_| {}).expect("run");

    assert_eq!(completed, 2);
    assert_eq!(policy.resets, 2);
    assert_eq!(policy.calls.len(), 4);
    assert!(
        policy
            .calls
            .iter()
            .all(|args| args.get("gripper_open") == Some(&Nested::from(true)))
    );
}

#[test]
fn required_parameter_without_source_stops_the_run() {
    let signature = Signature::builder("VisionPolicy")
        .param("image")
        .build()
        .expect("signature");
    let mut policy = RecordingPolicy::new(signature);
    let mut env = CountingEnv::default();
    let mut trials = 0;

    let err = run_trials(&mut env, &mut policy, &loop_config(3, 2), |_| trials += 1).unwrap_err();

    assert_eq!(trials, 0);
    assert!(matches!(
        err.downcast_ref::<ResolveError>(),
        Some(ResolveError::MissingRequiredParameter { param, .. }) if param == "image"
    ));
    assert!(format!("{:#}", err).contains("trial 0"));
}

#[test]
fn variadic_policy_receives_no_arguments() {
    let signature = Signature::builder("Replay")
        .param("image")
        .variadic()
        .build()
        .expect("signature");
    let mut policy = RecordingPolicy::new(signature);
    let mut env = CountingEnv::default();

    run_trials(&mut env, &mut policy, &loop_config(2, 1), |_| {}).expect("run");

    assert!(policy.calls.iter().all(|args| args.is_empty()));
    assert_eq!(env.actions, vec![Nested::Null, Nested::Null]);
}
