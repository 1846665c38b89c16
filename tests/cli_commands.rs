use clap::Parser;
use cheeseboard::{
    Error,
    cli::commands::{policy, replay, run, train},
    pipeline::TrainingResult,
};
use tempfile::tempdir;

fn train_args(brain: &str, summary: &str) -> train::TrainArgs {
    train::TrainArgs::parse_from([
        "cheeseboard-train",
        "--brain",
        brain,
        "--episodes",
        "200",
        "--seed",
        "3",
        "--no-progress",
        "--summary",
        summary,
    ])
}

#[test]
fn train_writes_brain_and_summary() {
    let tmp = tempdir().unwrap();
    let brain = tmp.path().join("brain.msgpack");
    let summary = tmp.path().join("summary.json");

    train::execute(train_args(brain.to_str().unwrap(), summary.to_str().unwrap()))
        .expect("training should succeed");

    assert!(brain.exists());
    let result = TrainingResult::load(&summary).unwrap();
    assert_eq!(result.episodes, 200);
}

#[test]
fn replay_and_policy_use_the_trained_brain() {
    let tmp = tempdir().unwrap();
    let brain = tmp.path().join("brain.msgpack");
    let summary = tmp.path().join("summary.json");
    let brain_arg = brain.to_str().unwrap();
    train::execute(train_args(brain_arg, summary.to_str().unwrap())).unwrap();

    let args = replay::ReplayArgs::parse_from([
        "cheeseboard-replay",
        "--brain",
        brain_arg,
        "--goal",
        "4,4",
        "--max-steps",
        "30",
        "--delay-ms",
        "0",
        "--ascii",
    ]);
    replay::execute(args).expect("replay should succeed");

    let args = policy::PolicyArgs::parse_from([
        "cheeseboard-policy",
        "--brain",
        brain_arg,
        "--goal",
        "4,4",
        "--ascii",
    ]);
    policy::execute(args).expect("policy should succeed");
}

#[test]
fn policy_rejects_goal_on_trap() {
    let tmp = tempdir().unwrap();
    let brain = tmp.path().join("brain.msgpack");
    let summary = tmp.path().join("summary.json");
    let brain_arg = brain.to_str().unwrap();
    train::execute(train_args(brain_arg, summary.to_str().unwrap())).unwrap();

    let args = policy::PolicyArgs::parse_from([
        "cheeseboard-policy",
        "--brain",
        brain_arg,
        "--goal",
        "2,2",
    ]);
    assert!(policy::execute(args).is_err());
}

#[test]
fn replay_without_brain_reports_missing_cache() {
    let tmp = tempdir().unwrap();
    let brain = tmp.path().join("absent.msgpack");

    let args = replay::ReplayArgs::parse_from([
        "cheeseboard-replay",
        "--brain",
        brain.to_str().unwrap(),
        "--delay-ms",
        "0",
    ]);
    let err = replay::execute(args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::MissingCache { .. })
    ));
}

#[test]
fn run_refuses_cache_from_other_settings_unless_retraining() {
    let tmp = tempdir().unwrap();
    let brain = tmp.path().join("brain.msgpack");
    let summary = tmp.path().join("summary.json");
    let brain_arg = brain.to_str().unwrap();
    train::execute(train_args(brain_arg, summary.to_str().unwrap())).unwrap();

    let run_args = |extra: &[&str]| {
        let mut args: Vec<String> = [
            "cheeseboard-run",
            "--brain",
            brain_arg,
            "--episodes",
            "300",
            "--no-progress",
            "--goal",
            "0,1",
            "--max-steps",
            "20",
            "--delay-ms",
            "0",
            "--ascii",
        ]
        .iter()
        .map(|arg| arg.to_string())
        .collect();
        args.extend(extra.iter().map(|arg| arg.to_string()));
        run::RunArgs::parse_from(args)
    };

    let err = run::execute(run_args(&[])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::CorruptCache { .. })
    ));

    run::execute(run_args(&["--retrain"])).expect("retraining should replace the cache");
    run::execute(run_args(&[])).expect("the new cache matches");
}

#[test]
fn training_flags_override_config_file() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("params.json");
    std::fs::write(&config, r#"{"episodes": 1000, "epsilon": 0.2}"#).unwrap();

    let args = train::TrainArgs::parse_from([
        "cheeseboard-train",
        "--config",
        config.to_str().unwrap(),
        "--episodes",
        "50",
    ]);
    let params = args.training.hyperparameters().unwrap();
    assert_eq!(params.episodes, 50);
    assert_eq!(params.epsilon, 0.2);
    assert_eq!(params.learning_rate, 0.2);
    assert_eq!(params.discount_factor, 0.9);
}
