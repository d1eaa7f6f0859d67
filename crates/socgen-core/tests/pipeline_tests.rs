use serde_json::{json, Value};
use socgen_core::{
    ConfigError, InputFormat, Pipeline, PipelineConfig, SchemaError, SeedExpander, SocgenError,
};
use socgen_test_utils::{auth_events, auth_schema, write_json, write_text};
use std::path::Path;

const SCENARIO: &str = r#"
name: noisy_auth
description: suffix identities
perturbations:
  - name: identity_shift
    params:
      suffix_pool: ["_lab"]
  - name: timestamp_drift
"#;

fn write_ndjson(dir: &Path) -> std::path::PathBuf {
    let body: String = auth_events()
        .into_iter()
        .map(|r| format!("{}\n\n", Value::Object(r)))
        .collect();
    write_text(dir, "auth.ndjson", &body)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn full_run_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_ndjson(dir.path());
    let scenario = write_text(dir.path(), "noisy.yaml", SCENARIO);
    let schema = write_json(dir.path(), "schema.json", &auth_schema());
    let out = dir.path().join("out");

    let config = PipelineConfig::new()
        .with_input(&input)
        .with_scenario(&scenario)
        .with_schema(&schema)
        .with_output_dir(&out)
        .with_expand_count(4)
        .with_seed(42);

    let outcome = Pipeline::new().run(&config).unwrap();
    assert!(outcome.is_valid());
    assert_eq!(outcome.result.len(), 8);
    assert_eq!(outcome.report.num_events, 8);
    assert_eq!(outcome.report.missing_timestamps, 2);
    assert_eq!(outcome.result.events[0]["user"], "alice_lab");

    let events = read_json(&outcome.outputs.events);
    assert_eq!(events.as_array().unwrap().len(), 8);

    let manifest = read_json(&outcome.outputs.manifest);
    assert_eq!(manifest["scenario"], "noisy_auth");
    assert_eq!(manifest["num_events"], 8);
    assert_eq!(
        manifest["perturbations"],
        json!(["identity_shift", "timestamp_drift"])
    );
    assert_eq!(manifest["metadata"]["description"], "suffix identities");
    assert_eq!(manifest["metadata"]["seed"], 42);
    assert_eq!(manifest["metadata"]["expanded_by"], "echo");
    assert_eq!(
        manifest["metadata"]["source"],
        Value::String(input.display().to_string())
    );

    let report = read_json(&outcome.outputs.report);
    assert_eq!(report["unique_event_ids"], 2);
    assert_eq!(report["top_event_ids"][0], json!(["4624", 4]));
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_ndjson(dir.path());
    let scenario = write_text(dir.path(), "noisy.yaml", SCENARIO);

    let run = |sub: &str| {
        let config = PipelineConfig::new()
            .with_input(&input)
            .with_scenario(&scenario)
            .with_output_dir(dir.path().join(sub))
            .with_seed(9);
        Pipeline::new().run(&config).unwrap().result
    };
    assert_eq!(run("a").events, run("b").events);
}

#[test]
fn fail_on_invalid_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "events.json", &json!([{"user": "x"}]));
    let scenario = write_text(dir.path(), "noisy.yaml", SCENARIO);
    let schema = write_json(dir.path(), "schema.json", &json!({"required": ["event_id"]}));
    let out = dir.path().join("out");

    let config = PipelineConfig::new()
        .with_input(&input)
        .with_format(InputFormat::Json)
        .with_scenario(&scenario)
        .with_schema(&schema)
        .with_output_dir(&out)
        .with_seed(1)
        .with_fail_on_invalid(true);

    let err = Pipeline::new().run(&config).unwrap_err();
    assert!(matches!(
        err,
        SocgenError::Schema(SchemaError::ValidationFailed { total: 1, .. })
    ));
    assert!(!out.exists());

    let lenient = config.with_fail_on_invalid(false);
    let outcome = Pipeline::new().run(&lenient).unwrap();
    assert_eq!(outcome.violations.len(), 1);
    assert!(outcome.outputs.manifest.exists());
}

#[test]
fn custom_expander_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "events.json", &json!({"event_id": "seed"}));
    let scenario = write_text(dir.path(), "empty.yaml", "name: passthrough\n");

    let expander = SeedExpander::new("fixture", |_, n| {
        (0..n).map(|i| json!({"event_id": format!("gen-{i}")})).collect()
    });
    let config = PipelineConfig::new()
        .with_input(&input)
        .with_scenario(&scenario)
        .with_output_dir(dir.path().join("out"))
        .with_expand_count(2);

    let outcome = Pipeline::new().with_expander(expander).run(&config).unwrap();
    let ids: Vec<_> = outcome
        .result
        .events
        .iter()
        .map(|e| e["event_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["seed", "gen-0", "gen-1"]);
    assert_eq!(outcome.result.metadata["expanded_by"], "fixture");
    assert!(outcome.result.perturbations.is_empty());
}

#[test]
fn missing_settings_fail_before_io() {
    let err = Pipeline::new().run(&PipelineConfig::new()).unwrap_err();
    assert!(matches!(err, SocgenError::Config(ConfigError::Missing("input"))));
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_ndjson(dir.path());
    let scenario = write_text(dir.path(), "noisy.yaml", SCENARIO);
    let out = dir.path().join("out");
    let toml = format!(
        "input = {:?}\nscenario = {:?}\noutput_dir = {:?}\nseed = 3\n",
        input.display().to_string(),
        scenario.display().to_string(),
        out.display().to_string()
    );
    let config_path = write_text(dir.path(), "pipeline.toml", &toml);

    let config = PipelineConfig::from_path(&config_path).unwrap();
    let outcome = Pipeline::new().run(&config).unwrap();
    assert_eq!(outcome.result.name, "noisy_auth");
    assert!(out.join("events.json").exists());
}

#[test]
fn empty_input_records_no_expansion() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "events.json", &json!([]));
    let scenario = write_text(dir.path(), "empty.yaml", "name: passthrough\n");
    let config = PipelineConfig::new()
        .with_input(&input)
        .with_scenario(&scenario)
        .with_output_dir(dir.path().join("out"))
        .with_expand_count(5);

    let outcome = Pipeline::new().run(&config).unwrap();
    assert!(outcome.result.is_empty());
    assert!(!outcome.result.metadata.contains_key("expanded_by"));
}
