//! socgen command-line front end

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use socgen_core::{
    basic_report, InputFormat, Pipeline, PipelineConfig, RecordLoader, ReportConfig,
    ScenarioRunner, SchemaGate,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let input = Arg::new("input")
        .long("input")
        .short('i')
        .value_parser(value_parser!(PathBuf))
        .help("Recorded events (.json, .ndjson or .jsonl)");
    let format = Arg::new("format")
        .long("format")
        .value_parser(["auto", "json", "ndjson"])
        .help("Input format [default: by extension]");

    Command::new("socgen")
        .version(socgen_core::VERSION)
        .about("Synthetic security-event scenario generator")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter, e.g. 'info' or 'socgen_core=debug' (overrides RUST_LOG)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Load, expand, perturb, validate and report")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(value_parser!(PathBuf))
                        .help("Pipeline TOML file; flags below override it"),
                )
                .arg(input.clone())
                .arg(format.clone())
                .arg(
                    Arg::new("scenario")
                        .long("scenario")
                        .short('s')
                        .value_parser(value_parser!(PathBuf))
                        .help("Scenario YAML"),
                )
                .arg(
                    Arg::new("schema")
                        .long("schema")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON Schema for the output"),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory for events, manifest and report"),
                )
                .arg(
                    Arg::new("expand")
                        .long("expand")
                        .value_parser(value_parser!(usize))
                        .help("Additional records to generate from the input"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail without writing output on schema violations"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check records against a JSON Schema")
                .arg(input.clone().required(true))
                .arg(format.clone())
                .arg(
                    Arg::new("schema")
                        .long("schema")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON Schema"),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Print summary statistics")
                .arg(input.required(true))
                .arg(format)
                .arg(
                    Arg::new("timestamp-field")
                        .long("timestamp-field")
                        .default_value("@timestamp"),
                )
                .arg(Arg::new("id-field").long("id-field").default_value("event_id")),
        )
        .subcommand(Command::new("list").about("List registered perturbations"))
}

fn init_tracing(matches: &ArgMatches) {
    let filter = match matches.get_one::<String>("log-level") {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if matches.get_flag("json-logs") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn input_format(args: &ArgMatches) -> InputFormat {
    match args.get_one::<String>("format").map(String::as_str) {
        Some("json") => InputFormat::Json,
        Some("ndjson") => InputFormat::Ndjson,
        _ => InputFormat::Auto,
    }
}

fn load_input(args: &ArgMatches) -> Result<socgen_core::RecordSequence> {
    let path = args
        .get_one::<PathBuf>("input")
        .context("--input is required")?;
    RecordLoader::load_as(path, input_format(args))
        .with_context(|| format!("loading {}", path.display()))
}

fn run_pipeline(args: &ArgMatches) -> Result<bool> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::new(),
    };
    if let Some(input) = args.get_one::<PathBuf>("input") {
        config = config.with_input(input);
    }
    if args.contains_id("format") {
        config = config.with_format(input_format(args));
    }
    if let Some(scenario) = args.get_one::<PathBuf>("scenario") {
        config = config.with_scenario(scenario);
    }
    if let Some(schema) = args.get_one::<PathBuf>("schema") {
        config = config.with_schema(schema);
    }
    if let Some(dir) = args.get_one::<PathBuf>("output-dir") {
        config = config.with_output_dir(dir);
    }
    if let Some(count) = args.get_one::<usize>("expand") {
        config = config.with_expand_count(*count);
    }
    if let Some(seed) = args.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }
    if args.get_flag("strict") {
        config = config.with_fail_on_invalid(true);
    }

    let outcome = Pipeline::new().run(&config).context("pipeline run failed")?;
    for violation in &outcome.violations {
        tracing::warn!("{}", violation);
    }
    println!("{}", serde_json::to_string_pretty(&outcome.result.manifest())?);
    Ok(outcome.is_valid())
}

fn validate(args: &ArgMatches) -> Result<bool> {
    let records = load_input(args)?;
    let schema = args
        .get_one::<PathBuf>("schema")
        .context("--schema is required")?;
    let gate = SchemaGate::from_path(schema)?;
    let errors = gate.validate(&records);
    for error in &errors {
        println!("{error}");
    }
    println!("{} records, {} violations", records.len(), errors.len());
    Ok(errors.is_empty())
}

fn report(args: &ArgMatches) -> Result<bool> {
    let records = load_input(args)?;
    let mut config = ReportConfig::default();
    if let Some(field) = args.get_one::<String>("timestamp-field") {
        config.timestamp_field.clone_from(field);
    }
    if let Some(field) = args.get_one::<String>("id-field") {
        config.id_field.clone_from(field);
    }
    let report = basic_report(&records, &config);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(true)
}

fn list() -> bool {
    for name in ScenarioRunner::new().registry().names() {
        println!("{name}");
    }
    true
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(&matches);

    let passed = match matches.subcommand() {
        Some(("run", args)) => run_pipeline(args)?,
        Some(("validate", args)) => validate(args)?,
        Some(("report", args)) => report(args)?,
        Some(("list", _)) => list(),
        _ => unreachable!("subcommand_required"),
    };

    std::process::exit(if passed { 0 } else { 1 });
}
