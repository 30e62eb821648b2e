use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use utm_core::batch::classify_batch;
use utm_core::classifier::Classifier;
use utm_core::config::ClassifierConfig;
use utm_core::error::CoreResult;
use utm_core::golden::{golden_cases_v1, run_all};
use utm_core::record::InputRecord;
use utm_core::taxonomy::audit::audit_rules;

/// Runs the embedded golden cases and the determinism and rule-table gates.
/// Prints stable IDs with PASS/FAIL and exits non-zero on any failure.
#[derive(Debug, Parser)]
#[command(name = "gate_runner", version)]
struct Args {
    /// Classifier config JSON. Defaults to LEGACY campaign precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("gate_runner error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> CoreResult<bool> {
    let config = match &args.config {
        Some(path) => ClassifierConfig::load(path)?,
        None => ClassifierConfig::default(),
    };
    let classifier = Classifier::with_config(&config);
    let cases = golden_cases_v1()?;
    tracing::info!(
        cases_version = %cases.cases_version,
        precedence = ?classifier.precedence(),
        "running golden cases"
    );

    let mut all_passed = true;

    let case_results = run_all(&classifier, &cases);
    for r in &case_results {
        println!("CASE {} {} {}", r.case_id, r.result, r.message);
    }
    let failed = case_results.iter().filter(|r| r.result == "FAIL").count();
    gate(
        "GOLDEN_CASES.ALL_PASS_V1",
        failed == 0,
        &format!("{} of {} cases failed", failed, case_results.len()),
        &mut all_passed,
    );

    // Identical inputs must give byte-identical output on consecutive runs.
    let inputs: Vec<InputRecord> = cases.cases.iter().map(|c| c.input.clone()).collect();
    let first = classify_batch(&classifier, &inputs)?;
    let second = classify_batch(&classifier, &inputs)?;
    gate(
        "DETERMINISM.OUTPUT_BYTE_STABILITY_V1",
        first.summary.output_sha256 == second.summary.output_sha256,
        &format!(
            "sha256 {} / {}",
            first.summary.output_sha256, second.summary.output_sha256
        ),
        &mut all_passed,
    );

    let audit = audit_rules(classifier.rules());
    gate(
        "RULE_TABLE.NO_SHADOWED_RULES_V1",
        audit.shadowed_rules.is_empty(),
        &format!(
            "{} rules, {} overlaps, {} shadowed",
            audit.rule_count,
            audit.overlaps.len(),
            audit.shadowed_rules.len()
        ),
        &mut all_passed,
    );

    Ok(all_passed)
}

fn gate(gate_id: &str, passed: bool, message: &str, all_passed: &mut bool) {
    let result = if passed { "PASS" } else { "FAIL" };
    println!("GATE {} {} {}", gate_id, result, message);
    if !passed {
        *all_passed = false;
    }
}
