use clap::{Parser, Subcommand, ValueEnum};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use utm_core::batch::{classify_batch, read_records_file, render_outputs, OutputFormat};
use utm_core::classifier::campaign::CampaignPrecedence;
use utm_core::classifier::Classifier;
use utm_core::config::ClassifierConfig;
use utm_core::error::CoreResult;
use utm_core::record::{normalize_record, parse_input_record, InputRecord};
use utm_core::taxonomy::audit::{audit_rules, rule_label};
use utm_core::taxonomy::model::ChannelRule;

#[derive(Debug, Parser)]
#[command(
    name = "utm_normalize",
    version,
    about = "Map UTM source/medium/campaign onto channel, subchannel and campaign type"
)]
struct Cli {
    /// Classifier config JSON, e.g. {"campaign_precedence":"SPECIFIC_FIRST"}.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a single source/medium/campaign triple.
    Classify {
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        medium: Option<String>,
        #[arg(long)]
        campaign: Option<String>,
    },
    /// Classify one JSON input record read from FILE, or stdin.
    Record { file: Option<PathBuf> },
    /// Classify a JSON Lines file (or JSON array) of input records.
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Jsonl)]
        format: Format,
        /// Write records here instead of stdout; the summary then goes to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Report overlapping and shadowed rules in the channel table.
    AuditRules,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Jsonl,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Jsonl => OutputFormat::Jsonl,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Executes one command, writing machine-readable output to `out`.
/// Returns the process exit status.
fn run(cli: Cli, out: &mut impl Write) -> CoreResult<u8> {
    let config = match &cli.config {
        Some(path) => ClassifierConfig::load(path)?,
        None => ClassifierConfig::default(),
    };
    if config.campaign_precedence == CampaignPrecedence::SPECIFIC_FIRST {
        tracing::info!(
            "campaign precedence SPECIFIC_FIRST: nonbrand campaigns report as Non-Brand"
        );
    }
    let classifier = Classifier::with_config(&config);

    match cli.command {
        Command::Classify {
            source,
            medium,
            campaign,
        } => {
            let input = InputRecord {
                utm_source: source,
                utm_medium: medium,
                utm_campaign: campaign,
            };
            let record = normalize_record(&classifier, &input);
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
        Command::Record { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let input = parse_input_record(&raw)?;
            let record = normalize_record(&classifier, &input);
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
        Command::Batch {
            input,
            format,
            output,
        } => {
            let records = read_records_file(&input)?;
            let batch = classify_batch(&classifier, &records)?;
            let rendered = render_outputs(&batch.records, format.into())?;
            let summary = serde_json::to_string_pretty(&batch.summary)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    tracing::info!(path = %path.display(), "wrote batch output");
                    writeln!(out, "{}", summary)?;
                }
                None => {
                    write!(out, "{}", rendered)?;
                    tracing::info!(summary = %summary, "batch summary");
                }
            }
        }
        Command::AuditRules => return write_rule_audit(classifier.rules(), out),
    }
    Ok(0)
}

/// Prints overlap lines and an overall verdict. Exit status 1 when any rule is shadowed.
fn write_rule_audit(rules: &[ChannelRule], out: &mut impl Write) -> CoreResult<u8> {
    let audit = audit_rules(rules);
    for o in &audit.overlaps {
        writeln!(
            out,
            "RULE_OVERLAP earlier={} ({}) later={} ({}) sources={} mediums={}",
            o.earlier_index,
            o.earlier_label,
            o.later_index,
            o.later_label,
            o.shared_sources.join("|"),
            o.shared_mediums.join("|"),
        )?;
    }
    for idx in &audit.shadowed_rules {
        writeln!(out, "RULE_SHADOWED {} ({})", idx, rule_label(&rules[*idx]))?;
    }
    let passed = audit.shadowed_rules.is_empty();
    writeln!(
        out,
        "RULE_AUDIT overall={} rules={} overlaps={}",
        if passed { "PASS" } else { "FAIL" },
        audit.rule_count,
        audit.overlaps.len()
    )?;
    Ok(if passed { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use utm_core::batch::BatchSummary;

    fn run_args(args: &[&str]) -> (u8, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let code = run(cli, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    static SHADOWED_RULES: &[ChannelRule] = &[
        ChannelRule {
            sources: &["google"],
            mediums: &["cpc", "ppc"],
            channel: "Paid Search",
            subchannel: "Google Ads",
        },
        ChannelRule {
            sources: &["google"],
            mediums: &["cpc"],
            channel: "Paid Search",
            subchannel: "Google Legacy",
        },
    ];

    #[test]
    fn audit_rules_passes_on_standard_table() {
        let (code, out) = run_args(&["utm_normalize", "audit-rules"]);
        assert_eq!(code, 0);
        assert_eq!(out.trim_end(), "RULE_AUDIT overall=PASS rules=8 overlaps=0");
    }

    #[test]
    fn audit_rules_fails_on_shadowed_rule() {
        let mut out = Vec::new();
        let code = write_rule_audit(SHADOWED_RULES, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(code, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "RULE_OVERLAP earlier=0 (Paid Search / Google Ads) later=1 (Paid Search / Google Legacy) sources=google mediums=cpc"
        );
        assert_eq!(lines[1], "RULE_SHADOWED 1 (Paid Search / Google Legacy)");
        assert_eq!(lines[2], "RULE_AUDIT overall=FAIL rules=2 overlaps=1");
    }

    #[test]
    fn batch_with_output_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.jsonl");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            "{\"utm_source\":\"google\",\"utm_medium\":\"cpc\"}\n{\"utm_source\":\"tiktok\",\"utm_medium\":\"cpc\"}\n",
        )
        .unwrap();

        let (code, out) = run_args(&[
            "utm_normalize",
            "batch",
            "--input",
            input.to_str().unwrap(),
            "--format",
            "csv",
            "--output",
            output.to_str().unwrap(),
        ]);
        assert_eq!(code, 0);
        let summary: BatchSummary = serde_json::from_str(&out).unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.classified, 1);
        assert_eq!(summary.non_standard, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("channel,subchannel,"));
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn batch_without_output_prints_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.jsonl");
        std::fs::write(&input, "{\"utm_source\":\"direct\",\"utm_medium\":\"none\"}\n").unwrap();

        let (code, out) = run_args(&["utm_normalize", "batch", "--input", input.to_str().unwrap()]);
        assert_eq!(code, 0);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(v["channel"], "Direct");
    }

    #[test]
    fn classify_prints_output_record() {
        let (code, out) = run_args(&[
            "utm_normalize",
            "classify",
            "--source",
            " Facebook ",
            "--medium",
            "CPC",
        ]);
        assert_eq!(code, 0);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["channel"], "Social Paid");
        assert_eq!(v["raw_source"], "facebook");
        assert_eq!(v["campaign_type"], "Other");
    }
}
