pub mod csv_export;

use crate::classifier::Classifier;
use crate::determinism::fingerprint::canonical_sha256;
use crate::error::{CoreError, CoreResult};
use crate::record::{input_record_from_value, normalize_record, InputRecord, OutputRecord};
use crate::taxonomy::model::{MISSING_UTMS, NON_STANDARD_UTM};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub classified: usize,
    pub missing_utms: usize,
    pub non_standard: usize,
    pub channels: BTreeMap<String, usize>,
    pub campaign_types: BTreeMap<String, usize>,
    pub output_sha256: String,
}

#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub records: Vec<OutputRecord>,
    pub summary: BatchSummary,
}

/// Parse a JSON array of records, or JSON Lines with one record per line.
/// Blank lines are skipped. A leading UTF-8 byte order mark is ignored.
pub fn parse_records(text: &str) -> CoreResult<Vec<InputRecord>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim_start().starts_with('[') {
        let arr: Vec<Value> = serde_json::from_str(text)
            .map_err(|e| CoreError::InvalidInput(format!("Failed to parse record array: {}", e)))?;
        let mut records = Vec::with_capacity(arr.len());
        for (idx, v) in arr.iter().enumerate() {
            let record = input_record_from_value(v).map_err(|e| {
                CoreError::InvalidInput(format!("record at index {}: {}", idx, e))
            })?;
            records.push(record);
        }
        return Ok(records);
    }

    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let v: Value = serde_json::from_str(line).map_err(|e| {
            CoreError::InvalidInput(format!("line {}: invalid JSON: {}", idx + 1, e))
        })?;
        let record = input_record_from_value(&v)
            .map_err(|e| CoreError::InvalidInput(format!("line {}: {}", idx + 1, e)))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_records_file(path: impl AsRef<Path>) -> CoreResult<Vec<InputRecord>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_records(&text)
}

/// Classify every record, preserving input order.
pub fn classify_batch(classifier: &Classifier, inputs: &[InputRecord]) -> CoreResult<BatchOutput> {
    let records: Vec<OutputRecord> = inputs
        .iter()
        .map(|r| normalize_record(classifier, r))
        .collect();

    let mut classified = 0;
    let mut missing_utms = 0;
    let mut non_standard = 0;
    let mut channels: BTreeMap<String, usize> = BTreeMap::new();
    let mut campaign_types: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, r) in records.iter().enumerate() {
        if r.is_classified() {
            classified += 1;
        }
        if r.validation_flag == MISSING_UTMS {
            missing_utms += 1;
        } else if r.validation_flag.starts_with(NON_STANDARD_UTM) {
            non_standard += 1;
            tracing::warn!(index = idx, flag = %r.validation_flag, "non-standard utm");
        }
        *channels.entry(r.channel.clone()).or_insert(0) += 1;
        *campaign_types.entry(r.campaign_type.clone()).or_insert(0) += 1;
    }

    let summary = BatchSummary {
        total: records.len(),
        classified,
        missing_utms,
        non_standard,
        channels,
        campaign_types,
        output_sha256: canonical_sha256(&records)?,
    };
    tracing::info!(
        total = summary.total,
        classified = summary.classified,
        missing_utms = summary.missing_utms,
        non_standard = summary.non_standard,
        "batch classified"
    );

    Ok(BatchOutput { records, summary })
}

pub fn render_jsonl(records: &[OutputRecord]) -> CoreResult<String> {
    let mut out = String::new();
    for r in records {
        out.push_str(&serde_json::to_string(r)?);
        out.push('\n');
    }
    Ok(out)
}

pub fn render_outputs(records: &[OutputRecord], format: OutputFormat) -> CoreResult<String> {
    match format {
        OutputFormat::Jsonl => render_jsonl(records),
        OutputFormat::Csv => csv_export::render_output_csv(records),
    }
}
