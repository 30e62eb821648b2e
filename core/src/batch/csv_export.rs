use crate::error::CoreResult;
use crate::record::OutputRecord;

pub const CSV_HEADER: [&str; 7] = [
    "channel",
    "subchannel",
    "campaign_type",
    "validation_flag",
    "raw_source",
    "raw_medium",
    "raw_campaign",
];

/// Rows stay in input order. Line endings are LF.
pub fn render_output_csv(records: &[OutputRecord]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        wtr.write_record([
            &r.channel,
            &r.subchannel,
            &r.campaign_type,
            &r.validation_flag,
            &r.raw_source,
            &r.raw_medium,
            &r.raw_campaign,
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
