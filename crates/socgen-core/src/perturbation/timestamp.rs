//! Timestamp drift

use super::{decode_params, PerturbationParams};
use crate::error::PerturbationError;
use crate::record::{EventRecord, RecordSequence};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use rand::{Rng, RngCore};
use serde::Deserialize;
use serde_json::Value;

const NAME: &str = "timestamp_drift";

/// Naive layouts accepted after RFC 3339; interpreted as UTC
const NAIVE_LAYOUTS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Keyword arguments of `timestamp_drift`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimestampDriftParams {
    /// Field holding the timestamp
    pub field: String,
    /// Drift bound in minutes, inclusive on both sides
    pub max_offset_minutes: u32,
}

impl Default for TimestampDriftParams {
    fn default() -> Self {
        Self {
            field: "@timestamp".to_string(),
            max_offset_minutes: 30,
        }
    }
}

/// Shift each record's timestamp by a uniform offset in
/// `[-max_offset_minutes, max_offset_minutes]` minutes
///
/// Missing, non-string and unparsable values pass through untouched.
pub fn timestamp_drift(
    records: &[EventRecord],
    params: &PerturbationParams,
    rng: &mut dyn RngCore,
) -> Result<RecordSequence, PerturbationError> {
    let params: TimestampDriftParams = decode_params(NAME, params)?;
    let bound = i64::from(params.max_offset_minutes);

    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let mut record = record.clone();
        let parsed = record
            .get(&params.field)
            .and_then(Value::as_str)
            .and_then(parse_iso8601);

        if let Some(ts) = parsed {
            let offset = rng.random_range(-bound..=bound);
            if let Some(shifted) = ts.checked_add_signed(TimeDelta::minutes(offset)) {
                record.insert(params.field.clone(), Value::String(format_iso8601(shifted)));
            }
        }
        out.push(record);
    }
    Ok(out)
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 (including a trailing `Z`), naive date-times and bare
/// dates; naive values are taken as UTC.
#[must_use]
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serialize in UTC with a trailing `Z`
///
/// Whole seconds print without a fraction; anything finer prints as
/// microseconds.
#[must_use]
pub fn format_iso8601(dt: DateTime<Utc>) -> String {
    let precision = if dt.timestamp_subsec_nanos() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    dt.to_rfc3339_opts(precision, true)
}
