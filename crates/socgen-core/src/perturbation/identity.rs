//! Identity shift

use super::{decode_params, PerturbationParams};
use crate::error::PerturbationError;
use crate::record::{EventRecord, RecordSequence};
use rand::seq::IndexedRandom;
use rand::RngCore;
use serde::Deserialize;
use serde_json::Value;

const NAME: &str = "identity_shift";

/// Keyword arguments of `identity_shift`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityShiftParams {
    /// Fields to rewrite when they hold strings
    pub fields: Vec<String>,
    /// Suffixes to choose from
    pub suffix_pool: Vec<String>,
}

impl Default for IdentityShiftParams {
    fn default() -> Self {
        Self {
            fields: ["user", "username", "account"].map(String::from).to_vec(),
            suffix_pool: ["_lab", "_srv", "_ext"].map(String::from).to_vec(),
        }
    }
}

/// Append a random suffix to every listed string field
///
/// Suffixes are drawn independently per field per record. Absent and
/// non-string fields are left alone.
pub fn identity_shift(
    records: &[EventRecord],
    params: &PerturbationParams,
    rng: &mut dyn RngCore,
) -> Result<RecordSequence, PerturbationError> {
    let params: IdentityShiftParams = decode_params(NAME, params)?;
    if params.suffix_pool.is_empty() {
        return Err(PerturbationError::invalid_params(NAME, "suffix_pool is empty"));
    }

    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let mut record = record.clone();
        for field in &params.fields {
            if let Some(Value::String(current)) = record.get_mut(field) {
                if let Some(suffix) = params.suffix_pool.choose(rng) {
                    current.push_str(suffix);
                }
            }
        }
        out.push(record);
    }
    Ok(out)
}
