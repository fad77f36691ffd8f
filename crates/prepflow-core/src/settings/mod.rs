//! Remembered settings: the raw configuration as a flat JSON document.
//!
//! The document always carries `save_enabled`. When it is false nothing
//! else is written, and loading yields no configuration so the caller
//! starts from defaults.

mod schema;
mod store;

use serde_json::{Map, Value};
use tracing::warn;

use crate::config::{PipelineConfig, RejectionFilter};
use crate::consts::{DRIZZLE_PIXFRAC_RANGE, DRIZZLE_SCALE_RANGE};
use crate::options::{Choice, FilterKind, FilterUnit};

use schema::{coerce_count, coerce_flag, coerce_text, fields, FILTERS, SAVE_ENABLED};

pub use store::SettingsStore;

/// Build the persisted document for `cfg`.
pub fn encode(cfg: &PipelineConfig, remember: bool) -> Value {
    let mut doc = Map::new();
    doc.insert(SAVE_ENABLED.into(), Value::Bool(remember));
    if !remember {
        return Value::Object(doc);
    }

    for field in fields() {
        doc.insert(field.key.into(), field.read(cfg));
    }
    let filters = cfg
        .stacking
        .filters
        .iter()
        .map(|f| {
            let mut record = Map::new();
            record.insert("type".into(), Value::from(f.kind.index()));
            record.insert("value".into(), Value::from(f.threshold.clone()));
            record.insert("unit".into(), Value::from(f.unit.index()));
            Value::Object(record)
        })
        .collect();
    doc.insert(FILTERS.into(), Value::Array(filters));
    Value::Object(doc)
}

/// Restore a configuration from a persisted document.
///
/// Returns `None` when the document is not an object or settings were not
/// opted in. Missing keys keep their defaults.
pub fn decode(doc: &Value) -> Option<PipelineConfig> {
    let map = doc.as_object()?;
    if !map.get(SAVE_ENABLED).is_some_and(coerce_flag) {
        return None;
    }
    let mut cfg = PipelineConfig::default();
    restore_into(map, &mut cfg);
    Some(cfg)
}

/// Overwrite the fields of `cfg` present in `doc`.
///
/// A stored filter list replaces the in-memory one entirely, keeping the
/// stored order.
pub fn restore_into(doc: &Map<String, Value>, cfg: &mut PipelineConfig) {
    for field in fields() {
        if let Some(value) = doc.get(field.key) {
            field.write(cfg, value);
        }
    }

    let reg = &mut cfg.registration;
    reg.drizzle_scale = reg
        .drizzle_scale
        .clamp(DRIZZLE_SCALE_RANGE.0, DRIZZLE_SCALE_RANGE.1);
    reg.drizzle_pixfrac = reg
        .drizzle_pixfrac
        .clamp(DRIZZLE_PIXFRAC_RANGE.0, DRIZZLE_PIXFRAC_RANGE.1);

    match doc.get(FILTERS) {
        Some(Value::Array(records)) => {
            cfg.stacking.filters.clear();
            cfg.stacking
                .filters
                .extend(records.iter().filter_map(decode_filter));
        }
        Some(other) => warn!(value = %other, "Ignoring malformed filter list"),
        None => {}
    }
}

fn decode_filter(record: &Value) -> Option<RejectionFilter> {
    let Some(record) = record.as_object() else {
        warn!(value = %record, "Skipping malformed filter record");
        return None;
    };
    let index = |key: &str| {
        record
            .get(key)
            .and_then(coerce_count)
            .map(|i| i as usize)
    };
    Some(RejectionFilter {
        kind: index("type")
            .and_then(FilterKind::from_index)
            .unwrap_or_default(),
        threshold: record
            .get("value")
            .and_then(coerce_text)
            .unwrap_or_default(),
        unit: index("unit")
            .and_then(FilterUnit::from_index)
            .unwrap_or_default(),
    })
}
