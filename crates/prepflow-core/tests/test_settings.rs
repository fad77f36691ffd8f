mod common;

use std::fs;

use prepflow_core::config::{PipelineConfig, RejectionFilter};
use prepflow_core::options::{FilterKind, FilterUnit, Framing, StackMethod};
use prepflow_core::settings::{decode, encode, SettingsStore};
use serde_json::{json, Value};

fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
    SettingsStore::new(dir.path().join("settings.json"))
}

#[test]
fn test_save_then_load_restores_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let cfg = common::customized();

    store.save(&cfg, true).unwrap();
    assert_eq!(store.load(), Some(cfg));
}

#[test]
fn test_filter_order_survives() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut cfg = PipelineConfig::default();
    cfg.stacking.filters = vec![
        RejectionFilter::new(FilterKind::Quality, "70", FilterUnit::Percent),
        RejectionFilter::new(FilterKind::Fwhm, "", FilterUnit::Sigma),
        RejectionFilter::new(FilterKind::Quality, "1.2", FilterUnit::Sigma),
    ];

    store.save(&cfg, true).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.stacking.filters, cfg.stacking.filters);
}

#[test]
fn test_disabled_save_forgets() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.save(&common::customized(), true).unwrap();
    store.save(&common::customized(), false).unwrap();

    let doc: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(doc, json!({ "save_enabled": false }));
    assert_eq!(store.load(), None);
}

#[test]
fn test_document_uses_flat_keys() {
    let doc = encode(&common::customized(), true);
    let map = doc.as_object().unwrap();
    assert_eq!(map["save_enabled"], json!(true));
    assert_eq!(map["conv_basename"], json!("m31"));
    assert_eq!(map["reg_layer"], json!(2));
    assert_eq!(map["reg_framing"], json!(1));
    assert_eq!(map["reg_minpairs"], json!(7));
    assert_eq!(map["reg_driz_scale"], json!(2.0));
    assert_eq!(map["stk_feather"], json!(30));
    assert_eq!(
        map["filters"][0],
        json!({ "type": 2, "value": "0.6", "unit": 2 })
    );
}

#[test]
fn test_document_written_by_older_version() {
    // Counts stored as floats, indices as strings, unknown keys present.
    let doc = json!({
        "save_enabled": 1,
        "reg_maxstars": 1500.0,
        "stk_method": "4",
        "reg_framing": 3,
        "ui_theme": "dark",
        "filters": [{ "type": 4, "value": 50, "unit": 0 }],
    });
    let cfg = decode(&doc).unwrap();
    assert_eq!(cfg.registration.max_stars, 1500);
    assert_eq!(cfg.stacking.method, StackMethod::PixelMin);
    assert_eq!(cfg.registration.framing, Framing::CenterOfGravity);
    assert_eq!(
        cfg.stacking.filters,
        vec![RejectionFilter::new(FilterKind::StarCount, "50", FilterUnit::Percent)]
    );
}

#[test]
fn test_malformed_filter_list_keeps_defaults() {
    let cfg = decode(&json!({ "save_enabled": true, "filters": "none" })).unwrap();
    assert_eq!(cfg, PipelineConfig::default());
}

#[test]
fn test_truncated_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&common::customized(), true).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    fs::write(store.path(), &text[..text.len() / 2]).unwrap();
    assert_eq!(store.load_document(), None);
    assert_eq!(store.load(), None);
}
