//! Persisted keys, one accessor pair and one coercion rule per field.

use serde_json::Value;

use crate::config::PipelineConfig;
use crate::options::{
    Choice, ColorLayer, CosmeticCorrection, DarkOptimization, Distortion, DrizzleKernel,
    FlatBiasSource, Framing, Interpolation, Normalization, RejectionAlgorithm, RejectionMap,
    StackMethod, Transform, Weighting,
};

type Get<T> = fn(&PipelineConfig) -> T;
type Set<T> = fn(&mut PipelineConfig, T);

pub(super) enum Slot {
    Text(Get<String>, Set<String>),
    Flag(Get<bool>, Set<bool>),
    Real(Get<f64>, Set<f64>),
    Count(Get<u32>, Set<u32>),
    Index(Get<usize>, Set<usize>),
}

pub(super) struct Field {
    pub key: &'static str,
    pub slot: Slot,
}

impl Field {
    pub fn read(&self, cfg: &PipelineConfig) -> Value {
        match self.slot {
            Slot::Text(get, _) => Value::from(get(cfg)),
            Slot::Flag(get, _) => Value::from(get(cfg)),
            Slot::Real(get, _) => Value::from(get(cfg)),
            Slot::Count(get, _) => Value::from(get(cfg)),
            Slot::Index(get, _) => Value::from(get(cfg)),
        }
    }

    /// Store a persisted value. Values that cannot be coerced leave the
    /// field untouched.
    pub fn write(&self, cfg: &mut PipelineConfig, value: &Value) {
        match self.slot {
            Slot::Text(_, set) => {
                if let Some(v) = coerce_text(value) {
                    set(cfg, v);
                }
            }
            Slot::Flag(_, set) => set(cfg, coerce_flag(value)),
            Slot::Real(_, set) => {
                if let Some(v) = coerce_real(value) {
                    set(cfg, v);
                }
            }
            Slot::Count(_, set) => {
                if let Some(v) = coerce_count(value) {
                    set(cfg, v);
                }
            }
            Slot::Index(_, set) => {
                if let Some(v) = coerce_count(value) {
                    set(cfg, v as usize);
                }
            }
        }
    }
}

/// Strings as-is; numbers and booleans by their textual form.
pub(super) fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness: zero, empty and null are false.
pub(super) fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

pub(super) fn coerce_real(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }?;
    v.is_finite().then_some(v)
}

/// Parsed as a float first so `10.0` is accepted, then truncated.
/// Negative values saturate to zero.
pub(super) fn coerce_count(value: &Value) -> Option<u32> {
    coerce_real(value).map(|v| v.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
}

macro_rules! text {
    ($key:literal, $($path:ident).+) => {
        Field {
            key: $key,
            slot: Slot::Text(|c| c.$($path).+.clone(), |c, v| c.$($path).+ = v),
        }
    };
}

macro_rules! flag {
    ($key:literal, $($path:ident).+) => {
        Field {
            key: $key,
            slot: Slot::Flag(|c| c.$($path).+, |c, v| c.$($path).+ = v),
        }
    };
}

macro_rules! real {
    ($key:literal, $($path:ident).+) => {
        Field {
            key: $key,
            slot: Slot::Real(|c| c.$($path).+, |c, v| c.$($path).+ = v),
        }
    };
}

macro_rules! count {
    ($key:literal, $($path:ident).+) => {
        Field {
            key: $key,
            slot: Slot::Count(|c| c.$($path).+, |c, v| c.$($path).+ = v),
        }
    };
}

macro_rules! choice {
    ($key:literal, $ty:ty, $($path:ident).+) => {
        Field {
            key: $key,
            slot: Slot::Index(
                |c| c.$($path).+.index(),
                |c, i| {
                    if let Some(v) = <$ty>::from_index(i) {
                        c.$($path).+ = v;
                    }
                },
            ),
        }
    };
}

/// Key under which the opt-in flag is stored.
pub(super) const SAVE_ENABLED: &str = "save_enabled";

/// Key holding the filter records.
pub(super) const FILTERS: &str = "filters";

/// Every persisted scalar field, keyed as existing settings files name them.
pub(super) fn fields() -> Vec<Field> {
    vec![
        // Convert
        text!("conv_basename", convert.basename),
        text!("conv_start_idx", convert.start_index),
        text!("conv_out_dir", convert.output_dir),
        flag!("conv_debayer", convert.debayer),
        flag!("create_master_bias", masters.create_bias),
        flag!("create_master_flat", masters.create_flat),
        choice!("flat_bias_source", FlatBiasSource, masters.flat_bias_source),
        text!("flat_synth_bias_val", masters.synthetic_bias),
        flag!("create_master_dark", masters.create_dark),
        // Calibration
        text!("cal_seq_name", calibration.sequence),
        text!("cal_prefix", calibration.prefix),
        flag!("use_bias_chk", calibration.use_bias),
        text!("use_bias_path", calibration.bias_path),
        flag!("use_dark_chk", calibration.use_dark),
        text!("use_dark_path", calibration.dark_path),
        flag!("use_flat_chk", calibration.use_flat),
        text!("use_flat_path", calibration.flat_path),
        choice!("cal_cc_type", CosmeticCorrection, calibration.cosmetic),
        text!("cal_bpm_path", calibration.bpm_path),
        real!("cal_cold_sigma", calibration.cold_sigma),
        real!("cal_hot_sigma", calibration.hot_sigma),
        flag!("cal_cfa_chk", calibration.cfa),
        flag!("cal_eq_cfa_chk", calibration.equalize_cfa),
        flag!("cal_fix_xtrans", calibration.fix_xtrans),
        choice!("cal_dark_opt", DarkOptimization, calibration.dark_optimization),
        flag!("cal_debayer_chk", calibration.debayer),
        // Registration
        text!("reg_seq_name", registration.sequence),
        text!("reg_prefix", registration.prefix),
        choice!("reg_transform", Transform, registration.transform),
        choice!("reg_layer", ColorLayer, registration.layer),
        flag!("reg_2pass_chk", registration.two_pass),
        count!("reg_minpairs", registration.min_pairs),
        count!("reg_maxstars", registration.max_stars),
        flag!("reg_drizzle_chk", registration.drizzle),
        real!("reg_driz_scale", registration.drizzle_scale),
        real!("reg_driz_pixfrac", registration.drizzle_pixfrac),
        choice!("reg_driz_kernel", DrizzleKernel, registration.drizzle_kernel),
        choice!("reg_interp", Interpolation, registration.interpolation),
        choice!("reg_disto", Distortion, registration.distortion),
        choice!("reg_framing", Framing, registration.framing),
        // Stacking
        text!("stk_seq_name", stacking.sequence),
        text!("stk_out_name", stacking.output),
        choice!("stk_method", StackMethod, stacking.method),
        choice!("stk_norm", Normalization, stacking.normalization),
        choice!("stk_rej_algo", RejectionAlgorithm, stacking.rejection),
        real!("stk_sigma_low", stacking.sigma_low),
        real!("stk_sigma_high", stacking.sigma_high),
        choice!("stk_weight", Weighting, stacking.weighting),
        flag!("stk_rgb_eq", stacking.rgb_equalize),
        flag!("stk_out_norm", stacking.output_normalize),
        flag!("stk_32b", stacking.float32),
        flag!("stk_maximize", stacking.maximize_framing),
        flag!("stk_overlap_norm", stacking.overlap_normalize),
        count!("stk_feather", stacking.feather),
        choice!("stk_rej_map", RejectionMap, stacking.rejection_map),
        flag!("stk_bottomup_chk", stacking.flip_bottom_up),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_unique() {
        let fields = fields();
        let mut keys: Vec<_> = fields.iter().map(|f| f.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), fields.len());
        assert!(!keys.contains(&SAVE_ENABLED));
        assert!(!keys.contains(&FILTERS));
    }

    #[test]
    fn test_count_goes_through_float() {
        assert_eq!(coerce_count(&json!(10.0)), Some(10));
        assert_eq!(coerce_count(&json!(10.9)), Some(10));
        assert_eq!(coerce_count(&json!("2000")), Some(2000));
        assert_eq!(coerce_count(&json!("12.5")), Some(12));
        assert_eq!(coerce_count(&json!(-3)), Some(0));
        assert_eq!(coerce_count(&json!("abc")), None);
        assert_eq!(coerce_count(&json!(null)), None);
    }

    #[test]
    fn test_text_and_flag_coercion() {
        assert_eq!(coerce_text(&json!(1)), Some("1".to_string()));
        assert_eq!(coerce_text(&json!("x")), Some("x".to_string()));
        assert_eq!(coerce_text(&json!([1])), None);
        assert!(coerce_flag(&json!(1)));
        assert!(!coerce_flag(&json!(0)));
        assert!(!coerce_flag(&json!("")));
        assert!(!coerce_flag(&json!(null)));
    }

    #[test]
    fn test_real_rejects_non_finite_text() {
        assert_eq!(coerce_real(&json!("2.5")), Some(2.5));
        assert_eq!(coerce_real(&json!("inf")), None);
        assert_eq!(coerce_real(&json!(true)), Some(1.0));
    }

    #[test]
    fn test_out_of_range_index_keeps_value() {
        let field = choice!("reg_framing", Framing, registration.framing);
        let mut cfg = PipelineConfig::default();
        field.write(&mut cfg, &json!(1));
        assert_eq!(cfg.registration.framing, Framing::Max);
        field.write(&mut cfg, &json!(17));
        assert_eq!(cfg.registration.framing, Framing::Max);
        assert_eq!(field.read(&cfg), json!(1));
    }
}
