//! Cross-field consistency rules.
//!
//! [`resolve`] derives the effective configuration from the raw one. It is
//! pure and idempotent, so callers re-run it on every read instead of
//! tracking which field changed.

use tracing::debug;

use crate::config::PipelineConfig;
use crate::options::{CosmeticCorrection, FlatBiasSource, Framing};

/// Apply the consistency rules to a raw configuration.
///
/// Rules, in order:
/// 1. drizzle forces calibration debayer off;
/// 2. calibration debayer forces drizzle off;
/// 3. single-pass registration forces `Current` framing;
/// 4. framing other than `Max` disables maximize framing and feathering;
/// 5. without maximize framing there is no overlap normalization.
///
/// Rejection-family stacking options for non-rejecting methods are left in
/// place; the compiler skips them.
pub fn resolve(raw: &PipelineConfig) -> PipelineConfig {
    let mut cfg = raw.clone();

    if cfg.registration.drizzle && cfg.calibration.debayer {
        debug!("drizzle enabled, dropping calibration debayer");
        cfg.calibration.debayer = false;
    }
    if cfg.calibration.debayer {
        cfg.registration.drizzle = false;
    }

    if !cfg.registration.two_pass {
        cfg.registration.framing = Framing::Current;
    }

    if cfg.registration.framing != Framing::Max {
        cfg.stacking.maximize_framing = false;
        cfg.stacking.feather = 0;
    }

    if !cfg.stacking.maximize_framing {
        cfg.stacking.overlap_normalize = false;
    }

    cfg
}

/// Edit-time helpers. Whichever of the drizzle/debayer pair was set last
/// wins; [`resolve`] alone prefers drizzle when both are on.
impl PipelineConfig {
    pub fn set_drizzle(&mut self, enabled: bool) {
        self.registration.drizzle = enabled;
        if enabled {
            self.calibration.debayer = false;
        }
    }

    pub fn set_calibration_debayer(&mut self, enabled: bool) {
        self.calibration.debayer = enabled;
        if enabled {
            self.registration.drizzle = false;
        }
    }
}

/// Whether an editor should show and allow changes to each dependent field.
///
/// This is what a form derives its show/hide and enable/disable state
/// from; it carries no layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldStates {
    pub flat_options_visible: bool,
    pub synthetic_bias_visible: bool,
    pub bpm_path_visible: bool,
    pub cosmetic_sigmas_visible: bool,
    pub calibration_debayer_editable: bool,
    pub drizzle_editable: bool,
    pub drizzle_options_visible: bool,
    pub interpolation_visible: bool,
    pub distortion_visible: bool,
    pub framing_visible: bool,
    pub rejection_options_visible: bool,
    pub stitching_visible: bool,
    pub overlap_normalize_editable: bool,
    pub bias_path_editable: bool,
    pub dark_path_editable: bool,
    pub flat_path_editable: bool,
}

impl FieldStates {
    /// Derive field states from the effective configuration of `raw`.
    pub fn of(raw: &PipelineConfig) -> Self {
        let cfg = resolve(raw);
        let masters = &cfg.masters;
        let cal = &cfg.calibration;
        let reg = &cfg.registration;
        let stk = &cfg.stacking;

        Self {
            flat_options_visible: masters.create_flat,
            synthetic_bias_visible: masters.create_flat
                && masters.flat_bias_source == FlatBiasSource::SyntheticBias,
            bpm_path_visible: cal.cosmetic == CosmeticCorrection::BadPixelMap,
            cosmetic_sigmas_visible: cal.cosmetic == CosmeticCorrection::FromDark,
            calibration_debayer_editable: !reg.drizzle,
            drizzle_editable: !cal.debayer,
            drizzle_options_visible: reg.drizzle,
            interpolation_visible: !reg.drizzle,
            distortion_visible: !reg.drizzle,
            framing_visible: reg.two_pass,
            rejection_options_visible: stk.method.uses_rejection(),
            stitching_visible: reg.framing == Framing::Max,
            overlap_normalize_editable: stk.maximize_framing,
            bias_path_editable: cal.use_bias,
            dark_path_editable: cal.use_dark,
            flat_path_editable: cal.use_flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StackMethod;

    #[test]
    fn test_drizzle_wins_when_both_set() {
        let mut raw = PipelineConfig::default();
        raw.registration.drizzle = true;
        raw.calibration.debayer = true;
        let eff = resolve(&raw);
        assert!(eff.registration.drizzle);
        assert!(!eff.calibration.debayer);
    }

    #[test]
    fn test_debayer_alone_is_kept() {
        let mut raw = PipelineConfig::default();
        raw.calibration.debayer = true;
        let eff = resolve(&raw);
        assert!(eff.calibration.debayer);
        assert!(!eff.registration.drizzle);
    }

    #[test]
    fn test_last_set_wins() {
        let mut raw = PipelineConfig::default();
        raw.set_drizzle(true);
        raw.set_calibration_debayer(true);
        assert!(!raw.registration.drizzle);
        assert!(raw.calibration.debayer);

        raw.set_drizzle(true);
        assert!(raw.registration.drizzle);
        assert!(!raw.calibration.debayer);
    }

    #[test]
    fn test_max_framing_keeps_stitching() {
        let mut raw = PipelineConfig::default();
        raw.registration.two_pass = true;
        raw.registration.framing = Framing::Max;
        raw.stacking.maximize_framing = true;
        raw.stacking.overlap_normalize = true;
        raw.stacking.feather = 40;
        assert_eq!(resolve(&raw), raw);
    }

    #[test]
    fn test_single_pass_clears_stitching_chain() {
        let mut raw = PipelineConfig::default();
        raw.registration.framing = Framing::Max;
        raw.stacking.maximize_framing = true;
        raw.stacking.overlap_normalize = true;
        raw.stacking.feather = 40;
        let eff = resolve(&raw);
        assert_eq!(eff.registration.framing, Framing::Current);
        assert!(!eff.stacking.maximize_framing);
        assert!(!eff.stacking.overlap_normalize);
        assert_eq!(eff.stacking.feather, 0);
    }

    #[test]
    fn test_resolve_does_not_touch_raw() {
        let mut raw = PipelineConfig::default();
        raw.registration.framing = Framing::Min;
        let _ = resolve(&raw);
        assert_eq!(raw.registration.framing, Framing::Min);
    }

    #[test]
    fn test_field_states_follow_effective_config() {
        let mut raw = PipelineConfig::default();
        raw.registration.drizzle = true;
        raw.stacking.method = StackMethod::Median;
        let states = FieldStates::of(&raw);
        assert!(!states.calibration_debayer_editable);
        assert!(states.drizzle_editable);
        assert!(states.drizzle_options_visible);
        assert!(!states.interpolation_visible);
        assert!(!states.rejection_options_visible);
        assert!(!states.framing_visible);
        assert!(!states.stitching_visible);
        assert!(!states.bias_path_editable);
        assert!(states.dark_path_editable);
    }
}
