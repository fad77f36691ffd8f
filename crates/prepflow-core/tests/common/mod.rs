#![allow(dead_code)]

use prepflow_core::config::{PipelineConfig, RejectionFilter};
use prepflow_core::options::{
    Choice, ColorLayer, CosmeticCorrection, DarkOptimization, DrizzleKernel, FilterKind,
    FilterUnit, FlatBiasSource, Framing, Interpolation, Normalization, RejectionAlgorithm,
    RejectionMap, StackMethod, Transform, Weighting,
};
use prepflow_core::script::Script;

/// Every combination of the fields the consistency rules read or write,
/// on top of the default configuration.
pub fn config_grid() -> Vec<PipelineConfig> {
    let mut out = Vec::new();
    for bits in 0u32..64 {
        for framing in Framing::ALL {
            for method in StackMethod::ALL {
                let mut cfg = PipelineConfig::default();
                cfg.registration.drizzle = bits & 1 != 0;
                cfg.calibration.debayer = bits & 2 != 0;
                cfg.registration.two_pass = bits & 4 != 0;
                cfg.stacking.maximize_framing = bits & 8 != 0;
                cfg.stacking.overlap_normalize = bits & 16 != 0;
                cfg.stacking.feather = if bits & 32 != 0 { 25 } else { 0 };
                cfg.registration.framing = *framing;
                cfg.stacking.method = *method;
                out.push(cfg);
            }
        }
    }
    out
}

/// Default configuration with masters disabled, so only the light-frame
/// sections are emitted.
pub fn lights_only() -> PipelineConfig {
    let mut cfg = PipelineConfig::default();
    cfg.masters.create_bias = false;
    cfg.masters.create_flat = false;
    cfg.masters.create_dark = false;
    cfg
}

/// A configuration with every field moved away from its default.
pub fn customized() -> PipelineConfig {
    let mut cfg = PipelineConfig::default();
    cfg.convert.basename = "m31".into();
    cfg.convert.start_index = "5".into();
    cfg.convert.output_dir = "../work".into();
    cfg.convert.debayer = true;
    cfg.masters.create_bias = false;
    cfg.masters.flat_bias_source = FlatBiasSource::SyntheticBias;
    cfg.masters.synthetic_bias = "64*$OFFSET".into();
    cfg.calibration.use_bias = true;
    cfg.calibration.cosmetic = CosmeticCorrection::FromDark;
    cfg.calibration.cold_sigma = 2.5;
    cfg.calibration.hot_sigma = 4.0;
    cfg.calibration.dark_optimization = DarkOptimization::UseExposure;
    cfg.calibration.fix_xtrans = true;
    cfg.registration.transform = Transform::Shift;
    cfg.registration.layer = ColorLayer::Blue;
    cfg.registration.two_pass = true;
    cfg.registration.min_pairs = 7;
    cfg.registration.max_stars = 900;
    cfg.registration.drizzle = true;
    cfg.registration.drizzle_scale = 2.0;
    cfg.registration.drizzle_pixfrac = 0.8;
    cfg.registration.drizzle_kernel = DrizzleKernel::Lanczos3;
    cfg.registration.interpolation = Interpolation::Cubic;
    cfg.registration.framing = Framing::Max;
    cfg.stacking.output = "m31_final".into();
    cfg.stacking.normalization = Normalization::MulScale;
    cfg.stacking.rejection = RejectionAlgorithm::Winsorized;
    cfg.stacking.sigma_low = 2.0;
    cfg.stacking.sigma_high = 3.5;
    cfg.stacking.weighting = Weighting::WeightedFwhm;
    cfg.stacking.rejection_map = RejectionMap::TwoMaps;
    cfg.stacking.maximize_framing = true;
    cfg.stacking.overlap_normalize = true;
    cfg.stacking.feather = 30;
    cfg.stacking.flip_bottom_up = true;
    cfg.stacking.filters = vec![
        RejectionFilter::new(FilterKind::Roundness, "0.6", FilterUnit::Value),
        RejectionFilter::new(FilterKind::Fwhm, "90", FilterUnit::Percent),
        RejectionFilter::new(FilterKind::Fwhm, "2", FilterUnit::Sigma),
    ];
    cfg
}

/// The first command starting with `prefix`.
pub fn command<'s>(script: &'s Script, prefix: &str) -> &'s str {
    script
        .commands()
        .find(|c| c.starts_with(prefix))
        .unwrap_or_else(|| panic!("no command starting with {prefix:?}"))
}
