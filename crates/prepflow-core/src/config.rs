use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_STARS, DEFAULT_MIN_PAIRS, DEFAULT_SIGMA, DIR_MASTERS, DIR_PROCESS,
};
use crate::error::Result;
use crate::options::{
    ColorLayer, CosmeticCorrection, DarkOptimization, Distortion, DrizzleKernel, FilterKind,
    FilterUnit, FlatBiasSource, Framing, Interpolation, Normalization, RejectionAlgorithm,
    RejectionMap, StackMethod, Transform, Weighting,
};

/// Every user-settable option of a preprocessing session.
///
/// This is the raw configuration as edited. Cross-field constraints are not
/// enforced here; run it through [`crate::resolve::resolve`] before compiling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub masters: MastersConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub stacking: StackingConfig,
}

impl PipelineConfig {
    /// Parse a (possibly partial) TOML pipeline file.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Conversion of the light frames into a sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub basename: String,
    /// Kept as text so expressions pass through untouched.
    pub start_index: String,
    pub output_dir: String,
    pub debayer: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            basename: "light".into(),
            start_index: "1".into(),
            output_dir: DIR_PROCESS.into(),
            debayer: false,
        }
    }
}

/// Which calibration masters to build from raw frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MastersConfig {
    pub create_bias: bool,
    pub create_flat: bool,
    pub create_dark: bool,
    pub flat_bias_source: FlatBiasSource,
    /// Expression for a synthetic bias level, e.g. `64*$OFFSET`.
    pub synthetic_bias: String,
}

impl Default for MastersConfig {
    fn default() -> Self {
        Self {
            create_bias: true,
            create_flat: true,
            create_dark: true,
            flat_bias_source: FlatBiasSource::MasterBias,
            synthetic_bias: String::new(),
        }
    }
}

/// Calibration of the light sequence against the masters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub sequence: String,
    pub prefix: String,
    pub use_bias: bool,
    pub bias_path: String,
    pub use_dark: bool,
    pub dark_path: String,
    pub use_flat: bool,
    pub flat_path: String,
    pub dark_optimization: DarkOptimization,
    pub cosmetic: CosmeticCorrection,
    pub cold_sigma: f64,
    pub hot_sigma: f64,
    pub bpm_path: String,
    pub cfa: bool,
    pub equalize_cfa: bool,
    pub debayer: bool,
    pub fix_xtrans: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            sequence: "light".into(),
            prefix: "pp_".into(),
            use_bias: false,
            bias_path: format!("{DIR_MASTERS}/bias_stacked.fit"),
            use_dark: true,
            dark_path: format!("{DIR_MASTERS}/dark_stacked.fit"),
            use_flat: true,
            flat_path: format!("{DIR_MASTERS}/pp_flat_stacked.fit"),
            dark_optimization: DarkOptimization::None,
            cosmetic: CosmeticCorrection::None,
            cold_sigma: DEFAULT_SIGMA,
            hot_sigma: DEFAULT_SIGMA,
            bpm_path: format!("{DIR_MASTERS}/bpm.lst"),
            cfa: true,
            equalize_cfa: true,
            debayer: false,
            fix_xtrans: false,
        }
    }
}

/// Star-based registration of the calibrated sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub sequence: String,
    pub prefix: String,
    pub transform: Transform,
    pub layer: ColorLayer,
    pub two_pass: bool,
    pub min_pairs: u32,
    pub max_stars: u32,
    pub drizzle: bool,
    /// Drizzle output scale (0.1-10.0).
    pub drizzle_scale: f64,
    /// Drizzle drop size as a fraction of an input pixel (0.1-1.0).
    pub drizzle_pixfrac: f64,
    pub drizzle_kernel: DrizzleKernel,
    pub interpolation: Interpolation,
    pub distortion: Distortion,
    /// Only meaningful for two-pass registration.
    pub framing: Framing,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            sequence: "pp_light".into(),
            prefix: "r_".into(),
            transform: Transform::Homography,
            layer: ColorLayer::Green,
            two_pass: false,
            min_pairs: DEFAULT_MIN_PAIRS,
            max_stars: DEFAULT_MAX_STARS,
            drizzle: false,
            drizzle_scale: 1.0,
            drizzle_pixfrac: 1.0,
            drizzle_kernel: DrizzleKernel::Square,
            interpolation: Interpolation::Lanczos4,
            distortion: Distortion::None,
            framing: Framing::Current,
        }
    }
}

/// Final combination of the registered sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackingConfig {
    pub sequence: String,
    /// Output file base name, without extension.
    pub output: String,
    pub method: StackMethod,
    pub rejection_map: RejectionMap,
    pub normalization: Normalization,
    pub rejection: RejectionAlgorithm,
    pub sigma_low: f64,
    pub sigma_high: f64,
    pub weighting: Weighting,
    pub rgb_equalize: bool,
    pub output_normalize: bool,
    pub float32: bool,
    pub flip_bottom_up: bool,
    pub maximize_framing: bool,
    pub overlap_normalize: bool,
    /// Feathering distance in pixels; 0 disables it.
    pub feather: u32,
    pub filters: Vec<RejectionFilter>,
}

impl Default for StackingConfig {
    fn default() -> Self {
        Self {
            sequence: "r_pp_light".into(),
            output: "result".into(),
            method: StackMethod::AverageWithRejection,
            rejection_map: RejectionMap::None,
            normalization: Normalization::AddScale,
            rejection: RejectionAlgorithm::Sigma,
            sigma_low: DEFAULT_SIGMA,
            sigma_high: DEFAULT_SIGMA,
            weighting: Weighting::None,
            rgb_equalize: true,
            output_normalize: true,
            float32: true,
            flip_bottom_up: false,
            maximize_framing: false,
            overlap_normalize: false,
            feather: 0,
            filters: Vec::new(),
        }
    }
}

/// One image-rejection filter applied while stacking.
///
/// Duplicate kinds are allowed; each entry emits its own flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RejectionFilter {
    pub kind: FilterKind,
    /// A bare number or an expression understood by the interpreter.
    pub threshold: String,
    pub unit: FilterUnit,
}

impl RejectionFilter {
    pub fn new(kind: FilterKind, threshold: impl Into<String>, unit: FilterUnit) -> Self {
        Self {
            kind,
            threshold: threshold.into(),
            unit,
        }
    }
}
