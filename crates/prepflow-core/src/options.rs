//! User-facing option enumerations.
//!
//! Every enum lists its variants in the order an editor presents them, so
//! the variant position doubles as the persisted UI index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of options selectable by index.
pub trait Choice: Copy + PartialEq + 'static {
    /// All variants, in presentation order.
    const ALL: &'static [Self];

    /// Position of this variant in [`Choice::ALL`].
    fn index(self) -> usize;

    /// Variant at `index`, or `None` when the index is out of range.
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

macro_rules! impl_choice {
    ($ty:ty, [$($variant:ident),+ $(,)?]) => {
        impl Choice for $ty {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn index(self) -> usize {
                self as usize
            }
        }
    };
}

/// Where the bias subtracted from flats comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlatBiasSource {
    #[default]
    MasterBias,
    SyntheticBias,
    None,
}

impl_choice!(FlatBiasSource, [MasterBias, SyntheticBias, None]);

impl fmt::Display for FlatBiasSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MasterBias => write!(f, "Use Master Bias"),
            Self::SyntheticBias => write!(f, "Use Synthetic Bias"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Dark frame scaling during calibration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DarkOptimization {
    #[default]
    None,
    Auto,
    UseExposure,
}

impl_choice!(DarkOptimization, [None, Auto, UseExposure]);

impl fmt::Display for DarkOptimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Auto => write!(f, "Auto-evaluation"),
            Self::UseExposure => write!(f, "Use Exposure"),
        }
    }
}

/// Hot/cold pixel replacement strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CosmeticCorrection {
    #[default]
    None,
    FromDark,
    BadPixelMap,
}

impl_choice!(CosmeticCorrection, [None, FromDark, BadPixelMap]);

impl fmt::Display for CosmeticCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::FromDark => write!(f, "Cold/Hot Pixels (from Dark)"),
            Self::BadPixelMap => write!(f, "Bad Pixel Map (BPM)"),
        }
    }
}

/// Geometric model fitted between registered frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    #[default]
    Homography,
    Affine,
    Similarity,
    Euclidean,
    Shift,
}

impl_choice!(Transform, [Homography, Affine, Similarity, Euclidean, Shift]);

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Homography => write!(f, "Homography"),
            Self::Affine => write!(f, "Affine"),
            Self::Similarity => write!(f, "Similarity"),
            Self::Euclidean => write!(f, "Euclidean"),
            Self::Shift => write!(f, "Shift"),
        }
    }
}

/// Channel used for star detection. Green first, as editors present it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorLayer {
    #[default]
    Green,
    Red,
    Blue,
}

impl_choice!(ColorLayer, [Green, Red, Blue]);

impl fmt::Display for ColorLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "Green"),
            Self::Red => write!(f, "Red"),
            Self::Blue => write!(f, "Blue"),
        }
    }
}

/// Drop kernel used when drizzling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrizzleKernel {
    #[default]
    Square,
    Point,
    Gaussian,
    Turbo,
    Lanczos2,
    Lanczos3,
}

impl_choice!(DrizzleKernel, [Square, Point, Gaussian, Turbo, Lanczos2, Lanczos3]);

impl fmt::Display for DrizzleKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => write!(f, "Square"),
            Self::Point => write!(f, "Point"),
            Self::Gaussian => write!(f, "Gaussian"),
            Self::Turbo => write!(f, "Turbo"),
            Self::Lanczos2 => write!(f, "Lanczos2"),
            Self::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// Pixel interpolation used when applying a registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Lanczos4,
    Cubic,
    Linear,
    Nearest,
    Area,
    None,
}

impl_choice!(Interpolation, [Lanczos4, Cubic, Linear, Nearest, Area, None]);

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lanczos4 => write!(f, "Lanczos4"),
            Self::Cubic => write!(f, "Cubic"),
            Self::Linear => write!(f, "Linear"),
            Self::Nearest => write!(f, "Nearest"),
            Self::Area => write!(f, "Area"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Optical distortion correction source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distortion {
    #[default]
    None,
    ApplyFromImage,
    FromFile,
    FromMasters,
}

impl_choice!(Distortion, [None, ApplyFromImage, FromFile, FromMasters]);

impl fmt::Display for Distortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::ApplyFromImage => write!(f, "Apply (Image)"),
            Self::FromFile => write!(f, "From File"),
            Self::FromMasters => write!(f, "From Masters"),
        }
    }
}

/// Output canvas sizing for two-pass registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Framing {
    #[default]
    Current,
    Max,
    Min,
    CenterOfGravity,
}

impl_choice!(Framing, [Current, Max, Min, CenterOfGravity]);

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "Current"),
            Self::Max => write!(f, "Max (Bounding Box)"),
            Self::Min => write!(f, "Min (Common Area)"),
            Self::CenterOfGravity => write!(f, "Center of Gravity"),
        }
    }
}

/// How registered frames are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackMethod {
    #[default]
    AverageWithRejection,
    Sum,
    Median,
    PixelMax,
    PixelMin,
}

impl_choice!(StackMethod, [AverageWithRejection, Sum, Median, PixelMax, PixelMin]);

impl StackMethod {
    /// Only average-with-rejection takes rejection, normalization,
    /// weighting and filter flags.
    pub fn uses_rejection(self) -> bool {
        matches!(self, Self::AverageWithRejection)
    }
}

impl fmt::Display for StackMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AverageWithRejection => write!(f, "Average with Rejection"),
            Self::Sum => write!(f, "Sum"),
            Self::Median => write!(f, "Median"),
            Self::PixelMax => write!(f, "Pixel Maximum"),
            Self::PixelMin => write!(f, "Pixel Minimum"),
        }
    }
}

/// Rejection maps written alongside the stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionMap {
    #[default]
    None,
    OneMap,
    TwoMaps,
}

impl_choice!(RejectionMap, [None, OneMap, TwoMaps]);

impl fmt::Display for RejectionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::OneMap => write!(f, "One Map"),
            Self::TwoMaps => write!(f, "Two Maps"),
        }
    }
}

/// Per-frame normalization before combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalization {
    #[default]
    AddScale,
    None,
    Add,
    Mul,
    MulScale,
}

impl_choice!(Normalization, [AddScale, None, Add, Mul, MulScale]);

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddScale => write!(f, "Additive + Scaling"),
            Self::None => write!(f, "None"),
            Self::Add => write!(f, "Additive"),
            Self::Mul => write!(f, "Multiplicative"),
            Self::MulScale => write!(f, "Multiplicative + Scaling"),
        }
    }
}

/// Pixel outlier rejection algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionAlgorithm {
    #[default]
    Sigma,
    Winsorized,
    Mad,
    Percentile,
    Gesd,
    LinearFit,
    None,
}

impl_choice!(
    RejectionAlgorithm,
    [Sigma, Winsorized, Mad, Percentile, Gesd, LinearFit, None]
);

impl fmt::Display for RejectionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sigma => write!(f, "Sigma Clipping"),
            Self::Winsorized => write!(f, "Winsorized Sigma Clipping"),
            Self::Mad => write!(f, "MAD Clipping"),
            Self::Percentile => write!(f, "Percentile Clipping"),
            Self::Gesd => write!(f, "Generalized ESD"),
            Self::LinearFit => write!(f, "Linear Fit Clipping"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Per-frame weighting during combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weighting {
    #[default]
    None,
    Noise,
    WeightedFwhm,
    StarCount,
    ImageCount,
}

impl_choice!(Weighting, [None, Noise, WeightedFwhm, StarCount, ImageCount]);

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Noise => write!(f, "Noise"),
            Self::WeightedFwhm => write!(f, "Weighted FWHM"),
            Self::StarCount => write!(f, "Number of Stars"),
            Self::ImageCount => write!(f, "Number of Images"),
        }
    }
}

/// Image quality metric an image-rejection filter thresholds on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    #[default]
    Fwhm,
    WeightedFwhm,
    Roundness,
    Background,
    StarCount,
    Quality,
}

impl_choice!(
    FilterKind,
    [Fwhm, WeightedFwhm, Roundness, Background, StarCount, Quality]
);

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fwhm => write!(f, "FWHM"),
            Self::WeightedFwhm => write!(f, "Weighted FWHM"),
            Self::Roundness => write!(f, "Roundness"),
            Self::Background => write!(f, "Background"),
            Self::StarCount => write!(f, "Star Count"),
            Self::Quality => write!(f, "Quality"),
        }
    }
}

/// How a filter threshold is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterUnit {
    /// Keep the given percentage of best frames.
    #[default]
    Percent,
    /// Reject frames beyond the given number of standard deviations.
    Sigma,
    /// Absolute threshold in the metric's own unit.
    Value,
}

impl_choice!(FilterUnit, [Percent, Sigma, Value]);

impl fmt::Display for FilterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent => write!(f, "%"),
            Self::Sigma => write!(f, "Sigma"),
            Self::Value => write!(f, "Value"),
        }
    }
}
