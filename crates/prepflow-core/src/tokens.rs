//! Mappings between option variants and the interpreter's command tokens.
//!
//! Every table is an exhaustive `match`, so a variant without a token is a
//! compile error rather than a runtime lookup failure.

use crate::options::{
    Choice, ColorLayer, DarkOptimization, Distortion, DrizzleKernel, FilterKind, FilterUnit,
    Framing, Interpolation, Normalization, RejectionAlgorithm, RejectionMap, StackMethod,
    Transform, Weighting,
};

/// An option with a plain-word token in the command grammar.
pub trait Token: Choice {
    fn token(self) -> &'static str;

    /// Reverse lookup. Returns `None` for tokens no variant produces.
    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.token() == token)
    }
}

impl Token for Transform {
    fn token(self) -> &'static str {
        match self {
            Self::Homography => "homography",
            Self::Affine => "affine",
            Self::Similarity => "similarity",
            Self::Euclidean => "euclidean",
            Self::Shift => "shift",
        }
    }
}

impl Token for Interpolation {
    fn token(self) -> &'static str {
        match self {
            Self::Lanczos4 => "la",
            Self::Cubic => "cu",
            Self::Linear => "li",
            Self::Nearest => "ne",
            Self::Area => "ar",
            Self::None => "no",
        }
    }
}

impl Token for Framing {
    fn token(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Max => "max",
            Self::Min => "min",
            Self::CenterOfGravity => "cog",
        }
    }
}

impl Token for DrizzleKernel {
    fn token(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Point => "point",
            Self::Gaussian => "gaussian",
            Self::Turbo => "turbo",
            Self::Lanczos2 => "lanczos2",
            Self::Lanczos3 => "lanczos3",
        }
    }
}

impl Token for FilterKind {
    fn token(self) -> &'static str {
        match self {
            Self::Fwhm => "fwhm",
            Self::WeightedFwhm => "wfwhm",
            Self::Roundness => "round",
            Self::Background => "bkg",
            Self::StarCount => "nbstars",
            Self::Quality => "quality",
        }
    }
}

impl Token for StackMethod {
    fn token(self) -> &'static str {
        match self {
            Self::AverageWithRejection => "rej",
            Self::Sum => "sum",
            Self::Median => "median",
            Self::PixelMax => "max",
            Self::PixelMin => "min",
        }
    }
}

impl ColorLayer {
    /// Interpreter channel number. The interpreter orders channels
    /// red, green, blue while editors list green first.
    pub fn channel(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    pub fn from_channel(channel: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.channel() == channel)
    }
}

impl RejectionAlgorithm {
    /// Single-letter code; `None` means the whole rejection argument is omitted.
    pub fn letter(self) -> Option<char> {
        match self {
            Self::Sigma => Some('s'),
            Self::Winsorized => Some('w'),
            Self::Mad => Some('a'),
            Self::Percentile => Some('p'),
            Self::Gesd => Some('g'),
            Self::LinearFit => Some('l'),
            Self::None => None,
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.letter() == Some(letter))
    }
}

impl Normalization {
    pub fn flag(self) -> &'static str {
        match self {
            Self::AddScale => "-norm=addscale",
            Self::None => "-nonorm",
            Self::Add => "-norm=add",
            Self::Mul => "-norm=mul",
            Self::MulScale => "-norm=mulscale",
        }
    }
}

impl Weighting {
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Noise => Some("-weight=noise"),
            Self::WeightedFwhm => Some("-weight=wfwhm"),
            Self::StarCount => Some("-weight=nbstars"),
            Self::ImageCount => Some("-weight=nbstack"),
        }
    }
}

impl RejectionMap {
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::OneMap => Some("-rejmap"),
            Self::TwoMaps => Some("-rejmaps"),
        }
    }
}

impl DarkOptimization {
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Auto => Some("-opt"),
            Self::UseExposure => Some("-opt=exp"),
        }
    }
}

impl Distortion {
    /// Only image-embedded distortion data can be referenced without an
    /// extra path, so the other sources emit nothing.
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::ApplyFromImage => Some("-disto=image"),
            Self::None | Self::FromFile | Self::FromMasters => None,
        }
    }
}

impl FilterUnit {
    /// Suffix appended to a filter threshold.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Sigma => "k",
            Self::Value => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_remap() {
        assert_eq!(ColorLayer::Red.channel(), 0);
        assert_eq!(ColorLayer::Green.channel(), 1);
        assert_eq!(ColorLayer::Blue.channel(), 2);
        assert_eq!(ColorLayer::from_channel(0), Some(ColorLayer::Red));
        assert_eq!(ColorLayer::from_channel(3), None);
    }

    #[test]
    fn test_tokens_reverse() {
        for t in Transform::ALL {
            assert_eq!(Transform::from_token(t.token()), Some(*t));
        }
        for k in DrizzleKernel::ALL {
            assert_eq!(DrizzleKernel::from_token(k.token()), Some(*k));
            assert_eq!(k.token(), k.to_string().to_lowercase());
        }
        assert_eq!(Framing::from_token("cog"), Some(Framing::CenterOfGravity));
        assert_eq!(Interpolation::from_token("zz"), None);
    }

    #[test]
    fn test_rejection_letters() {
        let letters: String = RejectionAlgorithm::ALL
            .iter()
            .filter_map(|a| a.letter())
            .collect();
        assert_eq!(letters, "swapgl");
        assert_eq!(RejectionAlgorithm::None.letter(), None);
        assert_eq!(RejectionAlgorithm::from_letter('a'), Some(RejectionAlgorithm::Mad));
    }

    #[test]
    fn test_filter_tokens() {
        assert_eq!(FilterKind::WeightedFwhm.token(), "wfwhm");
        assert_eq!(FilterKind::Roundness.token(), "round");
        assert_eq!(FilterKind::Background.token(), "bkg");
        assert_eq!(FilterKind::StarCount.token(), "nbstars");
        assert_eq!(FilterKind::Fwhm.token(), "fwhm");
        assert_eq!(FilterKind::Quality.token(), "quality");
        assert_eq!(FilterUnit::Sigma.suffix(), "k");
        assert_eq!(FilterUnit::Percent.suffix(), "%");
        assert_eq!(FilterUnit::Value.suffix(), "");
    }

    #[test]
    fn test_optional_flags() {
        assert_eq!(DarkOptimization::None.flag(), None);
        assert_eq!(DarkOptimization::UseExposure.flag(), Some("-opt=exp"));
        assert_eq!(Normalization::None.flag(), "-nonorm");
        assert_eq!(Weighting::ImageCount.flag(), Some("-weight=nbstack"));
        assert_eq!(RejectionMap::TwoMaps.flag(), Some("-rejmaps"));
        assert_eq!(Distortion::FromFile.flag(), None);
    }
}
