/// Folder holding the raw bias frames, relative to the session root.
pub const DIR_BIASES: &str = "biases";

/// Folder holding the raw flat frames.
pub const DIR_FLATS: &str = "flats";

/// Folder holding the raw dark frames.
pub const DIR_DARKS: &str = "darks";

/// Folder holding the raw light frames.
pub const DIR_LIGHTS: &str = "lights";

/// Shared processing folder, relative to any of the raw-frame folders.
pub const DIR_PROCESS: &str = "../process";

/// Folder receiving the calibration masters, relative to the processing folder.
pub const DIR_MASTERS: &str = "../masters";

/// Title comment opening every generated script.
pub const SCRIPT_TITLE: &str = "Siril Preprocessing Script";

/// Minimum interpreter version the generated commands rely on.
pub const REQUIRED_VERSION: &str = "1.4.0";

/// Sequence prefix the interpreter gives calibrated frames.
pub const CALIBRATED_PREFIX: &str = "pp_";

/// Low/high sigma used when stacking calibration masters.
pub const MASTER_REJECTION_SIGMA: &str = "3 3";

/// Token substituted by the interpreter with the stack's integration time.
pub const LIVETIME_TEMPLATE: &str = "$LIVETIME:%d$s";

/// Valid drizzle output scale range.
pub const DRIZZLE_SCALE_RANGE: (f64, f64) = (0.1, 10.0);

/// Valid drizzle pixel-fraction range.
pub const DRIZZLE_PIXFRAC_RANGE: (f64, f64) = (0.1, 1.0);

/// Default cold/hot pixel and stacking rejection sigma.
pub const DEFAULT_SIGMA: f64 = 3.0;

/// Default minimum number of star pairs for registration.
pub const DEFAULT_MIN_PAIRS: u32 = 10;

/// Default maximum number of stars detected per frame for registration.
pub const DEFAULT_MAX_STARS: u32 = 2000;

/// File name of the persisted settings document.
pub const SETTINGS_FILE_NAME: &str = "settings.json";
