use serde::{Deserialize, Serialize};

use crate::persist::FormatVersion;

/// Rule constants and tunable parameters for the part models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Upper bound on cantilever increments a rotor may stack while covering
    /// its strain. Reaching it leaves the remaining strain uncovered.
    pub max_cantilever_increments: u32,
    /// Version stamped into newly written saves.
    pub save_version: FormatVersion,
}

impl DesignConfig {
    // ===== wing rules =====
    pub const MIN_FULL_WING_AREA: f64 = 3.0;
    pub const MIN_MINI_WING_AREA: f64 = 1.0;
    pub const MAX_MINI_WING_AREA: f64 = 2.0;
    pub const MIN_WING_SPAN: f64 = 1.0;
    /// Drag multiplier for wings sharing a deck in a tandem layout.
    pub const INLINE_DRAG_FACTOR: f64 = 0.75;
    /// Effective area multiplier of a gull wing when computing drag.
    pub const GULL_AREA_FACTOR: f64 = 1.1;
    /// Span above which wings start losing lateral stability.
    pub const NEUTRAL_SPAN: f64 = 8.0;

    // ===== rotor rules =====
    pub const TANDEM_PITCH_STABILITY: f64 = 4.0;
    /// Drag multiplier per rotor on multi-rotor helicopters.
    pub const MULTI_ROTOR_DRAG_FACTOR: f64 = 0.75;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_CANTILEVER_INCREMENTS: u32 = 256;

    pub fn new() -> Self {
        Self {
            max_cantilever_increments: Self::DEFAULT_MAX_CANTILEVER_INCREMENTS,
            save_version: FormatVersion::CURRENT,
        }
    }

    pub fn with_save_version(save_version: FormatVersion) -> Self {
        Self {
            save_version,
            ..Self::new()
        }
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self::new()
    }
}
