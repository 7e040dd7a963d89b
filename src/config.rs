use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "dosage-engine";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal places shown for computed quantities unless a caller asks otherwise.
pub const DEFAULT_DISPLAY_PRECISION: u32 = 1;

/// Upper bound on display precision; beyond this f64 output is noise.
pub const MAX_DISPLAY_PRECISION: u32 = 6;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "dosage_engine_lib=info,dosage_engine=info"
}

/// Presentation settings for the dispense pipeline.
///
/// Only affects the final display step; intermediate values are never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub display_precision: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl CalculatorConfig {
    pub fn with_precision(precision: u32) -> Self {
        Self {
            display_precision: precision.min(MAX_DISPLAY_PRECISION),
        }
    }

    /// Precision clamped to `MAX_DISPLAY_PRECISION`.
    pub fn precision(&self) -> u32 {
        self.display_precision.min(MAX_DISPLAY_PRECISION)
    }
}
