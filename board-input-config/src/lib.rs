//! Board input configuration loaded from a TOML file.
//!
//! ```toml
//! [board]
//! name = "PineTime"
//!
//! [power]
//! source = "gauge"
//!
//! [battery]
//! adc_numerator = 46875
//! adc_denominator = 512
//! curve = [
//!     { millivolts = 3500, percent = 0 },
//!     { millivolts = 4180, percent = 100 },
//! ]
//! ```
//!
//! Sections of peripherals that the board doesn't have are left out.

use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

pub mod convert;
pub mod error;
pub mod loader;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::validate_config;

/// Configurations of a board's input peripherals
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardTomlConfig {
    /// Board info
    pub board: BoardInfo,
    /// How the board is powered
    pub power: PowerTomlConfig,
    /// Button config
    pub buttons: Option<ButtonsTomlConfig>,
    /// Touch panel config
    pub touch: Option<TouchTomlConfig>,
    /// Battery gauge config, required when `power.source` is "gauge"
    pub battery: Option<BatteryTomlConfig>,
    /// Sensor config
    pub sensors: Option<SensorsTomlConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardInfo {
    /// Board name
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerTomlConfig {
    /// "unknown", "none" or "gauge"
    pub source: String,
}

/// Buttons, in bit order of the button bitmask
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonsTomlConfig {
    /// Key names, such as "Left" or "Start"
    pub keys: Vec<String>,
}

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TouchTomlConfig {
    /// Samples with a pressure above this value count as touching
    pub pressure_threshold: u16,
    /// Raw x reading at display column 0
    pub x_raw_min: u16,
    /// Raw x reading at the last display column
    pub x_raw_max: u16,
    /// Raw y reading at display row 0
    pub y_raw_min: u16,
    /// Raw y reading at the last display row
    pub y_raw_max: u16,
    /// Display x follows the raw y axis
    #[serde_inline_default(false)]
    pub swap_xy: bool,
    /// Panel width in pixels at rotation 0
    pub width: u16,
    /// Panel height in pixels at rotation 0
    pub height: u16,
    /// Dead band of the reported position, in raw units
    #[serde_inline_default(400)]
    pub hysteresis: u16,
    /// Initial rotation in degrees: 0, 90, 180 or 270
    #[serde_inline_default(0)]
    pub rotation: u16,
}

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatteryTomlConfig {
    /// `microvolts = raw * adc_numerator / adc_denominator`
    pub adc_numerator: u32,
    pub adc_denominator: u32,
    /// Discharge curve, ordered by voltage
    pub curve: Vec<CurvePointTomlConfig>,
    /// Smooth the percentage, for boards with a noisy ADC
    #[serde_inline_default(false)]
    pub smoothing: bool,
    /// Weight of a new sample is 1 / smoothing_window
    #[serde_inline_default(256)]
    pub smoothing_window: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurvePointTomlConfig {
    pub millivolts: u16,
    pub percent: u8,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorsTomlConfig {
    /// "acceleration", "temperature" or "steps"
    pub measurements: Vec<String>,
}
