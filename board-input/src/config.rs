//! Runtime configuration of the normalization components.
//!
//! Every board passes its constants to the constructors through these structs,
//! there is no global board table. The `board-input-config` crate builds them
//! from a TOML file.
use core::fmt;

use board_input_types::{Key, Measurement, Rotation};
use heapless::Vec;
use serde::{Deserialize, Serialize};

pub use crate::battery::{BatteryCurve, CurveError, CurvePoint, MAX_CURVE_POINTS};

/// Maximum number of keys of a [`KeyConfig`], one per bit of the button bitmask.
pub const MAX_KEYS: usize = 32;

/// Default touch hysteresis in raw panel units.
pub const DEFAULT_TOUCH_HYSTERESIS: u16 = 400;

/// Default battery smoothing window, in samples.
pub const DEFAULT_SMOOTHING_WINDOW: u32 = 256;

/// Errors reported when a [`KeyConfig`] is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyConfigError {
    /// The key table is empty
    Empty,
    /// The key table has more than [`MAX_KEYS`] entries
    TooManyKeys { count: usize },
}

impl fmt::Display for KeyConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyConfigError::Empty => write!(f, "key table is empty"),
            KeyConfigError::TooManyKeys { count } => {
                write!(f, "key table has {} entries, at most {} are supported", count, MAX_KEYS)
            }
        }
    }
}

/// Errors reported by [`TouchConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchConfigError {
    /// Width or height of the panel is 0
    ZeroSize,
    /// `x_raw_min` equals `x_raw_max`
    EmptyXRange,
    /// `y_raw_min` equals `y_raw_max`
    EmptyYRange,
}

impl fmt::Display for TouchConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TouchConfigError::ZeroSize => write!(f, "touch panel width and height must be non-zero"),
            TouchConfigError::EmptyXRange => write!(f, "raw x calibration range is empty"),
            TouchConfigError::EmptyYRange => write!(f, "raw y calibration range is empty"),
        }
    }
}

/// Key table of a board: bit `n` of the button bitmask is `keys[n]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyConfig {
    keys: Vec<Key, MAX_KEYS>,
}

impl KeyConfig {
    pub fn new(keys: &[Key]) -> Result<Self, KeyConfigError> {
        if keys.is_empty() {
            return Err(KeyConfigError::Empty);
        }
        let keys = Vec::from_slice(keys).map_err(|_| KeyConfigError::TooManyKeys { count: keys.len() })?;
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key(&self, index: usize) -> Option<Key> {
        self.keys.get(index).copied()
    }

    /// Bitmask covering every bit that has a key assigned.
    pub fn mask(&self) -> u32 {
        match self.keys.len() {
            n if n >= MAX_KEYS => u32::MAX,
            n => (1u32 << n) - 1,
        }
    }
}

/// Raw touch panel readings at the edges of the display.
///
/// A range may be inverted when the raw value decreases towards the far edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Raw reading at display column 0
    pub x_raw_min: u16,
    /// Raw reading at the last display column
    pub x_raw_max: u16,
    /// Raw reading at display row 0
    pub y_raw_min: u16,
    /// Raw reading at the last display row
    pub y_raw_max: u16,
    /// Display x follows the raw y axis and display y follows the raw x axis
    pub swap_xy: bool,
}

/// Touch panel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// Samples with a pressure above this value count as touching
    pub pressure_threshold: u16,
    pub calibration: Calibration,
    /// Panel width in pixels at rotation 0
    pub width: u16,
    /// Panel height in pixels at rotation 0
    pub height: u16,
    /// Dead band of the reported position, in raw units
    pub hysteresis: u16,
    /// Initial display rotation
    pub rotation: Rotation,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            pressure_threshold: 0,
            calibration: Calibration {
                x_raw_min: 0,
                x_raw_max: u16::MAX,
                y_raw_min: 0,
                y_raw_max: u16::MAX,
                swap_xy: false,
            },
            width: 240,
            height: 320,
            hysteresis: DEFAULT_TOUCH_HYSTERESIS,
            rotation: Rotation::Rotation0,
        }
    }
}

impl TouchConfig {
    pub fn validate(&self) -> Result<(), TouchConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(TouchConfigError::ZeroSize);
        }
        if self.calibration.x_raw_min == self.calibration.x_raw_max {
            return Err(TouchConfigError::EmptyXRange);
        }
        if self.calibration.y_raw_min == self.calibration.y_raw_max {
            return Err(TouchConfigError::EmptyYRange);
        }
        Ok(())
    }
}

/// Conversion from raw ADC codes to microvolts at the battery.
///
/// `microvolts = raw * numerator / denominator`. The ratio includes the ADC
/// reference and any voltage divider in front of the ADC pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcScale {
    pub numerator: u32,
    pub denominator: u32,
}

impl AdcScale {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self { numerator, denominator }
    }

    /// Convert a raw code, saturating at `u32::MAX`. A zero denominator yields 0.
    pub fn microvolts(&self, raw: u32) -> u32 {
        if self.denominator == 0 {
            return 0;
        }
        let microvolts = raw as u64 * self.numerator as u64 / self.denominator as u64;
        microvolts.min(u32::MAX as u64) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmoothingConfig {
    /// Weight of a new sample is `1 / window`
    pub window: u32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

/// Battery gauge configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    pub scale: AdcScale,
    pub curve: BatteryCurve,
    /// Smoothing for boards with a noisy ADC, `None` reports every sample as-is
    pub smoothing: Option<SmoothingConfig>,
}

/// How a board is powered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerConfig {
    /// The board has no battery, e.g. it runs from USB only
    NoBattery,
    /// The board can't measure its battery
    #[default]
    Unknown,
    /// The battery voltage is measured through an ADC
    Gauge(BatteryConfig),
}

/// Sensor configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Quantities to configure at startup and to update on every tick
    pub measurements: Measurement,
}

/// Complete input configuration of a board.
///
/// A `None` section means the board doesn't have the peripheral.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub keys: Option<KeyConfig>,
    pub touch: Option<TouchConfig>,
    pub power: PowerConfig,
    pub sensors: Option<SensorConfig>,
}
