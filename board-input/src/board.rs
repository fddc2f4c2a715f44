//! Input peripherals of one board.
use board_input_types::{BatteryStatus, ChargeState, TouchPoint};

use crate::battery::{BatteryGauge, ChargeLines};
use crate::config::{BoardConfig, PowerConfig, TouchConfigError};
use crate::key::{ButtonInput, Drain, KeyEventTracker};
use crate::touch::{TouchCalibrator, TouchSampler};

/// How the board is powered.
pub enum PowerSource {
    /// The board has no battery
    NoBattery,
    /// The board can't measure its battery
    Unknown,
    Gauge(BatteryGauge),
}

impl PowerSource {
    /// Battery status. Without a gauge `raw` and `lines` are ignored and
    /// no voltage or percentage is reported. `lines` is `None` on boards
    /// without charger status lines.
    pub fn status(&mut self, raw: u32, lines: Option<ChargeLines>) -> BatteryStatus {
        match self {
            PowerSource::NoBattery => BatteryStatus::unmeasured(ChargeState::NoBattery),
            PowerSource::Unknown => BatteryStatus::unmeasured(ChargeState::Unknown),
            PowerSource::Gauge(gauge) => gauge.status(raw, lines),
        }
    }
}

impl From<PowerConfig> for PowerSource {
    fn from(config: PowerConfig) -> Self {
        match config {
            PowerConfig::NoBattery => PowerSource::NoBattery,
            PowerConfig::Unknown => PowerSource::Unknown,
            PowerConfig::Gauge(config) => PowerSource::Gauge(BatteryGauge::new(config)),
        }
    }
}

/// Normalization components of a board. Peripherals the board doesn't have are `None`.
pub struct BoardInput {
    pub keys: Option<KeyEventTracker>,
    pub touch: Option<TouchCalibrator>,
    pub power: PowerSource,
}

impl BoardInput {
    pub fn new(config: BoardConfig) -> Result<Self, TouchConfigError> {
        let touch = config.touch.map(TouchCalibrator::new).transpose()?;
        Ok(Self {
            keys: config.keys.map(KeyEventTracker::new),
            touch,
            power: config.power.into(),
        })
    }

    /// Sample the buttons and return the pending key events, `None` if the board has no buttons.
    pub fn poll_keys<I: ButtonInput>(&mut self, input: &mut I) -> Option<Drain<'_>> {
        let keys = self.keys.as_mut()?;
        keys.poll(input);
        Some(keys.drain())
    }

    /// Current touch point, `None` if the board has no touch panel or it isn't touched.
    pub fn read_touch<S: TouchSampler>(&mut self, sampler: &mut S) -> Option<TouchPoint> {
        self.touch.as_mut()?.read_touch(sampler)
    }

    pub fn battery_status(&mut self, raw: u32, lines: Option<ChargeLines>) -> BatteryStatus {
        self.power.status(raw, lines)
    }
}
