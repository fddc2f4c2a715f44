#![allow(dead_code)]

use std::collections::VecDeque;

use board_input::config::{AdcScale, BatteryConfig, Calibration, KeyConfig, SmoothingConfig, TouchConfig};
use board_input::touch::TouchSampler;
use board_input::{BatteryCurve, CurvePoint};
use board_input::types::{Key, Rotation, TouchSample};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Buttons of a PyBadge, in shift register order.
pub fn pybadge_keys() -> KeyConfig {
    KeyConfig::new(&[
        Key::Left,
        Key::Up,
        Key::Down,
        Key::Right,
        Key::Select,
        Key::Start,
        Key::A,
        Key::B,
    ])
    .unwrap()
}

/// Buttons of a Game Boy Advance, in KEYINPUT register order.
pub fn gameboy_advance_keys() -> KeyConfig {
    KeyConfig::new(&[
        Key::A,
        Key::B,
        Key::Select,
        Key::Start,
        Key::Right,
        Key::Left,
        Key::Up,
        Key::Down,
        Key::R,
        Key::L,
    ])
    .unwrap()
}

/// Resistive touch panel of a PyPortal.
pub fn pyportal_touch() -> TouchConfig {
    TouchConfig {
        pressure_threshold: 8192,
        calibration: Calibration {
            x_raw_min: 48000,
            x_raw_max: 22000,
            y_raw_min: 54000,
            y_raw_max: 16000,
            swap_xy: false,
        },
        width: 240,
        height: 320,
        hysteresis: 400,
        rotation: Rotation::Rotation0,
    }
}

/// Discharge curve of a PineTime battery.
pub fn pinetime_curve() -> BatteryCurve {
    BatteryCurve::new(&[
        CurvePoint::new(3500, 0),
        CurvePoint::new(3600, 10),
        CurvePoint::new(3700, 25),
        CurvePoint::new(3750, 50),
        CurvePoint::new(3900, 75),
        CurvePoint::new(4180, 100),
    ])
    .unwrap()
}

/// Battery of a PyBadge: the ADC reads half the battery voltage against 3.3 V,
/// there are no charger status lines.
pub fn pybadge_battery(smoothing: Option<SmoothingConfig>) -> BatteryConfig {
    BatteryConfig {
        scale: AdcScale::new(51562, 512),
        curve: pinetime_curve(),
        smoothing,
    }
}

pub fn pinetime_battery(smoothing: Option<SmoothingConfig>) -> BatteryConfig {
    BatteryConfig {
        scale: AdcScale::new(46875, 512),
        curve: pinetime_curve(),
        smoothing,
    }
}

/// Touch sampler that replays a fixed list of samples.
///
/// Once the list is exhausted it reports no pressure.
pub struct ScriptedSampler {
    samples: VecDeque<TouchSample>,
    pub taken: usize,
}

impl ScriptedSampler {
    pub fn new(samples: impl IntoIterator<Item = TouchSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            taken: 0,
        }
    }

    pub fn push(&mut self, sample: TouchSample) {
        self.samples.push_back(sample);
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl TouchSampler for ScriptedSampler {
    fn sample(&mut self) -> TouchSample {
        self.taken += 1;
        self.samples.pop_front().unwrap_or_default()
    }
}
