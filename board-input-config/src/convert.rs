//! Conversion of the TOML configuration into the runtime configuration of `board-input`.

use std::str::FromStr;

use board_input::config::{
    AdcScale, BatteryConfig, BoardConfig, Calibration, KeyConfig, PowerConfig, SensorConfig, SmoothingConfig,
    TouchConfig,
};
use board_input::types::{Key, Measurement, Rotation};
use board_input::{BatteryCurve, CurvePoint};

use crate::error::{ConfigError, ConfigResult};
use crate::validation::validate_config;
use crate::{
    BatteryTomlConfig, BoardTomlConfig, ButtonsTomlConfig, CurvePointTomlConfig, SensorsTomlConfig, TouchTomlConfig,
};

impl BoardTomlConfig {
    /// Validate the configuration and build the runtime configuration.
    pub fn to_board_config(&self) -> ConfigResult<BoardConfig> {
        validate_config(self)?;

        let power = match (self.power.source.as_str(), &self.battery) {
            ("none", _) => PowerConfig::NoBattery,
            ("gauge", Some(battery)) => PowerConfig::Gauge(battery.to_battery_config()?),
            ("gauge", None) => {
                return Err(ConfigError::MissingField {
                    field: "battery".to_string(),
                });
            }
            _ => PowerConfig::Unknown,
        };

        Ok(BoardConfig {
            keys: self.buttons.as_ref().map(|b| b.to_key_config()).transpose()?,
            touch: self.touch.as_ref().map(|t| t.to_touch_config()).transpose()?,
            power,
            sensors: self.sensors.as_ref().map(|s| s.to_sensor_config()).transpose()?,
        })
    }
}

impl ButtonsTomlConfig {
    pub fn to_key_config(&self) -> ConfigResult<KeyConfig> {
        let keys = self
            .keys
            .iter()
            .enumerate()
            .map(|(index, name)| {
                Key::from_str(name).map_err(|_| ConfigError::InvalidValue {
                    field: format!("buttons.keys[{}]", index),
                    value: name.clone(),
                    expected: "a key name such as Left, A or Start".to_string(),
                })
            })
            .collect::<ConfigResult<Vec<Key>>>()?;

        KeyConfig::new(&keys).map_err(|e| ConfigError::Validation {
            field: "buttons.keys".to_string(),
            message: e.to_string(),
        })
    }
}

impl TouchTomlConfig {
    pub fn to_touch_config(&self) -> ConfigResult<TouchConfig> {
        let rotation = Rotation::from_degrees(self.rotation).ok_or_else(|| ConfigError::InvalidValue {
            field: "touch.rotation".to_string(),
            value: self.rotation.to_string(),
            expected: "0, 90, 180 or 270".to_string(),
        })?;

        let config = TouchConfig {
            pressure_threshold: self.pressure_threshold,
            calibration: Calibration {
                x_raw_min: self.x_raw_min,
                x_raw_max: self.x_raw_max,
                y_raw_min: self.y_raw_min,
                y_raw_max: self.y_raw_max,
                swap_xy: self.swap_xy,
            },
            width: self.width,
            height: self.height,
            hysteresis: self.hysteresis,
            rotation,
        };
        config.validate().map_err(|e| ConfigError::Validation {
            field: "touch".to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }
}

impl BatteryTomlConfig {
    pub fn to_battery_config(&self) -> ConfigResult<BatteryConfig> {
        Ok(BatteryConfig {
            scale: AdcScale::new(self.adc_numerator, self.adc_denominator),
            curve: build_curve(&self.curve)?,
            smoothing: self.smoothing.then_some(SmoothingConfig {
                window: self.smoothing_window,
            }),
        })
    }
}

impl SensorsTomlConfig {
    pub fn to_sensor_config(&self) -> ConfigResult<SensorConfig> {
        let mut measurements = Measurement::new();
        for (index, name) in self.measurements.iter().enumerate() {
            measurements |= match name.as_str() {
                "acceleration" => Measurement::ACCELERATION,
                "temperature" => Measurement::TEMPERATURE,
                "steps" => Measurement::STEPS,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: format!("sensors.measurements[{}]", index),
                        value: name.clone(),
                        expected: crate::validation::MEASUREMENTS.join(", "),
                    });
                }
            };
        }
        Ok(SensorConfig { measurements })
    }
}

pub(crate) fn build_curve(points: &[CurvePointTomlConfig]) -> ConfigResult<BatteryCurve> {
    let points: Vec<CurvePoint> = points
        .iter()
        .map(|p| CurvePoint::new(p.millivolts, p.percent))
        .collect();
    BatteryCurve::new(&points).map_err(|e| ConfigError::Validation {
        field: "battery.curve".to_string(),
        message: e.to_string(),
    })
}
