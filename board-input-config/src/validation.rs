//! Centralized validation for board configuration
//!
//! Checks run section by section, the first error is reported.

use std::str::FromStr;

use board_input::config::MAX_KEYS;
use board_input::types::{Key, Rotation};

use crate::BoardTomlConfig;
use crate::error::{ConfigError, ConfigResult};

pub(crate) const POWER_SOURCES: [&str; 3] = ["unknown", "none", "gauge"];
pub(crate) const MEASUREMENTS: [&str; 3] = ["acceleration", "temperature", "steps"];

/// Validates the entire board configuration
pub fn validate_config(config: &BoardTomlConfig) -> ConfigResult<()> {
    validate_power_section(config)?;
    validate_buttons_section(config)?;
    validate_touch_section(config)?;
    validate_battery_section(config)?;
    validate_sensors_section(config)?;
    Ok(())
}

/// Validates the [power] section
fn validate_power_section(config: &BoardTomlConfig) -> ConfigResult<()> {
    let source = config.power.source.as_str();
    if !POWER_SOURCES.contains(&source) {
        return Err(ConfigError::InvalidValue {
            field: "power.source".to_string(),
            value: source.to_string(),
            expected: POWER_SOURCES.join(", "),
        });
    }

    if source == "gauge" && config.battery.is_none() {
        return Err(ConfigError::MissingField {
            field: "battery".to_string(),
        });
    }
    Ok(())
}

/// Validates the [buttons] section
fn validate_buttons_section(config: &BoardTomlConfig) -> ConfigResult<()> {
    let Some(buttons) = &config.buttons else {
        return Ok(());
    };

    if buttons.keys.is_empty() || buttons.keys.len() > MAX_KEYS {
        return Err(ConfigError::InvalidValue {
            field: "buttons.keys".to_string(),
            value: buttons.keys.len().to_string(),
            expected: format!("1 to {} keys", MAX_KEYS),
        });
    }

    for (index, name) in buttons.keys.iter().enumerate() {
        if Key::from_str(name).is_err() {
            return Err(ConfigError::InvalidValue {
                field: format!("buttons.keys[{}]", index),
                value: name.clone(),
                expected: "a key name such as Left, A or Start".to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the [touch] section
fn validate_touch_section(config: &BoardTomlConfig) -> ConfigResult<()> {
    let Some(touch) = &config.touch else {
        return Ok(());
    };

    if Rotation::from_degrees(touch.rotation).is_none() {
        return Err(ConfigError::InvalidValue {
            field: "touch.rotation".to_string(),
            value: touch.rotation.to_string(),
            expected: "0, 90, 180 or 270".to_string(),
        });
    }
    if touch.width == 0 || touch.height == 0 {
        return Err(ConfigError::Validation {
            field: "touch.width/height".to_string(),
            message: "touch panel width and height must be non-zero".to_string(),
        });
    }
    if touch.x_raw_min == touch.x_raw_max {
        return Err(ConfigError::Validation {
            field: "touch.x_raw_min/x_raw_max".to_string(),
            message: "raw x calibration range is empty".to_string(),
        });
    }
    if touch.y_raw_min == touch.y_raw_max {
        return Err(ConfigError::Validation {
            field: "touch.y_raw_min/y_raw_max".to_string(),
            message: "raw y calibration range is empty".to_string(),
        });
    }
    Ok(())
}

/// Validates the [battery] section
fn validate_battery_section(config: &BoardTomlConfig) -> ConfigResult<()> {
    let Some(battery) = &config.battery else {
        return Ok(());
    };

    if battery.adc_denominator == 0 {
        return Err(ConfigError::InvalidValue {
            field: "battery.adc_denominator".to_string(),
            value: "0".to_string(),
            expected: "a non-zero divisor".to_string(),
        });
    }
    if battery.smoothing && battery.smoothing_window == 0 {
        return Err(ConfigError::InvalidValue {
            field: "battery.smoothing_window".to_string(),
            value: "0".to_string(),
            expected: "at least 1 sample".to_string(),
        });
    }

    // The curve itself is checked when it's built
    crate::convert::build_curve(&battery.curve).map(|_| ())
}

/// Validates the [sensors] section
fn validate_sensors_section(config: &BoardTomlConfig) -> ConfigResult<()> {
    let Some(sensors) = &config.sensors else {
        return Ok(());
    };

    for (index, name) in sensors.measurements.iter().enumerate() {
        if !MEASUREMENTS.contains(&name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: format!("sensors.measurements[{}]", index),
                value: name.clone(),
                expected: MEASUREMENTS.join(", "),
            });
        }
    }
    Ok(())
}
