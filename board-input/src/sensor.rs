//! Motion, step and temperature sensors.
//!
//! [`SensorReader`] wraps a [`MotionSensor`] driver and keeps the last good
//! readings. When the sensor stops responding it resets the bus and
//! reconfigures the sensor, once per tick.
use board_input_types::Measurement;

use crate::config::SensorConfig;

/// Driver of a sensor chip, for example an accelerometer with a step counter.
pub trait MotionSensor {
    type Error;

    /// Configure the sensor to measure the given quantities.
    fn configure(&mut self, which: Measurement) -> Result<(), Self::Error>;

    /// Read the given quantities from the sensor into the driver.
    fn update(&mut self, which: Measurement) -> Result<(), Self::Error>;

    /// Recover the bus after a communication error, for example by clocking
    /// out a stuck transfer.
    fn reset_bus(&mut self) -> Result<(), Self::Error>;

    /// Acceleration in micro-g, as of the last update.
    fn acceleration(&self) -> Acceleration {
        Acceleration::default()
    }

    /// Step count, as of the last update.
    fn steps(&self) -> u32 {
        0
    }

    /// Temperature in milli-degrees Celsius, as of the last update.
    fn temperature(&self) -> i32 {
        0
    }
}

/// Acceleration in micro-g.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Last good readings. Quantities that were never measured are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReadings {
    pub acceleration: Option<Acceleration>,
    pub steps: Option<u32>,
    pub temperature: Option<i32>,
}

/// Result of [`SensorReader::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorUpdate {
    /// Fresh readings
    Updated(SensorReadings),
    /// The sensor didn't respond, the previous readings are kept
    Unavailable,
}

/// Configuration state of the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorState {
    /// Not configured yet, or lost its configuration after an error
    Unconfigured,
    Ready,
}

pub struct SensorReader<S: MotionSensor> {
    sensor: S,
    which: Measurement,
    state: SensorState,
    readings: SensorReadings,
}

impl<S: MotionSensor> SensorReader<S> {
    pub fn new(sensor: S, config: SensorConfig) -> Self {
        Self {
            sensor,
            which: config.measurements,
            state: SensorState::Unconfigured,
            readings: SensorReadings::default(),
        }
    }

    /// Configure the sensor, retrying once after a bus reset.
    ///
    /// Returns false if the sensor is still not configured.
    pub fn configure(&mut self) -> bool {
        if self.sensor.configure(self.which).is_ok() {
            info!("Sensor configured");
            self.state = SensorState::Ready;
            return true;
        }

        warn!("Sensor configuration failed, resetting bus");
        if self.sensor.reset_bus().is_ok() && self.sensor.configure(self.which).is_ok() {
            info!("Sensor configured after bus reset");
            self.state = SensorState::Ready;
            return true;
        }

        error!("Sensor configuration failed after bus reset");
        self.state = SensorState::Unconfigured;
        false
    }

    /// Read fresh values from the sensor.
    ///
    /// A failed read drops the sensor configuration. It is reconfigured with
    /// [`configure`](Self::configure) and read again, at most once per call.
    pub fn update(&mut self) -> SensorUpdate {
        if self.which.is_empty() {
            return SensorUpdate::Updated(self.readings);
        }

        if self.state == SensorState::Unconfigured {
            if !self.configure() {
                return SensorUpdate::Unavailable;
            }
        } else if self.sensor.update(self.which).is_ok() {
            self.capture();
            return SensorUpdate::Updated(self.readings);
        } else {
            warn!("Sensor update failed, reconfiguring");
            self.state = SensorState::Unconfigured;
            if !self.configure() {
                return SensorUpdate::Unavailable;
            }
        }

        if self.sensor.update(self.which).is_err() {
            error!("Sensor update failed after reconfiguration");
            self.state = SensorState::Unconfigured;
            return SensorUpdate::Unavailable;
        }
        self.capture();
        SensorUpdate::Updated(self.readings)
    }

    fn capture(&mut self) {
        if self.which.contains(Measurement::ACCELERATION) {
            self.readings.acceleration = Some(self.sensor.acceleration());
        }
        if self.which.contains(Measurement::STEPS) {
            self.readings.steps = Some(self.sensor.steps());
        }
        if self.which.contains(Measurement::TEMPERATURE) {
            self.readings.temperature = Some(self.sensor.temperature());
        }
    }

    /// Last good readings.
    pub fn readings(&self) -> SensorReadings {
        self.readings
    }

    pub fn state(&self) -> SensorState {
        self.state
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn release(self) -> S {
        self.sensor
    }
}
