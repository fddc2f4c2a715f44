//! Battery voltage to state of charge conversion.
//!
//! The [`BatteryGauge`] converts a raw ADC code into microvolts, looks the
//! voltage up in a piecewise linear [`BatteryCurve`] and optionally smooths
//! the result so that ADC noise doesn't make the reported percentage flicker.
use core::fmt;

use board_input_types::{BatteryStatus, ChargeState};
use embedded_hal::digital::InputPin;
use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::config::{AdcScale, BatteryConfig};
use crate::filter::Ewma;

/// Maximum number of breakpoints in a [`BatteryCurve`].
pub const MAX_CURVE_POINTS: usize = 16;

/// Parts per million of full scale that correspond to one percent.
const PPM_PER_PERCENT: u32 = 10_000;

/// One breakpoint of a battery discharge curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurvePoint {
    pub millivolts: u16,
    pub percent: u8,
}

impl CurvePoint {
    pub const fn new(millivolts: u16, percent: u8) -> Self {
        Self { millivolts, percent }
    }

    const fn microvolts(&self) -> u32 {
        self.millivolts as u32 * 1000
    }

    const fn ppm(&self) -> u32 {
        self.percent as u32 * PPM_PER_PERCENT
    }
}

/// Errors reported when a [`BatteryCurve`] is constructed from invalid breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurveError {
    /// The curve has no breakpoints
    Empty,
    /// The curve has more than [`MAX_CURVE_POINTS`] breakpoints
    TooManyPoints,
    /// The voltage at `index` is not greater than the previous one
    VoltageNotIncreasing { index: usize },
    /// The percentage at `index` is less than the previous one
    PercentDecreasing { index: usize },
    /// The percentage at `index` is above 100
    PercentOutOfRange { index: usize },
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::Empty => write!(f, "battery curve has no breakpoints"),
            CurveError::TooManyPoints => write!(f, "battery curve has more than {} breakpoints", MAX_CURVE_POINTS),
            CurveError::VoltageNotIncreasing { index } => {
                write!(f, "voltage of breakpoint {} is not above the previous breakpoint", index)
            }
            CurveError::PercentDecreasing { index } => {
                write!(f, "percentage of breakpoint {} is below the previous breakpoint", index)
            }
            CurveError::PercentOutOfRange { index } => write!(f, "percentage of breakpoint {} is above 100", index),
        }
    }
}

/// Piecewise linear mapping from battery voltage to state of charge.
///
/// Voltages are strictly increasing, percentages never decrease and stay within 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryCurve {
    points: Vec<CurvePoint, MAX_CURVE_POINTS>,
}

impl BatteryCurve {
    pub fn new(points: &[CurvePoint]) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }
        let points: Vec<CurvePoint, MAX_CURVE_POINTS> =
            Vec::from_slice(points).map_err(|_| CurveError::TooManyPoints)?;

        for (index, point) in points.iter().enumerate() {
            if point.percent > 100 {
                return Err(CurveError::PercentOutOfRange { index });
            }
            if index == 0 {
                continue;
            }
            let previous = &points[index - 1];
            if point.millivolts <= previous.millivolts {
                return Err(CurveError::VoltageNotIncreasing { index });
            }
            if point.percent < previous.percent {
                return Err(CurveError::PercentDecreasing { index });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Approximate the state of charge at the given voltage.
    ///
    /// Voltages below the first breakpoint report the first percentage, voltages
    /// above the last breakpoint report the last one. In between the result is
    /// interpolated and rounded down.
    pub fn percent(&self, microvolts: u32) -> u8 {
        (self.ppm(microvolts) / PPM_PER_PERCENT) as u8
    }

    /// Same as [`percent`](Self::percent), in parts per million of full charge.
    pub fn ppm(&self, microvolts: u32) -> u32 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0;
        };
        if microvolts <= first.microvolts() {
            return first.ppm();
        }
        if microvolts >= last.microvolts() {
            return last.ppm();
        }

        for segment in self.points.windows(2) {
            let (low, high) = (&segment[0], &segment[1]);
            if microvolts >= high.microvolts() {
                continue;
            }
            let offset = (microvolts - low.microvolts()) as u64;
            let span = (high.microvolts() - low.microvolts()) as u64;
            let rise = (high.ppm() - low.ppm()) as u64;
            return low.ppm() + (offset * rise / span) as u32;
        }

        last.ppm()
    }
}

/// Logic levels of the charger status lines, `true` when asserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeLines {
    /// The charger is charging the battery
    pub charging: bool,
    /// External power is connected
    pub power_present: bool,
}

impl ChargeLines {
    pub fn charge_state(&self) -> ChargeState {
        if self.charging {
            ChargeState::Charging
        } else if self.power_present {
            ChargeState::NotCharging
        } else {
            ChargeState::Discharging
        }
    }
}

/// Reads the active-low charge indication and power presence pins.
///
/// A failed pin read counts as "not asserted".
pub struct ChargePins<C: InputPin, P: InputPin> {
    charging: C,
    power_present: P,
}

impl<C: InputPin, P: InputPin> ChargePins<C, P> {
    pub fn new(charging: C, power_present: P) -> Self {
        Self {
            charging,
            power_present,
        }
    }

    pub fn read(&mut self) -> ChargeLines {
        ChargeLines {
            charging: self.charging.is_low().unwrap_or(false),
            power_present: self.power_present.is_low().unwrap_or(false),
        }
    }

    pub fn release(self) -> (C, P) {
        (self.charging, self.power_present)
    }
}

/// Converts raw battery voltage samples into a [`BatteryStatus`].
pub struct BatteryGauge {
    scale: AdcScale,
    curve: BatteryCurve,
    smoothing: Option<Ewma>,
    last_percent: Option<u8>,
}

impl BatteryGauge {
    pub fn new(config: BatteryConfig) -> Self {
        Self {
            scale: config.scale,
            curve: config.curve,
            smoothing: config.smoothing.map(|s| Ewma::new(s.window)),
            last_percent: None,
        }
    }

    /// Convert one raw ADC code into a battery status.
    ///
    /// Boards without charger status lines pass `None` and get
    /// [`ChargeState::Unknown`] together with the measured voltage and percentage.
    ///
    /// With smoothing enabled the reported percentage may drop freely, but it
    /// only rises once the smoothed value is more than one point above it.
    pub fn status(&mut self, raw: u32, lines: Option<ChargeLines>) -> BatteryStatus {
        let microvolts = self.scale.microvolts(raw);
        let state = lines.map_or(ChargeState::Unknown, |lines| lines.charge_state());

        let percent = match self.smoothing.as_mut() {
            None => self.curve.percent(microvolts),
            Some(ewma) => {
                let smoothed = ewma.add(self.curve.ppm(microvolts));
                // Nearest whole percent
                let candidate = ((smoothed + PPM_PER_PERCENT / 2) / PPM_PER_PERCENT) as u8;
                match self.last_percent {
                    Some(last) if candidate >= last && candidate <= last.saturating_add(1) => last,
                    _ => candidate,
                }
            }
        };

        if self.last_percent != Some(percent) {
            debug!("Battery: {} uV, {}%, {:?}", microvolts, percent, state);
        }
        self.last_percent = Some(percent);

        BatteryStatus {
            state,
            microvolts,
            percent: Some(percent),
        }
    }

    /// Read the charge lines from `pins` and convert `raw`.
    pub fn status_from_pins<C: InputPin, P: InputPin>(
        &mut self,
        raw: u32,
        pins: &mut ChargePins<C, P>,
    ) -> BatteryStatus {
        let lines = pins.read();
        self.status(raw, Some(lines))
    }

    /// Last reported percentage, `None` before the first sample.
    pub fn last_percent(&self) -> Option<u8> {
        self.last_percent
    }

    pub fn curve(&self) -> &BatteryCurve {
        &self.curve
    }
}
