use serde::{Deserialize, Serialize};

/// Charge state of the main battery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeState {
    /// The board cannot tell whether a battery is connected
    #[default]
    Unknown,
    /// The board runs from external power only
    NoBattery,
    /// A charger is connected and charging the battery
    Charging,
    /// External power is present but the battery is not being charged,
    /// usually because it is full
    NotCharging,
    /// Running from the battery
    Discharging,
}

/// Result of one battery status poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    pub state: ChargeState,
    /// Battery voltage. 0 means no voltage could be measured.
    pub microvolts: u32,
    /// Approximate state of charge in the range 0..=100, `None` when unknown.
    ///
    /// It is often inaccurate while charging.
    pub percent: Option<u8>,
}

impl BatteryStatus {
    pub const fn unmeasured(state: ChargeState) -> Self {
        Self {
            state,
            microvolts: 0,
            percent: None,
        }
    }
}
