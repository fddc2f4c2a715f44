use core::ops::{BitOr, BitOrAssign};

use bitfield_struct::bitfield;
use serde::{Deserialize, Serialize};

/// Selection of sensor quantities to configure or update.
#[bitfield(u8, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[bits(1)]
    pub acceleration: bool,
    #[bits(1)]
    pub temperature: bool,
    #[bits(1)]
    pub steps: bool,
    #[bits(5)]
    _reserved: u8,
}

impl BitOr for Measurement {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

impl BitOrAssign for Measurement {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl Measurement {
    pub const ACCELERATION: Self = Self::new().with_acceleration(true);
    pub const TEMPERATURE: Self = Self::new().with_temperature(true);
    pub const STEPS: Self = Self::new().with_steps(true);
    pub const ALL: Self = Self::new()
        .with_acceleration(true)
        .with_temperature(true)
        .with_steps(true);

    pub const fn is_empty(&self) -> bool {
        self.into_bits() == 0
    }

    /// Whether every quantity in `other` is also selected in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        self.into_bits() & other.into_bits() == other.into_bits()
    }
}
