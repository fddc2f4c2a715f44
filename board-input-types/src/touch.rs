use serde::{Deserialize, Serialize};

/// Raw instantaneous reading of a touch panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    pub x_raw: u16,
    pub y_raw: u16,
    pub pressure_raw: u16,
}

impl TouchSample {
    pub const fn new(x_raw: u16, y_raw: u16, pressure_raw: u16) -> Self {
        Self {
            x_raw,
            y_raw,
            pressure_raw,
        }
    }
}

/// A calibrated touch point in display pixel coordinates.
///
/// `id` identifies one contact: it is assigned when the finger lands, stays the
/// same while it is down and is never reused in the same session. An id of 0
/// means there is no active touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub id: u32,
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn is_active(&self) -> bool {
        self.id != 0
    }
}

/// Display rotation, clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl Rotation {
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Rotation0),
            90 => Some(Rotation::Rotation90),
            180 => Some(Rotation::Rotation180),
            270 => Some(Rotation::Rotation270),
            _ => None,
        }
    }

    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Rotation0 => 0,
            Rotation::Rotation90 => 90,
            Rotation::Rotation180 => 180,
            Rotation::Rotation270 => 270,
        }
    }

    /// Whether width and height trade places under this rotation.
    pub const fn is_transposed(self) -> bool {
        matches!(self, Rotation::Rotation90 | Rotation::Rotation270)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_degrees() {
        for degrees in [0, 90, 180, 270] {
            let rotation = Rotation::from_degrees(degrees).unwrap();
            assert_eq!(rotation.degrees(), degrees);
        }
        assert_eq!(Rotation::from_degrees(45), None);
        assert!(Rotation::Rotation270.is_transposed());
        assert!(!Rotation::Rotation180.is_transposed());
    }

    #[test]
    fn test_touch_point_active() {
        assert!(!TouchPoint::default().is_active());
        assert!(TouchPoint { id: 1, x: 0, y: 0 }.is_active());
    }
}
