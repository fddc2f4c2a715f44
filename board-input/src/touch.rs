//! Touch panel filtering and calibration.
//!
//! Raw samples go through a median filter to drop single-sample spikes, an IIR
//! filter to smooth the remaining noise and a dead band so that a resting
//! finger doesn't make the point wander. The result is mapped onto display
//! pixels and rotated together with the display.
use board_input_types::{Rotation, TouchPoint, TouchSample};

use crate::config::{Calibration, TouchConfig, TouchConfigError};
use crate::filter::{IirFilter, MedianFilter, map_clamp};

/// Source of raw touch samples.
pub trait TouchSampler {
    fn sample(&mut self) -> TouchSample;
}

impl<F: FnMut() -> TouchSample> TouchSampler for F {
    fn sample(&mut self) -> TouchSample {
        self()
    }
}

/// Filter chain of one raw axis.
#[derive(Debug, Clone, Copy, Default)]
struct AxisFilter {
    median: MedianFilter,
    iir: IirFilter,
    /// Last reported raw position
    position: i32,
}

impl AxisFilter {
    /// Start a new contact. `samples` must fill the whole median window.
    fn prime(&mut self, samples: &[i32; 5]) -> i32 {
        for &sample in samples {
            self.median.push(sample);
        }
        self.iir.reset(self.median.value());
        self.position = self.iir.value();
        self.position
    }

    /// Add a sample during an ongoing contact and return the reported position.
    fn update(&mut self, sample: i32, hysteresis: i32) -> i32 {
        self.median.push(sample);
        self.iir.add(self.median.value());

        let filtered = self.iir.value();
        if filtered > self.position + hysteresis {
            self.position = filtered - hysteresis;
        } else if filtered < self.position - hysteresis {
            self.position = filtered + hysteresis;
        }
        self.position
    }
}

/// Turns raw touch panel samples into calibrated, stable touch points.
///
/// A single contact is tracked. While a finger is down, every reported
/// [`TouchPoint`] carries the same non-zero id. Each new contact gets a new id.
pub struct TouchCalibrator {
    config: TouchConfig,
    rotation: Rotation,
    x: AxisFilter,
    y: AxisFilter,
    /// Id of the ongoing contact, 0 when idle
    current_id: u32,
    /// Last allocated id
    last_id: u32,
}

impl TouchCalibrator {
    pub fn new(config: TouchConfig) -> Result<Self, TouchConfigError> {
        config.validate()?;
        Ok(Self {
            rotation: config.rotation,
            config,
            x: AxisFilter::default(),
            y: AxisFilter::default(),
            current_id: 0,
            last_id: 0,
        })
    }

    /// Read the panel once and return the current touch point, `None` if the panel isn't touched.
    ///
    /// On first contact four more samples are read from `sampler` to fill the filters.
    pub fn read_touch<S: TouchSampler>(&mut self, sampler: &mut S) -> Option<TouchPoint> {
        let sample = sampler.sample();
        if sample.pressure_raw <= self.config.pressure_threshold {
            if self.current_id != 0 {
                debug!("Touch {} released", self.current_id);
            }
            self.current_id = 0;
            return None;
        }

        let (raw_x, raw_y) = if self.current_id == 0 {
            self.current_id = self.allocate_id();
            debug!("Touch {} started", self.current_id);

            let mut xs = [sample.x_raw as i32; 5];
            let mut ys = [sample.y_raw as i32; 5];
            for (x, y) in xs.iter_mut().zip(ys.iter_mut()).skip(1) {
                let extra = sampler.sample();
                *x = extra.x_raw as i32;
                *y = extra.y_raw as i32;
            }
            (self.x.prime(&xs), self.y.prime(&ys))
        } else {
            let hysteresis = self.config.hysteresis as i32;
            (
                self.x.update(sample.x_raw as i32, hysteresis),
                self.y.update(sample.y_raw as i32, hysteresis),
            )
        };

        let (x, y) = self.to_display(raw_x, raw_y);
        trace!("Touch {}: raw ({}, {}) -> ({}, {})", self.current_id, raw_x, raw_y, x, y);
        Some(TouchPoint {
            id: self.current_id,
            x,
            y,
        })
    }

    /// Ids increase monotonically and skip 0 on wrap around.
    fn allocate_id(&mut self) -> u32 {
        self.last_id = self.last_id.wrapping_add(1);
        if self.last_id == 0 {
            self.last_id = 1;
        }
        self.last_id
    }

    /// Map filtered raw positions onto display pixels at the current rotation.
    fn to_display(&self, raw_x: i32, raw_y: i32) -> (u16, u16) {
        let Calibration {
            x_raw_min,
            x_raw_max,
            y_raw_min,
            y_raw_max,
            swap_xy,
        } = self.config.calibration;
        let (raw_x, raw_y) = if swap_xy { (raw_y, raw_x) } else { (raw_x, raw_y) };

        let width = self.config.width as i32;
        let height = self.config.height as i32;
        let x = map_clamp(raw_x, x_raw_min as i32, x_raw_max as i32, 0, width - 1);
        let y = map_clamp(raw_y, y_raw_min as i32, y_raw_max as i32, 0, height - 1);

        rotate(x as u16, y as u16, self.config.width, self.config.height, self.rotation)
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Display size in pixels at the current rotation, as `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        if self.rotation.is_transposed() {
            (self.config.height, self.config.width)
        } else {
            (self.config.width, self.config.height)
        }
    }

    /// Id of the ongoing contact, 0 if the panel isn't touched.
    pub fn current_id(&self) -> u32 {
        self.current_id
    }
}

/// Rotate a point given in native panel coordinates.
///
/// `width` and `height` are the native panel size, points outside of it are
/// clamped to the edge. The result is in the coordinates of the rotated
/// display, whose width and height are swapped for 90 and 270 degrees.
pub(crate) fn rotate(x: u16, y: u16, width: u16, height: u16, rotation: Rotation) -> (u16, u16) {
    let x = x.min(width.saturating_sub(1));
    let y = y.min(height.saturating_sub(1));
    let (w, h) = if rotation.is_transposed() { (height, width) } else { (width, height) };
    match rotation {
        Rotation::Rotation0 => (x, y),
        Rotation::Rotation90 => (y, h - 1 - x),
        Rotation::Rotation180 => (w - 1 - x, h - 1 - y),
        Rotation::Rotation270 => (w - 1 - y, x),
    }
}
