//! Small fixed-point filters used to clean up noisy analog samples.
//!
//! Touch panels use [`MedianFilter`] followed by [`IirFilter`], as described in
//! <https://dlbeer.co.nz/articles/tsf.html>. Battery gauges use [`Ewma`].

/// Median filter over the five most recent samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MedianFilter {
    window: [i32; 5],
}

impl MedianFilter {
    pub const fn new() -> Self {
        Self { window: [0; 5] }
    }

    /// Shift a sample into the window, dropping the oldest one.
    pub fn push(&mut self, sample: i32) {
        self.window.copy_within(1.., 0);
        self.window[4] = sample;
    }

    /// Median of the five most recent samples.
    pub fn value(&self) -> i32 {
        // Optimal sorting network for 5 inputs, see
        // https://bertdobbelaere.github.io/sorting_networks.html
        let mut sorted = self.window;
        for (a, b) in [(1, 4), (0, 3), (1, 3), (0, 2), (2, 4), (0, 1), (1, 2), (3, 4), (2, 3)] {
            if sorted[a] > sorted[b] {
                sorted.swap(a, b);
            }
        }
        sorted[2]
    }
}

/// First order IIR filter with a smoothing factor of 1/2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IirFilter {
    state: i32,
}

impl IirFilter {
    pub const fn new() -> Self {
        Self { state: 0 }
    }

    /// Seed the filter, so that [`value`](Self::value) equals `seed` exactly.
    pub fn reset(&mut self, seed: i32) {
        self.state = seed;
    }

    /// Add a sample: the new state is half the old state plus half the sample, rounded up.
    pub fn add(&mut self, sample: i32) {
        self.state = (self.state + sample + 1) / 2;
    }

    pub fn value(&self) -> i32 {
        self.state
    }
}

/// Fixed-point exponentially weighted moving average.
///
/// Samples are in parts per million of full scale. Each new sample has a
/// weight of `1 / window`. The first sample primes the average directly.
/// Every step rounds to nearest, so a steady input is reached within half a
/// window of ppm from either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ewma {
    window: u32,
    value: Option<u32>,
}

impl Ewma {
    /// A window of 0 is treated as 1, which disables smoothing.
    pub const fn new(window: u32) -> Self {
        Self {
            window: if window == 0 { 1 } else { window },
            value: None,
        }
    }

    pub fn add(&mut self, sample: u32) -> u32 {
        let next = match self.value {
            None => sample,
            Some(current) => {
                let window = self.window as u64;
                ((current as u64 * (window - 1) + sample as u64 + window / 2) / window) as u32
            }
        };
        self.value = Some(next);
        next
    }

    /// Smoothed value, `None` before the first sample.
    pub fn value(&self) -> Option<u32> {
        self.value
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// Linearly map `value` from `in_low..in_high` onto `out_low..out_high` and
/// clamp the result to the output range.
///
/// The input range may be inverted (`in_low > in_high`), which flips the axis.
/// The division rounds toward zero.
pub fn map_clamp(value: i32, in_low: i32, in_high: i32, out_low: i32, out_high: i32) -> i32 {
    let range_in = in_high as i64 - in_low as i64;
    if range_in == 0 {
        return out_low;
    }
    let range_out = out_high as i64 - out_low as i64;
    let mapped = out_low as i64 + (value as i64 - in_low as i64) * range_out / range_in;
    mapped.clamp(out_low.min(out_high) as i64, out_low.max(out_high) as i64) as i32
}
