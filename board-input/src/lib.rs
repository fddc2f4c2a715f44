#![doc = include_str!("../../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod battery;
pub mod board;
pub mod config;
pub mod filter;
pub mod handoff;
pub mod key;
pub mod sensor;
pub mod touch;

pub use battery::{BatteryCurve, BatteryGauge, ChargeLines, ChargePins, CurvePoint};
pub use board::{BoardInput, PowerSource};
pub use board_input_types as types;
pub use key::{ButtonInput, KeyEventTracker};
pub use sensor::{MotionSensor, SensorReader, SensorUpdate};
pub use touch::{TouchCalibrator, TouchSampler};

/// Raw mutex used by the handoff primitives.
pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
