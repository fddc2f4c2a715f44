//! # Board input types
//!
//! This crate provides the value types exchanged between raw-sample providers,
//! the normalization components in `board-input` and the application.
//!
//! ## Modules
//!
//! - [`key`] - Key codes and packed press/release events
//! - [`touch`] - Raw touch samples, calibrated touch points and display rotation
//! - [`power`] - Charge state classification and battery status
//! - [`measurement`] - Sensor quantity selection
//!
//! ## Integration
//!
//! - **board-input**: the normalization components produce and consume these types
//! - **board-input-config**: configuration parsing produces these types

#![no_std]

pub mod key;
pub mod measurement;
pub mod power;
pub mod touch;

pub use key::{Key, KeyEvent};
pub use measurement::Measurement;
pub use power::{BatteryStatus, ChargeState};
pub use touch::{Rotation, TouchPoint, TouchSample};
