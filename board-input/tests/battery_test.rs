pub mod common;

use board_input::config::{AdcScale, BatteryConfig, SmoothingConfig};
use board_input::types::ChargeState;
use board_input::{BatteryGauge, ChargeLines, ChargePins};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

use crate::common::{pinetime_battery, pinetime_curve, pybadge_battery};

const DISCHARGING: Option<ChargeLines> = Some(ChargeLines {
    charging: false,
    power_present: false,
});

/// Gauge whose raw input is already in microvolts.
fn microvolt_gauge(smoothing: Option<SmoothingConfig>) -> BatteryGauge {
    BatteryGauge::new(BatteryConfig {
        scale: AdcScale::new(1, 1),
        curve: pinetime_curve(),
        smoothing,
    })
}

#[test]
fn test_reference_table() {
    let table = [
        (2_900_000, 0),
        (3_400_000, 0),
        (3_500_000, 0),
        (3_510_000, 1),
        (3_528_000, 2),
        (3_730_000, 40),
        (3_749_999, 49),
        (3_750_000, 50),
        (3_750_001, 50),
        (4_179_999, 99),
        (4_180_000, 100),
        (4_180_001, 100),
        (5_000_000, 100),
    ];
    let mut gauge = microvolt_gauge(None);
    for (microvolts, percent) in table {
        let status = gauge.status(microvolts, DISCHARGING);
        assert_eq!(status.microvolts, microvolts);
        assert_eq!(status.percent, Some(percent), "{} uV", microvolts);
    }
}

#[test]
fn test_percent_is_monotonic() {
    let curve = pinetime_curve();
    let mut last = 0;
    let mut last_ppm = 0;
    for microvolts in (3_000_000..4_500_000).step_by(1_000) {
        let percent = curve.percent(microvolts);
        let ppm = curve.ppm(microvolts);
        assert!(percent >= last, "{} uV: {} < {}", microvolts, percent, last);
        assert!(ppm >= last_ppm, "{} uV: {} ppm < {} ppm", microvolts, ppm, last_ppm);
        assert!(percent <= 100);
        assert_eq!(percent as u32, ppm / 10_000);
        last = percent;
        last_ppm = ppm;
    }
}

#[test]
fn test_pinetime_adc_scale() {
    let mut gauge = BatteryGauge::new(pinetime_battery(None));
    // 40960 * 46875 / 512
    let status = gauge.status(40960, DISCHARGING);
    assert_eq!(status.microvolts, 3_750_000);
    assert_eq!(status.percent, Some(50));
}

#[test]
fn test_boundary_noise_changes_percent_at_most_once() {
    let mut gauge = microvolt_gauge(Some(SmoothingConfig::default()));
    assert_eq!(gauge.status(3_750_000, DISCHARGING).percent, Some(50));

    // ADC noise right at the 49/50 boundary
    let mut changes = 0;
    let mut reported = gauge.last_percent();
    for i in 0..2000 {
        let microvolts = if i % 2 == 0 { 3_749_999 } else { 3_750_000 };
        let percent = gauge.status(microvolts, DISCHARGING).percent;
        if percent != reported {
            changes += 1;
            reported = percent;
        }
    }
    assert!(changes <= 1, "percent changed {} times", changes);
}

#[test]
fn test_rising_percent_lags_one_point() {
    let mut gauge = microvolt_gauge(Some(SmoothingConfig { window: 1 }));
    assert_eq!(gauge.status(3_600_000, DISCHARGING).percent, Some(10));
    // 10.9%, one point up is held back
    assert_eq!(gauge.status(3_606_000, DISCHARGING).percent, Some(10));
    // 13%, more than one point up is reported
    assert_eq!(gauge.status(3_620_000, DISCHARGING).percent, Some(13));
    // Any drop is reported
    assert_eq!(gauge.status(3_606_000, DISCHARGING).percent, Some(11));
}

#[test]
fn test_single_low_sample_is_ignored() {
    let mut gauge = microvolt_gauge(Some(SmoothingConfig::default()));
    for _ in 0..10 {
        gauge.status(3_750_000, DISCHARGING);
    }
    assert_eq!(gauge.last_percent(), Some(50));

    // Just below the 50% breakpoint
    assert_eq!(gauge.status(3_749_999, DISCHARGING).percent, Some(50));
    assert_eq!(gauge.status(3_750_000, DISCHARGING).percent, Some(50));
    // A deep dip, e.g. while the display backlight turns on
    assert_eq!(gauge.status(3_700_000, DISCHARGING).percent, Some(50));
}

#[test]
fn test_steady_voltage_after_dip() {
    let mut gauge = microvolt_gauge(Some(SmoothingConfig::default()));
    for _ in 0..10 {
        gauge.status(3_750_000, DISCHARGING);
    }
    gauge.status(3_700_000, DISCHARGING);
    for _ in 0..100_000 {
        gauge.status(3_750_000, DISCHARGING);
    }
    assert_eq!(gauge.last_percent(), Some(50));
}

#[test]
fn test_sustained_drop_is_reported() {
    let mut gauge = microvolt_gauge(Some(SmoothingConfig::default()));
    gauge.status(3_750_000, DISCHARGING);
    for _ in 0..3000 {
        gauge.status(3_700_000, DISCHARGING);
    }
    assert_eq!(gauge.last_percent(), Some(25));
}

#[test]
fn test_no_charge_lines() {
    let mut gauge = BatteryGauge::new(pybadge_battery(None));
    // 40000 * 51562 / 512
    let status = gauge.status(40000, None);
    assert_eq!(status.state, ChargeState::Unknown);
    assert_eq!(status.microvolts, 4_028_281);
    assert_eq!(status.percent, Some(86));
    assert_eq!(gauge.curve(), &pinetime_curve());
}

#[test]
fn test_single_spike_is_ignored() {
    let mut gauge = microvolt_gauge(Some(SmoothingConfig::default()));
    for _ in 0..10 {
        gauge.status(3_900_000, DISCHARGING);
    }
    assert_eq!(gauge.last_percent(), Some(75));

    // Charger plugged in for one sample
    let status = gauge.status(4_300_000, DISCHARGING);
    assert_eq!(status.percent, Some(75));
    assert_eq!(status.microvolts, 4_300_000);
}

#[test]
fn test_charge_pins() {
    let expectations = [
        // Charging: charge indication low
        (State::Low, State::Low, ChargeState::Charging),
        // Full: power present, not charging
        (State::High, State::Low, ChargeState::NotCharging),
        // Unplugged
        (State::High, State::High, ChargeState::Discharging),
    ];
    let charging = PinMock::new(&expectations.map(|(c, _, _)| PinTransaction::get(c)));
    let power = PinMock::new(&expectations.map(|(_, p, _)| PinTransaction::get(p)));
    let mut pins = ChargePins::new(charging, power);
    let mut gauge = BatteryGauge::new(pinetime_battery(None));

    for (_, _, state) in expectations {
        let status = gauge.status_from_pins(40960, &mut pins);
        assert_eq!(status.state, state);
    }

    let (mut charging, mut power) = pins.release();
    charging.done();
    power.done();
}
