//! End-to-end controller scenarios against mock adapters: real filter,
//! real thermistor conversion, real banding and dwell logic.

use pivent::config::Config;
use pivent::app::service::Controller;
use pivent::control::status::{HEARTBEAT_BIT, MAINS_BIT, POWER_BIT};
use pivent::control::{ControlMode, ManualMode, TemperatureBand};

use crate::mock_hw::{MockHardware, MockLink, MockReporter};

// Raw thermistor codes and the temperatures they converge to once the
// 100-sample filter settles (fixed 15 kΩ divider, Steinhart-Hart):
//   2048 → 25.0 °C   (fraction 0.50)
//   1900 → 29.0 °C   (fraction 0.464)
//   1638 → 36.4 °C   (fraction 0.40)
const RAW_25C: u16 = 2048;
const RAW_29C: u16 = 1900;
const RAW_36C: u16 = 1638;

/// Enough ticks for the sample filter to fully converge on a new input.
const SETTLE_TICKS: u64 = 150;

fn quick_config() -> Config {
    Config {
        change_delay_s: 1,
        manual_timeout_s: 60,
        report_interval_s: 100_000,
        ..Config::default()
    }
}

/// Run `count` ticks at 100 ms cadence starting after `start_ms`,
/// returning the timestamp of the last tick.
fn run_ticks(
    ctl: &mut Controller,
    hw: &mut MockHardware,
    rep: &mut MockReporter,
    start_ms: u64,
    count: u64,
) -> u64 {
    let link = MockLink(true);
    let mut now = start_ms;
    for _ in 0..count {
        now += 100;
        ctl.tick(now, hw, &link, rep);
    }
    now
}

#[test]
fn mild_start_turns_fan_on_after_dwell() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    assert_eq!(ctl.band(), TemperatureBand::Mild);
    assert_eq!(ctl.current_mode(), ControlMode::Off);

    run_ticks(&mut ctl, &mut hw, &mut rep, 0, 15);
    assert_eq!(ctl.current_mode(), ControlMode::On);
    assert_eq!(hw.last_relays(), Some((false, true)));
}

#[test]
fn hot_air_shuts_the_fan_off() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    // Settle into Mild/On first.
    let now = run_ticks(&mut ctl, &mut hw, &mut rep, 0, 15);
    assert_eq!(ctl.current_mode(), ControlMode::On);

    // Hot intake air: the filter converges on 36.4 °C, above the 30 °C
    // escalation threshold.
    hw.external_raw = RAW_36C;
    run_ticks(&mut ctl, &mut hw, &mut rep, now, SETTLE_TICKS);
    assert_eq!(ctl.band(), TemperatureBand::Hot);
    assert_eq!(ctl.current_mode(), ControlMode::Off);
    assert_eq!(hw.last_relays(), Some((false, false)));
}

#[test]
fn hot_band_holds_through_the_hysteresis_window() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    hw.external_raw = RAW_36C;
    let now = run_ticks(&mut ctl, &mut hw, &mut rep, 0, SETTLE_TICKS);
    assert_eq!(ctl.band(), TemperatureBand::Hot);

    // 29 °C sits between not_hot (28) and hot (30): no reversion.
    hw.external_raw = RAW_29C;
    let now = run_ticks(&mut ctl, &mut hw, &mut rep, now, SETTLE_TICKS);
    assert_eq!(ctl.band(), TemperatureBand::Hot);

    // 25 °C is below not_hot: back to Mild, fan back on.
    hw.external_raw = RAW_25C;
    run_ticks(&mut ctl, &mut hw, &mut rep, now, SETTLE_TICKS);
    assert_eq!(ctl.band(), TemperatureBand::Mild);
    assert_eq!(ctl.current_mode(), ControlMode::On);
}

#[test]
fn saturated_thermistor_reads_as_extreme_band() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    // A shorted divider (raw 0) saturates to the very-hot sentinel.
    hw.external_raw = 0;
    run_ticks(&mut ctl, &mut hw, &mut rep, 0, SETTLE_TICKS);
    assert_eq!(ctl.band(), TemperatureBand::Hot);
    assert!(ctl.external_celsius() > 999.0);
}

#[test]
fn manual_boost_overrides_band_then_expires() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    let now = run_ticks(&mut ctl, &mut hw, &mut rep, 0, 15);
    assert_eq!(ctl.current_mode(), ControlMode::On);

    assert!(ctl.handle_manual_command("piv boost", now, &mut rep));
    assert_eq!(ctl.manual_mode(), ManualMode::ManualBoost);

    let now = run_ticks(&mut ctl, &mut hw, &mut rep, now, 15);
    assert_eq!(ctl.current_mode(), ControlMode::Boost);
    assert_eq!(hw.last_relays(), Some((true, true)));

    // manual_timeout_s = 60: jump past expiry, mode reverts to Auto and
    // the Mild band takes the fan back to plain On.
    run_ticks(&mut ctl, &mut hw, &mut rep, now + 61_000, 15);
    assert_eq!(ctl.manual_mode(), ManualMode::Auto);
    assert_eq!(ctl.current_mode(), ControlMode::On);
    assert_eq!(hw.last_relays(), Some((false, true)));
}

#[test]
fn heartbeat_mask_is_exactly_power_heartbeat_mains() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    // Settle into Auto/Mild/On, then collect one full heartbeat cycle.
    let now = run_ticks(&mut ctl, &mut hw, &mut rep, 0, 15);
    hw.masks.clear();
    run_ticks(&mut ctl, &mut hw, &mut rep, now, 10);

    let beats: Vec<u8> = hw
        .masks
        .iter()
        .copied()
        .filter(|m| m & HEARTBEAT_BIT != 0)
        .collect();
    assert_eq!(beats.len(), 1);
    assert_eq!(beats[0], POWER_BIT | HEARTBEAT_BIT | MAINS_BIT);
}

#[test]
fn report_carries_all_fields() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut config = quick_config();
    config.report_interval_s = 2;
    let mut ctl = Controller::new(config, &mut hw, 0);

    run_ticks(&mut ctl, &mut hw, &mut rep, 0, 30);
    assert!(!rep.reports.is_empty());

    let line = rep.reports.last().unwrap();
    assert!(line.starts_with("ext "), "{line}");
    assert!(line.contains(" int "), "{line}");
    assert!(line.contains(" control "), "{line}");
    assert!(line.contains(" auto 1 "), "{line}");
    assert!(line.contains(" temp MILD "), "{line}");
    assert!(line.contains(" up "), "{line}");
    assert!(line.ends_with('\n'));
    assert!(line.len() <= 100);
}

#[test]
fn sample_log_drains_destructively() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    run_ticks(&mut ctl, &mut hw, &mut rep, 0, 10);

    // Priming pushed 100 samples, the ticks 10 more.
    let mut out = [0u8; 4096];
    let bytes = ctl.drain_samples(&mut out);
    assert_eq!(bytes, 110 * 2);
    let first = u16::from_le_bytes([out[0], out[1]]);
    assert_eq!(first, 2048);

    // Destructive: a second drain has nothing.
    assert_eq!(ctl.drain_samples(&mut out), 0);
}

#[test]
fn snapshot_matches_observed_state() {
    let mut hw = MockHardware::new();
    let mut rep = MockReporter::default();
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    let now = run_ticks(&mut ctl, &mut hw, &mut rep, 0, 15);
    assert!(ctl.handle_manual_command("piv off", now, &mut rep));

    let snap = ctl.snapshot();
    assert_eq!(snap.manual_mode, ManualMode::ManualOff);
    assert_eq!(snap.manual_end_ms, now + 60_000);
    assert_eq!(snap.band, TemperatureBand::Mild);
    assert!((snap.external_celsius - 25.0).abs() < 0.5);
}
