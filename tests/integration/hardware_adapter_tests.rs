//! Controller driven through the real [`HardwareAdapter`] with the
//! simulated peripherals, down to the GPIO shadow register.

use std::sync::{Mutex, MutexGuard};

use pivent::adapters::hardware::HardwareAdapter;
use pivent::app::service::Controller;
use pivent::config::Config;
use pivent::control::ControlMode;
use pivent::drivers::hw_init;
use pivent::pins;

use crate::mock_hw::{MockLink, MockReporter};

// The sim peripherals are process-global; serialize the tests that
// touch them.
static SIM_LOCK: Mutex<()> = Mutex::new(());

fn sim() -> MutexGuard<'static, ()> {
    SIM_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

fn quick_config() -> Config {
    Config {
        change_delay_s: 1,
        report_interval_s: 100_000,
        ..Config::default()
    }
}

#[test]
fn relay_levels_reach_the_gpio_shadow() {
    let _guard = sim();
    hw_init::sim_set_internal_raw(875);
    hw_init::sim_set_external_raw(2048); // 25 °C: Mild, fan wanted On

    let mut hw = HardwareAdapter::new();
    let mut rep = MockReporter::default();
    let link = MockLink(true);
    let mut ctl = Controller::new(quick_config(), &mut hw, 0);

    for tick in 1..=15u64 {
        ctl.tick(tick * 100, &mut hw, &link, &mut rep);
    }

    assert_eq!(ctl.current_mode(), ControlMode::On);
    assert_eq!(hw.relay_state(), (false, true));
    assert!(hw_init::sim_gpio_level(pins::MAINS_RELAY_GPIO));
    assert!(!hw_init::sim_gpio_level(pins::BOOST_RELAY_GPIO));
}

#[test]
fn adapter_feeds_adc_readings_into_the_filter() {
    let _guard = sim();
    hw_init::sim_set_internal_raw(875);
    hw_init::sim_set_external_raw(2048);

    let mut hw = HardwareAdapter::new();
    let ctl = Controller::new(quick_config(), &mut hw, 0);

    // Priming read the simulated ADC 100 times per channel.
    assert!((ctl.external_celsius() - 25.0).abs() < 0.5);
    assert!((ctl.internal_celsius() - 27.0).abs() < 2.0);
}
