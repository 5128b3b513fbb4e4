//! Mock hardware for integration tests.
//!
//! Records every actuator and indicator call so tests can assert on the
//! full command history without touching real GPIO registers, and lets
//! each test script the raw ADC readings tick by tick.

use pivent::app::ports::{
    ActuatorPort, ConnectivityPort, ReporterPort, SensorChannel, StatusSinkPort,
    TemperatureSourcePort,
};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub internal_raw: u16,
    pub external_raw: u16,
    pub relay_calls: Vec<(bool, bool)>,
    pub masks: Vec<u8>,
}

#[allow(dead_code)]
impl MockHardware {
    /// Raw codes chosen so the external channel reads a comfortable
    /// 25 °C (fraction 0.5) and the internal channel sits near its
    /// 27 °C calibration point.
    pub fn new() -> Self {
        Self {
            internal_raw: 875,
            external_raw: 2048,
            relay_calls: Vec::new(),
            masks: Vec::new(),
        }
    }

    pub fn last_relays(&self) -> Option<(bool, bool)> {
        self.relay_calls.last().copied()
    }

    pub fn last_mask(&self) -> Option<u8> {
        self.masks.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureSourcePort for MockHardware {
    fn read(&mut self, channel: SensorChannel) -> u16 {
        match channel {
            SensorChannel::Internal => self.internal_raw,
            SensorChannel::External => self.external_raw,
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_relays(&mut self, boost: bool, mains: bool) {
        self.relay_calls.push((boost, mains));
    }
}

impl StatusSinkPort for MockHardware {
    fn set_indicators(&mut self, mask: u8) {
        self.masks.push(mask);
    }
}

// ── Reporter / connectivity mocks ─────────────────────────────

#[derive(Default)]
pub struct MockReporter {
    pub reports: Vec<String>,
}

impl ReporterPort for MockReporter {
    fn send(&mut self, report: &str) {
        self.reports.push(report.to_owned());
    }
}

pub struct MockLink(pub bool);

impl ConnectivityPort for MockLink {
    fn is_connected(&self) -> bool {
        self.0
    }
}
