//! Log-based reporter adapter.
//!
//! Implements [`ReporterPort`] by writing each report line to the
//! logger (UART / USB-CDC in production). Used on its own when no
//! report destination is configured, and alongside the UDP reporter
//! otherwise.

use log::info;

use crate::app::ports::ReporterPort;

/// Adapter that logs every report to the serial console.
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReporterPort for LogReporter {
    fn send(&mut self, report: &str) {
        info!("REPORT | {}", report.trim_end());
    }
}
