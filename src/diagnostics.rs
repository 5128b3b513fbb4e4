//! Runtime diagnostics.
//!
//! Three read-only windows into the running controller, served over the
//! control socket on request:
//! - the last rendered report line (text),
//! - a [`StatusSnapshot`] of the full controller state (postcard),
//! - the raw external-sample log (destructive drain, little-endian u16).

use serde::{Deserialize, Serialize};

use crate::control::{ControlMode, ManualMode, TemperatureBand};

/// Point-in-time copy of the controller state.
///
/// Timestamps are absolute milliseconds since boot, matching the
/// `now_ms` values fed to the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub band: TemperatureBand,
    pub manual_mode: ManualMode,
    pub manual_end_ms: u64,
    pub current_mode: ControlMode,
    pub desired_mode: ControlMode,
    pub next_change_at_ms: u64,
    pub heartbeat_phase: u8,
    pub internal_celsius: f32,
    pub external_celsius: f32,
    pub next_report_at_ms: u64,
    pub boot_ms: u64,
}

impl StatusSnapshot {
    /// Serialize for the wire. Returns `None` only if the output buffer
    /// is too small, which a correctly sized caller buffer rules out.
    pub fn encode<'a>(&self, out: &'a mut [u8]) -> Option<&'a [u8]> {
        postcard::to_slice(self, out).ok().map(|s| &*s)
    }
}
