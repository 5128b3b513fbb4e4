//! Controller configuration.
//!
//! An immutable snapshot loaded once at startup from a key/value
//! [`ConfigStore`] (flash-backed on the target, a map in tests). Every
//! parse failure falls soft to the compiled default — a malformed or
//! missing key can never stop the controller from running.

use heapless::String;
use log::warn;
use serde::{Deserialize, Serialize};

/// Key/value source of configuration strings.
///
/// Implementations return the raw stored text for a key, or `None` when
/// the key is absent. Parsing and validation happen here, not in the
/// store.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<&str>;
}

/// Immutable controller configuration. The core only reads it.
///
/// Threshold invariant (checked, warned, not enforced):
/// `cold_threshold < not_cold_threshold ≤ not_hot_threshold <
/// hot_threshold`. The banding logic tolerates a violated ordering (the
/// cold branch wins inside Mild), but the resulting behaviour is almost
/// certainly not what the installer wanted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // --- Hysteresis thresholds (°C) ---
    /// Below this, the Mild band drops to Cold.
    pub cold_threshold: f32,
    /// Above this, the Cold band recovers to Mild.
    pub not_cold_threshold: f32,
    /// Below this, the Hot band recovers to Mild.
    pub not_hot_threshold: f32,
    /// Above this, the Mild band escalates to Hot.
    pub hot_threshold: f32,

    // --- Actuation ---
    /// Minimum dwell between relay changes (seconds).
    pub change_delay_s: u32,

    // --- Manual override ---
    /// Manual modes revert to Auto this long after the last command.
    pub manual_timeout_s: u32,

    // --- Reporting ---
    /// Destination address for UDP status reports. `None` (or a zero
    /// `report_port`) disables reporting over the network.
    pub report_address: Option<String<48>>,
    pub report_port: u16,
    /// Periodic report interval (seconds).
    pub report_interval_s: u32,

    // --- Inbound commands ---
    /// UDP port to listen on for manual commands (0 = disabled).
    pub control_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cold_threshold: 0.0,
            not_cold_threshold: 2.0,
            not_hot_threshold: 28.0,
            hot_threshold: 30.0,
            change_delay_s: 30,
            manual_timeout_s: 60 * 60 * 24,
            report_address: None,
            report_port: 0,
            report_interval_s: 30,
            control_port: 0,
        }
    }
}

impl Config {
    /// Load from a key/value store, falling back to defaults field by
    /// field. Never fails.
    pub fn load(store: &impl ConfigStore) -> Self {
        let defaults = Self::default();

        let mut config = Self {
            cold_threshold: get_float(store, "cold_threshold", defaults.cold_threshold),
            not_cold_threshold: get_float(store, "not_cold_threshold", defaults.not_cold_threshold),
            not_hot_threshold: get_float(store, "not_hot_threshold", defaults.not_hot_threshold),
            hot_threshold: get_float(store, "hot_threshold", defaults.hot_threshold),
            change_delay_s: get_int(store, "change_delay_s", 1, defaults.change_delay_s, u32::MAX),
            manual_timeout_s: get_int(
                store,
                "manual_timeout_s",
                1,
                defaults.manual_timeout_s,
                u32::MAX,
            ),
            report_address: None,
            report_port: 0,
            report_interval_s: defaults.report_interval_s,
            control_port: get_int(store, "control_port", 0, 0, u32::from(u16::MAX)) as u16,
        };

        // Reporting only activates when a destination address is present;
        // the port and interval are meaningless without one.
        if let Some(addr) = store.get("report_address") {
            if let Ok(addr) = String::try_from(addr) {
                config.report_address = Some(addr);
                config.report_port = get_int(store, "report_port", 0, 0, u32::from(u16::MAX)) as u16;
                config.report_interval_s = get_int(
                    store,
                    "report_interval_s",
                    1,
                    defaults.report_interval_s,
                    u32::MAX,
                );
            } else {
                warn!("config: report_address too long, reporting disabled");
            }
        }

        if !config.thresholds_ordered() {
            warn!(
                "config: threshold ordering violated \
                 (cold={} not_cold={} not_hot={} hot={})",
                config.cold_threshold,
                config.not_cold_threshold,
                config.not_hot_threshold,
                config.hot_threshold
            );
        }

        config
    }

    /// `cold < not_cold ≤ not_hot < hot`.
    pub fn thresholds_ordered(&self) -> bool {
        self.cold_threshold < self.not_cold_threshold
            && self.not_cold_threshold <= self.not_hot_threshold
            && self.not_hot_threshold < self.hot_threshold
    }

    /// Whether network reporting is configured.
    pub fn reporting_enabled(&self) -> bool {
        self.report_address.is_some() && self.report_port != 0
    }
}

fn get_float(store: &impl ConfigStore, key: &str, default: f32) -> f32 {
    match store.get(key) {
        Some(text) => match text.trim().parse::<f32>() {
            Ok(value) => value,
            Err(_) => {
                warn!("config: {key}={text:?} is not a number, using {default}");
                default
            }
        },
        None => default,
    }
}

/// Parse an integer key with an allowed range. Malformed or out-of-range
/// values fall back to the default (they are not clamped).
fn get_int(store: &impl ConfigStore, key: &str, min: u32, default: u32, max: u32) -> u32 {
    match store.get(key) {
        Some(text) => match text.trim().parse::<u32>() {
            Ok(value) if (min..=max).contains(&value) => value,
            Ok(value) => {
                warn!("config: {key}={value} outside {min}..={max}, using {default}");
                default
            }
            Err(_) => {
                warn!("config: {key}={text:?} is not an integer, using {default}");
                default
            }
        },
        None => default,
    }
}
