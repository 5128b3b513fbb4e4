//! Hysteresis banding of the external temperature.
//!
//! Classification is sticky: each band has its own exit threshold, so a
//! reading hovering near a boundary cannot toggle the band (and with it
//! the relays) every tick.
//!
//! ```text
//!        < cold_threshold              > hot_threshold
//!  COLD ◀────────────────── MILD ──────────────────▶ HOT
//!       ──────────────────▶      ◀──────────────────
//!        > not_cold_threshold     < not_hot_threshold
//! ```

use crate::config::Config;
use serde::{Deserialize, Serialize};

/// Temperature classification driving the automatic control modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureBand {
    /// Close to freezing.
    Cold,
    /// Normal operating range.
    Mild,
    /// Too hot.
    Hot,
}

impl TemperatureBand {
    /// Label used in status reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cold => "COLD",
            Self::Mild => "MILD",
            Self::Hot => "HOT",
        }
    }
}

/// One hysteresis step: the band after observing `celsius`.
///
/// Inside Mild the hot test runs before the cold test; with an ordered
/// threshold configuration they are mutually exclusive, and with a
/// broken one the cold branch deliberately wins.
pub fn next_band(band: TemperatureBand, celsius: f32, config: &Config) -> TemperatureBand {
    match band {
        TemperatureBand::Cold if celsius > config.not_cold_threshold => TemperatureBand::Mild,
        TemperatureBand::Hot if celsius < config.not_hot_threshold => TemperatureBand::Mild,
        TemperatureBand::Mild => {
            let mut next = TemperatureBand::Mild;
            if celsius > config.hot_threshold {
                next = TemperatureBand::Hot;
            }
            if celsius < config.cold_threshold {
                next = TemperatureBand::Cold;
            }
            next
        }
        other => other,
    }
}
