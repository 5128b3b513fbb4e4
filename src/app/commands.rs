//! Inbound manual-override commands.
//!
//! Commands arrive as short text datagrams on the control socket (or from
//! the serial console in debug builds) and are interpreted by the
//! [`Controller`](super::service::Controller). Matching is exact: the
//! payload must be one of the literal command strings, with no trailing
//! garbage beyond a terminating NUL or newline.

use crate::control::ManualMode;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualCommand {
    /// Return to automatic control.
    Auto,
    /// Automatic control with the evening (boost) profile.
    Dark,
    /// Force the fan on.
    On,
    /// Force the fan to boost.
    Boost,
    /// Force the fan off.
    Off,
}

impl ManualCommand {
    /// Parse a command payload. Trailing NUL and newline bytes are
    /// stripped before matching; anything else must match exactly.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim_end_matches(['\0', '\n', '\r']) {
            "piv auto" => Some(Self::Auto),
            "piv dark" => Some(Self::Dark),
            "piv on" => Some(Self::On),
            "piv boost" => Some(Self::Boost),
            "piv off" => Some(Self::Off),
            _ => None,
        }
    }

    /// The manual mode this command selects.
    pub fn mode(self) -> ManualMode {
        match self {
            Self::Auto => ManualMode::Auto,
            Self::Dark => ManualMode::AutoDark,
            Self::On => ManualMode::ManualOn,
            Self::Boost => ManualMode::ManualBoost,
            Self::Off => ManualMode::ManualOff,
        }
    }
}
