//! Operating modes and the control-mode decision table.
//!
//! Two layers of mode exist. [`ManualMode`] is what the user (or the
//! automatic default) has asked for; [`ControlMode`] is what the relays
//! actually do. The decision table collapses the manual layer and the
//! temperature band into a desired control mode each tick; the dwell
//! timer in the service layer decides when the relays may follow it.

use super::band::TemperatureBand;
use serde::{Deserialize, Serialize};

/// User-facing operating mode.
///
/// The three `Manual*` values carry an expiry timestamp in the
/// controller state; `Auto` and `AutoDark` never expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManualMode {
    /// Automatic: ventilate in the Mild band.
    Auto,
    /// Automatic, evening profile: boost in the Mild band.
    AutoDark,
    /// Manually forced off.
    ManualOff,
    /// Manually forced on.
    ManualOn,
    /// Manually forced to boost.
    ManualBoost,
}

impl ManualMode {
    /// True for the time-limited manual subset.
    pub fn is_manual(self) -> bool {
        !matches!(self, Self::Auto | Self::AutoDark)
    }
}

/// Relay-level operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Off,
    On,
    Boost,
}

impl ControlMode {
    /// Label used in status reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
            Self::Boost => "BOOST",
        }
    }
}

/// Relay drive levels for a control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayOutputs {
    pub boost: bool,
    pub mains: bool,
}

/// The control-mode decision table.
///
/// | manual mode | Mild band | other bands |
/// |-------------|-----------|-------------|
/// | Auto        | On        | Off         |
/// | AutoDark    | Boost     | Off         |
/// | ManualOff   | Off       | Off         |
/// | ManualOn    | On        | On          |
/// | ManualBoost | Boost     | Boost       |
pub fn desired_mode(manual: ManualMode, band: TemperatureBand) -> ControlMode {
    let mild = band == TemperatureBand::Mild;
    match manual {
        ManualMode::Auto if mild => ControlMode::On,
        ManualMode::AutoDark if mild => ControlMode::Boost,
        ManualMode::Auto | ManualMode::AutoDark | ManualMode::ManualOff => ControlMode::Off,
        ManualMode::ManualOn => ControlMode::On,
        ManualMode::ManualBoost => ControlMode::Boost,
    }
}

/// Relay mapping: the boost relay only ever closes together with mains.
pub fn relay_outputs(mode: ControlMode) -> RelayOutputs {
    match mode {
        ControlMode::Off => RelayOutputs {
            boost: false,
            mains: false,
        },
        ControlMode::On => RelayOutputs {
            boost: false,
            mains: true,
        },
        ControlMode::Boost => RelayOutputs {
            boost: true,
            mains: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TemperatureBand::{Cold, Hot, Mild};

    #[test]
    fn decision_table_is_exhaustive() {
        let cases = [
            (ManualMode::Auto, Mild, ControlMode::On),
            (ManualMode::Auto, Cold, ControlMode::Off),
            (ManualMode::Auto, Hot, ControlMode::Off),
            (ManualMode::AutoDark, Mild, ControlMode::Boost),
            (ManualMode::AutoDark, Cold, ControlMode::Off),
            (ManualMode::AutoDark, Hot, ControlMode::Off),
            (ManualMode::ManualOff, Mild, ControlMode::Off),
            (ManualMode::ManualOff, Hot, ControlMode::Off),
            (ManualMode::ManualOn, Mild, ControlMode::On),
            (ManualMode::ManualOn, Cold, ControlMode::On),
            (ManualMode::ManualBoost, Mild, ControlMode::Boost),
            (ManualMode::ManualBoost, Hot, ControlMode::Boost),
        ];
        for (manual, band, expected) in cases {
            assert_eq!(
                desired_mode(manual, band),
                expected,
                "manual={manual:?} band={band:?}"
            );
        }
    }

    #[test]
    fn manual_subset_is_exactly_the_three_forced_modes() {
        assert!(!ManualMode::Auto.is_manual());
        assert!(!ManualMode::AutoDark.is_manual());
        assert!(ManualMode::ManualOff.is_manual());
        assert!(ManualMode::ManualOn.is_manual());
        assert!(ManualMode::ManualBoost.is_manual());
    }

    #[test]
    fn boost_relay_never_closes_without_mains() {
        for mode in [ControlMode::Off, ControlMode::On, ControlMode::Boost] {
            let out = relay_outputs(mode);
            if out.boost {
                assert!(out.mains, "boost without mains in {mode:?}");
            }
        }
    }

    #[test]
    fn relay_mapping_matches_modes() {
        assert_eq!(
            relay_outputs(ControlMode::Off),
            RelayOutputs {
                boost: false,
                mains: false
            }
        );
        assert_eq!(
            relay_outputs(ControlMode::On),
            RelayOutputs {
                boost: false,
                mains: true
            }
        );
        assert_eq!(
            relay_outputs(ControlMode::Boost),
            RelayOutputs {
                boost: true,
                mains: true
            }
        );
    }
}
