//! Controller service — the decision core.
//!
//! [`Controller`] owns the whole ControllerState: configuration snapshot,
//! sensing pipeline, temperature band, manual-override mode with expiry,
//! the current/desired control modes with their dwell timer, the
//! heartbeat phase, and the report schedule. All I/O flows through port
//! traits injected at call sites, so the entire tick cycle runs against
//! in-memory mocks on the host.
//!
//! ```text
//!  TemperatureSourcePort ──▶ ┌──────────────────────┐ ──▶ ActuatorPort
//!                            │      Controller       │ ──▶ StatusSinkPort
//!  ConnectivityPort ───────▶ │ band · mode · dwell   │ ──▶ ReporterPort
//!  ManualCommandChannel ───▶ └──────────────────────┘
//! ```
//!
//! Two entry points mutate the state: the periodic [`tick`] and the
//! asynchronous [`handle_manual_command`]. The caller must never let
//! them interleave; on the target both run on the main task, fed by the
//! command queue in [`crate::events`].
//!
//! [`tick`]: Controller::tick
//! [`handle_manual_command`]: Controller::handle_manual_command

use core::fmt::Write as _;

use heapless::String;
use log::{info, warn};

use crate::config::Config;
use crate::control::{
    desired_mode, next_band, relay_outputs, status, ControlMode, ManualMode, TemperatureBand,
};
use crate::diagnostics::StatusSnapshot;
use crate::sensors::TemperatureSensors;

use super::commands::ManualCommand;
use super::ports::{
    ActuatorPort, ConnectivityPort, ReporterPort, StatusSinkPort, TemperatureSourcePort,
};

/// Upper bound on a rendered report line.
pub const REPORT_TEXT_CAP: usize = 100;

/// Number of heartbeat phases a full blink cycle walks through.
const HEARTBEAT_PHASES: u8 = 10;

/// The ventilation decision core. One instance per process, created at
/// startup and mutated only by [`tick`](Self::tick) and
/// [`handle_manual_command`](Self::handle_manual_command).
pub struct Controller {
    config: Config,
    sensors: TemperatureSensors,
    band: TemperatureBand,
    manual_mode: ManualMode,
    /// Absolute expiry of the manual override, ms since boot.
    /// Meaningful only while `manual_mode.is_manual()`.
    manual_end_ms: u64,
    current_mode: ControlMode,
    desired_mode: ControlMode,
    /// Dwell timer: no relay change before this instant.
    next_change_at_ms: u64,
    /// Heartbeat phase, `0..HEARTBEAT_PHASES`.
    heartbeat_phase: u8,
    internal_c: f32,
    external_c: f32,
    next_report_at_ms: u64,
    boot_ms: u64,
    last_report: String<REPORT_TEXT_CAP>,
}

impl Controller {
    /// Build the controller: prime both sample filters with the live
    /// sensor value and arm the dwell and report timers from `now_ms`.
    ///
    /// Arming the dwell timer here means the relays hold their power-on
    /// state for one full `change_delay_s` before the first actuation,
    /// which also covers the settling time of the freshly primed filter.
    pub fn new(config: Config, source: &mut impl TemperatureSourcePort, now_ms: u64) -> Self {
        let sensors = TemperatureSensors::prime(source);
        let internal_c = sensors.internal_celsius();
        let external_c = sensors.external_celsius();
        info!("controller up: int {internal_c:.1} C, ext {external_c:.1} C");

        let next_change_at_ms = now_ms + u64::from(config.change_delay_s) * 1000;
        let next_report_at_ms = now_ms + u64::from(config.report_interval_s) * 1000;

        Self {
            config,
            sensors,
            band: TemperatureBand::Mild,
            manual_mode: ManualMode::Auto,
            manual_end_ms: 0,
            current_mode: ControlMode::Off,
            desired_mode: ControlMode::Off,
            next_change_at_ms,
            heartbeat_phase: 0,
            internal_c,
            external_c,
            next_report_at_ms,
            boot_ms: now_ms,
            last_report: String::new(),
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies the sensor, relay and indicator
    /// ports at once — on the target they are all one peripheral block,
    /// and a single bound avoids a triple mutable borrow.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl TemperatureSourcePort + ActuatorPort + StatusSinkPort),
        link: &impl ConnectivityPort,
        reporter: &mut impl ReporterPort,
    ) {
        // 1. Sample, filter, convert.
        self.sensors.update(hw);
        self.internal_c = self.sensors.internal_celsius();
        self.external_c = self.sensors.external_celsius();

        // 2. Hysteresis banding on the intake-air temperature.
        let band = next_band(self.band, self.external_c, &self.config);
        if band != self.band {
            info!(
                "band {} -> {} at ext {:.1} C",
                self.band.label(),
                band.label(),
                self.external_c
            );
            self.band = band;
        }

        // 3. Manual-override expiry.
        if self.manual_mode.is_manual() && now_ms >= self.manual_end_ms {
            info!("manual override expired, back to auto");
            self.manual_mode = ManualMode::Auto;
        }

        // 4. Decision table.
        self.desired_mode = desired_mode(self.manual_mode, self.band);

        // 5. Debounced actuation.
        let mut output_changed = false;
        if self.desired_mode != self.current_mode && now_ms >= self.next_change_at_ms {
            let out = relay_outputs(self.desired_mode);
            hw.set_relays(out.boost, out.mains);
            info!(
                "control {} -> {} (boost={} mains={})",
                self.current_mode.label(),
                self.desired_mode.label(),
                out.boost,
                out.mains
            );
            self.current_mode = self.desired_mode;
            self.next_change_at_ms = now_ms + u64::from(self.config.change_delay_s) * 1000;
            output_changed = true;
        }

        // 6. Heartbeat. A lost network link snaps the phase back to 0,
        //    which doubles the apparent blink rate on the panel.
        if self.heartbeat_phase > 0 && !link.is_connected() {
            self.heartbeat_phase = 0;
        } else {
            self.heartbeat_phase = (self.heartbeat_phase + 1) % HEARTBEAT_PHASES;
        }

        // 7. Indicators.
        let mask = status::encode(
            self.current_mode,
            self.band,
            self.manual_mode,
            self.heartbeat_phase,
        );
        hw.set_indicators(mask);

        // 8. Reporting: on schedule, and immediately after a relay change.
        if now_ms >= self.next_report_at_ms || output_changed {
            self.emit_report(now_ms, reporter);
            self.next_report_at_ms = now_ms + u64::from(self.config.report_interval_s) * 1000;
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an inbound manual command.
    ///
    /// On a recognized command the manual mode and its expiry are set
    /// and a report goes out immediately; the relays themselves only
    /// move on the next tick, still subject to the dwell timer. Returns
    /// `false` (and mutates nothing) for anything unrecognized.
    pub fn handle_manual_command(
        &mut self,
        text: &str,
        now_ms: u64,
        reporter: &mut impl ReporterPort,
    ) -> bool {
        let Some(command) = ManualCommand::parse(text) else {
            warn!("unrecognized command {text:?}");
            return false;
        };
        self.apply_manual_command(command, now_ms, reporter);
        true
    }

    /// Apply an already-parsed manual command (e.g. drained from the
    /// inbound queue). Same semantics as a successful
    /// [`handle_manual_command`](Self::handle_manual_command).
    pub fn apply_manual_command(
        &mut self,
        command: ManualCommand,
        now_ms: u64,
        reporter: &mut impl ReporterPort,
    ) {
        self.manual_mode = command.mode();
        self.manual_end_ms = now_ms + u64::from(self.config.manual_timeout_s) * 1000;
        info!("manual command {command:?} -> {:?}", self.manual_mode);
        self.emit_report(now_ms, reporter);
    }

    // ── Diagnostics ───────────────────────────────────────────

    /// The last report line rendered, empty before the first report.
    pub fn last_report(&self) -> &str {
        &self.last_report
    }

    /// Point-in-time copy of the controller state for inspection.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            band: self.band,
            manual_mode: self.manual_mode,
            manual_end_ms: self.manual_end_ms,
            current_mode: self.current_mode,
            desired_mode: self.desired_mode,
            next_change_at_ms: self.next_change_at_ms,
            heartbeat_phase: self.heartbeat_phase,
            internal_celsius: self.internal_c,
            external_celsius: self.external_c,
            next_report_at_ms: self.next_report_at_ms,
            boot_ms: self.boot_ms,
        }
    }

    /// Destructive export of the raw external-sample log.
    pub fn drain_samples(&mut self, out: &mut [u8]) -> usize {
        self.sensors.drain_log(out)
    }

    pub fn band(&self) -> TemperatureBand {
        self.band
    }

    pub fn manual_mode(&self) -> ManualMode {
        self.manual_mode
    }

    pub fn current_mode(&self) -> ControlMode {
        self.current_mode
    }

    pub fn external_celsius(&self) -> f32 {
        self.external_c
    }

    pub fn internal_celsius(&self) -> f32 {
        self.internal_c
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_report(&mut self, now_ms: u64, reporter: &mut impl ReporterPort) {
        let auto_flag = u8::from(!self.manual_mode.is_manual());
        let uptime_s = (now_ms - self.boot_ms) / 1000;

        self.last_report.clear();
        // The line fits REPORT_TEXT_CAP by construction; a formatting
        // overflow would only truncate the report, never panic.
        let _ = write!(
            self.last_report,
            "ext {:.1} int {:.1} control {} auto {} temp {} up {}\n",
            self.external_c,
            self.internal_c,
            self.current_mode.label(),
            auto_flag,
            self.band.label(),
            uptime_s
        );
        reporter.send(&self.last_report);
    }
}
