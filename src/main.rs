//! Ventilation controller firmware — main entry point.
//!
//! Hexagonal architecture with a level-scheduled control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter        UdpReporter + LogReporter            │
//! │  (ADC, relays, LEDs)    (ReporterPort)                       │
//! │  CommandListener        LinkStatus       NvsConfigStore      │
//! │  (UDP → command queue)  (Connectivity)   (ConfigStore)       │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │             Controller (pure logic)                │      │
//! │  │  filter · band · mode · dwell · status · reports   │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};

use pivent::adapters::hardware::HardwareAdapter;
use pivent::adapters::log_sink::LogReporter;
use pivent::adapters::net::{self, CommandListener, LinkStatus, UdpReporter};
use pivent::adapters::nvs::NvsConfigStore;
use pivent::adapters::time::MonotonicClock;
use pivent::app::ports::ReporterPort;
use pivent::app::service::Controller;
use pivent::config::Config;
use pivent::drivers::hw_init;
use pivent::events;

/// Control loop cadence.
const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Fixed backoff between startup retries.
const RETRY_DELAY: Duration = Duration::from_secs(1);

// WiFi credentials are baked in at build time; the board has no
// provisioning surface.
const WIFI_SSID: &str = match option_env!("PIVENT_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};
const WIFI_PASS: &str = match option_env!("PIVENT_WIFI_PASS") {
    Some(pass) => pass,
    None => "",
};

/// Retry a startup step indefinitely with fixed backoff. Startup cannot
/// proceed without it, and a watchdog reset would land right back here.
fn retry_forever<T, E: core::fmt::Display>(what: &str, mut step: impl FnMut() -> Result<T, E>) -> T {
    loop {
        match step() {
            Ok(value) => return value,
            Err(e) => {
                error!("{what} failed: {e}, retrying");
                thread::sleep(RETRY_DELAY);
            }
        }
    }
}

/// Fan-out reporter: every report goes to the serial log, and to UDP
/// when a destination is configured.
struct Reporters {
    log: LogReporter,
    udp: Option<UdpReporter>,
}

impl ReporterPort for Reporters {
    fn send(&mut self, report: &str) {
        self.log.send(report);
        if let Some(udp) = self.udp.as_mut() {
            udp.send(report);
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("pivent v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    retry_forever("peripheral init", hw_init::init_peripherals);

    // ── 3. Configuration ──────────────────────────────────────
    let config = match NvsConfigStore::load() {
        Ok(store) => Config::load(&store),
        Err(e) => {
            warn!("config store unavailable ({e}), using defaults");
            Config::default()
        }
    };

    // ── 4. WiFi ───────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let mut wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sys_loop.clone(), None)?,
        sys_loop,
    )?;
    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: WIFI_SSID.try_into().unwrap_or_default(),
        password: WIFI_PASS.try_into().unwrap_or_default(),
        ..Default::default()
    }))?;
    wifi.start()?;
    retry_forever("wifi connect", || {
        wifi.connect()?;
        wifi.wait_netif_up()
    });
    net::set_link_up(true);

    // ── 5. Network adapters ───────────────────────────────────
    let udp_reporter = if config.reporting_enabled() {
        Some(retry_forever("report socket", || UdpReporter::new(&config)))
    } else {
        info!("no report destination configured, logging only");
        None
    };
    let mut reporters = Reporters {
        log: LogReporter::new(),
        udp: udp_reporter,
    };

    let mut listener = if config.control_port != 0 {
        Some(retry_forever("control socket", || CommandListener::new(&config)))
    } else {
        warn!("control port disabled, manual commands unavailable");
        None
    };

    // ── 6. Controller ─────────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut hw = HardwareAdapter::new();
    let mut controller = Controller::new(config, &mut hw, clock.now_ms());
    let link = LinkStatus;

    info!("system ready, entering control loop");

    // ── 7. Control loop ───────────────────────────────────────
    //
    // Level-scheduled: the target wake time advances by exactly one
    // period per iteration, so tick cadence does not drift with the
    // work done inside the loop.
    let mut next_wake = Instant::now();
    loop {
        next_wake += TICK_PERIOD;
        if let Some(sleep) = next_wake.checked_duration_since(Instant::now()) {
            thread::sleep(sleep);
        }

        net::set_link_up(wifi.is_connected().unwrap_or(false));

        // Inbound commands and the tick run back to back on this task,
        // which is the mutual exclusion the controller state needs.
        if let Some(listener) = listener.as_mut() {
            listener.poll();
        }
        events::drain_commands(|command| {
            controller.apply_manual_command(command, clock.now_ms(), &mut reporters);
        });

        controller.tick(clock.now_ms(), &mut hw, &link, &mut reporters);
    }
}
