//! Network adapters: UDP status reports, the manual-command listener,
//! and the link-state flag.
//!
//! All sockets are plain `std::net` UDP — ESP-IDF exposes the BSD
//! socket API through std, so the same code runs on the target and in
//! host tests against loopback. Sends are fire-and-forget: a dropped
//! datagram costs one report, and the next tick produces another.

use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

use crate::app::commands::ManualCommand;
use crate::app::ports::{ConnectivityPort, ReporterPort};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events;

// ── Outbound reports ──────────────────────────────────────────

/// Sends each report line as one UDP datagram to the configured
/// destination.
pub struct UdpReporter {
    socket: UdpSocket,
}

impl UdpReporter {
    /// Bind an ephemeral local port and connect to the report
    /// destination from `config`. Fails if reporting is not configured.
    pub fn new(config: &Config) -> Result<Self> {
        let Some(address) = config.report_address.as_deref() else {
            return Err(Error::Net("no report address configured"));
        };
        let socket =
            UdpSocket::bind("0.0.0.0:0").map_err(|_| Error::Net("report socket bind failed"))?;
        socket
            .connect((address, config.report_port))
            .map_err(|_| Error::Net("report destination unreachable"))?;
        info!("reporting to {address}:{}", config.report_port);
        Ok(Self { socket })
    }
}

impl ReporterPort for UdpReporter {
    fn send(&mut self, report: &str) {
        if self.socket.send(report.as_bytes()).is_err() {
            warn!("report datagram dropped");
        }
    }
}

// ── Inbound commands ──────────────────────────────────────────

/// Non-blocking UDP listener for manual commands.
///
/// Runs on the main task: [`poll`](Self::poll) is called once per loop
/// iteration, parses any pending datagrams, and enqueues recognized
/// commands for the controller. Unrecognized payloads are logged and
/// dropped; the sender gets no reply either way (reports serve as the
/// acknowledgement channel).
pub struct CommandListener {
    socket: UdpSocket,
}

impl CommandListener {
    pub fn new(config: &Config) -> Result<Self> {
        if config.control_port == 0 {
            return Err(Error::Net("control port disabled"));
        }
        let socket = UdpSocket::bind(("0.0.0.0", config.control_port))
            .map_err(|_| Error::Net("control socket bind failed"))?;
        socket
            .set_nonblocking(true)
            .map_err(|_| Error::Net("control socket mode"))?;
        info!("listening for commands on port {}", config.control_port);
        Ok(Self { socket })
    }

    /// Drain pending datagrams into the command queue. Returns the
    /// number of commands accepted.
    pub fn poll(&mut self) -> usize {
        let mut accepted = 0;
        let mut buf = [0u8; 64];
        while let Ok((len, from)) = self.socket.recv_from(&mut buf) {
            let Ok(text) = core::str::from_utf8(&buf[..len]) else {
                warn!("non-UTF8 datagram from {from}");
                continue;
            };
            match ManualCommand::parse(text) {
                Some(command) => {
                    if events::push_command(command) {
                        accepted += 1;
                    } else {
                        warn!("command queue full, dropped {command:?}");
                    }
                }
                None => warn!("unrecognized command from {from}: {text:?}"),
            }
        }
        accepted
    }
}

// ── Link state ────────────────────────────────────────────────

static LINK_UP: AtomicBool = AtomicBool::new(false);

/// Record the network link state. Called from the WiFi event handler on
/// the target; host tests call it directly.
pub fn set_link_up(up: bool) {
    LINK_UP.store(up, Ordering::Relaxed);
}

/// [`ConnectivityPort`] backed by the process-wide link flag.
pub struct LinkStatus;

impl ConnectivityPort for LinkStatus {
    fn is_connected(&self) -> bool {
        LINK_UP.load(Ordering::Relaxed)
    }
}
