//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the decision rules for the ventilation
//! controller: sampling orchestration, band/mode evaluation, dwell
//! timing, heartbeat, and report scheduling. All interaction with
//! hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod ports;
pub mod service;
