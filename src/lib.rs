//! Ventilation controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod events;
pub mod sensors;

pub mod error;
pub mod pins;

// The adapter and driver modules compile on every target; the ESP-IDF
// implementations inside are cfg-guarded, with host simulation stubs.
pub mod adapters;
pub mod drivers;
