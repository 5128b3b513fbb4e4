#![allow(dead_code)] // Error types reserved for typed adapter returns

//! Unified error types for the controller firmware.
//!
//! The decision core itself is infallible by design (config parsing
//! fails soft, sensor saturation becomes sentinel temperatures), so
//! this enum only surfaces at the adapter boundary: peripheral bring-up
//! and socket setup. All variants are `Copy` so they pass through the
//! startup retry loop without allocation.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration storage is unreadable.
    Config(&'static str),
    /// Network setup (socket bind, address parse) failed.
    Net(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Net(msg) => write!(f, "net: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
