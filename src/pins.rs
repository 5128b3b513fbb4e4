//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Relays
// ---------------------------------------------------------------------------

/// Digital output: boost-speed relay (active HIGH).
pub const BOOST_RELAY_GPIO: i32 = 0;
/// Digital output: mains power relay (active HIGH).
pub const MAINS_RELAY_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Status LED matrix
// ---------------------------------------------------------------------------
// Six LEDs on three wires in a charlieplexed matrix; the driver strobes
// one LED per slot. Wire names match the loom colours on the panel.

pub const WHITE_WIRE_GPIO: i32 = 3;
pub const BLACK_WIRE_GPIO: i32 = 4;
pub const YELLOW_WIRE_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Sensors — Analog
// ---------------------------------------------------------------------------

/// External thermistor via a fixed 15 kΩ divider.
pub const THERMISTOR_ADC_GPIO: i32 = 28;

// ---------------------------------------------------------------------------
// Debug
// ---------------------------------------------------------------------------

/// Spare output toggled for scope timing measurements.
pub const TEST_GPIO: i32 = 6;
