//! Raw sum → calibrated degrees Celsius.
//!
//! Two very different sensors share the smoothed-sum representation:
//!
//! - **Internal** — the MCU die sensor, linear calibration straight from
//!   the datasheet.
//! - **External** — an NTC thermistor in a voltage divider with a fixed
//!   15 kΩ resistor, converted through a zero-offset Steinhart–Hart
//!   approximation. The B coefficient was measured empirically; no
//!   official thermistor data exists.
//!
//! Near the ends of the ADC range the divider maths blows up (a shorted
//! or disconnected thermistor), so the external conversion saturates to
//! sentinel temperatures instead: out-of-range numeric values that the
//! banding logic treats as extreme readings rather than errors.

use super::filter::HISTORY_SIZE;

/// 12-bit ADC full-scale code count.
pub const ADC_FULL_SCALE: i32 = 1 << 12;

/// ADC reference voltage.
const ADC_REF_VOLTAGE: f32 = 3.3;

/// Sentinel returned when the thermistor reads as a near short
/// (very low divider fraction): "impossibly hot".
pub const SATURATED_HOT_C: f32 = 1000.0;

/// Sentinel returned when the thermistor reads as disconnected
/// (very high divider fraction): physical absolute zero.
pub const SATURATED_COLD_C: f32 = -273.15;

/// Divider fraction below which the external reading saturates hot.
const FRACTION_LOW_LIMIT: f32 = 0.015;

/// Divider fraction above which the external reading saturates cold.
const FRACTION_HIGH_LIMIT: f32 = 0.985;

/// Fixed divider resistance (ohms), also the reference resistance for
/// the Steinhart–Hart approximation.
const DIVIDER_OHMS: f32 = 15_000.0;

const C_TO_K: f32 = 273.15;

/// Internal die sensor: smoothed sum → Celsius.
///
/// Linear equation from the RP2350 datasheet (section 12.4.6,
/// "Temperature Sensor"). No range checks; the sensor cannot saturate
/// within the ADC's span.
pub fn internal_celsius(sum: i32) -> f32 {
    let voltage = (ADC_REF_VOLTAGE * sum as f32) / (ADC_FULL_SCALE * HISTORY_SIZE as i32) as f32;
    27.0 - ((voltage - 0.706) / 0.001721)
}

/// External thermistor: smoothed sum → Celsius, saturating at the rails.
pub fn external_celsius(sum: i32) -> f32 {
    // Sample value in the 0.0 .. 1.0 range.
    let fraction = sum as f32 / (ADC_FULL_SCALE * HISTORY_SIZE as i32) as f32;
    if fraction < FRACTION_LOW_LIMIT {
        return SATURATED_HOT_C;
    }
    if fraction > FRACTION_HIGH_LIMIT {
        return SATURATED_COLD_C;
    }

    // Thermistor resistance from the divider fraction.
    let r1 = DIVIDER_OHMS / ((1.0 / fraction) - 1.0);

    // Simplified Steinhart–Hart with C = 0. B was measured against a
    // reference thermometer; A anchors the curve at 25 °C.
    let a = 1.0 / (C_TO_K + 25.0);
    let b = 0.000_305_267;
    let ratio = (r1 / DIVIDER_OHMS).ln();
    (1.0 / (a + b * ratio)) - C_TO_K
}
