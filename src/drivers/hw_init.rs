//! One-shot hardware peripheral initialization and raw register access.
//!
//! Configures the two ADC channels and the GPIO directions using raw
//! ESP-IDF sys calls. Called once from `main()` before the control loop
//! starts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real peripheral access. On host/test: the ADC channels
//! read from injectable atomics (`sim_set_*`) and GPIO writes land in a
//! shadow register, so integration tests can drive the full hardware
//! adapter without a board.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC init failed (rc={rc})"),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
        }
    }
}

// ── ADC channel identity ──────────────────────────────────────

/// On-die temperature sensor channel.
pub const ADC_CH_INTERNAL: u32 = 4;
/// Thermistor divider channel.
pub const ADC_CH_EXTERNAL: u32 = 8;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path. No concurrent access is possible because
/// `init_adc()` completes before the control loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC_CH_INTERNAL, ADC_CH_EXTERNAL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH{ADC_CH_INTERNAL}=die, CH{ADC_CH_EXTERNAL}=thermistor)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, 4095) as u16
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::BOOST_RELAY_GPIO,
        pins::MAINS_RELAY_GPIO,
        pins::WHITE_WIRE_GPIO,
        pins::BLACK_WIRE_GPIO,
        pins::YELLOW_WIRE_GPIO,
        pins::TEST_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU16, AtomicU64, Ordering};

    pub static ADC_INTERNAL: AtomicU16 = AtomicU16::new(0);
    pub static ADC_EXTERNAL: AtomicU16 = AtomicU16::new(0);
    /// One bit per GPIO, mirrors the last written levels.
    pub static GPIO_SHADOW: AtomicU64 = AtomicU64::new(0);

    pub fn gpio_write(pin: i32, high: bool) {
        let bit = 1u64 << pin;
        if high {
            GPIO_SHADOW.fetch_or(bit, Ordering::Relaxed);
        } else {
            GPIO_SHADOW.fetch_and(!bit, Ordering::Relaxed);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    match channel {
        ADC_CH_INTERNAL => sim::ADC_INTERNAL.load(core::sync::atomic::Ordering::Relaxed),
        _ => sim::ADC_EXTERNAL.load(core::sync::atomic::Ordering::Relaxed),
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::gpio_write(pin, high);
}

/// Inject a raw die-sensor reading for host tests.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_internal_raw(raw: u16) {
    sim::ADC_INTERNAL.store(raw.min(4095), core::sync::atomic::Ordering::Relaxed);
}

/// Inject a raw thermistor reading for host tests.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_external_raw(raw: u16) {
    sim::ADC_EXTERNAL.store(raw.min(4095), core::sync::atomic::Ordering::Relaxed);
}

/// Level last written to a GPIO pin (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_gpio_level(pin: i32) -> bool {
    sim::GPIO_SHADOW.load(core::sync::atomic::Ordering::Relaxed) & (1 << pin) != 0
}
