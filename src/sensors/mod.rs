//! Temperature sensing pipeline: raw samples → smoothed sums →
//! calibrated Celsius, plus the raw-sample diagnostic log.
//!
//! [`TemperatureSensors`] owns one [`SampleFilter`](filter::SampleFilter)
//! per channel and the external-channel [`ReportBuffer`]. The controller
//! calls [`update`](TemperatureSensors::update) once per tick and reads
//! the converted values back.

pub mod convert;
pub mod filter;
pub mod report_log;

use crate::app::ports::{SensorChannel, TemperatureSourcePort};
use filter::{HISTORY_SIZE, SampleFilter};
use report_log::ReportBuffer;

/// Both sensor channels plus the diagnostic sample log.
pub struct TemperatureSensors {
    internal: SampleFilter,
    external: SampleFilter,
    log: ReportBuffer,
}

impl TemperatureSensors {
    /// Build the pipeline and pre-fill both filters with the live sensor
    /// value, so the first reported average is not biased toward zero.
    pub fn prime(source: &mut impl TemperatureSourcePort) -> Self {
        let mut sensors = Self {
            internal: SampleFilter::new(),
            external: SampleFilter::new(),
            log: ReportBuffer::new(),
        };
        for _ in 0..HISTORY_SIZE {
            sensors.update(source);
        }
        sensors
    }

    /// Pull one raw sample per channel and fold it into the filters.
    /// External samples are additionally recorded in the diagnostic log.
    pub fn update(&mut self, source: &mut impl TemperatureSourcePort) {
        self.internal.push(source.read(SensorChannel::Internal));
        let raw_external = source.read(SensorChannel::External);
        self.external.push(raw_external);
        self.log.record(raw_external);
    }

    /// Calibrated die temperature.
    pub fn internal_celsius(&self) -> f32 {
        convert::internal_celsius(self.internal.sum())
    }

    /// Calibrated (saturating) thermistor temperature.
    pub fn external_celsius(&self) -> f32 {
        convert::external_celsius(self.external.sum())
    }

    /// Destructive read of the raw external-sample log.
    /// See [`ReportBuffer::drain`].
    pub fn drain_log(&mut self, out: &mut [u8]) -> usize {
        self.log.drain(out)
    }

    /// Number of raw samples pending in the diagnostic log.
    pub fn pending_log_samples(&self) -> usize {
        self.log.pending()
    }
}
