//! Diagnostic log of recent raw external-sensor samples.
//!
//! Independent of the smoothing filter: every raw thermistor code is
//! recorded here so a remote client can fetch the unfiltered waveform
//! (the sensor samples at 10 Hz, so 2000 samples ≈ 200 seconds of
//! history between downloads). Reads are destructive: `drain` hands the
//! pending samples over and resets the buffer.

/// Capacity of the sample log.
pub const REPORT_LOG_CAPACITY: usize = 2000;

/// Fixed-capacity circular store of raw ADC codes.
pub struct ReportBuffer {
    data: [u16; REPORT_LOG_CAPACITY],
    /// Next write slot.
    head: usize,
    /// Number of valid samples (saturates at capacity).
    len: usize,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self {
            data: [0; REPORT_LOG_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    /// Append one raw sample, discarding the oldest on overflow.
    pub fn record(&mut self, raw: u16) {
        self.data[self.head] = raw;
        self.head = (self.head + 1) % REPORT_LOG_CAPACITY;
        if self.len < REPORT_LOG_CAPACITY {
            self.len += 1;
        }
    }

    /// Number of samples currently pending.
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Copy pending samples into `out` (oldest first, little-endian u16
    /// per sample), then reset the buffer to empty.
    ///
    /// Returns the number of bytes written, which may be less than
    /// `out.len()` when fewer samples were pending. Samples that do not
    /// fit in `out` are discarded by the reset.
    pub fn drain(&mut self, out: &mut [u8]) -> usize {
        let n = self.len.min(out.len() / 2);
        let start = (self.head + REPORT_LOG_CAPACITY - self.len) % REPORT_LOG_CAPACITY;
        for i in 0..n {
            let sample = self.data[(start + i) % REPORT_LOG_CAPACITY];
            out[i * 2..i * 2 + 2].copy_from_slice(&sample.to_le_bytes());
        }
        self.head = 0;
        self.len = 0;
        n * 2
    }
}

impl Default for ReportBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_recorded_samples_in_order() {
        let mut buf = ReportBuffer::new();
        buf.record(1);
        buf.record(2);
        buf.record(0x1234);

        let mut out = [0u8; 16];
        let n = buf.drain(&mut out);
        assert_eq!(n, 6);
        assert_eq!(&out[..6], &[1, 0, 2, 0, 0x34, 0x12]);
    }

    #[test]
    fn drain_is_destructive() {
        let mut buf = ReportBuffer::new();
        buf.record(42);
        let mut out = [0u8; 8];
        assert_eq!(buf.drain(&mut out), 2);
        assert_eq!(buf.pending(), 0);
        assert_eq!(buf.drain(&mut out), 0);
    }

    #[test]
    fn overflow_discards_oldest() {
        let mut buf = ReportBuffer::new();
        for i in 0..(REPORT_LOG_CAPACITY + 3) {
            buf.record(i as u16);
        }
        assert_eq!(buf.pending(), REPORT_LOG_CAPACITY);

        let mut out = vec![0u8; REPORT_LOG_CAPACITY * 2];
        let n = buf.drain(&mut out);
        assert_eq!(n, REPORT_LOG_CAPACITY * 2);
        // Oldest surviving sample is index 3.
        assert_eq!(u16::from_le_bytes([out[0], out[1]]), 3);
    }

    #[test]
    fn small_output_buffer_truncates() {
        let mut buf = ReportBuffer::new();
        for i in 0..10 {
            buf.record(i);
        }
        let mut out = [0u8; 5]; // room for two whole samples
        let n = buf.drain(&mut out);
        assert_eq!(n, 4);
        assert_eq!(u16::from_le_bytes([out[0], out[1]]), 0);
        assert_eq!(u16::from_le_bytes([out[2], out[3]]), 1);
        // Truncated samples are gone with the reset.
        assert_eq!(buf.pending(), 0);
    }
}
