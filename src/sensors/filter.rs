//! Fixed-length moving-sum filter for raw ADC samples.
//!
//! A ring of the last [`HISTORY_SIZE`] samples plus a running total.
//! Each push evicts the oldest sample and adjusts the total, so the
//! smoothed aggregate is O(1) per sample with no per-read summation.
//!
//! Downstream conversion works directly on the sum (not the mean) to
//! avoid a premature division; see [`crate::sensors::convert`].

/// Number of samples averaged per sensor channel.
pub const HISTORY_SIZE: usize = 100;

/// Ring buffer of recent raw samples with a running sum.
///
/// Invariant: `total` always equals the sum of `data`.
#[derive(Debug, Clone)]
pub struct SampleFilter {
    data: [i16; HISTORY_SIZE],
    index: usize,
    total: i32,
}

impl SampleFilter {
    /// Empty filter (all samples zero).
    ///
    /// A freshly constructed filter reports a zero-biased sum until it
    /// has been primed; callers should push `HISTORY_SIZE` readings of
    /// the live sensor value before trusting the aggregate.
    pub fn new() -> Self {
        Self {
            data: [0; HISTORY_SIZE],
            index: 0,
            total: 0,
        }
    }

    /// Absorb one raw sample and return the updated smoothed sum.
    ///
    /// `raw` is a 12-bit ADC code; the ADC's native range bounds it, so
    /// no separate validation happens here.
    pub fn push(&mut self, raw: u16) -> i32 {
        let new = raw as i16;
        let old = self.data[self.index];
        self.data[self.index] = new;
        self.total += i32::from(new) - i32::from(old);
        self.index += 1;
        if self.index >= HISTORY_SIZE {
            self.index = 0;
        }
        self.total
    }

    /// Current smoothed sum over the last [`HISTORY_SIZE`] samples.
    pub fn sum(&self) -> i32 {
        self.total
    }
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self::new()
    }
}
