//! Test RNGs — deterministic `DeterministicRng` implementations.

use roulette_core::rng::DeterministicRng;

/// Always returns `min` from `next_u32_range` and `0.0` from `next_f64`.
///
/// With the default joker probability every spin under this RNG is a joker
/// round, and every pair draw picks the same participant twice, so pair
/// sampling always exhausts its budget.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// Returns values from predetermined sequences. Panics when a sequence is
/// exhausted, so a test that scripts too few draws fails loudly.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    floats: Vec<f64>,
    float_index: usize,
}

impl SequenceRng {
    /// Scripts the integer draws. `next_f64` panics unless floats are added
    /// with [`SequenceRng::with_floats`].
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            index: 0,
            floats: Vec::new(),
            float_index: 0,
        }
    }

    /// Scripts the float draws (joker rolls).
    #[must_use]
    pub fn with_floats(mut self, floats: Vec<f64>) -> Self {
        self.floats = floats;
        self
    }

    /// Number of integer draws consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        let val = self.floats[self.float_index];
        self.float_index += 1;
        val
    }
}

/// Walks every range with a shared counter: the n-th integer draw returns
/// `min + n % (max - min + 1)`. Two consecutive draws over the same roster
/// therefore never pick the same index twice, which keeps pair sampling on
/// its first attempt. `next_f64` returns the configured constant.
#[derive(Debug)]
pub struct CyclingRng {
    counter: u64,
    float: f64,
}

impl CyclingRng {
    /// Creates a cycling RNG whose joker rolls always return `float`.
    #[must_use]
    pub fn new(float: f64) -> Self {
        Self { counter: 0, float }
    }

    /// A cycling RNG that never rolls a joker at the default probability.
    #[must_use]
    pub fn standard_only() -> Self {
        Self::new(0.99)
    }
}

impl DeterministicRng for CyclingRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            self.counter += 1;
            return min;
        }
        let span = u64::from(max - min) + 1;
        let offset = self.counter % span;
        self.counter += 1;
        min + u32::try_from(offset).unwrap_or(0)
    }

    fn next_f64(&mut self) -> f64 {
        self.float
    }
}
