//! Random-source seam for the simulated endpoints.
//!
//! Handlers never call `rand` directly; they draw through `RandomSource` so
//! tests can substitute a fixed sequence.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Largest f64 strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    /// Next uniform sample in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Uniform sample in `[lo, hi]`.
    fn uniform(&self, lo: f64, hi: f64) -> f64 {
        let u = self.next_unit();
        (lo + u * (hi - lo)).clamp(lo.min(hi), hi.max(lo))
    }
}

/// Production source backed by the thread-local `rand` generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Deterministic source that cycles through a fixed list of samples.
///
/// Samples are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        let samples = samples
            .into()
            .into_iter()
            .map(|s| if s.is_nan() { 0.0 } else { s.clamp(0.0, BELOW_ONE) })
            .collect();
        Self {
            samples,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Script that always yields the same sample.
    pub fn constant(sample: f64) -> Self {
        Self::new(vec![sample])
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.samples[i % self.samples.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_unit_interval() {
        let r = ThreadRandom;
        for _ in 0..10_000 {
            let u = r.next_unit();
            assert!((0.0..1.0).contains(&u), "u={u}");
        }
    }

    #[test]
    fn uniform_maps_endpoints() {
        let low = ScriptedRandom::constant(0.0);
        assert_eq!(low.uniform(10.0, 80.0), 10.0);

        let high = ScriptedRandom::constant(1.0);
        let v = high.uniform(10.0, 80.0);
        assert!(v <= 80.0 && v > 79.999, "v={v}");

        let mid = ScriptedRandom::constant(0.5);
        assert_eq!(mid.uniform(30.0, 70.0), 50.0);
    }

    #[test]
    fn scripted_cycles_and_counts() {
        let r = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(r.next_unit(), 0.1);
        assert_eq!(r.next_unit(), 0.9);
        assert_eq!(r.next_unit(), 0.1);
        assert_eq!(r.draws(), 3);
    }

    #[test]
    fn scripted_clamps_out_of_range_samples() {
        let r = ScriptedRandom::new(vec![-3.0, 7.0, f64::NAN]);
        assert_eq!(r.next_unit(), 0.0);
        assert!(r.next_unit() < 1.0);
        assert_eq!(r.next_unit(), 0.0);
    }

    #[test]
    fn empty_script_yields_zero() {
        let r = ScriptedRandom::default();
        assert_eq!(r.next_unit(), 0.0);
    }
}
