//! Halton low-discrepancy sequence.
//!
//! Dimension `k` uses the `k`-th prime as its radical-inverse base. The
//! sequence starts at index 1 so no coordinate is ever exactly zero, which
//! keeps the inverse normal transform finite.
//!
//! Unscrambled high-base coordinates are nearly collinear for the first
//! `base` points. [`HaltonSequence::scrambled`] applies a seeded random digit
//! permutation per dimension to break that correlation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Interface for low-discrepancy point sets on the unit hypercube.
pub trait LowDiscrepancySequence {
    /// Number of coordinates per point.
    fn dimension(&self) -> usize;

    /// Advances to and returns the next point, each coordinate in (0, 1).
    fn next_point(&mut self) -> &[f64];

    /// Restarts the sequence.
    fn reset(&mut self);

    /// Skips `n` points.
    fn skip(&mut self, n: usize);
}

/// Halton sequence of arbitrary dimension.
///
/// # Examples
/// ```
/// use pricer_pricing::rng::{HaltonSequence, LowDiscrepancySequence};
///
/// let mut seq = HaltonSequence::new(2);
/// assert_eq!(seq.next_point(), &[0.5, 1.0 / 3.0]);
/// assert_eq!(seq.next_point(), &[0.25, 2.0 / 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct HaltonSequence {
    bases: Vec<u64>,
    // Digit permutation per dimension; identity when unscrambled.
    permutations: Vec<Vec<u64>>,
    index: u64,
    point: Vec<f64>,
}

impl HaltonSequence {
    /// Creates a sequence with `dimension` coordinates (at least one).
    pub fn new(dimension: usize) -> Self {
        let bases = first_primes(dimension.max(1));
        let permutations = bases.iter().map(|&b| (0..b).collect()).collect();
        Self::with_permutations(bases, permutations)
    }

    /// Creates a sequence whose digits are permuted per dimension by a
    /// permutation drawn from `seed`.
    ///
    /// One permutation of `0..base` is stored per dimension, so memory grows
    /// with the sum of the first `dimension` primes.
    ///
    /// ```
    /// use pricer_pricing::rng::{HaltonSequence, LowDiscrepancySequence};
    ///
    /// let mut a = HaltonSequence::scrambled(100, 7);
    /// let mut b = HaltonSequence::scrambled(100, 7);
    /// assert_eq!(a.next_point(), b.next_point());
    /// assert!(a.next_point().iter().all(|&u| u > 0.0 && u < 1.0));
    /// ```
    pub fn scrambled(dimension: usize, seed: u64) -> Self {
        let bases = first_primes(dimension.max(1));
        let mut rng = StdRng::seed_from_u64(seed);
        let permutations = bases
            .iter()
            .map(|&b| {
                let mut digits: Vec<u64> = (0..b).collect();
                digits.shuffle(&mut rng);
                digits
            })
            .collect();
        Self::with_permutations(bases, permutations)
    }

    fn with_permutations(bases: Vec<u64>, permutations: Vec<Vec<u64>>) -> Self {
        let dimension = bases.len();
        Self {
            bases,
            permutations,
            index: 0,
            point: vec![0.0; dimension],
        }
    }

    /// Index of the most recently returned point.
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl LowDiscrepancySequence for HaltonSequence {
    fn dimension(&self) -> usize {
        self.bases.len()
    }

    fn next_point(&mut self) -> &[f64] {
        self.index += 1;
        let dims = self.bases.iter().zip(&self.permutations);
        for (slot, (&base, digits)) in self.point.iter_mut().zip(dims) {
            *slot = permuted_radical_inverse(self.index, base, digits);
        }
        &self.point
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn skip(&mut self, n: usize) {
        self.index += n as u64;
    }
}

/// Van der Corput radical inverse of `index` in `base`.
#[inline]
pub fn radical_inverse(index: u64, base: u64) -> f64 {
    let inv_base = 1.0 / base as f64;
    let mut result = 0.0;
    let mut f = inv_base;
    let mut i = index;
    while i > 0 {
        result += f * (i % base) as f64;
        i /= base;
        f *= inv_base;
    }
    result
}

/// Radical inverse of `index` with each base-`base` digit `d` replaced by
/// `digits[d]`.
///
/// The infinite run of leading zero digits contributes the geometric tail
/// `digits[0] / (base - 1)` scaled past the last significant digit.
#[inline]
pub fn permuted_radical_inverse(index: u64, base: u64, digits: &[u64]) -> f64 {
    let inv_base = 1.0 / base as f64;
    let mut result = 0.0;
    let mut f = inv_base;
    let mut i = index;
    while i > 0 {
        result += f * digits[(i % base) as usize] as f64;
        i /= base;
        f *= inv_base;
    }
    result + f * digits[0] as f64 / (1.0 - inv_base)
}

fn first_primes(count: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    let mut candidate = 2u64;
    while primes.len() < count {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}
