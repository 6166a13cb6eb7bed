//! Deterministic input generation
//!
//! All synthetic workload inputs come from one seeded generator, so a
//! given seed reproduces the same matrices and integer lists for the same
//! sequence of calls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::bench::matrix::Matrix;

/// Lower/upper bound of generated matrix entries
pub const MATRIX_VALUE_RANGE: (f64, f64) = (-1.0, 1.0);
/// Lower/upper bound of generated list integers
pub const INTEGER_VALUE_RANGE: (i64, i64) = (-1000, 1000);

/// Seeded source of benchmark inputs
#[derive(Debug, Clone)]
pub struct InputGenerator {
    seed: u64,
    rng: StdRng,
}

impl InputGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// rows x cols matrix of independent uniform reals in [-1, 1], drawn row by row
    pub fn matrix(&mut self, rows: usize, cols: usize) -> Matrix {
        let (low, high) = MATRIX_VALUE_RANGE;
        let data = (0..rows)
            .map(|_| (0..cols).map(|_| self.rng.gen_range(low..=high)).collect())
            .collect();
        Matrix::from_rows_unchecked(data, cols)
    }

    /// n independent uniform integers in [-1000, 1000]
    pub fn integers(&mut self, n: usize) -> Vec<i64> {
        let (low, high) = INTEGER_VALUE_RANGE;
        (0..n).map(|_| self.rng.gen_range(low..=high)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = InputGenerator::new(42);
        let mut b = InputGenerator::new(42);

        assert_eq!(a.matrix(4, 3), b.matrix(4, 3));
        assert_eq!(a.integers(50), b.integers(50));
        assert_eq!(a.matrix(2, 2), b.matrix(2, 2));
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = InputGenerator::new(1);
        let mut b = InputGenerator::new(2);
        assert_ne!(a.integers(64), b.integers(64));
    }

    #[test]
    fn test_matrix_shape_and_range() {
        let mut gen = InputGenerator::new(7);
        let m = gen.matrix(5, 8);
        assert_eq!(m.rows(), 5);
        assert_eq!(m.cols(), 8);
        for row in m.as_rows() {
            assert_eq!(row.len(), 8);
            for &v in row {
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_integers_range() {
        let mut gen = InputGenerator::new(7);
        let values = gen.integers(5000);
        assert_eq!(values.len(), 5000);
        assert!(values.iter().all(|v| (-1000..=1000).contains(v)));
        // 5000 draws from 2001 values should not all be equal
        assert!(values.iter().any(|&v| v != values[0]));
    }

    #[test]
    fn test_empty_inputs() {
        let mut gen = InputGenerator::new(7);
        assert!(gen.integers(0).is_empty());
        assert!(gen.matrix(0, 0).is_empty());
    }
}
