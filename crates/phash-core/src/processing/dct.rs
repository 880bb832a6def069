//! Two-dimensional DCT-II over the working grid.
//!
//! `F(u,v) = c[u]·c[v]/4 · Σᵢ Σⱼ f(i,j) · cos((2i+1)uπ / 2N) · cos((2j+1)vπ / 2N)`
//! with `c[0] = 1/√2` and `c[k>0] = 1`.
//!
//! The direct double sum is what fingerprints are defined against. Thresholding is sensitive
//! to drift near the mean, so the fast transform is only used when explicitly selected.

use ndarray::{Array2, Axis};
use rustdct::{DctPlanner, TransformType2And3};
use std::f64::consts::PI;
use std::sync::Arc;

use super::{WorkingGrid, WORKING_SIZE};

/// Real-valued DCT coefficients indexed `(u, v)`, `(0, 0)` is the DC term
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid(Array2<f64>);

impl FrequencyGrid {
    /// Build a grid by evaluating `f(u, v)` for every coefficient
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self(Array2::from_shape_fn(
            (WORKING_SIZE, WORKING_SIZE),
            |(u, v)| f(u, v),
        ))
    }

    /// Coefficient at frequency pair `(u, v)`
    pub fn get(&self, u: usize, v: usize) -> f64 {
        self.0[[u, v]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.0
    }
}

/// Scaling constants and cosine basis, built once and read-only afterwards
#[derive(Debug, Clone)]
pub struct DctTable {
    coefficients: [f64; WORKING_SIZE],
    // cosines[[k, n]] = cos(((2n+1) / 2N) · k · π)
    cosines: Array2<f64>,
}

impl DctTable {
    pub fn new() -> Self {
        let mut coefficients = [1.0; WORKING_SIZE];
        coefficients[0] = 1.0 / 2.0f64.sqrt();

        let n = WORKING_SIZE as f64;
        let cosines = Array2::from_shape_fn((WORKING_SIZE, WORKING_SIZE), |(k, i)| {
            (((2 * i + 1) as f64 / (2.0 * n)) * k as f64 * PI).cos()
        });

        Self {
            coefficients,
            cosines,
        }
    }

    /// Orthonormality scaling constant `c[k]`
    pub fn coefficient(&self, k: usize) -> f64 {
        self.coefficients[k]
    }

    /// Cosine basis value for frequency `k` at sample position `n`
    pub fn cosine(&self, k: usize, n: usize) -> f64 {
        self.cosines[[k, n]]
    }

    /// Direct O(N⁴) transform
    pub fn apply(&self, grid: &WorkingGrid) -> FrequencyGrid {
        let f = grid.as_array();
        let mut output = Array2::zeros((WORKING_SIZE, WORKING_SIZE));

        for u in 0..WORKING_SIZE {
            for v in 0..WORKING_SIZE {
                let mut sum = 0.0;
                for i in 0..WORKING_SIZE {
                    for j in 0..WORKING_SIZE {
                        sum += self.cosines[[u, i]] * self.cosines[[v, j]] * f[[i, j]];
                    }
                }
                sum *= (self.coefficients[u] * self.coefficients[v]) / 4.0;
                output[[u, v]] = sum;
            }
        }

        FrequencyGrid(output)
    }
}

impl Default for DctTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Separable fast DCT-II with the same scaling as [`DctTable::apply`]
#[derive(Clone)]
pub struct FastDct {
    dct: Arc<dyn TransformType2And3<f64>>,
}

impl FastDct {
    pub fn new() -> Self {
        let mut planner = DctPlanner::new();
        Self {
            dct: planner.plan_dct2(WORKING_SIZE),
        }
    }

    pub fn apply(&self, grid: &WorkingGrid, table: &DctTable) -> FrequencyGrid {
        let mut data = grid.as_array().clone();
        let mut scratch = vec![0.0; self.dct.get_scratch_len()];
        let mut line = vec![0.0; WORKING_SIZE];

        // Transform along j for every i, then along i for every v
        for lane_axis in [Axis(1), Axis(0)] {
            for mut lane in data.lanes_mut(lane_axis) {
                for (dst, src) in line.iter_mut().zip(lane.iter()) {
                    *dst = *src;
                }
                self.dct.process_dct2_with_scratch(&mut line, &mut scratch);
                for (dst, src) in lane.iter_mut().zip(line.iter()) {
                    *dst = *src;
                }
            }
        }

        for ((u, v), value) in data.indexed_iter_mut() {
            *value *= (table.coefficient(u) * table.coefficient(v)) / 4.0;
        }

        FrequencyGrid(data)
    }
}

impl Default for FastDct {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FastDct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastDct")
            .field("len", &WORKING_SIZE)
            .finish()
    }
}
