//! Square convolution kernels and their cache.
//!
//! Kernels are a pure function of [`KernelKind`], so a [`KernelCache`]
//! builds each one at most once.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{RasterError, Result};

/// Largest accepted binomial kernel. Its divisor, `4^(N-1)`, is the last
/// one that fits in an `i64`.
pub const MAX_KERNEL_SIZE: usize = 31;

/// Weight row of the 5x5 Bartlett (pyramid) kernel.
const BARTLETT_ROW: [i64; 5] = [1, 2, 3, 2, 1];
/// Weight row of the fixed 5x5 Gaussian kernel.
const GAUSSIAN_ROW: [i64; 5] = [1, 4, 6, 4, 1];

/// Which kernel to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// 5x5, all ones.
    Box,
    /// 5x5, outer product of `[1, 2, 3, 2, 1]`.
    Bartlett,
    /// 5x5, outer product of `[1, 4, 6, 4, 1]`.
    Gaussian,
    /// NxN binomial kernel; N must be odd.
    GaussianN(usize),
    /// Impulse minus Bartlett blur (high pass).
    Edge,
    /// Twice the impulse minus Bartlett blur (unsharp mask).
    Enhance,
}

/// An NxN integer kernel and the divisor applied to each weighted sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKernel {
    size: usize,
    weights: Vec<i64>,
    divisor: i64,
}

impl FilterKernel {
    /// Outer product of `row` with itself, normalized by its own sum.
    pub fn separable(row: &[i64]) -> Self {
        let weights: Vec<i64> = row
            .iter()
            .flat_map(|&a| row.iter().map(move |&b| a * b))
            .collect();
        let divisor = weights.iter().sum();
        Self {
            size: row.len(),
            weights,
            divisor,
        }
    }

    pub fn build(kind: KernelKind) -> Result<Self> {
        match kind {
            KernelKind::Box => Ok(Self::separable(&[1; 5])),
            KernelKind::Bartlett => Ok(Self::separable(&BARTLETT_ROW)),
            KernelKind::Gaussian => Ok(Self::separable(&GAUSSIAN_ROW)),
            KernelKind::GaussianN(n) => Self::binomial(n),
            KernelKind::Edge => Ok(Self::high_pass(1)),
            KernelKind::Enhance => Ok(Self::high_pass(2)),
        }
    }

    /// NxN kernel with `kernel[i][j] = C(N-1, i) * C(N-1, j)`.
    pub fn binomial(n: usize) -> Result<Self> {
        if n == 0 || n % 2 == 0 {
            return Err(RasterError::InvalidKernelSize(n));
        }
        if n > MAX_KERNEL_SIZE {
            return Err(RasterError::KernelTooLarge {
                size: n,
                max: MAX_KERNEL_SIZE,
            });
        }
        let row: Vec<i64> = (0..n).map(|i| binomial_coefficient(n - 1, i)).collect();
        Ok(Self::separable(&row))
    }

    /// `bartlett_sum * center * impulse - bartlett`, divided by the
    /// Bartlett sum.
    ///
    /// `center = 1` gives a zero-sum edge detector, `center = 2` an
    /// unsharp mask whose weights sum to the divisor.
    pub fn high_pass(center: i64) -> Self {
        let bartlett = Self::separable(&BARTLETT_ROW);
        let mid = bartlett.size / 2;
        let mut weights: Vec<i64> = bartlett.weights.iter().map(|&w| -w).collect();
        weights[mid * bartlett.size + mid] += bartlett.divisor * center;
        Self {
            size: bartlett.size,
            weights,
            divisor: bartlett.divisor,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center tap to the edge.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn divisor(&self) -> i64 {
        self.divisor
    }

    /// Weight at row `i`, column `j`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> i64 {
        self.weights[i * self.size + j]
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    pub fn weight_sum(&self) -> i64 {
        self.weights.iter().sum()
    }
}

/// `C(n, k)` by the multiplicative formula.
fn binomial_coefficient(n: usize, k: usize) -> i64 {
    let mut result: i64 = 1;
    for i in 1..=k as i64 {
        result = result * (n as i64 - i + 1) / i;
    }
    result
}

/// Memoized kernels keyed by kind.
#[derive(Debug, Default)]
pub struct KernelCache {
    kernels: HashMap<KernelKind, Arc<FilterKernel>>,
}

impl KernelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the kernel for `kind`, building it on first use.
    pub fn get(&mut self, kind: KernelKind) -> Result<Arc<FilterKernel>> {
        if let Some(kernel) = self.kernels.get(&kind) {
            return Ok(Arc::clone(kernel));
        }
        let kernel = Arc::new(FilterKernel::build(kind)?);
        tracing::debug!(
            ?kind,
            size = kernel.size(),
            divisor = kernel.divisor(),
            "Built convolution kernel"
        );
        self.kernels.insert(kind, Arc::clone(&kernel));
        Ok(kernel)
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}
