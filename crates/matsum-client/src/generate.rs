//! Random test-data matrices for submissions.
//!
//! Values are drawn uniformly from the configured half-open range. The
//! thread-local RNG is seeded by the OS once per thread, not per call, so
//! rapid successive `send_<N>` commands still produce independent data.

use std::ops::Range;

use rand::Rng;

use matsum_core::Matrix;

/// Generates one N×N matrix with values uniform in `range`.
///
/// `range` must be non-empty; config validation enforces that before any
/// command can run.
pub fn random_matrix(size: u32, range: Range<u32>) -> Matrix {
    let mut rng = rand::thread_rng();
    Matrix::from_fn(size, |_, _| rng.gen_range(range.clone()))
}

/// Generates the two equally-sized matrices of one submission.
pub fn random_pair(size: u32, range: Range<u32>) -> (Matrix, Matrix) {
    (
        random_matrix(size, range.clone()),
        random_matrix(size, range),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
