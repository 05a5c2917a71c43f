//! Truncated singular value decomposition over `nalgebra`.

use nalgebra::DMatrix;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Convergence threshold handed to the bidiagonal QR iteration.
const SVD_EPSILON: f64 = 1e-14;

/// Upper bound on QR iterations before giving up.
const MAX_ITERATIONS: usize = 10_000;

/// Singular values below this fraction of the largest one are treated as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Truncated singular value decomposition `M ≈ U Σ Vᵀ`.
#[derive(Debug, Clone, PartialEq)]
pub struct SingularValueDecomposition {
    /// Singular values, largest first.
    pub singular_values: Vec<f64>,
    /// `left[k]` is the k-th left singular vector (one entry per matrix row).
    pub left: Vec<Vec<f64>>,
    /// `right[k]` is the k-th right singular vector (one entry per matrix column).
    pub right: Vec<Vec<f64>>,
}

impl SingularValueDecomposition {
    /// Computes the leading `rank` singular triplets of a dense matrix.
    ///
    /// Triplets are sorted by singular value, largest first. Each one is
    /// oriented so that the largest-magnitude entry of its left vector is
    /// positive (first entry on ties).
    ///
    /// Components beyond the numerical rank of the matrix come back with a
    /// zero singular value and zero vectors.
    ///
    /// # Errors
    /// Returns `DecompositionFailed` for a rank larger than the matrix
    /// supports, or if the iteration does not converge.
    pub fn truncated(matrix: &DMatrix<f64>, rank: usize) -> Result<Self, DomainError> {
        let (rows, columns) = matrix.shape();
        if rank > rows.min(columns) {
            return Err(DomainError::new(
                ErrorCode::DecompositionFailed,
                format!(
                    "Requested rank {} exceeds matrix dimensions {}x{}",
                    rank, rows, columns
                ),
            ));
        }

        let svd = matrix
            .clone()
            .try_svd(true, true, SVD_EPSILON, MAX_ITERATIONS)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DecompositionFailed,
                    format!("SVD did not converge in {} iterations", MAX_ITERATIONS),
                )
            })?;
        let (u, v_t) = match (svd.u, svd.v_t) {
            (Some(u), Some(v_t)) => (u, v_t),
            _ => {
                return Err(DomainError::new(
                    ErrorCode::DecompositionFailed,
                    "SVD did not produce singular vectors",
                ))
            }
        };

        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&i, &j| svd.singular_values[j].total_cmp(&svd.singular_values[i]));

        let largest = order.first().map_or(0.0, |&k| svd.singular_values[k]);
        let floor = RANK_TOLERANCE * largest;

        let mut singular_values = Vec::with_capacity(rank);
        let mut left = Vec::with_capacity(rank);
        let mut right = Vec::with_capacity(rank);

        for &k in order.iter().take(rank) {
            let sigma = svd.singular_values[k];
            if sigma <= floor {
                singular_values.push(0.0);
                left.push(vec![0.0; rows]);
                right.push(vec![0.0; columns]);
                continue;
            }

            let mut u_k: Vec<f64> = u.column(k).iter().copied().collect();
            let mut v_k: Vec<f64> = v_t.row(k).iter().copied().collect();
            if dominant_entry(&u_k) < 0.0 {
                u_k.iter_mut().for_each(|x| *x = -*x);
                v_k.iter_mut().for_each(|x| *x = -*x);
            }

            singular_values.push(sigma);
            left.push(u_k);
            right.push(v_k);
        }

        Ok(Self {
            singular_values,
            left,
            right,
        })
    }
}

/// Returns the entry with the largest magnitude (first one on ties).
fn dominant_entry(vector: &[f64]) -> f64 {
    vector
        .iter()
        .copied()
        .fold(0.0, |best: f64, x| if x.abs() > best.abs() { x } else { best })
}
