//! Principal-component projection to three display axes.
//!
//! The N x N Gram matrix of the centred data is decomposed instead of the
//! V x V covariance, since N is small and V is the vocabulary size. Its
//! eigenvectors scaled by the square roots of their eigenvalues are the
//! principal-component scores.

use crate::embedder::VectorSpace;
use domain::models::ProjectedPoints;
use linfa_linalg::eigh::Eigh;
use ndarray::{Array1, Array2, Axis};
use shared::error::SemanticMapError;
use shared::types::Result;

pub const PROJECTION_DIMS: usize = 3;

/// Eigenvalues below this fraction of the largest are treated as zero.
const RELATIVE_EIGEN_FLOOR: f64 = 1e-10;

pub struct Reducer;

impl Reducer {
    /// Projects every row of `space` onto its top three principal components.
    /// Components beyond the rank of the data come out as zeros.
    pub fn project(space: &VectorSpace) -> Result<ProjectedPoints> {
        let n = space.n_documents();
        if n < PROJECTION_DIMS {
            return Err(SemanticMapError::config(format!(
                "a {}-component projection needs at least {} samples, got {}",
                PROJECTION_DIMS, PROJECTION_DIMS, n
            )));
        }

        let mean = space
            .matrix
            .mean_axis(Axis(0))
            .ok_or_else(|| SemanticMapError::data("cannot centre an empty matrix"))?;
        let centred = &space.matrix - &mean;
        let gram = centred.dot(&centred.t());

        let (eigenvalues, eigenvectors) = gram
            .eigh()
            .map_err(|e| SemanticMapError::data(format!("eigen-decomposition failed: {}", e)))?;
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

        let floor = eigenvalues[order[0]].max(0.0) * RELATIVE_EIGEN_FLOOR;

        let mut points = vec![[0.0; PROJECTION_DIMS]; n];
        for (component, &k) in order.iter().take(PROJECTION_DIMS).enumerate() {
            let lambda = eigenvalues[k];
            if lambda <= floor {
                continue;
            }
            let u: Array1<f64> = eigenvectors.column(k).to_owned();
            let sign = loading_sign(&centred, &u);
            let scale = lambda.sqrt() * sign;
            for (i, point) in points.iter_mut().enumerate() {
                point[component] = u[i] * scale;
            }
        }

        Ok(ProjectedPoints { points })
    }
}

/// Sign that makes the largest-magnitude loading of the component positive,
/// so the projection does not flip between otherwise identical runs.
fn loading_sign(centred: &Array2<f64>, u: &Array1<f64>) -> f64 {
    let loadings = centred.t().dot(u);
    let largest = loadings
        .iter()
        .copied()
        .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
    if largest < 0.0 {
        -1.0
    } else {
        1.0
    }
}
