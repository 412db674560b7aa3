use crate::embedder::VectorSpace;
use domain::models::{Cluster, ClusterAssignment};
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use shared::error::SemanticMapError;
use shared::types::Result;

pub const CLUSTER_COUNT: usize = 3;
pub const CLUSTER_SEED: u64 = 42;
pub const LABEL_TERMS: usize = 3;

/// K-means over the full TF-IDF space with a fixed seed.
pub struct Clusterer {
    k: usize,
    seed: u64,
}

impl Default for Clusterer {
    fn default() -> Self {
        Self::new(CLUSTER_COUNT, CLUSTER_SEED)
    }
}

impl Clusterer {
    pub fn new(k: usize, seed: u64) -> Self {
        Self { k, seed }
    }

    /// Assigns every response to a cluster and labels each cluster with its
    /// heaviest centroid terms joined by `separator`. Duplicate responses are
    /// fine; a cluster may end up empty.
    pub fn cluster(&self, space: &VectorSpace, separator: &str) -> Result<ClusterAssignment> {
        let n = space.n_documents();
        if self.k == 0 {
            return Err(SemanticMapError::config("cluster count must be greater than zero"));
        }
        if n < self.k {
            return Err(SemanticMapError::config(format!(
                "{} clusters need at least {} samples, got {}",
                self.k, self.k, n
            )));
        }
        let rng = Xoshiro256Plus::seed_from_u64(self.seed);
        let dataset = DatasetBase::from(space.matrix.clone());
        let model = KMeans::params_with_rng(self.k, rng)
            .max_n_iterations(300)
            .tolerance(1e-4)
            .fit(&dataset)
            .map_err(|e| SemanticMapError::data(format!("K-means failed: {}", e)))?;

        let assignments: Vec<usize> = model.predict(&space.matrix).to_vec();
        let centroids = model.centroids();

        let mut clusters = Vec::with_capacity(self.k);
        for (id, centroid) in centroids.rows().into_iter().enumerate() {
            // Heaviest first; equal weights put the later vocabulary term first.
            let mut ranked: Vec<usize> = (0..centroid.len()).collect();
            ranked.sort_by(|&a, &b| centroid[b].total_cmp(&centroid[a]).then(b.cmp(&a)));
            let terms: Vec<String> = ranked
                .into_iter()
                .take(LABEL_TERMS)
                .map(|j| space.vocabulary[j].clone())
                .collect();
            clusters.push(Cluster {
                id,
                label: terms.join(separator),
                terms,
                count: assignments.iter().filter(|&&a| a == id).count(),
            });
        }

        tracing::debug!(
            k = self.k,
            sizes = ?clusters.iter().map(|c| c.count).collect::<Vec<_>>(),
            "clustered responses"
        );
        Ok(ClusterAssignment {
            assignments,
            clusters,
        })
    }
}
