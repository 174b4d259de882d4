//! Random forest regression on calendar features

use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, FEATURE_COUNT};
use crate::models::{Regressor, TrainedRegressor, TrainingSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default number of trees in the ensemble
pub const DEFAULT_TREE_COUNT: usize = 100;

/// Default random seed, fixed so repeated fits are bit-for-bit reproducible
pub const DEFAULT_SEED: u64 = 42;

/// Minimum number of samples required to attempt a split
const MIN_SAMPLES_SPLIT: usize = 2;

/// Random forest regressor
///
/// An ensemble of CART regression trees grown on bootstrap resamples of the
/// training set. Each tree draws its resample from its own `StdRng`, seeded
/// deterministically from the forest seed and the tree index, so two fits on
/// identical input produce identical predictions.
#[derive(Debug, Clone)]
pub struct RandomForest {
    /// Name of the model
    name: String,
    /// Number of trees in the ensemble
    tree_count: usize,
    /// Master random seed
    seed: u64,
}

/// Trained random forest model
#[derive(Debug, Clone)]
pub struct TrainedRandomForest {
    /// Name of the model
    name: String,
    /// Grown trees, averaged at prediction time
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Create a forest with the default ensemble size and seed
    pub fn new() -> Self {
        Self {
            name: format!(
                "Random Forest ({} trees, seed {})",
                DEFAULT_TREE_COUNT, DEFAULT_SEED
            ),
            tree_count: DEFAULT_TREE_COUNT,
            seed: DEFAULT_SEED,
        }
    }

    /// Create a forest with an explicit ensemble size and seed
    pub fn with_params(tree_count: usize, seed: u64) -> Result<Self> {
        if tree_count == 0 {
            return Err(ForecastError::InvalidParameter(
                "Tree count must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Random Forest ({} trees, seed {})", tree_count, seed),
            tree_count,
            seed,
        })
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for RandomForest {
    type Trained = TrainedRandomForest;

    fn fit(&self, training: &TrainingSet) -> Result<TrainedRandomForest> {
        if training.is_empty() {
            return Err(ForecastError::DataError(
                "cannot fit on an empty training set".to_string(),
            ));
        }

        let matrix: Vec<[f64; FEATURE_COUNT]> = training
            .features()
            .iter()
            .map(|row| row.to_array())
            .collect();
        let targets = training.targets();
        let sample_count = targets.len();

        let mut trees = Vec::with_capacity(self.tree_count);
        for index in 0..self.tree_count {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(index as u64));
            let sample: Vec<usize> = (0..sample_count)
                .map(|_| rng.gen_range(0..sample_count))
                .collect();
            trees.push(RegressionTree::grow(&matrix, targets, sample));
        }

        Ok(TrainedRandomForest {
            name: self.name.clone(),
            trees,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedRegressor for TrainedRandomForest {
    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<f64>> {
        let predictions = features
            .iter()
            .map(|row| {
                let input = row.to_array();
                let sum: f64 = self.trees.iter().map(|tree| tree.predict_one(&input)).sum();
                sum / self.trees.len() as f64
            })
            .collect();

        Ok(predictions)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A single CART regression tree
#[derive(Debug, Clone)]
struct RegressionTree {
    root: Node,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl RegressionTree {
    /// Grow a tree on the given bootstrap sample of row indices
    fn grow(matrix: &[[f64; FEATURE_COUNT]], targets: &[f64], sample: Vec<usize>) -> Self {
        Self {
            root: grow_node(matrix, targets, sample),
        }
    }

    fn predict_one(&self, input: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if input[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn grow_node(matrix: &[[f64; FEATURE_COUNT]], targets: &[f64], indices: Vec<usize>) -> Node {
    let count = indices.len();
    let mean = indices.iter().map(|&i| targets[i]).sum::<f64>() / count as f64;

    if count < MIN_SAMPLES_SPLIT {
        return Node::Leaf { value: mean };
    }

    let first_target = targets[indices[0]];
    if indices.iter().all(|&i| targets[i] == first_target) {
        return Node::Leaf { value: mean };
    }

    let Some((feature, threshold)) = best_split(matrix, targets, &indices) else {
        return Node::Leaf { value: mean };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| matrix[i][feature] <= threshold);

    // A midpoint threshold between distinct values always separates the
    // sample, so both sides are non-empty.
    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(matrix, targets, left)),
        right: Box::new(grow_node(matrix, targets, right)),
    }
}

/// Find the split minimizing the summed squared error of the two sides
///
/// Candidate thresholds are midpoints between consecutive distinct feature
/// values; evaluation uses prefix sums over the sorted sample. Ties keep the
/// first candidate encountered, which keeps tree growth deterministic.
fn best_split(
    matrix: &[[f64; FEATURE_COUNT]],
    targets: &[f64],
    indices: &[usize],
) -> Option<(usize, f64)> {
    let count = indices.len();
    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();

    let mut best: Option<(f64, usize, f64)> = None;

    for feature in 0..FEATURE_COUNT {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| matrix[a][feature].total_cmp(&matrix[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for position in 1..count {
            let previous = order[position - 1];
            left_sum += targets[previous];
            left_sq += targets[previous] * targets[previous];

            let below = matrix[previous][feature];
            let above = matrix[order[position]][feature];
            if below == above {
                continue;
            }

            let left_count = position as f64;
            let right_count = (count - position) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let score = (left_sq - left_sum * left_sum / left_count)
                + (right_sq - right_sum * right_sum / right_count);

            if best.map_or(true, |(best_score, _, _)| score < best_score) {
                best = Some((score, feature, (below + above) / 2.0));
            }
        }
    }

    best.map(|(_, feature, threshold)| (feature, threshold))
}
