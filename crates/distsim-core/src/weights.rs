//! # Weight Normalization
//!
//! Master lists carry nominal importance weights that rarely sum to exactly
//! one. `normalize` turns them into a probability distribution, `validate`
//! reports how far a list is from one, and `WeightedSampler` draws from a
//! normalized list.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{DistSimError, Result};

/// Tolerance used when normalizing.
pub const NORMALIZE_TOLERANCE: f64 = 0.03;

/// Tolerance used when only validating.
pub const VALIDATE_TOLERANCE: f64 = 0.02;

/// Divide each weight by the total.
///
/// Fails on a zero total or on any negative or non-finite weight. A total
/// outside `1.0 ± tolerance` is logged and renormalized anyway.
pub fn normalize(entity: &str, weights: &[f64], tolerance: f64) -> Result<Vec<f64>> {
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(DistSimError::InvalidWeight {
                entity: entity.to_string(),
                index,
                weight,
            });
        }
    }

    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return Err(DistSimError::ZeroWeightSum {
            entity: entity.to_string(),
        });
    }

    if (total - 1.0).abs() > tolerance {
        warn!(entity, total, tolerance, "weights do not sum to 1, renormalizing");
    }

    Ok(weights.iter().map(|w| w / total).collect())
}

/// Report whether `weights` sum to one within `tolerance`. Never fails.
pub fn validate(entity: &str, weights: &[f64], tolerance: f64) -> bool {
    let total: f64 = weights.iter().sum();
    let ok = (total - 1.0).abs() <= tolerance;
    if ok {
        debug!(entity, total, "weights validated");
    } else {
        warn!(entity, total, tolerance, "weights do not sum to 1");
    }
    ok
}

/// Weighted categorical sampler over a fixed set of items.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    items: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T> WeightedSampler<T> {
    /// Build from `(item, weight)` pairs. Weights are normalized first, so any
    /// positive scale works.
    pub fn new(entity: &str, pairs: Vec<(T, f64)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(DistSimError::EmptyPool {
                table: entity.to_string(),
                pool: "weighted items".to_string(),
            });
        }
        let (items, raw): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();
        let probabilities = normalize(entity, &raw, f64::INFINITY)?;
        let index = WeightedIndex::new(&probabilities).map_err(|e| DistSimError::Other(format!(
            "cannot build sampler for '{}': {}",
            entity, e
        )))?;
        Ok(Self { items, index })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[self.index.sample(rng)]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_normalize_simple() {
        let out = normalize("t", &[1.0, 1.0, 2.0], NORMALIZE_TOLERANCE).unwrap();
        assert_eq!(out, vec![0.25, 0.25, 0.5]);
    }

    #[test]
    fn test_normalize_sums_to_one_at_any_scale() {
        for scale in [1e-6, 0.3, 1.0, 17.0, 1e9] {
            let raw: Vec<f64> = [0.29, 0.171, 0.008, 0.09, 0.02].iter().map(|w| w * scale).collect();
            let out = normalize("t", &raw, NORMALIZE_TOLERANCE).unwrap();
            let sum: f64 = out.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "scale {scale}: sum {sum}");
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize("t", &[3.0, 5.0, 11.0, 0.0], NORMALIZE_TOLERANCE).unwrap();
        let twice = normalize("t", &once, NORMALIZE_TOLERANCE).unwrap();
        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalize_zero_sum_is_fatal() {
        let err = normalize("DimCanal", &[0.0, 0.0], NORMALIZE_TOLERANCE).unwrap_err();
        assert!(matches!(err, DistSimError::ZeroWeightSum { ref entity } if entity == "DimCanal"));
        assert!(normalize("empty", &[], NORMALIZE_TOLERANCE).is_err());
    }

    #[test]
    fn test_normalize_rejects_negative_and_nan() {
        assert!(matches!(
            normalize("t", &[0.5, -0.1], NORMALIZE_TOLERANCE),
            Err(DistSimError::InvalidWeight { index: 1, .. })
        ));
        assert!(normalize("t", &[f64::NAN], NORMALIZE_TOLERANCE).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(validate("t", &[0.5, 0.49], VALIDATE_TOLERANCE));
        assert!(!validate("t", &[0.5, 0.3], VALIDATE_TOLERANCE));
    }

    #[test]
    fn test_sampler_is_deterministic_and_respects_zero_weight() {
        let sampler =
            WeightedSampler::new("t", vec![("a", 1.0), ("never", 0.0), ("b", 3.0)]).unwrap();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..200).map(|_| *sampler.sample(&mut rng)).collect::<Vec<_>>()
        };
        let first = draw(7);
        assert_eq!(first, draw(7));
        assert!(!first.contains(&"never"));
        assert!(first.contains(&"a") && first.contains(&"b"));
    }

    #[test]
    fn test_sampler_fails_fast() {
        assert!(WeightedSampler::<&str>::new("t", vec![]).is_err());
        assert!(WeightedSampler::new("t", vec![("a", 0.0)]).is_err());
    }
}
