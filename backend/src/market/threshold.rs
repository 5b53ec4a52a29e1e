//! Dynamic market threshold adjustment
//!
//! After every round the reference price level is re-derived from the full
//! historical bid sample: a mean well below the current threshold contracts
//! it, a mean well above expands it, and a small uniform fluctuation keeps
//! the market from settling into a fixed point. The result never drops below
//! the configured floor.
//!
//! The adjustment is pure in its explicit inputs; the only randomness is the
//! fluctuation term drawn from the injected seeded RNG, so tests can force it
//! to zero (range 0) or reproduce it exactly (fixed seed).

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Tuning constants for threshold adjustment
///
/// All cutoffs and factors are configuration, not literals, so runs can be
/// calibrated without touching the adjustment rule itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Hard lower bound on the threshold, applied after every adjustment
    pub floor: f64,

    /// Contract when mean bid < `contraction_trigger` × current threshold
    pub contraction_trigger: f64,

    /// Expand when mean bid > `expansion_trigger` × current threshold
    pub expansion_trigger: f64,

    /// Multiplier applied on contraction (sub-1)
    pub contraction_factor: f64,

    /// Multiplier applied on expansion (> 1)
    pub expansion_factor: f64,

    /// Half-width of the uniform fluctuation band; 0 disables fluctuation
    pub fluctuation_range: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            floor: 500.0,
            contraction_trigger: 0.85,
            expansion_trigger: 1.10,
            contraction_factor: 0.97,
            expansion_factor: 1.02,
            fluctuation_range: 2.0,
        }
    }
}

/// Maps (current threshold, historical bid sample) to the next threshold
///
/// # Example
/// ```
/// use auction_simulator_core_rs::market::{ThresholdAdjuster, ThresholdConfig};
/// use auction_simulator_core_rs::RngManager;
///
/// let config = ThresholdConfig {
///     floor: 50.0,
///     fluctuation_range: 0.0,
///     ..ThresholdConfig::default()
/// };
/// let adjuster = ThresholdAdjuster::new(config);
/// let mut rng = RngManager::new(1);
///
/// // Mean bid of 50 is far below 100: contract by the configured factor.
/// let next = adjuster.adjust(100.0, &[50.0; 5], None, &mut rng);
/// assert!((next - 97.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdAdjuster {
    config: ThresholdConfig,
}

impl ThresholdAdjuster {
    /// Create an adjuster with the given tuning
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// The adjuster's tuning constants
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Compute the next threshold from the full historical bid sample
    ///
    /// # Arguments
    /// * `current` - Threshold in force during the round just finished
    /// * `all_bids` - Every bid from every round so far (may be empty or
    ///   degenerate; a zero-variance sample is valid)
    /// * `advisory` - External suggestion to blend in (simple average), or
    ///   `None` for the unblended path
    /// * `rng` - Seeded generator for the fluctuation draw
    ///
    /// # Guarantee
    /// The returned threshold is never below `config.floor`, regardless of
    /// inputs.
    pub fn adjust(
        &self,
        current: f64,
        all_bids: &[f64],
        advisory: Option<f64>,
        rng: &mut RngManager,
    ) -> f64 {
        let adjusted = if all_bids.is_empty() {
            // No sample yet: hold the level and let only fluctuation act.
            current
        } else {
            let mean = all_bids.iter().sum::<f64>() / all_bids.len() as f64;

            if mean < current * self.config.contraction_trigger {
                current * self.config.contraction_factor
            } else if mean > current * self.config.expansion_trigger {
                current * self.config.expansion_factor
            } else {
                current
            }
        };

        let fluctuation = rng.range_f64(
            -self.config.fluctuation_range,
            self.config.fluctuation_range,
        );
        let mut next = adjusted + fluctuation;

        if let Some(suggestion) = advisory {
            next = (next + suggestion) / 2.0;
        }

        next.max(self.config.floor)
    }
}
