//! Online-learning bidding agent
//!
//! Approximates the expected round reward for a market state with a small
//! linear model and uses that estimate as its exploitation bid. The model is
//! trained one sample at a time from the reward signal, so predictions shift
//! toward higher-reward regions as the run progresses.

use super::{BiddingAgent, LearningParams, MIN_BID};
use crate::rng::RngManager;

/// Lower edge of the exploration band, relative to the market threshold
const EXPLORE_BAND_LOW: f64 = 0.7;

/// Upper edge of the exploration band, relative to the market threshold
const EXPLORE_BAND_HIGH: f64 = 1.1;

/// Feature scale applied to both state components before the linear model.
/// Keeps gradient steps stable for thresholds in the hundreds-to-thousands
/// range and round counts up to a few thousand.
const FEATURE_SCALE: f64 = 1000.0;

/// Minimal linear value model over the state [threshold, rounds_remaining]
///
/// A single linear unit trained by per-sample gradient descent on squared
/// error. The agent contract only requires a parametric regressor whose
/// predictions move toward the training targets.
#[derive(Debug, Clone)]
pub(crate) struct ValueModel {
    weights: [f64; 2],
    bias: f64,
}

impl ValueModel {
    pub(crate) fn new() -> Self {
        Self {
            weights: [0.0; 2],
            bias: 0.0,
        }
    }

    fn features(market_threshold: f64, rounds_remaining: f64) -> [f64; 2] {
        [
            market_threshold / FEATURE_SCALE,
            rounds_remaining / FEATURE_SCALE,
        ]
    }

    /// Estimated value of a state
    pub(crate) fn predict(&self, market_threshold: f64, rounds_remaining: f64) -> f64 {
        let x = Self::features(market_threshold, rounds_remaining);
        self.bias + self.weights[0] * x[0] + self.weights[1] * x[1]
    }

    /// One gradient step toward `target` for the given state
    pub(crate) fn train(
        &mut self,
        market_threshold: f64,
        rounds_remaining: f64,
        target: f64,
        learning_rate: f64,
    ) {
        let x = Self::features(market_threshold, rounds_remaining);
        let error = self.predict(market_threshold, rounds_remaining) - target;

        self.weights[0] -= learning_rate * error * x[0];
        self.weights[1] -= learning_rate * error * x[1];
        self.bias -= learning_rate * error;
    }
}

/// Learned-policy bidding agent
///
/// Balances exploration against exploitation:
/// - with probability `exploration_rate`, bids uniformly inside
///   `[0.7, 1.1] × threshold`
/// - otherwise bids the value model's estimate for the current state
///
/// The exploration rate decays geometrically after every reward update, so
/// behavior converges toward the learned policy over many rounds.
///
/// # Example
/// ```
/// use auction_simulator_core_rs::agents::{BiddingAgent, LearningAgent, LearningParams};
/// use auction_simulator_core_rs::RngManager;
///
/// let mut agent = LearningAgent::new("Agent 1".to_string(), LearningParams::default());
/// let mut rng = RngManager::new(42);
///
/// let bid = agent.generate_bid(100.0, 10, &mut rng);
/// assert!(bid >= 1.0);
///
/// agent.update_reward(10.0);
/// assert_eq!(agent.accumulated_reward(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct LearningAgent {
    name: String,
    model: ValueModel,
    learning_rate: f64,
    exploration_rate: f64,
    exploration_decay: f64,
    accumulated_reward: f64,
    /// State acted on by the most recent `generate_bid`, retained so the
    /// reward can be attributed to the state that actually produced it.
    last_state: Option<[f64; 2]>,
}

impl LearningAgent {
    /// Create a new learning agent
    pub fn new(name: String, params: LearningParams) -> Self {
        Self {
            name,
            model: ValueModel::new(),
            learning_rate: params.learning_rate,
            exploration_rate: params.exploration_rate,
            exploration_decay: params.exploration_decay,
            accumulated_reward: 0.0,
            last_state: None,
        }
    }

    /// Current exploration probability
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }
}

impl BiddingAgent for LearningAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_bid(
        &mut self,
        market_threshold: f64,
        rounds_remaining: usize,
        rng: &mut RngManager,
    ) -> f64 {
        let state = [market_threshold, rounds_remaining as f64];

        let bid = if rng.next_f64() < self.exploration_rate {
            rng.range_f64(
                market_threshold * EXPLORE_BAND_LOW,
                market_threshold * EXPLORE_BAND_HIGH,
            )
        } else {
            self.model.predict(state[0], state[1])
        };

        self.last_state = Some(state);
        bid.max(MIN_BID)
    }

    fn update_reward(&mut self, reward: f64) {
        self.accumulated_reward += reward;

        // Train toward the reward for the state we last acted on. Before the
        // first bid there is no acting state and only the totals move.
        if let Some([threshold, remaining]) = self.last_state {
            self.model
                .train(threshold, remaining, reward, self.learning_rate);
        }

        self.exploration_rate *= self.exploration_decay;
    }

    fn accumulated_reward(&self) -> f64 {
        self.accumulated_reward
    }

    fn predict(&self, market_threshold: f64, rounds_remaining: usize) -> f64 {
        self.model
            .predict(market_threshold, rounds_remaining as f64)
    }
}
