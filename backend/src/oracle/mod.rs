//! Advisory oracle boundary
//!
//! The simulation can blend an external best-effort suggestion (typically an
//! LLM behind an HTTP API) into bids and threshold updates. The oracle is
//! strictly optional: the engine takes an `Option` handle at construction,
//! absence means the whole run uses the non-advisory path, and any per-call
//! failure degrades that single call to "no suggestion". An oracle failure
//! can never abort a round.
//!
//! The core ships only the port and simple in-process implementations; a
//! network-backed client belongs in a separate crate that depends on this
//! trait.

use std::fmt;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Why an advisory call produced no usable suggestion
///
/// Every variant is non-fatal; callers fall back to their non-advisory
/// computation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdvisoryError {
    /// No backend configured, missing credential, or the call itself failed
    #[error("advisory oracle unavailable: {0}")]
    Unavailable(String),

    /// The call did not return within the bounded time budget
    #[error("advisory call timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with something that is not a number
    #[error("advisory returned a non-numeric suggestion: {0}")]
    Malformed(String),
}

/// Market-state description handed to an advisory backend
///
/// The `Display` impl renders the textual prompt an LLM-backed
/// implementation would consume.
#[derive(Debug, Clone)]
pub struct BidQuery {
    /// Name of the agent asking for a suggestion
    pub agent: String,
    /// Current market threshold
    pub market_threshold: f64,
    /// Rounds left after the current one
    pub rounds_remaining: usize,
}

impl fmt::Display for BidQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Agent '{}' is in a bidding war. Market threshold: {}, rounds left: {}. \
             Suggest an optimal bid.",
            self.agent, self.market_threshold, self.rounds_remaining
        )
    }
}

/// Best-effort external suggestion source
///
/// Implementations should be cheap to call or wrapped in [`BoundedOracle`];
/// the engine treats every error as "no suggestion".
pub trait AdvisoryOracle: Send {
    /// Suggest a bid for the described market state
    fn suggest_bid(&self, query: &BidQuery) -> Result<f64, AdvisoryError>;

    /// Suggest the next market threshold
    ///
    /// Backends without an opinion on the threshold keep this default, which
    /// reports unavailability and leaves the adjustment rule unblended.
    fn suggest_threshold(&self, current: f64, mean_bid: f64) -> Result<f64, AdvisoryError> {
        let _ = (current, mean_bid);
        Err(AdvisoryError::Unavailable(
            "no threshold advisory".to_string(),
        ))
    }
}

/// Oracle that always returns the same suggestions
///
/// Available in all builds to support integration testing of the blending
/// paths without a live backend.
#[derive(Debug, Clone)]
pub struct FixedOracle {
    bid: f64,
    threshold: Option<f64>,
}

impl FixedOracle {
    /// Oracle suggesting a constant bid and no threshold
    pub fn new(bid: f64) -> Self {
        Self {
            bid,
            threshold: None,
        }
    }

    /// Oracle suggesting a constant bid and a constant threshold
    pub fn with_threshold(bid: f64, threshold: f64) -> Self {
        Self {
            bid,
            threshold: Some(threshold),
        }
    }
}

impl AdvisoryOracle for FixedOracle {
    fn suggest_bid(&self, _query: &BidQuery) -> Result<f64, AdvisoryError> {
        Ok(self.bid)
    }

    fn suggest_threshold(&self, current: f64, mean_bid: f64) -> Result<f64, AdvisoryError> {
        let _ = (current, mean_bid);
        self.threshold.ok_or_else(|| {
            AdvisoryError::Unavailable("no threshold advisory".to_string())
        })
    }
}

/// Wraps an oracle with a hard per-call time budget
///
/// Each call runs on a worker thread; if no answer arrives within the budget
/// the call resolves to [`AdvisoryError::Timeout`] and the worker's eventual
/// result is discarded. A slow backend therefore degrades a single call, not
/// the round.
///
/// # Example
/// ```
/// use auction_simulator_core_rs::oracle::{AdvisoryOracle, BidQuery, BoundedOracle, FixedOracle};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let oracle = BoundedOracle::new(Arc::new(FixedOracle::new(95.0)), Duration::from_secs(1));
/// let query = BidQuery {
///     agent: "Agent 1".to_string(),
///     market_threshold: 100.0,
///     rounds_remaining: 5,
/// };
/// assert_eq!(oracle.suggest_bid(&query), Ok(95.0));
/// ```
pub struct BoundedOracle {
    inner: Arc<dyn AdvisoryOracle + Send + Sync>,
    timeout: Duration,
}

impl BoundedOracle {
    /// Bound `inner` to at most `timeout` per call
    pub fn new(inner: Arc<dyn AdvisoryOracle + Send + Sync>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl AdvisoryOracle for BoundedOracle {
    fn suggest_bid(&self, query: &BidQuery) -> Result<f64, AdvisoryError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let query = query.clone();

        thread::spawn(move || {
            // The receiver may be gone after a timeout; that is fine.
            let _ = tx.send(inner.suggest_bid(&query));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(_) => Err(AdvisoryError::Timeout(self.timeout)),
        }
    }

    fn suggest_threshold(&self, current: f64, mean_bid: f64) -> Result<f64, AdvisoryError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);

        thread::spawn(move || {
            let _ = tx.send(inner.suggest_threshold(current, mean_bid));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(_) => Err(AdvisoryError::Timeout(self.timeout)),
        }
    }
}
