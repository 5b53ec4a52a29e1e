//! Market threshold dynamics

pub mod threshold;

pub use threshold::{ThresholdAdjuster, ThresholdConfig};
