//! Scalar candidate score.
//!
//! Each component lands on a 0..10-ish scale before weighting: quality is
//! the model's 0..10 score for the task category, the cost score decreases
//! with input cost and is clamped into [0, 10], and latency contributes
//! its tier weight (3/2/1).

use crate::catalog::{ModelProfile, TaskCategory};

/// Component weights of one strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyWeights {
    pub quality: f64,
    pub cost: f64,
    pub latency: f64,
}

pub const COST_FIRST: StrategyWeights = StrategyWeights {
    quality: 0.2,
    cost: 0.7,
    latency: 0.1,
};

pub const QUALITY_FIRST: StrategyWeights = StrategyWeights {
    quality: 0.8,
    cost: 0.1,
    latency: 0.1,
};

pub const BALANCED: StrategyWeights = StrategyWeights {
    quality: 0.5,
    cost: 0.3,
    latency: 0.2,
};

/// Monotonically decreasing in input cost, clamped into [0, 10].
pub fn cost_score(cost_per_1m_input: f64) -> f64 {
    10.0 - (cost_per_1m_input * 5.0).min(10.0)
}

/// Weighted score for one candidate under one category.
pub fn candidate_score(
    model: &ModelProfile,
    category: TaskCategory,
    weights: StrategyWeights,
) -> f64 {
    let quality = model.quality.get(category) as f64;
    let cost = cost_score(model.cost_per_1m_input);
    let latency = model.latency_tier.rank_weight() as f64;

    weights.quality * quality + weights.cost * cost + weights.latency * latency
}
