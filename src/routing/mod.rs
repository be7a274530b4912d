//! Candidate ranking strategies.
//!
//! Every strategy computes a scalar score per candidate and returns a
//! copy of the input sorted in descending score. Sorting is stable, so
//! score ties keep the input order; the input list is never mutated.

pub mod scoring;

pub use scoring::{candidate_score, StrategyWeights};

use crate::catalog::{ModelProfile, TaskCategory};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How candidates are ranked once filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    CostFirst,
    QualityFirst,
    #[default]
    Balanced,
}

impl FromStr for RoutingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cost_first" => Ok(RoutingStrategy::CostFirst),
            "quality_first" => Ok(RoutingStrategy::QualityFirst),
            "balanced" => Ok(RoutingStrategy::Balanced),
            _ => Err(format!("Unknown routing strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingStrategy::CostFirst => write!(f, "cost_first"),
            RoutingStrategy::QualityFirst => write!(f, "quality_first"),
            RoutingStrategy::Balanced => write!(f, "balanced"),
        }
    }
}

/// Ranking capability: order candidates for a task category.
pub trait SelectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return a copy of `candidates` sorted best-first for `category`.
    fn select(&self, candidates: &[ModelProfile], category: TaskCategory) -> Vec<ModelProfile>;
}

fn rank(
    candidates: &[ModelProfile],
    category: TaskCategory,
    weights: StrategyWeights,
) -> Vec<ModelProfile> {
    let mut scored: Vec<(f64, ModelProfile)> = candidates
        .iter()
        .map(|m| (candidate_score(m, category, weights), m.clone()))
        .collect();
    // Stable sort: equal scores keep input order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, m)| m).collect()
}

/// Cheapest-input-cost ranking.
pub struct CostFirst;

impl SelectionStrategy for CostFirst {
    fn name(&self) -> &'static str {
        "cost_first"
    }

    fn select(&self, candidates: &[ModelProfile], category: TaskCategory) -> Vec<ModelProfile> {
        rank(candidates, category, scoring::COST_FIRST)
    }
}

/// Highest-quality-for-category ranking.
pub struct QualityFirst;

impl SelectionStrategy for QualityFirst {
    fn name(&self) -> &'static str {
        "quality_first"
    }

    fn select(&self, candidates: &[ModelProfile], category: TaskCategory) -> Vec<ModelProfile> {
        rank(candidates, category, scoring::QUALITY_FIRST)
    }
}

/// Even trade-off between quality, cost and latency.
pub struct Balanced;

impl SelectionStrategy for Balanced {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn select(&self, candidates: &[ModelProfile], category: TaskCategory) -> Vec<ModelProfile> {
        rank(candidates, category, scoring::BALANCED)
    }
}

/// Strategy factory; an unset strategy means balanced.
pub fn strategy_for(strategy: Option<RoutingStrategy>) -> &'static dyn SelectionStrategy {
    match strategy.unwrap_or_default() {
        RoutingStrategy::CostFirst => &CostFirst,
        RoutingStrategy::QualityFirst => &QualityFirst,
        RoutingStrategy::Balanced => &Balanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LatencyTier, ModelTier, QualityScores};

    fn profile(id: &str, cost_in: f64, quality_code: u8, latency: LatencyTier) -> ModelProfile {
        ModelProfile {
            id: id.to_string(),
            display_name: id.to_string(),
            tier: ModelTier::General,
            cost_per_1m_input: cost_in,
            cost_per_1m_output: cost_in * 2.0,
            context_window: 128_000,
            strengths: vec![],
            supports_sensitive: true,
            latency_tier: latency,
            quality: QualityScores {
                simple: 5,
                code: quality_code,
                reasoning: 5,
                data_analysis: 5,
                creative: 5,
            },
        }
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!(
            "cost_first".parse::<RoutingStrategy>().unwrap(),
            RoutingStrategy::CostFirst
        );
        assert_eq!(
            "QUALITY_FIRST".parse::<RoutingStrategy>().unwrap(),
            RoutingStrategy::QualityFirst
        );
        assert!("cheapest".parse::<RoutingStrategy>().is_err());
    }

    #[test]
    fn factory_defaults_to_balanced() {
        assert_eq!(strategy_for(None).name(), "balanced");
        assert_eq!(
            strategy_for(Some(RoutingStrategy::CostFirst)).name(),
            "cost_first"
        );
    }

    #[test]
    fn quality_first_prefers_quality_over_cost() {
        let cheap_weak = profile("cheap", 0.1, 3, LatencyTier::Fast);
        let pricey_strong = profile("strong", 3.0, 9, LatencyTier::Slow);
        let candidates = vec![cheap_weak, pricey_strong];

        let ranked = QualityFirst.select(&candidates, TaskCategory::Code);
        assert_eq!(ranked[0].id, "strong");

        let ranked = CostFirst.select(&candidates, TaskCategory::Code);
        assert_eq!(ranked[0].id, "cheap");
    }

    #[test]
    fn select_returns_a_permutation_and_leaves_input_untouched() {
        let candidates = vec![
            profile("a", 1.0, 5, LatencyTier::Fast),
            profile("b", 0.2, 8, LatencyTier::Medium),
            profile("c", 2.5, 9, LatencyTier::Slow),
        ];
        let before = candidates.clone();

        let ranked = Balanced.select(&candidates, TaskCategory::Code);

        assert_eq!(candidates, before);
        assert_eq!(ranked.len(), candidates.len());
        let mut ids: Vec<_> = ranked.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn ranked_scores_are_non_increasing() {
        let candidates = vec![
            profile("a", 1.0, 5, LatencyTier::Fast),
            profile("b", 0.2, 8, LatencyTier::Medium),
            profile("c", 2.5, 9, LatencyTier::Slow),
            profile("d", 0.05, 2, LatencyTier::Fast),
        ];
        for strategy in [
            &CostFirst as &dyn SelectionStrategy,
            &QualityFirst,
            &Balanced,
        ] {
            let ranked = strategy.select(&candidates, TaskCategory::Code);
            let weights = match strategy.name() {
                "cost_first" => scoring::COST_FIRST,
                "quality_first" => scoring::QUALITY_FIRST,
                _ => scoring::BALANCED,
            };
            let scores: Vec<f64> = ranked
                .iter()
                .map(|m| candidate_score(m, TaskCategory::Code, weights))
                .collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let first = profile("first", 1.0, 5, LatencyTier::Fast);
        let second = profile("second", 1.0, 5, LatencyTier::Fast);
        let candidates = vec![first, second];

        for strategy in [
            &CostFirst as &dyn SelectionStrategy,
            &QualityFirst,
            &Balanced,
        ] {
            let ranked = strategy.select(&candidates, TaskCategory::Simple);
            assert_eq!(ranked[0].id, "first");
            assert_eq!(ranked[1].id, "second");
        }
    }

    #[test]
    fn empty_candidates_select_to_empty() {
        assert!(Balanced.select(&[], TaskCategory::Simple).is_empty());
    }
}
