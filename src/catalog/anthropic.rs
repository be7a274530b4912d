//! Anthropic starting catalogue.
//!
//! Prices are USD per 1M tokens (https://www.anthropic.com/pricing) and
//! must be updated manually when Anthropic changes them.

use super::{LatencyTier, ModelProfile, ModelTier, QualityScores, TaskCategory};

pub(super) fn models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            id: "claude-opus-4-20250514".to_string(),
            display_name: "Claude Opus 4".to_string(),
            tier: ModelTier::Hard,
            cost_per_1m_input: 15.0,
            cost_per_1m_output: 75.0,
            context_window: 200_000,
            strengths: vec![TaskCategory::Reasoning, TaskCategory::Code],
            supports_sensitive: true,
            latency_tier: LatencyTier::Slow,
            quality: QualityScores {
                simple: 9,
                code: 10,
                reasoning: 10,
                data_analysis: 9,
                creative: 9,
            },
        },
        ModelProfile {
            id: "claude-sonnet-4-20250514".to_string(),
            display_name: "Claude Sonnet 4".to_string(),
            tier: ModelTier::Hard,
            cost_per_1m_input: 3.0,
            cost_per_1m_output: 15.0,
            context_window: 200_000,
            strengths: vec![
                TaskCategory::Code,
                TaskCategory::Reasoning,
                TaskCategory::Creative,
            ],
            supports_sensitive: true,
            latency_tier: LatencyTier::Medium,
            quality: QualityScores {
                simple: 9,
                code: 9,
                reasoning: 9,
                data_analysis: 8,
                creative: 9,
            },
        },
        ModelProfile {
            id: "claude-3-5-haiku-20241022".to_string(),
            display_name: "Claude 3.5 Haiku".to_string(),
            tier: ModelTier::General,
            cost_per_1m_input: 0.8,
            cost_per_1m_output: 4.0,
            context_window: 200_000,
            strengths: vec![TaskCategory::Simple, TaskCategory::Code],
            supports_sensitive: true,
            latency_tier: LatencyTier::Fast,
            quality: QualityScores {
                simple: 8,
                code: 7,
                reasoning: 6,
                data_analysis: 6,
                creative: 7,
            },
        },
    ]
}
