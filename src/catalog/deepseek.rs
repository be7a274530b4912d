//! DeepSeek starting catalogue.
//!
//! Prices are USD per 1M tokens (https://api-docs.deepseek.com/quick_start/pricing)
//! and must be updated manually when DeepSeek changes them.

use super::{LatencyTier, ModelProfile, ModelTier, QualityScores, TaskCategory};

pub(super) fn models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            id: "deepseek-chat".to_string(),
            display_name: "DeepSeek V3".to_string(),
            tier: ModelTier::Medium,
            cost_per_1m_input: 0.27,
            cost_per_1m_output: 1.1,
            context_window: 64_000,
            strengths: vec![TaskCategory::Code, TaskCategory::Simple],
            supports_sensitive: false,
            latency_tier: LatencyTier::Medium,
            quality: QualityScores {
                simple: 7,
                code: 8,
                reasoning: 7,
                data_analysis: 7,
                creative: 5,
            },
        },
        ModelProfile {
            id: "deepseek-reasoner".to_string(),
            display_name: "DeepSeek R1".to_string(),
            tier: ModelTier::Hard,
            cost_per_1m_input: 0.55,
            cost_per_1m_output: 2.19,
            context_window: 64_000,
            strengths: vec![TaskCategory::Reasoning, TaskCategory::DataAnalysis],
            supports_sensitive: false,
            latency_tier: LatencyTier::Slow,
            quality: QualityScores {
                simple: 6,
                code: 8,
                reasoning: 9,
                data_analysis: 8,
                creative: 5,
            },
        },
    ]
}
