//! OpenAI starting catalogue.
//!
//! Prices are USD per 1M tokens (https://openai.com/pricing) and must be
//! updated manually when OpenAI changes them.

use super::{LatencyTier, ModelProfile, ModelTier, QualityScores, TaskCategory};

pub(super) fn models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            id: "gpt-4.1".to_string(),
            display_name: "GPT-4.1".to_string(),
            tier: ModelTier::Hard,
            cost_per_1m_input: 2.0,
            cost_per_1m_output: 8.0,
            context_window: 1_047_576,
            strengths: vec![TaskCategory::Code, TaskCategory::DataAnalysis],
            supports_sensitive: true,
            latency_tier: LatencyTier::Medium,
            quality: QualityScores {
                simple: 9,
                code: 9,
                reasoning: 8,
                data_analysis: 9,
                creative: 8,
            },
        },
        ModelProfile {
            id: "gpt-4.1-mini".to_string(),
            display_name: "GPT-4.1 mini".to_string(),
            tier: ModelTier::Medium,
            cost_per_1m_input: 0.4,
            cost_per_1m_output: 1.6,
            context_window: 1_047_576,
            strengths: vec![TaskCategory::Simple, TaskCategory::Code],
            supports_sensitive: true,
            latency_tier: LatencyTier::Fast,
            quality: QualityScores {
                simple: 8,
                code: 7,
                reasoning: 7,
                data_analysis: 7,
                creative: 7,
            },
        },
        ModelProfile {
            id: "gpt-4o-mini".to_string(),
            display_name: "GPT-4o mini".to_string(),
            tier: ModelTier::General,
            cost_per_1m_input: 0.15,
            cost_per_1m_output: 0.6,
            context_window: 128_000,
            strengths: vec![TaskCategory::Simple],
            supports_sensitive: true,
            latency_tier: LatencyTier::Fast,
            quality: QualityScores {
                simple: 8,
                code: 6,
                reasoning: 5,
                data_analysis: 6,
                creative: 6,
            },
        },
        ModelProfile {
            id: "o3-mini".to_string(),
            display_name: "o3-mini".to_string(),
            tier: ModelTier::Hard,
            cost_per_1m_input: 1.1,
            cost_per_1m_output: 4.4,
            context_window: 200_000,
            strengths: vec![TaskCategory::Reasoning, TaskCategory::DataAnalysis],
            supports_sensitive: true,
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
