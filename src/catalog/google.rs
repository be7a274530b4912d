//! Google AI starting catalogue.
//!
//! Prices are USD per 1M tokens (https://ai.google.dev/pricing) and must
//! be updated manually when Google changes them.

use super::{LatencyTier, ModelProfile, ModelTier, QualityScores, TaskCategory};

pub(super) fn models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            id: "gemini-2.5-pro".to_string(),
            display_name: "Gemini 2.5 Pro".to_string(),
            tier: ModelTier::Hard,
            cost_per_1m_input: 1.25,
            cost_per_1m_output: 10.0,
            context_window: 1_048_576,
            strengths: vec![
                TaskCategory::Reasoning,
                TaskCategory::Code,
                TaskCategory::DataAnalysis,
            ],
            supports_sensitive: true,
            latency_tier: LatencyTier::Slow,
            quality: QualityScores {
                simple: 8,
                code: 9,
                reasoning: 9,
                data_analysis: 9,
                creative: 8,
            },
        },
        ModelProfile {
            id: "gemini-2.5-flash".to_string(),
            display_name: "Gemini 2.5 Flash".to_string(),
            tier: ModelTier::Medium,
            cost_per_1m_input: 0.3,
            cost_per_1m_output: 2.5,
            context_window: 1_048_576,
            strengths: vec![TaskCategory::Code, TaskCategory::DataAnalysis],
            supports_sensitive: true,
            latency_tier: LatencyTier::Fast,
            quality: QualityScores {
                simple: 8,
                code: 7,
                reasoning: 8,
                data_analysis: 8,
                creative: 7,
            },
        },
        ModelProfile {
            id: "gemini-2.0-flash-001".to_string(),
            display_name: "Gemini 2.0 Flash".to_string(),
            tier: ModelTier::General,
            cost_per_1m_input: 0.1,
            cost_per_1m_output: 0.4,
            context_window: 1_048_576,
            strengths: vec![TaskCategory::Simple],
            supports_sensitive: true,
            latency_tier: LatencyTier::Fast,
            quality: QualityScores {
                simple: 8,
                code: 6,
                reasoning: 6,
                data_analysis: 7,
                creative: 6,
            },
        },
        ModelProfile {
            id: "gemini-1.5-flash-8b".to_string(),
            display_name: "Gemini 1.5 Flash-8B".to_string(),
            tier: ModelTier::General,
            cost_per_1m_input: 0.0375,
            cost_per_1m_output: 0.15,
            context_window: 1_000_000,
            strengths: vec![TaskCategory::Simple],
            supports_sensitive: true,
            latency_tier: LatencyTier::Fast,
            quality: QualityScores {
                simple: 7,
                code: 4,
                reasoning: 4,
                data_analysis: 5,
                creative: 5,
            },
        },
    ]
}
