//! OpenRouter starting catalogue.
//!
//! OpenRouter aggregates many upstream providers behind one API; the ids
//! are `<vendor>/<model>` slugs. Prices are USD per 1M tokens and must be
//! updated manually when OpenRouter changes its listings.

use super::{LatencyTier, ModelProfile, ModelTier, QualityScores, TaskCategory};

pub(super) fn models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            id: "openai/gpt-4o-mini".to_string(),
            display_name: "GPT-4o mini".to_string(),
            tier: ModelTier::General,
            cost_per_1m_input: 0.15,
            cost_per_1m_output: 0.6,
            context_window: 128_000,
            strengths: vec![TaskCategory::Simple, TaskCategory::Code],
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
            id: "anthropic/claude-3.5-sonnet".to_string(),
            display_name: "Claude 3.5 Sonnet".to_string(),
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
            id: "google/gemini-2.0-flash-001".to_string(),
            display_name: "Gemini 2.0 Flash".to_string(),
            tier: ModelTier::General,
            cost_per_1m_input: 0.1,
            cost_per_1m_output: 0.4,
            context_window: 1_048_576,
            strengths: vec![TaskCategory::Simple, TaskCategory::DataAnalysis],
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
            id: "deepseek/deepseek-chat".to_string(),
            display_name: "DeepSeek V3".to_string(),
            tier: ModelTier::Medium,
            cost_per_1m_input: 0.27,
            cost_per_1m_output: 1.1,
            context_window: 64_000,
            strengths: vec![TaskCategory::Code, TaskCategory::DataAnalysis],
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
            id: "deepseek/deepseek-r1".to_string(),
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
        ModelProfile {
            id: "meta-llama/llama-3.3-70b-instruct".to_string(),
            display_name: "Llama 3.3 70B Instruct".to_string(),
            tier: ModelTier::Medium,
            cost_per_1m_input: 0.12,
            cost_per_1m_output: 0.3,
            context_window: 131_072,
            strengths: vec![TaskCategory::Simple, TaskCategory::Creative],
            supports_sensitive: false,
            latency_tier: LatencyTier::Fast,
            quality: QualityScores {
                simple: 7,
                code: 6,
                reasoning: 6,
                data_analysis: 6,
                creative: 7,
            },
        },
    ]
}
