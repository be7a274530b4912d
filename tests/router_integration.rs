//! End-to-end tests for the router orchestrator: forced models, cost
//! arithmetic, low-confidence escalation, breaker-driven fallback and
//! audit dispatch, all against scripted in-memory collaborators.

mod common;

use common::*;
use std::sync::Arc;
use waypoint::audit::MemoryAuditSink;
use waypoint::breaker::BreakerConfig;
use waypoint::catalog::{PrivacySensitivity, TaskCategory};
use waypoint::classifier::ClassificationSource;
use waypoint::router::{RouterError, RoutingOptions};
use waypoint::routing::RoutingStrategy;

#[tokio::test]
async fn forced_model_happy_path() {
    let provider = Arc::new(
        ScriptedProvider::new(vec![make_profile("provider/model-a")]).behaviour(
            "provider/model-a",
            ModelBehaviour::succeed("Hello world", 100, 50),
        ),
    );
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let audit = Arc::new(MemoryAuditSink::new());
    let engine = make_engine(classifier, provider.clone(), audit.clone());

    let opts = RoutingOptions {
        force_model: Some("provider/model-a".to_string()),
        ..RoutingOptions::default()
    };
    let response = engine.complete("hello", &opts).await.unwrap();

    assert_eq!(response.content, "Hello world");
    assert_eq!(response.model, "provider/model-a");
    assert_eq!(response.category, TaskCategory::Simple);
    assert!(!response.fallback_used);
    assert_eq!(response.latency_ms, 200);
    assert_eq!(response.usage.input_tokens, 100);
    assert_eq!(response.usage.output_tokens, 50);
    // 100/1e6 * $1 + 50/1e6 * $2
    assert!((response.estimated_cost_usd - 0.0002).abs() < 1e-9);
    assert_eq!(provider.calls("provider/model-a"), 1);

    flush_audit().await;
    let entries = audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].model_used, "provider/model-a");
    assert!((entries[0].confidence - 0.9).abs() < 1e-9);
    assert_eq!(entries[0].source, ClassificationSource::Semantic);
}

#[tokio::test]
async fn cost_math_uses_both_rates() {
    let mut profile = make_profile("m");
    profile.cost_per_1m_input = 2.0;
    profile.cost_per_1m_output = 6.0;

    let provider = Arc::new(
        ScriptedProvider::new(vec![profile])
            .behaviour("m", ModelBehaviour::succeed("ok", 500, 100)),
    );
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let engine = make_engine(classifier, provider, Arc::new(MemoryAuditSink::new()));

    let response = engine
        .complete("prompt", &RoutingOptions::default())
        .await
        .unwrap();

    assert!((response.estimated_cost_usd - 0.0016).abs() < 1e-6);
}

#[tokio::test]
async fn missing_usage_falls_back_to_estimates() {
    let provider = Arc::new(ScriptedProvider::new(vec![make_profile("m")]).behaviour(
        "m",
        ModelBehaviour::Succeed {
            content: Some("ok".to_string()),
            prompt_tokens: None,
            completion_tokens: None,
            latency_ms: 10,
        },
    ));
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let engine = make_engine(classifier, provider, Arc::new(MemoryAuditSink::new()));

    let response = engine
        .complete("prompt", &RoutingOptions::default())
        .await
        .unwrap();

    // classification() estimates from "test prompt": ceil(11 / 4).
    assert_eq!(response.usage.input_tokens, 3);
    assert_eq!(response.usage.output_tokens, 0);
}

#[tokio::test]
async fn null_content_becomes_empty_string() {
    let provider = Arc::new(ScriptedProvider::new(vec![make_profile("m")]).behaviour(
        "m",
        ModelBehaviour::Succeed {
            content: None,
            prompt_tokens: Some(1),
            completion_tokens: Some(0),
            latency_ms: 10,
        },
    ));
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let engine = make_engine(classifier, provider, Arc::new(MemoryAuditSink::new()));

    let response = engine
        .complete("prompt", &RoutingOptions::default())
        .await
        .unwrap();
    assert_eq!(response.content, "");
}

#[tokio::test]
async fn low_confidence_escalates_to_reasoning() {
    let provider = Arc::new(
        ScriptedProvider::new(vec![make_profile("m")])
            .behaviour("m", ModelBehaviour::succeed("ok", 10, 10)),
    );
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.3,
    )));
    let audit = Arc::new(MemoryAuditSink::new());
    let engine = make_engine(classifier, provider, audit.clone());

    let response = engine
        .complete("prompt", &RoutingOptions::default())
        .await
        .unwrap();
    assert_eq!(response.category, TaskCategory::Reasoning);

    // The measured confidence is preserved through the escalation.
    flush_audit().await;
    assert!((audit.entries()[0].confidence - 0.3).abs() < 1e-9);
}

#[tokio::test]
async fn confidence_exactly_at_minimum_is_not_escalated() {
    let provider = Arc::new(
        ScriptedProvider::new(vec![make_profile("m")])
            .behaviour("m", ModelBehaviour::succeed("ok", 10, 10)),
    );
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.5,
    )));
    let engine = make_engine(classifier, provider, Arc::new(MemoryAuditSink::new()));

    let response = engine
        .complete("prompt", &RoutingOptions::default())
        .await
        .unwrap();
    assert_eq!(response.category, TaskCategory::Simple);
}

#[tokio::test]
async fn forced_category_skips_the_classifier_and_audits_full_confidence() {
    let provider = Arc::new(
        ScriptedProvider::new(vec![make_profile("m")])
            .behaviour("m", ModelBehaviour::succeed("ok", 10, 10)),
    );
    // A classifier that would disagree; it must not be consulted.
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.2,
    )));
    let audit = Arc::new(MemoryAuditSink::new());
    let engine = make_engine(classifier, provider, audit.clone());

    let opts = RoutingOptions {
        force_category: Some(TaskCategory::Creative),
        ..RoutingOptions::default()
    };
    let response = engine.complete("prompt", &opts).await.unwrap();
    assert_eq!(response.category, TaskCategory::Creative);

    flush_audit().await;
    assert!((audit.entries()[0].confidence - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_forced_model_is_rejected() {
    let provider = Arc::new(ScriptedProvider::new(vec![make_profile("m")]));
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let engine = make_engine(classifier, provider.clone(), Arc::new(MemoryAuditSink::new()));

    let opts = RoutingOptions {
        force_model: Some("provider/ghost".to_string()),
        ..RoutingOptions::default()
    };
    let err = engine.complete("prompt", &opts).await.unwrap_err();

    assert!(matches!(err, RouterError::UnknownModel { .. }));
    // No completion was attempted.
    assert_eq!(provider.calls("m"), 0);
}

#[tokio::test]
async fn filtering_everything_out_is_its_own_error() {
    let mut profile = make_profile("m");
    profile.supports_sensitive = false;

    let provider = Arc::new(ScriptedProvider::new(vec![profile]));
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let engine = make_engine(classifier, provider, Arc::new(MemoryAuditSink::new()));

    // Default sensitivity is internal, so the one uncleared model is out.
    let err = engine
        .complete("prompt", &RoutingOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RouterError::NoModelsAvailable));
}

#[tokio::test]
async fn breaker_opens_after_three_failed_calls_then_filters_the_model() {
    let model_a = make_profile_with_quality("model-a", 9);
    let model_b = make_profile_with_quality("model-b", 5);

    let provider = Arc::new(
        ScriptedProvider::new(vec![model_a, model_b])
            .behaviour("model-a", ModelBehaviour::Fail)
            .behaviour("model-b", ModelBehaviour::succeed("from b", 10, 10)),
    );
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Code,
        0.9,
    )));
    let engine = make_engine(classifier, provider.clone(), Arc::new(MemoryAuditSink::new()));

    let opts = RoutingOptions {
        strategy: Some(RoutingStrategy::QualityFirst),
        sensitivity: PrivacySensitivity::Public,
        ..RoutingOptions::default()
    };

    // Three calls: model-a is ranked first, fails its retry set each
    // time, and the response falls back to model-b.
    for call in 1..=3u64 {
        let response = engine.complete("prompt", &opts).await.unwrap();
        assert_eq!(response.model, "model-b");
        assert!(response.fallback_used);
        // Two attempts per retry set against the failing model.
        assert_eq!(provider.calls("model-a"), call * 2);
        assert_eq!(provider.calls("model-b"), call);
    }

    // Fourth call: model-a's breaker is open, so model-b is the first
    // (and only) ranked candidate.
    let response = engine.complete("prompt", &opts).await.unwrap();
    assert_eq!(response.model, "model-b");
    assert!(!response.fallback_used);
    assert_eq!(provider.calls("model-a"), 6);
}

#[tokio::test]
async fn all_candidates_failing_surfaces_a_distinct_error() {
    let provider = Arc::new(
        ScriptedProvider::new(vec![make_profile("a"), make_profile("b")])
            .behaviour("a", ModelBehaviour::Fail)
            .behaviour("b", ModelBehaviour::Fail),
    );
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let audit = Arc::new(MemoryAuditSink::new());
    let engine = make_engine(classifier, provider.clone(), audit.clone());

    let err = engine
        .complete("prompt", &RoutingOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RouterError::AllModelsFailed { attempted: 2 }));
    // Two retry attempts per model per call.
    assert_eq!(provider.calls("a"), 2);
    assert_eq!(provider.calls("b"), 2);

    flush_audit().await;
    assert!(audit.is_empty());
}

#[tokio::test]
async fn half_open_breaker_admits_a_probe_again() {
    let provider = Arc::new(
        ScriptedProvider::new(vec![make_profile("m")]).behaviour("m", ModelBehaviour::Fail),
    );
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let engine = make_engine(classifier, provider.clone(), Arc::new(MemoryAuditSink::new()))
        .with_breaker_config(BreakerConfig {
            half_open_timeout: std::time::Duration::ZERO,
            ..BreakerConfig::default()
        });

    let opts = RoutingOptions::default();
    for _ in 0..3 {
        let _ = engine.complete("prompt", &opts).await.unwrap_err();
    }
    assert_eq!(provider.calls("m"), 6);

    // Instant cool-down: the next call is admitted as a probe instead of
    // failing with NoModelsAvailable.
    let err = engine.complete("prompt", &opts).await.unwrap_err();
    assert!(matches!(err, RouterError::AllModelsFailed { .. }));
    assert_eq!(provider.calls("m"), 8);
}

#[tokio::test]
async fn feedback_reaches_the_classifier() {
    let provider = Arc::new(ScriptedProvider::new(vec![make_profile("m")]));
    let classifier = Arc::new(StaticClassifier::new(classification(
        TaskCategory::Simple,
        0.9,
    )));
    let engine = make_engine(
        classifier.clone(),
        provider,
        Arc::new(MemoryAuditSink::new()),
    );

    engine
        .feedback("sort this dataframe", TaskCategory::DataAnalysis)
        .await
        .unwrap();

    let examples = classifier.examples();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].0, "sort this dataframe");
    assert_eq!(examples[0].1, TaskCategory::DataAnalysis);
}
