//! Decision-table and single-flight behavior of the coordinator.

mod common;

use bookwise_core::{FailureCode, GenerationConfig, SectionKind};
use bookwise_error::ProducerErrorKind;
use bookwise_generation::{GenerationCoordinator, GenerationResponse, RETRY_AFTER_MS};
use bookwise_interface::{
    AttemptToken, DiagnosticEvent, FinishOutcome, GenerationOutcome, GenerationStatus,
    GenerationStore,
};
use common::{
    out_of_bounds_overview, sample_book, test_key, valid_overview, MemoryGenerationStore,
    RecordingDiagnostics, Script, ScriptedGenerator, StaticResolver, SupersedingStore,
};
use std::sync::Arc;
use std::time::Duration;

type Engine<S> =
    GenerationCoordinator<S, ScriptedGenerator, StaticResolver, RecordingDiagnostics>;

fn test_config() -> GenerationConfig {
    GenerationConfig::new("openai", "gpt-5-mini").with_timeout(Duration::from_millis(250))
}

fn engine<S: GenerationStore>(
    store: Arc<S>,
    generator: Arc<ScriptedGenerator>,
    config: GenerationConfig,
) -> (Engine<S>, Arc<RecordingDiagnostics>) {
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let coordinator = GenerationCoordinator::new(
        store,
        generator,
        Arc::new(StaticResolver::new(sample_book())),
        diagnostics.clone(),
        config,
    );
    (coordinator, diagnostics)
}

#[tokio::test]
async fn first_request_generates_and_stores() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, diagnostics) = engine(store.clone(), generator.clone(), test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    match response {
        GenerationResponse::Complete {
            stored, content, ..
        } => {
            assert!(!stored);
            assert_eq!(content, valid_overview());
        }
        other => panic!("expected complete, got {other:?}"),
    }

    let record = store.record(&test_key(SectionKind::Overview)).unwrap();
    assert_eq!(record.status, GenerationStatus::Complete);
    assert_eq!(record.attempt_count, 1);
    assert_eq!(generator.calls(), 1);
    assert!(diagnostics.saw(|e| matches!(e, DiagnosticEvent::CacheMiss { .. })));
    assert!(diagnostics.saw(
        |e| matches!(e, DiagnosticEvent::AttemptFinished { error_code: None, .. })
    ));
}

#[tokio::test]
async fn repeated_request_served_from_cache() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, diagnostics) = engine(store.clone(), generator.clone(), test_config());

    coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();
    let second = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    assert!(matches!(
        second,
        GenerationResponse::Complete { stored: true, .. }
    ));
    assert_eq!(generator.calls(), 1);
    assert!(diagnostics.saw(|e| matches!(e, DiagnosticEvent::CacheHit { .. })));
}

#[tokio::test]
async fn concurrent_requests_share_one_attempt() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(
        ScriptedGenerator::returning(valid_overview()).with_delay(Duration::from_millis(50)),
    );
    let (coordinator, _diagnostics) = engine(store.clone(), generator.clone(), test_config());
    let coordinator = Arc::new(coordinator);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let coordinator = coordinator.clone();
        handles.push(tokio::spawn(async move {
            coordinator
                .request_generation("OL1W", SectionKind::Overview, false)
                .await
                .unwrap()
        }));
    }

    let mut fresh = 0;
    let mut pending = 0;
    for handle in handles {
        match handle.await.unwrap() {
            GenerationResponse::Complete { stored: false, .. } => fresh += 1,
            GenerationResponse::Complete { stored: true, .. } => {}
            GenerationResponse::Pending { retry_after_ms, .. } => {
                assert_eq!(retry_after_ms, RETRY_AFTER_MS);
                pending += 1;
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    assert_eq!(generator.calls(), 1);
    assert_eq!(fresh, 1);
    assert!(pending >= 1, "claim-race losers must observe pending");

    // Once the winner commits, polls are cache hits.
    let settled = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();
    assert!(matches!(
        settled,
        GenerationResponse::Complete { stored: true, .. }
    ));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn validation_failure_recorded_as_schema_validation() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::returning(out_of_bounds_overview()));
    let (coordinator, diagnostics) = engine(store.clone(), generator.clone(), test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    assert!(matches!(
        response,
        GenerationResponse::Failed {
            error_code: Some(FailureCode::SchemaValidation),
            ..
        }
    ));
    let record = store.record(&test_key(SectionKind::Overview)).unwrap();
    assert_eq!(record.status, GenerationStatus::Failed);
    assert_eq!(record.error_code, Some(FailureCode::SchemaValidation));
    assert_eq!(record.content, None);
    assert!(diagnostics.saw(|e| matches!(e, DiagnosticEvent::ValidationFailed { .. })));
}

#[tokio::test]
async fn unparseable_output_recorded_as_provider_error() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::failing(ProducerErrorKind::Output(
        "here is your JSON: {".to_string(),
    )));
    let (coordinator, diagnostics) = engine(store.clone(), generator, test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    assert!(matches!(
        response,
        GenerationResponse::Failed {
            error_code: Some(FailureCode::ProviderError),
            ..
        }
    ));
    assert!(diagnostics.saw(|e| matches!(
        e,
        DiagnosticEvent::OutputUndecodable { tail, .. } if tail.ends_with("{")
    )));
}

#[tokio::test]
async fn failed_response_never_carries_raw_provider_output() {
    let raw = "RAW_PROVIDER_PAYLOAD here is your JSON: { \"overview\": \"broken";
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::failing(ProducerErrorKind::Output(
        raw.to_string(),
    )));
    let (coordinator, diagnostics) = engine(store.clone(), generator, test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    // The recorded and returned message is the category summary; the raw
    // payload surfaces only as a bounded diagnostic tail.
    match response {
        GenerationResponse::Failed {
            error_code,
            error_message,
            ..
        } => {
            assert_eq!(error_code, Some(FailureCode::ProviderError));
            let message = error_message.unwrap();
            assert!(!message.contains("RAW_PROVIDER_PAYLOAD"), "{message}");
            assert_eq!(message, "provider returned undecodable output");
        }
        other => panic!("expected failed, got {other:?}"),
    }
    let record = store.record(&test_key(SectionKind::Overview)).unwrap();
    let stored_message = record.error_message.unwrap();
    assert!(!stored_message.contains("RAW_PROVIDER_PAYLOAD"), "{stored_message}");
    assert!(diagnostics.saw(|e| matches!(
        e,
        DiagnosticEvent::OutputUndecodable { tail, len, .. }
            if tail.contains("broken") && *len == raw.len()
    )));
}

#[tokio::test]
async fn deadline_overrun_recorded_as_timeout() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(
        ScriptedGenerator::returning(valid_overview()).with_delay(Duration::from_millis(400)),
    );
    let config =
        GenerationConfig::new("openai", "gpt-5-mini").with_timeout(Duration::from_millis(50));
    let (coordinator, _diagnostics) = engine(store.clone(), generator, config);

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    assert!(matches!(
        response,
        GenerationResponse::Failed {
            error_code: Some(FailureCode::Timeout),
            ..
        }
    ));
    let record = store.record(&test_key(SectionKind::Overview)).unwrap();
    assert_eq!(record.status, GenerationStatus::Failed);
    assert_eq!(record.error_code, Some(FailureCode::Timeout));
    // The late result is discarded, never stored.
    assert_eq!(record.content, None);
}

#[tokio::test]
async fn producer_reported_timeout_recorded_as_timeout() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::failing(ProducerErrorKind::Timeout));
    let (coordinator, _diagnostics) = engine(store.clone(), generator, test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    assert!(matches!(
        response,
        GenerationResponse::Failed {
            error_code: Some(FailureCode::Timeout),
            ..
        }
    ));
}

#[tokio::test]
async fn failed_row_served_without_regeneration() {
    let store = Arc::new(MemoryGenerationStore::new());
    store.insert_failed(&test_key(SectionKind::Overview), FailureCode::Timeout);
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, diagnostics) = engine(store.clone(), generator.clone(), test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    assert!(matches!(
        response,
        GenerationResponse::Failed {
            error_code: Some(FailureCode::Timeout),
            ..
        }
    ));
    assert_eq!(generator.calls(), 0);
    assert!(diagnostics.saw(|e| matches!(e, DiagnosticEvent::FailureObserved { .. })));
}

#[tokio::test]
async fn force_reruns_failed_row() {
    let store = Arc::new(MemoryGenerationStore::new());
    store.insert_failed(&test_key(SectionKind::Overview), FailureCode::ProviderError);
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, _diagnostics) = engine(store.clone(), generator.clone(), test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, true)
        .await
        .unwrap();

    assert!(matches!(
        response,
        GenerationResponse::Complete { stored: false, .. }
    ));
    let record = store.record(&test_key(SectionKind::Overview)).unwrap();
    assert_eq!(record.status, GenerationStatus::Complete);
    assert_eq!(record.attempt_count, 2);
    assert_eq!(record.error_code, None);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn force_regenerates_complete_row() {
    let store = Arc::new(MemoryGenerationStore::new());
    let key = test_key(SectionKind::Overview);
    store.insert_complete(
        &key,
        serde_json::json!({
            "overview": "An older overview that is being regenerated on demand.",
            "reading_time_minutes": 9
        }),
    );
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, _diagnostics) = engine(store.clone(), generator.clone(), test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, true)
        .await
        .unwrap();

    match response {
        GenerationResponse::Complete {
            stored, content, ..
        } => {
            assert!(!stored);
            assert_eq!(content, valid_overview());
        }
        other => panic!("expected complete, got {other:?}"),
    }
    let record = store.record(&key).unwrap();
    assert_eq!(record.attempt_count, 2);
    assert_eq!(record.content, Some(valid_overview()));
}

#[tokio::test]
async fn force_on_pending_row_observes_pending() {
    let store = Arc::new(MemoryGenerationStore::new());
    let key = test_key(SectionKind::Overview);
    store.claim_new(&key, "v1").unwrap();
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, diagnostics) = engine(store.clone(), generator.clone(), test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, true)
        .await
        .unwrap();

    assert!(response.is_pending());
    assert_eq!(generator.calls(), 0);
    assert!(diagnostics.saw(|e| matches!(e, DiagnosticEvent::PendingObserved { .. })));
}

#[tokio::test]
async fn superseded_attempt_is_discarded_silently() {
    let store = Arc::new(SupersedingStore::new());
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, diagnostics) = engine(store.clone(), generator, test_config());

    let response = coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();

    // The competing reclaim owns the row; this request's result is gone.
    assert!(response.is_pending());
    assert!(diagnostics.saw(|e| matches!(e, DiagnosticEvent::StaleAttemptDiscarded { .. })));
    let record = store.inner.record(&test_key(SectionKind::Overview)).unwrap();
    assert_eq!(record.status, GenerationStatus::Pending);
    assert_eq!(record.attempt_count, 2);
    assert_eq!(record.content, None);
}

#[tokio::test]
async fn unresolvable_book_fails_before_any_row_exists() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::returning(valid_overview()));
    let (coordinator, _diagnostics) = engine(store.clone(), generator.clone(), test_config());

    let result = coordinator
        .request_generation("OL999W", SectionKind::Overview, false)
        .await;

    assert!(result.is_err());
    assert_eq!(generator.calls(), 0);
    assert!(store
        .record(&bookwise_core::CacheKey::compose(
            "OL999W",
            SectionKind::Overview,
            "openai",
            "gpt-5-mini",
            "v1",
        ))
        .is_none());
}

#[tokio::test]
async fn sections_cache_independently() {
    let store = Arc::new(MemoryGenerationStore::new());
    let generator = Arc::new(ScriptedGenerator::new(vec![
        Script::Payload(valid_overview()),
        Script::Payload(serde_json::json!({
            "key_ideas": [
                "Normal science works inside a shared paradigm.",
                "Anomalies accumulate until a crisis forces revolution.",
                "Competing paradigms are incommensurable."
            ]
        })),
    ]));
    let (coordinator, _diagnostics) = engine(store.clone(), generator.clone(), test_config());

    coordinator
        .request_generation("OL1W", SectionKind::Overview, false)
        .await
        .unwrap();
    coordinator
        .request_generation("OL1W", SectionKind::KeyIdeas, false)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 2);
    assert!(store.record(&test_key(SectionKind::Overview)).is_some());
    assert!(store.record(&test_key(SectionKind::KeyIdeas)).is_some());
}

#[test]
fn finish_with_stale_token_writes_nothing() {
    let store = MemoryGenerationStore::new();
    let key = test_key(SectionKind::Overview);
    store.claim_new(&key, "v1").unwrap();
    store.supersede(&key);

    let outcome = store
        .finish(
            &key,
            AttemptToken(1),
            GenerationOutcome::Failed {
                code: FailureCode::Unexpected,
                message: "late".to_string(),
            },
        )
        .unwrap();

    assert_eq!(outcome, FinishOutcome::StaleAttempt);
    let record = store.record(&key).unwrap();
    assert_eq!(record.status, GenerationStatus::Pending);
    assert_eq!(record.attempt_count, 2);
    assert_eq!(record.error_code, None);
}
