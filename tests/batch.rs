//! Batch validation: caps, cancellation and isolation of failures.

mod helpers;

use std::time::Duration;

use helpers::validator;
use schema_audit::{SchemaValidator, ValidationMode, ValidatorConfig};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn person_sources(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!(r#"{{"@type":"Person","name":"Person {i}"}}"#))
        .collect()
}

#[tokio::test]
async fn test_batch_capped_at_limit() {
    let validator = validator(ValidationMode::Strict);
    let sources = person_sources(60);
    let batch = validator
        .validate_batch(&sources, &CancellationToken::new(), None)
        .await;

    assert_eq!(batch.requested, 60);
    assert_eq!(batch.processed, 50);
    assert_eq!(batch.reports.len(), 50);
    assert!(batch.truncated);
    assert!(!batch.timed_out);
    assert!(!batch.cancelled);
}

#[tokio::test]
async fn test_batch_within_limit_not_truncated() {
    let validator = SchemaValidator::new(ValidatorConfig {
        batch_limit: 5,
        ..Default::default()
    })
    .expect("validator");
    let batch = validator
        .validate_batch(&person_sources(5), &CancellationToken::new(), None)
        .await;
    assert_eq!(batch.processed, 5);
    assert!(!batch.truncated);
}

#[tokio::test]
async fn test_failures_do_not_abort_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let validator = validator(ValidationMode::Strict);
    let sources = vec![
        r#"{"@type":"Person","#.to_string(),
        format!("{}/broken", server.uri()),
        r#"{"@type":"Person","name":"Jane"}"#.to_string(),
    ];
    let batch = validator
        .validate_batch(&sources, &CancellationToken::new(), None)
        .await;

    assert_eq!(batch.processed, 3);
    assert!(!batch.reports[0].validation_results[0].parsed);
    assert_eq!(batch.reports[1].schemas_found, 0);
    assert!(batch.reports[1].errors[0].contains("500"));
    assert!(batch.reports[2].validation_results[0].valid);
}

#[tokio::test]
async fn test_budget_stops_between_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>slow</p>")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let validator = SchemaValidator::builder(ValidatorConfig::default())
        .without_cache()
        .build()
        .expect("validator");
    let sources: Vec<String> = (0..5).map(|i| format!("{}/{i}", server.uri())).collect();
    let batch = validator
        .validate_batch(
            &sources,
            &CancellationToken::new(),
            Some(Duration::from_millis(100)),
        )
        .await;

    assert!(batch.timed_out);
    assert!(batch.truncated);
    assert_eq!(batch.processed, 1);
}
