use std::sync::Arc;
use std::time::Duration;

use design_eval::cache::ResultCache;
use design_eval::config::Config;
use design_eval::design::{Confidence, Severity};
use design_eval::evaluate::comments::post_evaluation_comments;
use design_eval::evaluate::store::{load_json, save_json};
use design_eval::evaluate::{EvaluationResult, Evaluator};
use design_eval::providers::{AnthropicComparator, FigmaClient};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::uniform_profile;

fn figma_file() -> serde_json::Value {
    json!({
        "name": "Candidate onboarding",
        "document": {
            "id": "0:0",
            "type": "DOCUMENT",
            "name": "Document",
            "children": [{
                "id": "0:1",
                "type": "CANVAS",
                "name": "Page 1",
                "children": [
                    {
                        "id": "1:1",
                        "type": "FRAME",
                        "name": "Welcome",
                        "children": [
                            { "id": "1:2", "type": "TEXT", "name": "Title", "characters": "Welcome aboard friend" },
                            { "id": "1:3", "type": "INSTANCE", "name": "CTA Primary" }
                        ]
                    },
                    {
                        "id": "2:1",
                        "type": "FRAME",
                        "name": "Plan",
                        "children": [
                            { "id": "2:2", "type": "TEXT", "name": "Title", "characters": "Pick a plan" },
                            { "id": "2:3", "type": "INSTANCE", "name": "CTA Primary" },
                            { "id": "2:4", "type": "VECTOR", "name": "illustration hero" }
                        ]
                    },
                    { "id": "3:1", "type": "FRAME", "name": "Blank" }
                ]
            }]
        }
    })
}

fn comparator_reply() -> serde_json::Value {
    let text = "```json\n{\n  \"deviations\": [\n    {\"area\": \"Progress indicators\", \"reference_value\": 1.0, \"candidate_value\": 0.0, \"impact\": \"Users lose track of where they are\", \"severity\": \"high\"},\n    {\"area\": \"Tone\", \"reference_value\": \"friendly\", \"candidate_value\": \"friendly\", \"impact\": \"none\", \"severity\": \"unknown\"}\n  ],\n  \"overall_assessment\": \"Shorter but loses orientation cues\",\n  \"comparison_confidence\": \"HIGH\"\n}\n```";
    json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn"
    })
}

#[tokio::test]
async fn full_run_against_mock_services() {
    let figma_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/CAND12345678"))
        .and(header("X-Figma-Token", "figd_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(figma_file()))
        .expect(1)
        .mount(&figma_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/files/CAND12345678/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "c" })))
        .expect(3)
        .mount(&figma_server)
        .await;

    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comparator_reply()))
        .expect(1)
        .mount(&llm_server)
        .await;

    let tmp = TempDir::new().unwrap();
    let figma = Arc::new(FigmaClient::with_base_url(
        Some("figd_test"),
        Some(&figma_server.uri()),
    ));
    let comparator =
        AnthropicComparator::with_base_url(Some("sk-ant-test"), Some(&llm_server.uri()));
    let evaluator = Evaluator::new(figma.clone(), Arc::new(comparator))
        .with_cache(ResultCache::new(tmp.path().join("cache"), Duration::from_secs(3600)));

    let reference = uniform_profile(3, &[true, true, true]);
    let result = evaluator
        .evaluate(&reference, "CAND12345678", None, true)
        .await
        .unwrap();

    assert_eq!(result.candidate_profile.frame_count(), 2);
    assert_eq!(result.candidate_profile.metadata.frame_names, ["Welcome", "Plan"]);
    assert_eq!(result.deviations[0].reference_value, "1.0");
    assert_eq!(result.deviations[1].severity, Severity::Low);
    assert_eq!(result.confidence, Confidence::High);
    // Missing progress (-1.0) and one high deviation (-1.0).
    assert!((result.score - 8.0).abs() < 1e-9);

    // Second extraction is served from the cache; the mock expects one GET.
    let frames = evaluator.extract("CAND12345678", None, true).await.unwrap();
    assert_eq!(frames.len(), 2);

    let out = Config::default().evaluation_output_path("CAND12345678");
    assert!(out.ends_with("evaluation_CAND1234.json"));
    let saved = tmp.path().join(out.file_name().unwrap());
    save_json(&saved, &result).unwrap();
    let reloaded: EvaluationResult = load_json(&saved).unwrap();
    assert_eq!(reloaded, result);

    assert_eq!(post_evaluation_comments(&figma, &result).await, 3);
}

#[tokio::test]
async fn upstream_error_stops_the_run() {
    let figma_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "status": 404, "err": "Not found" })))
        .mount(&figma_server)
        .await;

    let evaluator = Evaluator::new(
        Arc::new(FigmaClient::with_base_url(Some("figd_test"), Some(&figma_server.uri()))),
        Arc::new(AnthropicComparator::new(Some("sk-ant-unused"))),
    );
    let err = evaluator
        .evaluate(&uniform_profile(3, &[false]), "MISSING", None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, design_eval::EvalError::UpstreamFetch { .. }));
    assert!(err.to_string().contains("404"));
}
