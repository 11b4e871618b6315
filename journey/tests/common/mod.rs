// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Once;

use serde_json::json;
use wiremock::MockServer;

use journey::config::LlmConfig;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// LLM settings pointed at a mock server.
pub fn llm_config_for(server: &MockServer) -> LlmConfig {
    LlmConfig {
        model: "openai/gpt-4o-mini".to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(format!("{}/v1", server.uri())),
        timeout_secs: Some(5),
    }
}

pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": "server_error",
            "param": serde_json::Value::Null,
            "code": "internal_error"
        }
    })
}

/// A small valid record: four weeks, one intervention, conversations in
/// weeks 2 and 3.
pub fn small_record_json() -> serde_json::Value {
    json!({
        "member": {
            "name": "Ana",
            "memberId": "MBR-T-1",
            "startDate": "2025-03-03",
            "totalWeeks": 4
        },
        "weeklyTimeline": [
            {"week": 1, "adherenceLevel": 0.7},
            {"week": 2, "adherenceLevel": 0.85, "majorEvent": "Started walking plan"},
            {"week": 3, "adherenceLevel": 0.95},
            {"week": 4, "adherenceLevel": 1.0}
        ],
        "metrics": {
            "blood_pressure": [
                {"week": 1, "value": 150.0, "secondary": 95.0},
                {"week": 3, "value": 128.0, "secondary": 82.0}
            ],
            "adherence": [
                {"week": 1, "value": 0.7},
                {"week": 2, "value": 0.85},
                {"week": 3, "value": 0.95},
                {"week": 4, "value": 1.0}
            ]
        },
        "weeklySummaries": {
            "2": {"currentSymptoms": ["headache"], "keyDecisions": ["Start a walking plan"]}
        },
        "memberQuestions": {
            "2": {"questions": ["Can I exercise?"], "summary": "Asked about exercise."}
        },
        "weeklyConversations": {
            "2": {"rationale": "Ana asked about exercise; the team proposed a daily walk."},
            "3": {"rationale": "Blood pressure improved after two weeks of walking."}
        },
        "wearableStatus": {
            "status": "active",
            "lastUpdate": "Just now",
            "batteryLevel": 60
        },
        "interventions": [
            {"week": 2, "title": "Walking Plan", "description": "Daily 30 minute walk."}
        ]
    })
}
