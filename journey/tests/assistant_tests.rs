mod common;

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use journey::assistant::{
    ConversationCorpus, ExchangeOutcome, FailureKind, GroundedAssistant, PromptRules, APOLOGY,
    MISSING_CREDENTIAL,
};
use journey::config::AssistantConfig;
use journey::llm::LlmProvider;
use journey::models::{ConversationMessage, Sender};
use journey::services::Dashboard;
use journey::store::RecordStore;

use common::{
    api_error_body, completion_body, init_test_logger, llm_config_for, COMPLETIONS_PATH,
};

fn rohan_corpus() -> ConversationCorpus {
    ConversationCorpus::new("Rohan")
        .with_entry(
            8,
            "Rohan reported fatigue after his trip to Jakarta. The team scheduled a bloodwork review.",
        )
        .with_entry(
            9,
            "Rohan is recovering from an appendectomy. Ruby helped him set medication reminders.",
        )
}

fn assistant_for(server: &MockServer) -> GroundedAssistant {
    GroundedAssistant::new(
        LlmProvider::new(&llm_config_for(server)),
        PromptRules::new("Aura", "Rohan"),
    )
}

#[tokio::test]
async fn answer_with_citations_is_grounded() {
    init_test_logger();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_string_contains("Week 9: Rohan is recovering"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "Rohan set medication reminders while recovering from surgery. (Source: Week 9, Week 12)",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let reply = assistant_for(&server)
        .answer("How is Rohan managing his medication?", &rohan_corpus())
        .await;

    // Week 12 has no conversation and is dropped from the citations.
    assert_eq!(
        reply.outcome,
        ExchangeOutcome::Answered {
            cited_weeks: vec![9]
        }
    );
    assert!(reply.message.text.contains("(Source: Week 9, Week 12)"));
    assert_eq!(reply.message.sender, Sender::Assistant);
}

#[tokio::test]
async fn refusal_reply_is_ungrounded() {
    init_test_logger();
    let server = MockServer::start().await;
    let refusal = "I'm sorry, I couldn't find information on that in Rohan's conversation history.";

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(refusal)))
        .expect(1)
        .mount(&server)
        .await;

    let reply = assistant_for(&server)
        .answer("What did Rohan eat on his birthday?", &rohan_corpus())
        .await;

    assert_eq!(reply.outcome, ExchangeOutcome::Ungrounded);
    assert_eq!(reply.message.text, refusal);
}

#[tokio::test]
async fn upstream_error_appends_apology_after_question() {
    init_test_logger();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(api_error_body("boom")))
        .expect(1)
        .mount(&server)
        .await;

    let assistant = assistant_for(&server);
    let mut history = vec![assistant.greeting()];

    let exchange = assistant
        .ask("Why did Rohan have surgery?", &rohan_corpus(), &mut history)
        .await
        .unwrap();

    assert_eq!(
        exchange.outcome,
        ExchangeOutcome::Failed {
            kind: FailureKind::UpstreamFailure
        }
    );
    assert_eq!(
        history,
        vec![
            assistant.greeting(),
            ConversationMessage::user("Why did Rohan have surgery?"),
            ConversationMessage::assistant(APOLOGY),
        ]
    );
}

#[tokio::test]
async fn malformed_completion_is_upstream_failure() {
    init_test_logger();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;

    let reply = assistant_for(&server)
        .answer("Why did Rohan have surgery?", &rohan_corpus())
        .await;

    assert_eq!(
        reply.outcome,
        ExchangeOutcome::Failed {
            kind: FailureKind::UpstreamFailure
        }
    );
    assert_eq!(reply.message.text, APOLOGY);
}

#[tokio::test]
async fn missing_credential_never_calls_the_service() {
    init_test_logger();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = llm_config_for(&server);
    config.api_key = None;
    let assistant = GroundedAssistant::new(
        LlmProvider::new(&config),
        PromptRules::new("Aura", "Rohan"),
    );

    let reply = assistant
        .answer("Why did Rohan have surgery?", &rohan_corpus())
        .await;

    assert_eq!(
        reply.outcome,
        ExchangeOutcome::Failed {
            kind: FailureKind::MissingCredential
        }
    );
    assert_eq!(reply.message.text, MISSING_CREDENTIAL);
}

#[tokio::test]
async fn dashboard_session_runs_week_nine_exchange() {
    init_test_logger();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_string_contains("Why was I in the hospital?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "Rohan had an emergency appendectomy and is recovering. (Source: Week 9)",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(
        RecordStore::demo().unwrap(),
        LlmProvider::new(&llm_config_for(&server)),
        &AssistantConfig::default(),
    );
    let session = dashboard.open_session();

    let exchange = dashboard
        .ask(session.id(), "  Why was I in the hospital?  ")
        .await
        .unwrap();

    assert_eq!(exchange.question.text, "Why was I in the hospital?");
    assert_eq!(
        exchange.outcome,
        ExchangeOutcome::Answered {
            cited_weeks: vec![9]
        }
    );

    let messages = dashboard.session_messages(session.id()).unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].text.starts_with("Hi! I'm Aura"));
    assert!(messages[1].is_user());
    assert_eq!(messages[2], exchange.reply);
}
