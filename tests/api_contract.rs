//! API client tests against a mock service: the two-step creation
//! sequencing, the compensation path, and the error taxonomy.

use canvass::api::{ApiClient, ApiError, CreateOutcome};
use canvass::draft::SurveyDraft;
use canvass::models::{Credentials, Question, Reply};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn choice_question(id: i64, content: &str, options: &[&str], min: u32) -> Question {
    Question {
        id,
        content: content.to_string(),
        min,
        max: None,
        options: Some(options.iter().map(|s| s.to_string()).collect()),
    }
}

#[tokio::test]
async fn create_sequences_survey_then_questions_with_the_new_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/surveys"))
        .and(body_partial_json(json!({"title": "Pets"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    // The question batch must carry the identifier the first call
    // returned; the matcher fails the test otherwise.
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .and(body_partial_json(json!({"survey": 42})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let questions = vec![choice_question(-1, "Cat or dog?", &["Cat", "Dog"], 1)];
    let outcome = api
        .create_survey_with_questions("Pets", &questions)
        .await
        .unwrap();

    match outcome {
        CreateOutcome::Created(id) => assert_eq!(id, 42),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn end_to_end_pets_draft_reaches_the_service() {
    // The full authoring path: draft -> validation -> two-step create.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/surveys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .and(body_partial_json(json!({
            "survey": 7,
            "questions": [{"content": "Cat or dog?", "min": 1, "options": ["Cat", "Dog"]}]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut draft = SurveyDraft::new();
    draft.set_title("Pets");
    let id = draft.fresh_id();
    draft.add_question(choice_question(id, "Cat or dog?", &["Cat", "Dog"], 1));

    let (title, questions) = draft.submission().expect("draft is valid");
    assert_eq!(title, "Pets");
    assert_eq!(questions.len(), 1);

    let api = ApiClient::new(server.uri()).unwrap();
    let outcome = api
        .create_survey_with_questions(&title, &questions)
        .await
        .unwrap();
    assert!(matches!(outcome, CreateOutcome::Created(7)));
}

#[tokio::test]
async fn failed_question_batch_triggers_the_compensating_delete() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/surveys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "database unavailable"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/surveys/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let questions = vec![choice_question(-1, "Cat or dog?", &["Cat", "Dog"], 1)];
    let outcome = api
        .create_survey_with_questions("Pets", &questions)
        .await
        .unwrap();

    match outcome {
        CreateOutcome::RolledBack { error } => {
            assert_eq!(error.to_string(), "database unavailable");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn failed_compensation_reports_the_orphan() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/surveys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 11})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/surveys/11"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "still broken"})))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let questions = vec![choice_question(-1, "Cat or dog?", &["Cat", "Dog"], 1)];
    let outcome = api
        .create_survey_with_questions("Pets", &questions)
        .await
        .unwrap();

    match outcome {
        CreateOutcome::Orphaned { survey_id, .. } => assert_eq!(survey_id, 11),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn unauthorized_probe_maps_to_the_auth_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sessions/current"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "unauthenticated user"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let err = api.get_user_info().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "unauthenticated user");
}

#[tokio::test]
async fn login_returns_the_display_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sessions"))
        .and(body_partial_json(json!({"username": "carol"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Carol"})))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let name = api
        .login(&Credentials {
            username: "carol".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(name, "Carol");
}

#[tokio::test]
async fn rejected_login_surfaces_the_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sessions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "wrong credentials"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let err = api
        .login(&Credentials {
            username: "carol".to_string(),
            password: "nope".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "wrong credentials");
}

#[tokio::test]
async fn survey_list_parses_service_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/surveys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Pets", "questions": [10, 11], "respondents": 3},
            {"id": 2, "title": "Office lunch"}
        ])))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let surveys = api.get_surveys().await.unwrap();
    assert_eq!(surveys.len(), 2);
    assert_eq!(surveys[0].questions, vec![10, 11]);
    assert_eq!(surveys[1].respondents, 0);
}

#[tokio::test]
async fn reply_submission_posts_the_reply_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/replies"))
        .and(body_partial_json(json!({"survey": 5})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    api.add_reply(&Reply {
        survey: 5,
        answers: Vec::new(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn server_error_keeps_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/surveys"))
        .respond_with(ResponseTemplate::new(503).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    match api.get_surveys().await.unwrap_err() {
        ApiError::Api { status, .. } => assert_eq!(status, 503),
        other => panic!("unexpected error: {:?}", other),
    }
}
