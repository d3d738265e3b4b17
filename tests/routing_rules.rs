//! Integration tests for session transitions combined with the routing
//! rules: what a visitor or admin actually ends up seeing.

use canvass::models::Survey;
use canvass::routing::{resolve, Route, View};
use canvass::session::Session;

fn surveys() -> Vec<Survey> {
    vec![
        Survey {
            id: 1,
            title: "Pets".to_string(),
            questions: vec![10, 11],
            respondents: 3,
        },
        Survey {
            id: 2,
            title: "Office lunch".to_string(),
            questions: Vec::new(),
            respondents: 0,
        },
    ]
}

#[test]
fn visitor_flow_probe_fails_then_answers() {
    // Given: a fresh client whose probe came back unauthorized
    let mut session = Session::default();
    assert_eq!(session, Session::Unknown);
    session.on_probe_failed();
    assert_eq!(session, Session::Anonymous);

    // Then: a survey route renders the respondent form
    assert_eq!(
        resolve(Route::Survey(1), &session, &surveys()),
        View::RespondentForm(1)
    );
    // And: the builder is out of reach
    assert_eq!(resolve(Route::Builder, &session, &surveys()), View::SurveyList);
}

#[test]
fn admin_flow_login_then_reviews_replies() {
    // Given: a visitor who logs in
    let mut session = Session::Anonymous;
    session.on_login("carol".to_string());
    assert!(session.is_authenticated());
    assert_eq!(session.name(), Some("carol"));

    // Then: the same survey route now renders the results view
    assert_eq!(
        resolve(Route::Survey(1), &session, &surveys()),
        View::Results(1)
    );
    // And: the builder opens
    assert_eq!(resolve(Route::Builder, &session, &surveys()), View::Builder);
    // And: the login route bounces back to the list
    assert_eq!(resolve(Route::Login, &session, &surveys()), View::SurveyList);
}

#[test]
fn logout_downgrades_the_running_session() {
    let mut session = Session::Authenticated {
        name: "carol".to_string(),
    };
    session.on_logout();
    assert_eq!(session, Session::Anonymous);

    assert_eq!(
        resolve(Route::Survey(2), &session, &surveys()),
        View::RespondentForm(2)
    );
}

#[test]
fn unknown_survey_always_redirects_to_the_list() {
    let admin = Session::Authenticated {
        name: "carol".to_string(),
    };
    for session in [&admin, &Session::Anonymous] {
        assert_eq!(
            resolve(Route::Survey(404), session, &surveys()),
            View::SurveyList
        );
    }
}

#[test]
fn session_probe_success_carries_the_name() {
    let mut session = Session::Unknown;
    session.on_login("dave".to_string());
    // The root controller formats the welcome toast from this name.
    let welcome = format!("Welcome, {}!", session.name().unwrap());
    assert_eq!(welcome, "Welcome, dave!");
}

#[test]
fn surveys_route_is_always_reachable() {
    for session in [
        Session::Unknown,
        Session::Anonymous,
        Session::Authenticated {
            name: "carol".to_string(),
        },
    ] {
        assert_eq!(resolve(Route::Surveys, &session, &[]), View::SurveyList);
    }
}
