//! HTTP client for the remote survey service.
//!
//! The service speaks JSON and tracks the admin session with a cookie, so
//! the client is built with a cookie store and reused for the whole
//! application lifetime. Every call returns a structured [`ApiError`] so
//! the caller can tell an expired session apart from a broken network.

use crate::models::{Credentials, Question, Reply, Survey};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Result alias for survey service calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced by the survey service boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Session probe or login rejected by the service.
    #[error("{0}")]
    Unauthorized(String),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed (DNS, refused connection, dropped body).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether the failure means the current session is not valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

/// Error body the service uses for every failure: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: i64,
}

#[derive(Debug, Serialize)]
struct CreateSurveyRequest<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateQuestionsRequest<'a> {
    survey: i64,
    questions: &'a [Question],
}

/// Outcome of the two-step survey creation, including what happened to the
/// partially created survey when the second step failed.
#[derive(Debug)]
pub enum CreateOutcome {
    /// Both steps succeeded; the new survey identifier.
    Created(i64),
    /// Question creation failed and the orphaned survey was deleted.
    RolledBack { error: ApiError },
    /// Question creation failed and the compensating delete failed too;
    /// the service now holds a survey with no questions.
    Orphaned { survey_id: i64, error: ApiError },
}

/// Client for the survey service.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("canvass/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into an [`ApiError`], preferring the
    /// service's own `error` message when the body carries one.
    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let fallback = format!("Request failed ({})", status);
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => fallback,
        };
        error!(status = status.as_u16(), %message, "survey service error");
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Probe the current session. Fails with [`ApiError::Unauthorized`]
    /// when no valid session cookie is held.
    pub async fn get_user_info(&self) -> ApiResult<String> {
        debug!("probing session");
        let response = self.http.get(self.url("/api/sessions/current")).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let user: UserBody = response.json().await?;
        Ok(user.name)
    }

    /// Log in with credentials. Returns the display name on success.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        info!(username = %credentials.username, "logging in");
        let response = self
            .http
            .post(self.url("/api/sessions"))
            .json(credentials)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let user: UserBody = response.json().await?;
        Ok(user.name)
    }

    /// Log out, clearing the server-side session.
    pub async fn logout(&self) -> ApiResult<()> {
        info!("logging out");
        let response = self
            .http
            .delete(self.url("/api/sessions/current"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    /// Fetch all surveys.
    pub async fn get_surveys(&self) -> ApiResult<Vec<Survey>> {
        debug!("fetching surveys");
        let response = self.http.get(self.url("/api/surveys")).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch the ordered questions of one survey.
    pub async fn get_questions(&self, survey_id: i64) -> ApiResult<Vec<Question>> {
        debug!(survey_id, "fetching questions");
        let response = self
            .http
            .get(self.url(&format!("/api/surveys/{}/questions", survey_id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch the collected replies of one survey (admin only).
    pub async fn get_replies(&self, survey_id: i64) -> ApiResult<Vec<Reply>> {
        debug!(survey_id, "fetching replies");
        let response = self
            .http
            .get(self.url(&format!("/api/surveys/{}/replies", survey_id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json().await?)
    }

    /// Create a survey record. Returns the identifier assigned by the
    /// service.
    pub async fn create_survey(&self, title: &str) -> ApiResult<i64> {
        info!(%title, "creating survey");
        let response = self
            .http
            .post(self.url("/api/surveys"))
            .json(&CreateSurveyRequest { title })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let created: CreatedBody = response.json().await?;
        Ok(created.id)
    }

    /// Create a batch of questions tagged with `survey_id`.
    pub async fn create_questions(&self, survey_id: i64, questions: &[Question]) -> ApiResult<()> {
        info!(survey_id, count = questions.len(), "creating questions");
        let response = self
            .http
            .post(self.url("/api/questions"))
            .json(&CreateQuestionsRequest {
                survey: survey_id,
                questions,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    /// Delete a survey. Only used to compensate for a failed question
    /// batch; surveys are otherwise never removed from this client.
    pub async fn delete_survey(&self, survey_id: i64) -> ApiResult<()> {
        warn!(survey_id, "deleting orphaned survey");
        let response = self
            .http
            .delete(self.url(&format!("/api/surveys/{}", survey_id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    /// Submit one respondent's reply.
    pub async fn add_reply(&self, reply: &Reply) -> ApiResult<()> {
        info!(survey = reply.survey, answers = reply.answers.len(), "submitting reply");
        let response = self
            .http
            .post(self.url("/api/replies"))
            .json(reply)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    /// The two-step creation: survey first, then its questions tagged with
    /// the returned identifier. The second call is only issued once the
    /// first has produced an id. There is no server-side transaction, so a
    /// failed question batch triggers a compensating delete of the survey;
    /// if even that fails the orphan is reported rather than hidden.
    pub async fn create_survey_with_questions(
        &self,
        title: &str,
        questions: &[Question],
    ) -> ApiResult<CreateOutcome> {
        let survey_id = self.create_survey(title).await?;

        match self.create_questions(survey_id, questions).await {
            Ok(()) => Ok(CreateOutcome::Created(survey_id)),
            Err(error) => match self.delete_survey(survey_id).await {
                Ok(()) => Ok(CreateOutcome::RolledBack { error }),
                Err(delete_error) => {
                    error!(
                        survey_id,
                        %delete_error,
                        "compensating delete failed, survey left without questions"
                    );
                    Ok(CreateOutcome::Orphaned { survey_id, error })
                }
            },
        }
    }
}
