//! Canvass - a terminal client for a survey-taking service
//!
//! This library provides the survey builder, the respondent form, the
//! reply browser, and the API client they share.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod draft;
pub mod models;
pub mod routing;
pub mod screens;
pub mod session;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use draft::SurveyDraft;
pub use models::{Answer, AnswerValue, Question, Reply, Survey};
pub use session::Session;
