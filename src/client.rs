//! Minimal client for the game-generation service.
//!
//! One POST per submission, no retries, no streaming. Calls are instrumented
//! and log latencies, status codes, and response sizes (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::config::ApiConfig;
use crate::domain::{GameBundle, LessonSubmission};
use crate::util::trunc_for_log;

/// How a submission failed. Every variant renders to one combined
/// user-facing message via [`SubmitError::user_message`].
#[derive(Debug)]
pub enum SubmitError {
  /// Connectivity or timeout before a response body could be read.
  Network(reqwest::Error),
  /// The service answered with a non-success status.
  Service { status: StatusCode, message: String },
  /// The response body was not a decodable `GameBundle`.
  Decode(serde_json::Error),
}

impl std::fmt::Display for SubmitError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SubmitError::Network(e) => write!(f, "network error: {}", e),
      SubmitError::Service { status, message } => write!(f, "service error (HTTP {}): {}", status, message),
      SubmitError::Decode(e) => write!(f, "malformed response: {}", e),
    }
  }
}

impl std::error::Error for SubmitError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SubmitError::Network(e) => Some(e),
      SubmitError::Service { .. } => None,
      SubmitError::Decode(e) => Some(e),
    }
  }
}

impl SubmitError {
  /// Fixed fallback sentence plus the underlying error's message.
  pub fn user_message(&self) -> String {
    format!("Failed to generate games from the lesson. {}", self)
  }
}

#[derive(Clone)]
pub struct GamesApi {
  client: reqwest::Client,
  base_url: String,
  api_key: Option<String>,
}

impl GamesApi {
  pub fn new(cfg: &ApiConfig) -> Self {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .unwrap_or_else(|_| reqwest::Client::new());

    Self {
      client,
      base_url: cfg.base_url.clone(),
      api_key: cfg.api_key.clone(),
    }
  }

  /// Submit lesson text and decode the returned `GameBundle`.
  /// A single round trip: no retries and no per-call timeout tuning.
  #[instrument(level = "info", skip(self, lesson_text), fields(text_len = lesson_text.len()))]
  pub async fn submit_lesson(&self, lesson_text: &str) -> Result<GameBundle, SubmitError> {
    let url = format!("{}/items", self.base_url);
    let body = LessonSubmission { lesson_text: lesson_text.to_string() };

    let mut req = self
      .client
      .post(&url)
      .header(USER_AGENT, "quizsmith/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&body);
    if let Some(key) = &self.api_key {
      req = req.header(AUTHORIZATION, format!("Bearer {}", key));
    }

    let start = std::time::Instant::now();
    let res = req.send().await.map_err(|e| {
      error!(target: "quizsmith", error = %e, "Request to generation service failed");
      SubmitError::Network(e)
    })?;
    let status = res.status();

    if !status.is_success() {
      let raw = res.text().await.unwrap_or_default();
      let message = extract_service_error(&raw).unwrap_or(raw);
      error!(target: "quizsmith", %status, message = %trunc_for_log(&message, 200), "Generation service returned an error");
      return Err(SubmitError::Service { status, message });
    }

    // Read the body as text first so a malformed payload is a Decode error,
    // distinct from transport failures.
    let raw = res.text().await.map_err(SubmitError::Network)?;
    let bundle = serde_json::from_str::<GameBundle>(&raw).map_err(|e| {
      error!(target: "quizsmith", error = %e, body = %trunc_for_log(&raw, 200), "Failed to decode game bundle");
      SubmitError::Decode(e)
    })?;

    info!(
      target: "quizsmith",
      elapsed = ?start.elapsed(),
      body_bytes = raw.len(),
      games = bundle.games.len(),
      "Game bundle received"
    );
    Ok(bundle)
  }
}

/// Try to extract a clean error message from a service error body.
fn extract_service_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
