//! Page-level submit state: lesson text, loading flag, error message, and the
//! current game bundle.
//!
//! The transitions are explicit functions over the state struct so they can be
//! driven (and tested) without any rendering surface: `begin_submit` validates
//! and enters the loading state, `complete_submit` applies the outcome and
//! always leaves loading. The async `submit` wrapper wires the two around the
//! actual network call.

use tracing::{info, instrument, warn};

use crate::client::{GamesApi, SubmitError};
use crate::domain::{GameBundle, LessonSubmission};

pub const VALIDATION_MESSAGE: &str = "Please paste some lesson text first.";

#[derive(Clone, Debug, Default)]
pub struct PageController {
  pub lesson_text: String,
  pub loading: bool,
  /// Empty string means no error.
  pub error: String,
  pub bundle: Option<GameBundle>,
}

impl PageController {
  pub fn new() -> Self {
    Self::default()
  }

  /// The lesson text may be edited at any time, including while a request is
  /// outstanding; it is only read when a submission begins.
  pub fn set_lesson_text(&mut self, text: impl Into<String>) {
    self.lesson_text = text.into();
  }

  /// Whether the submit control is enabled. Driven only by `loading`.
  pub fn can_submit(&self) -> bool {
    !self.loading
  }

  /// Validate and enter the loading state. Returns the payload to send, or
  /// None when validation failed (no request must be issued).
  pub fn begin_submit(&mut self) -> Option<LessonSubmission> {
    if self.lesson_text.trim().is_empty() {
      self.error = VALIDATION_MESSAGE.to_string();
      return None;
    }
    self.loading = true;
    self.error.clear();
    self.bundle = None;
    Some(LessonSubmission { lesson_text: self.lesson_text.clone() })
  }

  /// Apply the outcome of a request. Loading is cleared first so every exit
  /// path, success or failure, returns the page to an idle submittable state.
  pub fn complete_submit(&mut self, outcome: Result<GameBundle, SubmitError>) {
    self.loading = false;
    match outcome {
      Ok(bundle) => {
        info!(target: "quizsmith", games = bundle.games.len(), "Submission succeeded");
        self.bundle = Some(bundle);
      }
      Err(e) => {
        self.error = e.user_message();
      }
    }
  }

  /// Full submit flow: validation, one request, outcome applied. Re-entry
  /// while a request is outstanding is refused.
  #[instrument(level = "info", skip(self, api), fields(text_len = self.lesson_text.len()))]
  pub async fn submit(&mut self, api: &GamesApi) {
    if self.loading {
      warn!(target: "quizsmith", "Submit ignored: request already in flight");
      return;
    }
    let Some(payload) = self.begin_submit() else {
      return;
    };
    let outcome = api.submit_lesson(&payload.lesson_text).await;
    self.complete_submit(outcome);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::{instantiate, match_mode, GameWidget};

  fn sample_bundle() -> GameBundle {
    serde_json::from_str(
      r#"{
        "lessonSummary": "Photosynthesis basics",
        "complexity": "intermediate",
        "ageRange": "10-12",
        "games": [
          {
            "type": "multipleChoice",
            "title": "Photosynthesis check",
            "description": "Pick the best answer",
            "questions": [
              {
                "question": "What does photosynthesis convert light into?",
                "options": ["Energy", "Sound", "Heat only"],
                "correctAnswer": "Energy",
                "explanation": "Light energy becomes chemical energy.",
                "hint": "Stored in glucose."
              },
              {
                "question": "Where does photosynthesis happen?",
                "options": ["Roots", "Chloroplasts"],
                "correctAnswer": "Chloroplasts",
                "explanation": "Chloroplasts hold the chlorophyll."
              }
            ]
          }
        ]
      }"#,
    )
    .expect("bundle")
  }

  #[test]
  fn blank_text_sets_validation_error_without_a_request() {
    let mut page = PageController::new();
    page.set_lesson_text("   \n\t  ");
    assert!(page.begin_submit().is_none());
    assert_eq!(page.error, VALIDATION_MESSAGE);
    assert!(!page.loading);
    assert!(page.bundle.is_none());
  }

  #[test]
  fn begin_submit_enters_loading_and_clears_prior_state() {
    let mut page = PageController::new();
    page.error = "old error".into();
    page.bundle = Some(sample_bundle());
    page.set_lesson_text("Photosynthesis converts light into energy.");

    let payload = page.begin_submit().expect("payload");
    assert_eq!(payload.lesson_text, "Photosynthesis converts light into energy.");
    assert!(page.loading);
    assert!(!page.can_submit());
    assert!(page.error.is_empty());
    assert!(page.bundle.is_none());
  }

  #[test]
  fn success_stores_the_bundle_exactly_and_leaves_loading() {
    let mut page = PageController::new();
    page.set_lesson_text("lesson");
    page.begin_submit().unwrap();

    let bundle = sample_bundle();
    page.complete_submit(Ok(bundle.clone()));
    assert_eq!(page.bundle, Some(bundle));
    assert!(page.error.is_empty());
    assert!(!page.loading);
    assert!(page.can_submit());
  }

  #[test]
  fn failure_sets_error_and_leaves_loading() {
    let mut page = PageController::new();
    page.set_lesson_text("lesson");
    page.begin_submit().unwrap();

    let parse_err = serde_json::from_str::<GameBundle>("{").unwrap_err();
    page.complete_submit(Err(SubmitError::Decode(parse_err)));
    assert!(page.bundle.is_none());
    assert!(!page.error.is_empty());
    assert!(!page.loading);
  }

  #[test]
  fn photosynthesis_end_to_end_scenario() {
    // Submit -> bundle with one two-question game -> score 0/2, then 1/2,
    // then further checks are scoring-inert.
    let mut page = PageController::new();
    page.set_lesson_text("Photosynthesis converts light into energy.");
    page.begin_submit().unwrap();
    page.complete_submit(Ok(sample_bundle()));

    let bundle = page.bundle.as_ref().expect("bundle");
    let widget = instantiate(&bundle.games[0]).expect("widget");
    let mode = match_mode(&widget);
    let mut w = match widget {
      GameWidget::MultipleChoice(w) => w,
      _ => panic!("expected multiple choice"),
    };
    assert_eq!(w.session.score_line(), "Score: 0/2");

    let correct = w.questions[0].correct_answer.clone();
    w.session.record_response(0, correct.clone());
    assert_eq!(w.session.check_answer(0, &correct, mode), Some(true));
    assert_eq!(w.session.score_line(), "Score: 1/2");

    let correct2 = w.questions[1].correct_answer.clone();
    w.session.record_response(1, correct2.clone());
    assert_eq!(w.session.check_answer(1, &correct2, mode), Some(true));
    assert_eq!(w.session.score_line(), "Score: 1/2");
  }
}
