//! Per-game quiz session: the state machine behind one rendered game.
//!
//! Each answerable item moves Unanswered -> Answered -> Revealed. The session
//! carries one shared `locked` flag: the first checked item locks scoring for
//! the whole session, so later correct answers reveal feedback but never add
//! to the score. That policy is carried over verbatim from the source app.

use std::collections::HashMap;

use tracing::{debug, instrument};
use uuid::Uuid;

/// How a stored response is compared against the expected answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerMatch {
  /// Strict string equality (multiple-choice options).
  Exact,
  /// Lower-case both sides before comparing (typed fill-in answers).
  CaseInsensitive,
}

/// Compare an optional stored response against the expected answer.
/// An absent response is unequal to any answer.
pub fn matches(response: Option<&str>, correct: &str, mode: AnswerMatch) -> bool {
  match (response, mode) {
    (None, _) => false,
    (Some(r), AnswerMatch::Exact) => r == correct,
    (Some(r), AnswerMatch::CaseInsensitive) => r.to_lowercase() == correct.to_lowercase(),
  }
}

/// Mutable state for one rendered game instance. Owned exclusively by its
/// widget and discarded with it; nothing here is shared or persisted.
#[derive(Clone, Debug)]
pub struct QuizSession {
  id: Uuid,
  total: usize,
  responses: HashMap<usize, String>,
  revealed: HashMap<usize, bool>,
  score: u32,
  locked: bool,
}

impl QuizSession {
  pub fn new(total: usize) -> Self {
    Self {
      id: Uuid::new_v4(),
      total,
      responses: HashMap::new(),
      revealed: HashMap::new(),
      score: 0,
      locked: false,
    }
  }

  /// Store the user's current answer for an item. Allowed in any state.
  /// Re-answering after a reveal hides the feedback again but keeps any
  /// score credit already granted.
  pub fn record_response(&mut self, index: usize, value: impl Into<String>) {
    self.responses.insert(index, value.into());
    self.revealed.insert(index, false);
  }

  /// Reveal feedback for an item and return whether it matched.
  /// No-op (None) when no response has been recorded for the item.
  #[instrument(level = "debug", skip(self, correct), fields(session = %self.id))]
  pub fn check_answer(&mut self, index: usize, correct: &str, mode: AnswerMatch) -> Option<bool> {
    if !self.responses.contains_key(&index) {
      return None;
    }
    let matched = matches(self.responses.get(&index).map(String::as_str), correct, mode);
    self.revealed.insert(index, true);
    if matched && !self.locked {
      self.score += 1;
    }
    self.locked = true;
    debug!(target: "game", matched, score = self.score, "Answer checked");
    Some(matched)
  }

  #[allow(dead_code)]
  pub fn response(&self, index: usize) -> Option<&str> {
    self.responses.get(&index).map(String::as_str)
  }

  #[allow(dead_code)]
  pub fn is_revealed(&self, index: usize) -> bool {
    self.revealed.get(&index).copied().unwrap_or(false)
  }

  #[allow(dead_code)]
  pub fn score(&self) -> u32 {
    self.score
  }

  #[allow(dead_code)]
  pub fn total(&self) -> usize {
    self.total
  }

  pub fn score_line(&self) -> String {
    format!("Score: {}/{}", self.score, self.total)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_check_scores_and_locks_the_session() {
    let mut s = QuizSession::new(2);
    s.record_response(0, "Water");
    assert_eq!(s.check_answer(0, "Water", AnswerMatch::Exact), Some(true));
    assert_eq!(s.score(), 1);

    // Second item is also correct but the session is locked.
    s.record_response(1, "Steam");
    assert_eq!(s.check_answer(1, "Steam", AnswerMatch::Exact), Some(true));
    assert_eq!(s.score(), 1);
    assert_eq!(s.score_line(), "Score: 1/2");
  }

  #[test]
  fn incorrect_first_check_still_locks() {
    let mut s = QuizSession::new(2);
    s.record_response(0, "Sand");
    assert_eq!(s.check_answer(0, "Water", AnswerMatch::Exact), Some(false));
    assert_eq!(s.score(), 0);

    s.record_response(1, "Steam");
    assert_eq!(s.check_answer(1, "Steam", AnswerMatch::Exact), Some(true));
    assert_eq!(s.score(), 0, "locked session must not grant credit");
  }

  #[test]
  fn check_without_response_is_a_no_op() {
    let mut s = QuizSession::new(1);
    assert_eq!(s.check_answer(0, "Water", AnswerMatch::Exact), None);
    assert!(!s.is_revealed(0));
    assert_eq!(s.score(), 0);
  }

  #[test]
  fn fill_in_matching_is_case_insensitive() {
    assert!(matches(Some("Paris"), "paris", AnswerMatch::CaseInsensitive));
    assert!(!matches(Some("Paris"), "paris", AnswerMatch::Exact));
    assert!(!matches(Some(""), "paris", AnswerMatch::CaseInsensitive));
    assert!(!matches(None, "paris", AnswerMatch::CaseInsensitive));
  }

  #[test]
  fn changing_a_response_hides_feedback_but_keeps_score() {
    let mut s = QuizSession::new(1);
    s.record_response(0, "Water");
    s.check_answer(0, "Water", AnswerMatch::Exact);
    assert!(s.is_revealed(0));
    assert_eq!(s.score(), 1);

    s.record_response(0, "Sand");
    assert!(!s.is_revealed(0));
    assert_eq!(s.score(), 1);
    assert_eq!(s.response(0), Some("Sand"));
  }
}
