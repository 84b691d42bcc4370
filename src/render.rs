//! Widget dispatch and display-line builders for the game variants.
//!
//! `instantiate` maps a decoded `Game` to an interactive widget holding its
//! own fresh `QuizSession`; games with an unrecognized type yield no widget.
//! The line builders are pure string functions so the whole surface stays
//! testable without a terminal attached.

use tracing::{debug, warn};

use crate::domain::{Blank, Game, Question};
use crate::session::{AnswerMatch, QuizSession};

pub struct McWidget {
  pub title: String,
  pub description: String,
  pub questions: Vec<Question>,
  pub session: QuizSession,
}

pub struct FibWidget {
  pub title: String,
  pub description: String,
  pub blanks: Vec<Blank>,
  pub session: QuizSession,
}

pub enum GameWidget {
  MultipleChoice(McWidget),
  FillInTheBlanks(FibWidget),
}

impl GameWidget {
  pub fn title(&self) -> &str {
    match self {
      GameWidget::MultipleChoice(w) => &w.title,
      GameWidget::FillInTheBlanks(w) => &w.title,
    }
  }

  pub fn description(&self) -> &str {
    match self {
      GameWidget::MultipleChoice(w) => &w.description,
      GameWidget::FillInTheBlanks(w) => &w.description,
    }
  }
}

/// Build the widget for one game. The caller keeps ownership of the bundle;
/// widgets copy what they render and own their session exclusively.
pub fn instantiate(game: &Game) -> Option<GameWidget> {
  match game {
    Game::MultipleChoice { title, description, questions } => {
      Some(GameWidget::MultipleChoice(McWidget {
        title: title.clone(),
        description: description.clone(),
        questions: questions.clone(),
        session: QuizSession::new(questions.len()),
      }))
    }
    Game::FillInTheBlanks { title, description, blanks } => {
      for (i, b) in blanks.iter().enumerate() {
        if slot_count(&b.sentence) > 1 {
          warn!(target: "game", blank = i, "Sentence has multiple blank slots; all bind to one answer");
        }
      }
      Some(GameWidget::FillInTheBlanks(FibWidget {
        title: title.clone(),
        description: description.clone(),
        blanks: blanks.clone(),
        session: QuizSession::new(blanks.len()),
      }))
    }
    Game::Unknown => {
      debug!(target: "game", "Skipping game with unrecognized type");
      None
    }
  }
}

/// Number of fill-in slots in a sentence. Consecutive underscores count as
/// one slot (services render a blank as `_`, `__`, or longer runs).
pub fn slot_count(sentence: &str) -> usize {
  let mut slots = 0;
  let mut in_run = false;
  for ch in sentence.chars() {
    if ch == '_' {
      if !in_run {
        slots += 1;
      }
      in_run = true;
    } else {
      in_run = false;
    }
  }
  slots
}

/// Render a blank sentence for display, widening each slot to `____`.
pub fn blank_display(sentence: &str) -> String {
  let mut out = String::with_capacity(sentence.len() + 8);
  let mut in_run = false;
  for ch in sentence.chars() {
    if ch == '_' {
      if !in_run {
        out.push_str("____");
      }
      in_run = true;
    } else {
      in_run = false;
      out.push(ch);
    }
  }
  out
}

/// Prompt lines for one multiple-choice question: the question text followed
/// by numbered options.
pub fn question_lines(index: usize, q: &Question) -> Vec<String> {
  let mut lines = vec![format!("Q{}. {}", index + 1, q.question)];
  for (i, opt) in q.options.iter().enumerate() {
    lines.push(format!("  {}) {}", i + 1, opt));
  }
  lines
}

/// Feedback line for a revealed multiple-choice item, bound to that
/// question's own explanation.
pub fn question_feedback(q: &Question, matched: bool) -> String {
  if matched {
    format!("Correct! {}", q.explanation)
  } else {
    format!("Incorrect. The answer is \"{}\". {}", q.correct_answer, q.explanation)
  }
}

/// Feedback line for a revealed blank, bound to that blank's own
/// explanation (not a neighbor's).
pub fn blank_feedback(b: &Blank, matched: bool) -> String {
  if matched {
    format!("Correct! {}", b.explanation)
  } else {
    format!("Incorrect. The answer is \"{}\". {}", b.answer, b.explanation)
  }
}

/// Hint line for an item, when the service provided one.
pub fn hint_line(hint: Option<&str>) -> Option<String> {
  hint.map(|h| format!("Hint: {}", h))
}

/// The comparison mode a widget uses when checking answers.
#[allow(dead_code)]
pub fn match_mode(widget: &GameWidget) -> AnswerMatch {
  match widget {
    GameWidget::MultipleChoice(_) => AnswerMatch::Exact,
    GameWidget::FillInTheBlanks(_) => AnswerMatch::CaseInsensitive,
  }
}
