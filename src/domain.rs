//! Wire data model shared with the generation service: the outbound lesson
//! submission and the decoded game bundle with its tagged game variants.

use serde::{Deserialize, Serialize};

/// Outbound payload for one generation request.
/// The controller guarantees `lesson_text` is non-blank before this is built.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LessonSubmission {
  #[serde(rename = "lessonText")]
  pub lesson_text: String,
}

/// Full response for one lesson submission: metadata plus an ordered list of
/// games. Created fresh on each successful request and replaces any prior
/// bundle; never persisted.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GameBundle {
  #[serde(rename = "lessonSummary", default)]
  pub lesson_summary: String,
  #[serde(default)]
  pub complexity: String,
  #[serde(rename = "ageRange", default)]
  pub age_range: String,
  #[serde(default)]
  pub games: Vec<Game>,
}

/// One quiz unit, tagged by the service on `type`. Tags we don't recognize
/// still decode (as `Unknown`) so a new service-side game type never breaks
/// the whole bundle; they simply have no renderer.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Game {
  #[serde(rename = "multipleChoice")]
  MultipleChoice {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    questions: Vec<Question>,
  },
  #[serde(rename = "fillInTheBlanks")]
  FillInTheBlanks {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    blanks: Vec<Blank>,
  },
  #[serde(other)]
  Unknown,
}

/// A single multiple-choice item. `correct_answer` is expected to be one of
/// `options` but this is not enforced; a mismatch just means the item can
/// never be answered correctly.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Question {
  #[serde(default)]
  pub question: String,
  #[serde(default)]
  pub options: Vec<String>,
  #[serde(rename = "correctAnswer", default)]
  pub correct_answer: String,
  #[serde(default)]
  pub explanation: String,
  #[serde(default)]
  pub hint: Option<String>,
}

/// A single fill-in item. Each `_` in `sentence` marks one slot; the design
/// assumes exactly one slot per blank.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Blank {
  #[serde(default)]
  pub sentence: String,
  #[serde(default)]
  pub answer: String,
  #[serde(default)]
  pub explanation: String,
  #[serde(default)]
  pub hint: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn submission_serializes_with_service_field_name() {
    let body = LessonSubmission { lesson_text: "Water boils at 100C.".into() };
    let json = serde_json::to_value(&body).expect("serialize");
    assert_eq!(json, serde_json::json!({ "lessonText": "Water boils at 100C." }));
  }

  #[test]
  fn bundle_decodes_known_and_unknown_game_types() {
    let raw = r#"{
      "lessonSummary": "States of matter",
      "complexity": "beginner",
      "ageRange": "8-10",
      "games": [
        {
          "type": "multipleChoice",
          "title": "Quick check",
          "description": "Pick one",
          "questions": [
            {
              "question": "What does ice become when heated?",
              "options": ["Water", "Steam", "Sand"],
              "correctAnswer": "Water",
              "explanation": "Melting turns ice into liquid water.",
              "hint": "Think melting."
            }
          ]
        },
        {
          "type": "fillInTheBlanks",
          "title": "Complete it",
          "description": "Type the word",
          "blanks": [
            {
              "sentence": "Water boils at _ degrees Celsius.",
              "answer": "100",
              "explanation": "At sea level water boils at 100C."
            }
          ]
        },
        { "type": "matching", "pairs": [] }
      ]
    }"#;

    let bundle: GameBundle = serde_json::from_str(raw).expect("decode");
    assert_eq!(bundle.lesson_summary, "States of matter");
    assert_eq!(bundle.age_range, "8-10");
    assert_eq!(bundle.games.len(), 3);
    assert!(matches!(bundle.games[0], Game::MultipleChoice { .. }));
    assert!(matches!(bundle.games[1], Game::FillInTheBlanks { .. }));
    assert_eq!(bundle.games[2], Game::Unknown);

    match &bundle.games[1] {
      Game::FillInTheBlanks { blanks, .. } => {
        assert_eq!(blanks[0].answer, "100");
        assert_eq!(blanks[0].hint, None);
      }
      other => panic!("unexpected variant: {other:?}"),
    }
  }

  #[test]
  fn empty_games_list_is_a_valid_bundle() {
    let bundle: GameBundle =
      serde_json::from_str(r#"{ "lessonSummary": "x", "complexity": "", "ageRange": "", "games": [] }"#)
        .expect("decode");
    assert!(bundle.games.is_empty());
  }
}
