//! Quizsmith · lesson-to-quiz terminal client
//!
//! - Paste lesson text, get back AI-generated quiz games, play them inline
//! - All content generation happens in an external service (one POST per
//!   submission); this binary owns only the request, decode, and game state
//!
//! Important env variables:
//!   QUIZSMITH_API_BASE_URL : base URL of the generation API (required)
//!   QUIZSMITH_API_KEY      : optional bearer token
//!   QUIZSMITH_CONFIG_PATH  : optional TOML file overriding both
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod client;
mod session;
mod render;
mod controller;

use std::io::{self, BufRead, Write};

use tracing::{info, instrument};

use crate::client::GamesApi;
use crate::config::ApiConfig;
use crate::controller::PageController;
use crate::domain::GameBundle;
use crate::render::{
  blank_display, blank_feedback, hint_line, instantiate, question_feedback, question_lines,
  FibWidget, GameWidget, McWidget,
};

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Configuration must resolve before any request can be issued.
  let cfg = ApiConfig::load().ok_or("Missing API configuration; set QUIZSMITH_API_BASE_URL")?;
  let api = GamesApi::new(&cfg);
  let mut page = PageController::new();

  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();

  loop {
    println!("\nPaste lesson text, end with an empty line (empty lesson quits):");
    let Some(text) = read_lesson_text(&mut lines)? else {
      break;
    };
    page.set_lesson_text(text);

    if !page.can_submit() {
      continue;
    }
    println!("Generating games...");
    page.submit(&api).await;

    if !page.error.is_empty() {
      println!("{}", page.error);
      continue;
    }
    if let Some(bundle) = page.bundle.clone() {
      play_bundle(&bundle, &mut lines)?;
    }
  }

  info!(target: "quizsmith", "Session ended");
  Ok(())
}

/// Collect lesson text up to the first empty line. Returns None on EOF or
/// when nothing was entered at all (quit).
fn read_lesson_text(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<Option<String>> {
  let mut buf = String::new();
  loop {
    match lines.next() {
      Some(line) => {
        let line = line?;
        if line.is_empty() {
          break;
        }
        if !buf.is_empty() {
          buf.push('\n');
        }
        buf.push_str(&line);
      }
      None => break,
    }
  }
  if buf.is_empty() {
    return Ok(None);
  }
  Ok(Some(buf))
}

/// Walk the bundle in service order and play every game that has a renderer.
fn play_bundle(
  bundle: &GameBundle,
  lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
  println!("\n=== {} ===", bundle.lesson_summary);
  println!("Complexity: {} | Age range: {}", bundle.complexity, bundle.age_range);

  let mut shown = 0usize;
  for game in &bundle.games {
    let Some(widget) = instantiate(game) else {
      continue;
    };
    shown += 1;
    println!("\n--- {} ---", widget.title());
    if !widget.description().is_empty() {
      println!("{}", widget.description());
    }
    match widget {
      GameWidget::MultipleChoice(w) => play_multiple_choice(w, lines)?,
      GameWidget::FillInTheBlanks(w) => play_fill_in_blanks(w, lines)?,
    }
  }
  if shown == 0 {
    println!("\nNo playable games in this bundle.");
  }
  Ok(())
}

fn play_multiple_choice(
  mut w: McWidget,
  lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
  let mode = crate::session::AnswerMatch::Exact;
  println!("{}", w.session.score_line());

  for i in 0..w.questions.len() {
    let q = w.questions[i].clone();
    for line in question_lines(i, &q) {
      println!("{}", line);
    }
    loop {
      let input = prompt("Answer number (h=hint, enter=skip): ", lines)?;
      let input = input.trim().to_string();
      if input.is_empty() {
        break;
      }
      if input.eq_ignore_ascii_case("h") {
        match hint_line(q.hint.as_deref()) {
          Some(h) => println!("{}", h),
          None => println!("No hint for this one."),
        }
        continue;
      }
      let Some(choice) = input.parse::<usize>().ok().filter(|n| (1..=q.options.len()).contains(n)) else {
        println!("Enter a number between 1 and {}.", q.options.len());
        continue;
      };
      w.session.record_response(i, q.options[choice - 1].clone());
      if let Some(matched) = w.session.check_answer(i, &q.correct_answer, mode) {
        println!("{}", question_feedback(&q, matched));
        println!("{}", w.session.score_line());
      }
      break;
    }
  }
  println!("Final {}", w.session.score_line());
  Ok(())
}

fn play_fill_in_blanks(
  mut w: FibWidget,
  lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
  let mode = crate::session::AnswerMatch::CaseInsensitive;
  println!("{}", w.session.score_line());

  for i in 0..w.blanks.len() {
    let b = w.blanks[i].clone();
    println!("{}", blank_display(&b.sentence));
    loop {
      let input = prompt("Fill the blank (h=hint, enter=skip): ", lines)?;
      let input = input.trim().to_string();
      if input.is_empty() {
        break;
      }
      if input.eq_ignore_ascii_case("h") {
        match hint_line(b.hint.as_deref()) {
          Some(h) => println!("{}", h),
          None => println!("No hint for this one."),
        }
        continue;
      }
      w.session.record_response(i, input);
      if let Some(matched) = w.session.check_answer(i, &b.answer, mode) {
        println!("{}", blank_feedback(&b, matched));
        println!("{}", w.session.score_line());
      }
      break;
    }
  }
  println!("Final {}", w.session.score_line());
  Ok(())
}

fn prompt(
  label: &str,
  lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<String> {
  print!("{}", label);
  io::stdout().flush()?;
  match lines.next() {
    Some(line) => line,
    None => Ok(String::new()),
  }
}
