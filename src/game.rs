//! Pure transitions over a client-owned `GameState`: answering, moving on,
//! and the end-of-round summary. Nothing here is stored server side.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{Answer, GameState, GameSummary};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
  #[error("Round already finished")]
  RoundFinished,

  #[error("Expected an answer for question {expected}, got {got}")]
  OutOfOrder { expected: usize, got: usize },

  #[error("Question {0} was already answered")]
  AlreadyAnswered(usize),

  #[error("Question {0} has not been answered yet")]
  NotAnswered(usize),

  #[error("'{0}' is not one of the options")]
  UnknownOption(String),

  #[error("Score {score} is higher than the {answered} answered questions")]
  ScoreMismatch { score: usize, answered: usize },
}

impl GameState {
  pub fn is_finished(&self) -> bool {
    self.current_question >= self.questions.len().min(self.total_questions)
  }

  fn answered(&self, index: usize) -> bool {
    self.answers.iter().any(|a| a.question_index == index)
  }

  /// Record the player's pick for the current question and score it.
  #[instrument(level = "debug", skip(self, selected))]
  pub fn submit_answer(&mut self, question_index: usize, selected: &str) -> Result<Answer, GameError> {
    if self.is_finished() {
      return Err(GameError::RoundFinished);
    }
    if question_index != self.current_question {
      return Err(GameError::OutOfOrder { expected: self.current_question, got: question_index });
    }
    if self.answered(question_index) {
      return Err(GameError::AlreadyAnswered(question_index));
    }
    // The state comes back from the client; a score can never outrun the answers.
    if self.score > self.answers.len() {
      return Err(GameError::ScoreMismatch { score: self.score, answered: self.answers.len() });
    }

    let question = &self.questions[question_index];
    if !question.options.iter().any(|o| o == selected) {
      return Err(GameError::UnknownOption(selected.to_string()));
    }

    let is_correct = selected == question.correct_restaurant;
    let answer = Answer {
      question_index,
      selected_answer: selected.to_string(),
      correct_answer: question.correct_restaurant.clone(),
      is_correct,
      dish_image: question.dish_image.clone(),
      dish_name: question.dish_name.clone(),
    };
    if is_correct {
      self.score += 1;
    }
    self.answers.push(answer.clone());
    debug!(target: "quiz", question_index, is_correct, score = self.score, "Answer recorded");
    Ok(answer)
  }

  /// Move on once the current question has an answer. Moving past the last
  /// question finishes the round.
  pub fn advance(&mut self) -> Result<(), GameError> {
    if self.is_finished() {
      return Err(GameError::RoundFinished);
    }
    if !self.answered(self.current_question) {
      return Err(GameError::NotAnswered(self.current_question));
    }
    self.current_question += 1;
    Ok(())
  }

  pub fn summarize(&self) -> GameSummary {
    let exact = if self.total_questions == 0 {
      0.0
    } else {
      self.score as f64 * 100.0 / self.total_questions as f64
    };
    GameSummary {
      score: self.score,
      total_questions: self.total_questions,
      percentage: exact.round() as u32,
      message: score_message(exact).into(),
    }
  }
}

/// Banding uses the unrounded percentage.
fn score_message(percentage: f64) -> &'static str {
  if percentage >= 100.0 {
    "Perfect! You're a Tel Aviv food expert!"
  } else if percentage >= 80.0 {
    "Amazing! You know your Tel Aviv restaurants!"
  } else if percentage >= 60.0 {
    "Great job! Almost perfect!"
  } else if percentage >= 40.0 {
    "Not bad! Keep exploring!"
  } else {
    "Keep trying! You'll get better!"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuizQuestion;

  fn state(n: usize) -> GameState {
    let questions = (0..n)
      .map(|i| QuizQuestion {
        dish_image: format!("https://img/{i}.jpg"),
        dish_name: format!("Dish {i}"),
        correct_restaurant: "Right".into(),
        options: vec!["Wrong 1".into(), "Right".into(), "Wrong 2".into(), "Wrong 3".into()],
        category: "pizza".into(),
      })
      .collect();
    GameState {
      current_question: 0,
      score: 0,
      total_questions: n,
      selected_category: Some("pizza".into()),
      questions,
      answers: vec![],
    }
  }

  #[test]
  fn correct_answer_scores_and_echoes_dish() {
    let mut s = state(3);
    let a = s.submit_answer(0, "Right").unwrap();
    assert!(a.is_correct);
    assert_eq!(a.dish_name, "Dish 0");
    assert_eq!(a.correct_answer, "Right");
    assert_eq!(s.score, 1);
    assert_eq!(s.answers.len(), 1);
  }

  #[test]
  fn wrong_answer_keeps_score() {
    let mut s = state(3);
    let a = s.submit_answer(0, "Wrong 2").unwrap();
    assert!(!a.is_correct);
    assert_eq!(a.selected_answer, "Wrong 2");
    assert_eq!(s.score, 0);
  }

  #[test]
  fn answers_must_follow_the_current_question() {
    let mut s = state(3);
    assert_eq!(s.submit_answer(1, "Right"), Err(GameError::OutOfOrder { expected: 0, got: 1 }));
    s.submit_answer(0, "Right").unwrap();
    assert_eq!(s.submit_answer(0, "Right"), Err(GameError::AlreadyAnswered(0)));
    assert_eq!(
      s.submit_answer(0, "Elsewhere").unwrap_err(),
      GameError::AlreadyAnswered(0)
    );
  }

  #[test]
  fn inflated_client_score_is_rejected() {
    let mut s = state(3);
    s.score = usize::MAX;
    assert_eq!(
      s.submit_answer(0, "Right"),
      Err(GameError::ScoreMismatch { score: usize::MAX, answered: 0 })
    );
    assert!(s.answers.is_empty());
    assert_eq!(s.score, usize::MAX);
  }

  #[test]
  fn unknown_option_is_rejected() {
    let mut s = state(2);
    assert_eq!(s.submit_answer(0, "Nope"), Err(GameError::UnknownOption("Nope".into())));
    assert!(s.answers.is_empty());
  }

  #[test]
  fn advance_requires_an_answer_and_stops_at_the_end() {
    let mut s = state(2);
    assert_eq!(s.advance(), Err(GameError::NotAnswered(0)));
    s.submit_answer(0, "Right").unwrap();
    s.advance().unwrap();
    s.submit_answer(1, "Wrong 1").unwrap();
    s.advance().unwrap();
    assert!(s.is_finished());
    assert_eq!(s.advance(), Err(GameError::RoundFinished));
    assert_eq!(s.submit_answer(2, "Right"), Err(GameError::RoundFinished));
  }

  #[test]
  fn summary_messages_follow_percentage_bands() {
    let mut s = state(10);
    let cases = [
      (10, 100, "Perfect! You're a Tel Aviv food expert!"),
      (8, 80, "Amazing! You know your Tel Aviv restaurants!"),
      (6, 60, "Great job! Almost perfect!"),
      (4, 40, "Not bad! Keep exploring!"),
      (3, 30, "Keep trying! You'll get better!"),
      (0, 0, "Keep trying! You'll get better!"),
    ];
    for (score, pct, msg) in cases {
      s.score = score;
      let summary = s.summarize();
      assert_eq!(summary.percentage, pct);
      assert_eq!(summary.message, msg);
      assert_eq!(summary.total_questions, 10);
    }
  }

  #[test]
  fn summary_rounds_and_handles_empty_rounds() {
    let mut s = state(3);
    s.score = 2;
    assert_eq!(s.summarize().percentage, 67);
    s.score = 1;
    // 33.3% rounds down and stays in the lowest band
    assert_eq!(s.summarize().percentage, 33);
    assert_eq!(s.summarize().message, "Keep trying! You'll get better!");
    assert_eq!(state(0).summarize().percentage, 0);
  }
}
