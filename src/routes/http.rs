//! HTTP endpoint handlers. These are thin wrappers that forward to the store
//! and the game transitions. Each handler is instrumented and logs basic
//! result info; failures are mapped by `QuizError`'s `IntoResponse`.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, State},
  Json,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{Category, GameState, GameSummary};
use crate::error::QuizError;
use crate::protocol::*;
use crate::state::GameStore;

#[instrument(level = "info", skip(store))]
pub async fn http_health(State(store): State<Arc<GameStore>>) -> Json<HealthOut> {
  Json(HealthOut { ok: true, ready: store.is_ready() })
}

#[instrument(level = "info", skip(store))]
pub async fn http_get_categories(
  State(store): State<Arc<GameStore>>,
) -> Result<Json<Vec<Category>>, QuizError> {
  match store.categories() {
    Ok(categories) => {
      info!(target: "quiz", count = categories.len(), "HTTP categories served");
      Ok(Json(categories))
    }
    Err(e) => {
      error!(target: "quiz", error = %e, "Error fetching categories");
      Err(e)
    }
  }
}

#[instrument(level = "info", skip(store, body))]
pub async fn http_post_start_game(
  State(store): State<Arc<GameStore>>,
  body: Result<Json<StartGameIn>, JsonRejection>,
) -> Result<Json<GameState>, QuizError> {
  let Json(body) = body.map_err(|e| QuizError::InvalidRequest(e.body_text()))?;
  let round_id = Uuid::new_v4();
  match store.generate_quiz(body.category.as_deref()) {
    Ok(state) => {
      info!(target: "quiz", %round_id, category = ?state.selected_category, questions = state.questions.len(), "HTTP round served");
      Ok(Json(state))
    }
    Err(e) => {
      warn!(target: "quiz", %round_id, category = ?body.category, error = %e, "Error starting game");
      Err(e)
    }
  }
}

/// Score the current question and move the round forward.
#[instrument(level = "info", skip(body))]
pub async fn http_post_answer(
  body: Result<Json<AnswerIn>, JsonRejection>,
) -> Result<Json<AnswerOut>, QuizError> {
  let Json(body) = body.map_err(|e| QuizError::InvalidRequest(e.body_text()))?;
  let mut game_state = body.game_state;
  let answer = game_state.submit_answer(body.question_index, &body.selected_answer)?;
  game_state.advance()?;
  info!(target: "quiz", question_index = body.question_index, is_correct = answer.is_correct, score = game_state.score, "HTTP answer recorded");
  Ok(Json(AnswerOut { game_state, answer }))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_summary(
  body: Result<Json<GameState>, JsonRejection>,
) -> Result<Json<GameSummary>, QuizError> {
  let Json(state) = body.map_err(|e| QuizError::InvalidRequest(e.body_text()))?;
  Ok(Json(state.summarize()))
}
