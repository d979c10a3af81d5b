//! Public request/response bodies for the HTTP API (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, GameState};

/// Body of `POST /api/game/start`. `null` (or a missing field) means all categories.
#[derive(Debug, Deserialize)]
pub struct StartGameIn {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
    pub game_state: GameState,
    pub question_index: usize,
    pub selected_answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub game_state: GameState,
    pub answer: Answer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub ready: bool,
}
