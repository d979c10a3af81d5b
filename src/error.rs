use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::game::GameError;
use crate::protocol::ErrorOut;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Game data not loaded")]
    DataNotLoaded,

    #[error("Not enough restaurants in this category")]
    NotEnoughRestaurants,

    #[error("Could not generate question {0}")]
    QuestionExhausted(usize),

    #[error("Could not generate enough valid questions")]
    ShortRound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl QuizError {
    /// Only a failed startup load is an operator problem; the rest are
    /// reported back to the client as correctable.
    pub fn status(&self) -> StatusCode {
        match self {
            QuizError::DataNotLoaded => StatusCode::INTERNAL_SERVER_ERROR,
            QuizError::NotEnoughRestaurants
            | QuizError::QuestionExhausted(_)
            | QuizError::ShortRound
            | QuizError::InvalidRequest(_)
            | QuizError::Game(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorOut { error: self.to_string() })).into_response()
    }
}
