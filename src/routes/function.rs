//! Serverless-function adapter: one event in, one response out.
//!
//! Same operations as the router, reached through a function gateway path
//! (`/.netlify/functions/api/...`). The event/response shapes follow the
//! gateway's JSON (camelCase `httpMethod`, `statusCode`).

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
  extract::State,
  http::{HeaderName, HeaderValue, Method, StatusCode, Uri},
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::QuizError;
use crate::protocol::{ErrorOut, StartGameIn};
use crate::state::GameStore;
use crate::util::trunc_for_log;

const FUNCTION_PREFIX: &str = "/.netlify/functions/api";
const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
  pub http_method: String,
  pub path: String,
  #[serde(default)]
  pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
  pub status_code: u16,
  pub headers: HashMap<String, String>,
  pub body: String,
}

impl FunctionResponse {
  fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
    let body = serde_json::to_string(body).unwrap_or_else(|e| {
      serde_json::json!({ "error": format!("Serialization error: {}", e) }).to_string()
    });
    Self {
      status_code: status.as_u16(),
      headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
      body,
    }
  }

  fn ok<T: Serialize>(body: &T) -> Self {
    Self::json(StatusCode::OK, body)
  }

  fn error(status: StatusCode, message: impl Into<String>) -> Self {
    Self::json(status, &ErrorOut { error: message.into() })
  }
}

impl From<QuizError> for FunctionResponse {
  fn from(e: QuizError) -> Self {
    Self::error(e.status(), e.to_string())
  }
}

/// Strip the gateway prefix, then the `/api` prefix, leaving e.g. `/categories`.
pub fn normalize_path(path: &str) -> &str {
  let path = path.strip_prefix(FUNCTION_PREFIX).unwrap_or(path);
  path.strip_prefix(API_PREFIX).unwrap_or(path)
}

#[instrument(level = "info", skip(store, event), fields(method = %event.http_method, path = %event.path))]
pub fn handle_event(store: &GameStore, event: &FunctionEvent) -> FunctionResponse {
  let route = normalize_path(&event.path);
  let response = match (event.http_method.as_str(), route) {
    ("GET", "/categories") => match store.categories() {
      Ok(categories) => FunctionResponse::ok(&categories),
      Err(e) => e.into(),
    },
    ("POST", "/game/start") => {
      let raw = event.body.as_deref().unwrap_or("{}");
      match serde_json::from_str::<StartGameIn>(raw) {
        Ok(body) => match store.generate_quiz(body.category.as_deref()) {
          Ok(state) => FunctionResponse::ok(&state),
          Err(e) => e.into(),
        },
        Err(e) => {
          error!(target: "dish_quiz_backend", body = %trunc_for_log(raw, 200), error = %e, "Invalid function body");
          QuizError::InvalidRequest(e.to_string()).into()
        }
      }
    }
    _ => FunctionResponse::error(StatusCode::NOT_FOUND, "Not Found"),
  };
  info!(target: "dish_quiz_backend", %route, status = response.status_code, "Function event handled");
  response
}

/// Router entry: turn the HTTP request into a function event and back.
pub async fn function_gateway(
  State(store): State<Arc<GameStore>>,
  method: Method,
  uri: Uri,
  body: String,
) -> Response {
  let event = FunctionEvent {
    http_method: method.as_str().to_string(),
    path: uri.path().to_string(),
    body: if body.is_empty() { None } else { Some(body) },
  };
  handle_event(&store, &event).into_response()
}

impl IntoResponse for FunctionResponse {
  fn into_response(self) -> Response {
    let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, self.body).into_response();
    for (k, v) in &self.headers {
      if let (Ok(name), Ok(value)) = (HeaderName::try_from(k.as_str()), HeaderValue::from_str(v)) {
        response.headers_mut().insert(name, value);
      }
    }
    response
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Category, GameState};
  use crate::fixtures;

  fn store() -> GameStore {
    GameStore::from_catalog(fixtures::catalog(&[
      ("A", &["pizza"], 1),
      ("B", &["pizza"], 1),
      ("C", &["pizza"], 1),
      ("D", &["pizza"], 1),
    ]))
  }

  fn event(method: &str, path: &str, body: Option<&str>) -> FunctionEvent {
    FunctionEvent { http_method: method.into(), path: path.into(), body: body.map(str::to_string) }
  }

  #[test]
  fn both_prefixes_are_stripped() {
    assert_eq!(normalize_path("/.netlify/functions/api/categories"), "/categories");
    assert_eq!(normalize_path("/api/game/start"), "/game/start");
    assert_eq!(normalize_path("/.netlify/functions/api/api/categories"), "/categories");
    assert_eq!(normalize_path("/categories"), "/categories");
  }

  #[test]
  fn categories_through_the_gateway() {
    let resp = handle_event(&store(), &event("GET", "/.netlify/functions/api/categories", None));
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.headers.get("Content-Type").map(String::as_str), Some("application/json"));
    let cats: Vec<Category> = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(cats, vec![Category { name: "pizza".into(), count: 4 }]);
  }

  #[test]
  fn start_game_through_the_gateway() {
    let resp = handle_event(&store(), &event("POST", "/api/game/start", Some(r#"{"category":"pizza"}"#)));
    assert_eq!(resp.status_code, 200);
    let state: GameState = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(state.questions.len(), 10);
    assert_eq!(state.selected_category.as_deref(), Some("pizza"));
  }

  #[test]
  fn missing_body_starts_an_all_categories_round() {
    let resp = handle_event(&store(), &event("POST", "/game/start", None));
    assert_eq!(resp.status_code, 200);
    let state: GameState = serde_json::from_str(&resp.body).unwrap();
    assert!(state.selected_category.is_none());
  }

  #[test]
  fn domain_and_body_errors_are_400() {
    let resp = handle_event(&store(), &event("POST", "/game/start", Some(r#"{"category":"sushi"}"#)));
    assert_eq!(resp.status_code, 400);
    let err: ErrorOut = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(err.error, "Not enough restaurants in this category");

    let resp = handle_event(&store(), &event("POST", "/game/start", Some(r#"{"category": 5}"#)));
    assert_eq!(resp.status_code, 400);
  }

  #[test]
  fn unknown_routes_and_methods_are_404() {
    let resp = handle_event(&store(), &event("GET", "/game/start", None));
    assert_eq!(resp.status_code, 404);
    let resp = handle_event(&store(), &event("GET", "/api/nothing", None));
    assert_eq!(resp.status_code, 404);
    assert!(resp.body.contains("Not Found"));
  }

  #[test]
  fn unloaded_store_is_500() {
    let resp = handle_event(&GameStore::default(), &event("GET", "/categories", None));
    assert_eq!(resp.status_code, 500);
  }
}
