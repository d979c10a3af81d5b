//! Dish Quiz · "Guess the restaurant" backend
//!
//! - Axum HTTP API (categories, start game, answer, summary)
//! - The same API behind a serverless-function gateway path
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   DATA_DIR          : directory holding the datasets (default "attached_assets")
//!   DISHES_PATH       : full path to the dish catalog JSON
//!   VENUES_PATH       : full path to the venue metadata JSON
//!   STATIC_DIR        : frontend bundle (default "./static")
//!   GAME_CONFIG_PATH  : optional TOML config (see `config`)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod catalog;
mod config;
mod domain;
mod error;
mod game;
mod protocol;
mod quiz;
mod routes;
mod state;
mod telemetry;
mod util;

#[cfg(test)]
mod fixtures;

use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::GameStore;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = AppConfig::load();

  // Datasets are read exactly once; a failed load keeps serving errors.
  let store = Arc::new(GameStore::load(&config));

  let app = build_router(store, &config.static_dir);

  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "dish_quiz_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "dish_quiz_backend", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(target: "dish_quiz_backend", error = %e, "Failed to install Ctrl+C handler");
      std::future::pending::<()>().await;
    }
    info!(target: "dish_quiz_backend", "Received Ctrl+C, shutting down");
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut s) => {
        s.recv().await;
        info!(target: "dish_quiz_backend", "Received terminate signal, shutting down");
      }
      Err(e) => {
        tracing::error!(target: "dish_quiz_backend", error = %e, "Failed to install signal handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
}
