//! Service configuration: defaults, then an optional TOML file, then env.
//!
//! TOML schema (every key optional):
//! ```toml
//! [server]
//! port = 3000
//! static_dir = "./static"
//!
//! [data]
//! dir = "attached_assets"
//! dishes_file = "dishes.json"
//! venues_file = "venues_information.json"
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info, warn};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "attached_assets";
pub const DEFAULT_DISHES_FILE: &str = "dishes.json";
pub const DEFAULT_VENUES_FILE: &str = "venues_information.json";
pub const DEFAULT_STATIC_DIR: &str = "./static";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
  pub port: u16,
  pub dishes_path: PathBuf,
  pub venues_path: PathBuf,
  pub static_dir: PathBuf,
}

impl Default for AppConfig {
  fn default() -> Self {
    let dir = PathBuf::from(DEFAULT_DATA_DIR);
    Self {
      port: DEFAULT_PORT,
      dishes_path: dir.join(DEFAULT_DISHES_FILE),
      venues_path: dir.join(DEFAULT_VENUES_FILE),
      static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
    }
  }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct FileConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub data: DataSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ServerSection {
  #[serde(default)] pub port: Option<u16>,
  #[serde(default)] pub static_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct DataSection {
  #[serde(default)] pub dir: Option<PathBuf>,
  #[serde(default)] pub dishes_file: Option<String>,
  #[serde(default)] pub venues_file: Option<String>,
}

impl AppConfig {
  /// Build from the process environment.
  pub fn load() -> Self {
    let file = load_file_config_from_env();
    Self::resolve(file.as_ref(), |key| std::env::var(key).ok())
  }

  /// Layer a parsed file and an env lookup over the defaults.
  ///
  /// Env keys: PORT, STATIC_DIR, DATA_DIR, DISHES_PATH, VENUES_PATH.
  /// DISHES_PATH/VENUES_PATH are full paths and win over DATA_DIR.
  pub fn resolve(file: Option<&FileConfig>, env: impl Fn(&str) -> Option<String>) -> Self {
    let mut cfg = Self::default();

    let mut dir = PathBuf::from(DEFAULT_DATA_DIR);
    let mut dishes_file = DEFAULT_DISHES_FILE.to_string();
    let mut venues_file = DEFAULT_VENUES_FILE.to_string();

    if let Some(f) = file {
      if let Some(port) = f.server.port { cfg.port = port; }
      if let Some(s) = &f.server.static_dir { cfg.static_dir = s.clone(); }
      if let Some(d) = &f.data.dir { dir = d.clone(); }
      if let Some(n) = &f.data.dishes_file { dishes_file = n.clone(); }
      if let Some(n) = &f.data.venues_file { venues_file = n.clone(); }
    }

    if let Some(p) = env("PORT") {
      match p.parse::<u16>() {
        Ok(port) => cfg.port = port,
        Err(e) => warn!(target: "dish_quiz_backend", value = %p, error = %e, "Invalid PORT, keeping {}", cfg.port),
      }
    }
    if let Some(s) = env("STATIC_DIR") { cfg.static_dir = PathBuf::from(s); }
    if let Some(d) = env("DATA_DIR") { dir = PathBuf::from(d); }

    cfg.dishes_path = env("DISHES_PATH").map(PathBuf::from).unwrap_or_else(|| dir.join(&dishes_file));
    cfg.venues_path = env("VENUES_PATH").map(PathBuf::from).unwrap_or_else(|| dir.join(&venues_file));
    cfg
  }
}

/// Attempt to load `FileConfig` from GAME_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_file_config_from_env() -> Option<FileConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<FileConfig>(&s) {
      Ok(cfg) => {
        info!(target: "dish_quiz_backend", %path, "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "dish_quiz_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "dish_quiz_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
