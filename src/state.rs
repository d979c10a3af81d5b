//! Application state: the loaded catalog behind a readiness gate.
//!
//! `GameStore` is built once at startup and shared read-only (via `Arc`) with
//! every handler. A failed load leaves the store empty; it never retries, and
//! every operation reports "data not loaded" until the process restarts.

use rand::Rng;
use tracing::{error, info, instrument};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::domain::{Category, GameState};
use crate::error::QuizError;
use crate::quiz;

#[derive(Debug, Default)]
pub struct GameStore {
    catalog: Option<Catalog>,
}

impl GameStore {
    /// Load both datasets from the configured paths.
    #[instrument(level = "info", skip_all)]
    pub fn load(config: &AppConfig) -> Self {
        match Catalog::load(&config.dishes_path, &config.venues_path) {
            Ok(catalog) => {
                info!(target: "dish_quiz_backend", restaurants = catalog.restaurant_count(), "Game data ready");
                Self::from_catalog(catalog)
            }
            Err(e) => {
                error!(target: "dish_quiz_backend", error = %e, "Failed to load game data; serving errors until restart");
                Self::default()
            }
        }
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog: Some(catalog) }
    }

    pub fn is_ready(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Result<&Catalog, QuizError> {
        self.catalog.as_ref().ok_or(QuizError::DataNotLoaded)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn categories(&self) -> Result<Vec<Category>, QuizError> {
        Ok(self.catalog()?.categories())
    }

    /// Generate a round with the thread-local RNG.
    pub fn generate_quiz(&self, category: Option<&str>) -> Result<GameState, QuizError> {
        self.generate_quiz_with(category, &mut rand::thread_rng())
    }

    /// Generate a round with a caller-supplied RNG.
    pub fn generate_quiz_with<R: Rng + ?Sized>(
        &self,
        category: Option<&str>,
        rng: &mut R,
    ) -> Result<GameState, QuizError> {
        quiz::generate_quiz(self.catalog()?, category, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_store_reports_data_not_loaded() {
        let store = GameStore::default();
        assert!(!store.is_ready());
        assert!(matches!(store.categories(), Err(QuizError::DataNotLoaded)));
        assert!(matches!(store.generate_quiz(None), Err(QuizError::DataNotLoaded)));
    }

    #[test]
    fn failed_load_leaves_store_not_ready() {
        let dir = fixtures::temp_dir();
        let config = AppConfig {
            dishes_path: dir.join("missing-dishes.json"),
            venues_path: dir.join("missing-venues.json"),
            ..AppConfig::default()
        };
        let store = GameStore::load(&config);
        assert!(!store.is_ready());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_from_files_then_generate() {
        let dir = fixtures::temp_dir();
        let (dishes, venues) = fixtures::documents(&[
            ("A", &["pizza"], 2),
            ("B", &["pizza"], 2),
            ("C", &["pizza"], 2),
            ("D", &["pizza"], 2),
        ]);
        let config = AppConfig {
            dishes_path: dir.join("dishes.json"),
            venues_path: dir.join("venues.json"),
            ..AppConfig::default()
        };
        std::fs::write(&config.dishes_path, dishes.to_string()).unwrap();
        std::fs::write(&config.venues_path, venues.to_string()).unwrap();

        let store = GameStore::load(&config);
        assert!(store.is_ready());
        assert_eq!(store.categories().unwrap().len(), 1);
        let state = store.generate_quiz(Some("pizza")).unwrap();
        assert_eq!(state.questions.len(), 10);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn whitespace_category_is_not_treated_as_all() {
        let store = GameStore::from_catalog(fixtures::catalog(&[
            ("A", &["pizza"], 1),
            ("B", &["sushi"], 1),
            ("C", &["burgers"], 1),
            ("D", &["vegan"], 1),
        ]));
        let err = store
            .generate_quiz_with(Some("   "), &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, QuizError::NotEnoughRestaurants));

        let state = store
            .generate_quiz_with(Some(""), &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(state.selected_category.as_deref(), Some(""));
        assert_eq!(state.questions.len(), 10);
    }
}
