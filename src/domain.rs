//! Domain models: dataset records (dishes, venues) and the game structures
//! handed to the client (categories, questions, answers, game state).
//!
//! Dataset records keep the snake_case field names of the source JSON files.
//! Game structures are camelCase, matching what the browser client consumes.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One menu item as found in the dish catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dish {
  pub dish_name: String,
  #[serde(default)] pub dish_price: String,
  #[serde(default)] pub dish_description: String,
  pub dish_image: String,
}

/// Venue metadata keyed by restaurant name in the venues document.
/// Every field is optional: the dataset is scraped and not uniformly populated.
/// A field holding the wrong JSON type reads as `None` instead of rejecting
/// the whole venue.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Venue {
  #[serde(default, deserialize_with = "lenient")] pub venue_id: Option<String>,
  #[serde(default, deserialize_with = "lenient")] pub rate: Option<f64>,
  #[serde(default, deserialize_with = "lenient")] pub estimate: Option<f64>,
  #[serde(default, deserialize_with = "lenient")] pub estimate_range: Option<String>,
  #[serde(default, deserialize_with = "lenient")] pub delivery_price: Option<String>,
  #[serde(default, deserialize_with = "lenient")] pub location: Option<Vec<f64>>,
  #[serde(default, deserialize_with = "lenient")] pub img_url: Option<String>,
  #[serde(default, deserialize_with = "lenient")] pub restaurant_link: Option<String>,
  #[serde(default, deserialize_with = "lenient")] pub slug: Option<String>,
  #[serde(default, deserialize_with = "lenient")] pub venue_details: Option<VenueDetails>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VenueDetails {
  #[serde(default, deserialize_with = "lenient")] pub address: Option<String>,
  #[serde(default, deserialize_with = "string_items")] pub tag: Option<Vec<String>>,
  #[serde(default, deserialize_with = "lenient")] pub short_description: Option<String>,
}

/// Keep the value only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let value = Value::deserialize(deserializer)?;
  Ok(serde_json::from_value(value).ok())
}

/// String elements of an array, in order. Anything else in the list is dropped.
fn string_items<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
  D: Deserializer<'de>,
{
  let Value::Array(items) = Value::deserialize(deserializer)? else { return Ok(None) };
  let tags = items
    .into_iter()
    .filter_map(|item| match item {
      Value::String(tag) => Some(tag),
      _ => None,
    })
    .collect();
  Ok(Some(tags))
}

impl Venue {
  /// Ordered tag list, empty when the venue carries none.
  pub fn tags(&self) -> &[String] {
    self.venue_details
      .as_ref()
      .and_then(|d| d.tag.as_deref())
      .unwrap_or(&[])
  }

  /// First tag, treated as the restaurant's primary category.
  pub fn primary_category(&self) -> &str {
    self.tags().first().map(String::as_str).unwrap_or("")
  }
}

/// A selectable quiz filter derived from venue tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub name: String,
  pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub dish_image: String,
  pub dish_name: String,
  pub correct_restaurant: String,
  pub options: Vec<String>, // 4 restaurant names
  pub category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
  pub question_index: usize,
  pub selected_answer: String,
  pub correct_answer: String,
  pub is_correct: bool,
  pub dish_image: String,
  pub dish_name: String,
}

/// One round as owned by the client between requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
  pub current_question: usize,
  pub score: usize,
  pub total_questions: usize,
  pub selected_category: Option<String>,
  pub questions: Vec<QuizQuestion>,
  pub answers: Vec<Answer>,
}

/// End-of-round figures shown on the results screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
  pub score: usize,
  pub total_questions: usize,
  pub percentage: u32,
  pub message: String,
}
