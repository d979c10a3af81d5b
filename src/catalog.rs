//! In-memory dataset: the dish catalog and venue metadata, loaded once.
//!
//! Layout of the two source documents:
//!   - dishes: `{ "<restaurant>": [ {"venue_id": ".."}, { "<key>": Dish, .. }, .. ] }`
//!   - venues: `{ "<restaurant>": Venue }`
//!
//! The dish catalog is kept as raw JSON and filtered on demand; malformed
//! entries are expected and simply skipped. Venues are parsed up front in
//! document order, so restaurant enumeration follows the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::domain::{Category, Dish, Venue};
use crate::util::{is_http_url, is_non_food_name, normalize_tag, tag_matches};

/// Tags backed by fewer restaurants than this are not offered as categories.
pub const MIN_RESTAURANTS_PER_CATEGORY: usize = 3;

#[derive(Error, Debug)]
pub enum LoadError {
  #[error("failed to read {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  Json { path: PathBuf, source: serde_json::Error },

  #[error("{0} document must be a JSON object keyed by restaurant name")]
  NotAnObject(&'static str),
}

/// A restaurant that can take part in a round: at least one usable dish.
#[derive(Clone, Debug)]
pub struct RestaurantDishes {
  pub name: String,
  pub dishes: Vec<Dish>,
  /// Primary category (first venue tag), empty when untagged.
  pub category: String,
}

#[derive(Debug, Default)]
pub struct Catalog {
  dishes: Map<String, Value>,
  venues: Vec<(String, Venue)>,
}

impl Catalog {
  /// Read and parse both documents. Any IO or syntax failure aborts the load.
  #[instrument(level = "info", skip_all, fields(dishes = %dishes_path.display(), venues = %venues_path.display()))]
  pub fn load(dishes_path: &Path, venues_path: &Path) -> Result<Self, LoadError> {
    let dishes = read_json(dishes_path)?;
    let venues = read_json(venues_path)?;
    let catalog = Self::from_documents(dishes, venues)?;
    info!(
      target: "catalog",
      restaurants = catalog.venues.len(),
      dish_restaurants = catalog.dishes.len(),
      "Loaded game data"
    );
    Ok(catalog)
  }

  /// Build from already-parsed documents.
  pub fn from_documents(dishes: Value, venues: Value) -> Result<Self, LoadError> {
    let Value::Object(dishes) = dishes else { return Err(LoadError::NotAnObject("dishes")) };
    let Value::Object(venues_raw) = venues else { return Err(LoadError::NotAnObject("venues")) };

    let mut venues = Vec::with_capacity(venues_raw.len());
    for (name, raw) in venues_raw {
      match serde_json::from_value::<Venue>(raw) {
        Ok(venue) => venues.push((name, venue)),
        Err(e) => {
          warn!(target: "catalog", restaurant = %name, error = %e, "Skipping unreadable venue record");
        }
      }
    }

    Ok(Self { dishes, venues })
  }

  pub fn restaurant_count(&self) -> usize {
    self.venues.len()
  }

  #[cfg(test)]
  pub fn venue(&self, name: &str) -> Option<&Venue> {
    self.venues.iter().find(|(n, _)| n == name).map(|(_, v)| v)
  }

  /// Tags shared by enough restaurants to make a quiz, most common first.
  /// Ties keep the order in which the tag was first seen.
  pub fn categories(&self) -> Vec<Category> {
    let mut counts: Vec<Category> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (_, venue) in &self.venues {
      for tag in venue.tags() {
        let name = normalize_tag(tag);
        match seen.get(&name) {
          Some(&i) => counts[i].count += 1,
          None => {
            seen.insert(name.clone(), counts.len());
            counts.push(Category { name, count: 1 });
          }
        }
      }
    }

    counts.retain(|c| c.count >= MIN_RESTAURANTS_PER_CATEGORY);
    // stable: equal counts stay in encounter order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
  }

  /// Usable dishes for a restaurant. Element 0 of the raw list is the
  /// venue identifier record and never holds dishes.
  pub fn dishes_for(&self, restaurant: &str) -> Vec<Dish> {
    let Some(Value::Array(items)) = self.dishes.get(restaurant) else { return Vec::new() };
    if items.len() < 2 {
      return Vec::new();
    }

    let mut out = Vec::new();
    for item in &items[1..] {
      let Value::Object(entries) = item else { continue };
      if entries.contains_key("venue_id") {
        continue;
      }
      for raw in entries.values() {
        if let Some(dish) = parse_dish(raw) {
          out.push(dish);
        }
      }
    }
    out
  }

  /// Restaurants eligible for a round, with their dishes and primary category.
  /// `None` means every venue; otherwise venues tagged with `category`.
  /// Restaurants without a single usable dish are left out.
  pub fn restaurants_in_category(&self, category: Option<&str>) -> Vec<RestaurantDishes> {
    let mut out = Vec::new();
    for (name, venue) in &self.venues {
      if let Some(wanted) = category {
        if !venue.tags().iter().any(|t| tag_matches(t, wanted)) {
          continue;
        }
      }
      let dishes = self.dishes_for(name);
      if dishes.is_empty() {
        debug!(target: "catalog", restaurant = %name, "No usable dishes");
        continue;
      }
      out.push(RestaurantDishes {
        name: name.clone(),
        dishes,
        category: venue.primary_category().to_string(),
      });
    }
    out
  }
}

fn read_json(path: &Path) -> Result<Value, LoadError> {
  let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
  serde_json::from_str(&raw).map_err(|source| LoadError::Json { path: path.to_path_buf(), source })
}

/// Accept a raw dish record only if it is food with a fetchable photo.
fn parse_dish(raw: &Value) -> Option<Dish> {
  let obj = raw.as_object()?;
  if !obj.contains_key("dish_image") || !obj.contains_key("dish_name") {
    return None;
  }
  let image = obj.get("dish_image")?.as_str()?;
  let name = obj.get("dish_name")?.as_str()?;
  if image.is_empty() || !is_http_url(image) || name.is_empty() || is_non_food_name(name) {
    return None;
  }
  Some(Dish {
    dish_name: name.to_string(),
    dish_price: obj.get("dish_price").and_then(Value::as_str).unwrap_or_default().to_string(),
    dish_description: obj.get("dish_description").and_then(Value::as_str).unwrap_or_default().to_string(),
    dish_image: image.to_string(),
  })
}
