//! Test-only dataset builders.

use std::path::PathBuf;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::catalog::Catalog;

/// Build both documents for `(restaurant, tags, usable dish count)` triples.
/// Dish `i` of restaurant `R` is named `R dish i`.
pub fn documents(spec: &[(&str, &[&str], usize)]) -> (Value, Value) {
  let mut dishes = Map::new();
  let mut venues = Map::new();
  for (name, tags, n) in spec {
    let mut list = vec![json!({ "venue_id": format!("id-{name}") })];
    if *n > 0 {
      let mut group = Map::new();
      for i in 0..*n {
        group.insert(
          format!("dish-{i}"),
          json!({
            "dish_name": format!("{name} dish {i}"),
            "dish_price": "₪48.00",
            "dish_description": "",
            "dish_image": format!("https://img.example/{name}/{i}.jpg"),
          }),
        );
      }
      list.push(Value::Object(group));
    }
    dishes.insert(name.to_string(), Value::Array(list));
    venues.insert(
      name.to_string(),
      json!({
        "venue_id": format!("id-{name}"),
        "rate": 8.6,
        "estimate": 30,
        "estimate_range": "25-35",
        "delivery_price": "₪10.00",
        "location": [34.77, 32.08],
        "img_url": "https://img.example/venue.jpg",
        "restaurant_link": "https://example.com/r",
        "slug": name.to_lowercase(),
        "venue_details": { "address": "Dizengoff 1", "tag": tags, "short_description": "" },
      }),
    );
  }
  (Value::Object(dishes), Value::Object(venues))
}

pub fn catalog(spec: &[(&str, &[&str], usize)]) -> Catalog {
  let (dishes, venues) = documents(spec);
  Catalog::from_documents(dishes, venues).expect("fixture documents are objects")
}

/// Fresh scratch directory under the system temp dir.
pub fn temp_dir() -> PathBuf {
  let dir = std::env::temp_dir().join(format!("dish-quiz-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).expect("create temp dir");
  dir
}
