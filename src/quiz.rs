//! Round generation: ten "which restaurant serves this dish?" questions.
//!
//! Flow per round:
//! 1) Collect eligible restaurants (category filter, at least one usable dish).
//! 2) Shuffle them once, compute a per-restaurant usage cap.
//! 3) For each slot, rejection-sample until a question with four distinct,
//!    category-plausible options comes out, or the attempt budget runs out.
//!
//! The random source is a parameter so tests can seed it.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{Catalog, RestaurantDishes};
use crate::domain::{GameState, QuizQuestion};
use crate::error::QuizError;

pub const TOTAL_QUESTIONS: usize = 10;
/// One correct answer plus three wrong ones.
pub const MIN_RESTAURANTS: usize = 4;
pub const MAX_ATTEMPTS_PER_QUESTION: usize = 100;
const WRONG_OPTIONS: usize = MIN_RESTAURANTS - 1;

/// How many times a single restaurant may be the answer within one round.
pub fn usage_cap(restaurant_count: usize) -> usize {
  let per_restaurant = TOTAL_QUESTIONS.div_ceil(restaurant_count.max(1));
  per_restaurant.max(2)
}

#[instrument(level = "info", skip(catalog, category, rng), fields(category = category.unwrap_or("all")))]
pub fn generate_quiz<R: Rng + ?Sized>(
  catalog: &Catalog,
  category: Option<&str>,
  rng: &mut R,
) -> Result<GameState, QuizError> {
  // An empty string scopes like "all" but is still echoed back as given.
  let scope = category.filter(|c| !c.is_empty());
  let mut restaurants = catalog.restaurants_in_category(scope);
  if restaurants.len() < MIN_RESTAURANTS {
    warn!(target: "quiz", eligible = restaurants.len(), "Not enough restaurants for a round");
    return Err(QuizError::NotEnoughRestaurants);
  }

  restaurants.shuffle(rng);
  let cap = usage_cap(restaurants.len());
  debug!(target: "quiz", eligible = restaurants.len(), cap, "Round setup");

  let mut used: HashMap<&str, usize> = HashMap::new();
  let mut questions = Vec::with_capacity(TOTAL_QUESTIONS);

  for index in 0..TOTAL_QUESTIONS {
    let mut created = None;

    for attempt in 1..=MAX_ATTEMPTS_PER_QUESTION {
      let available: Vec<&RestaurantDishes> = restaurants
        .iter()
        .filter(|r| used.get(r.name.as_str()).copied().unwrap_or(0) < cap)
        .collect();

      if available.is_empty() {
        used.clear();
        continue;
      }

      // Positional pick over the pre-shuffled list, not a fresh draw.
      let selected = available[index % available.len()];

      match build_question(selected, &restaurants, scope, rng) {
        Some(q) => {
          *used.entry(selected.name.as_str()).or_insert(0) += 1;
          created = Some(q);
          break;
        }
        None => debug!(target: "quiz", slot = index + 1, attempt, restaurant = %selected.name, "Attempt abandoned"),
      }
    }

    match created {
      Some(q) => questions.push(q),
      None => {
        warn!(target: "quiz", slot = index + 1, "Question budget exhausted");
        return Err(QuizError::QuestionExhausted(index + 1));
      }
    }
  }

  if questions.len() < TOTAL_QUESTIONS {
    return Err(QuizError::ShortRound);
  }

  info!(target: "quiz", questions = questions.len(), "Round generated");
  Ok(GameState {
    current_question: 0,
    score: 0,
    total_questions: TOTAL_QUESTIONS,
    selected_category: category.map(str::to_string),
    questions,
    answers: Vec::new(),
  })
}

/// One attempt at a question for `selected`. `None` means try again.
fn build_question<R: Rng + ?Sized>(
  selected: &RestaurantDishes,
  restaurants: &[RestaurantDishes],
  category: Option<&str>,
  rng: &mut R,
) -> Option<QuizQuestion> {
  let dish = selected.dishes.choose(rng)?;

  // A requested category already filtered the pool, so every other restaurant
  // is a peer. For "all", peers share the selected restaurant's primary tag.
  let label = category.unwrap_or(&selected.category);
  let others: Vec<&RestaurantDishes> = restaurants
    .iter()
    .filter(|r| r.name != selected.name)
    .collect();
  let same_category: Vec<&RestaurantDishes> = others
    .iter()
    .copied()
    .filter(|r| category.is_some() || r.category == label)
    .collect();
  let mut peers = if same_category.len() >= WRONG_OPTIONS { same_category } else { others };
  if peers.len() < WRONG_OPTIONS {
    return None;
  }

  peers.shuffle(rng);
  let mut options: Vec<String> = peers
    .iter()
    .take(WRONG_OPTIONS)
    .map(|r| r.name.clone())
    .collect();
  options.push(selected.name.clone());
  options.shuffle(rng);

  let unique: HashSet<&str> = options.iter().map(String::as_str).collect();
  if unique.len() != MIN_RESTAURANTS {
    return None;
  }

  Some(QuizQuestion {
    dish_image: dish.dish_image.clone(),
    dish_name: dish.dish_name.clone(),
    correct_restaurant: selected.name.clone(),
    options,
    category: label.to_string(),
  })
}
