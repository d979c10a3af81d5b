//! Small utility helpers used across modules.

/// Words that mark a catalog photo as tableware rather than food.
const NON_FOOD_MARKERS: [&str; 3] = ["cutlery", "utensil", "napkin"];

/// Canonical form of a venue tag or a requested category.
pub fn normalize_tag(tag: &str) -> String {
  tag.trim().to_lowercase()
}

/// Case-insensitive, whitespace-tolerant tag comparison.
pub fn tag_matches(tag: &str, wanted: &str) -> bool {
  normalize_tag(tag) == normalize_tag(wanted)
}

/// Same prefix test the dataset tooling applies: anything starting with
/// `http` (so `https` too) counts as a fetchable image.
pub fn is_http_url(url: &str) -> bool {
  url.starts_with("http")
}

/// True if the dish name refers to cutlery, utensils or napkins.
pub fn is_non_food_name(name: &str) -> bool {
  let lower = name.to_lowercase();
  NON_FOOD_MARKERS.iter().any(|m| lower.contains(m))
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) { cut -= 1; }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}
