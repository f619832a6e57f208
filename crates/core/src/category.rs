//! Entrepreneur category labels.
//!
//! Categories are free text typed by operators, so every comparison goes
//! through [`normalize_category`]: uppercase, single spaces, and a `" - "`
//! separator between parts (`"food-  drinks"` becomes `"FOOD - DRINKS"`).

use std::sync::LazyLock;

/// Stand category that accepts entrepreneurs of any category.
pub const WILDCARD_CATEGORY: &str = "Libre / Mixto";

static WHITESPACE_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\s+").expect("valid regex"));

static SEPARATOR_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\s*-\s*").expect("valid regex"));

/// Normalize a category label for storage and comparison.
pub fn normalize_category(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let collapsed = WHITESPACE_RE.replace_all(&upper, " ");
    SEPARATOR_RE.replace_all(&collapsed, " - ").into_owned()
}

/// Whether `category` is the wildcard stand category.
pub fn is_wildcard(category: &str) -> bool {
    normalize_category(category) == normalize_category(WILDCARD_CATEGORY)
}

/// Whether a stand tagged `stand_category` may host an entrepreneur of
/// `candidate_category`.
pub fn stand_accepts(stand_category: &str, candidate_category: &str) -> bool {
    is_wildcard(stand_category)
        || normalize_category(stand_category) == normalize_category(candidate_category)
}
