//! Display labels for category tags.
//!
//! Categories are an open set of lowercase tags in the dataset. The four the
//! boutique launched with have curated labels; anything else is shown with
//! its first letter capitalised.

/// Curated categories in menu order, as `(tag, label)`.
pub const KNOWN_CATEGORIES: [(&str, &str); 4] = [
    ("kaftans", "Kaftans"),
    ("abayas", "Abayas"),
    ("wedding", "Wedding Dresses"),
    ("party", "Party Dresses"),
];

/// Human-readable label for a category tag.
#[must_use]
pub fn category_label(tag: &str) -> String {
    if let Some((_, label)) = KNOWN_CATEGORIES.iter().find(|(known, _)| *known == tag) {
        return (*label).to_string();
    }

    let mut chars = tag.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
