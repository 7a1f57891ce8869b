use serde::Serialize;
use std::fmt;

/// Canonical comparison key for a guest name; the lowercase, trimmed full name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NameKey(String);

impl NameKey {
    pub fn from_parts(first_name: &str, last_name: &str) -> Self {
        Self(full_name(first_name, last_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn clean_part(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Keeps only `a`-`z`; digits, punctuation, whitespace and accented letters are dropped.
pub(crate) fn alphabetic_part(cleaned: &str) -> String {
    cleaned.chars().filter(char::is_ascii_lowercase).collect()
}

/// `trim(lower(first)) + " " + trim(lower(last))`.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", clean_part(first_name), clean_part(last_name))
}

/// Same as [`full_name`] with every non `a`-`z` character stripped from each part.
pub fn normalized_full_name(first_name: &str, last_name: &str) -> String {
    format!(
        "{} {}",
        alphabetic_part(&clean_part(first_name)),
        alphabetic_part(&clean_part(last_name))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_trims_and_lowercases_each_part() {
        assert_eq!(full_name("  John ", "SMITH\t"), "john smith");
        assert_eq!(full_name("Mary  Ann", "Lee"), "mary  ann lee");
    }

    #[test]
    fn normalized_name_drops_non_letters() {
        assert_eq!(normalized_full_name("Mary-Ann", "O'Brien 2nd"), "maryann obriennd");
        assert_eq!(normalized_full_name("José", "Núñez"), "jos nez");
    }

    #[test]
    fn empty_parts_degrade_to_a_single_space() {
        assert_eq!(full_name("", ""), " ");
        assert_eq!(normalized_full_name("", "   "), " ");
        assert_eq!(NameKey::from_parts("", "").as_str(), " ");
    }
}
