use super::normalizer::{alphabetic_part, clean_part, full_name, normalized_full_name};
use serde::{Deserialize, Serialize};

/// Two spellings treated as equivalent, applied to the lowercase full name in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAlias {
    pub from: String,
    pub to: String,
}

impl NameAlias {
    pub fn new(from: impl AsRef<str>, to: impl AsRef<str>) -> Self {
        Self {
            from: clean_part(from.as_ref()),
            to: clean_part(to.as_ref()),
        }
    }

    fn apply(&self, full_name: &str) -> String {
        substitute(full_name, &self.from, &self.to)
    }

    fn reverse(&self, full_name: &str) -> String {
        substitute(full_name, &self.to, &self.from)
    }
}

fn substitute(full_name: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return full_name.to_string();
    }
    full_name.replace(from, to)
}

/// Produces the ordered list of alternate name forms probed during duplicate matching.
///
/// The list is a deterministic allow-list of string transforms. Transposed names, nicknames
/// and typos are not caught unless an alias covers them.
#[derive(Debug, Clone, Default)]
pub struct VariantGenerator {
    aliases: Vec<NameAlias>,
}

impl VariantGenerator {
    pub fn new(aliases: Vec<NameAlias>) -> Self {
        Self { aliases }
    }

    /// The first entry is always the raw full name used as a group key.
    pub fn generate(&self, first_name: &str, last_name: &str) -> Vec<String> {
        let first = clean_part(first_name);
        let last = clean_part(last_name);
        let full = full_name(first_name, last_name);

        let mut variants = Vec::with_capacity(8 + 2 * self.aliases.len());
        variants.push(full.clone());
        variants.push(normalized_full_name(first_name, last_name));
        variants.push(format!("{first} {}", alphabetic_part(&last)));
        variants.push(format!("{} {last}", alphabetic_part(&first)));
        for alias in &self.aliases {
            variants.push(alias.apply(&full));
            variants.push(alias.reverse(&full));
        }
        variants.push(full.to_uppercase());
        variants.push(full.to_lowercase());
        variants.push(collapse_whitespace(&full));
        variants.push(full.chars().filter(|c| !c.is_whitespace()).collect());
        variants
    }
}

/// Variants without any aliases configured.
pub fn name_variants(first_name: &str, last_name: &str) -> Vec<String> {
    VariantGenerator::default().generate(first_name, last_name)
}

fn collapse_whitespace(value: &str) -> String {
    let mut collapsed = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed
}
