//! Pronoun reflection
//!
//! When a response echoes captured text back to the user, first-person
//! phrases are swapped for second-person ones and vice versa, so
//! "I am tired" is repeated as "you are tired".

use std::collections::HashMap;

use regex::{Captures, Regex, RegexBuilder};

use crate::error::{ChatError, Result};

/// The standard English reflection table
const STANDARD_REFLECTIONS: &[(&str, &str)] = &[
    ("i am", "you are"),
    ("i was", "you were"),
    ("i", "you"),
    ("i'm", "you are"),
    ("i'd", "you would"),
    ("i've", "you have"),
    ("i'll", "you will"),
    ("my", "your"),
    ("you are", "I am"),
    ("you were", "I was"),
    ("you've", "I have"),
    ("you'll", "I will"),
    ("your", "my"),
    ("yours", "mine"),
    ("you", "me"),
    ("me", "you"),
];

/// Read-only reflection table
///
/// Keys are matched as whole words, case-insensitively, longest key first so
/// that "i am" wins over "i". Words without an entry keep their spelling.
#[derive(Debug, Clone)]
pub struct Reflections {
    table: HashMap<String, String>,
    matcher: Option<Regex>,
}

impl Reflections {
    /// Build a table from `(from, to)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let table: HashMap<String, String> = pairs
            .into_iter()
            .map(|(from, to)| (from.as_ref().trim().to_lowercase(), to.into()))
            .filter(|(from, _)| !from.is_empty())
            .collect();

        if table.is_empty() {
            return Ok(Self::empty());
        }

        let mut keys: Vec<&str> = table.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|key| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|");

        let matcher = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| ChatError::InvalidReflections(e.to_string()))?;

        Ok(Self {
            table,
            matcher: Some(matcher),
        })
    }

    /// A table that reflects nothing
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
            matcher: None,
        }
    }

    /// Reflected form of a single word or phrase
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.table.get(&phrase.to_lowercase()).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Swap every tracked phrase in `text` for its reflection
    pub fn reflect(&self, text: &str) -> String {
        let Some(matcher) = &self.matcher else {
            return text.to_string();
        };

        matcher
            .replace_all(text, |caps: &Captures<'_>| {
                let found = &caps[0];
                self.get(found).unwrap_or(found).to_string()
            })
            .into_owned()
    }
}

impl Default for Reflections {
    fn default() -> Self {
        Self::from_pairs(STANDARD_REFLECTIONS.iter().copied()).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Standard reflection table failed to compile");
            Self::empty()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_loaded() {
        let reflections = Reflections::default();
        assert_eq!(reflections.len(), STANDARD_REFLECTIONS.len());
        assert_eq!(reflections.get("I"), Some("you"));
        assert_eq!(reflections.get("yours"), Some("mine"));
    }

    #[test]
    fn test_multi_word_phrase_wins() {
        let reflections = Reflections::default();
        assert_eq!(reflections.reflect("I am tired"), "you are tired");
        assert_eq!(reflections.reflect("you are kind"), "I am kind");
    }

    #[test]
    fn test_whole_words_only() {
        let reflections = Reflections::default();
        // "mine" and "item" contain keys but are not keys themselves
        assert_eq!(reflections.reflect("item mine"), "item mine");
    }

    #[test]
    fn test_unreflected_words_keep_case() {
        let reflections = Reflections::default();
        assert_eq!(reflections.reflect("Ada"), "Ada");
        assert_eq!(
            reflections.reflect("My dog likes you"),
            "your dog likes me"
        );
    }

    #[test]
    fn test_contractions() {
        let reflections = Reflections::default();
        assert_eq!(reflections.reflect("i'm lost"), "you are lost");
        assert_eq!(reflections.reflect("I've tried"), "you have tried");
    }

    #[test]
    fn test_empty_table_is_identity() {
        let reflections = Reflections::empty();
        assert!(reflections.is_empty());
        assert_eq!(reflections.reflect("I am here"), "I am here");
    }

    #[test]
    fn test_custom_pairs() {
        let reflections = Reflections::from_pairs([("we", "you all"), ("", "ignored")]).unwrap();
        assert_eq!(reflections.len(), 1);
        assert_eq!(reflections.reflect("We agree"), "you all agree");
    }
}
