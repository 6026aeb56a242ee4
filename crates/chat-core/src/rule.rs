//! Rules and ordered rule sets
//!
//! A [`Rule`] pairs a case-insensitive pattern with its candidate response
//! templates. Patterns are anchored at the start of the input, so
//! `what is your name?` also answers `what is your name?!`. A [`RuleSet`]
//! keeps rules in declaration order and is immutable once built.

use std::path::Path;

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// One input per context an assertion at the start of input can tell apart:
/// empty, line breaks, ASCII word, Unicode-only word, whitespace, punctuation.
const START_CONTEXTS: &[&str] = &["", "\n", "\r\n", "\r", "a", "x y", "_", "0", "é", " ", "-", "?!"];

/// Serializable form of a rule, as stored in rules files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Regular expression, matched case-insensitively from the start of input
    pub pattern: String,
    /// Candidate response templates; `%1` refers to the first capture group
    pub responses: Vec<String>,
}

/// A compiled `(pattern, responses)` pair
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    regex: Regex,
    responses: Vec<String>,
}

impl Rule {
    /// Compile a rule
    pub fn new<I, S>(pattern: impl Into<String>, responses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pattern = pattern.into();
        let responses: Vec<String> = responses.into_iter().map(Into::into).collect();
        if responses.is_empty() {
            return Err(ChatError::EmptyResponses(pattern));
        }

        let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
            .case_insensitive(true)
            .build()
            .map_err(|source| ChatError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;

        Ok(Self {
            pattern,
            regex,
            responses,
        })
    }

    /// The pattern as written
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Candidate response templates
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Whether the rule accepts `input`
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Capture groups for `input`, if the rule matches
    pub fn captures<'t>(&self, input: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(input)
    }

    /// Whether the rule matches every input
    ///
    /// Matching is anchored at the start, so a rule that matches the empty
    /// prefix matches any input. Only assertions can make the empty match
    /// depend on the input, and at offset 0 they only see the first character.
    /// A match ending at 0 is empty, so `Some(0)` in every start context
    /// proves the rule can never miss.
    fn is_catch_all(&self) -> bool {
        START_CONTEXTS
            .iter()
            .all(|input| self.regex.shortest_match(input) == Some(0))
    }

    /// Convert back to the serializable form
    pub fn to_def(&self) -> RuleDef {
        RuleDef {
            pattern: self.pattern.clone(),
            responses: self.responses.clone(),
        }
    }
}

impl TryFrom<RuleDef> for Rule {
    type Error = ChatError;

    fn try_from(def: RuleDef) -> Result<Self> {
        Self::new(def.pattern, def.responses)
    }
}

/// Ordered rules; the first matching rule wins
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set, checking that it ends with a catch-all
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let last = rules.last().ok_or(ChatError::EmptyRuleSet)?;
        if !last.is_catch_all() {
            return Err(ChatError::MissingCatchAll(last.pattern.clone()));
        }
        Ok(Self { rules })
    }

    /// Create a builder
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Compile a rule set from its serializable form
    pub fn from_defs(defs: Vec<RuleDef>) -> Result<Self> {
        let rules = defs
            .into_iter()
            .map(Rule::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(rules)
    }

    /// Parse a JSON array of `{"pattern": ..., "responses": [...]}` objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        let defs: Vec<RuleDef> = serde_json::from_str(json)?;
        Self::from_defs(defs)
    }

    /// Load a JSON rules file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let rules = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.as_ref().display(),
            rules = rules.len(),
            "Loaded rule set from file"
        );
        Ok(rules)
    }

    /// The customer-support rules the chatbot ships with
    pub fn support_desk() -> Result<Self> {
        Self::builder()
            .rule(r"my name is (.*)", ["Hello %1, how can I help you today?"])
            .rule(
                r"what is your name?",
                ["I'm a chatbot created to assist you. You can call me ChatBot!"],
            )
            .rule(
                r"how are you?",
                [
                    "I'm doing well, thank you! How can I assist you?",
                    "I'm great! What can I help you with today?",
                ],
            )
            .rule(
                r"(.*) (help|support)",
                ["I'd be happy to help! What do you need assistance with?"],
            )
            .rule(
                r"(.*) (price|cost)",
                ["Please contact our sales team at sales@company.com for pricing information."],
            )
            .rule(
                r"(.*) (hours|time|open)",
                ["We're open Monday to Friday, 9 AM to 6 PM."],
            )
            .rule(
                r"(.*) (contact|email|phone)",
                ["You can reach us at contact@company.com or call +1-555-0123."],
            )
            .rule(
                r"(.*) (product|service)",
                [
                    "We offer various products and services. Could you be more specific about what you're looking for?",
                ],
            )
            .rule(r"quit", ["Thank you for chatting! Have a great day!"])
            .rule(
                r"(.*)",
                [
                    "I'm sorry, I didn't understand that. Could you please rephrase?",
                    "That's interesting! Could you tell me more?",
                ],
            )
            .build()
    }

    /// First rule matching `input`, with its index and captures
    pub fn find_match<'t>(&self, input: &'t str) -> Option<(usize, &Rule, Captures<'t>)> {
        self.rules
            .iter()
            .enumerate()
            .find_map(|(index, rule)| rule.captures(input).map(|caps| (index, rule, caps)))
    }

    /// Iterate over the rules in order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serializable form, e.g. for writing a rules file
    pub fn to_defs(&self) -> Vec<RuleDef> {
        self.rules.iter().map(Rule::to_def).collect()
    }
}

/// Builder for RuleSet
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    defs: Vec<RuleDef>,
}

impl RuleSetBuilder {
    /// Append a rule; order of calls is match order
    pub fn rule<I, S>(mut self, pattern: impl Into<String>, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defs.push(RuleDef {
            pattern: pattern.into(),
            responses: responses.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Compile and validate all rules
    pub fn build(self) -> Result<RuleSet> {
        RuleSet::from_defs(self.defs)
    }
}
