//! The rule-matching responder
//!
//! [`Responder::respond_with`] is a pure function of the input, the immutable
//! rule set and reflection table, and the random source handed in by the
//! caller. A responder is `Send + Sync` and can be shared behind an `Arc`
//! by any number of concurrent callers without locking.

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Captures;

use crate::reflection::Reflections;
use crate::rule::RuleSet;

/// Maps one free-text input to at most one response
#[derive(Debug, Clone)]
pub struct Responder {
    rules: RuleSet,
    reflections: Reflections,
}

impl Responder {
    /// Create a responder over a validated rule set
    pub fn new(rules: RuleSet, reflections: Reflections) -> Self {
        Self { rules, reflections }
    }

    /// The rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Respond using the thread-local random source
    pub fn respond(&self, input: &str) -> Option<String> {
        self.respond_with(input, &mut rand::thread_rng())
    }

    /// Respond using the given random source
    ///
    /// Returns `None` when no rule matches or the filled template is blank;
    /// the caller decides what to say instead.
    pub fn respond_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Option<String> {
        let (index, rule, caps) = self.rules.find_match(input)?;
        let template = rule.responses().choose(rng)?;

        tracing::debug!(rule = index, pattern = rule.pattern(), "Matched rule");

        let response = tidy_punctuation(self.fill(template, &caps));
        if response.trim().is_empty() {
            None
        } else {
            Some(response)
        }
    }

    /// Replace `%k` with the reflected text of capture group `k`
    fn fill(&self, template: &str, caps: &Captures<'_>) -> String {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let group = match (c, chars.peek()) {
                ('%', Some(d)) => d.to_digit(10),
                _ => None,
            };

            match group {
                Some(k) => {
                    chars.next();
                    let captured = caps.get(k as usize).map_or("", |m| m.as_str());
                    out.push_str(&self.reflections.reflect(captured));
                }
                None => out.push(c),
            }
        }

        out
    }
}

/// Collapse the doubled punctuation left by echoing a question
fn tidy_punctuation(mut response: String) -> String {
    if response.ends_with("?.") {
        response.truncate(response.len() - 2);
        response.push('.');
    } else if response.ends_with("??") {
        response.truncate(response.len() - 2);
        response.push('?');
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn support_desk() -> Responder {
        Responder::new(RuleSet::support_desk().unwrap(), Reflections::default())
    }

    #[test]
    fn test_identity_question() {
        let responder = support_desk();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            responder.respond_with("what is your name?", &mut rng).as_deref(),
            Some("I'm a chatbot created to assist you. You can call me ChatBot!")
        );
    }

    #[test]
    fn test_quit_gets_farewell() {
        let responder = support_desk();
        assert_eq!(
            responder.respond("quit").as_deref(),
            Some("Thank you for chatting! Have a great day!")
        );
    }

    #[test]
    fn test_capture_substitution() {
        let responder = support_desk();
        let reply = responder.respond("my name is Ada").unwrap();
        assert!(reply.contains("Ada"));
        assert!(!reply.contains("%1"));
        assert_eq!(reply, "Hello Ada, how can I help you today?");
    }

    #[test]
    fn test_reflection_of_captured_text() {
        let rules = RuleSet::builder()
            .rule(r"tell me that (.*)", ["Why do you think %1?"])
            .rule(r"(.*)", ["Go on."])
            .build()
            .unwrap();
        let responder = Responder::new(rules, Reflections::default());

        let reply = responder.respond("tell me that I am tired").unwrap();
        assert_eq!(reply, "Why do you think you are tired?");
    }

    #[test]
    fn test_question_echo_is_tidied() {
        let rules = RuleSet::builder()
            .rule(r"(.*)", ["You asked: %1."])
            .build()
            .unwrap();
        let responder = Responder::new(rules, Reflections::empty());
        assert_eq!(
            responder.respond("is it open?").as_deref(),
            Some("You asked: is it open.")
        );
    }

    #[test]
    fn test_unknown_group_renders_empty() {
        let rules = RuleSet::builder()
            .rule(r"(.*)", ["[%1|%7]"])
            .build()
            .unwrap();
        let responder = Responder::new(rules, Reflections::empty());
        assert_eq!(responder.respond("abc").as_deref(), Some("[abc|]"));
    }

    #[test]
    fn test_percent_without_digit_is_literal() {
        let rules = RuleSet::builder()
            .rule(r"(.*)", ["100% sure, %"])
            .build()
            .unwrap();
        let responder = Responder::new(rules, Reflections::empty());
        assert_eq!(responder.respond("x").as_deref(), Some("100% sure, %"));
    }

    #[test]
    fn test_blank_template_yields_none() {
        let rules = RuleSet::builder()
            .rule(r"silence", [""])
            .rule(r"(.*)", ["%1"])
            .build()
            .unwrap();
        let responder = Responder::new(rules, Reflections::empty());
        assert_eq!(responder.respond("silence"), None);
        // the catch-all echoes nothing back for empty input
        assert_eq!(responder.respond(""), None);
    }

    #[test]
    fn test_first_match_wins() {
        let rules = RuleSet::builder()
            .rule(r"(.*) price", ["from the first rule"])
            .rule(r"what is the price", ["from the second rule"])
            .rule(r"(.*)", ["fallback"])
            .build()
            .unwrap();
        let responder = Responder::new(rules, Reflections::empty());
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                responder.respond_with("what is the price", &mut rng).as_deref(),
                Some("from the first rule")
            );
        }
    }

    #[test]
    fn test_single_candidate_is_deterministic() {
        let responder = support_desk();
        let first = responder.respond("I need some help").unwrap();
        for _ in 0..50 {
            assert_eq!(responder.respond("I need some help").unwrap(), first);
        }
        assert_eq!(first, "I'd be happy to help! What do you need assistance with?");
    }

    #[test]
    fn test_every_candidate_reachable() {
        let responder = support_desk();
        let candidates: HashSet<&str> = [
            "I'm sorry, I didn't understand that. Could you please rephrase?",
            "That's interesting! Could you tell me more?",
        ]
        .into_iter()
        .collect();

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let reply = responder.respond_with("asdkjaskjd", &mut rng).unwrap();
            assert!(candidates.contains(reply.as_str()), "unexpected reply: {reply}");
            seen.insert(reply);
        }
        assert_eq!(seen.len(), candidates.len());
    }

    #[test]
    fn test_same_seed_same_choice() {
        let responder = support_desk();
        let a = responder.respond_with("how are you?", &mut StdRng::seed_from_u64(9));
        let b = responder.respond_with("how are you?", &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_keyword_rules() {
        let responder = support_desk();
        assert_eq!(
            responder.respond("what is the price").as_deref(),
            Some("Please contact our sales team at sales@company.com for pricing information.")
        );
        assert_eq!(
            responder.respond("when are you open").as_deref(),
            Some("We're open Monday to Friday, 9 AM to 6 PM.")
        );
        assert_eq!(
            responder.respond("what is your email").as_deref(),
            Some("You can reach us at contact@company.com or call +1-555-0123.")
        );
    }

    #[test]
    fn test_responder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Responder>();
    }
}
