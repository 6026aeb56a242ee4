//! Rule-matching responder for a keyword support chatbot
//!
//! The engine holds an ordered list of `(pattern, responses)` rules. For each
//! input it finds the first rule whose pattern matches, picks one of that
//! rule's response templates and fills `%1`, `%2`, ... with the captured text,
//! reflecting pronouns (`I am` becomes `you are`) on the way.
//!
//! - [`RuleSet`]: ordered, validated rules; the last one must be a catch-all
//! - [`Reflections`]: first-person / second-person swap table
//! - [`Responder`]: the pure `respond` function over both
//! - [`ChatBot`]: caller facade that supplies the fallback text
//!
//! # Example
//!
//! ```
//! use chat_core::{Reflections, Responder, RuleSet};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let rules = RuleSet::builder()
//!     .rule(r"my name is (.*)", ["Hello %1, how can I help you today?"])
//!     .rule(r"(.*)", ["Tell me more."])
//!     .build()
//!     .unwrap();
//! let responder = Responder::new(rules, Reflections::default());
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let reply = responder.respond_with("my name is Ada", &mut rng);
//! assert_eq!(reply.as_deref(), Some("Hello Ada, how can I help you today?"));
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod log;
pub mod reflection;
pub mod responder;
pub mod rule;

pub use bot::ChatBot;
pub use config::{ChatConfig, ChatConfigBuilder};
pub use error::{ChatError, Result};
pub use log::ChatLogEntry;
pub use reflection::Reflections;
pub use responder::Responder;
pub use rule::{Rule, RuleDef, RuleSet, RuleSetBuilder};
