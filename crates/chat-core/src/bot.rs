//! Chat facade
//!
//! [`ChatBot`] is what front ends talk to: it wraps a shared [`Responder`]
//! and turns "no response" into the configured fallback text, so callers
//! always get something to show.

use std::sync::Arc;

use rand::Rng;

use crate::config::ChatConfig;
use crate::error::Result;
use crate::reflection::Reflections;
use crate::responder::Responder;
use crate::rule::RuleSet;

/// Responder plus caller-level policy
#[derive(Debug, Clone)]
pub struct ChatBot {
    responder: Arc<Responder>,
    config: ChatConfig,
}

impl ChatBot {
    /// Create a bot around an existing responder
    pub fn new(responder: Arc<Responder>, config: ChatConfig) -> Self {
        Self { responder, config }
    }

    /// Build the responder described by `config`
    ///
    /// Loads `config.rules_path` when set, otherwise the built-in support rules.
    pub fn from_config(config: ChatConfig) -> Result<Self> {
        config.validate()?;

        let rules = match &config.rules_path {
            Some(path) => RuleSet::from_path(path)?,
            None => RuleSet::support_desk()?,
        };
        tracing::info!(rules = rules.len(), "Chat responder ready");

        let responder = Responder::new(rules, Reflections::default());
        Ok(Self::new(Arc::new(responder), config))
    }

    /// Reply to `input`; never empty
    pub fn reply(&self, input: &str) -> String {
        self.reply_with(input, &mut rand::thread_rng())
    }

    /// Reply to `input` using the given random source
    pub fn reply_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> String {
        self.responder.respond_with(input, rng).unwrap_or_else(|| {
            tracing::debug!("No rule produced a response, using fallback");
            self.config.fallback_response.clone()
        })
    }

    /// Whether `input` asks to end the session
    ///
    /// The bot still answers a quit; ending the session is up to the caller.
    pub fn is_quit(&self, input: &str) -> bool {
        input.trim().eq_ignore_ascii_case(&self.config.quit_command)
    }

    /// Welcome message for console sessions
    pub fn welcome(&self) -> &str {
        &self.config.welcome_message
    }

    /// Prompt prefix for console sessions
    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    /// The configuration
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// The shared responder
    pub fn responder(&self) -> &Arc<Responder> {
        &self.responder
    }
}
