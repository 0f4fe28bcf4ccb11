// src/services/chatbot.rs
use std::sync::Arc;

use serde::Serialize;

use super::personality::{ConfigError, PersonalityStore};

/// At most this many slang terms are explained in a single reply.
const MAX_TERMS_PER_REPLY: usize = 3;

/// The closed set of message intents. Each variant pairs a predicate over
/// the normalized input with a response generator reading only the
/// personality store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Farewell,
    SlangLookup,
    Help,
    Fallback,
}

impl Intent {
    pub fn name(self) -> &'static str {
        match self {
            Intent::Greeting => "Greeting",
            Intent::Farewell => "Farewell",
            Intent::SlangLookup => "SlangLookup",
            Intent::Help => "Help",
            Intent::Fallback => "Fallback",
        }
    }

    /// Predicate over the normalized (lowercased, trimmed) input.
    ///
    /// SlangLookup only claims a match it can answer: an interrogative
    /// marker with no resolvable term does not match and falls through.
    fn matches(self, store: &PersonalityStore, text: &str) -> bool {
        match self {
            Intent::Greeting => contains_any(text, store.greeting_triggers()),
            Intent::Farewell => contains_any(text, store.farewell_triggers()),
            Intent::SlangLookup => {
                contains_any(text, store.slang_markers()) && !resolve_terms(store, text).is_empty()
            }
            Intent::Help => contains_any(text, store.help_triggers()),
            Intent::Fallback => true,
        }
    }

    fn respond(self, store: &PersonalityStore, text: &str) -> String {
        match self {
            Intent::Greeting => store.greeting(),
            Intent::Farewell => store.farewell(),
            Intent::SlangLookup => {
                let explanations: Vec<String> = resolve_terms(store, text)
                    .into_iter()
                    .map(|(term, definition)| {
                        format!("¡Claro! '{term}' significa '{definition}'. ¡Muy bacano saber eso!")
                    })
                    .collect();
                explanations.join(" ")
            }
            Intent::Help => store.help_text().to_string(),
            Intent::Fallback => store.fallback(),
        }
    }
}

fn contains_any(text: &str, triggers: &[String]) -> bool {
    triggers.iter().any(|t| text.contains(t.as_str()))
}

/// Split on whitespace, trim surrounding punctuation ("¿parce?" → "parce"),
/// and keep the tokens that resolve in the slang mapping, in message order.
fn resolve_terms(store: &PersonalityStore, text: &str) -> Vec<(String, String)> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .filter_map(|word| {
            store
                .definition_for(word)
                .map(|definition| (word.to_string(), definition.to_string()))
        })
        .take(MAX_TERMS_PER_REPLY)
        .collect()
}

/// Lowercase and trim; diacritics are preserved.
fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Ordered first-match-wins dispatch over the intent strategies.
///
/// The order must end with the single always-matching `Fallback`, so every
/// input resolves to exactly one response. Dispatch is pure with respect to
/// the store and safe to call concurrently.
#[derive(Debug)]
pub struct IntentDispatcher {
    store: Arc<PersonalityStore>,
    order: Vec<Intent>,
}

impl IntentDispatcher {
    /// Dispatcher with the fixed default order:
    /// Greeting → Farewell → SlangLookup → Help → Fallback.
    pub fn new(store: Arc<PersonalityStore>) -> Result<Self, ConfigError> {
        Self::with_order(
            store,
            vec![
                Intent::Greeting,
                Intent::Farewell,
                Intent::SlangLookup,
                Intent::Help,
                Intent::Fallback,
            ],
        )
    }

    pub fn with_order(
        store: Arc<PersonalityStore>,
        order: Vec<Intent>,
    ) -> Result<Self, ConfigError> {
        let fallback_count = order.iter().filter(|i| **i == Intent::Fallback).count();
        if fallback_count != 1 || order.last() != Some(&Intent::Fallback) {
            return Err(ConfigError::FallbackNotLast);
        }
        Ok(Self { store, order })
    }

    /// Total over all string inputs: empty, whitespace-only and arbitrary
    /// unicode all resolve to some strategy's response.
    pub fn dispatch(&self, raw: &str) -> String {
        self.dispatch_with_intent(raw).1
    }

    pub fn dispatch_with_intent(&self, raw: &str) -> (Intent, String) {
        let normalized = normalize(raw);
        for intent in &self.order {
            if intent.matches(&self.store, &normalized) {
                return (*intent, intent.respond(&self.store, &normalized));
            }
        }
        // Unreachable: the validated order ends with Fallback, which always
        // matches. Kept total rather than panicking.
        (Intent::Fallback, self.store.fallback())
    }

    pub fn bot_info(&self) -> BotInfo {
        BotInfo {
            name: self.store.bot_name().to_string(),
            personality: self.store.personality().to_string(),
            description: self.store.description().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BotInfo {
    pub name: String,
    pub personality: String,
    pub description: String,
    pub version: String,
}
