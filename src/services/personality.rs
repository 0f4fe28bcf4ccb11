// src/services/personality.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;
use thiserror::Error;

/// Construction-time validation failures. Any of these is fatal at startup:
/// the process must not serve requests with an invalid personality pack.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("personality pack field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("personality pack field `{0}` contains an empty entry")]
    EmptyEntry(&'static str),
    #[error("trigger token `{token}` is shared by the {first} and {second} intents")]
    OverlappingTriggers {
        token: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("dispatcher strategy order must end with a single fallback strategy")]
    FallbackNotLast,
}

/// How a phrase is chosen from an ordered list.
///
/// `First` always returns the first phrase, so repeated identical inputs get
/// identical replies. `RoundRobin` walks each list independently: the n-th
/// pick from a list returns its n-th phrase modulo the list length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    First,
    RoundRobin,
}

/// An ordered, non-empty phrase list with its own rotation cursor.
#[derive(Debug)]
struct PhraseList {
    phrases: Vec<String>,
    next: AtomicUsize,
}

impl PhraseList {
    fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases,
            next: AtomicUsize::new(0),
        }
    }

    fn pick(&self, policy: SelectionPolicy) -> &str {
        match policy {
            // The list is validated non-empty at construction.
            SelectionPolicy::First => &self.phrases[0],
            SelectionPolicy::RoundRobin => {
                let n = self.next.fetch_add(1, Ordering::Relaxed);
                &self.phrases[n % self.phrases.len()]
            }
        }
    }
}

/// Raw personality configuration as supplied at startup. Phrases may contain
/// the `{name}` placeholder, replaced with the bot name on every reply.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalityPack {
    pub bot_name: String,
    #[serde(default = "default_personality_name")]
    pub personality: String,
    #[serde(default = "default_description")]
    pub description: String,
    pub greetings: Vec<String>,
    pub farewells: Vec<String>,
    pub fallbacks: Vec<String>,
    pub slang: HashMap<String, String>,
    pub help_text: String,
    #[serde(default = "default_greeting_triggers")]
    pub greeting_triggers: Vec<String>,
    #[serde(default = "default_farewell_triggers")]
    pub farewell_triggers: Vec<String>,
    #[serde(default = "default_help_triggers")]
    pub help_triggers: Vec<String>,
    #[serde(default = "default_slang_markers")]
    pub slang_markers: Vec<String>,
}

fn default_greeting_triggers() -> Vec<String> {
    to_strings(&[
        "hola",
        "buenos días",
        "buenas tardes",
        "buenas noches",
        "quiubo",
        "qué más",
        "que mas",
    ])
}

fn default_farewell_triggers() -> Vec<String> {
    to_strings(&["adiós", "adios", "chao", "nos vemos", "hasta luego", "bye"])
}

fn default_help_triggers() -> Vec<String> {
    to_strings(&["ayuda", "help", "menu", "menú", "qué puedes hacer"])
}

fn default_slang_markers() -> Vec<String> {
    to_strings(&[
        "qué significa",
        "que significa",
        "qué quiere decir",
        "que quiere decir",
        "jerga",
        "slang",
    ])
}

fn default_personality_name() -> String {
    "colombian".to_string()
}

fn default_description() -> String {
    "Bot con personalidad colombiana chévere".to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl PersonalityPack {
    /// The default Colombian pack shipped with the bot.
    pub fn colombian(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            personality: default_personality_name(),
            description: default_description(),
            greetings: to_strings(&[
                "¡Quiubo parce! ¿Cómo va todo?",
                "¡Ajá! ¿Qué más? Aquí {name} listo para ayudarte",
                "¡Buenas! ¿Cómo estás? Aquí tu pana {name}",
                "¡Hola! ¿Qué hubo? Cuéntame todo",
            ]),
            farewells: to_strings(&[
                "¡Chao! Que te vaya muy bien, parce",
                "Nos vemos, ¡cuídate mucho!",
                "¡Hasta luego! Cualquier cosa aquí estoy",
                "¡Vamos! Que tengas un día chimba",
            ]),
            fallbacks: to_strings(&[
                "¡Vea! No entendí bien eso, ¿me lo explicas de nuevo?",
                "¿Cómo dice, mi hermano? No capté bien eso",
                "¡Uy! Creo que no te entendí. ¿Me lo repites?",
                "¿Perdón? No pude entender eso. Cuéntame de nuevo, ¡vamos!",
            ]),
            slang: [
                ("parce", "amigo/compañero"),
                ("chévere", "genial/excelente"),
                ("bacano", "bueno/chévere"),
                ("chimba", "muy bueno/increíble"),
                ("rumba", "fiesta"),
                ("guayabo", "resaca"),
                ("jíbaro", "astuto/listo"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
            help_text: concat!(
                "¡Claro, mi hermano! Yo soy {name}, tu bot colombiano. Puedo:\n",
                "\n",
                "• Saludarte con mucho sabor colombiano 🇨🇴\n",
                "• Explicarte palabras de nuestra jerga\n",
                "• Decirte chao con todo el estilo\n",
                "\n",
                "Solo escríbeme cosas como:\n",
                "- \"Hola\" o \"Quiubo\"\n",
                "- \"¿Qué significa parce?\"\n",
                "- \"Chao\" o \"Nos vemos\"\n",
                "\n",
                "¡Vamos, pregúntame lo que quieras!"
            )
            .to_string(),
            greeting_triggers: default_greeting_triggers(),
            farewell_triggers: default_farewell_triggers(),
            help_triggers: default_help_triggers(),
            slang_markers: default_slang_markers(),
        }
    }
}

/// Immutable personality data shared read-only by every strategy.
///
/// Built once at startup; never mutated afterwards, so concurrent dispatch
/// needs no locking. Slang keys are normalized to lowercase and trimmed at
/// construction, and the trigger-token lists for greeting, farewell and help
/// are validated to be mutually disjoint so first-match-wins dispatch stays
/// deterministic.
#[derive(Debug)]
pub struct PersonalityStore {
    bot_name: String,
    personality: String,
    description: String,
    greetings: PhraseList,
    farewells: PhraseList,
    fallbacks: PhraseList,
    slang: HashMap<String, String>,
    help_text: String,
    greeting_triggers: Vec<String>,
    farewell_triggers: Vec<String>,
    help_triggers: Vec<String>,
    slang_markers: Vec<String>,
    selection: SelectionPolicy,
}

impl PersonalityStore {
    pub fn new(pack: PersonalityPack, selection: SelectionPolicy) -> Result<Self, ConfigError> {
        validate_phrases("greetings", &pack.greetings)?;
        validate_phrases("farewells", &pack.farewells)?;
        validate_phrases("fallbacks", &pack.fallbacks)?;
        validate_phrases("greeting_triggers", &pack.greeting_triggers)?;
        validate_phrases("farewell_triggers", &pack.farewell_triggers)?;
        validate_phrases("help_triggers", &pack.help_triggers)?;
        validate_phrases("slang_markers", &pack.slang_markers)?;
        if pack.slang.is_empty() {
            return Err(ConfigError::EmptyField("slang"));
        }
        if pack.help_text.trim().is_empty() {
            return Err(ConfigError::EmptyField("help_text"));
        }

        // Disjointness must hold on the normalized forms the matcher sees,
        // so normalize before checking: " hola " or "MENÚ" are the same
        // trigger as "hola" / "menú".
        let greeting_triggers = lowercase_all(pack.greeting_triggers);
        let farewell_triggers = lowercase_all(pack.farewell_triggers);
        let help_triggers = lowercase_all(pack.help_triggers);

        check_disjoint(
            ("greeting", &greeting_triggers),
            ("farewell", &farewell_triggers),
        )?;
        check_disjoint(("greeting", &greeting_triggers), ("help", &help_triggers))?;
        check_disjoint(("farewell", &farewell_triggers), ("help", &help_triggers))?;

        let slang = pack
            .slang
            .into_iter()
            .map(|(term, def)| (term.trim().to_lowercase(), def))
            .collect();

        let help_text = pack.help_text.replace("{name}", &pack.bot_name);

        Ok(Self {
            bot_name: pack.bot_name,
            personality: pack.personality,
            description: pack.description,
            greetings: PhraseList::new(pack.greetings),
            farewells: PhraseList::new(pack.farewells),
            fallbacks: PhraseList::new(pack.fallbacks),
            slang,
            help_text,
            greeting_triggers,
            farewell_triggers,
            help_triggers,
            slang_markers: lowercase_all(pack.slang_markers),
            selection,
        })
    }

    /// Default Colombian pack with deterministic first-phrase selection.
    pub fn colombian(bot_name: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(PersonalityPack::colombian(bot_name), SelectionPolicy::First)
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn personality(&self) -> &str {
        &self.personality
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn greeting(&self) -> String {
        self.greetings
            .pick(self.selection)
            .replace("{name}", &self.bot_name)
    }

    pub fn farewell(&self) -> String {
        self.farewells
            .pick(self.selection)
            .replace("{name}", &self.bot_name)
    }

    pub fn fallback(&self) -> String {
        self.fallbacks
            .pick(self.selection)
            .replace("{name}", &self.bot_name)
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    /// Case-insensitive, whitespace-trimmed exact lookup. Unknown terms
    /// yield `None`, never an error.
    pub fn definition_for(&self, term: &str) -> Option<&str> {
        self.slang
            .get(term.trim().to_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn greeting_triggers(&self) -> &[String] {
        &self.greeting_triggers
    }

    pub fn farewell_triggers(&self) -> &[String] {
        &self.farewell_triggers
    }

    pub fn help_triggers(&self) -> &[String] {
        &self.help_triggers
    }

    pub fn slang_markers(&self) -> &[String] {
        &self.slang_markers
    }
}

fn validate_phrases(field: &'static str, phrases: &[String]) -> Result<(), ConfigError> {
    if phrases.is_empty() {
        return Err(ConfigError::EmptyField(field));
    }
    if phrases.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::EmptyEntry(field));
    }
    Ok(())
}

// Expects both token lists already normalized (trimmed, lowercased).
fn check_disjoint(
    (first, first_tokens): (&'static str, &[String]),
    (second, second_tokens): (&'static str, &[String]),
) -> Result<(), ConfigError> {
    for token in first_tokens {
        if second_tokens.contains(token) {
            return Err(ConfigError::OverlappingTriggers {
                token: token.clone(),
                first,
                second,
            });
        }
    }
    Ok(())
}

fn lowercase_all(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slang_lookup_is_case_insensitive_and_trimmed() {
        let store = PersonalityStore::colombian("Deep").unwrap();
        assert_eq!(store.definition_for("PARCE"), Some("amigo/compañero"));
        assert_eq!(store.definition_for("  chimba  "), Some("muy bueno/increíble"));
        assert_eq!(store.definition_for("xyz123"), None);
    }

    #[test]
    fn greeting_interpolates_bot_name() {
        let mut pack = PersonalityPack::colombian("Deep");
        pack.greetings = vec!["Aquí {name} a la orden".to_string()];
        let store = PersonalityStore::new(pack, SelectionPolicy::First).unwrap();
        assert_eq!(store.greeting(), "Aquí Deep a la orden");
    }

    #[test]
    fn empty_slang_map_is_rejected() {
        let mut pack = PersonalityPack::colombian("Deep");
        pack.slang.clear();
        assert!(matches!(
            PersonalityStore::new(pack, SelectionPolicy::First),
            Err(ConfigError::EmptyField("slang"))
        ));
    }

    #[test]
    fn overlapping_trigger_sets_are_rejected() {
        let mut pack = PersonalityPack::colombian("Deep");
        pack.help_triggers.push("hola".to_string());
        assert!(matches!(
            PersonalityStore::new(pack, SelectionPolicy::First),
            Err(ConfigError::OverlappingTriggers { .. })
        ));
    }

    #[test]
    fn round_robin_walks_the_list_in_order() {
        let mut pack = PersonalityPack::colombian("Deep");
        pack.greetings = vec!["uno".to_string(), "dos".to_string()];
        let store = PersonalityStore::new(pack, SelectionPolicy::RoundRobin).unwrap();
        assert_eq!(store.greeting(), "uno");
        // Each list rotates independently.
        let _ = store.farewell();
        assert_eq!(store.greeting(), "dos");
        assert_eq!(store.greeting(), "uno");
    }
}
