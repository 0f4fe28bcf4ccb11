use whatsapp_bot_backend::services::personality::{
    ConfigError, PersonalityPack, PersonalityStore, SelectionPolicy,
};

#[test]
fn default_pack_constructs_and_exposes_non_empty_collections() {
    let store = PersonalityStore::colombian("Deep").unwrap();
    assert_eq!(store.bot_name(), "Deep");
    assert!(!store.greeting().is_empty());
    assert!(!store.farewell().is_empty());
    assert!(!store.fallback().is_empty());
    assert!(!store.help_text().is_empty());
}

#[test]
fn help_text_interpolates_bot_name() {
    let store = PersonalityStore::colombian("TestBot").unwrap();
    assert!(store.help_text().contains("TestBot"));
    assert!(!store.help_text().contains("{name}"));
}

#[test]
fn slang_keys_are_normalized_at_construction() {
    let mut pack = PersonalityPack::colombian("Deep");
    pack.slang
        .insert("  ParCero  ".to_string(), "amigo".to_string());
    let store = PersonalityStore::new(pack, SelectionPolicy::First).unwrap();

    assert_eq!(store.definition_for("parcero"), Some("amigo"));
    assert_eq!(store.definition_for("PARCERO"), Some("amigo"));
    assert_eq!(store.definition_for(" parcero "), Some("amigo"));
}

#[test]
fn unknown_term_yields_none_not_an_error() {
    let store = PersonalityStore::colombian("Deep").unwrap();
    assert_eq!(store.definition_for("xyz123"), None);
    assert_eq!(store.definition_for(""), None);
}

#[test]
fn empty_greetings_are_rejected() {
    let mut pack = PersonalityPack::colombian("Deep");
    pack.greetings.clear();
    assert!(matches!(
        PersonalityStore::new(pack, SelectionPolicy::First),
        Err(ConfigError::EmptyField("greetings"))
    ));
}

#[test]
fn empty_slang_mapping_is_rejected() {
    let mut pack = PersonalityPack::colombian("Deep");
    pack.slang.clear();
    assert!(matches!(
        PersonalityStore::new(pack, SelectionPolicy::First),
        Err(ConfigError::EmptyField("slang"))
    ));
}

#[test]
fn blank_phrase_entries_are_rejected() {
    let mut pack = PersonalityPack::colombian("Deep");
    pack.farewells.push("   ".to_string());
    assert!(matches!(
        PersonalityStore::new(pack, SelectionPolicy::First),
        Err(ConfigError::EmptyEntry("farewells"))
    ));
}

#[test]
fn trigger_overlap_between_intents_is_rejected() {
    let mut pack = PersonalityPack::colombian("Deep");
    pack.farewell_triggers.push("ayuda".to_string());
    let err = PersonalityStore::new(pack, SelectionPolicy::First).unwrap_err();
    match err {
        ConfigError::OverlappingTriggers { token, .. } => assert_eq!(token, "ayuda"),
        other => panic!("expected overlap error, got {other:?}"),
    }
}

#[test]
fn padded_duplicate_trigger_is_still_rejected() {
    // " hola " normalizes to the greeting trigger "hola"; validation must
    // see the normalized form, not the raw one.
    let mut pack = PersonalityPack::colombian("Deep");
    pack.help_triggers.push(" hola ".to_string());
    let err = PersonalityStore::new(pack, SelectionPolicy::First).unwrap_err();
    match err {
        ConfigError::OverlappingTriggers { token, .. } => assert_eq!(token, "hola"),
        other => panic!("expected overlap error, got {other:?}"),
    }
}

#[test]
fn unicode_cased_duplicate_trigger_is_still_rejected() {
    // "MENÚ" lowercases (non-ASCII) to the help trigger "menú".
    let mut pack = PersonalityPack::colombian("Deep");
    pack.greeting_triggers.push("MENÚ".to_string());
    assert!(matches!(
        PersonalityStore::new(pack, SelectionPolicy::First),
        Err(ConfigError::OverlappingTriggers { .. })
    ));
}

#[test]
fn first_selection_always_returns_the_first_phrase() {
    let mut pack = PersonalityPack::colombian("Deep");
    pack.farewells = vec!["uno".to_string(), "dos".to_string()];
    let store = PersonalityStore::new(pack, SelectionPolicy::First).unwrap();
    assert_eq!(store.farewell(), "uno");
    assert_eq!(store.farewell(), "uno");
}
