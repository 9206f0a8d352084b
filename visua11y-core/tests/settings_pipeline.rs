use serde_json::{Value, json};
use visua11y_core::constants::STORAGE_KEY;
use visua11y_core::{
    FeatureStates, InitOptions, LanguageChange, LanguageRegistry, MemoryStore, Persistence,
    Position, WidgetSession, WidgetSizeInput, WidgetSizePreset, resolve_widget_size,
};

type Session = WidgetSession<MemoryStore, MemoryStore>;

fn start(saved: Option<Value>, options: &InitOptions) -> Session {
    let persistence = Persistence::new(MemoryStore::new(), MemoryStore::new());
    if let Some(saved) = saved {
        persistence.save(STORAGE_KEY, &saved);
    }
    WidgetSession::initialize(options, LanguageRegistry::builtin(), persistence)
}

fn saved(session: &Session) -> Value {
    session.persistence().load(STORAGE_KEY)
}

#[test]
fn host_options_apply_without_saved_settings() {
    let options = InitOptions {
        position: Some("top-right".into()),
        offset: Some([15, 10]),
        ..InitOptions::default()
    };
    let session = start(None, &options);
    assert_eq!(session.config().position, Position::TopRight);
    assert_eq!(session.config().offset, [15, 10]);
}

#[test]
fn saved_offset_wins_over_host_offset() {
    let options = InitOptions {
        offset: Some([20, 20]),
        ..InitOptions::default()
    };
    let session = start(Some(json!({"offset": [50, 10]})), &options);
    assert_eq!(session.config().offset, [50, 10]);
    assert_eq!(session.defaults().config().offset, [20, 20]);
}

#[test]
fn fractional_saved_offset_still_wins() {
    let options = InitOptions {
        offset: Some([20, 20]),
        ..InitOptions::default()
    };
    let session = start(Some(json!({"offset": [50.5, 10]})), &options);
    assert_eq!(session.config().offset, [51, 10]);
}

#[test]
fn saved_widget_size_and_position_override_options() {
    let options = InitOptions {
        position: Some("top-left".into()),
        size: Some(WidgetSizeInput::from("small")),
        ..InitOptions::default()
    };
    let session = start(
        Some(json!({"position": "center-right", "widgetSize": 70})),
        &options,
    );
    assert_eq!(session.config().position, Position::CenterRight);
    assert_eq!(session.config().size, 70);
    assert_eq!(session.config().size_preset, None);
    assert_eq!(session.config().panel_width, 603);
    assert_eq!(session.defaults().config().size_preset, Some(WidgetSizePreset::Small));
}

#[test]
fn corrupt_saved_states_become_an_empty_object() {
    let session = start(Some(json!({"states": "broken", "lang": "it"})), &InitOptions::default());
    assert!(session.states().is_empty());
    assert_eq!(session.current_language(), "it");
}

#[test]
fn state_updates_merge_and_persist() {
    let mut session = start(None, &InitOptions::default());
    session.set_user_state_settings(FeatureStates::new().with("a", 1));
    session.set_user_state_settings(FeatureStates::new().with("b", 2));
    assert_eq!(saved(&session)["states"], json!({"a": 1, "b": 2}));

    session.set_user_state_settings(FeatureStates::new().with("a", false));
    assert_eq!(saved(&session)["states"], json!({"a": false, "b": 2}));
}

#[test]
fn reset_returns_to_host_defaults() {
    let options = InitOptions {
        lang: Some("fr".into()),
        position: Some("top-center".into()),
        offset: Some([5, 6]),
        ..InitOptions::default()
    };
    let mut session = start(None, &options);
    session.set_user_state_settings(FeatureStates::new().with("big-cursor", true));
    session.set_position(Position::BottomRight, Some([90, 90]));
    session.set_widget_size(WidgetSizePreset::Medium.into());
    assert_eq!(session.change_language("de"), LanguageChange::Changed("de".into()));

    let change = session.reset();
    assert_eq!(change, LanguageChange::Changed("fr".into()));
    assert_eq!(session.config().position, Position::TopCenter);
    assert_eq!(session.config().offset, [5, 6]);
    assert_eq!(session.config().size, WidgetSizePreset::Default.size());
    assert!(session.states().is_empty());

    let stored = saved(&session);
    assert_eq!(stored, json!({"lang": "fr", "states": {}}));
}

#[test]
fn reset_with_unsupported_default_uses_registry_default() {
    let options = InitOptions {
        lang: Some("tlh".into()),
        ..InitOptions::default()
    };
    let mut session = start(None, &options);
    assert_eq!(session.current_language(), "en");
    session.change_language("es");
    assert_eq!(session.reset(), LanguageChange::Changed("en".into()));
    assert_eq!(session.current_language(), "en");
}

#[test]
fn position_changes_persist_without_touching_defaults() {
    let mut session = start(None, &InitOptions::default());
    session.set_position(Position::TopLeft, None);
    assert_eq!(saved(&session)["position"], "top-left");
    assert!(saved(&session).get("offset").is_none());
    assert_eq!(session.defaults().config().position, Position::BottomLeft);
}

#[test]
fn icon_is_not_persisted() {
    let mut session = start(None, &InitOptions::default());
    session.set_icon(Some("#my-icon".into()));
    session.save();
    assert_eq!(session.config().icon.as_deref(), Some("#my-icon"));
    assert!(saved(&session).get("icon").is_none());
}

#[test]
fn profile_applies_widget_size() {
    let mut session = start(None, &InitOptions::default());
    let profile = session.apply_profile("adhd-mode").unwrap();
    assert_eq!(profile.widget_size, Some(WidgetSizePreset::Small));
    assert_eq!(session.config().size, 42);
    assert_eq!(saved(&session)["widgetSize"], "small");
    assert_eq!(session.states().contrast(), Some("light-contrast"));
}

#[test]
fn widget_size_scenarios() {
    let medium = resolve_widget_size(Some(&"medium".into()));
    assert_eq!((medium.size, medium.preset, medium.panel_width), (50, Some(WidgetSizePreset::Medium), 440));
    let custom = resolve_widget_size(Some(&"70".into()));
    assert_eq!((custom.size, custom.preset, custom.panel_width), (70, None, 603));
    let tiny = resolve_widget_size(Some(&10.0.into()));
    assert_eq!((tiny.size, tiny.panel_width), (40, 360));
}
