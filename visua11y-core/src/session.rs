//! Settings resolution pipeline.
//!
//! A [`WidgetSession`] owns the effective configuration, its reset snapshot,
//! the persisted user settings and the language registry for one widget
//! instance. Every mutator persists before returning.

use crate::constants::STORAGE_KEY;
use crate::languages::{LanguageRegistry, RegisterLanguageOptions};
use crate::profiles::{AccessibilityProfile, find_profile};
use crate::settings::{
    EffectiveConfig, FeatureStates, InitOptions, Offset, PluginDefaults, Position, UserSettings,
};
use crate::storage::{KeyValueStore, Persistence};
use crate::widget_size::WidgetSizeInput;

/// Outcome of a language change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageChange {
    /// The code does not resolve to a registered language.
    Unsupported,
    /// Already the active language; nothing was written.
    Unchanged(String),
    /// Active language switched and persisted.
    Changed(String),
}

impl LanguageChange {
    #[must_use]
    pub fn changed_code(&self) -> Option<&str> {
        match self {
            Self::Changed(code) => Some(code),
            Self::Unsupported | Self::Unchanged(_) => None,
        }
    }
}

pub struct WidgetSession<P, F> {
    config: EffectiveConfig,
    defaults: PluginDefaults,
    settings: UserSettings,
    languages: LanguageRegistry,
    persistence: Persistence<P, F>,
}

impl<P: KeyValueStore, F: KeyValueStore> WidgetSession<P, F> {
    /// Run the resolution pipeline: saved settings, host options, saved
    /// overrides, then language normalization.
    ///
    /// Saved settings take precedence over host options.
    pub fn initialize(
        options: &InitOptions,
        languages: LanguageRegistry,
        persistence: Persistence<P, F>,
    ) -> Self {
        let settings = UserSettings::from_value(persistence.load(STORAGE_KEY));

        let mut config = EffectiveConfig::default();
        config.apply_options(options);
        let defaults = PluginDefaults::snapshot(&config);

        if let Some(position) = settings.position {
            config.position = position;
        }
        if let Some(offset) = settings.offset {
            config.offset = offset;
        }
        if settings.widget_size.is_some() {
            config.apply_widget_size(settings.widget_size.as_ref());
        }

        let mut session = Self {
            config,
            defaults,
            settings,
            languages,
            persistence,
        };

        let requested = session
            .settings
            .lang
            .clone()
            .unwrap_or_else(|| session.config.lang.clone());
        let resolved = session.languages.resolve_language_code(Some(&requested));
        session.settings.lang = Some(resolved.clone());
        session.config.lang = resolved;

        log::debug!(
            "widget session ready: lang={} position={} states={}",
            session.config.lang,
            session.config.position.as_str(),
            session.settings.states.0.len()
        );
        session
    }

    #[must_use]
    pub const fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    #[must_use]
    pub const fn defaults(&self) -> &PluginDefaults {
        &self.defaults
    }

    #[must_use]
    pub const fn settings(&self) -> &UserSettings {
        &self.settings
    }

    #[must_use]
    pub const fn states(&self) -> &FeatureStates {
        &self.settings.states
    }

    #[must_use]
    pub const fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    #[must_use]
    pub const fn persistence(&self) -> &Persistence<P, F> {
        &self.persistence
    }

    /// The normalized active language code.
    #[must_use]
    pub fn current_language(&self) -> &str {
        self.settings.lang.as_deref().unwrap_or(&self.config.lang)
    }

    /// Translate a UI label into the active language.
    #[must_use]
    pub fn translate(&self, label: &str) -> String {
        self.languages
            .translate(Some(self.current_language()), label)
    }

    pub fn save(&self) {
        self.persistence.save(STORAGE_KEY, &self.settings);
    }

    /// Merge `partial` into the saved feature states and persist.
    pub fn set_user_state_settings(&mut self, partial: FeatureStates) {
        self.settings.states.merge(partial);
        self.save();
    }

    /// Switch the active language when `code` or its base subtag is
    /// registered. Anything else leaves state and storage untouched.
    pub fn change_language(&mut self, code: &str) -> LanguageChange {
        let Some(resolved) = self
            .languages
            .match_language(code)
            .map(|entry| entry.code.clone())
        else {
            return LanguageChange::Unsupported;
        };
        if self.settings.lang.as_deref() == Some(resolved.as_str()) {
            return LanguageChange::Unchanged(resolved);
        }

        self.settings.lang = Some(resolved.clone());
        self.config.lang.clone_from(&resolved);
        self.save();
        LanguageChange::Changed(resolved)
    }

    /// Add or update a language; see [`LanguageRegistry::register_language`].
    pub fn register_language(&mut self, options: RegisterLanguageOptions) -> Option<String> {
        self.languages.register_language(options)
    }

    pub fn languages_mut(&mut self) -> &mut LanguageRegistry {
        &mut self.languages
    }

    pub fn set_position(&mut self, position: Position, offset: Option<Offset>) {
        self.config.position = position;
        self.settings.position = Some(position);
        if let Some(offset) = offset {
            self.config.offset = offset;
            self.settings.offset = Some(offset);
        }
        self.save();
    }

    pub fn set_widget_size(&mut self, input: WidgetSizeInput) {
        self.config.apply_widget_size(Some(&input));
        self.settings.widget_size = Some(input);
        self.save();
    }

    /// Set or clear the button icon. Icons are host configuration and are not
    /// persisted.
    pub fn set_icon(&mut self, icon: Option<String>) {
        self.config.icon = icon;
    }

    /// Replace feature states with a profile's states and persist.
    pub fn apply_profile(&mut self, id: &str) -> Option<&'static AccessibilityProfile> {
        let profile = find_profile(id)?;
        self.settings.states = profile.states();
        if let Some(size) = profile.widget_size {
            self.config.apply_widget_size(Some(&size.into()));
            self.settings.widget_size = Some(size.into());
        }
        self.save();
        Some(profile)
    }

    /// Drop every user override and return to the captured defaults.
    ///
    /// The returned change reflects switching back to the default language.
    pub fn reset(&mut self) -> LanguageChange {
        self.settings.states.clear();
        self.settings.position = None;
        self.settings.offset = None;
        self.settings.widget_size = None;
        self.settings.lang = None;

        self.defaults.restore_into(&mut self.config);
        self.save();

        let default_lang = self.defaults.config().lang.clone();
        match self.change_language(&default_lang) {
            LanguageChange::Unsupported => {
                let fallback = self.languages.default_code().to_string();
                self.settings.lang = Some(fallback.clone());
                self.config.lang.clone_from(&fallback);
                self.save();
                LanguageChange::Changed(fallback)
            }
            change => change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn session_with(
        saved: Option<serde_json::Value>,
        options: &InitOptions,
    ) -> WidgetSession<MemoryStore, MemoryStore> {
        let persistence = Persistence::new(MemoryStore::new(), MemoryStore::new());
        if let Some(saved) = saved {
            persistence.save(STORAGE_KEY, &saved);
        }
        WidgetSession::initialize(options, LanguageRegistry::builtin(), persistence)
    }

    #[test]
    fn raw_locale_is_normalized_into_both_objects() {
        let options = InitOptions {
            lang: Some("pt-BR".into()),
            ..InitOptions::default()
        };
        let session = session_with(None, &options);
        assert_eq!(session.config().lang, "pt");
        assert_eq!(session.settings().lang.as_deref(), Some("pt"));
        assert_eq!(session.defaults().config().lang, "pt-BR");
    }

    #[test]
    fn change_language_ignores_unsupported_and_current() {
        let mut session = session_with(None, &InitOptions::default());
        assert_eq!(session.change_language("en"), LanguageChange::Unchanged("en".into()));
        assert_eq!(session.change_language("de-AT"), LanguageChange::Changed("de".into()));
        assert_eq!(session.current_language(), "de");
        let saved = session.persistence().load(STORAGE_KEY);
        assert_eq!(saved["lang"], "de");
    }

    #[test]
    fn unsupported_language_writes_nothing() {
        let persistence = Persistence::new(MemoryStore::new(), MemoryStore::new());
        let mut session = WidgetSession::initialize(
            &InitOptions::default(),
            LanguageRegistry::empty("en"),
            persistence,
        );
        assert_eq!(session.change_language("fr"), LanguageChange::Unsupported);
        assert!(session.persistence().primary().raw(STORAGE_KEY).is_none());
    }

    #[test]
    fn unknown_code_keeps_the_active_language() {
        let mut session = session_with(None, &InitOptions::default());
        assert_eq!(session.change_language("de"), LanguageChange::Changed("de".into()));
        let before = session.persistence().primary().raw(STORAGE_KEY);

        assert_eq!(session.change_language("klingon"), LanguageChange::Unsupported);
        assert_eq!(session.change_language("  "), LanguageChange::Unsupported);
        assert_eq!(session.current_language(), "de");
        assert_eq!(session.config().lang, "de");
        assert_eq!(session.persistence().primary().raw(STORAGE_KEY), before);
    }

    #[test]
    fn profile_replaces_states() {
        let saved = json!({"states": {"big-cursor": true}});
        let mut session = session_with(Some(saved), &InitOptions::default());
        let profile = session.apply_profile("dyslexia-mode").map(|p| p.id);
        assert_eq!(profile, Some("dyslexia-mode"));
        assert!(!session.states().is_enabled("big-cursor"));
        assert!(session.states().is_enabled("readable-font"));
        assert!(session.apply_profile("unknown").is_none());
    }
}
