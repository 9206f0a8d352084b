//! The exported widget API and the boot sequence behind it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::de::DeserializeOwned;
use visua11y_core::constants::GLOBAL_API_NAME;
use visua11y_core::{
    FeatureStates, InitOptions, LanguageChange, LanguageRegistry, Position,
    RegisterLanguageOptions, WidgetSession, WidgetSizeInput, parse_offset,
};
use wasm_bindgen::prelude::*;

use crate::attributes::{read_init_options, script_data_attribute};
use crate::dom::{DomError, document_ready, init_logger, parse_log_level, window};
use crate::events;
use crate::i18n::{
    LangObserver, default_language, load_languages, observe_html_lang, translate_widget,
};
use crate::storage::{CookieStore, LocalStore, browser_persistence};
use crate::tools::{apply_feature, run_accessibility};
use crate::widget::{apply_button_icon, apply_button_position, render_widget};

type BrowserSession = WidgetSession<LocalStore, CookieStore>;

struct Agent {
    session: RefCell<BrowserSession>,
    lang_observer: RefCell<Option<LangObserver>>,
}

fn logged(what: &str, result: Result<(), DomError>) {
    if let Err(err) = result {
        log::error!("{what} failed: {err}");
    }
}

/// Decode an optional JS argument, treating `undefined`/`null` as absent.
fn decode<T: DeserializeOwned>(what: &str, value: JsValue) -> Option<T> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|err| log::warn!("ignoring malformed {what}: {err}"))
        .ok()
}

impl Agent {
    fn boot(mut options: InitOptions) -> Rc<Self> {
        if let Some(level) = options.log_level.as_deref() {
            init_logger(parse_log_level(Some(level)));
        }
        if options.lang.is_none() {
            options.lang = Some(default_language(None));
        }

        let mut languages = LanguageRegistry::builtin();
        load_languages(&mut languages);
        let session = WidgetSession::initialize(&options, languages, browser_persistence());

        run_accessibility(session.states());
        logged("widget render", render_widget(session.config()));
        logged("widget translation", translate_widget(&session));

        let agent = Rc::new(Self {
            session: RefCell::new(session),
            lang_observer: RefCell::new(None),
        });
        if !options.disable_observe_lang {
            agent.observe_page_language();
        }
        log::info!("accessibility widget ready");
        agent
    }

    fn observe_page_language(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let observer = observe_html_lang(move || {
            if let Some(agent) = weak.upgrade() {
                let lang = default_language(script_data_attribute("lang").as_deref());
                agent.change_language(&lang);
            }
        });
        match observer {
            Ok(observer) => {
                self.lang_observer.replace(Some(observer));
            }
            Err(err) => log::warn!("page language will not be observed: {err}"),
        }
    }

    fn retranslate(&self) {
        logged("widget translation", translate_widget(&self.session.borrow()));
    }

    /// Host listeners may call back into the API, so no borrow is held while
    /// events are dispatched.
    fn announce(&self, change: &LanguageChange) {
        if let Some(code) = change.changed_code() {
            events::language_changed(code);
            self.retranslate();
        }
    }

    fn change_language(&self, code: &str) {
        let change = self.session.borrow_mut().change_language(code);
        if change == LanguageChange::Unsupported {
            log::debug!("ignoring unsupported language {code:?}");
        }
        self.announce(&change);
    }

    fn refresh_button(&self) {
        let session = self.session.borrow();
        logged("button placement", apply_button_position(session.config()));
        logged("button icon", apply_button_icon(session.config()));
    }
}

/// Handle to a running widget instance.
#[wasm_bindgen]
pub struct Visua11yAgent {
    inner: Rc<Agent>,
}

#[wasm_bindgen]
impl Visua11yAgent {
    /// Boot a widget from a plain options object; `undefined` uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Self {
        let options = decode::<InitOptions>("options", options).unwrap_or_default();
        Self::from_options(options)
    }

    #[wasm_bindgen(js_name = changeLanguage)]
    pub fn change_language(&self, code: &str) {
        self.inner.change_language(code);
    }

    #[wasm_bindgen(js_name = currentLanguage)]
    pub fn current_language(&self) -> String {
        self.inner.session.borrow().current_language().to_string()
    }

    /// Markup, an image URL or `#template-id`; omitted restores the default.
    #[wasm_bindgen(js_name = setIcon)]
    pub fn set_icon(&self, icon: Option<String>) {
        self.inner.session.borrow_mut().set_icon(icon);
        logged("button icon", apply_button_icon(self.inner.session.borrow().config()));
    }

    /// Returns the normalized code, or `undefined` when the code is blank.
    #[wasm_bindgen(js_name = registerLanguage)]
    pub fn register_language(&self, options: JsValue) -> Option<String> {
        let options = decode::<RegisterLanguageOptions>("language options", options)?;
        let (code, languages, active) = {
            let mut session = self.inner.session.borrow_mut();
            let code = session.register_language(options)?;
            load_languages(session.languages_mut());
            let active = session.current_language() == code;
            (code, session.languages().languages().to_vec(), active)
        };
        events::languages_updated(&languages);
        if active {
            self.inner.retranslate();
        }
        Some(code)
    }

    /// Drop every user override, re-apply tools and restore the button.
    #[wasm_bindgen(js_name = resetAll)]
    pub fn reset_all(&self) {
        let change = self.inner.session.borrow_mut().reset();
        run_accessibility(self.inner.session.borrow().states());
        self.inner.refresh_button();
        self.inner.announce(&change);
    }

    /// Replace the active features with a named profile.
    #[wasm_bindgen(js_name = applyProfile)]
    pub fn apply_profile(&self, id: &str) -> bool {
        let applied = self.inner.session.borrow_mut().apply_profile(id).is_some();
        if applied {
            run_accessibility(self.inner.session.borrow().states());
            self.inner.refresh_button();
        } else {
            log::warn!("unknown accessibility profile {id:?}");
        }
        applied
    }

    /// Merge feature states and re-apply the features that changed.
    #[wasm_bindgen(js_name = setUserStateSettings)]
    pub fn set_user_state_settings(&self, states: JsValue) {
        let Some(partial) = decode::<FeatureStates>("feature states", states) else {
            return;
        };
        let changed: Vec<String> = partial.keys().map(ToString::to_string).collect();
        self.inner
            .session
            .borrow_mut()
            .set_user_state_settings(partial);

        let session = self.inner.session.borrow();
        for id in &changed {
            apply_feature(id, session.states());
        }
    }

    /// Move the button; `offset` is `"x,y"` and keeps the current one when
    /// omitted or malformed.
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, position: &str, offset: Option<String>) {
        let Some(position) = Position::parse(position) else {
            log::warn!("unknown widget position {position:?}");
            return;
        };
        let offset = offset.as_deref().and_then(parse_offset);
        self.inner.session.borrow_mut().set_position(position, offset);
        self.inner.refresh_button();
    }

    /// Resize the button from a preset name or pixel size.
    #[wasm_bindgen(js_name = setWidgetSize)]
    pub fn set_widget_size(&self, size: JsValue) {
        let Some(input) = decode::<WidgetSizeInput>("widget size", size) else {
            return;
        };
        self.inner.session.borrow_mut().set_widget_size(input);
        self.inner.refresh_button();
    }
}

impl Visua11yAgent {
    #[must_use]
    pub fn from_options(options: InitOptions) -> Self {
        Self {
            inner: Agent::boot(options),
        }
    }

    /// Stop following `<html lang>`.
    pub fn stop_observing_lang(&self) {
        drop(self.inner.lang_observer.take());
    }
}

fn already_published() -> bool {
    window()
        .and_then(|win| js_sys::Reflect::get(&win, &JsValue::from_str(GLOBAL_API_NAME)).ok())
        .is_some_and(|value| !value.is_undefined() && !value.is_null())
}

/// Boot from page attributes once the document is ready and publish the
/// instance as `window.Visua11yAgentPlugin`.
///
/// A page that already published an instance is left alone.
///
/// # Errors
/// Returns an error if there is no document or the global cannot be set.
#[allow(clippy::future_not_send)]
pub async fn bootstrap() -> Result<(), DomError> {
    document_ready().await?;
    if already_published() {
        log::debug!("{GLOBAL_API_NAME} already present; skipping auto-boot");
        return Ok(());
    }

    let agent = Visua11yAgent::from_options(read_init_options());
    let win = window().ok_or(DomError::NoWindow)?;
    js_sys::Reflect::set(&win, &JsValue::from_str(GLOBAL_API_NAME), &JsValue::from(agent))?;
    Ok(())
}
