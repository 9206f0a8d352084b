//! Speech-driven page navigation.
//!
//! Speech recognition is not part of the stable `web-sys` surface, so the
//! constructor and its members are reached through `Reflect`.

use std::cell::RefCell;

use js_sys::{Array, Function, Reflect};
use visua11y_core::{FeatureStates, VoiceCommand};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ScrollBehavior, ScrollToOptions, Window};

use crate::dom::{DomError, window};
use crate::events;

const CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];
const SCROLL_FRACTION: f64 = 0.8;

struct Session {
    recognition: JsValue,
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut()>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

pub(super) fn apply(states: &FeatureStates) -> Result<(), DomError> {
    voice_navigation(states.is_enabled(super::VOICE_NAVIGATION))
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, DomError> {
    Ok(Reflect::get(target, &JsValue::from_str(key))?)
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), DomError> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

fn call(target: &JsValue, method: &str) -> Result<(), DomError> {
    get(target, method)?
        .dyn_into::<Function>()
        .map_err(|_| DomError::Js(format!("{method} is not a function")))?
        .call0(target)?;
    Ok(())
}

fn recognition_constructor(win: &Window) -> Option<Function> {
    CONSTRUCTORS.iter().find_map(|name| {
        Reflect::get(win, &JsValue::from_str(name))
            .ok()
            .and_then(|ctor| ctor.dyn_into::<Function>().ok())
    })
}

/// Transcript of the newest result in a `SpeechRecognitionEvent`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn latest_transcript(event: &JsValue) -> Option<String> {
    let results = get(event, "results").ok()?;
    let length = get(&results, "length").ok()?.as_f64()?;
    if length < 1.0 {
        return None;
    }
    let last = Reflect::get_u32(&results, (length as u32).saturating_sub(1)).ok()?;
    let best = Reflect::get_u32(&last, 0).ok()?;
    get(&best, "transcript").ok()?.as_string()
}

/// Carry out a recognised command on the current page.
///
/// # Errors
/// Returns an error if the window is unavailable or navigation is refused.
pub fn execute_command(command: VoiceCommand) -> Result<(), DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    let viewport = win.inner_height()?.as_f64().unwrap_or_default();
    let scroll_to = |top: f64| {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    };

    match command {
        VoiceCommand::ScrollUp => win.scroll_by_with_x_and_y(0.0, -viewport * SCROLL_FRACTION),
        VoiceCommand::ScrollDown => win.scroll_by_with_x_and_y(0.0, viewport * SCROLL_FRACTION),
        VoiceCommand::ScrollTop => scroll_to(0.0),
        VoiceCommand::ScrollBottom => {
            let height = win
                .document()
                .and_then(|doc| doc.document_element())
                .map_or(0, |root| root.scroll_height());
            scroll_to(f64::from(height));
        }
        VoiceCommand::GoBack => win.history()?.back()?,
        VoiceCommand::Reload => win.location().reload()?,
        VoiceCommand::OpenMenu => events::menu_requested(true),
        VoiceCommand::CloseMenu => events::menu_requested(false),
    }
    Ok(())
}

fn start() -> Result<(), DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    let Some(constructor) = recognition_constructor(&win) else {
        log::info!("speech recognition is not supported in this browser");
        return Ok(());
    };
    let recognition = Reflect::construct(&constructor, &Array::new())?;
    set(&recognition, "continuous", &JsValue::TRUE)?;
    set(&recognition, "interimResults", &JsValue::FALSE)?;

    let on_result = Closure::wrap(Box::new(move |event: JsValue| {
        let Some(transcript) = latest_transcript(&event) else {
            return;
        };
        match VoiceCommand::parse(&transcript) {
            Some(command) => {
                log::debug!("voice command {command:?} from {transcript:?}");
                if let Err(err) = execute_command(command) {
                    log::warn!("voice command {command:?} failed: {err}");
                }
            }
            None => log::debug!("ignoring unrecognised phrase {transcript:?}"),
        }
    }) as Box<dyn FnMut(JsValue)>);

    // Browsers end continuous sessions after silence; resume while enabled.
    let restart_target = recognition.clone();
    let on_end = Closure::wrap(Box::new(move || {
        let active = SESSION.with(|cell| {
            cell.borrow()
                .as_ref()
                .is_some_and(|session| session.recognition == restart_target)
        });
        if active && let Err(err) = call(&restart_target, "start") {
            log::warn!("could not resume speech recognition: {err}");
        }
    }) as Box<dyn FnMut()>);

    set(&recognition, "onresult", on_result.as_ref())?;
    set(&recognition, "onend", on_end.as_ref())?;
    call(&recognition, "start")?;

    SESSION.with(|cell| {
        cell.replace(Some(Session {
            recognition,
            _on_result: on_result,
            _on_end: on_end,
        }))
    });
    Ok(())
}

/// Start or stop listening for voice commands.
///
/// Browsers without speech recognition make this a logged no-op.
///
/// # Errors
/// Returns an error if recognition cannot be started or stopped.
pub fn voice_navigation(enable: bool) -> Result<(), DomError> {
    if enable {
        if SESSION.with(|cell| cell.borrow().is_some()) {
            return Ok(());
        }
        return start();
    }

    if let Some(session) = SESSION.with(|cell| cell.borrow_mut().take()) {
        set(&session.recognition, "onend", &JsValue::NULL)?;
        set(&session.recognition, "onresult", &JsValue::NULL)?;
        call(&session.recognition, "stop")?;
    }
    Ok(())
}
