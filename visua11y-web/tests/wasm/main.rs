use visua11y_core::constants::{
    CONTAINER_CLASS, FILTER_MARKER_CLASS, FILTER_STYLE_ID, STORAGE_KEY,
};
use visua11y_core::tools::{LETTER_SPACING, css_tool};
use visua11y_core::{EffectiveConfig, KeyValueStore, Position};
use visua11y_web::cookies::{get_cookie, set_cookie};
use visua11y_web::dom;
use visua11y_web::storage::{CookieStore, LocalStore, browser_persistence};
use visua11y_web::stylesheet::{add_stylesheet, has_root_class, inject_tool_css, remove_stylesheet};
use visua11y_web::tools::{adjust_font_size, enable_contrast, reading_guide};
use visua11y_web::widget::{apply_button_icon, render_widget};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn doc() -> web_sys::Document {
    dom::document().expect("document")
}

fn count(selector: &str) -> u32 {
    doc().query_selector_all(selector).expect("query").length()
}

#[wasm_bindgen_test]
fn add_stylesheet_is_idempotent() {
    add_stylesheet("wasm-test-style", Some("p{color:red}")).expect("add");
    add_stylesheet("wasm-test-style", Some("p{color:blue}")).expect("update");
    assert_eq!(count("#wasm-test-style"), 1);
    let style = doc().get_element_by_id("wasm-test-style").expect("style");
    assert_eq!(style.text_content().as_deref(), Some("p{color:blue}"));

    remove_stylesheet("wasm-test-style").expect("remove");
    add_stylesheet("wasm-test-style", None).expect("empty add");
    assert_eq!(count("#wasm-test-style"), 0);
}

#[wasm_bindgen_test]
fn tool_css_toggles_style_and_marker() {
    let config = css_tool(LETTER_SPACING).expect("letter spacing tool");
    let style_selector = format!("#{}", config.stylesheet_id());

    inject_tool_css(config, true).expect("enable");
    assert_eq!(count(&style_selector), 1);
    assert!(has_root_class(&config.marker_class()));

    inject_tool_css(config, false).expect("disable");
    assert_eq!(count(&style_selector), 0);
    assert!(!has_root_class(&config.marker_class()));
}

#[wasm_bindgen_test]
fn contrast_switches_share_one_stylesheet() {
    enable_contrast(Some("dark-contrast")).expect("dark");
    enable_contrast(Some("monochrome")).expect("mono");
    assert_eq!(count(&format!("#{FILTER_STYLE_ID}")), 1);
    assert!(has_root_class(FILTER_MARKER_CLASS));

    enable_contrast(Some("not-a-filter")).expect("unknown");
    assert_eq!(count(&format!("#{FILTER_STYLE_ID}")), 0);
    assert!(!has_root_class(FILTER_MARKER_CLASS));
}

#[wasm_bindgen_test]
fn cookies_round_trip_encoded_values() {
    set_cookie("visua11y-wasm-test", "a b;c", Some(1.0)).expect("set");
    assert_eq!(get_cookie("visua11y-wasm-test").expect("get"), "a b;c");
    assert_eq!(get_cookie("visua11y-never-set").expect("get"), "");
}

#[wasm_bindgen_test]
fn browser_stores_share_one_key() {
    let payload = r#"{"lang":"de","states":{}}"#;
    LocalStore.set_item(STORAGE_KEY, payload).expect("local set");
    assert_eq!(LocalStore.get_item(STORAGE_KEY).expect("local get").as_deref(), Some(payload));

    CookieStore.set_item(STORAGE_KEY, payload).expect("cookie set");
    assert_eq!(CookieStore.get_item(STORAGE_KEY).expect("cookie get").as_deref(), Some(payload));

    let loaded = browser_persistence().load(STORAGE_KEY);
    assert_eq!(loaded["lang"], "de");
}

#[wasm_bindgen_test]
fn font_size_scales_from_the_original() {
    let body = doc().body().expect("body");
    let paragraph = doc()
        .create_element("p")
        .expect("p")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    paragraph.style().set_property("font-size", "10px").expect("style");
    paragraph.set_text_content(Some("sample"));
    body.append_child(&paragraph).expect("append");

    adjust_font_size(1.5).expect("scale");
    adjust_font_size(1.5).expect("scale again");
    assert_eq!(paragraph.style().get_property_value("font-size").expect("size"), "15px");

    adjust_font_size(1.0).expect("restore");
    assert_eq!(paragraph.style().get_property_value("font-size").expect("size"), "10px");
    paragraph.remove();
}

#[wasm_bindgen_test]
fn widget_button_follows_config() {
    let config = EffectiveConfig {
        position: Position::TopRight,
        offset: [15, 10],
        size: 60,
        ..EffectiveConfig::default()
    };
    render_widget(&config).expect("render");
    render_widget(&config).expect("render again");
    assert_eq!(count(&format!(".{CONTAINER_CLASS}")), 1);

    let button = doc()
        .query_selector(".visua11y-agent-menu-btn")
        .expect("query")
        .expect("button")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    let style = button.style();
    assert_eq!(style.get_property_value("top").expect("top"), "10px");
    assert_eq!(style.get_property_value("right").expect("right"), "15px");
    assert_eq!(style.get_property_value("width").expect("width"), "60px");
    assert_eq!(
        style
            .get_property_value("--visua11y-agent-icon-size")
            .expect("icon size"),
        "37px"
    );

    let with_url = EffectiveConfig {
        icon: Some("https://example.com/icon.png".into()),
        ..config
    };
    apply_button_icon(&with_url).expect("icon");
    assert_eq!(count(".visua11y-agent-menu-icon img"), 1);

    apply_button_icon(&EffectiveConfig::default()).expect("default icon");
    assert_eq!(count(".visua11y-agent-menu-icon svg"), 1);
}

#[wasm_bindgen_test]
fn reading_guide_attaches_once_and_detaches() {
    reading_guide(true).expect("enable");
    reading_guide(true).expect("enable again");
    assert_eq!(count(".visua11y-agent-rg-container"), 1);
    assert_eq!(count(".visua11y-agent-rg-container .visua11y-agent-rg"), 2);

    reading_guide(false).expect("disable");
    assert_eq!(count(".visua11y-agent-rg-container"), 0);

    reading_guide(true).expect("re-enable");
    assert_eq!(count(".visua11y-agent-rg-container"), 1);
    reading_guide(false).expect("disable again");
}
