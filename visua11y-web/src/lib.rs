#![forbid(unsafe_code)]
//! Browser half of the Visua11y Agent: DOM tools, storage backends, the
//! launcher button and the exported `Visua11yAgent` API.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod attributes;
pub mod cookies;
pub mod dom;
pub mod events;
pub mod i18n;
pub mod storage;
pub mod stylesheet;
pub mod tools;
pub mod widget;

pub use app::Visua11yAgent;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    dom::init_logger(dom::parse_log_level(
        attributes::script_data_attribute("log-level").as_deref(),
    ));
    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = app::bootstrap().await {
            log::error!("widget bootstrap failed: {err}");
        }
    });
}
