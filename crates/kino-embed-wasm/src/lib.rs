//! Kino Embed WASM - Browser bindings for the embedded video player
//!
//! Wires the embed lifecycle to the real page:
//! - Injects the pinned widget script and stylesheet
//! - Creates players through `window.cloudinary.videoPlayer`
//! - Forwards native player events to JavaScript callbacks
//!
//! ## Usage
//!
//! ```javascript
//! import init, { KinoEmbedPlayer } from '@kino/embed';
//!
//! await init();
//! const player = new KinoEmbedPlayer(video, { src: 'samples/dog', width: 1920, height: 1080 }, {
//!   onPlay: ({ player, video }) => console.log('playing', video.id),
//! });
//! player.mount();
//! ```

use wasm_bindgen::prelude::*;

mod loader;
mod player;
mod runtime;

pub use loader::DomLoader;
pub use player::KinoEmbedPlayer;
pub use runtime::{JsFactory, JsRuntime, JsWidget};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"[Kino Embed] Initialized".into());
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Version of the widget script players load
#[wasm_bindgen(js_name = widgetVersion)]
pub fn widget_version() -> String {
    kino_embed::PLAYER_VERSION.to_string()
}

pub(crate) fn to_js_error(err: kino_embed::Error) -> JsValue {
    JsValue::from_str(&format!("[{}] {}", err.error_code(), err))
}
