//! JavaScript-facing player handle

use crate::loader::DomLoader;
use crate::runtime::{describe, JsRuntime, PlayerHandle};
use crate::to_js_error;
use js_sys::{Function, Object, Promise, Reflect, JSON};
use kino_embed::{EventMap, InstanceRegistry, PlayerEvent, PlayerLifecycle, PlayerProps, PlayerRefs};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{HtmlVideoElement, Window};

thread_local! {
    /// Player ids shared by every player on the page
    static REGISTRY: InstanceRegistry = InstanceRegistry::new();
}

/// Callback property names, by the event they receive
const CALLBACKS: [(PlayerEvent, &str); 6] = [
    (PlayerEvent::Error, "onError"),
    (PlayerEvent::LoadedData, "onDataLoad"),
    (PlayerEvent::LoadedMetadata, "onMetadataLoad"),
    (PlayerEvent::Pause, "onPause"),
    (PlayerEvent::Play, "onPlay"),
    (PlayerEvent::Ended, "onEnded"),
];

/// An embedded video player bound to a `<video>` element
#[wasm_bindgen]
pub struct KinoEmbedPlayer {
    lifecycle: Rc<RefCell<PlayerLifecycle<HtmlVideoElement>>>,
    window: Window,
    current: PlayerHandle,
}

#[wasm_bindgen]
impl KinoEmbedPlayer {
    /// Bind a player to `video`
    ///
    /// `props` is the player props object; `callbacks` may carry `onError`,
    /// `onDataLoad`, `onMetadataLoad`, `onPause`, `onPlay` and `onEnded`.
    /// The element's id, class and size attributes are set from the props.
    #[wasm_bindgen(constructor)]
    pub fn new(video: HtmlVideoElement, props: JsValue, callbacks: JsValue) -> Result<KinoEmbedPlayer, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

        let json = String::from(JSON::stringify(&props)?);
        let props = PlayerProps::from_json(&json).map_err(to_js_error)?;

        let current = PlayerHandle::default();
        let events = event_map(&callbacks, &current);
        let registry = REGISTRY.with(InstanceRegistry::clone);
        let runtime = Rc::new(JsRuntime::new(window.clone(), Rc::clone(&current)));

        let lifecycle = PlayerLifecycle::new(props, video.clone(), runtime, registry).with_events(events);

        let attributes = lifecycle.element_attributes();
        video.set_id(&attributes.id);
        video.set_class_name(&attributes.class_name);
        if let Some(width) = &attributes.width {
            video.set_attribute("width", width)?;
        }
        if let Some(height) = &attributes.height {
            video.set_attribute("height", height)?;
        }

        Ok(Self {
            lifecycle: Rc::new(RefCell::new(lifecycle)),
            window,
            current,
        })
    }

    /// Load the widget script and create the player
    ///
    /// The returned promise resolves once the script has settled. It only
    /// rejects if the widget factory itself throws. Mounting again, or after
    /// `dispose()`, resolves immediately without touching the page.
    #[wasm_bindgen]
    pub fn mount(&self) -> Promise {
        let loader = DomLoader::new(self.window.clone());
        let Some(signal) = self.lifecycle.borrow_mut().request_load(&loader) else {
            return Promise::resolve(&JsValue::UNDEFINED);
        };
        let lifecycle = Rc::clone(&self.lifecycle);

        future_to_promise(async move {
            let outcome = signal.wait().await;
            let result = lifecycle.borrow_mut().on_ready_outcome(outcome);
            result.map(|_| JsValue::UNDEFINED).map_err(to_js_error)
        })
    }

    /// Dispose the player and release its id
    #[wasm_bindgen]
    pub fn dispose(&self) {
        self.lifecycle.borrow_mut().dispose();
        self.current.borrow_mut().take();
    }

    #[wasm_bindgen(getter, js_name = playerId)]
    pub fn player_id(&self) -> String {
        self.lifecycle.borrow().player_id().to_string()
    }

    /// Lifecycle state name
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.lifecycle.borrow().state().to_string()
    }

    /// The raw widget player, or `null` before creation and after disposal
    #[wasm_bindgen(getter)]
    pub fn player(&self) -> JsValue {
        player_value(&self.current, self.lifecycle.borrow().player().is_some())
    }

    /// `{ player, video }`, the same object event callbacks receive
    #[wasm_bindgen]
    pub fn refs(&self) -> JsValue {
        refs_object(&self.lifecycle.borrow().refs(), &self.current)
    }

    /// Options the widget was created with, as JSON
    #[wasm_bindgen(js_name = configurationJson)]
    pub fn configuration_json(&self) -> Option<String> {
        self.lifecycle.borrow().configuration().map(|c| c.to_json())
    }

    /// Conditions that were handled without failing the mount
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Result<JsValue, JsValue> {
        let messages: Vec<String> = self
            .lifecycle
            .borrow()
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect();
        serde_wasm_bindgen::to_value(&messages).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn event_map(callbacks: &JsValue, current: &PlayerHandle) -> EventMap<HtmlVideoElement> {
    let mut events = EventMap::new();
    if callbacks.is_undefined() || callbacks.is_null() {
        return events;
    }

    for (event, property) in CALLBACKS {
        let Some(callback) = Reflect::get(callbacks, &JsValue::from_str(property))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
        else {
            continue;
        };

        let current = Rc::clone(current);
        events = events.on(event, move |refs| {
            if let Err(e) = callback.call1(&JsValue::NULL, &refs_object(refs, &current)) {
                web_sys::console::error_1(&format!("[Kino Embed] {} callback threw: {}", event, describe(&e)).into());
            }
        });
    }

    events
}

fn refs_object(refs: &PlayerRefs<HtmlVideoElement>, current: &PlayerHandle) -> JsValue {
    let object = Object::new();
    let player = player_value(current, refs.player.is_some());
    // Setting properties on a fresh plain object cannot fail
    let _ = Reflect::set(&object, &JsValue::from_str("player"), &player);
    let _ = Reflect::set(&object, &JsValue::from_str("video"), &refs.element);
    object.into()
}

fn player_value(current: &PlayerHandle, alive: bool) -> JsValue {
    if !alive {
        return JsValue::NULL;
    }
    current.borrow().clone().unwrap_or(JsValue::NULL)
}
