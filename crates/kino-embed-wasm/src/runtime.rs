//! Widget runtime backed by the page's `window.cloudinary` global

use js_sys::{Function, Reflect, JSON};
use kino_embed::{Error, NativeHandler, PlayerConfiguration, Widget, WidgetFactory, WidgetRuntime};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlVideoElement, Window};

/// Raw JS handle of the most recently created player
pub type PlayerHandle = Rc<RefCell<Option<JsValue>>>;

/// Looks up the player factory the widget script installs on `window`
pub struct JsRuntime {
    window: Window,
    current: PlayerHandle,
}

impl JsRuntime {
    pub fn new(window: Window, current: PlayerHandle) -> Self {
        Self { window, current }
    }
}

impl WidgetRuntime<HtmlVideoElement> for JsRuntime {
    fn factory(&self) -> Option<Rc<dyn WidgetFactory<HtmlVideoElement>>> {
        let (cloudinary, video_player) = lookup_factory(&self.window)?;
        Some(Rc::new(JsFactory {
            cloudinary,
            video_player,
            current: Rc::clone(&self.current),
        }))
    }
}

/// True once `window.cloudinary.videoPlayer` is callable
pub fn factory_installed(window: &Window) -> bool {
    lookup_factory(window).is_some()
}

fn lookup_factory(window: &Window) -> Option<(JsValue, Function)> {
    let cloudinary = Reflect::get(window, &JsValue::from_str("cloudinary")).ok()?;
    if cloudinary.is_undefined() || cloudinary.is_null() {
        return None;
    }
    let video_player = method(&cloudinary, "videoPlayer").ok()?;
    Some((cloudinary, video_player))
}

/// Calls `cloudinary.videoPlayer(element, options)`
pub struct JsFactory {
    cloudinary: JsValue,
    video_player: Function,
    current: PlayerHandle,
}

impl WidgetFactory<HtmlVideoElement> for JsFactory {
    fn create(
        &self,
        element: &HtmlVideoElement,
        options: &PlayerConfiguration,
    ) -> kino_embed::Result<Rc<dyn Widget>> {
        let options = JSON::parse(&options.to_json()).map_err(|e| Error::widget(describe(&e)))?;
        let player = self
            .video_player
            .call2(&self.cloudinary, &JsValue::from(element.clone()), &options)
            .map_err(|e| Error::widget(describe(&e)))?;

        *self.current.borrow_mut() = Some(player.clone());
        Ok(Rc::new(JsWidget::new(player)))
    }
}

/// A player object returned by the widget factory
pub struct JsWidget {
    player: JsValue,
    listeners: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl JsWidget {
    pub fn new(player: JsValue) -> Self {
        Self {
            player,
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl Widget for JsWidget {
    fn on(&self, event: &str, handler: NativeHandler) {
        let name = event.to_string();
        let closure = Closure::wrap(Box::new(move || handler(&name)) as Box<dyn FnMut()>);

        let result = method(&self.player, "on").and_then(|on| {
            on.call2(&self.player, &JsValue::from_str(event), closure.as_ref())
        });
        if let Err(e) = result {
            web_sys::console::warn_1(&format!("[Kino Embed] Failed to subscribe to {}: {}", event, describe(&e)).into());
            return;
        }

        self.listeners.borrow_mut().push(closure);
    }

    fn dispose(&self) {
        // player.videojs.cloudinary.dispose()
        let result = Reflect::get(&self.player, &JsValue::from_str("videojs"))
            .and_then(|videojs| Reflect::get(&videojs, &JsValue::from_str("cloudinary")))
            .and_then(|cloudinary| method(&cloudinary, "dispose").and_then(|dispose| dispose.call0(&cloudinary)));
        if let Err(e) = result {
            web_sys::console::warn_1(&format!("[Kino Embed] Player dispose failed: {}", describe(&e)).into());
        }

        self.listeners.borrow_mut().clear();
    }
}

fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?.dyn_into::<Function>()
}

pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value))
}
