//! Script and stylesheet injection

use crate::runtime::{describe, factory_installed};
use kino_embed::{ready_channel, ReadyNotifier, ReadySignal, ScriptLoad, WidgetAssets, WidgetLoader};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlLinkElement, HtmlScriptElement, Window};

/// Loads the widget assets by appending `<link>` and `<script>` tags to the
/// document head
pub struct DomLoader {
    window: Window,
}

impl DomLoader {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn inject(&self, assets: &WidgetAssets, notifier: ReadyNotifier) -> Result<(), JsValue> {
        let document = self
            .window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let head = document.head().ok_or_else(|| JsValue::from_str("document has no head"))?;

        if !has_element(&document, &format!("link[href=\"{}\"]", assets.stylesheet_url))? {
            let link: HtmlLinkElement = document.create_element("link")?.dyn_into()?;
            link.set_rel("stylesheet");
            link.set_href(&assets.stylesheet_url);
            head.append_child(&link)?;
        }

        let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
        script.set_id(&assets.script_id);
        script.set_src(&assets.script_url);
        script.set_async(true);

        // Whichever of onload/onerror fires first resolves the signal
        let notifier = Rc::new(RefCell::new(Some(notifier)));
        let on_load = {
            let notifier = Rc::clone(&notifier);
            Closure::once_into_js(move || {
                if let Some(notifier) = notifier.borrow_mut().take() {
                    notifier.loaded();
                }
            })
        };
        let on_error = {
            let notifier = Rc::clone(&notifier);
            let url = assets.script_url.clone();
            Closure::once_into_js(move || {
                if let Some(notifier) = notifier.borrow_mut().take() {
                    notifier.failed(format!("failed to load {}", url));
                }
            })
        };
        script.set_onload(Some(on_load.unchecked_ref()));
        script.set_onerror(Some(on_error.unchecked_ref()));

        head.append_child(&script)?;
        Ok(())
    }
}

impl WidgetLoader for DomLoader {
    fn load(&self, assets: &WidgetAssets) -> ReadySignal {
        if factory_installed(&self.window) {
            return ReadySignal::resolved(ScriptLoad::Loaded);
        }

        let (notifier, signal) = ready_channel();
        match self.inject(assets, notifier) {
            Ok(()) => signal,
            Err(e) => ReadySignal::resolved(ScriptLoad::Failed(describe(&e))),
        }
    }
}

fn has_element(document: &Document, selector: &str) -> Result<bool, JsValue> {
    Ok(document.query_selector(selector)?.is_some())
}
