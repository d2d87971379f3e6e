//! Event bridging
//!
//! Forwards the widget's native media events to caller callbacks. Callbacks
//! receive a [`PlayerRefs`] snapshot instead of the raw event payload.

use crate::widget::{NativeHandler, Widget};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::trace;

/// Native widget events the bridge can forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    Error,
    LoadedData,
    LoadedMetadata,
    Pause,
    Play,
    Ended,
}

impl PlayerEvent {
    pub const ALL: [PlayerEvent; 6] = [
        PlayerEvent::Error,
        PlayerEvent::LoadedData,
        PlayerEvent::LoadedMetadata,
        PlayerEvent::Pause,
        PlayerEvent::Play,
        PlayerEvent::Ended,
    ];

    /// Native event name
    pub fn name(&self) -> &'static str {
        match self {
            PlayerEvent::Error => "error",
            PlayerEvent::LoadedData => "loadeddata",
            PlayerEvent::LoadedMetadata => "loadedmetadata",
            PlayerEvent::Pause => "pause",
            PlayerEvent::Play => "play",
            PlayerEvent::Ended => "ended",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

impl std::fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Handles passed to event callbacks
pub struct PlayerRefs<E> {
    /// Current player, `None` once disposed
    pub player: Option<Rc<dyn Widget>>,
    /// Host media element
    pub element: E,
}

impl<E: Clone> Clone for PlayerRefs<E> {
    fn clone(&self) -> Self {
        Self {
            player: self.player.clone(),
            element: self.element.clone(),
        }
    }
}

pub type EventCallback<E> = Rc<dyn Fn(&PlayerRefs<E>)>;

/// Caller callbacks keyed by native event
pub struct EventMap<E> {
    on_error: Option<EventCallback<E>>,
    on_data_load: Option<EventCallback<E>>,
    on_metadata_load: Option<EventCallback<E>>,
    on_pause: Option<EventCallback<E>>,
    on_play: Option<EventCallback<E>>,
    on_ended: Option<EventCallback<E>>,
}

impl<E> Default for EventMap<E> {
    fn default() -> Self {
        Self {
            on_error: None,
            on_data_load: None,
            on_metadata_load: None,
            on_pause: None,
            on_play: None,
            on_ended: None,
        }
    }
}

impl<E> EventMap<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback for an event, replacing any previous one
    pub fn on(mut self, event: PlayerEvent, callback: impl Fn(&PlayerRefs<E>) + 'static) -> Self {
        *self.slot_mut(event) = Some(Rc::new(callback));
        self
    }

    pub fn on_error(self, callback: impl Fn(&PlayerRefs<E>) + 'static) -> Self {
        self.on(PlayerEvent::Error, callback)
    }

    pub fn on_data_load(self, callback: impl Fn(&PlayerRefs<E>) + 'static) -> Self {
        self.on(PlayerEvent::LoadedData, callback)
    }

    pub fn on_metadata_load(self, callback: impl Fn(&PlayerRefs<E>) + 'static) -> Self {
        self.on(PlayerEvent::LoadedMetadata, callback)
    }

    pub fn on_pause(self, callback: impl Fn(&PlayerRefs<E>) + 'static) -> Self {
        self.on(PlayerEvent::Pause, callback)
    }

    pub fn on_play(self, callback: impl Fn(&PlayerRefs<E>) + 'static) -> Self {
        self.on(PlayerEvent::Play, callback)
    }

    pub fn on_ended(self, callback: impl Fn(&PlayerRefs<E>) + 'static) -> Self {
        self.on(PlayerEvent::Ended, callback)
    }

    pub fn get(&self, event: PlayerEvent) -> Option<&EventCallback<E>> {
        match event {
            PlayerEvent::Error => self.on_error.as_ref(),
            PlayerEvent::LoadedData => self.on_data_load.as_ref(),
            PlayerEvent::LoadedMetadata => self.on_metadata_load.as_ref(),
            PlayerEvent::Pause => self.on_pause.as_ref(),
            PlayerEvent::Play => self.on_play.as_ref(),
            PlayerEvent::Ended => self.on_ended.as_ref(),
        }
    }

    /// Look up a callback by native event name
    pub fn get_by_name(&self, name: &str) -> Option<&EventCallback<E>> {
        PlayerEvent::from_name(name).and_then(|event| self.get(event))
    }

    /// Events that have a callback
    pub fn mapped_events(&self) -> Vec<PlayerEvent> {
        PlayerEvent::ALL
            .into_iter()
            .filter(|event| self.get(*event).is_some())
            .collect()
    }

    fn slot_mut(&mut self, event: PlayerEvent) -> &mut Option<EventCallback<E>> {
        match event {
            PlayerEvent::Error => &mut self.on_error,
            PlayerEvent::LoadedData => &mut self.on_data_load,
            PlayerEvent::LoadedMetadata => &mut self.on_metadata_load,
            PlayerEvent::Pause => &mut self.on_pause,
            PlayerEvent::Play => &mut self.on_play,
            PlayerEvent::Ended => &mut self.on_ended,
        }
    }
}

/// Slot holding the current player handle, shared with every listener
pub type PlayerSlot = Rc<RefCell<Option<Rc<dyn Widget>>>>;

/// Subscribes the event map to a created widget
pub struct EventBridge<E> {
    events: Rc<EventMap<E>>,
    player: PlayerSlot,
    element: E,
    attached: Rc<Cell<bool>>,
}

impl<E: Clone + 'static> EventBridge<E> {
    pub fn new(events: Rc<EventMap<E>>, player: PlayerSlot, element: E) -> Self {
        Self {
            events,
            player,
            element,
            attached: Rc::new(Cell::new(false)),
        }
    }

    /// Subscribe once to every event that has a callback
    pub fn attach(&self, widget: &dyn Widget) {
        if self.attached.replace(true) {
            return;
        }

        for event in self.events.mapped_events() {
            widget.on(event.name(), self.handler());
        }
    }

    /// Stop forwarding; events fired afterwards are dropped
    pub fn detach(&self) {
        self.attached.set(false);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Dispatch a native event by name
    pub fn dispatch(&self, name: &str) {
        dispatch(&self.events, &self.player, &self.element, &self.attached, name);
    }

    fn handler(&self) -> NativeHandler {
        let events = Rc::clone(&self.events);
        let player = Rc::clone(&self.player);
        let element = self.element.clone();
        let attached = Rc::clone(&self.attached);

        Rc::new(move |name: &str| dispatch(&events, &player, &element, &attached, name))
    }
}

fn dispatch<E: Clone>(
    events: &EventMap<E>,
    player: &PlayerSlot,
    element: &E,
    attached: &Cell<bool>,
    name: &str,
) {
    if !attached.get() {
        trace!(event = name, "Dropping event fired while detached");
        return;
    }

    let Some(callback) = events.get_by_name(name) else {
        trace!(event = name, "No callback for event");
        return;
    };

    let refs = PlayerRefs {
        player: player.borrow().clone(),
        element: element.clone(),
    };
    callback(&refs);
}
