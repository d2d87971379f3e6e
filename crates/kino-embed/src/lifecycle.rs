//! Player lifecycle
//!
//! Drives one embedded player from mount to teardown:
//! - waits for the widget script's ready signal
//! - builds the configuration and creates the widget
//! - attaches the event bridge
//! - disposes the widget and releases its id on teardown
//!
//! States only move forward: `Unloaded -> ScriptReady -> Created -> Disposed`.
//! Disposal is the only operation that may be repeated, and tearing down
//! before creation leaves the widget and the registry untouched.

use crate::{
    account::{AccountContextProvider, EnvAccountContext},
    config::{build_configuration, PlayerConfiguration},
    delivery::{DeliveryUrlBuilder, UrlResolver},
    element::ElementAttributes,
    events::{EventBridge, EventMap, PlayerRefs, PlayerSlot},
    identifier::{default_player_id, resolve_public_id},
    normalize::normalize,
    props::PlayerProps,
    registry::InstanceRegistry,
    widget::{ReadySignal, ScriptLoad, Widget, WidgetAssets, WidgetFactory, WidgetLoader, WidgetRuntime},
    Error, Result,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, instrument, warn};

/// Lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Waiting for the widget script
    Unloaded,
    /// Script loaded and factory found
    ScriptReady,
    /// Widget created and events attached
    Created,
    /// Torn down
    Disposed,
}

impl LifecycleState {
    /// Check if transition to target state is valid
    pub fn can_transition_to(&self, target: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, target),
            (Unloaded, ScriptReady)
                | (ScriptReady, Created)
                | (Created, Disposed)
                // Teardown before creation finished
                | (Unloaded, Disposed)
                | (ScriptReady, Disposed)
        )
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Unloaded => write!(f, "unloaded"),
            LifecycleState::ScriptReady => write!(f, "script_ready"),
            LifecycleState::Created => write!(f, "created"),
            LifecycleState::Disposed => write!(f, "disposed"),
        }
    }
}

/// Conditions that were handled quietly but can be inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Script loaded but no widget factory was defined
    FactoryUnavailable,
    /// Script failed to load; not retried
    ScriptLoadFailed(String),
    /// Loader went away without signalling
    ReadySignalDropped,
    /// Another active player uses the same id
    DuplicateId(String),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FactoryUnavailable => write!(f, "widget factory unavailable"),
            Diagnostic::ScriptLoadFailed(message) => write!(f, "script load failed: {}", message),
            Diagnostic::ReadySignalDropped => write!(f, "ready signal dropped"),
            Diagnostic::DuplicateId(id) => write!(f, "duplicate player id: {}", id),
        }
    }
}

/// One embedded player bound to a host media element
pub struct PlayerLifecycle<E: Clone + 'static> {
    props: PlayerProps,
    element: E,
    player_id: String,
    state: LifecycleState,
    registry: InstanceRegistry,
    runtime: Rc<dyn WidgetRuntime<E>>,
    account: Rc<dyn AccountContextProvider>,
    resolver: Option<Rc<dyn UrlResolver>>,
    events: Rc<EventMap<E>>,
    player: PlayerSlot,
    bridge: Option<EventBridge<E>>,
    configuration: Option<PlayerConfiguration>,
    diagnostics: Vec<Diagnostic>,
    load_requested: bool,
}

impl<E: Clone + 'static> PlayerLifecycle<E> {
    /// Create a lifecycle in the `Unloaded` state
    ///
    /// The account context defaults to the environment; poster URLs default
    /// to a [`DeliveryUrlBuilder`] for that account.
    pub fn new(
        props: PlayerProps,
        element: E,
        runtime: Rc<dyn WidgetRuntime<E>>,
        registry: InstanceRegistry,
    ) -> Self {
        let player_id = props
            .id
            .clone()
            .unwrap_or_else(|| default_player_id(&resolve_public_id(&props.src)));

        Self {
            props,
            element,
            player_id,
            state: LifecycleState::Unloaded,
            registry,
            runtime,
            account: Rc::new(EnvAccountContext::from_env()),
            resolver: None,
            events: Rc::new(EventMap::new()),
            player: Rc::new(RefCell::new(None)),
            bridge: None,
            configuration: None,
            diagnostics: Vec::new(),
            load_requested: false,
        }
    }

    pub fn with_events(mut self, events: EventMap<E>) -> Self {
        self.events = Rc::new(events);
        self
    }

    pub fn with_account(mut self, account: Rc<dyn AccountContextProvider>) -> Self {
        self.account = account;
        self
    }

    pub fn with_resolver(mut self, resolver: Rc<dyn UrlResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn props(&self) -> &PlayerProps {
        &self.props
    }

    /// Current widget handle, if created and not yet disposed
    pub fn player(&self) -> Option<Rc<dyn Widget>> {
        self.player.borrow().clone()
    }

    /// Snapshot of the player and host element handles
    pub fn refs(&self) -> PlayerRefs<E> {
        PlayerRefs {
            player: self.player(),
            element: self.element.clone(),
        }
    }

    /// Configuration handed to the widget factory
    pub fn configuration(&self) -> Option<&PlayerConfiguration> {
        self.configuration.as_ref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Assets the loader should fetch for this player
    pub fn assets(&self) -> WidgetAssets {
        WidgetAssets::for_player(&self.player_id)
    }

    /// Attributes for the host media element and its container
    pub fn element_attributes(&self) -> ElementAttributes {
        ElementAttributes::new(
            &self.player_id,
            self.props.class_name.as_deref(),
            self.props.width.as_ref(),
            self.props.height.as_ref(),
        )
    }

    /// Transition to new state
    fn set_state(&mut self, new_state: LifecycleState) -> Result<()> {
        let current = self.state;

        if !current.can_transition_to(new_state) {
            return Err(Error::InvalidStateTransition {
                from: current.to_string(),
                to: new_state.to_string(),
            });
        }

        self.state = new_state;
        info!(player_id = %self.player_id, from = %current, to = %new_state, "Lifecycle transition");

        Ok(())
    }

    /// Ask `loader` for the widget assets
    ///
    /// Only the first request of an `Unloaded` lifecycle reaches the loader;
    /// later calls, or calls after teardown, return `None`.
    pub fn request_load(&mut self, loader: &dyn WidgetLoader) -> Option<ReadySignal> {
        if self.state != LifecycleState::Unloaded || self.load_requested {
            debug!(player_id = %self.player_id, state = %self.state, "Widget load already requested");
            return None;
        }
        self.load_requested = true;
        Some(loader.load(&self.assets()))
    }

    /// Start loading through `loader` and wait for the widget to be created
    pub async fn mount(&mut self, loader: &dyn WidgetLoader) -> Result<()> {
        match self.request_load(loader) {
            Some(signal) => self.await_ready(signal).await,
            None => Ok(()),
        }
    }

    /// Wait for a ready signal, then create the widget
    ///
    /// Load failures and a dropped signal are logged and recorded as
    /// diagnostics; only the widget factory's own error is returned.
    pub async fn await_ready(&mut self, signal: ReadySignal) -> Result<()> {
        let outcome = signal.wait().await;
        self.on_ready_outcome(outcome)
    }

    /// Apply the outcome of a ready signal that was awaited elsewhere
    pub fn on_ready_outcome(&mut self, outcome: Result<ScriptLoad>) -> Result<()> {
        match outcome {
            Ok(ScriptLoad::Loaded) => self.on_script_ready(),
            Ok(ScriptLoad::Failed(message)) => {
                self.on_script_error(message);
                Ok(())
            }
            Err(err) => {
                warn!(player_id = %self.player_id, error = %err, "Widget loader never signalled");
                self.diagnostics.push(Diagnostic::ReadySignalDropped);
                Ok(())
            }
        }
    }

    /// Handle the loader's ready signal
    ///
    /// Without a widget factory nothing is created and the lifecycle stays
    /// `Unloaded`. Signals arriving after the first one, or after teardown,
    /// are ignored.
    #[instrument(skip(self), fields(player_id = %self.player_id))]
    pub fn on_script_ready(&mut self) -> Result<()> {
        if self.state != LifecycleState::Unloaded {
            debug!(state = %self.state, "Ignoring ready signal");
            return Ok(());
        }

        let Some(factory) = self.runtime.factory() else {
            warn!("Widget script loaded but no player factory is available, skipping creation");
            self.diagnostics.push(Diagnostic::FactoryUnavailable);
            return Ok(());
        };

        self.set_state(LifecycleState::ScriptReady)?;
        self.create(factory.as_ref())
    }

    /// Handle a failed script load; no retry is attempted
    pub fn on_script_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.state != LifecycleState::Unloaded {
            debug!(state = %self.state, error = %message, "Ignoring late script error");
            return;
        }
        error!(player_id = %self.player_id, error = %message, "Failed to load video player script");
        self.diagnostics.push(Diagnostic::ScriptLoadFailed(message));
    }

    fn create(&mut self, factory: &dyn WidgetFactory<E>) -> Result<()> {
        let account = self.account.resolve(self.props.config.as_ref());
        let resolver: Rc<dyn UrlResolver> = match &self.resolver {
            Some(resolver) => Rc::clone(resolver),
            None => Rc::new(DeliveryUrlBuilder::new(account.clone())),
        };

        let normalized = normalize(&self.props, resolver.as_ref());
        let configuration = build_configuration(&normalized, &account);

        if self.registry.register(&self.player_id) {
            self.diagnostics.push(Diagnostic::DuplicateId(self.player_id.clone()));
        }

        let widget = match factory.create(&self.element, &configuration) {
            Ok(widget) => widget,
            Err(err) => {
                self.registry.unregister(&self.player_id);
                error!(error = %err, "Widget factory failed");
                return Err(err);
            }
        };

        *self.player.borrow_mut() = Some(Rc::clone(&widget));
        self.configuration = Some(configuration);
        self.set_state(LifecycleState::Created)?;

        let bridge = EventBridge::new(Rc::clone(&self.events), Rc::clone(&self.player), self.element.clone());
        bridge.attach(widget.as_ref());
        debug!(events = ?self.events.mapped_events(), "Event bridge attached");
        self.bridge = Some(bridge);

        Ok(())
    }

    /// Tear the player down
    ///
    /// Disposes the widget, then releases the player id. Safe to call in
    /// any state and any number of times.
    pub fn dispose(&mut self) {
        match self.state {
            LifecycleState::Disposed => {
                debug!(player_id = %self.player_id, "Already disposed");
                return;
            }
            LifecycleState::Created => {
                if let Some(bridge) = self.bridge.take() {
                    bridge.detach();
                }
                let widget = self.player.borrow_mut().take();
                if let Some(widget) = widget {
                    widget.dispose();
                }
                self.registry.unregister(&self.player_id);
            }
            LifecycleState::Unloaded | LifecycleState::ScriptReady => {
                debug!(player_id = %self.player_id, state = %self.state, "Disposed before creation");
            }
        }

        if let Err(err) = self.set_state(LifecycleState::Disposed) {
            warn!(error = %err, "Unexpected state during disposal");
        }
    }
}

impl<E: Clone + 'static> Drop for PlayerLifecycle<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}
