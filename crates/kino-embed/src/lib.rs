//! Kino Embed - Embedded Cloudinary Video Player for Kino
//!
//! This crate turns declarative player props into a running third-party
//! video widget:
//! - Public id resolution from ids or delivery URLs
//! - Normalization of polymorphic props (autoplay, logo, poster, transformations)
//! - Widget configuration building
//! - Widget creation and disposal driven by the script loader
//! - Native event forwarding to caller callbacks
//! - Duplicate player id detection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Kino Embed                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │  Identifier  │  │    Option    │  │    Config    │          │
//! │  │   Resolver   │─▶│  Normalizer  │─▶│   Builder    │          │
//! │  └──────────────┘  └──────────────┘  └──────┬───────┘          │
//! │                                             │                   │
//! │                    ┌─────────────┐          │                   │
//! │   ready signal ───▶│  Lifecycle  │◀─────────┘                   │
//! │                    │   Manager   │                              │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │  ┌──────────────┐  ┌──────┴──────┐  ┌──────────────┐           │
//! │  │   Instance   │  │    Event    │  │    Widget    │           │
//! │  │   Registry   │  │   Bridge    │  │   Factory    │           │
//! │  └──────────────┘  └─────────────┘  └──────────────┘           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod account;
pub mod config;
pub mod delivery;
pub mod element;
pub mod error;
pub mod events;
pub mod identifier;
pub mod lifecycle;
pub mod normalize;
pub mod props;
pub mod registry;
pub mod types;
pub mod widget;

pub use account::{AccountContext, AccountContextProvider, CloudConfig, EnvAccountContext};
pub use config::{build_configuration, PlayerConfiguration};
pub use delivery::{DeliveryUrlBuilder, UrlResolver};
pub use element::ElementAttributes;
pub use error::{Error, Result};
pub use events::{EventBridge, EventMap, PlayerEvent, PlayerRefs};
pub use identifier::{default_player_id, resolve_public_id, DeliveryUrl};
pub use lifecycle::{Diagnostic, LifecycleState, PlayerLifecycle};
pub use normalize::{normalize, NormalizedOptions};
pub use props::PlayerProps;
pub use registry::InstanceRegistry;
pub use types::*;
pub use widget::{
    ready_channel, NativeHandler, ReadyNotifier, ReadySignal, ScriptLoad, Widget, WidgetAssets,
    WidgetFactory, WidgetLoader, WidgetRuntime, PLAYER_VERSION,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the embed library
pub fn init() {
    tracing::info!(version = VERSION, widget_version = PLAYER_VERSION, "Kino Embed initialized");
}
