//! Widget seams
//!
//! The third-party player is reached only through these traits: a runtime
//! that exposes the factory once the script has loaded, the factory itself,
//! and the created widget. The loader side is a version-pinned asset pair
//! plus a one-shot ready signal.

use crate::config::PlayerConfiguration;
use crate::{Error, Result};
use std::rc::Rc;
use tokio::sync::oneshot;

/// Pinned widget release
pub const PLAYER_VERSION: &str = "1.11.1";

const ASSET_BASE: &str = "https://unpkg.com/cloudinary-video-player";

/// Listener registered on a native widget event; receives the event name
pub type NativeHandler = Rc<dyn Fn(&str)>;

/// A created player instance
pub trait Widget {
    /// Subscribe to a native event
    fn on(&self, event: &str, handler: NativeHandler);

    /// Run the widget's native disposal routine
    fn dispose(&self);
}

/// Builds players against a host media element
pub trait WidgetFactory<E> {
    fn create(&self, element: &E, options: &PlayerConfiguration) -> Result<Rc<dyn Widget>>;
}

/// The environment the widget script installs itself into
pub trait WidgetRuntime<E> {
    /// The global factory, if the script defined one
    fn factory(&self) -> Option<Rc<dyn WidgetFactory<E>>>;
}

/// Fetches the widget's script and stylesheet and reports when they are ready
pub trait WidgetLoader {
    fn load(&self, assets: &WidgetAssets) -> ReadySignal;
}

/// Script and stylesheet locations for the pinned widget release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetAssets {
    pub version: &'static str,
    pub script_url: String,
    pub stylesheet_url: String,
    /// Unique id for the script element of one player
    pub script_id: String,
}

impl WidgetAssets {
    pub fn for_player(player_id: &str) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            version: PLAYER_VERSION,
            script_url: format!("{}@{}/dist/cld-video-player.min.js", ASSET_BASE, PLAYER_VERSION),
            stylesheet_url: format!("{}@{}/dist/cld-video-player.min.css", ASSET_BASE, PLAYER_VERSION),
            script_id: format!("cloudinary-videoplayer-{}-{}", player_id, &suffix[..8]),
        }
    }
}

/// Outcome reported by a widget loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLoad {
    Loaded,
    Failed(String),
}

/// Sending half of the ready signal, held by the loader
#[derive(Debug)]
pub struct ReadyNotifier {
    tx: oneshot::Sender<ScriptLoad>,
}

impl ReadyNotifier {
    pub fn loaded(self) {
        let _ = self.tx.send(ScriptLoad::Loaded);
    }

    pub fn failed(self, message: impl Into<String>) {
        let _ = self.tx.send(ScriptLoad::Failed(message.into()));
    }
}

/// Receiving half of the ready signal, awaited by the lifecycle
#[derive(Debug)]
pub struct ReadySignal {
    rx: oneshot::Receiver<ScriptLoad>,
}

impl ReadySignal {
    /// A signal that has already fired with `outcome`
    pub fn resolved(outcome: ScriptLoad) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        Self { rx }
    }

    /// Wait for the loader; fails if the notifier was dropped without firing
    pub async fn wait(self) -> Result<ScriptLoad> {
        self.rx.await.map_err(|_| Error::ReadySignalDropped)
    }
}

/// Create a connected notifier/signal pair
pub fn ready_channel() -> (ReadyNotifier, ReadySignal) {
    let (tx, rx) = oneshot::channel();
    (ReadyNotifier { tx }, ReadySignal { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_are_version_pinned() {
        let assets = WidgetAssets::for_player("player-dog");
        assert_eq!(
            assets.script_url,
            "https://unpkg.com/cloudinary-video-player@1.11.1/dist/cld-video-player.min.js"
        );
        assert!(assets.stylesheet_url.ends_with("@1.11.1/dist/cld-video-player.min.css"));
        assert!(assets.script_id.starts_with("cloudinary-videoplayer-player-dog-"));
    }

    #[test]
    fn test_script_ids_are_unique() {
        let a = WidgetAssets::for_player("p");
        let b = WidgetAssets::for_player("p");
        assert_ne!(a.script_id, b.script_id);
    }

    #[tokio::test]
    async fn test_ready_channel_delivers_once() {
        let (notifier, signal) = ready_channel();
        notifier.failed("404");
        assert_eq!(signal.wait().await.unwrap(), ScriptLoad::Failed("404".into()));
    }

    #[test]
    fn test_dropped_notifier() {
        let (notifier, signal) = ready_channel();
        drop(notifier);
        let outcome = tokio_test::block_on(signal.wait());
        assert!(matches!(outcome, Err(Error::ReadySignalDropped)));
    }

    #[test]
    fn test_resolved_signal() {
        let signal = ReadySignal::resolved(ScriptLoad::Loaded);
        assert_eq!(tokio_test::block_on(signal.wait()).unwrap(), ScriptLoad::Loaded);
    }
}
