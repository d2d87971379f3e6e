//! Core types for Kino Embed

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single transformation directive (`{"quality": "auto"}`, `{"crop": "fill", "width": 600}`)
pub type Transformation = Map<String, Value>;

/// Either a single value or a list of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into an ordered list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::One(value)
    }
}

/// Player dimension as given by the caller (`1920` or `"1920"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(u32),
    Text(String),
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Pixels(px) => write!(f, "{}", px),
            Dimension::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<u32> for Dimension {
    fn from(px: u32) -> Self {
        Dimension::Pixels(px)
    }
}

/// Raw `autoplay` prop: a boolean, or a string that is either a boolean
/// literal or the name of a widget autoplay mode (`"on-scroll"`, `"always"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoplayInput {
    Flag(bool),
    Text(String),
}

/// Resolved autoplay behaviour
///
/// A named mode and the standard flag are never set together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Autoplay {
    #[default]
    Off,
    On,
    Mode(String),
}

impl Autoplay {
    /// Value of the standard `autoplay` flag
    pub fn flag(&self) -> bool {
        matches!(self, Autoplay::On)
    }

    /// Value of the widget's `autoplayMode` option
    pub fn mode(&self) -> Option<&str> {
        match self {
            Autoplay::Mode(mode) => Some(mode),
            _ => None,
        }
    }
}

/// Custom logo settings given as an object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoOptions {
    pub image_url: Option<String>,
    pub on_click_url: Option<String>,
}

/// Raw `logo` prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogoInput {
    Flag(bool),
    Custom(LogoOptions),
}

impl Default for LogoInput {
    fn default() -> Self {
        LogoInput::Flag(true)
    }
}

/// Resolved logo settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSpec {
    Hidden,
    DefaultVisible,
    Custom {
        image_url: Option<String>,
        click_url: Option<String>,
    },
}

impl LogoSpec {
    pub fn is_visible(&self) -> bool {
        !matches!(self, LogoSpec::Hidden)
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            LogoSpec::Custom { image_url, .. } => image_url.as_deref(),
            _ => None,
        }
    }

    pub fn click_url(&self) -> Option<&str> {
        match self {
            LogoSpec::Custom { click_url, .. } => click_url.as_deref(),
            _ => None,
        }
    }
}

/// Options handed to the URL resolver: an optional source plus an open set
/// of transformation options (`crop`, `width`, `gravity`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub transforms: Map<String, Value>,
}

impl AssetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source identifier or remote URL
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Add a transformation option
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.transforms.insert(key.into(), value.into());
        self
    }

    /// Look up a transformation option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.transforms.get(key)
    }
}

/// Raw `poster` prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PosterInput {
    /// Public id or remote URL
    Source(String),
    Options(AssetOptions),
}

/// Resolved poster source
#[derive(Debug, Clone, PartialEq)]
pub enum PosterSpec {
    /// Another asset referenced by public id or remote URL
    Identifier(String),
    /// A still frame of the player's own video
    DerivedFromVideo(AssetOptions),
    /// A separate image asset; `src` is always set
    ExternalImage(AssetOptions),
}

/// The widget's `posterOptions` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterOptions {
    pub public_id: String,
}

/// Player color theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
