//! Inbound player props
//!
//! The declarative surface a host component exposes. Field names follow the
//! component's camelCase props; anything not modeled here lands in
//! [`PlayerProps::passthrough`] and is forwarded to the widget untouched.

use crate::account::CloudConfig;
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default `quality` transformation value
pub const DEFAULT_QUALITY: &str = "auto";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProps {
    /// Public id or full delivery URL
    #[serde(default)]
    pub src: String,
    /// Element id; derived from the public id when absent
    pub id: Option<String>,
    pub class_name: Option<String>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub autoplay: Option<AutoplayInput>,
    pub colors: Option<PlayerColors>,
    pub config: Option<CloudConfig>,
    #[serde(default = "default_true")]
    pub controls: bool,
    pub font_face: Option<String>,
    pub language: Option<String>,
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub logo: LogoInput,
    #[serde(default, rename = "loop")]
    pub loop_playback: bool,
    #[serde(default)]
    pub muted: bool,
    pub poster: Option<PosterInput>,
    pub source_types: Option<Vec<String>>,
    pub transformation: Option<OneOrMany<Transformation>>,
    #[serde(default = "default_quality")]
    pub quality: Value,
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

impl Default for PlayerProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            id: None,
            class_name: None,
            width: None,
            height: None,
            autoplay: None,
            colors: None,
            config: None,
            controls: true,
            font_face: None,
            language: None,
            languages: None,
            logo: LogoInput::default(),
            loop_playback: false,
            muted: false,
            poster: None,
            source_types: None,
            transformation: None,
            quality: default_quality(),
            passthrough: Map::new(),
        }
    }
}

impl PlayerProps {
    /// Props for a source with every other field at its default
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }

    /// Parse props from a JSON object
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_size(mut self, width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    pub fn with_autoplay(mut self, autoplay: AutoplayInput) -> Self {
        self.autoplay = Some(autoplay);
        self
    }

    pub fn with_logo(mut self, logo: LogoInput) -> Self {
        self.logo = logo;
        self
    }

    pub fn with_poster(mut self, poster: PosterInput) -> Self {
        self.poster = Some(poster);
        self
    }

    pub fn with_quality(mut self, quality: impl Into<Value>) -> Self {
        self.quality = quality.into();
        self
    }

    pub fn with_transformation(mut self, transformation: impl Into<OneOrMany<Transformation>>) -> Self {
        self.transformation = Some(transformation.into());
        self
    }

    /// Forward an option the props do not model
    pub fn with_passthrough(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.passthrough.insert(key.into(), value.into());
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_quality() -> Value {
    Value::from(DEFAULT_QUALITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = PlayerProps::new("dog");
        assert!(props.controls);
        assert_eq!(props.logo, LogoInput::Flag(true));
        assert!(!props.loop_playback);
        assert!(!props.muted);
        assert_eq!(props.quality, Value::from("auto"));
    }

    #[test]
    fn test_json_defaults_and_passthrough() {
        let props = PlayerProps::from_json(
            r#"{"src":"dog","width":1920,"height":"1080","loop":true,"hideContextMenu":true}"#,
        )
        .unwrap();

        assert_eq!(props.src, "dog");
        assert_eq!(props.width, Some(Dimension::Pixels(1920)));
        assert_eq!(props.height, Some(Dimension::Text("1080".into())));
        assert!(props.loop_playback);
        assert!(props.controls);
        assert_eq!(props.passthrough.get("hideContextMenu"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_json_polymorphic_fields() {
        let props = PlayerProps::from_json(
            r#"{"src":"dog","autoplay":"on-scroll","logo":{"imageUrl":"x"},"transformation":{"crop":"fill"}}"#,
        )
        .unwrap();

        assert_eq!(props.autoplay, Some(AutoplayInput::Text("on-scroll".into())));
        assert!(matches!(props.logo, LogoInput::Custom(_)));
        assert!(matches!(props.transformation, Some(OneOrMany::One(_))));
        assert!(props.passthrough.is_empty());
    }
}
