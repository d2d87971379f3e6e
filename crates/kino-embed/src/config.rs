//! Player configuration building
//!
//! Merges normalized options with the account context into the single
//! options object handed to the widget factory.

use crate::account::AccountContext;
use crate::normalize::NormalizedOptions;
use crate::types::*;
use serde::Serialize;
use serde_json::{Map, Value};

/// The options object consumed by the widget
///
/// Built fresh for every creation and never mutated after handoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfiguration {
    #[serde(rename = "cloud_name", skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,
    pub private_cdn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_distribution: Option<String>,

    pub public_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_mode: Option<String>,
    pub autoplay: bool,
    pub controls: bool,
    pub font_face: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(rename = "loop")]
    pub loop_playback: bool,
    pub muted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,

    pub transformation: Vec<Transformation>,

    pub show_logo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_onclick_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<PlayerColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_options: Option<PosterOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_types: Option<Vec<String>>,

    /// Unmodeled widget options, applied over the computed fields
    #[serde(skip)]
    pub passthrough: Map<String, Value>,
}

impl PlayerConfiguration {
    /// Render the widget options object
    ///
    /// Pass-through keys override computed keys of the same name.
    pub fn to_widget_options(&self) -> Map<String, Value> {
        let mut options = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        for (key, value) in &self.passthrough {
            options.insert(key.clone(), value.clone());
        }
        options
    }

    /// Widget options as a JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_widget_options()).unwrap_or_default()
    }
}

/// `"width:height"`, when both dimensions are known
pub fn aspect_ratio(width: Option<&Dimension>, height: Option<&Dimension>) -> Option<String> {
    match (width, height) {
        (Some(w), Some(h)) => Some(format!("{}:{}", w, h)),
        _ => None,
    }
}

/// Build the widget configuration; pure and deterministic
pub fn build_configuration(options: &NormalizedOptions, account: &AccountContext) -> PlayerConfiguration {
    PlayerConfiguration {
        cloud_name: account.cloud_name.clone(),
        private_cdn: account.private_cdn,
        secure_distribution: account.secure_distribution.clone(),

        public_id: options.public_id.clone(),

        autoplay_mode: options.autoplay.mode().map(str::to_string),
        autoplay: options.autoplay.flag(),
        controls: options.controls,
        font_face: options.font_face.clone().unwrap_or_default(),
        language: options.language.clone(),
        languages: options.languages.clone(),
        loop_playback: options.loop_playback,
        muted: options.muted,

        width: options.width.clone(),
        height: options.height.clone(),
        aspect_ratio: aspect_ratio(options.width.as_ref(), options.height.as_ref()),

        transformation: options.transformations.clone(),

        show_logo: options.logo.is_visible(),
        logo_image_url: options.logo.image_url().map(str::to_string),
        logo_onclick_url: options.logo.click_url().map(str::to_string),

        colors: options.colors.clone(),
        poster_options: options.poster_options.clone(),
        source_types: options.source_types.clone(),

        passthrough: options.passthrough.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::DeliveryUrlBuilder;
    use crate::normalize::normalize;
    use crate::props::PlayerProps;

    fn account() -> AccountContext {
        AccountContext {
            cloud_name: Some("demo".into()),
            secure_distribution: None,
            private_cdn: false,
        }
    }

    fn build(props: PlayerProps) -> PlayerConfiguration {
        let resolver = DeliveryUrlBuilder::new(account());
        build_configuration(&normalize(&props, &resolver), &account())
    }

    #[test]
    fn test_widget_option_keys() {
        let config = build(PlayerProps::new("samples/dog").with_size(1920, 1080));
        let options = config.to_widget_options();

        assert_eq!(options["cloud_name"], "demo");
        assert_eq!(options["publicId"], "samples/dog");
        assert_eq!(options["aspectRatio"], "1920:1080");
        assert_eq!(options["autoplay"], false);
        assert_eq!(options["controls"], true);
        assert_eq!(options["fontFace"], "");
        assert_eq!(options["loop"], false);
        assert_eq!(options["showLogo"], true);
        assert_eq!(options["transformation"][0]["quality"], "auto");
        assert!(options.get("autoplayMode").is_none());
        assert!(options.get("posterOptions").is_none());
    }

    #[test]
    fn test_autoplay_mode_option() {
        let config = build(PlayerProps::new("dog").with_autoplay(AutoplayInput::Text("on-scroll".into())));
        let options = config.to_widget_options();
        assert_eq!(options["autoplayMode"], "on-scroll");
        assert_eq!(options["autoplay"], false);
    }

    #[test]
    fn test_passthrough_overrides_computed() {
        let config = build(
            PlayerProps::new("dog")
                .with_passthrough("controls", false)
                .with_passthrough("hideContextMenu", true),
        );
        assert!(config.controls);

        let options = config.to_widget_options();
        assert_eq!(options["controls"], false);
        assert_eq!(options["hideContextMenu"], true);
    }

    #[test]
    fn test_poster_string_passes_through() {
        let config = build(PlayerProps::new("dog").with_poster(PosterInput::Source("some-id".into())));
        assert_eq!(config.to_widget_options()["posterOptions"]["publicId"], "some-id");
    }

    #[test]
    fn test_build_is_deterministic() {
        let props = PlayerProps::new("dog").with_size(640, 360);
        assert_eq!(build(props.clone()), build(props));
    }

    #[test]
    fn test_missing_cloud_name_is_omitted() {
        let resolver = DeliveryUrlBuilder::new(AccountContext::default());
        let config = build_configuration(&normalize(&PlayerProps::new("dog"), &resolver), &AccountContext::default());
        let options = config.to_widget_options();

        assert!(!options.contains_key("cloud_name"));
        assert!(!options.contains_key("secureDistribution"));
        assert_eq!(options["privateCdn"], false);
    }

    #[test]
    fn test_aspect_ratio_requires_both_dimensions() {
        assert_eq!(aspect_ratio(Some(&Dimension::Pixels(4)), None), None);
        assert_eq!(
            aspect_ratio(Some(&Dimension::Pixels(4)), Some(&Dimension::Text("3".into()))),
            Some("4:3".to_string())
        );
    }
}
