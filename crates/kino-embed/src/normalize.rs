//! Option normalization
//!
//! Resolves every polymorphic prop into a single tagged variant so that the
//! configuration builder never has to inspect raw shapes again.

use crate::delivery::UrlResolver;
use crate::identifier::{default_player_id, resolve_public_id};
use crate::props::PlayerProps;
use crate::types::*;
use serde_json::Value;
use tracing::debug;

/// Output format forcing a still image out of a video asset
pub const POSTER_FRAME_FORMAT: &str = "auto:image";

/// Props with every ambiguous field resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOptions {
    pub public_id: String,
    pub player_id: String,
    pub autoplay: Autoplay,
    pub logo: LogoSpec,
    pub poster: Option<PosterSpec>,
    /// Resolved `posterOptions`, computed through the URL resolver when needed
    pub poster_options: Option<PosterOptions>,
    pub transformations: Vec<Transformation>,
    pub controls: bool,
    pub loop_playback: bool,
    pub muted: bool,
    pub font_face: Option<String>,
    pub language: Option<String>,
    pub languages: Option<Vec<String>>,
    pub colors: Option<PlayerColors>,
    pub source_types: Option<Vec<String>>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub passthrough: serde_json::Map<String, Value>,
}

/// Normalize raw props, resolving poster URLs through `resolver`
pub fn normalize(props: &PlayerProps, resolver: &dyn UrlResolver) -> NormalizedOptions {
    let public_id = resolve_public_id(&props.src);
    let player_id = props
        .id
        .clone()
        .unwrap_or_else(|| default_player_id(&public_id));

    let poster = props.poster.as_ref().map(normalize_poster);
    let poster_options = poster
        .as_ref()
        .map(|spec| resolve_poster(spec, &public_id, resolver));

    let normalized = NormalizedOptions {
        autoplay: props.autoplay.as_ref().map(normalize_autoplay).unwrap_or_default(),
        logo: normalize_logo(&props.logo),
        transformations: normalize_transformations(&props.quality, props.transformation.clone()),
        poster,
        poster_options,
        controls: props.controls,
        loop_playback: props.loop_playback,
        muted: props.muted,
        font_face: props.font_face.clone(),
        language: props.language.clone(),
        languages: props.languages.clone(),
        colors: props.colors.clone(),
        source_types: props.source_types.clone(),
        width: props.width.clone(),
        height: props.height.clone(),
        passthrough: props.passthrough.clone(),
        public_id,
        player_id,
    };

    debug!(
        public_id = %normalized.public_id,
        player_id = %normalized.player_id,
        autoplay = ?normalized.autoplay,
        transformations = normalized.transformations.len(),
        "Normalized player options"
    );

    normalized
}

/// Quality transform first, then the caller's transformations in order
pub fn normalize_transformations(
    quality: &Value,
    transformation: Option<OneOrMany<Transformation>>,
) -> Vec<Transformation> {
    let mut quality_transform = Transformation::new();
    quality_transform.insert("quality".to_string(), quality.clone());

    let mut transformations = vec![quality_transform];
    if let Some(extra) = transformation {
        transformations.extend(extra.into_vec());
    }
    transformations
}

pub fn normalize_autoplay(input: &AutoplayInput) -> Autoplay {
    match input {
        AutoplayInput::Flag(true) => Autoplay::On,
        AutoplayInput::Flag(false) => Autoplay::Off,
        AutoplayInput::Text(text) => match text.as_str() {
            "true" => Autoplay::On,
            "false" | "" => Autoplay::Off,
            mode => Autoplay::Mode(mode.to_string()),
        },
    }
}

pub fn normalize_logo(input: &LogoInput) -> LogoSpec {
    match input {
        LogoInput::Flag(true) => LogoSpec::DefaultVisible,
        LogoInput::Flag(false) => LogoSpec::Hidden,
        LogoInput::Custom(options) => LogoSpec::Custom {
            image_url: options.image_url.clone(),
            click_url: options.on_click_url.clone(),
        },
    }
}

pub fn normalize_poster(input: &PosterInput) -> PosterSpec {
    match input {
        PosterInput::Source(source) => PosterSpec::Identifier(source.clone()),
        PosterInput::Options(options) if options.src.is_some() => {
            PosterSpec::ExternalImage(options.clone())
        }
        PosterInput::Options(options) => PosterSpec::DerivedFromVideo(options.clone()),
    }
}

/// Compute the widget's `posterOptions` for a poster spec
///
/// Identifiers pass through untouched. Derived frames are built from the
/// player's own public id with an image output format; external images are
/// built as standalone image URLs.
pub fn resolve_poster(spec: &PosterSpec, public_id: &str, resolver: &dyn UrlResolver) -> PosterOptions {
    let public_id = match spec {
        PosterSpec::Identifier(source) => source.clone(),
        PosterSpec::DerivedFromVideo(options) => {
            let options = options
                .clone()
                .with_src(public_id)
                .with_format(POSTER_FRAME_FORMAT);
            resolver.video_url(&options)
        }
        PosterSpec::ExternalImage(options) => resolver.image_url(options),
    };

    PosterOptions { public_id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingResolver {
        calls: RefCell<Vec<(&'static str, AssetOptions)>>,
    }

    impl UrlResolver for RecordingResolver {
        fn video_url(&self, options: &AssetOptions) -> String {
            self.calls.borrow_mut().push(("video", options.clone()));
            "https://resolved/video".to_string()
        }

        fn image_url(&self, options: &AssetOptions) -> String {
            self.calls.borrow_mut().push(("image", options.clone()));
            "https://resolved/image".to_string()
        }
    }

    fn transform(key: &str, value: &str) -> Transformation {
        let mut t = Transformation::new();
        t.insert(key.to_string(), Value::from(value));
        t
    }

    #[test]
    fn test_quality_transform_is_first() {
        let list = normalize_transformations(
            &Value::from("auto:best"),
            Some(OneOrMany::Many(vec![transform("crop", "fill"), transform("effect", "blur")])),
        );

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].get("quality"), Some(&Value::from("auto:best")));
        assert_eq!(list[1].get("crop"), Some(&Value::from("fill")));
        assert_eq!(list[2].get("effect"), Some(&Value::from("blur")));
    }

    #[test]
    fn test_quality_transform_without_caller_transforms() {
        let list = normalize_transformations(&Value::from("auto"), None);
        assert_eq!(list, vec![transform("quality", "auto")]);
    }

    #[test]
    fn test_autoplay() {
        assert_eq!(normalize_autoplay(&AutoplayInput::Flag(true)), Autoplay::On);
        assert_eq!(normalize_autoplay(&AutoplayInput::Text("false".into())), Autoplay::Off);
        assert_eq!(normalize_autoplay(&AutoplayInput::Text("true".into())), Autoplay::On);
        assert_eq!(
            normalize_autoplay(&AutoplayInput::Text("on-scroll".into())),
            Autoplay::Mode("on-scroll".into())
        );
        assert_eq!(normalize_autoplay(&AutoplayInput::Text(String::new())), Autoplay::Off);
    }

    #[test]
    fn test_logo() {
        assert_eq!(normalize_logo(&LogoInput::Flag(true)), LogoSpec::DefaultVisible);
        assert_eq!(normalize_logo(&LogoInput::Flag(false)), LogoSpec::Hidden);

        let custom = normalize_logo(&LogoInput::Custom(LogoOptions {
            image_url: Some("x".into()),
            on_click_url: Some("y".into()),
        }));
        assert!(custom.is_visible());
        assert_eq!(custom.image_url(), Some("x"));
        assert_eq!(custom.click_url(), Some("y"));
    }

    #[test]
    fn test_poster_identifier_skips_resolver() {
        let resolver = RecordingResolver::default();
        let spec = normalize_poster(&PosterInput::Source("some-id".into()));
        let options = resolve_poster(&spec, "vid1", &resolver);

        assert_eq!(options.public_id, "some-id");
        assert!(resolver.calls.borrow().is_empty());
    }

    #[test]
    fn test_poster_derived_from_video() {
        let resolver = RecordingResolver::default();
        let spec = normalize_poster(&PosterInput::Options(AssetOptions::new().with("crop", "fill")));
        assert!(matches!(spec, PosterSpec::DerivedFromVideo(_)));

        let options = resolve_poster(&spec, "vid1", &resolver);
        assert_eq!(options.public_id, "https://resolved/video");

        let calls = resolver.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (kind, opts) = &calls[0];
        assert_eq!(*kind, "video");
        assert_eq!(opts.src.as_deref(), Some("vid1"));
        assert_eq!(opts.get("crop"), Some(&Value::from("fill")));
        assert_eq!(opts.format.as_deref(), Some(POSTER_FRAME_FORMAT));
    }

    #[test]
    fn test_poster_external_image() {
        let resolver = RecordingResolver::default();
        let spec = normalize_poster(&PosterInput::Options(AssetOptions::new().with_src("posters/cover")));
        assert!(matches!(spec, PosterSpec::ExternalImage(_)));

        let options = resolve_poster(&spec, "vid1", &resolver);
        assert_eq!(options.public_id, "https://resolved/image");

        let calls = resolver.calls.borrow();
        assert_eq!(calls[0].0, "image");
        assert_eq!(calls[0].1.src.as_deref(), Some("posters/cover"));
    }

    #[test]
    fn test_normalize_props() {
        let resolver = RecordingResolver::default();
        let props = PlayerProps::new("https://res.cloudinary.com/demo/video/upload/v1/samples/dog.mp4")
            .with_autoplay(AutoplayInput::Text("on-scroll".into()));
        let normalized = normalize(&props, &resolver);

        assert_eq!(normalized.public_id, "samples/dog");
        assert_eq!(normalized.player_id, "player-samples-dog");
        assert_eq!(normalized.autoplay, Autoplay::Mode("on-scroll".into()));
        assert_eq!(normalized.logo, LogoSpec::DefaultVisible);
        assert_eq!(normalized.poster_options, None);
    }
}
