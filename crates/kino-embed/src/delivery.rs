//! Delivery URL building
//!
//! The player only needs fully qualified asset URLs for posters. The
//! [`UrlResolver`] trait is the seam; [`DeliveryUrlBuilder`] renders URLs
//! locally from the account context and the transformation options.

use crate::account::AccountContext;
use crate::types::AssetOptions;
use serde_json::Value;
use tracing::debug;

const DEFAULT_HOST: &str = "res.cloudinary.com";

/// Turns transformation options plus a source into an asset URL
pub trait UrlResolver {
    /// URL of a video asset (or a still frame of it when `format` is an image format)
    fn video_url(&self, options: &AssetOptions) -> String;

    /// URL of an image asset
    fn image_url(&self, options: &AssetOptions) -> String;
}

/// Option key to URL parameter mapping
const PARAMS: &[(&str, &str)] = &[
    ("angle", "a"),
    ("aspectRatio", "ar"),
    ("background", "b"),
    ("border", "bo"),
    ("color", "co"),
    ("crop", "c"),
    ("defaultImage", "d"),
    ("density", "dn"),
    ("dpr", "dpr"),
    ("effect", "e"),
    ("endOffset", "eo"),
    ("flags", "fl"),
    ("gravity", "g"),
    ("height", "h"),
    ("opacity", "o"),
    ("radius", "r"),
    ("startOffset", "so"),
    ("width", "w"),
    ("x", "x"),
    ("y", "y"),
    ("zoom", "z"),
];

/// Builds delivery URLs for one account
#[derive(Debug, Clone)]
pub struct DeliveryUrlBuilder {
    account: AccountContext,
}

impl DeliveryUrlBuilder {
    pub fn new(account: AccountContext) -> Self {
        Self { account }
    }

    fn base_url(&self) -> String {
        let cloud = self.account.cloud_name.as_deref().unwrap_or_default();
        match (&self.account.secure_distribution, self.account.private_cdn) {
            (Some(host), true) => format!("https://{}", host.trim_end_matches('/')),
            (None, true) => format!("https://{}-{}", cloud, DEFAULT_HOST),
            (Some(host), false) => format!("https://{}/{}", host.trim_end_matches('/'), cloud),
            (None, false) => format!("https://{}/{}", DEFAULT_HOST, cloud),
        }
    }

    fn build(&self, asset_type: &str, options: &AssetOptions) -> String {
        let src = options.src.as_deref().unwrap_or_default();
        let delivery_type = if src.starts_with("http") { "fetch" } else { "upload" };

        let mut segments = vec![self.base_url(), asset_type.to_string(), delivery_type.to_string()];
        segments.extend(transformation_segments(options));
        segments.push(src.to_string());

        segments.join("/")
    }
}

impl UrlResolver for DeliveryUrlBuilder {
    fn video_url(&self, options: &AssetOptions) -> String {
        self.build("video", options)
    }

    fn image_url(&self, options: &AssetOptions) -> String {
        self.build("image", options)
    }
}

/// Render transformation options as URL path segments
///
/// Sizing and effect parameters share the first segment, raw transformations
/// follow verbatim, and format plus quality close the chain.
pub fn transformation_segments(options: &AssetOptions) -> Vec<String> {
    let mut segments = Vec::new();

    let params: Vec<String> = PARAMS
        .iter()
        .filter_map(|(key, param)| {
            options
                .get(key)
                .and_then(param_value)
                .map(|value| format!("{}_{}", param, value))
        })
        .collect();
    if !params.is_empty() {
        segments.push(params.join(","));
    }

    match options.get("rawTransformations") {
        Some(Value::String(raw)) => segments.push(raw.clone()),
        Some(Value::Array(raws)) => {
            segments.extend(raws.iter().filter_map(|v| v.as_str().map(str::to_string)))
        }
        _ => {}
    }

    for key in options.transforms.keys() {
        let known = key == "rawTransformations"
            || key == "quality"
            || PARAMS.iter().any(|(name, _)| *name == key.as_str());
        if !known {
            debug!(option = %key, "Ignoring unsupported transformation option");
        }
    }

    let format = options.format.as_deref().unwrap_or("auto");
    let quality = options
        .get("quality")
        .and_then(param_value)
        .unwrap_or_else(|| "auto".to_string());
    segments.push(format!("f_{},q_{}", format, quality));

    segments
}

fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DeliveryUrlBuilder {
        DeliveryUrlBuilder::new(AccountContext {
            cloud_name: Some("demo".into()),
            ..Default::default()
        })
    }

    #[test]
    fn test_video_still_frame_url() {
        let options = AssetOptions::new()
            .with_src("samples/dog")
            .with_format("auto:image")
            .with("crop", "fill")
            .with("width", 600);

        assert_eq!(
            builder().video_url(&options),
            "https://res.cloudinary.com/demo/video/upload/c_fill,w_600/f_auto:image,q_auto/samples/dog"
        );
    }

    #[test]
    fn test_image_url_defaults() {
        let options = AssetOptions::new().with_src("posters/cover");
        assert_eq!(
            builder().image_url(&options),
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto/posters/cover"
        );
    }

    #[test]
    fn test_remote_source_uses_fetch() {
        let options = AssetOptions::new().with_src("https://example.com/cover.jpg");
        let url = builder().image_url(&options);
        assert!(url.contains("/image/fetch/"));
        assert!(url.ends_with("/https://example.com/cover.jpg"));
    }

    #[test]
    fn test_raw_transformations_kept_in_order() {
        let options = AssetOptions::new()
            .with_src("a")
            .with("rawTransformations", serde_json::json!(["e_blur:300", "l_logo"]));
        let segments = transformation_segments(&options);
        assert_eq!(segments, vec!["e_blur:300", "l_logo", "f_auto,q_auto"]);
    }

    #[test]
    fn test_private_cdn_hosts() {
        let private = DeliveryUrlBuilder::new(AccountContext {
            cloud_name: Some("demo".into()),
            secure_distribution: None,
            private_cdn: true,
        });
        assert!(private.image_url(&AssetOptions::new().with_src("x")).starts_with("https://demo-res.cloudinary.com/image/"));

        let custom = DeliveryUrlBuilder::new(AccountContext {
            cloud_name: Some("demo".into()),
            secure_distribution: Some("media.example.com".into()),
            private_cdn: true,
        });
        assert!(custom.image_url(&AssetOptions::new().with_src("x")).starts_with("https://media.example.com/image/"));
    }
}
