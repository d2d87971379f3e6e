//! Identifier resolution
//!
//! Callers may pass either a bare public id (`"samples/dog"`) or a full
//! delivery URL for the same asset
//! (`"https://res.cloudinary.com/demo/video/upload/q_auto/v1690/samples/dog.mp4"`).
//! Both resolve to the same canonical public id. URLs that cannot be parsed
//! fall back to the raw input without surfacing an error.

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

const ASSET_TYPES: &[&str] = &["image", "images", "video", "videos", "raw", "files"];

const DELIVERY_TYPES: &[&str] = &[
    "upload",
    "fetch",
    "private",
    "authenticated",
    "sprite",
    "facebook",
    "twitter",
    "youtube",
    "vimeo",
];

/// Parameter keys that may open a `<key>_<value>` transformation component
const TRANSFORMATION_PARAMS: &[&str] = &[
    "a", "ac", "af", "ar", "b", "bo", "br", "c", "co", "cs", "d", "dl", "dn", "dpr", "du", "e",
    "eo", "f", "fl", "fn", "fps", "g", "h", "if", "ki", "l", "o", "p", "pg", "q", "r", "so", "sp",
    "t", "u", "vc", "vs", "w", "x", "y", "z",
];

/// Components of a parsed delivery URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryUrl {
    pub host: String,
    /// Absent on custom secure-distribution hosts
    pub cloud_name: Option<String>,
    pub asset_type: String,
    pub delivery_type: Option<String>,
    pub signature: Option<String>,
    pub transformations: Vec<String>,
    pub version: Option<u64>,
    pub public_id: String,
    pub format: Option<String>,
}

impl DeliveryUrl {
    /// Parse a delivery URL, returning `None` if it does not follow the
    /// service's `/<cloud>/<asset type>/<delivery type>/...` layout
    pub fn parse(input: &str) -> Option<Self> {
        let url = Url::parse(input).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let host = url.host_str()?.to_string();
        // Public ids may carry spaces or non-ASCII characters
        let decoded = url
            .path_segments()?
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8().ok().map(|d| d.into_owned()))
            .collect::<Option<Vec<String>>>()?;
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        let asset_idx = segments.iter().position(|s| ASSET_TYPES.contains(s))?;
        let cloud_name = match asset_idx {
            0 => None,
            1 => Some(segments[0].to_string()),
            _ => return None,
        };
        let asset_type = segments[asset_idx].to_string();

        let mut rest = &segments[asset_idx + 1..];

        let delivery_type = match rest.first() {
            Some(s) if DELIVERY_TYPES.contains(s) => {
                rest = &rest[1..];
                Some(s.to_string())
            }
            _ => None,
        };

        let signature = match rest.first() {
            Some(s) if is_signature(s) => {
                rest = &rest[1..];
                Some(s.to_string())
            }
            _ => None,
        };

        let mut transformations = Vec::new();
        let mut version = None;

        if let Some(pos) = rest.iter().position(|s| parse_version(s).is_some()) {
            transformations = rest[..pos].iter().map(|s| s.to_string()).collect();
            version = parse_version(rest[pos]);
            rest = &rest[pos + 1..];
        } else {
            while rest.len() > 1 && is_transformation(rest[0]) {
                transformations.push(rest[0].to_string());
                rest = &rest[1..];
            }
        }

        if rest.is_empty() {
            return None;
        }

        let joined = rest.join("/");
        let (public_id, format) = if delivery_type.as_deref() == Some("fetch") {
            (joined, None)
        } else {
            split_extension(&joined)
        };

        if public_id.is_empty() {
            return None;
        }

        Some(Self {
            host,
            cloud_name,
            asset_type,
            delivery_type,
            signature,
            transformations,
            version,
            public_id,
            format,
        })
    }
}

/// Resolve the canonical public id for a `src` prop
pub fn resolve_public_id(src: &str) -> String {
    if !src.starts_with("http") {
        return src.to_string();
    }

    match DeliveryUrl::parse(src) {
        Some(parsed) => parsed.public_id,
        None => {
            debug!(src, "Source is not a delivery URL, using it as the public id");
            src.to_string()
        }
    }
}

/// Element id used when the caller does not provide one
///
/// Only the first `/` of the public id is replaced.
pub fn default_player_id(public_id: &str) -> String {
    format!("player-{}", public_id.replacen('/', "-", 1))
}

fn parse_version(segment: &str) -> Option<u64> {
    let digits = segment.strip_prefix('v')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn is_signature(segment: &str) -> bool {
    segment
        .strip_prefix("s--")
        .and_then(|s| s.strip_suffix("--"))
        .map(|inner| {
            (inner.len() == 8 || inner.len() == 32)
                && inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
        .unwrap_or(false)
}

/// `c_fill,w_600` style segment: every comma-separated part is `<param>_<value>`
/// with a known parameter key
fn is_transformation(segment: &str) -> bool {
    segment.split(',').all(|part| match part.split_once('_') {
        Some((key, value)) => TRANSFORMATION_PARAMS.contains(&key) && !value.is_empty(),
        None => false,
    })
}

fn split_extension(path: &str) -> (String, Option<String>) {
    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &path[file_start + dot + 1..];
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                let idx = file_start + dot;
                (path[..idx].to_string(), Some(ext.to_string()))
            } else {
                (path.to_string(), None)
            }
        }
        _ => (path.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_passes_through() {
        assert_eq!(resolve_public_id("samples/sea-turtle"), "samples/sea-turtle");
    }

    #[test]
    fn test_url_with_version() {
        let url = "https://res.cloudinary.com/demo/video/upload/v1690000000/samples/sea-turtle.mp4";
        assert_eq!(resolve_public_id(url), "samples/sea-turtle");
    }

    #[test]
    fn test_url_with_transformations_and_version() {
        let url = "https://res.cloudinary.com/demo/video/upload/c_fill,w_600/q_auto/v1/videos/dog.webm";
        let parsed = DeliveryUrl::parse(url).unwrap();
        assert_eq!(parsed.cloud_name.as_deref(), Some("demo"));
        assert_eq!(parsed.asset_type, "video");
        assert_eq!(parsed.delivery_type.as_deref(), Some("upload"));
        assert_eq!(parsed.transformations, vec!["c_fill,w_600", "q_auto"]);
        assert_eq!(parsed.version, Some(1));
        assert_eq!(parsed.public_id, "videos/dog");
        assert_eq!(parsed.format.as_deref(), Some("webm"));
    }

    #[test]
    fn test_url_without_version() {
        let url = "https://res.cloudinary.com/demo/video/upload/q_auto/dog.mp4";
        assert_eq!(resolve_public_id(url), "dog");
    }

    #[test]
    fn test_url_with_signature() {
        let url = "https://res.cloudinary.com/demo/video/authenticated/s--Ro7_Wq2Z--/v3/clip.mov";
        let parsed = DeliveryUrl::parse(url).unwrap();
        assert_eq!(parsed.signature.as_deref(), Some("s--Ro7_Wq2Z--"));
        assert_eq!(parsed.public_id, "clip");
    }

    #[test]
    fn test_custom_distribution_host() {
        let url = "https://media.example.com/video/upload/v12/promo/launch.mp4";
        let parsed = DeliveryUrl::parse(url).unwrap();
        assert_eq!(parsed.cloud_name, None);
        assert_eq!(parsed.public_id, "promo/launch");
    }

    #[test]
    fn test_unparseable_url_falls_back_to_input() {
        let url = "https://example.com/some/page";
        assert_eq!(resolve_public_id(url), url);
        assert_eq!(resolve_public_id("http://"), "http://");
    }

    #[test]
    fn test_url_and_id_resolve_identically() {
        let id = "folder/sub/clip";
        let url = format!("https://res.cloudinary.com/demo/video/upload/v99/{}.mp4", id);
        assert_eq!(resolve_public_id(&url), resolve_public_id(id));
    }

    #[test]
    fn test_percent_encoded_url_matches_id() {
        let url = "https://res.cloudinary.com/demo/video/upload/v1/samples/my%20clip.mp4";
        assert_eq!(resolve_public_id(url), resolve_public_id("samples/my clip"));

        let url = "https://res.cloudinary.com/demo/video/upload/v1/caf%C3%A9/d%C3%A9mo.mp4";
        assert_eq!(resolve_public_id(url), "café/démo");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_input() {
        let url = "https://res.cloudinary.com/demo/video/upload/v1/bad%FF.mp4";
        assert_eq!(resolve_public_id(url), url);
    }

    #[test]
    fn test_underscored_folder_is_not_a_transformation() {
        let url = "https://res.cloudinary.com/demo/video/upload/my_folder/dog.mp4";
        assert_eq!(resolve_public_id(url), "my_folder/dog");
        assert_eq!(resolve_public_id(url), resolve_public_id("my_folder/dog"));

        let url = "https://res.cloudinary.com/demo/video/upload/c_fill,w_600/my_folder/dog.mp4";
        let parsed = DeliveryUrl::parse(url).unwrap();
        assert_eq!(parsed.transformations, vec!["c_fill,w_600"]);
        assert_eq!(parsed.public_id, "my_folder/dog");
    }

    #[test]
    fn test_default_player_id_replaces_first_slash() {
        assert_eq!(default_player_id("a/b/c"), "player-a-b/c");
        assert_eq!(default_player_id("dog"), "player-dog");
    }
}
