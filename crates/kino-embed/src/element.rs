//! Host element attributes
//!
//! The media element and its wrapper are rendered by the host UI framework;
//! this only computes what they should carry.

use crate::types::Dimension;

/// Base classes the widget stylesheet targets
pub const PLAYER_CLASS: &str = "cld-video-player cld-fluid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementAttributes {
    pub id: String,
    pub class_name: String,
    pub width: Option<String>,
    pub height: Option<String>,
    /// Inline style for the wrapping container
    pub container_style: String,
}

impl ElementAttributes {
    pub fn new(
        id: &str,
        class_name: Option<&str>,
        width: Option<&Dimension>,
        height: Option<&Dimension>,
    ) -> Self {
        let class_name = match class_name {
            Some(extra) if !extra.is_empty() => format!("{} {}", PLAYER_CLASS, extra),
            _ => PLAYER_CLASS.to_string(),
        };

        let container_style = match (width, height) {
            (Some(w), Some(h)) => format!("width: 100%; aspect-ratio: {} / {};", w, h),
            _ => "width: 100%;".to_string(),
        };

        Self {
            id: id.to_string(),
            class_name,
            width: width.map(ToString::to_string),
            height: height.map(ToString::to_string),
            container_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_appends_caller_class() {
        let attrs = ElementAttributes::new("p", Some("rounded"), None, None);
        assert_eq!(attrs.class_name, "cld-video-player cld-fluid rounded");
        assert_eq!(attrs.container_style, "width: 100%;");
    }

    #[test]
    fn test_container_aspect_ratio() {
        let attrs = ElementAttributes::new(
            "p",
            None,
            Some(&Dimension::Pixels(1920)),
            Some(&Dimension::Pixels(1080)),
        );
        assert_eq!(attrs.class_name, PLAYER_CLASS);
        assert_eq!(attrs.container_style, "width: 100%; aspect-ratio: 1920 / 1080;");
        assert_eq!(attrs.width.as_deref(), Some("1920"));
    }
}
