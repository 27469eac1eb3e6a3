//! Value types and wire models for the Pixpie API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anchor used by the CDN when cropping to the requested dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CropAlign {
    #[default]
    Default,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CropAlign {
    pub const ALL: [CropAlign; 9] = [
        CropAlign::Default,
        CropAlign::Top,
        CropAlign::Bottom,
        CropAlign::Left,
        CropAlign::Right,
        CropAlign::TopLeft,
        CropAlign::TopRight,
        CropAlign::BottomLeft,
        CropAlign::BottomRight,
    ];

    /// Wire value used in the `c_` URL parameter (empty for `Default`)
    pub fn as_str(self) -> &'static str {
        match self {
            CropAlign::Default => "",
            CropAlign::Top => "top",
            CropAlign::Bottom => "bottom",
            CropAlign::Left => "left",
            CropAlign::Right => "right",
            CropAlign::TopLeft => "top_left",
            CropAlign::TopRight => "top_right",
            CropAlign::BottomLeft => "bottom_left",
            CropAlign::BottomRight => "bottom_right",
        }
    }

    pub fn is_default(self) -> bool {
        self == CropAlign::Default
    }
}

impl fmt::Display for CropAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("default")
        } else {
            f.write_str(self.as_str())
        }
    }
}

/// Returned when a string names no crop anchor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown crop align '{0}'")]
pub struct ParseCropAlignError(pub String);

impl FromStr for CropAlign {
    type Err = ParseCropAlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if normalized.is_empty() || normalized == "default" {
            return Ok(CropAlign::Default);
        }
        CropAlign::ALL
            .into_iter()
            .find(|crop| crop.as_str() == normalized)
            .ok_or_else(|| ParseCropAlignError(s.to_string()))
    }
}

/// Base path segment of a CDN image URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Path relative to the tenant's storage
    Local,
    /// Fully qualified external URL fetched by the CDN
    Remote,
}

impl ImageSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSource::Local => "local",
            ImageSource::Remote => "remote",
        }
    }
}

/// Transformation parameters encoded into a CDN URL.
///
/// `None` and `0` both mean "not requested" for the numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u32>,
    pub webp: bool,
    pub crop: CropAlign,
}

impl ImageTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform with both dimensions set
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new().width(width).height(height)
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn webp(mut self, webp: bool) -> Self {
        self.webp = webp;
        self
    }

    pub fn crop(mut self, crop: CropAlign) -> Self {
        self.crop = crop;
        self
    }

    /// True when width or height carries a non-zero value
    pub fn has_dimensions(&self) -> bool {
        present(self.width).is_some() || present(self.height).is_some()
    }
}

pub(crate) fn present(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v != 0)
}

/// Body of a successful `/authentication/token/server_sdk` call
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub auth_token: String,
    pub cdn_url: String,
}

/// Body of `DELETE /storage/delete/batch/{reverseUrlId}`
#[derive(Debug, Clone, Serialize)]
pub struct BatchDeleteRequest {
    pub images: Vec<String>,
    pub folders: Vec<String>,
}

/// Body of `GET /storage/list/{reverseUrlId}/{path}`
#[derive(Debug, Clone, Deserialize)]
pub struct StorageListing {
    pub folders: Vec<String>,
    #[serde(default)]
    pub images: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_align_wire_values() {
        assert_eq!(CropAlign::Default.as_str(), "");
        assert_eq!(CropAlign::TopLeft.as_str(), "top_left");
        assert_eq!(CropAlign::BottomRight.as_str(), "bottom_right");
    }

    #[test]
    fn test_crop_align_parse() {
        for crop in CropAlign::ALL {
            assert_eq!(crop.to_string().parse::<CropAlign>(), Ok(crop));
        }
        assert_eq!("".parse::<CropAlign>(), Ok(CropAlign::Default));
        assert_eq!("Top-Right".parse::<CropAlign>(), Ok(CropAlign::TopRight));
        assert!("middle".parse::<CropAlign>().is_err());
    }

    #[test]
    fn test_transform_dimensions() {
        assert!(!ImageTransform::new().has_dimensions());
        assert!(!ImageTransform::new().width(0).height(0).has_dimensions());
        assert!(ImageTransform::new().height(10).has_dimensions());
        assert!(!ImageTransform::new().quality(80).has_dimensions());
    }

    #[test]
    fn test_storage_listing_ignores_extra_fields() {
        let listing: StorageListing =
            serde_json::from_str(r#"{"folders":["a","b"],"total":2}"#).unwrap();
        assert_eq!(listing.folders, vec!["a", "b"]);
        assert!(listing.images.is_empty());
    }
}
