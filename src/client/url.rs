//! CDN URL construction
//!
//! Pure helpers, no I/O. The parameter segment is a comma-joined list of
//! `w_`, `h_`, `q_` and `c_` tokens in that fixed order.

use super::models::{ImageSource, ImageTransform, present};

/// Parameter segment used when nothing was requested
pub const EMPTY_PARAMS: &str = "w_0,h_0";

/// Join URL pieces with `/`
pub fn join_url<S: AsRef<str>>(parts: &[S]) -> String {
    let mut url = String::new();
    for (i, part) in parts.iter().enumerate() {
        let part = part.as_ref();
        if i == 0 {
            url.push_str(part.trim_end_matches('/'));
        } else {
            url.push('/');
            url.push_str(part);
        }
    }
    url
}

/// Encode a transform into its parameter segment
pub fn params_segment(transform: &ImageTransform) -> String {
    let mut params: Vec<String> = Vec::with_capacity(4);

    if let Some(width) = present(transform.width) {
        params.push(format!("w_{}", width));
    }
    if let Some(height) = present(transform.height) {
        params.push(format!("h_{}", height));
    }
    if let Some(quality) = present(transform.quality) {
        params.push(format!("q_{}", quality));
    }

    // Crop needs a dimension to anchor against
    if transform.has_dimensions() && !transform.crop.is_default() {
        params.push(format!("c_{}", transform.crop.as_str()));
    }

    if params.is_empty() {
        EMPTY_PARAMS.to_string()
    } else {
        params.join(",")
    }
}

pub fn format_segment(transform: &ImageTransform) -> &'static str {
    if transform.webp { "webp" } else { "def" }
}

/// Build `{cdn_url}/{source}/{format}/{params}/{image}`
pub fn build_image_url(
    cdn_url: &str,
    source: ImageSource,
    image: &str,
    transform: &ImageTransform,
) -> String {
    let params = params_segment(transform);
    join_url(&[
        cdn_url,
        source.as_str(),
        format_segment(transform),
        params.as_str(),
        image,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::CropAlign;

    const CDN: &str = "https://cdn.pixpie.co/tenant";

    #[test]
    fn test_full_transform() {
        let transform = ImageTransform::sized(200, 100)
            .quality(80)
            .crop(CropAlign::Top);
        assert_eq!(
            build_image_url(CDN, ImageSource::Local, "pic.jpg", &transform),
            "https://cdn.pixpie.co/tenant/local/def/w_200,h_100,q_80,c_top/pic.jpg"
        );
    }

    #[test]
    fn test_empty_transform_defaults() {
        assert_eq!(
            build_image_url(CDN, ImageSource::Local, "pic.jpg", &ImageTransform::new()),
            "https://cdn.pixpie.co/tenant/local/def/w_0,h_0/pic.jpg"
        );
    }

    #[test]
    fn test_zero_values_are_omitted() {
        let transform = ImageTransform::new().width(0).height(50).quality(0);
        assert_eq!(params_segment(&transform), "h_50");

        let transform = ImageTransform::new().width(0).height(0).quality(0);
        assert_eq!(params_segment(&transform), EMPTY_PARAMS);
    }

    #[test]
    fn test_fixed_parameter_order() {
        let transform = ImageTransform::new().quality(90).width(10);
        assert_eq!(params_segment(&transform), "w_10,q_90");
        let transform = ImageTransform::new().quality(90).height(20);
        assert_eq!(params_segment(&transform), "h_20,q_90");
    }

    #[test]
    fn test_crop_requires_dimension() {
        let transform = ImageTransform::new().crop(CropAlign::BottomLeft);
        assert_eq!(params_segment(&transform), EMPTY_PARAMS);

        let transform = ImageTransform::new().quality(70).crop(CropAlign::Left);
        assert_eq!(params_segment(&transform), "q_70");

        let transform = ImageTransform::new().width(30).crop(CropAlign::BottomLeft);
        assert_eq!(params_segment(&transform), "w_30,c_bottom_left");

        let transform = ImageTransform::new().width(30);
        assert_eq!(params_segment(&transform), "w_30");
    }

    #[test]
    fn test_format_segment() {
        let transform = ImageTransform::sized(1, 1).webp(true);
        assert!(build_image_url(CDN, ImageSource::Local, "a.png", &transform)
            .contains("/local/webp/"));
        let transform = ImageTransform::sized(1, 1);
        assert!(build_image_url(CDN, ImageSource::Local, "a.png", &transform)
            .contains("/local/def/"));
    }

    #[test]
    fn test_remote_source_keeps_url_verbatim() {
        let transform = ImageTransform::new().width(64);
        assert_eq!(
            build_image_url(
                CDN,
                ImageSource::Remote,
                "https://example.com/photo.jpg",
                &transform
            ),
            "https://cdn.pixpie.co/tenant/remote/def/w_64/https://example.com/photo.jpg"
        );
    }

    #[test]
    fn test_join_url_trims_base_slash() {
        assert_eq!(join_url(&["https://host/", "a", "b"]), "https://host/a/b");
        assert_eq!(join_url(&["https://host:9443", "x"]), "https://host:9443/x");
    }
}
