//! # Pixpie Server SDK
//!
//! A blocking client for the Pixpie image hosting and CDN service:
//! - SDK authentication with transparent token refresh on 403
//! - CDN URL building for stored and remote images (resize, quality, WebP, crop)
//! - Image upload, storage listing and batch deletion
//!
//! ## Quick Start
//!
//! ```no_run
//! use pixpie_sdk::{CropAlign, ImageTransform, ServerApiClient};
//!
//! fn main() -> Result<(), pixpie_sdk::PixpieError> {
//!     let client = ServerApiClient::new("my-reverse-url-id", "my-secret-key")?;
//!
//!     let transform = ImageTransform::sized(200, 100).quality(80).crop(CropAlign::Top);
//!     println!("{}", client.get_image_url("photos/pic.jpg", &transform));
//!
//!     let response = client.upload_image("./pic.jpg", "photos")?;
//!     println!("upload: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! Connection settings can also come from the environment or a TOML file,
//! see [`ClientConfig`].

pub mod client;
pub mod config;
pub mod core;

pub use client::{
    CropAlign, ImageSource, ImageTransform, PixpieError, PixpieResult, ServerApiClient, Session,
};
pub use config::ClientConfig;
