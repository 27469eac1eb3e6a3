//! Rust client for the Pixpie server API

pub mod api;
pub mod auth;
pub mod error;
pub mod models;
pub mod url;

pub use api::ServerApiClient;
pub use auth::{Session, compute_auth_hash};
pub use error::{PixpieError, PixpieResult};
pub use models::*;
