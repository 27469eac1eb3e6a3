//! Authentication handling for the Pixpie server API
//!
//! The server SDK proves possession of the tenant secret by sending
//! `sha256(secret ‖ salt ‖ timestamp)` together with the timestamp. A
//! successful handshake yields an auth token and the tenant's CDN base URL.

use chrono::Utc;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use super::error::{PixpieError, PixpieResult};
use super::models::AuthResponse;
use super::url::join_url;
use crate::config::{PATH_AUTH_SDK, SDK_VERSION, SERVER_SDK_TYPE};
use crate::{log_debug, log_error, log_info};

/// Token and CDN URL obtained from one handshake
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub auth_token: String,
    pub cdn_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("auth_token", &"<redacted>")
            .field("cdn_url", &self.cdn_url)
            .finish()
    }
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            auth_token: response.auth_token,
            cdn_url: response.cdn_url,
        }
    }
}

/// Hex SHA-256 of `secret_key`, `salt` and the decimal `timestamp`, in that order
pub fn compute_auth_hash(secret_key: &str, salt: &str, timestamp: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret_key.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(timestamp.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Tenant credentials and the endpoint they are presented to
pub struct Authenticator {
    reverse_url_id: String,
    secret_key: String,
    salt: String,
    endpoint: String,
}

impl Authenticator {
    pub fn new(reverse_url_id: &str, secret_key: &str, salt: &str, base_address: &str) -> Self {
        Self {
            reverse_url_id: reverse_url_id.to_string(),
            secret_key: secret_key.to_string(),
            salt: salt.to_string(),
            endpoint: join_url(&[base_address, PATH_AUTH_SDK]),
        }
    }

    pub fn reverse_url_id(&self) -> &str {
        &self.reverse_url_id
    }

    /// Run the handshake at the current time
    pub fn authenticate(&self, http: &Client) -> PixpieResult<Session> {
        self.authenticate_at(http, Utc::now().timestamp())
    }

    fn authenticate_at(&self, http: &Client, timestamp: i64) -> PixpieResult<Session> {
        let hash = compute_auth_hash(&self.secret_key, &self.salt, timestamp);
        let timestamp = timestamp.to_string();
        let params = [
            ("reverseUrlId", self.reverse_url_id.as_str()),
            ("hash", hash.as_str()),
            ("timestamp", timestamp.as_str()),
            ("serverSdkType", SERVER_SDK_TYPE),
            ("sdkVersion", SDK_VERSION),
        ];

        log_debug!("Authenticating tenant {} at {}", self.reverse_url_id, self.endpoint);

        let response = http.post(&self.endpoint).query(&params).send()?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            log_error!(
                "SDK authentication for {} failed with status {}",
                self.reverse_url_id,
                status
            );
            return Err(PixpieError::authentication(status.as_u16(), body));
        }

        let body = response.text()?;
        let auth: AuthResponse = serde_json::from_str(&body)?;
        log_info!("Authenticated tenant {}", self.reverse_url_id);
        Ok(auth.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SALT;

    #[test]
    fn test_auth_hash_known_vector() {
        assert_eq!(
            compute_auth_hash("secret", DEFAULT_SALT, 1_700_000_000),
            "ce4ec259de47b066a70287ac73e50dee1891685aa00d17095d394b16280fc2ea"
        );
    }

    #[test]
    fn test_auth_hash_is_plain_concatenation() {
        // Field boundaries are not encoded
        assert_eq!(
            compute_auth_hash("a", "b", 0),
            compute_auth_hash("ab", "", 0)
        );
        assert_ne!(
            compute_auth_hash("secret", "salt", 1),
            compute_auth_hash("secret", "salt", 2)
        );
    }

    #[test]
    fn test_endpoint_path() {
        let auth = Authenticator::new("tenant", "key", DEFAULT_SALT, "https://api.pixpie.co:9443");
        assert_eq!(
            auth.endpoint,
            "https://api.pixpie.co:9443/authentication/token/server_sdk"
        );
        assert_eq!(auth.reverse_url_id(), "tenant");
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = Session {
            auth_token: "very-secret".to_string(),
            cdn_url: "https://cdn".to_string(),
        };
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("https://cdn"));
    }
}
