//! Pixpie server API client

use reqwest::StatusCode;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::auth::{Authenticator, Session};
use super::error::{PixpieError, PixpieResult};
use super::models::{BatchDeleteRequest, ImageSource, ImageTransform, StorageListing};
use super::url::{build_image_url, join_url};
use crate::config::{
    AUTH_TOKEN_HEADER, ClientConfig, PATH_BATCH_DELETE, PATH_IMAGE_UPLOAD,
    PATH_IMAGE_UPLOAD_ASYNC, PATH_LIST_ITEMS, USER_AGENT,
};
use crate::{log_debug, log_warn};

/// Client for one Pixpie tenant.
///
/// Construction authenticates immediately. Calls that need the auth token
/// re-authenticate once and retry once when the server answers 403.
pub struct ServerApiClient {
    http: Client,
    base_address: String,
    auth: Authenticator,
    session: Mutex<Session>,
}

impl ServerApiClient {
    /// Connect to the default endpoint with the default salt
    pub fn new(reverse_url_id: &str, secret_key: &str) -> PixpieResult<Self> {
        Self::with_config(ClientConfig::new(reverse_url_id, secret_key))
    }

    pub fn with_config(config: ClientConfig) -> PixpieResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        let base_address = config.base_address();
        let auth = Authenticator::new(
            &config.reverse_url_id,
            &config.secret_key,
            &config.salt,
            &base_address,
        );
        let session = auth.authenticate(&http)?;

        Ok(Self {
            http,
            base_address,
            auth,
            session: Mutex::new(session),
        })
    }

    /// Run the handshake again and replace the token and CDN URL together
    pub fn authenticate(&self) -> PixpieResult<()> {
        let session = self.auth.authenticate(&self.http)?;
        *self.lock_session() = session;
        Ok(())
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        // Session is replaced whole, so a poisoned value is still consistent
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Consistent snapshot of the current token and CDN URL
    pub fn session(&self) -> Session {
        self.lock_session().clone()
    }

    pub fn auth_token(&self) -> String {
        self.lock_session().auth_token.clone()
    }

    pub fn cdn_url(&self) -> String {
        self.lock_session().cdn_url.clone()
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn reverse_url_id(&self) -> &str {
        self.auth.reverse_url_id()
    }

    fn api_url(&self, path: &str, inner_path: Option<&str>) -> String {
        match inner_path {
            Some(inner) => join_url(&[
                self.base_address.as_str(),
                path,
                self.reverse_url_id(),
                inner,
            ]),
            None => join_url(&[self.base_address.as_str(), path, self.reverse_url_id()]),
        }
    }

    fn image_url(&self, source: ImageSource, image: &str, transform: &ImageTransform) -> String {
        let url = build_image_url(&self.cdn_url(), source, image, transform);
        log_debug!("Pixpie url: {}", url);
        url
    }

    /// CDN URL for an image stored in the tenant's storage
    pub fn get_image_url(&self, image_path: &str, transform: &ImageTransform) -> String {
        self.image_url(ImageSource::Local, image_path, transform)
    }

    /// CDN URL that fetches and transforms an external image
    pub fn get_remote_image_url(&self, url: &str, transform: &ImageTransform) -> String {
        self.image_url(ImageSource::Remote, url, transform)
    }

    /// Fetch a stored image through the CDN. No auth is involved.
    pub fn get_image(
        &self,
        image_path: &str,
        transform: &ImageTransform,
    ) -> PixpieResult<Response> {
        let url = self.get_image_url(image_path, transform);
        Ok(self.http.get(url).send()?)
    }

    /// Fetch an external image through the CDN. No auth is involved.
    pub fn get_remote_image(
        &self,
        url: &str,
        transform: &ImageTransform,
    ) -> PixpieResult<Response> {
        let url = self.get_remote_image_url(url, transform);
        Ok(self.http.get(url).send()?)
    }

    /// Send a request with the auth token, refreshing it once on 403.
    ///
    /// `build` is called once per attempt since request bodies are consumed.
    /// A 403 on the retry is returned to the caller unchanged.
    fn send_authorized<F>(&self, build: F) -> PixpieResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let response = build().header(AUTH_TOKEN_HEADER, self.auth_token()).send()?;
        if response.status() != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        log_warn!(
            "Auth token rejected for {}, re-authenticating",
            self.reverse_url_id()
        );
        self.authenticate()?;

        Ok(build().header(AUTH_TOKEN_HEADER, self.auth_token()).send()?)
    }

    /// Upload a local file to `inner_path` using the synchronous endpoint
    pub fn upload_image(
        &self,
        local_image_path: impl AsRef<Path>,
        inner_path: &str,
    ) -> PixpieResult<Response> {
        self.upload(local_image_path.as_ref(), inner_path, PATH_IMAGE_UPLOAD)
    }

    /// Upload a local file to `inner_path`; processing completes server-side later
    pub fn upload_image_async(
        &self,
        local_image_path: impl AsRef<Path>,
        inner_path: &str,
    ) -> PixpieResult<Response> {
        self.upload(local_image_path.as_ref(), inner_path, PATH_IMAGE_UPLOAD_ASYNC)
    }

    fn upload(
        &self,
        local_image_path: &Path,
        inner_path: &str,
        endpoint: &str,
    ) -> PixpieResult<Response> {
        // Read up front so an unreadable file fails before any request is sent
        let data = std::fs::read(local_image_path)?;
        let file_name = local_image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let url = self.api_url(endpoint, Some(inner_path));
        log_debug!("Uploading {} ({} bytes) to {}", file_name, data.len(), url);

        self.send_authorized(|| {
            let part = Part::bytes(data.clone()).file_name(file_name.clone());
            self.http.post(&url).multipart(Form::new().part("image", part))
        })
    }

    /// List a folder in tenant storage. The raw response is returned.
    pub fn list_items(&self, inner_path: &str) -> PixpieResult<Response> {
        let url = self.api_url(PATH_LIST_ITEMS, Some(inner_path));
        log_debug!("Listing {}", url);
        self.send_authorized(|| self.http.get(&url))
    }

    /// Whether `inner_folder` is listed directly under `parent_folder`.
    ///
    /// `None` when the listing answers 403, 404 or 500. Any other non-200
    /// status is a [`PixpieError::UnexpectedStatus`].
    pub fn dir_exists(
        &self,
        parent_folder: &str,
        inner_folder: &str,
    ) -> PixpieResult<Option<bool>> {
        let response = self.list_items(parent_folder)?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let listing: StorageListing = serde_json::from_str(&response.text()?)?;
                Ok(Some(listing.folders.iter().any(|folder| folder == inner_folder)))
            }
            StatusCode::FORBIDDEN | StatusCode::NOT_FOUND | StatusCode::INTERNAL_SERVER_ERROR => {
                Ok(None)
            }
            _ => Err(PixpieError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }),
        }
    }

    /// Delete images and folders in a single request
    pub fn batch_delete<I, F>(&self, images: I, folders: F) -> PixpieResult<Response>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let body = BatchDeleteRequest {
            images: images.into_iter().map(Into::into).collect(),
            folders: folders.into_iter().map(Into::into).collect(),
        };
        let url = self.api_url(PATH_BATCH_DELETE, None);
        log_debug!(
            "Deleting {} image(s) and {} folder(s)",
            body.images.len(),
            body.folders.len()
        );
        self.send_authorized(|| self.http.delete(&url).json(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_client_is_shareable() {
        assert_send_sync::<ServerApiClient>();
    }
}
