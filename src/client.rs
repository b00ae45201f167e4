//! Code Dx API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Endpoint groups are implemented as capability values in [`crate::api`]
//! that hold a clone of this client.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::{CodeDxError, Result};
use crate::response::{ContentType, Envelope};

const USER_AGENT: &str = concat!("codedx/", env!("CARGO_PKG_VERSION"));

/// Low-level Code Dx API client.
///
/// Holds the immutable configuration (base URL and API key) and issues raw
/// HTTP exchanges, returning each one as an [`Envelope`] for validation.
/// Authentication is a static `API-Key` header applied to every request.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use codedx::CodeDxClient;
///
/// # fn example() -> codedx::Result<()> {
/// // Create from environment variables
/// let client = CodeDxClient::from_env()?;
///
/// // Or configure manually
/// let client = CodeDxClient::new("your-api-key", "https://codedx.example.com/codedx")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CodeDxClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: String,
}

impl std::fmt::Debug for CodeDxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeDxClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CodeDxClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CODEDX_API_KEY` for authentication and `CODEDX_BASE_URL` for
    /// the server, e.g. `https://codedx.example.com/codedx`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("CODEDX_API_KEY").map_err(|_| {
            CodeDxError::ConfigMissing("CODEDX_API_KEY environment variable not set".to_string())
        })?;
        let base_url = env::var("CODEDX_BASE_URL").map_err(|_| {
            CodeDxError::ConfigMissing("CODEDX_BASE_URL environment variable not set".to_string())
        })?;

        Self::new(&api_key, &base_url)
    }

    /// Create a new client with the provided API key and base URL.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key generated in the Code Dx admin UI
    /// * `base_url` - Base URL of the Code Dx instance, including the
    ///   context path (e.g., `https://codedx.example.com/codedx`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so join() keeps the context path
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CodeDxError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: api_key.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Envelope> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .header("API-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, ContentType::Json.as_str())
            .send()
            .await
            .map_err(CodeDxError::Http)?;

        Envelope::read(response).await
    }

    /// Make a GET request negotiating a non-JSON body (report downloads,
    /// file contents).
    #[tracing::instrument(skip(self))]
    pub async fn download(&self, path: &str, accept: ContentType) -> Result<Envelope> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .header("API-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, accept.as_str())
            .send()
            .await
            .map_err(CodeDxError::Http)?;

        Envelope::read(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Envelope> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .header("API-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(CodeDxError::Http)?;

        Envelope::read(response).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Envelope> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .header("API-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(CodeDxError::Http)?;

        Envelope::read(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Envelope> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .header("API-Key", &self.api_key)
            .send()
            .await
            .map_err(CodeDxError::Http)?;

        Envelope::read(response).await
    }

    /// POST a file as `multipart/form-data` under the `file` part name.
    ///
    /// The optional `client_request_id` is sent as `X-Client-Request-Id`,
    /// which the server uses to identify uploads that have not yet been
    /// assigned an input id.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload(
        &self,
        path: &str,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        client_request_id: Option<&str>,
    ) -> Result<Envelope> {
        let url = self.base_url.join(path)?;

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(CodeDxError::Http)?;
        let form = multipart::Form::new().part("file", part);

        let mut request = self
            .http
            .post(url)
            .header("API-Key", &self.api_key)
            .multipart(form);
        if let Some(request_id) = client_request_id {
            request = request.header("X-Client-Request-Id", request_id);
        }

        let response = request.send().await.map_err(CodeDxError::Http)?;

        Envelope::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client =
            CodeDxClient::new("test-key", "https://codedx.example.com/codedx").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("CodeDxClient"));
        assert!(debug.contains("base_url"));
        // API key should not be in debug output
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = CodeDxClient::new("key", "https://codedx.example.com/codedx").unwrap();
        let client2 = CodeDxClient::new("key", "https://codedx.example.com/codedx/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            CodeDxClient::new("key", "not a url"),
            Err(CodeDxError::Url(_))
        ));
    }
}
