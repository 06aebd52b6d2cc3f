use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::retry::RetryPolicy;
use crate::store::TokenStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    fields: Vec<String>,
}

/// HTTP client for the EduZone API.
///
/// Cloning is cheap; clones share the connection pool and the token store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    retry: RetryPolicy,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str, store: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            store,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(ClientError::Encode)?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(ClientError::Encode)?;
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::DELETE, path, None).await
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        let retryable = RetryPolicy::is_retryable_method(&method);
        let mut attempt = 0;

        loop {
            let mut builder = self.http.request(method.clone(), &url);
            if let Some(token) = self.store.token()? {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &body {
                builder = builder.json(body);
            }

            let outcome = builder.send().await;
            let can_retry = retryable && self.retry.has_attempts_left(attempt);

            match outcome {
                Ok(response)
                    if can_retry && RetryPolicy::is_retryable_status(response.status()) =>
                {
                    warn!(
                        method = %method,
                        url = %url,
                        status = response.status().as_u16(),
                        attempt = attempt + 1,
                        "Transient response, retrying"
                    );
                }
                Ok(response) => return decode(response).await,
                Err(e) if can_retry && RetryPolicy::is_retryable_error(&e) => {
                    warn!(
                        method = %method,
                        url = %url,
                        error = %e,
                        attempt = attempt + 1,
                        "Request failed, retrying"
                    );
                }
                Err(e) => return Err(ClientError::Transport(e)),
            }

            tokio::time::sleep(self.retry.delay_for(attempt)).await;
            attempt += 1;
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        let envelope: DataEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(ClientError::Decode)?;
        return Ok(envelope.data);
    }

    let (message, fields) = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
        Ok(envelope) => (envelope.error.message, envelope.error.fields),
        Err(_) => (
            status
                .canonical_reason()
                .unwrap_or("An error occurred")
                .to_string(),
            Vec::new(),
        ),
    };

    debug!(status = status.as_u16(), message = %message, "Request rejected");

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized { message });
    }

    Err(ClientError::Api {
        status,
        message,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;

    fn client(base: &str) -> Result<ApiClient, ClientError> {
        ApiClient::new(base, Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn test_url_joining() {
        let api = client("http://localhost:5000/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("/books"), "http://localhost:5000/api/books");
        assert_eq!(api.url("books/1"), "http://localhost:5000/api/books/1");
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        assert!(matches!(
            client("localhost:5000/api"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
