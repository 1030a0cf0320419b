//! HTTP client utilities and shop API bindings for the Larek storefront.
//!
//! Provides a small builder API over a pluggable [`Transport`], with bounded
//! retries for idempotent requests, plus [`LarekApi`] for the two endpoints
//! the storefront talks to.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use larek_data::{FetchClient, HttpTransport, LarekApi};
//!
//! let transport = HttpTransport::new(Duration::from_secs(10))?;
//! let client = FetchClient::new(Arc::new(transport))
//!     .with_base_url("https://larek-api.nomoreparties.co/api/weblarek");
//! let api = LarekApi::new(client);
//!
//! let catalog = api.fetch_products().await?;
//! println!("{} products", catalog.items.len());
//! ```

mod api;
mod error;
mod request;
mod response;
mod retry;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

pub use api::{
    ErrorResponse, LarekApi, OrderReceipt, OrderRequest, OrderResponse, ProductList, ORDER_PATH,
    PRODUCTS_PATH,
};
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use transport::{HttpTransport, Transport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    retry: RetryPolicy,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    /// Create a client that sends through the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            retry: RetryPolicy::default(),
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the retry policy used for idempotent requests.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            client: self,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    builder: RequestBuilder,
    client: &'a FetchClient,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the response.
    ///
    /// Idempotent requests are retried according to the client's policy;
    /// POST is sent exactly once.
    pub async fn send(self) -> Result<Response, FetchError> {
        let policy = &self.client.retry;
        let retryable = self.builder.method.is_idempotent();
        let mut attempt = 0;

        loop {
            debug!(
                method = self.builder.method.as_str(),
                url = %self.builder.url,
                attempt,
                "sending request"
            );
            let result = self.client.transport.send(self.builder.clone()).await;

            let retry = retryable
                && match &result {
                    Ok(resp) => policy.should_retry_status(resp.status, attempt),
                    Err(FetchError::Timeout) => policy.should_retry_timeout(attempt),
                    Err(FetchError::Connection(_)) => policy.should_retry_connection(attempt),
                    Err(_) => false,
                };
            if !retry {
                return result;
            }

            let delay = policy.backoff.delay_for_attempt(attempt);
            warn!(
                url = %self.builder.url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, LarekApi, Method, OrderReceipt, Response};
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::{FetchError, RequestBuilder, Response, Transport};

    /// Replays canned results in order and records what was sent.
    #[derive(Default)]
    pub struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<Response, FetchError>>>,
        pub sent: Mutex<Vec<RequestBuilder>>,
    }

    impl ScriptedTransport {
        pub fn new(replies: Vec<Result<Response, FetchError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn json(status: u16, body: &str) -> Result<Response, FetchError> {
            Ok(Response::new(status, HashMap::new(), body.as_bytes().to_vec()))
        }

        pub fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.sent.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::RequestError("no scripted reply".into())))
        }
    }
}
