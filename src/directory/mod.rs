pub mod api;
pub mod record;

use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;

pub use record::Record;

pub const DEFAULT_API_URL: &str = "https://randomuser.me/api/";
pub const DEFAULT_SEED: &str = "foobar";
pub const DEFAULT_TIMEOUT_SECONDS: usize = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid directory URL: {url}")]
    InvalidUrl { url: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("directory returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode directory response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed directory response: {message}")]
    Malformed { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub count: usize,
    pub seed: String,
}

/// A remote user directory. Anything that can hand back `count` records
/// for a seed can back a [`crate::engine::UserList`].
pub trait DirectorySource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        request: &'a FetchRequest,
    ) -> BoxFuture<'a, Result<Vec<Record>, FetchError>>;
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub api_url: String,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            proxy: None,
        }
    }
}

/// [`DirectorySource`] backed by the randomuser.me HTTP API.
#[derive(Clone, Debug)]
pub struct RandomUserClient {
    client: reqwest::Client,
    api_url: reqwest::Url,
}

impl RandomUserClient {
    pub fn new(options: &ClientOptions) -> Result<Self, FetchError> {
        let api_url =
            reqwest::Url::parse(options.api_url.trim()).map_err(|_| FetchError::InvalidUrl {
                url: options.api_url.clone(),
            })?;
        let client = build_client(options.proxy.as_deref(), options.timeout_seconds)?;
        Ok(Self { client, api_url })
    }

    pub(crate) fn request_url(&self, request: &FetchRequest) -> reqwest::Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("results", &request.count.to_string())
            .append_pair("seed", &request.seed);
        url
    }

    async fn fetch_records(&self, request: &FetchRequest) -> Result<Vec<Record>, FetchError> {
        let url = self.request_url(request);
        tracing::debug!(%url, count = request.count, "fetching user batch");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                source: e,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            source: e,
        })?;
        api::decode_records(&body)
    }
}

impl DirectorySource for RandomUserClient {
    fn fetch<'a>(
        &'a self,
        request: &'a FetchRequest,
    ) -> BoxFuture<'a, Result<Vec<Record>, FetchError>> {
        Box::pin(self.fetch_records(request))
    }
}

fn build_client(
    proxy: Option<&str>,
    timeout_seconds: usize,
) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!("userlist/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let timeout = Duration::from_secs(
        timeout_seconds
            .try_into()
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS as u64),
    );
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout);

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetchError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| FetchError::HttpClientBuild { source: e })
}
