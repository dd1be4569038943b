//! MediaWiki API access: article search and interlanguage links.

pub mod links;
pub mod title;
pub mod types;

pub use links::resolve_links;
pub use title::resolve_title;
pub use types::{LangLink, ResolvedArticle};

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use types::ApiError;

const API_ENDPOINT: &str = "https://{lang}.wikipedia.org/w/api.php";
const ENDPOINT_ENV: &str = "WT_API_ENDPOINT";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed: HTTP status {0}")]
    Status(u16),

    #[error("invalid API endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API error ({code}): {info}")]
    Api { code: String, info: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no results for \"{0}\"")]
    NotFound(String),
}

/// The two MediaWiki collaborators the lookup pipeline consumes.
/// Implemented by `WikipediaClient` for production; mock implementations used in tests.
pub trait WikiApi {
    /// Raw `action=opensearch` response for `query` on the `lang` edition.
    async fn opensearch(&self, lang: &str, query: &str) -> Result<Value, LookupError>;

    /// Raw `prop=langlinks` response for the page titled `title` on the `lang` edition.
    async fn langlinks(&self, lang: &str, title: &str) -> Result<Value, LookupError>;
}

/// Shared HTTP client with an explicit per-request timeout.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(REQUEST_TIMEOUT).build()
}

#[derive(Clone)]
pub struct WikipediaClient {
    http: Client,
    endpoint: String,
}

impl WikipediaClient {
    /// Uses `WT_API_ENDPOINT` when set; `{lang}` in the template is replaced
    /// by the edition code.
    pub fn from_env(http: Client) -> Self {
        let endpoint = env::var(ENDPOINT_ENV)
            .ok()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| API_ENDPOINT.to_string());
        Self::with_endpoint(http, &endpoint)
    }

    pub fn with_endpoint(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    fn endpoint_url(&self, lang: &str, params: &[(&str, &str)]) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.endpoint.replace("{lang}", lang))?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .extend_pairs(params);
        Ok(url)
    }

    async fn get_json(&self, lang: &str, params: &[(&str, &str)]) -> Result<Value, LookupError> {
        let url = self.endpoint_url(lang, params)?;
        debug!(url = %url, "api request");

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "MediaWiki API request failed");
            return Err(LookupError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            LookupError::Malformed(format!("expected a JSON body ({e}), got: {}", excerpt(&text)))
        })?;
        if let Some(err) = api_error(&body) {
            warn!(error = %err, "MediaWiki API error in 200 response");
            return Err(err);
        }
        Ok(body)
    }
}

impl WikiApi for WikipediaClient {
    async fn opensearch(&self, lang: &str, query: &str) -> Result<Value, LookupError> {
        self.get_json(
            lang,
            &[
                ("action", "opensearch"),
                ("redirects", "resolve"),
                ("limit", "1"),
                ("search", query),
            ],
        )
        .await
    }

    async fn langlinks(&self, lang: &str, title: &str) -> Result<Value, LookupError> {
        self.get_json(
            lang,
            &[
                ("action", "query"),
                ("prop", "langlinks"),
                ("llprop", "url"),
                ("lllimit", "max"),
                ("titles", title),
            ],
        )
        .await
    }
}

fn api_error(body: &Value) -> Option<LookupError> {
    let err: ApiError = serde_json::from_value(body.get("error")?.clone()).ok()?;
    Some(LookupError::Api {
        code: err.code.unwrap_or_else(|| "unknown".to_string()),
        info: err.info.unwrap_or_default(),
    })
}

/// Compact rendering of an unexpected body for error messages.
pub(crate) fn shape(body: &Value) -> String {
    excerpt(&body.to_string())
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() > 200 {
        let head: String = text.chars().take(200).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
