use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::IgnoredAny;

/// The source-language article a query resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArticle {
    pub title: String,
    pub url: String,
}

/// One interlanguage link: the equivalent article in another edition.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LangLink {
    pub lang: String,
    /// `*` in `formatversion=1` responses, `title` in `formatversion=2`.
    #[serde(rename = "*", alias = "title")]
    pub title: String,
    /// Present only when the request asks for `llprop=url`.
    #[serde(default)]
    pub url: String,
}

/// Response from `action=query&prop=langlinks`.
#[derive(Deserialize, Debug)]
pub struct LangLinksResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
}

#[derive(Deserialize, Debug)]
pub struct QueryBody {
    /// Keyed by page id; `-1`, `-2`, ... for missing titles.
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
}

#[derive(Deserialize, Debug)]
pub struct Page {
    pub title: Option<String>,
    #[serde(default)]
    pub langlinks: Vec<LangLink>,
    pub missing: Option<IgnoredAny>,
    pub invalid: Option<IgnoredAny>,
}

impl Page {
    pub fn exists(&self) -> bool {
        self.missing.is_none() && self.invalid.is_none()
    }
}

/// MediaWiki `{"error": {...}}` payload.
#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub code: Option<String>,
    pub info: Option<String>,
}
