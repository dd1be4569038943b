use serde_json::Value;
use tracing::{debug, warn};

use super::types::{LangLink, LangLinksResponse};
use super::{LookupError, WikiApi};

/// Fetch the interlanguage links of `title` on the `lang` edition.
///
/// The result is sorted ascending by language code with one entry per code.
/// It never contains `lang` itself.
pub async fn resolve_links(
    api: &impl WikiApi,
    lang: &str,
    title: &str,
) -> Result<Vec<LangLink>, LookupError> {
    let body = api.langlinks(lang, title).await?;
    let mut links = parse_langlinks(body, title)?;
    links.sort_by(|a, b| a.lang.cmp(&b.lang));
    links.dedup_by(|a, b| a.lang == b.lang);
    debug!(lang, title, count = links.len(), "langlinks resolved");
    Ok(links)
}

fn parse_langlinks(body: Value, title: &str) -> Result<Vec<LangLink>, LookupError> {
    let response: LangLinksResponse = serde_json::from_value(body)
        .map_err(|e| LookupError::Malformed(format!("unexpected langlinks response: {e}")))?;

    let pages = response.query.map(|q| q.pages).unwrap_or_default();
    if pages.len() > 1 {
        warn!(count = pages.len(), title, "expected one page, using the first");
    }

    let Some((_, page)) = pages.into_iter().next() else {
        return Err(LookupError::NotFound(title.to_string()));
    };
    if !page.exists() {
        return Err(LookupError::NotFound(
            page.title.unwrap_or_else(|| title.to_string()),
        ));
    }
    Ok(page.langlinks)
}
