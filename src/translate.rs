use tracing::info;

use crate::report::{ReportRow, build_report};
use crate::settings::Settings;
use crate::wiki::{LookupError, WikiApi, resolve_links, resolve_title};

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("{0}")]
    Lookup(#[from] LookupError),
}

/// Resolve `query` in the source language, then report its equivalent in
/// every target language. Nothing is returned if either lookup fails.
///
/// `query` is expected to be non-empty; the CLI never calls this without one.
pub async fn translate(
    api: &impl WikiApi,
    settings: &Settings,
    query: &str,
) -> Result<Vec<ReportRow>, TranslateError> {
    let source = settings.source_language.as_str();
    info!(query, source, "translating");

    let article = resolve_title(api, source, query).await?;
    let links = resolve_links(api, source, &article.title).await?;

    let rows = build_report(source, &article, &links, &settings.target_languages);
    info!(
        rows = rows.len(),
        found = rows.iter().filter(|r| r.found).count(),
        "translation complete"
    );
    Ok(rows)
}
