use serde_json::Value;
use tracing::debug;

use super::types::ResolvedArticle;
use super::{LookupError, WikiApi, shape};

/// Resolve free text to the best-matching article title and URL in `lang`.
///
/// Opensearch answers with `[query, [titles], [descriptions], [urls]]`;
/// only the first title and first URL are used.
pub async fn resolve_title(
    api: &impl WikiApi,
    lang: &str,
    query: &str,
) -> Result<ResolvedArticle, LookupError> {
    let body = api.opensearch(lang, query).await?;
    let article = parse_envelope(&body, query)?;
    debug!(lang, query, title = %article.title, "title resolved");
    Ok(article)
}

pub(crate) fn parse_envelope(body: &Value, query: &str) -> Result<ResolvedArticle, LookupError> {
    let slots = string_slots(body)?;
    if slots.len() != 4 {
        return Err(LookupError::Malformed(format!(
            "expected a 4-element opensearch envelope, got {} elements: {}",
            slots.len(),
            shape(body)
        )));
    }

    match (slots[1].first(), slots[3].first()) {
        (Some(title), Some(url)) if !title.is_empty() && !url.is_empty() => Ok(ResolvedArticle {
            title: title.clone(),
            url: url.clone(),
        }),
        _ => Err(LookupError::NotFound(query.to_string())),
    }
}

/// Flattens `[ string | [string] ]` into lists; a bare string becomes a
/// one-element list.
fn string_slots(body: &Value) -> Result<Vec<Vec<String>>, LookupError> {
    let Some(items) = body.as_array() else {
        return Err(LookupError::Malformed(format!(
            "expected an opensearch array, got: {}",
            shape(body)
        )));
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(vec![s.clone()]),
            Value::Array(values) => values
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        LookupError::Malformed(format!("expected a string but got {v}"))
                    })
                })
                .collect(),
            other => Err(LookupError::Malformed(format!(
                "expected a string or list of strings but got {other}"
            ))),
        })
        .collect()
}
