//! Matching requested languages against interlanguage links, and rendering rows.

use crate::wiki::{LangLink, ResolvedArticle};

/// Display width of the label column.
pub const LABEL_WIDTH: usize = 30;
const ELLIPSIS: &str = "...";
const MISSING_LABEL: &str = "???";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub lang: String,
    pub label: String,
    pub url: String,
    pub found: bool,
}

impl ReportRow {
    fn missing(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            label: MISSING_LABEL.to_string(),
            url: String::new(),
            found: false,
        }
    }
}

/// Labels longer than [`LABEL_WIDTH`] characters are cut so that, with the
/// ellipsis, they fill exactly the column.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return label.to_string();
    }
    let keep = LABEL_WIDTH - ELLIPSIS.len();
    let mut out: String = label.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// One row per requested code, in request order. `links` must be sorted by
/// language code; matching is exact.
pub fn match_links(links: &[LangLink], requested: &[String]) -> Vec<ReportRow> {
    requested
        .iter()
        .map(|lang| {
            match links.binary_search_by(|link| link.lang.as_str().cmp(lang.as_str())) {
                Ok(idx) => ReportRow {
                    lang: lang.clone(),
                    label: truncate_label(&links[idx].title),
                    url: links[idx].url.clone(),
                    found: true,
                },
                Err(_) => ReportRow::missing(lang),
            }
        })
        .collect()
}

/// The source row, built from the resolved article verbatim, followed by the
/// matched rows for every other requested language.
pub fn build_report(
    source: &str,
    article: &ResolvedArticle,
    links: &[LangLink],
    requested: &[String],
) -> Vec<ReportRow> {
    let foreign: Vec<String> = requested
        .iter()
        .filter(|code| code.as_str() != source)
        .cloned()
        .collect();

    let mut rows = Vec::with_capacity(foreign.len() + 1);
    rows.push(ReportRow {
        lang: source.to_string(),
        label: article.title.clone(),
        url: article.url.clone(),
        found: true,
    });
    rows.extend(match_links(links, &foreign));
    rows
}

pub fn format_row(row: &ReportRow) -> String {
    if row.found {
        format!("{}: {:<width$} {}", row.lang, row.label, row.url, width = LABEL_WIDTH)
    } else {
        format!("{}: {}", row.lang, row.label)
    }
}

pub fn render(rows: &[ReportRow]) -> String {
    let mut output = String::new();
    for row in rows {
        output.push_str(&format_row(row));
        output.push('\n');
    }
    output
}
