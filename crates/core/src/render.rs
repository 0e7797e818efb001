use std::fmt::Write as _;

use crate::types::{BillDetail, BillSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    PlainText,
    Html,
}

/// Renders an aggregated record. Pure: no I/O, no clock, no locale lookup.
///
/// Plain text follows the fixed tracking template; absent status-block
/// fields render as `N/A`, while the committee name/type lines are omitted
/// entirely when the committee lookup produced nothing.
#[must_use]
pub fn render_detail(detail: &BillDetail, format: RenderFormat) -> String {
    match format {
        RenderFormat::PlainText => render_plain(detail),
        RenderFormat::Html => render_html(detail),
    }
}

fn render_plain(detail: &BillDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Proposição: {} {}/{}",
        detail.type_code, detail.number, detail.year
    );
    let _ = writeln!(out, "Ementa: {}", detail.summary_text);
    out.push('\n');

    out.push_str("Situação atual:\n");
    let _ = writeln!(out, "- Status: {}", or_na(detail.status_description.as_deref()));
    let _ = writeln!(
        out,
        "- Órgão atual: {}",
        or_na(detail.current_committee_code.as_deref())
    );
    if let Some(committee) = &detail.current_committee {
        let _ = writeln!(out, "  Nome completo: {}", committee.full_name);
        let _ = writeln!(out, "  Tipo: {}", committee.kind);
    }
    out.push('\n');

    out.push_str("Última tramitação:\n");
    let (date, dispatch, description) = match &detail.latest_event {
        Some(event) => (
            event.display_date(),
            event.dispatch.as_deref().unwrap_or("N/A"),
            event.description.as_deref().unwrap_or("N/A"),
        ),
        None => ("N/A".to_string(), "N/A", "N/A"),
    };
    let _ = writeln!(out, "- Data: {date}");
    let _ = writeln!(out, "- Despacho: {dispatch}");
    let _ = writeln!(out, "- Descrição: {description}");
    out.push('\n');

    let _ = writeln!(
        out,
        "Regime de tramitação: {}",
        or_na(detail.procedure_regime.as_deref())
    );
    let _ = write!(
        out,
        "Link para acompanhamento: {}",
        or_na(detail.full_text_url.as_deref())
    );
    out
}

fn render_html(detail: &BillDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<h3>{} {}/{}</h3>",
        escape(&detail.type_code),
        detail.number,
        detail.year
    );
    let _ = writeln!(out, "<p class=\"ementa\">{}</p>", escape(&detail.summary_text));

    out.push_str("<h4>Informações</h4>\n<ul>\n");
    let _ = writeln!(out, "<li>Autores: {}</li>", escape(&authors_line(detail)));
    let _ = writeln!(
        out,
        "<li>Status: {}</li>",
        escape(or_na(detail.status_description.as_deref()))
    );
    let mut orgao = or_na(detail.current_committee_code.as_deref()).to_string();
    if let Some(committee) = &detail.current_committee {
        let _ = write!(orgao, " - {}", committee.full_name);
    }
    let _ = writeln!(out, "<li>Órgão: {}</li>", escape(&orgao));
    let _ = writeln!(
        out,
        "<li>Regime: {}</li>",
        escape(or_na(detail.procedure_regime.as_deref()))
    );
    out.push_str("</ul>\n");

    out.push_str("<h4>Últimas tramitações</h4>\n<ul>\n");
    if detail.recent_events.is_empty() {
        out.push_str("<li>N/A</li>\n");
    }
    for event in &detail.recent_events {
        let _ = writeln!(
            out,
            "<li>{} - {}</li>",
            escape(&event.display_date()),
            escape(
                event
                    .dispatch
                    .as_deref()
                    .or(event.description.as_deref())
                    .unwrap_or("N/A")
            )
        );
    }
    out.push_str("</ul>\n");

    out.push_str("<h4>Links</h4>\n");
    let _ = writeln!(
        out,
        "Página da proposição: <a href=\"{0}\" target=\"_blank\">{0}</a><br>",
        escape(&detail.portal_link)
    );
    if let Some(url) = &detail.full_text_url {
        let _ = writeln!(
            out,
            "Texto completo: <a href=\"{0}\" target=\"_blank\">{0}</a>",
            escape(url)
        );
    }
    out
}

/// Author display line: at most two names with `(PARTIDO/UF)` each, then the
/// "e outros" marker when the list was truncated.
#[must_use]
pub fn authors_line(detail: &BillDetail) -> String {
    if detail.authors.is_empty() {
        return "N/A".to_string();
    }
    let mut parts: Vec<String> = detail
        .authors
        .iter()
        .map(|author| format!("{} ({})", author.name, author.party_state()))
        .collect();
    if detail.more_authors {
        parts.push("e outros".to_string());
    }
    parts.join(", ")
}

/// Numbered listing for free-text search results.
#[must_use]
pub fn render_search_results(results: &[BillSummary]) -> String {
    let mut out = String::from("Encontrei os seguintes resultados:\n\n");
    for (position, result) in results.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", position + 1, result.title);
        let _ = writeln!(out, "Link: {}\n", result.link);
    }
    out
}

/// Message shown when a numeric query matched more than one type code.
#[must_use]
pub fn render_disambiguation(candidates: &[BillSummary]) -> String {
    let mut out = String::from("Encontramos várias proposições com este número:\n\n");
    for candidate in candidates {
        let _ = writeln!(out, "• {}", candidate.title);
    }
    out.push_str("\nPor favor, especifique o tipo (ex: PL, PEC, etc)");
    out
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => "N/A",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
