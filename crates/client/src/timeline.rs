use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use camara_core::{parse_portal_date, ProceduralEvent};

use crate::portal::PortalClient;

static TIMELINE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table#content-tramitacao tr").expect("static selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("static selector"));

/// Fetches the fichadetramitacao page and scrapes its timeline table.
///
/// Supplementary path: a network failure or a page without the expected
/// table logs and returns an empty sequence, never an error.
pub(crate) async fn fetch_timeline(portal: &PortalClient, id: u64) -> Vec<ProceduralEvent> {
    let url = &portal.config.portal_tracking_url;
    let page = portal
        .http
        .get(url)
        .query(&[("idProposicao", id.to_string())])
        .send()
        .await
        .and_then(|response| response.error_for_status());

    let body = match page {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(err) => {
                log::warn!("leitura da ficha de tramitação {id} falhou: {err}");
                return Vec::new();
            }
        },
        Err(err) => {
            log::warn!("consulta da ficha de tramitação {id} falhou: {err}");
            return Vec::new();
        }
    };

    parse_timeline(&body)
}

/// Parses the timeline table: rows of `(data, órgão, despacho)` cells, header
/// row skipped, rows with fewer than three cells skipped. Events come back
/// sorted most-recent-first; unparsable dates sort as earliest.
#[must_use]
pub fn parse_timeline(html: &str) -> Vec<ProceduralEvent> {
    let document = Html::parse_document(html);
    let mut events = Vec::new();

    for row in document.select(&TIMELINE_ROW).skip(1) {
        let cells: Vec<String> = row
            .select(&CELL)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 3 {
            continue;
        }

        let raw_date = cells[0].clone();
        events.push(ProceduralEvent {
            timestamp: parse_portal_date(&raw_date),
            raw_date,
            committee_code: non_empty(&cells[1]),
            dispatch: non_empty(&cells[2]),
            description: None,
        });
    }

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
