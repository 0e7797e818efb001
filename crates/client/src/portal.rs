use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};

use camara_core::{BillSummary, ProceduralEvent};

use crate::config::ClientConfig;
use crate::error::Result;

static RESULT_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.resultItemContent").expect("static selector"));
static RESULT_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.nomeProposicao").expect("static selector"));
static ID_IN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"idProposicao=(\d+)").expect("static regex"));

/// HTML portal capability: full-text search plus the tramitação timeline.
/// Both paths are advisory; failures come back as empty sequences.
#[async_trait]
pub trait Portal: Send + Sync {
    async fn search(&self, term: &str) -> Vec<BillSummary>;

    async fn timeline(&self, id: u64) -> Vec<ProceduralEvent>;
}

/// Reqwest-backed scraper for the camara.leg.br portal pages.
pub struct PortalClient {
    pub(crate) http: Client,
    pub(crate) config: ClientConfig,
}

impl PortalClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    async fn fetch_search_page(&self, term: &str) -> Result<String> {
        let response = self
            .http
            .get(&self.config.portal_search_url)
            .query(&[("pagina", "1"), ("ordem", "relevancia"), ("q", term)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl Portal for PortalClient {
    async fn search(&self, term: &str) -> Vec<BillSummary> {
        match self.fetch_search_page(term).await {
            Ok(html) => parse_search_results(&html, origin(&self.config.portal_search_url)),
            Err(err) => {
                log::warn!("busca no portal por {term:?} falhou: {err}");
                Vec::new()
            }
        }
    }

    async fn timeline(&self, id: u64) -> Vec<ProceduralEvent> {
        crate::timeline::fetch_timeline(self, id).await
    }
}

/// Extracts `(title, id, link)` triples from a portal results page.
///
/// Entries without a recognizable `idProposicao` link are dropped; markup
/// that does not contain the expected listing yields an empty vec.
#[must_use]
pub fn parse_search_results(html: &str, origin: &str) -> Vec<BillSummary> {
    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for item in document.select(&RESULT_ITEM) {
        let Some(anchor) = item.select(&RESULT_TITLE).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(id) = ID_IN_LINK
            .captures(href)
            .and_then(|caps| caps[1].parse::<u64>().ok())
        else {
            continue;
        };

        let title = anchor.text().collect::<String>().trim().to_string();
        let link = if href.starts_with('/') {
            format!("{origin}{href}")
        } else {
            href.to_string()
        };
        results.push(BillSummary {
            id,
            type_code: None,
            number: None,
            year: None,
            title,
            link,
        });
    }

    results
}

/// `https://www.camara.leg.br/busca-portal/...` -> `https://www.camara.leg.br`.
pub(crate) fn origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return url;
    };
    match url[scheme_end + 3..].find('/') {
        Some(path_start) => &url[..scheme_end + 3 + path_start],
        None => url,
    }
}
