use std::time::Duration;

/// Explicit client configuration handed to every component; nothing reads a
/// global. Substituting base URLs is how tests point the clients at fakes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Dados Abertos REST API (structured lookups).
    pub api_base_url: String,
    /// Full-text search portal (HTML results page).
    pub portal_search_url: String,
    /// Tracking page base; also hosts the timeline table.
    pub portal_tracking_url: String,
    /// Applied to every remote call.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://dadosabertos.camara.leg.br/api/v2".to_string(),
            portal_search_url: "https://www.camara.leg.br/busca-portal/proposicoes".to_string(),
            portal_tracking_url:
                "https://www.camara.leg.br/proposicoesWeb/fichadetramitacao".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("camara-consulta/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Public tracking link for a bill id, used in every summary and detail.
    #[must_use]
    pub fn tracking_link(&self, id: u64) -> String {
        format!("{}?idProposicao={id}", self.portal_tracking_url)
    }
}
