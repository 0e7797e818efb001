use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Envelope wrapping every Dados Abertos response body.
#[derive(Debug, Deserialize)]
struct Dados<T> {
    dados: T,
}

/// Bill record as returned by `/proposicoes`. Every field the upstream may
/// omit is defaulted at the decode boundary so downstream code only ever
/// sees explicit gaps.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposicaoRecord {
    pub id: u64,
    #[serde(rename = "siglaTipo", default)]
    pub sigla_tipo: String,
    #[serde(default)]
    pub numero: u32,
    #[serde(default)]
    pub ano: u16,
    #[serde(default)]
    pub ementa: String,
    #[serde(rename = "urlInteiroTeor", default)]
    pub url_inteiro_teor: Option<String>,
    #[serde(rename = "statusProposicao", default)]
    pub status: Option<StatusRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusRecord {
    #[serde(rename = "descricaoSituacao", default)]
    pub descricao_situacao: Option<String>,
    #[serde(rename = "siglaOrgao", default)]
    pub sigla_orgao: Option<String>,
    #[serde(default)]
    pub regime: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TramitacaoRecord {
    #[serde(rename = "dataHora", default)]
    pub data_hora: String,
    #[serde(rename = "siglaOrgao", default)]
    pub sigla_orgao: Option<String>,
    #[serde(default)]
    pub despacho: Option<String>,
    #[serde(rename = "descricaoTramitacao", default)]
    pub descricao_tramitacao: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutorRecord {
    #[serde(default)]
    pub nome: String,
    /// Reference URL whose trailing segment is the legislator id.
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrgaoRecord {
    #[serde(default)]
    pub sigla: String,
    #[serde(default)]
    pub nome: String,
    #[serde(rename = "tipoOrgao", default)]
    pub tipo_orgao: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeputadoRecord {
    #[serde(rename = "ultimoStatus", default)]
    pub ultimo_status: UltimoStatusRecord,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UltimoStatusRecord {
    #[serde(rename = "siglaPartido", default)]
    pub sigla_partido: Option<String>,
    #[serde(rename = "siglaUf", default)]
    pub sigla_uf: Option<String>,
}

/// Structured lookup capability over the open-data API. The query layer
/// depends on this trait, not on the concrete client, so tests substitute
/// in-memory fakes.
#[async_trait]
pub trait CamaraApi: Send + Sync {
    async fn list_bills(
        &self,
        type_code: &str,
        number: u32,
        year: u16,
    ) -> Result<Vec<ProposicaoRecord>>;

    async fn bill(&self, id: u64) -> Result<ProposicaoRecord>;

    async fn events(&self, id: u64) -> Result<Vec<TramitacaoRecord>>;

    async fn authors(&self, id: u64) -> Result<Vec<AutorRecord>>;

    async fn committees(&self, code: &str) -> Result<Vec<OrgaoRecord>>;

    async fn deputy(&self, id: u64) -> Result<DeputadoRecord>;
}

/// Reqwest-backed client for the Dados Abertos API.
pub struct DadosAbertosClient {
    http: Client,
    config: ClientConfig,
}

impl DadosAbertosClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String, query: &[(&str, String)]) -> Result<T> {
        log::debug!("GET {url}");
        let response = self.http.get(&url).query(query).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { url });
        }
        let body = response.error_for_status()?.text().await?;
        let envelope: Dados<T> =
            serde_json::from_str(&body).map_err(|source| ClientError::Decode { url, source })?;
        Ok(envelope.dados)
    }
}

#[async_trait]
impl CamaraApi for DadosAbertosClient {
    async fn list_bills(
        &self,
        type_code: &str,
        number: u32,
        year: u16,
    ) -> Result<Vec<ProposicaoRecord>> {
        self.get_json(
            format!("{}/proposicoes", self.config.api_base_url),
            &[
                ("siglaTipo", type_code.to_string()),
                ("numero", number.to_string()),
                ("ano", year.to_string()),
            ],
        )
        .await
    }

    async fn bill(&self, id: u64) -> Result<ProposicaoRecord> {
        self.get_json(format!("{}/proposicoes/{id}", self.config.api_base_url), &[])
            .await
    }

    async fn events(&self, id: u64) -> Result<Vec<TramitacaoRecord>> {
        self.get_json(
            format!("{}/proposicoes/{id}/tramitacoes", self.config.api_base_url),
            &[],
        )
        .await
    }

    async fn authors(&self, id: u64) -> Result<Vec<AutorRecord>> {
        self.get_json(
            format!("{}/proposicoes/{id}/autores", self.config.api_base_url),
            &[],
        )
        .await
    }

    async fn committees(&self, code: &str) -> Result<Vec<OrgaoRecord>> {
        self.get_json(
            format!("{}/orgaos", self.config.api_base_url),
            &[("sigla", code.to_string())],
        )
        .await
    }

    async fn deputy(&self, id: u64) -> Result<DeputadoRecord> {
        self.get_json(format!("{}/deputados/{id}", self.config.api_base_url), &[])
            .await
    }
}

/// Extracts the legislator id from an author reference URL
/// (`https://dadosabertos.camara.leg.br/api/v2/deputados/204554`).
#[must_use]
pub fn author_id_from_uri(uri: &str) -> Option<u64> {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_bill_listing_with_portuguese_field_names() {
        let body = r#"{
            "dados": [{
                "id": 2252323,
                "siglaTipo": "PL",
                "numero": 2306,
                "ano": 2020,
                "ementa": "Institui a Lei Brasileira de Liberdade na Internet.",
                "urlInteiroTeor": "https://example.org/teor.pdf"
            }]
        }"#;
        let envelope: Dados<Vec<ProposicaoRecord>> = serde_json::from_str(body).unwrap();
        let record = &envelope.dados[0];
        assert_eq!(record.id, 2252323);
        assert_eq!(record.sigla_tipo, "PL");
        assert_eq!(record.numero, 2306);
        assert_eq!(record.ano, 2020);
        assert!(record.status.is_none());
    }

    #[test]
    fn decodes_detail_with_embedded_status() {
        let body = r#"{
            "dados": {
                "id": 2252323,
                "siglaTipo": "PL",
                "numero": 2306,
                "ano": 2020,
                "ementa": "Institui a Lei Brasileira de Liberdade na Internet.",
                "statusProposicao": {
                    "descricaoSituacao": "Aguardando Designação de Relator",
                    "siglaOrgao": "CCJC",
                    "regime": "Prioridade (Art. 151, II, RICD)"
                }
            }
        }"#;
        let envelope: Dados<ProposicaoRecord> = serde_json::from_str(body).unwrap();
        let status = envelope.dados.status.unwrap();
        assert_eq!(status.sigla_orgao.as_deref(), Some("CCJC"));
        assert_eq!(
            status.descricao_situacao.as_deref(),
            Some("Aguardando Designação de Relator")
        );
    }

    #[test]
    fn missing_optional_fields_default_instead_of_failing() {
        let body = r#"{"dados": [{"id": 7, "siglaTipo": "PL"}]}"#;
        let envelope: Dados<Vec<ProposicaoRecord>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.dados[0].numero, 0);
        assert_eq!(envelope.dados[0].ementa, "");
        assert!(envelope.dados[0].url_inteiro_teor.is_none());
    }

    #[test]
    fn author_id_comes_from_the_trailing_uri_segment() {
        assert_eq!(
            author_id_from_uri("https://dadosabertos.camara.leg.br/api/v2/deputados/204554"),
            Some(204554)
        );
        assert_eq!(
            author_id_from_uri("https://dadosabertos.camara.leg.br/api/v2/deputados/204554/"),
            Some(204554)
        );
        assert_eq!(author_id_from_uri("https://example.org/orgaos/abc"), None);
    }
}
