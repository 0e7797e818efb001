use std::sync::Arc;

use camara_client::{author_id_from_uri, AutorRecord, CamaraApi, TramitacaoRecord};
use camara_core::{parse_api_timestamp, AuthorInfo, BillDetail, CommitteeInfo, ProceduralEvent};

use crate::error::{ConsultaError, Result};
use crate::service::ConsultaService;

/// Most-recent-events window carried in the aggregated detail.
const RECENT_EVENTS: usize = 5;

/// Authors resolved individually; the rest collapse into "e outros".
const MAX_AUTHOR_LOOKUPS: usize = 2;

impl ConsultaService {
    /// Builds the full aggregated record for a bill id.
    ///
    /// Only the initial metadata fetch is fatal. Committee, event, author
    /// and per-deputy sub-fetches degrade into unset fields, logged at warn.
    pub async fn aggregate(&self, id: u64) -> Result<BillDetail> {
        let record = self
            .api
            .bill(id)
            .await
            .map_err(ConsultaError::from_mandatory_fetch)?;
        let status = record.status.unwrap_or_default();

        let current_committee = match &status.sigla_orgao {
            Some(code) => self.committee_info(code).await,
            None => None,
        };

        let mut events = match self.api.events(id).await {
            Ok(records) => records.into_iter().map(event_from_record).collect(),
            Err(err) => {
                log::warn!("tramitações de {id} indisponíveis: {err}");
                Vec::new()
            }
        };
        events.sort_by(|a: &ProceduralEvent, b: &ProceduralEvent| b.timestamp.cmp(&a.timestamp));
        let latest_event = events.first().cloned();
        events.truncate(RECENT_EVENTS);

        let (authors, more_authors) = self.resolve_authors(id).await;

        Ok(BillDetail {
            type_code: record.sigla_tipo,
            number: record.numero,
            year: record.ano,
            summary_text: record.ementa,
            status_description: status.descricao_situacao,
            current_committee_code: status.sigla_orgao,
            current_committee,
            procedure_regime: status.regime,
            authors,
            more_authors,
            latest_event,
            recent_events: events,
            full_text_url: record.url_inteiro_teor,
            portal_link: self.config.tracking_link(id),
        })
    }

    /// Secondary lookup keyed on the committee code from the bill status.
    /// No match or a failed call leaves the fields unset.
    async fn committee_info(&self, code: &str) -> Option<CommitteeInfo> {
        match self.api.committees(code).await {
            Ok(committees) => committees.into_iter().next().map(|committee| CommitteeInfo {
                code: committee.sigla,
                full_name: committee.nome,
                kind: committee.tipo_orgao,
            }),
            Err(err) => {
                log::warn!("consulta do órgão {code} falhou: {err}");
                None
            }
        }
    }

    /// Fetches the authorship list and resolves party/state for the first
    /// two authors via concurrent per-deputy lookups, joined in list order.
    /// A failed lookup leaves that author's party/state unset (renders as
    /// N/A); no lookups are issued past the second author.
    async fn resolve_authors(&self, id: u64) -> (Vec<AuthorInfo>, bool) {
        let records = match self.api.authors(id).await {
            Ok(records) => records,
            Err(err) => {
                log::warn!("autores de {id} indisponíveis: {err}");
                return (Vec::new(), false);
            }
        };
        let more_authors = records.len() > MAX_AUTHOR_LOOKUPS;

        let mut legs = Vec::new();
        for record in records.into_iter().take(MAX_AUTHOR_LOOKUPS) {
            let api = Arc::clone(&self.api);
            legs.push(tokio::spawn(async move {
                author_info(&*api, record).await
            }));
        }

        let mut authors = Vec::new();
        for leg in legs {
            match leg.await {
                Ok(author) => authors.push(author),
                Err(err) => log::warn!("tarefa de autor abortou: {err}"),
            }
        }
        (authors, more_authors)
    }
}

async fn author_info(api: &dyn CamaraApi, record: AutorRecord) -> AuthorInfo {
    let mut info = AuthorInfo {
        name: record.nome,
        party: None,
        state_code: None,
    };

    let Some(deputy_id) = record.uri.as_deref().and_then(author_id_from_uri) else {
        return info;
    };
    match api.deputy(deputy_id).await {
        Ok(deputy) => {
            info.party = deputy.ultimo_status.sigla_partido;
            info.state_code = deputy.ultimo_status.sigla_uf;
        }
        Err(err) => {
            log::debug!("consulta do deputado {deputy_id} falhou: {err}");
        }
    }
    info
}

fn event_from_record(record: TramitacaoRecord) -> ProceduralEvent {
    ProceduralEvent {
        timestamp: parse_api_timestamp(&record.data_hora),
        raw_date: record.data_hora,
        committee_code: record.sigla_orgao,
        dispatch: record.despacho,
        description: record.descricao_tramitacao,
    }
}
