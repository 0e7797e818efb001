use std::sync::Arc;

use camara_client::{CamaraApi, ClientConfig, Portal};
use camara_core::{parse_reference, BillReference, ProceduralEvent};

use crate::error::{ConsultaError, Result};
use crate::outcome::Consulta;

/// Query façade tying the resolver and the aggregator to one API and one
/// portal capability. Holds no per-request state.
pub struct ConsultaService {
    pub(crate) api: Arc<dyn CamaraApi>,
    pub(crate) portal: Arc<dyn Portal>,
    pub(crate) config: ClientConfig,
}

impl ConsultaService {
    pub fn new(api: Arc<dyn CamaraApi>, portal: Arc<dyn Portal>, config: ClientConfig) -> Self {
        Self {
            api,
            portal,
            config,
        }
    }

    /// Full pipeline for one user-typed reference: parse, resolve, and
    /// either aggregate the single match, surface the candidate list, or
    /// return the free-text listing.
    pub async fn consultar(&self, input: &str) -> Result<Consulta> {
        let reference = parse_reference(input)?;

        match &reference {
            BillReference::FreeText(_) => {
                let results = self.resolve(&reference).await;
                if results.is_empty() {
                    return Err(ConsultaError::NotFound);
                }
                Ok(Consulta::Listing(results))
            }
            BillReference::Filter { .. } => {
                let mut results = self.resolve(&reference).await;
                match results.len() {
                    0 => Err(ConsultaError::NotFound),
                    1 => {
                        let summary = results.remove(0);
                        let detail = self.aggregate(summary.id).await?;
                        Ok(Consulta::Detail(Box::new(detail)))
                    }
                    _ => Ok(Consulta::Ambiguous(results)),
                }
            }
        }
    }

    /// Supplementary portal timeline for a resolved bill id. Advisory only;
    /// an unavailable portal yields an empty sequence.
    pub async fn timeline(&self, id: u64) -> Vec<ProceduralEvent> {
        self.portal.timeline(id).await
    }
}
