use std::sync::Arc;

use camara_client::{CamaraApi as _, ClientConfig, Portal as _, ProposicaoRecord};
use camara_core::{BillReference, BillSummary};

use crate::service::ConsultaService;

/// Type codes probed when a numeric reference carries no explicit type.
/// Fan-out results keep this enumeration order.
pub const KNOWN_TYPE_CODES: [&str; 10] = [
    "PL",  // Projeto de Lei
    "PLP", // Projeto de Lei Complementar
    "PEC", // Proposta de Emenda à Constituição
    "MPV", // Medida Provisória
    "PDL", // Projeto de Decreto Legislativo
    "PRC", // Projeto de Resolução
    "REQ", // Requerimento
    "INC", // Indicação
    "RIC", // Requerimento de Informação
    "PDC", // Projeto de Decreto Legislativo (legislaturas anteriores)
];

/// Display title cap for fan-out summaries.
const SNIPPET_CHARS: usize = 100;

impl ConsultaService {
    /// Finds candidate bills for a parsed reference.
    ///
    /// Explicit type: one lookup. No type: one lookup per known type code,
    /// issued concurrently and joined in enumeration order; a failing leg is
    /// logged and skipped. Free text: portal search scrape. Never fails;
    /// resolution problems show up as an empty list.
    pub async fn resolve(&self, reference: &BillReference) -> Vec<BillSummary> {
        match reference {
            BillReference::FreeText(term) => self.portal.search(term).await,
            BillReference::Filter {
                type_code,
                number,
                year,
            } => {
                let codes: Vec<&str> = match type_code {
                    Some(code) => vec![code.as_str()],
                    None => KNOWN_TYPE_CODES.to_vec(),
                };
                self.lookup_fan_out(&codes, *number, *year).await
            }
        }
    }

    async fn lookup_fan_out(&self, codes: &[&str], number: u32, year: u16) -> Vec<BillSummary> {
        let mut legs = Vec::with_capacity(codes.len());
        for code in codes {
            let api = Arc::clone(&self.api);
            let code = code.to_string();
            legs.push((
                code.clone(),
                tokio::spawn(async move { api.list_bills(&code, number, year).await }),
            ));
        }

        let mut results = Vec::new();
        for (code, leg) in legs {
            match leg.await {
                Ok(Ok(records)) => {
                    for record in records {
                        results.push(summary_from_record(&record, &self.config));
                    }
                }
                Ok(Err(err)) => {
                    log::warn!("busca de {code} {number}/{year} falhou, pulando: {err}");
                }
                Err(err) => {
                    log::warn!("tarefa de busca de {code} abortou: {err}");
                }
            }
        }
        results
    }
}

fn summary_from_record(record: &ProposicaoRecord, config: &ClientConfig) -> BillSummary {
    BillSummary {
        id: record.id,
        type_code: Some(record.sigla_tipo.clone()),
        number: Some(record.numero),
        year: Some(record.ano),
        title: format!(
            "{} {}/{} - {}...",
            record.sigla_tipo,
            record.numero,
            record.ano,
            snippet(&record.ementa, SNIPPET_CHARS)
        ),
        link: config.tracking_link(record.id),
    }
}

/// First `max` characters of the ementa. Char-based: ementas are Portuguese
/// text and a byte cut could split an accented character.
fn snippet(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
