use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use camara_consulta::{Consulta, ConsultaError, ConsultaService};
use camara_core::{render_detail, render_disambiguation, render_search_results, RenderFormat};

pub mod chat;

const INDEX_HTML: &str = include_str!("../assets/index.html");

const UPSTREAM_MESSAGE: &str =
    "Não foi possível consultar as fontes da Câmara agora. Tente novamente em instantes.";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConsultaService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/consulta/*referencia", get(consulta))
        .route("/api/chat", post(chat_endpoint))
        .with_state(state)
}

async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Serialize)]
struct ConsultaResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ConsultaResponse {
    fn success(data: serde_json::Value) -> Json<Self> {
        Json(Self {
            status: "success",
            data: Some(data),
            message: None,
        })
    }

    fn error(message: String) -> Json<Self> {
        Json(Self {
            status: "error",
            data: None,
            message: Some(message),
        })
    }
}

/// `GET /consulta/{referencia}`: structured JSON plus a rendered HTML
/// fragment for the front end. The caller always gets a renderable result,
/// a disambiguation list, or a short message.
async fn consulta(
    State(state): State<AppState>,
    Path(referencia): Path<String>,
) -> Json<ConsultaResponse> {
    match state.service.consultar(&referencia).await {
        Ok(Consulta::Detail(detail)) => ConsultaResponse::success(json!({
            "html": render_detail(&detail, RenderFormat::Html),
            "detail": detail,
        })),
        Ok(Consulta::Ambiguous(candidates)) => ConsultaResponse::success(json!({
            "html": render_disambiguation(&candidates),
            "candidatos": candidates,
        })),
        Ok(Consulta::Listing(results)) => ConsultaResponse::success(json!({
            "html": render_search_results(&results),
            "resultados": results,
        })),
        Err(err) => ConsultaResponse::error(user_message(&err)),
    }
}

#[derive(Deserialize)]
struct ChatRequest {
    pergunta: String,
}

#[derive(Serialize)]
struct ChatResponse {
    resposta: String,
}

/// `POST /api/chat`: free-form question in, plain-text answer out.
///
/// Bare-number questions always get the candidate listing; everything else
/// goes through the full consulta pipeline.
async fn chat_endpoint(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reference = chat::extract_reference(&request.pergunta);

    if let Some(filter) = chat::bare_number(&reference) {
        let results = state.service.resolve(&filter).await;
        let resposta = if results.is_empty() {
            chat::NO_RESULTS_MESSAGE.to_string()
        } else {
            render_search_results(&results)
        };
        return Json(ChatResponse { resposta });
    }

    let resposta = match state.service.consultar(&reference).await {
        Ok(Consulta::Detail(detail)) => render_detail(&detail, RenderFormat::PlainText),
        Ok(Consulta::Ambiguous(candidates)) => render_disambiguation(&candidates),
        Ok(Consulta::Listing(results)) => render_search_results(&results),
        Err(ConsultaError::NotFound) => chat::NO_RESULTS_MESSAGE.to_string(),
        Err(err) => user_message(&err),
    };
    Json(ChatResponse { resposta })
}

/// User-facing message for a failed consulta; upstream details go to the
/// log, never to the caller.
fn user_message(err: &ConsultaError) -> String {
    match err {
        ConsultaError::NotFound => "Proposição não encontrada".to_string(),
        ConsultaError::Reference(err) => err.to_string(),
        ConsultaError::Upstream(inner) => {
            log::error!("consulta falhou na fonte de dados: {inner}");
            UPSTREAM_MESSAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use camara_client::{
        AutorRecord, CamaraApi, ClientConfig, ClientError, DeputadoRecord, OrgaoRecord, Portal,
        ProposicaoRecord, TramitacaoRecord,
    };
    use camara_core::{BillSummary, ProceduralEvent};

    /// Serves exactly one PL for 2306/2020; everything else is empty, and
    /// the per-bill endpoints are unreachable on the listing path.
    struct SingleMatchCamara;

    #[async_trait]
    impl CamaraApi for SingleMatchCamara {
        async fn list_bills(
            &self,
            type_code: &str,
            number: u32,
            year: u16,
        ) -> camara_client::Result<Vec<ProposicaoRecord>> {
            if type_code == "PL" && number == 2306 && year == 2020 {
                return Ok(vec![ProposicaoRecord {
                    id: 42,
                    sigla_tipo: "PL".to_string(),
                    numero: 2306,
                    ano: 2020,
                    ementa: "Regula a prestação de serviços digitais.".to_string(),
                    url_inteiro_teor: None,
                    status: None,
                }]);
            }
            Ok(Vec::new())
        }

        async fn bill(&self, id: u64) -> camara_client::Result<ProposicaoRecord> {
            Err(ClientError::NotFound {
                url: format!("unexpected bill fetch for {id}"),
            })
        }

        async fn events(&self, _id: u64) -> camara_client::Result<Vec<TramitacaoRecord>> {
            Ok(Vec::new())
        }

        async fn authors(&self, _id: u64) -> camara_client::Result<Vec<AutorRecord>> {
            Ok(Vec::new())
        }

        async fn committees(&self, _code: &str) -> camara_client::Result<Vec<OrgaoRecord>> {
            Ok(Vec::new())
        }

        async fn deputy(&self, _id: u64) -> camara_client::Result<DeputadoRecord> {
            Ok(DeputadoRecord::default())
        }
    }

    struct EmptyPortal;

    #[async_trait]
    impl Portal for EmptyPortal {
        async fn search(&self, _term: &str) -> Vec<BillSummary> {
            Vec::new()
        }

        async fn timeline(&self, _id: u64) -> Vec<ProceduralEvent> {
            Vec::new()
        }
    }

    fn test_state() -> AppState {
        AppState {
            service: Arc::new(ConsultaService::new(
                Arc::new(SingleMatchCamara),
                Arc::new(EmptyPortal),
                ClientConfig::default(),
            )),
        }
    }

    #[tokio::test]
    async fn bare_number_questions_answer_with_the_listing() {
        let Json(response) = chat_endpoint(
            State(test_state()),
            Json(ChatRequest {
                pergunta: "qual a situação de 2306/2020?".to_string(),
            }),
        )
        .await;

        assert!(
            response
                .resposta
                .starts_with("Encontrei os seguintes resultados"),
            "resposta: {}",
            response.resposta
        );
        assert!(response.resposta.contains("PL 2306/2020"));
        assert!(!response.resposta.contains("Ementa:"));
    }

    #[tokio::test]
    async fn bare_number_questions_with_no_match_get_the_fallback() {
        let Json(response) = chat_endpoint(
            State(test_state()),
            Json(ChatRequest {
                pergunta: "9999/1999".to_string(),
            }),
        )
        .await;

        assert_eq!(response.resposta, chat::NO_RESULTS_MESSAGE);
    }

    #[test]
    fn upstream_errors_never_leak_internals() {
        let err = ConsultaError::Upstream(camara_client::ClientError::NotFound {
            url: "https://internal.example/x".to_string(),
        });
        let message = user_message(&err);
        assert!(!message.contains("internal.example"));
        assert_eq!(message, UPSTREAM_MESSAGE);
    }

    #[test]
    fn not_found_has_a_short_portuguese_message() {
        assert_eq!(
            user_message(&ConsultaError::NotFound),
            "Proposição não encontrada"
        );
    }
}
