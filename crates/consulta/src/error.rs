use thiserror::Error;

use camara_client::ClientError;
use camara_core::ReferenceError;

pub type Result<T> = std::result::Result<T, ConsultaError>;

/// Outcomes surfaced to the caller as distinguishable failures. Everything
/// else (committee, author, timeline sub-fetches) degrades into missing
/// fields inside the result instead of erroring.
#[derive(Error, Debug)]
pub enum ConsultaError {
    #[error("proposição não encontrada")]
    NotFound,

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The single mandatory metadata fetch failed; nothing to render.
    #[error("fonte de dados indisponível: {0}")]
    Upstream(#[from] ClientError),
}

impl ConsultaError {
    /// Maps the mandatory detail fetch's failure: a 404 means the record
    /// does not exist, anything else is an upstream failure.
    pub(crate) fn from_mandatory_fetch(err: ClientError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Upstream(err)
        }
    }
}
