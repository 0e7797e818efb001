mod api;
mod config;
mod error;
mod portal;
mod timeline;

pub use api::{
    author_id_from_uri, AutorRecord, CamaraApi, DadosAbertosClient, DeputadoRecord, OrgaoRecord,
    ProposicaoRecord, StatusRecord, TramitacaoRecord, UltimoStatusRecord,
};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use portal::{parse_search_results, Portal, PortalClient};
pub use timeline::parse_timeline;
