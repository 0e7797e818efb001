mod aggregator;
mod error;
mod outcome;
mod resolver;
mod service;

pub use error::{ConsultaError, Result};
pub use outcome::Consulta;
pub use resolver::KNOWN_TYPE_CODES;
pub use service::ConsultaService;
