use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReferenceError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("referência vazia: informe uma sigla, um número ou um termo de busca")]
    Empty,
}
