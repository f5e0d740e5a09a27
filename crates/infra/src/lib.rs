//! Infrastructure layer: Pessoa persistence and the use-case service on top of it.

pub mod repository;
pub mod service;

pub use repository::{
    InMemoryPessoaRepository, PessoaRepository, PostgresPessoaRepository, RepositoryError,
};
pub use service::{PessoaService, ServiceError, ServiceResult};
