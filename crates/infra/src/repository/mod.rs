//! Pessoa persistence: the repository capability and its implementations.
//!
//! The repository is a thin CRUD port. Uniqueness of `cpf` and `email` is the
//! store's job: a colliding `save` fails with [`RepositoryError::UniqueViolation`]
//! and callers translate that, they never pre-check.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

use cadastro_core::PessoaId;
use cadastro_pessoas::Pessoa;

pub use in_memory::InMemoryPessoaRepository;
pub use postgres::PostgresPessoaRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The write would duplicate a value in a unique column (`cpf` or `email`).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// An update targeted an id that is not (or no longer) stored.
    #[error("record not found")]
    NotFound,

    /// Anything else the backend reported (connection, protocol, decoding).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Storage capability over Pessoa records.
#[async_trait::async_trait]
pub trait PessoaRepository: Send + Sync {
    async fn find_by_id(&self, id: PessoaId) -> Result<Option<Pessoa>, RepositoryError>;

    /// All records, ordered by id.
    async fn find_all(&self) -> Result<Vec<Pessoa>, RepositoryError>;

    /// Insert when `pessoa.id` is `None` (the store assigns the id), update otherwise.
    async fn save(&self, pessoa: Pessoa) -> Result<Pessoa, RepositoryError>;

    /// Remove the given persisted record. Unsaved records are ignored.
    async fn delete(&self, pessoa: &Pessoa) -> Result<(), RepositoryError>;
}

#[async_trait::async_trait]
impl<R> PessoaRepository for Arc<R>
where
    R: PessoaRepository + ?Sized,
{
    async fn find_by_id(&self, id: PessoaId) -> Result<Option<Pessoa>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Pessoa>, RepositoryError> {
        (**self).find_all().await
    }

    async fn save(&self, pessoa: Pessoa) -> Result<Pessoa, RepositoryError> {
        (**self).save(pessoa).await
    }

    async fn delete(&self, pessoa: &Pessoa) -> Result<(), RepositoryError> {
        (**self).delete(pessoa).await
    }
}
