//! Pessoa use cases (application-level orchestration over a repository).
//!
//! ```text
//! HTTP handler
//!   ↓
//! PessoaService   (existence checks, partial-update merge, error translation)
//!   ↓
//! PessoaRepository (store enforces cpf/email uniqueness)
//! ```
//!
//! This is the only place storage errors are translated. Uniqueness violations
//! become `DomainError::FailedSave` with a message that depends on the call
//! site (create vs update); lookup misses become `DomainError::NotFound`.
//! Everything above this layer passes errors through unchanged.

use thiserror::Error;
use tracing::instrument;

use cadastro_core::error::{FAILED_SAVE_ON_CREATE, FAILED_SAVE_ON_UPDATE};
use cadastro_core::{DomainError, PessoaId};
use cadastro_pessoas::{Pessoa, PessoaPatch};

use crate::repository::{PessoaRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Already translated domain failure (not found, failed save, validation).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store failed for a reason that has no domain meaning.
    #[error("storage failure: {0}")]
    Store(RepositoryError),
}

impl ServiceError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(e) => Some(e),
            ServiceError::Store(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// CRUD use cases for Pessoa records.
#[derive(Debug)]
pub struct PessoaService<R> {
    repository: R,
}

impl<R> PessoaService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R> PessoaService<R>
where
    R: PessoaRepository,
{
    /// Persist a record (insert when it has no id).
    #[instrument(skip(self, pessoa), fields(pessoa_id = ?pessoa.id))]
    pub async fn save(&self, pessoa: Pessoa) -> ServiceResult<Pessoa> {
        let saved = self
            .repository
            .save(pessoa)
            .await
            .map_err(|e| translate_write_error(e, FAILED_SAVE_ON_CREATE))?;
        tracing::info!(pessoa_id = ?saved.id, "pessoa saved");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ServiceResult<Vec<Pessoa>> {
        self.repository.find_all().await.map_err(store_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: PessoaId) -> ServiceResult<Pessoa> {
        self.load(id).await
    }

    /// Merge the present fields of `patch` into the stored record and save the result.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: PessoaId, patch: PessoaPatch) -> ServiceResult<Pessoa> {
        let existing = self.load(id).await?;
        let merged = existing.merged(&patch);

        let saved = self
            .repository
            .save(merged)
            .await
            .map_err(|e| translate_write_error(e, FAILED_SAVE_ON_UPDATE))?;
        tracing::info!(pessoa_id = %id, "pessoa updated");
        Ok(saved)
    }

    /// Delete exactly the record currently stored under `id`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PessoaId) -> ServiceResult<()> {
        let existing = self.load(id).await?;
        self.repository.delete(&existing).await.map_err(store_error)?;
        tracing::info!(pessoa_id = %id, "pessoa deleted");
        Ok(())
    }

    async fn load(&self, id: PessoaId) -> ServiceResult<Pessoa> {
        match self.repository.find_by_id(id).await.map_err(store_error)? {
            Some(pessoa) => Ok(pessoa),
            None => {
                tracing::warn!(pessoa_id = %id, "pessoa not found");
                Err(DomainError::pessoa_not_found().into())
            }
        }
    }
}

fn translate_write_error(err: RepositoryError, failed_save_message: &'static str) -> ServiceError {
    match err {
        RepositoryError::UniqueViolation(detail) => {
            tracing::warn!(%detail, "save rejected by unique constraint");
            DomainError::failed_save(failed_save_message).into()
        }
        // Record vanished between load and save.
        RepositoryError::NotFound => DomainError::pessoa_not_found().into(),
        other => store_error(other),
    }
}

fn store_error(err: RepositoryError) -> ServiceError {
    tracing::error!(error = %err, "pessoa repository failure");
    ServiceError::Store(err)
}
