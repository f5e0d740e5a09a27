//! Infrastructure wiring: which repository backs the service.

use std::sync::Arc;

use cadastro_infra::{
    InMemoryPessoaRepository, PessoaRepository, PessoaService, PostgresPessoaRepository,
    RepositoryError,
};

use crate::config::ApiConfig;

/// Type-erased repository so handlers don't care which store is configured.
pub type DynPessoaRepository = Arc<dyn PessoaRepository>;

/// Shared services injected into every handler.
pub struct AppServices {
    pub pessoas: PessoaService<DynPessoaRepository>,
}

impl AppServices {
    pub fn new(repository: DynPessoaRepository) -> Self {
        Self {
            pessoas: PessoaService::new(repository),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPessoaRepository::new()))
    }

    /// Postgres when `DATABASE_URL` is configured, in-memory otherwise.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, RepositoryError> {
        match &config.database_url {
            Some(url) => {
                let repository =
                    PostgresPessoaRepository::connect(url, config.database_max_connections).await?;
                tracing::info!(
                    max_connections = config.database_max_connections,
                    "using postgres pessoa repository"
                );
                Ok(Self::new(Arc::new(repository)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; records live in memory and vanish on restart");
                Ok(Self::in_memory())
            }
        }
    }
}
