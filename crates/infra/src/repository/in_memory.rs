use std::collections::BTreeMap;
use std::sync::RwLock;

use cadastro_core::{Entity, PessoaId};
use cadastro_pessoas::Pessoa;

use super::{PessoaRepository, RepositoryError};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<PessoaId, Pessoa>,
    next_id: i64,
}

/// In-memory Pessoa store.
///
/// Intended for tests/dev. Uniqueness checks and the write happen under one
/// write lock, so concurrent saves racing on the same `cpf`/`email` resolve
/// exactly like a unique index would.
#[derive(Debug)]
pub struct InMemoryPessoaRepository {
    inner: RwLock<Table>,
}

impl InMemoryPessoaRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPessoaRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Backend("in-memory store lock poisoned".to_string())
}

/// First unique column `candidate` would duplicate among the other rows.
fn conflicting_column(table: &Table, candidate: &Pessoa) -> Option<&'static str> {
    table
        .rows
        .values()
        .filter(|row| row.id != candidate.id)
        .find_map(|row| {
            if row.cpf == candidate.cpf {
                Some("cpf")
            } else if row.email == candidate.email {
                Some("email")
            } else {
                None
            }
        })
}

#[async_trait::async_trait]
impl PessoaRepository for InMemoryPessoaRepository {
    async fn find_by_id(&self, id: PessoaId) -> Result<Option<Pessoa>, RepositoryError> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Pessoa>, RepositoryError> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn save(&self, mut pessoa: Pessoa) -> Result<Pessoa, RepositoryError> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;

        if let Some(id) = pessoa.id() {
            if !table.rows.contains_key(&id) {
                return Err(RepositoryError::NotFound);
            }
        }

        if let Some(column) = conflicting_column(&table, &pessoa) {
            return Err(RepositoryError::UniqueViolation(format!(
                "duplicate value for pessoas.{column}"
            )));
        }

        let id = match pessoa.id {
            Some(id) => id,
            None => {
                let id = PessoaId::new(table.next_id);
                table.next_id += 1;
                id
            }
        };
        pessoa.id = Some(id);
        table.rows.insert(id, pessoa.clone());
        Ok(pessoa)
    }

    async fn delete(&self, pessoa: &Pessoa) -> Result<(), RepositoryError> {
        let Some(id) = pessoa.id() else {
            return Ok(());
        };
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.rows.remove(&id);
        Ok(())
    }
}
