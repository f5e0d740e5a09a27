//! Postgres-backed Pessoa repository.
//!
//! Expects the `pessoas` table from `sql/pessoas.sql` (unique constraints on
//! `cpf` and `email`).
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (unique violation) | `23505` | `UniqueViolation` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / PoolTimedOut / Io / other | N/A | `Backend` |
//!
//! An `UPDATE` that touches zero rows is reported as `NotFound`.

use chrono::NaiveDate;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use cadastro_core::{Entity, PessoaId};
use cadastro_pessoas::Pessoa;

use super::{PessoaRepository, RepositoryError};

/// Postgres-backed Pessoa repository.
///
/// Cloning is cheap; `PgPool` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct PostgresPessoaRepository {
    pool: PgPool,
}

impl PostgresPessoaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl PessoaRepository for PostgresPessoaRepository {
    #[instrument(skip(self), fields(pessoa_id = %id))]
    async fn find_by_id(&self, id: PessoaId) -> Result<Option<Pessoa>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, nome, data_nascimento, cpf, email
            FROM pessoas
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(pessoa_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Pessoa>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, nome, data_nascimento, cpf, email
            FROM pessoas
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(pessoa_from_row).collect()
    }

    #[instrument(skip(self, pessoa), fields(pessoa_id = ?pessoa.id))]
    async fn save(&self, pessoa: Pessoa) -> Result<Pessoa, RepositoryError> {
        match pessoa.id() {
            None => {
                let row = sqlx::query(
                    r#"
                    INSERT INTO pessoas (nome, data_nascimento, cpf, email)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(&pessoa.nome)
                .bind(pessoa.data_nascimento)
                .bind(&pessoa.cpf)
                .bind(&pessoa.email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("insert_pessoa", e))?;

                let id: i64 = row
                    .try_get("id")
                    .map_err(|e| RepositoryError::Backend(format!("failed to read id: {e}")))?;
                Ok(pessoa.with_id(PessoaId::new(id)))
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE pessoas
                    SET nome = $1, data_nascimento = $2, cpf = $3, email = $4
                    WHERE id = $5
                    "#,
                )
                .bind(&pessoa.nome)
                .bind(pessoa.data_nascimento)
                .bind(&pessoa.cpf)
                .bind(&pessoa.email)
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("update_pessoa", e))?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }
                Ok(pessoa)
            }
        }
    }

    #[instrument(skip(self, pessoa), fields(pessoa_id = ?pessoa.id))]
    async fn delete(&self, pessoa: &Pessoa) -> Result<(), RepositoryError> {
        let Some(id) = pessoa.id() else {
            return Ok(());
        };

        sqlx::query("DELETE FROM pessoas WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_pessoa", e))?;
        Ok(())
    }
}

fn pessoa_from_row(row: &PgRow) -> Result<Pessoa, RepositoryError> {
    let read = |column: &str, e: sqlx::Error| {
        RepositoryError::Backend(format!("failed to read {column}: {e}"))
    };

    let id: i64 = row.try_get("id").map_err(|e| read("id", e))?;
    let nome: String = row.try_get("nome").map_err(|e| read("nome", e))?;
    let data_nascimento: NaiveDate = row
        .try_get("data_nascimento")
        .map_err(|e| read("data_nascimento", e))?;
    let cpf: String = row.try_get("cpf").map_err(|e| read("cpf", e))?;
    let email: String = row.try_get("email").map_err(|e| read("email", e))?;

    Ok(Pessoa::new(nome, data_nascimento, cpf, email).with_id(PessoaId::new(id)))
}

/// Map SQLx errors to RepositoryError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                Some(code) if code.as_ref() == "23505" => {
                    let constraint = db_err.constraint().unwrap_or("unknown constraint");
                    RepositoryError::UniqueViolation(format!("{constraint} ({operation})"))
                }
                _ => RepositoryError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Backend(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Backend(format!("connection pool timed out in {}", operation))
        }
        _ => RepositoryError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}
