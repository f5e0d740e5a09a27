use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cadastro_core::{DomainError, DomainResult, Entity, PessoaId};

/// A registered person.
///
/// `cpf` and `email` are unique across all persisted records; the store enforces
/// that, not this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pessoa {
    #[serde(default)]
    pub id: Option<PessoaId>,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub cpf: String,
    pub email: String,
}

impl Pessoa {
    /// Create a not-yet-persisted record (no id).
    pub fn new(
        nome: impl Into<String>,
        data_nascimento: NaiveDate,
        cpf: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            nome: nome.into(),
            data_nascimento,
            cpf: cpf.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: PessoaId) -> Self {
        self.id = Some(id);
        self
    }

    /// Apply a partial update, returning the merged record.
    ///
    /// Fields present in `patch` overwrite; everything else (including `id`) is kept.
    pub fn merged(&self, patch: &PessoaPatch) -> Pessoa {
        Pessoa {
            id: self.id,
            nome: present(&patch.nome).unwrap_or(&self.nome).to_string(),
            data_nascimento: patch.data_nascimento.unwrap_or(self.data_nascimento),
            cpf: present(&patch.cpf).unwrap_or(&self.cpf).to_string(),
            email: present(&patch.email).unwrap_or(&self.email).to_string(),
        }
    }
}

impl Entity for Pessoa {
    type Id = PessoaId;

    fn id(&self) -> Option<PessoaId> {
        self.id
    }
}

/// Partial update payload. Missing, null and empty strings leave the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PessoaPatch {
    pub nome: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
    pub cpf: Option<String>,
    pub email: Option<String>,
}

impl PessoaPatch {
    pub fn nome(mut self, nome: impl Into<String>) -> Self {
        self.nome = Some(nome.into());
        self
    }

    pub fn data_nascimento(mut self, data_nascimento: NaiveDate) -> Self {
        self.data_nascimento = Some(data_nascimento);
        self
    }

    pub fn cpf(mut self, cpf: impl Into<String>) -> Self {
        self.cpf = Some(cpf.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// True when applying this patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        present(&self.nome).is_none()
            && self.data_nascimento.is_none()
            && present(&self.cpf).is_none()
            && present(&self.email).is_none()
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Create payload. Any client-supplied `id` is dropped; the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPessoa {
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub cpf: String,
    pub email: String,
}

impl NewPessoa {
    /// Validate required fields and build an unsaved `Pessoa`.
    pub fn into_pessoa(self) -> DomainResult<Pessoa> {
        for (field, value) in [("nome", &self.nome), ("cpf", &self.cpf), ("email", &self.email)] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} must not be empty")));
            }
        }
        Ok(Pessoa::new(self.nome, self.data_nascimento, self.cpf, self.email))
    }
}
