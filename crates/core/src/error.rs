//! Domain error model.

use thiserror::Error;

/// Message carried by every lookup miss (`find_by_id`, `update`, `delete`).
pub const PESSOA_NOT_FOUND: &str = "Usuario nao encontrado";

/// Message for a uniqueness violation while creating a record.
pub const FAILED_SAVE_ON_CREATE: &str = "Falha ao salvar, email ou cpf ja cadastrados";

/// Message for a uniqueness violation while updating a record.
pub const FAILED_SAVE_ON_UPDATE: &str = "Falha ao atualizar, email ou cpf ja cadastrados";

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// `NotFound` and `FailedSave` render their message verbatim; callers surface it
/// to clients unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A lookup by id yielded nothing.
    #[error("{0}")]
    NotFound(String),

    /// Persisting would violate a uniqueness constraint of the store.
    #[error("{0}")]
    FailedSave(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn failed_save(msg: impl Into<String>) -> Self {
        Self::FailedSave(msg.into())
    }

    /// The canonical "record does not exist" error.
    pub fn pessoa_not_found() -> Self {
        Self::not_found(PESSOA_NOT_FOUND)
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::InvalidId(msg)
            | Self::NotFound(msg)
            | Self::FailedSave(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_message_verbatim() {
        let err = DomainError::pessoa_not_found();
        assert_eq!(err.to_string(), "Usuario nao encontrado");
        assert_eq!(err.message(), "Usuario nao encontrado");
    }

    #[test]
    fn failed_save_displays_message_verbatim() {
        let err = DomainError::failed_save(FAILED_SAVE_ON_UPDATE);
        assert_eq!(
            err.to_string(),
            "Falha ao atualizar, email ou cpf ja cadastrados"
        );
    }

    #[test]
    fn validation_keeps_prefix_in_display_only() {
        let err = DomainError::validation("nome must not be empty");
        assert_eq!(err.to_string(), "validation failed: nome must not be empty");
        assert_eq!(err.message(), "nome must not be empty");
    }
}
