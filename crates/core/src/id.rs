//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a Pessoa record.
///
/// Assigned by the store (a `BIGSERIAL` in Postgres, a counter in memory).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PessoaId(i64);

impl PessoaId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for PessoaId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for PessoaId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PessoaId> for i64 {
    fn from(value: PessoaId) -> Self {
        value.0
    }
}

impl FromStr for PessoaId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = i64::from_str(s.trim())
            .map_err(|e| DomainError::invalid_id(format!("PessoaId: {e}")))?;
        Ok(Self(value))
    }
}
