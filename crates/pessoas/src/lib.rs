//! Pessoa domain module (people registry).
//!
//! This crate contains the Pessoa entity and its partial-update rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod pessoa;

pub use pessoa::{NewPessoa, Pessoa, PessoaPatch};
