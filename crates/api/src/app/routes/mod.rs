use axum::Router;

pub mod pessoas;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/pessoas", pessoas::router())
}
