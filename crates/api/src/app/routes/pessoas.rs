use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cadastro_core::PessoaId;
use cadastro_pessoas::{NewPessoa, PessoaPatch};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_pessoa).get(list_pessoas))
        .route("/:id", get(get_pessoa).put(update_pessoa).delete(delete_pessoa))
}

pub async fn create_pessoa(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewPessoa>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let pessoa = match body.into_pessoa() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.pessoas.save(pessoa).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_pessoas(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.pessoas.find_all().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_pessoa(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PessoaId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.pessoas.find_by_id(id).await {
        Ok(pessoa) => (StatusCode::OK, Json(pessoa)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_pessoa(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    patch: Result<Json<PessoaPatch>, JsonRejection>,
) -> axum::response::Response {
    let id: PessoaId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(patch) = match patch {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.pessoas.update(id, patch).await {
        Ok(pessoa) => (StatusCode::OK, Json(pessoa)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_pessoa(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PessoaId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.pessoas.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
