use std::sync::Arc;

use cadastro_api::app::{build_app, AppServices};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        cadastro_observability::init();

        // Same router as prod, in-memory store, ephemeral port.
        let app = build_app(Arc::new(AppServices::in_memory()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn joao() -> serde_json::Value {
    json!({
        "nome": "João",
        "dataNascimento": "1995-08-20",
        "cpf": "123.456.789-00",
        "email": "joao@email.com",
    })
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn pessoa_lifecycle_create_read_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Create
    let res = client.post(srv.url("/pessoas")).json(&joao()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["nome"], "João");
    let id = created["id"].as_i64().unwrap();

    // Read (round trip)
    let res = client
        .get(srv.url(&format!("/pessoas/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);

    // Partial update
    let res = client
        .put(srv.url(&format!("/pessoas/{id}")))
        .json(&json!({ "nome": "Novo Nome" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["nome"], "Novo Nome");
    assert_eq!(updated["cpf"], created["cpf"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["dataNascimento"], created["dataNascimento"]);

    // List
    let res = client.get(srv.url("/pessoas")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let items: serde_json::Value = res.json().await.unwrap();
    assert_eq!(items.as_array().unwrap().len(), 1);

    // Delete
    let res = client
        .delete(srv.url(&format!("/pessoas/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url(&format!("/pessoas/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Usuario nao encontrado");
}

#[tokio::test]
async fn duplicate_cpf_or_email_is_conflict_with_call_site_message() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.post(srv.url("/pessoas")).json(&joao()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let maria = json!({
        "nome": "Maria",
        "dataNascimento": "1990-02-11",
        "cpf": "987.654.321-00",
        "email": "maria@email.com",
    });
    let res = client.post(srv.url("/pessoas")).json(&maria).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let maria_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    // Same cpf on create.
    let mut clone = joao();
    clone["email"] = json!("outro@email.com");
    let res = client.post(srv.url("/pessoas")).json(&clone).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "failed_save");
    assert_eq!(body["message"], "Falha ao salvar, email ou cpf ja cadastrados");

    // Maria takes João's email on update.
    let res = client
        .put(srv.url(&format!("/pessoas/{maria_id}")))
        .json(&json!({ "email": "joao@email.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Falha ao atualizar, email ou cpf ja cadastrados");
}

#[tokio::test]
async fn missing_and_malformed_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/pessoas/1"))
        .json(&json!({ "nome": "Novo Nome" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(srv.url("/pessoas/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(srv.url("/pessoas/not-a-number")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreadable_bodies_get_the_json_error_shape() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Missing dataNascimento.
    let res = client
        .post(srv.url("/pessoas"))
        .json(&json!({ "nome": "João", "cpf": "1", "email": "j@email.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].is_string());

    // Syntactically broken JSON on update.
    let res = client
        .put(srv.url("/pessoas/1"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // No content type at all.
    let res = client
        .post(srv.url("/pessoas"))
        .body(joao().to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn zero_and_negative_ids_are_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/pessoas/0")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(srv.url("/pessoas/-1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
