use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceExt;

use commeria::config::{AppConfig, PromptProfile};
use commeria::db;
use commeria::services::ai::LlmProvider;
use commeria::services::catalog::CatalogClient;
use commeria::state::AppState;

// ── Mock Providers ──

struct MockLlm {
    prompts: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn invoke(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            anyhow::bail!("model offline");
        }
        Ok("Tenemos el Telefono X disponible.".to_string())
    }
}

// ── Helpers ──

fn test_config(catalog_url: &str) -> AppConfig {
    AppConfig {
        port: 3009,
        database_url: ":memory:".to_string(),
        ollama_url: "http://localhost:11434".to_string(),
        ollama_model: "mistral".to_string(),
        catalog_url: catalog_url.to_string(),
        prompt_profile: PromptProfile::Catalog,
        form_url: "http://localhost:3000/#/tabspills".to_string(),
        catalog_timeout: Duration::from_secs(5),
        llm_timeout: Duration::from_secs(5),
    }
}

/// A base URL where nothing is listening.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn catalog_server() -> String {
    let app = Router::new().route(
        "/productos",
        get(|| async {
            Json(serde_json::json!({"productos": [
                {"nombre": "Telefono X", "precio": 299},
                {"nombre": "Audífonos Z", "precio": 49.5}
            ]}))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn build_state(catalog_url: &str, fail_llm: bool) -> (Arc<AppState>, Arc<Mutex<Vec<String>>>) {
    let config = test_config(catalog_url);
    let conn = db::init_db(":memory:").unwrap();
    let prompts = Arc::new(Mutex::new(vec![]));
    let catalog = CatalogClient::new(config.catalog_url.clone(), config.catalog_timeout).unwrap();
    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config,
        llm: Box::new(MockLlm {
            prompts: Arc::clone(&prompts),
            fail: fail_llm,
        }),
        catalog,
    });
    (state, prompts)
}

async fn test_state() -> (Arc<AppState>, Arc<Mutex<Vec<String>>>) {
    build_state(&dead_url().await, false)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = commeria::router(Arc::clone(state)).oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ── Chat ──

#[tokio::test]
async fn test_chat_empty_message_rejected() {
    let (state, prompts) = test_state().await;

    let (status, json) = send(&state, post_json("/chat", r#"{"message":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "El campo 'message' está vacío o ausente");

    let (status, _) = send(&state, post_json("/chat", r#"{"usuario_id":"ana"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_invalid_json_rejected() {
    let (state, _) = test_state().await;

    let (status, json) = send(&state, post_json("/chat", "not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("invalid JSON body"));
}

#[tokio::test]
async fn test_chat_sell_intent_shows_form() {
    let (state, _) = test_state().await;

    let (status, json) = send(
        &state,
        post_json(
            "/chat",
            r#"{"message":"quiero comprar un telefono","usuario_id":"ana"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mostrar_formulario"], true);
    assert_eq!(json["response"], "Tenemos el Telefono X disponible.");

    let (status, stats) = send(&state, get_req("/estadisticas_objetivos")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_vender"], 1);
    assert_eq!(stats["cumplidos_vender"], 0);
}

#[tokio::test]
async fn test_chat_inquiry_does_not_show_form() {
    let (state, _) = test_state().await;

    let (status, json) = send(
        &state,
        post_json("/chat", r#"{"message":"dame más información del telefono"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mostrar_formulario"], false);

    let (_, stats) = send(&state, get_req("/estadisticas_objetivos")).await;
    assert_eq!(stats["total_consultar"], 1);
}

#[tokio::test]
async fn test_chat_without_content_type() {
    let (state, _) = test_state().await;

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .body(Body::from(r#"{"message":"quiero agendar una cita"}"#))
        .unwrap();
    let (status, json) = send(&state, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mostrar_formulario"], true);
}

#[tokio::test]
async fn test_chat_logs_both_messages_under_default_user() {
    let (state, _) = test_state().await;

    send(&state, post_json("/chat", r#"{"message":"hola"}"#)).await;

    let (status, json) = send(&state, get_req("/historial/usuario_generico")).await;
    assert_eq!(status, StatusCode::OK);
    let mensajes = json["mensajes"].as_array().unwrap();
    assert_eq!(mensajes.len(), 2);
    assert_eq!(mensajes[0]["role"], "usuario");
    assert_eq!(mensajes[0]["text"], "hola");
    assert_eq!(mensajes[1]["role"], "bot");
    assert_eq!(mensajes[1]["text"], "Tenemos el Telefono X disponible.");
}

#[tokio::test]
async fn test_chat_survives_catalog_outage() {
    let (state, prompts) = test_state().await;

    let (status, json) = send(
        &state,
        post_json("/chat", r#"{"message":"quiero comprar un telefono"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mostrar_formulario"], true);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(
        "Productos disponibles:\nError: No se pudo conectar con la API de productos"
    ));
}

#[tokio::test]
async fn test_chat_includes_catalog_in_prompt() {
    let url = catalog_server().await;
    let (state, prompts) = build_state(&url, false);

    let (status, _) = send(&state, post_json("/chat", r#"{"message":"¿qué tienen?"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].starts_with("System: Eres un asistente de ventas en CommerIA."));
    assert!(prompts[0].contains("Human: ¿qué tienen?\n\nProductos disponibles:\nTelefono X - $299\nAudífonos Z - $49.5"));
    assert!(prompts[0].contains("\nAI: Para continuar con tu solicitud"));
}

#[tokio::test]
async fn test_chat_model_failure_is_500() {
    let url = dead_url().await;
    let (state, _) = build_state(&url, true);

    let (status, json) = send(&state, post_json("/chat", r#"{"message":"hola"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("model offline"));

    // nothing logged for a failed exchange
    let (_, history) = send(&state, get_req("/historial/usuario_generico")).await;
    assert_eq!(history["mensajes"].as_array().unwrap().len(), 0);
}

// ── Forms ──

#[tokio::test]
async fn test_form_submission_and_appointment_count() {
    let (state, _) = test_state().await;

    let forms = [
        r#"{"nombre":"Ana","cedula":"1","email":"a@x.com","numero":"099","producto":"Telefono X","agendarCita":"sí"}"#,
        r#"{"nombre":"Luis","cedula":"2","email":"l@x.com","numero":"098","producto":"Tablet","agendarCita":"no"}"#,
        r#"{"nombre":"Eva","cedula":3,"agendarCita":true}"#,
        r#"{"nombre":"Sin cita","cedula":"4"}"#,
    ];
    for form in forms {
        let (status, json) = send(&state, post_json("/enviar_formulario", form)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["message"],
            "Formulario recibido y almacenado correctamente"
        );
    }

    let (status, json) = send(&state, get_req("/estadisticas_citas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_citas"], 2);
}

#[tokio::test]
async fn test_form_resubmission_upserts() {
    let (state, _) = test_state().await;

    send(
        &state,
        post_json("/enviar_formulario", r#"{"cedula":"1","agendarCita":"sí"}"#),
    )
    .await;
    send(
        &state,
        post_json("/enviar_formulario", r#"{"cedula":"1","agendarCita":"no"}"#),
    )
    .await;

    let (_, json) = send(&state, get_req("/estadisticas_citas")).await;
    assert_eq!(json["total_citas"], 0);
}

#[tokio::test]
async fn test_appointment_count_empty() {
    let (state, _) = test_state().await;
    let (status, json) = send(&state, get_req("/estadisticas_citas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_citas"], 0);
}

// ── Objectives ──

#[tokio::test]
async fn test_complete_objective() {
    let (state, _) = test_state().await;

    send(
        &state,
        post_json("/chat", r#"{"message":"quiero agendar una cita","usuario_id":"ana"}"#),
    )
    .await;

    let (status, json) = send(
        &state,
        post_json("/completar_objetivo", r#"{"tipo":"agendar_cita","usuario_id":"ana"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Objetivo 'agendar_cita' cumplido para ana.");

    let (_, stats) = send(&state, get_req("/estadisticas_objetivos")).await;
    assert_eq!(stats["total_agendar"], 1);
    assert_eq!(stats["cumplidos_agendar"], 1);
}

#[tokio::test]
async fn test_complete_unknown_objective_type() {
    let (state, _) = test_state().await;

    let (status, _) = send(
        &state,
        post_json("/completar_objetivo", r#"{"tipo":"bailar"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Misc ──

#[tokio::test]
async fn test_health() {
    let (state, _) = test_state().await;
    let (status, json) = send(&state, get_req("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (state, _) = test_state().await;

    let req = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let res = commeria::router(state).oneshot(req).await.unwrap();

    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
