mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use leads_backend::{config::AppState, create_router};

use common::{header as sheet_header, row, FakeSource};

fn app_with(source: Arc<FakeSource>) -> Router {
    create_router(AppState::with_source(source))
}

fn app() -> Router {
    app_with(FakeSource::with_grid(vec![sheet_header()]))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>, lang: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(lang) = lang {
        builder = builder.header(header::ACCEPT_LANGUAGE, lang);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, lead) = send(app, Method::POST, "/api/leads", Some(body), None).await;
    assert_eq!(status, StatusCode::CREATED, "{lead}");
    lead
}

#[tokio::test]
async fn health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_fills_defaults() {
    let app = app();
    let lead = create(&app, json!({ "name": "João Silva", "proposalValue": 1500 })).await;

    assert_eq!(lead["company"], "—");
    assert_eq!(lead["source"], "Manual");
    assert_eq!(lead["status"], "novo");
    assert_eq!(lead["pipeline_stage"], "prospecto");
    assert_eq!(lead["proposalValue"].as_f64(), Some(1500.0));

    let id = lead["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/leads/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "João Silva");
}

#[tokio::test]
async fn invalid_payload_reports_field_details() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/leads",
        Some(json!({ "name": "", "email": "nope", "value": -1 })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_object().unwrap();
    assert!(details.contains_key("name"));
    assert!(details.contains_key("email"));
    assert!(details.contains_key("value"));
}

#[tokio::test]
async fn creating_a_discarded_lead_is_rejected() {
    let (status, _) = send(
        &app(),
        Method::POST,
        "/api/leads",
        Some(json!({ "name": "X", "status": "descartado" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn lost_without_notes_is_422_in_the_client_language() {
    let app = app();
    let lead = create(&app, json!({ "name": "Pedro" })).await;
    let id = lead["id"].as_str().unwrap();
    let uri = format!("/api/leads/{id}/stage");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "stage": "perdido" })), Some("pt-BR,pt;q=0.9")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Para marcar como perdido, é necessário adicionar uma observação.");

    let (_, still) = send(&app, Method::GET, &format!("/api/leads/{id}"), None, None).await;
    assert_eq!(still["pipeline_stage"], "prospecto");

    let (status, _) = send(&app, Method::PATCH, &format!("/api/leads/{id}"), Some(json!({ "notes": "price too high" })), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, moved) = send(&app, Method::PUT, &uri, Some(json!({ "stage": "perdido", "lossReason": "Preço" })), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["pipeline_stage"], "perdido");
    assert_eq!(moved["lossReason"], "Preço");
}

#[tokio::test]
async fn status_changes_and_discard() {
    let app = app();
    let lead = create(&app, json!({ "name": "Ana" })).await;
    let id = lead["id"].as_str().unwrap();
    let uri = format!("/api/leads/{id}/status");

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({ "status": "potencial" })), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "potencial");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "status": "descartado" })), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/api/leads/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("Lead not found: {id}"));
}

#[tokio::test]
async fn unknown_ids_are_404() {
    let app = app();
    for (method, uri, body) in [
        (Method::GET, "/api/leads/missing", None),
        (Method::PATCH, "/api/leads/missing", Some(json!({ "name": "x" }))),
        (Method::DELETE, "/api/leads/missing", None),
        (Method::PUT, "/api/leads/missing/status", Some(json!({ "status": "potencial" }))),
        (Method::PUT, "/api/leads/missing/stage", Some(json!({ "stage": "fechado" }))),
    ] {
        let (status, _) = send(&app, method.clone(), uri, body, Some("pt")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
    }
}

#[tokio::test]
async fn pipeline_board_and_summary() {
    let app = app();
    create(&app, json!({ "name": "A", "pipeline_stage": "proposta", "value": 300, "proposalValue": 1000 })).await;
    create(&app, json!({ "name": "B", "pipeline_stage": "fechado", "proposalValue": 500 })).await;
    create(&app, json!({ "name": "C", "pipeline_stage": "perdido", "proposalValue": 9000 })).await;

    let (status, board) = send(&app, Method::GET, "/api/pipeline", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let columns = board.as_array().unwrap();
    assert_eq!(columns.len(), 6);
    assert_eq!(columns[0]["stage"], "prospecto");
    assert_eq!(columns[2]["count"], 1);
    assert_eq!(columns[2]["totalValue"].as_f64(), Some(1000.0));

    let (_, column) = send(&app, Method::GET, "/api/pipeline/stages/fechado", None, None).await;
    assert_eq!(column["leads"].as_array().unwrap().len(), 1);

    let (_, summary) = send(&app, Method::GET, "/api/pipeline/summary", None, None).await;
    assert_eq!(summary["conversionRate"], 50);
    assert_eq!(summary["activeValue"].as_f64(), Some(1500.0));
    assert_eq!(summary["negotiationValue"].as_f64(), Some(300.0));
    assert_eq!(summary["closedValue"].as_f64(), Some(500.0));

    let (_, stats) = send(&app, Method::GET, "/api/dashboard/stats", None, None).await;
    assert_eq!(stats["status"]["total"], 3);
    assert_eq!(stats["activeLeads"], 2);
}

#[tokio::test]
async fn list_supports_search_and_status() {
    let app = app();
    create(&app, json!({ "name": "João", "company": "TechCorp" })).await;
    create(&app, json!({ "name": "Ana", "status": "potencial" })).await;

    let (_, all) = send(&app, Method::GET, "/api/leads", None, None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, found) = send(&app, Method::GET, "/api/leads?search=tech", None, None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (_, potencial) = send(&app, Method::GET, "/api/leads?status=potencial", None, None).await;
    assert_eq!(potencial[0]["name"], "Ana");
}

#[tokio::test]
async fn sync_replaces_leads_and_failures_are_502() {
    let source = FakeSource::with_grid(vec![sheet_header(), row(&["Acme Corp", "(11) 90000-0000"])]);
    let app = app_with(source.clone());
    create(&app, json!({ "name": "Manual" })).await;

    let (status, report) = send(&app, Method::POST, "/api/sync", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["imported"], 1);

    let (_, leads) = send(&app, Method::GET, "/api/leads", None, None).await;
    assert_eq!(leads.as_array().unwrap().len(), 1);
    assert_eq!(leads[0]["source"], "Google Sheets");

    source.set_failing(true);
    let (status, body) = send(&app, Method::POST, "/api/sync", None, Some("pt")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().starts_with("Falha ao buscar leads do Sheets"));

    let (_, leads) = send(&app, Method::GET, "/api/leads", None, None).await;
    assert_eq!(leads.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn amounts_are_capped_so_totals_stay_available() {
    let app = app();
    for _ in 0..2 {
        let (status, body) = send(&app, Method::POST, "/api/leads", Some(json!({ "name": "Big", "proposalValue": 5e28 })), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].as_object().unwrap().contains_key("proposalValue"));
    }

    create(&app, json!({ "name": "A", "proposalValue": 1_000_000_000_000_000i64 })).await;
    create(&app, json!({ "name": "B", "proposalValue": 1_000_000_000_000_000i64 })).await;

    for uri in ["/api/pipeline", "/api/pipeline/summary", "/api/pipeline/stages/prospecto", "/api/dashboard/stats"] {
        let (status, _) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
    let (_, summary) = send(&app, Method::GET, "/api/pipeline/summary", None, None).await;
    assert_eq!(summary["activeValue"].as_f64(), Some(2e15));
}

#[tokio::test]
async fn creating_a_lost_lead_requires_notes() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/api/leads", Some(json!({ "name": "X", "pipeline_stage": "perdido" })), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let lead = create(&app, json!({ "name": "X", "pipeline_stage": "perdido", "notes": "preço" })).await;
    assert_eq!(lead["pipeline_stage"], "perdido");
}

#[tokio::test]
async fn blank_names_are_rejected_and_tier_filter_works() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/leads", Some(json!({ "name": "   " })), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_object().unwrap().contains_key("name"));

    create(&app, json!({ "name": "Quente", "score": 92 })).await;
    create(&app, json!({ "name": "Frio", "score": 20 })).await;
    let (_, hot) = send(&app, Method::GET, "/api/leads?tier=alto", None, None).await;
    assert_eq!(hot.as_array().unwrap().len(), 1);
    assert_eq!(hot[0]["name"], "Quente");
}
