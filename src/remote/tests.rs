use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::types::ReportedStatus;

fn status_row(agent_id: &str, status: ReportedStatus, updated_at: &str) -> AgentStatusRow {
    AgentStatusRow {
        agent_id: agent_id.to_string(),
        status,
        current_task: None,
        last_activity: None,
        updated_at: updated_at.to_string(),
    }
}

fn usage(agent: &str, recorded_at: Option<&str>, tokens: u64) -> TokenUsage {
    TokenUsage {
        id: json!(recorded_at),
        agent_id: Some(agent.to_string()),
        model: Some("sonnet".to_string()),
        input_tokens: Some(tokens),
        output_tokens: Some(0),
        cost_usd: None,
        recorded_at: recorded_at.map(str::to_string),
    }
}

// ── PostgREST client ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upsert_sends_merge_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/agent_status"))
        .and(query_param("on_conflict", "agent_id"))
        .and(header("apikey", "test-key"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::new(&server.uri(), "test-key").unwrap();
    store
        .upsert_agent_status(status_row("main", ReportedStatus::Working, "2026-01-01T00:00:00Z"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let prefer = requests[0]
        .headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(prefer.contains("resolution=merge-duplicates"));

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body[0]["agent_id"], "main");
    assert_eq!(body[0]["status"], "working");
    assert_eq!(body[0]["updated_at"], "2026-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/agent_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::new(&format!("{}/", server.uri()), "k").unwrap();
    assert!(store.list_agent_status().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_tasks_applies_filters_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("select", "*"))
        .and(query_param("status", "eq.in_progress"))
        .and(query_param("limit", "10"))
        .and(query_param("order", "updated_at.desc.nullslast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Wire dashboard", "status": "in_progress"},
            {"id": "b2", "title": "Fix cron", "status": "in_progress", "assignee": "coder"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::new(&server.uri(), "k").unwrap();
    let query = ListQuery::new().limit(10).eq("status", Some("in_progress"));
    let tasks = store.list_tasks(&query).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].assignee.as_deref(), Some("coder"));
}

#[tokio::test]
async fn test_error_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/activity_log"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let store = PostgrestStore::new(&server.uri(), "k").unwrap();
    let err = store.list_activity(&ListQuery::new()).await.unwrap_err();
    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unexpected_payload_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/knowledge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&server)
        .await;

    let store = PostgrestStore::new(&server.uri(), "k").unwrap();
    let err = store.list_knowledge(&ListQuery::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_store_is_request_error() {
    // Bind then drop a listener so the port is closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = PostgrestStore::new(&format!("http://{addr}"), "k").unwrap();
    let err = store.list_token_usage(&ListQuery::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::Request(_)));
}

// ── Memory store ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_memory_upsert_is_last_write_wins() {
    let store = MemoryStore::new();
    store
        .upsert_agent_status(status_row("main", ReportedStatus::Working, "t1"))
        .await
        .unwrap();
    store
        .upsert_agent_status(status_row("main", ReportedStatus::Idle, "t2"))
        .await
        .unwrap();
    store
        .upsert_agent_status(status_row("coder", ReportedStatus::Unknown, "t3"))
        .await
        .unwrap();

    let rows = store.list_agent_status().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].agent_id, "coder");
    assert_eq!(rows[1].agent_id, "main");
    assert_eq!(rows[1].status, ReportedStatus::Idle);
    assert_eq!(rows[1].updated_at, "t2");
}

#[tokio::test]
async fn test_memory_select_filters_orders_and_limits() {
    let store = MemoryStore::new().with_token_usage(vec![
        usage("main", Some("2026-01-01T00:00:00Z"), 1),
        usage("coder", Some("2026-01-03T00:00:00Z"), 2),
        usage("main", None, 3),
        usage("main", Some("2026-01-02T00:00:00Z"), 4),
    ]);

    let rows = store
        .list_token_usage(&ListQuery::new().eq("agent_id", Some("main")))
        .await
        .unwrap();
    let tokens: Vec<u64> = rows.iter().filter_map(|r| r.input_tokens).collect();
    assert_eq!(tokens, vec![4, 1, 3]);

    let limited = store
        .list_token_usage(&ListQuery::new().limit(2))
        .await
        .unwrap();
    let tokens: Vec<u64> = limited.iter().filter_map(|r| r.input_tokens).collect();
    assert_eq!(tokens, vec![2, 4]);
}

#[test]
fn test_list_query_ignores_blank_filters() {
    let query = ListQuery::new()
        .eq("status", None)
        .eq("agent_id", Some("  "))
        .eq("category", Some("ops"));
    assert_eq!(query.eq, vec![("category".to_string(), "ops".to_string())]);
}
