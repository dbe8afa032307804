use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::EmployeeId,
    protocol::SortSpec,
    records::{Department, Employee, EmployeeDraft, EmployeeStatus},
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct SeenRequest {
    path: String,
    query: HashMap<String, String>,
    authorization: Option<String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct ServerState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

fn employee_json(id: &str, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        "position": "Engineer",
        "department": "engineering",
        "status": "active"
    })
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn list_employees(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.seen.lock().await.push(SeenRequest {
        path: "/api/employees".to_string(),
        query,
        authorization: authorization(&headers),
        body: None,
    });
    Json(json!({
        "content": [employee_json("1", "John", "Doe"), employee_json("2", "Jane", "Smith")],
        "totalElements": 2,
        "totalPages": 1
    }))
}

async fn employee_stats() -> Json<Value> {
    Json(json!({ "total": 5, "active": 4, "on_leave": 1 }))
}

async fn create_employee(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": "Email already in use" })),
        );
    }
    (StatusCode::CREATED, Json(employee_json("9", "New", "Hire")))
}

async fn update_employee(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.seen.lock().await.push(SeenRequest {
        path: format!("/api/employees/{id}"),
        query: HashMap::new(),
        authorization: authorization(&headers),
        body: Some(body.clone()),
    });
    if id != "1" {
        return (StatusCode::NOT_FOUND, Json(json!({})));
    }
    let mut updated = employee_json("1", "John", "Doe");
    updated["email"] = body["email"].clone();
    (StatusCode::OK, Json(updated))
}

async fn delete_employee(Path(id): Path<String>) -> StatusCode {
    if id == "1" {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn spawn_admin_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/stats", get(employee_stats))
        .route(
            "/api/employees/:id",
            delete(delete_employee).put(update_employee),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn sample_draft(email: &str) -> EmployeeDraft {
    EmployeeDraft {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        position: "Engineer".to_string(),
        department: Department::Engineering,
        status: EmployeeStatus::Active,
        ..EmployeeDraft::default()
    }
}

#[tokio::test]
async fn list_sends_query_parameters_and_bearer_token() {
    let (base_url, state) = spawn_admin_server().await;
    let client = HttpResourceClient::new(&base_url).expect("client");
    let session = Session::with_token("token-123");
    let params = ListParams {
        page: Some(1),
        size: Some(20),
        search: Some("jane".to_string()),
        category: Some("engineering".to_string()),
        status: None,
        sort: Some(SortSpec::asc("lastName")),
    };

    let page: Page<Employee> = client.list(&session, &params).await.expect("list");

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[1].first_name, "Jane");
    assert_eq!(page.total_elements, 2);

    let seen = state.seen.lock().await;
    let request = seen.first().expect("request recorded");
    assert_eq!(request.path, "/api/employees");
    assert_eq!(request.authorization.as_deref(), Some("Bearer token-123"));
    assert_eq!(request.query.get("page").map(String::as_str), Some("1"));
    assert_eq!(request.query.get("size").map(String::as_str), Some("20"));
    assert_eq!(request.query.get("search").map(String::as_str), Some("jane"));
    assert_eq!(
        request.query.get("category").map(String::as_str),
        Some("engineering")
    );
    assert_eq!(
        request.query.get("sort").map(String::as_str),
        Some("lastName,asc")
    );
    assert!(!request.query.contains_key("status"));
}

#[tokio::test]
async fn anonymous_session_sends_no_authorization_header() {
    let (base_url, state) = spawn_admin_server().await;
    let client = HttpResourceClient::new(&base_url).expect("client");

    let _: Page<Employee> = client
        .list(&Session::anonymous(), &ListParams::default())
        .await
        .expect("list");

    let seen = state.seen.lock().await;
    assert_eq!(seen[0].authorization, None);
}

#[tokio::test]
async fn pending_session_fails_before_sending() {
    // Nothing listens here; a sent request would surface as a transport failure.
    let client = HttpResourceClient::new("http://127.0.0.1:9").expect("client");

    let result: Result<Page<Employee>, _> = client
        .list(&Session::pending(), &ListParams::default())
        .await;

    assert_eq!(result, Err(ApiFailure::TokenPending));
}

#[tokio::test]
async fn stats_are_decoded_from_counter_map() {
    let (base_url, _) = spawn_admin_server().await;
    let client = HttpResourceClient::new(&base_url).expect("client");

    let stats = ResourceApi::<Employee>::stats(&client, &Session::with_token("t"))
        .await
        .expect("stats");

    assert_eq!(stats.total(), 5);
    assert_eq!(stats.get("on_leave"), Some(1));
}

#[tokio::test]
async fn create_surfaces_validation_detail() {
    let (base_url, _) = spawn_admin_server().await;
    let client = HttpResourceClient::new(&base_url).expect("client");
    let session = Session::with_token("t");

    let created: Employee = client
        .create(&session, &sample_draft("new.hire@example.com"))
        .await
        .expect("create");
    assert_eq!(created.id, EmployeeId::new("9"));

    let rejected: Result<Employee, _> = client
        .create(&session, &sample_draft("taken@example.com"))
        .await;
    assert_eq!(
        rejected,
        Err(ApiFailure::Validation {
            status: 422,
            detail: "Email already in use".to_string(),
        })
    );
}

#[tokio::test]
async fn update_puts_draft_to_record_path() {
    let (base_url, state) = spawn_admin_server().await;
    let client = HttpResourceClient::new(&base_url).expect("client");
    let session = Session::with_token("t");

    let updated: Employee = client
        .update(&session, &EmployeeId::new("1"), &sample_draft("john@corp.example"))
        .await
        .expect("update");
    assert_eq!(updated.email, "john@corp.example");

    let seen = state.seen.lock().await;
    assert_eq!(seen[0].path, "/api/employees/1");
    let body = seen[0].body.as_ref().expect("body");
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["department"], "engineering");
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let (base_url, _) = spawn_admin_server().await;
    let client = HttpResourceClient::new(&base_url).expect("client");

    let result: Result<Employee, _> = client
        .update(
            &Session::with_token("t"),
            &EmployeeId::new("404"),
            &sample_draft("x@example.com"),
        )
        .await;

    assert_eq!(result, Err(ApiFailure::NotFound { detail: None }));
}

#[tokio::test]
async fn delete_accepts_empty_success_body() {
    let (base_url, _) = spawn_admin_server().await;
    let client = HttpResourceClient::new(&base_url).expect("client");
    let session = Session::with_token("t");

    ResourceApi::<Employee>::delete(&client, &session, &EmployeeId::new("1"))
        .await
        .expect("delete");

    let failed = ResourceApi::<Employee>::delete(&client, &session, &EmployeeId::new("2")).await;
    assert_eq!(failed, Err(ApiFailure::Status { status: 500 }));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpResourceClient::new(&format!("http://{addr}")).expect("client");
    let result: Result<Page<Employee>, _> = client
        .list(&Session::with_token("t"), &ListParams::default())
        .await;

    assert!(matches!(result, Err(ApiFailure::Transport(_))));
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = HttpResourceClient::new("https://admin.example.com/backend/").expect("client");
    let url = client
        .endpoint(ResourceKind::Media, &["42"])
        .expect("endpoint");
    assert_eq!(url.as_str(), "https://admin.example.com/backend/api/media/42");
}

#[test]
fn failure_mapping_follows_status_and_detail() {
    assert_eq!(
        failure_from_response(StatusCode::UNAUTHORIZED, ""),
        ApiFailure::Unauthenticated
    );
    assert_eq!(
        failure_from_response(StatusCode::FORBIDDEN, r#"{"detail":"Admins only"}"#),
        ApiFailure::Forbidden {
            detail: Some("Admins only".to_string())
        }
    );
    assert_eq!(
        failure_from_response(StatusCode::BAD_REQUEST, r#"{"message":"Name is required"}"#),
        ApiFailure::Validation {
            status: 400,
            detail: "Name is required".to_string(),
        }
    );
    assert_eq!(
        failure_from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
        ApiFailure::Status { status: 502 }
    );
}
