use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use forgefit_kvstore::InMemoryKeyValueStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use forgefit_server::adapter::handler;
use forgefit_server::infrastructure::config::Config;
use forgefit_server::infrastructure::startup::build_state;

const CONFIG: &str = r#"
app:
  name: forgefit-server
auth:
  admin:
    username: admin
    password: forgefit2024
  member:
    email: member@forgefit.com
    password: member123
"#;

fn app() -> Router {
    let cfg = Config::parse(CONFIG).unwrap();
    let state = build_state(&cfg, Arc::new(InMemoryKeyValueStore::new())).unwrap();
    handler::router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_as(app, None, method, uri, body).await
}

async fn send_as(
    app: &Router,
    token: Option<&str>,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn admin_login(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/admin/login",
        Some(json!({"username": "admin", "password": "forgefit2024"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn valid_user(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "datePurchased": "2024-03-01",
        "status": "Active",
    })
}

#[tokio::test]
async fn test_healthz_and_public_site_data() {
    let app = app();
    let (status, body) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/api/v1/site", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "ForgeFit Club");

    let (status, body) = send(&app, "GET", "/api/v1/checkout/pro", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 199);
    assert_eq!(body["features"].as_array().unwrap().len(), 6);

    let (status, body) = send(&app, "GET", "/api/v1/checkout/gold", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "SYS_FF_PLAN_NOT_FOUND");
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/admin/columns", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "SYS_FF_SESSION_REQUIRED");
    assert_eq!(body["error"]["details"]["redirect"], "/admin/login");

    let (status, _) = send(&app, "GET", "/api/v1/admin/session", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login_logout() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/admin/login",
        Some(json!({"username": "admin", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "SYS_FF_INVALID_CREDENTIALS");

    let token = admin_login(&app).await;
    let (status, body) =
        send_as(&app, Some(&token), "GET", "/api/v1/admin/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["realm"], "admin");
    assert_eq!(body["authenticated"], true);

    let (status, _) = send_as(&app, Some(&token), "POST", "/api/v1/admin/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_as(&app, Some(&token), "GET", "/api/v1/admin/stats", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_belongs_to_the_client_that_logged_in() {
    let app = app();
    let token = admin_login(&app).await;

    let (status, _) = send(&app, "GET", "/api/v1/admin/users/export", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/api/v1/admin/session", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let stranger = uuid::Uuid::new_v4().to_string();
    let (status, body) = send_as(&app, Some(&stranger), "GET", "/api/v1/admin/stats", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "SYS_FF_SESSION_REQUIRED");

    // 他人のログアウトは自分のセッションに影響しない
    let (status, _) = send_as(&app, Some(&stranger), "POST", "/api/v1/admin/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_as(&app, Some(&token), "GET", "/api/v1/admin/stats", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = app();
    let token = admin_login(&app).await;

    let (status, body) = send_as(
        &app,
        Some(&token),
        "POST",
        "/api/v1/admin/users",
        Some(valid_user("Ann", "not-an-email")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"]["email"], "Please enter a valid email");

    let (status, ann) = send_as(
        &app,
        Some(&token),
        "POST",
        "/api/v1/admin/users",
        Some(valid_user("Ann", "ann@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let ann_id = ann["id"].as_str().unwrap().to_string();

    let (status, _) = send_as(
        &app,
        Some(&token),
        "POST",
        "/api/v1/admin/users",
        Some(valid_user("Bob", "bob@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        send_as(&app, Some(&token), "GET", "/api/v1/admin/users?search=ANN", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Ann");

    let mut updated = valid_user("Annie", "ann@example.com");
    updated["status"] = json!("Inactive");
    let (status, body) = send_as(
        &app,
        Some(&token),
        "PUT",
        &format!("/api/v1/admin/users/{ann_id}"),
        Some(updated),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ann_id.as_str());
    assert_eq!(body["name"], "Annie");

    let (status, _) = send_as(
        &app,
        Some(&token),
        "PUT",
        "/api/v1/admin/users/missing",
        Some(valid_user("X", "x@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_as(&app, Some(&token), "GET", "/api/v1/admin/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 2);
    assert_eq!(body["active_members"], 1);
    assert_eq!(body["data_columns"], 4);

    let uri = format!("/api/v1/admin/users/{ann_id}");
    let (status, body) = send_as(&app, Some(&token), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "SYS_FF_CONFIRMATION_REQUIRED");

    let confirmed = format!("{uri}?confirm=true");
    let (status, _) = send_as(&app, Some(&token), "DELETE", &confirmed, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_as(&app, Some(&token), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_downloads_all_users() {
    let app = app();
    let token = admin_login(&app).await;
    for (name, email) in [("Ann", "ann@example.com"), ("Bob", "bob@example.com")] {
        let (status, _) = send_as(
            &app,
            Some(&token),
            "POST",
            "/api/v1/admin/users",
            Some(valid_user(name, email)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = Request::builder()
        .uri("/api/v1/admin/users/export?search=Ann")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"forgefit-users.json\""
    );
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let users: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn test_column_management() {
    let app = app();
    let token = admin_login(&app).await;

    let (status, columns) =
        send_as(&app, Some(&token), "GET", "/api/v1/admin/columns", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(columns.as_array().unwrap().len(), 4);

    let (status, body) = send_as(
        &app,
        Some(&token),
        "DELETE",
        "/api/v1/admin/columns/email?confirm=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SYS_FF_COLUMN_PROTECTED");

    let (status, column) = send_as(
        &app,
        Some(&token),
        "POST",
        "/api/v1/admin/columns",
        Some(json!({"name": "Goal", "type": "select", "options": "Strength, Cardio,,"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(column["options"], json!(["Strength", "Cardio"]));
    let goal_id = column["id"].as_str().unwrap().to_string();

    let mut user = valid_user("Ann", "ann@example.com");
    user[goal_id.as_str()] = json!("Cardio");
    let (status, created) =
        send_as(&app, Some(&token), "POST", "/api/v1/admin/users", Some(user)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created[goal_id.as_str()], "Cardio");
    let user_uri = format!("/api/v1/admin/users/{}", created["id"].as_str().unwrap());

    let (status, _) = send_as(
        &app,
        Some(&token),
        "DELETE",
        &format!("/api/v1/admin/columns/{goal_id}?confirm=true"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = send_as(&app, Some(&token), "GET", &user_uri, None).await;
    assert!(fetched.get(goal_id.as_str()).is_none());

    let (status, renamed) = send_as(
        &app,
        Some(&token),
        "PUT",
        "/api/v1/admin/columns/name",
        Some(json!({"name": "Full Name"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Full Name");
}

#[tokio::test]
async fn test_member_dashboard() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/member/programs", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["details"]["redirect"], "/login");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/member/login",
        Some(json!({"email": "member", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"]["email"], "Please enter a valid email");
    assert_eq!(body["error"]["details"]["password"], "Password is required");

    let (status, login) = send(
        &app,
        "POST",
        "/api/v1/member/login",
        Some(json!({"email": "member@forgefit.com", "password": "member123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap().to_string();

    let (status, programs) =
        send_as(&app, Some(&token), "GET", "/api/v1/member/programs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(programs.as_array().unwrap().len(), 6);

    let (status, workouts) = send_as(
        &app,
        Some(&token),
        "GET",
        "/api/v1/member/programs/strength-foundation/workouts",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(workouts.as_array().unwrap().len(), 12);

    // 管理者セッションとは独立している
    let (status, _) = send_as(&app, Some(&token), "GET", "/api/v1/admin/columns", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
