//! End-to-end tests for the REST API.
//!
//! Each test builds the full router against an in-memory database and
//! drives it in-process with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use sweetshop_api::{build_app, ApiConfig, AppState};
use sweetshop_db::{Database, DbConfig};

const PASSWORD: &str = "Sw3etshop1";

async fn test_app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let config = ApiConfig {
        http_port: 0,
        database_path: ":memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_access_lifetime_secs: 3600,
    };
    let state = AppState::new(db.clone(), config);
    (build_app(state), db)
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
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
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Registers a user and returns their access token.
async fn register_user(app: &Router, username: &str, email: &str) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": username, "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

/// Registers a user, promotes them to admin, and returns a fresh token
/// carrying the admin claim.
async fn register_admin(app: &Router, db: &Database, username: &str, email: &str) -> String {
    register_user(app, username, email).await;

    sqlx::query("UPDATE users SET is_admin = 1 WHERE username = ?1")
        .bind(username)
        .execute(db.pool())
        .await
        .unwrap();

    let (status, body) = request(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": username, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

/// Creates a sweet through the API and returns its id.
async fn create_sweet(app: &Router, admin_token: &str, name: &str, price_cents: i64, quantity: i64) -> i64 {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/v1/sweets",
        Some(admin_token),
        Some(json!({
            "name": name,
            "category": "Traditional",
            "price_cents": price_cents,
            "quantity": quantity
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create sweet failed: {body}");
    body["id"].as_i64().unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let (app, _db) = test_app().await;

    let (status, body) = request(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn register_issues_token_and_user_summary() {
    let (app, _db) = test_app().await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": PASSWORD
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().unwrap().contains('.'));
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["is_admin"], false);
    // The password hash never leaves the server
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn register_rejects_duplicates() {
    let (app, _db) = test_app().await;
    register_user(&app, "alice", "alice@example.com").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "email": "fresh@example.com",
            "password": PASSWORD
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE_IDENTITY");

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": PASSWORD
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn register_rejects_weak_input() {
    let (app, _db) = test_app().await;

    for payload in [
        json!({ "username": "ab", "email": "a@example.com", "password": PASSWORD }),
        json!({ "username": "alice", "email": "not-an-email", "password": PASSWORD }),
        json!({ "username": "alice", "email": "a@example.com", "password": "weak" }),
    ] {
        let (status, body) =
            request(&app, Method::POST, "/api/v1/auth/register", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn login_does_not_reveal_which_credential_was_wrong() {
    let (app, _db) = test_app().await;
    register_user(&app, "alice", "alice@example.com").await;

    let (wrong_pw_status, wrong_pw_body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "Wr0ngpass" })),
    )
    .await;

    let (no_user_status, no_user_body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "nobody", "password": PASSWORD })),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    // Identical error body in both cases
    assert_eq!(wrong_pw_body, no_user_body);
    assert_eq!(wrong_pw_body["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let (app, _db) = test_app().await;
    register_user(&app, "alice", "alice@example.com").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "alice", "password": PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["access_token"].as_str().unwrap().contains('.'));
}

// =============================================================================
// Sweets CRUD
// =============================================================================

#[tokio::test]
async fn sweets_crud_roundtrip() {
    let (app, db) = test_app().await;
    let admin = register_admin(&app, &db, "admin", "admin@example.com").await;

    let id = create_sweet(&app, &admin, "Kaju Katli", 15000, 50).await;

    let (status, body) =
        request(&app, Method::GET, &format!("/api/v1/sweets/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Kaju Katli");
    assert_eq!(body["price_cents"], 15000);
    assert_eq!(body["quantity"], 50);

    // Sparse update: price only, everything else untouched
    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/sweets/{id}"),
        Some(&admin),
        Some(json!({ "price_cents": 12500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price_cents"], 12500);
    assert_eq!(body["name"], "Kaju Katli");
    assert_eq!(body["quantity"], 50);

    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/api/v1/sweets/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        request(&app, Method::GET, &format!("/api/v1/sweets/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn sweets_list_filters_by_category() {
    let (app, db) = test_app().await;
    let admin = register_admin(&app, &db, "admin", "admin@example.com").await;

    create_sweet(&app, &admin, "Ladoo", 2500, 10).await;
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/sweets",
        Some(&admin),
        Some(json!({
            "name": "Brownie",
            "category": "Baked",
            "price_cents": 4000,
            "quantity": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(&app, Method::GET, "/api/v1/sweets", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) =
        request(&app, Method::GET, "/api/v1/sweets?category=Baked", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let sweets = body.as_array().unwrap();
    assert_eq!(sweets.len(), 1);
    assert_eq!(sweets[0]["name"], "Brownie");

    let (status, body) =
        request(&app, Method::GET, "/api/v1/sweets?skip=1&limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sweet_writes_require_admin() {
    let (app, _db) = test_app().await;
    let user = register_user(&app, "bob", "bob@example.com").await;

    let payload = json!({
        "name": "Ladoo",
        "category": "Traditional",
        "price_cents": 2500,
        "quantity": 10
    });

    // No token → 401
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/sweets",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    // Authenticated but not admin → 403
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/sweets",
        Some(&user),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

// =============================================================================
// Inventory
// =============================================================================

#[tokio::test]
async fn purchase_and_restock_flow() {
    let (app, db) = test_app().await;
    let admin = register_admin(&app, &db, "admin", "admin@example.com").await;
    let buyer = register_user(&app, "buyer", "buyer@example.com").await;

    let sweet_id = create_sweet(&app, &admin, "Kaju Katli", 15000, 50).await;

    // Purchase 5 of 50: total = $150.00 × 5
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/inventory/purchase",
        Some(&buyer),
        Some(json!({ "sweet_id": sweet_id, "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity"], 5);
    assert_eq!(body["total_price_cents"], 75000);

    let (_, body) =
        request(&app, Method::GET, &format!("/api/v1/sweets/{sweet_id}"), None, None).await;
    assert_eq!(body["quantity"], 45);

    // Oversized purchase fails and leaves stock untouched
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/inventory/purchase",
        Some(&buyer),
        Some(json!({ "sweet_id": sweet_id, "quantity": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INSUFFICIENT_STOCK");

    let (_, body) =
        request(&app, Method::GET, &format!("/api/v1/sweets/{sweet_id}"), None, None).await;
    assert_eq!(body["quantity"], 45);

    // Restock with a blank note gets the generated summary
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/inventory/restock",
        Some(&admin),
        Some(json!({ "sweet_id": sweet_id, "quantity": 10, "notes": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["action"], "RESTOCK");
    assert_eq!(body["quantity_change"], 10);
    assert_eq!(body["notes"], "Restock of 10 units");

    let (_, body) =
        request(&app, Method::GET, &format!("/api/v1/sweets/{sweet_id}"), None, None).await;
    assert_eq!(body["quantity"], 55);

    // History is newest-first: restock, then the one successful purchase
    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/api/v1/inventory/history/{sweet_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action"], "RESTOCK");
    assert_eq!(entries[0]["quantity_change"], 10);
    assert_eq!(entries[1]["action"], "PURCHASE");
    assert_eq!(entries[1]["quantity_change"], -5);
}

#[tokio::test]
async fn purchase_of_unknown_sweet_is_404() {
    let (app, _db) = test_app().await;
    let buyer = register_user(&app, "buyer", "buyer@example.com").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/inventory/purchase",
        Some(&buyer),
        Some(json!({ "sweet_id": 9999, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn non_positive_quantities_are_rejected() {
    let (app, db) = test_app().await;
    let admin = register_admin(&app, &db, "admin", "admin@example.com").await;
    let sweet_id = create_sweet(&app, &admin, "Ladoo", 2500, 10).await;

    for quantity in [0, -5] {
        let (status, body) = request(
            &app,
            Method::POST,
            "/api/v1/inventory/purchase",
            Some(&admin),
            Some(json!({ "sweet_id": sweet_id, "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, body) = request(
            &app,
            Method::POST,
            "/api/v1/inventory/restock",
            Some(&admin),
            Some(json!({ "sweet_id": sweet_id, "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn restock_and_history_require_admin() {
    let (app, db) = test_app().await;
    let admin = register_admin(&app, &db, "admin", "admin@example.com").await;
    let user = register_user(&app, "bob", "bob@example.com").await;
    let sweet_id = create_sweet(&app, &admin, "Ladoo", 2500, 10).await;

    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/inventory/restock",
        Some(&user),
        Some(json!({ "sweet_id": sweet_id, "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &app,
        Method::GET,
        &format!("/api/v1/inventory/history/{sweet_id}"),
        Some(&user),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn own_purchases_can_be_listed_and_cleared() {
    let (app, db) = test_app().await;
    let admin = register_admin(&app, &db, "admin", "admin@example.com").await;
    let buyer = register_user(&app, "buyer", "buyer@example.com").await;
    let other = register_user(&app, "other", "other@example.com").await;
    let sweet_id = create_sweet(&app, &admin, "Ladoo", 2500, 100).await;

    for quantity in [2, 3] {
        let (status, _) = request(
            &app,
            Method::POST,
            "/api/v1/inventory/purchase",
            Some(&buyer),
            Some(json!({ "sweet_id": sweet_id, "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/inventory/purchase",
        Some(&other),
        Some(json!({ "sweet_id": sweet_id, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app,
        Method::GET,
        "/api/v1/inventory/purchases",
        Some(&buyer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = request(
        &app,
        Method::DELETE,
        "/api/v1/inventory/purchases",
        Some(&buyer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 2);

    // Buyer's history is empty; the other user's record survives
    let (_, body) = request(
        &app,
        Method::GET,
        "/api/v1/inventory/purchases",
        Some(&buyer),
        None,
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = request(
        &app,
        Method::GET,
        "/api/v1/inventory/purchases",
        Some(&other),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_sweet_cascades_to_history() {
    let (app, db) = test_app().await;
    let admin = register_admin(&app, &db, "admin", "admin@example.com").await;
    let sweet_id = create_sweet(&app, &admin, "Ladoo", 2500, 100).await;

    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/inventory/purchase",
        Some(&admin),
        Some(json!({ "sweet_id": sweet_id, "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/api/v1/sweets/{sweet_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // No orphaned audit rows remain
    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/api/v1/inventory/history/{sweet_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = request(
        &app,
        Method::GET,
        "/api/v1/inventory/purchases",
        Some(&admin),
        None,
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());
}
