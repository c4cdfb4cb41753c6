use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tower::ServiceExt;
use ulid::Ulid;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub async fn create_test_app(pool: SqlitePool) -> Router {
    tenantly::create_app(pool).await.unwrap()
}

pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> Response {
    request(app, "POST", path, None, Some(body)).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// First Set-Cookie header, verbatim.
pub fn set_cookie_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// The `name=value` pair of the session cookie, ready for a Cookie header.
pub fn session_cookie_pair(response: &Response) -> Option<String> {
    let header = set_cookie_header(response)?;
    let pair = header.split(';').next()?.trim().to_string();
    pair.starts_with("tenantly_session=").then_some(pair)
}

/// Register and sign in, returning the session cookie pair and the user id.
pub async fn sign_up_and_in(app: &Router, email: &str, password: &str) -> (String, String) {
    let response = post_json(
        app,
        "/auth/sign-up",
        serde_json::json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(response.status(), 200, "sign-up should succeed");

    let response = post_json(
        app,
        "/auth/sign-in",
        serde_json::json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(response.status(), 200, "sign-in should succeed");

    let cookie = session_cookie_pair(&response).expect("sign-in must set the session cookie");
    let body = body_json(response).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    (cookie, user_id)
}

/// Seed a tenant directly; tenant creation belongs to the onboarding flow,
/// which lives outside this service.
pub async fn seed_tenant(pool: &SqlitePool, name: &str, registration_code: &str) -> String {
    let id = Ulid::new().to_string();
    sqlx::query("INSERT INTO tenants (id, name, registration_code, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(registration_code)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .execute(pool)
        .await
        .unwrap();

    id
}

/// Complete onboarding for a user the way the external flow would.
pub async fn assign_tenant(pool: &SqlitePool, user_id: &str, tenant_id: &str) {
    sqlx::query("UPDATE users SET tenant_id = ?, onboarding_completed = 1 WHERE id = ?")
        .bind(tenant_id)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}
