//! End-to-end tests for tenant-scoped CRUD behind the session guard

mod common;

use common::{
    assign_tenant, body_json, create_test_app, request, seed_tenant, setup_test_db, sign_up_and_in,
};
use serde_json::json;

#[tokio::test]
async fn locations_require_authentication() {
    let app = create_test_app(setup_test_db().await).await;

    let response = request(&app, "GET", "/locations", None, None).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn users_without_a_tenant_are_rejected() {
    let pool = setup_test_db().await;
    let app = create_test_app(pool).await;

    let (cookie, _) = sign_up_and_in(&app, "new@x.com", "password123").await;

    let response = request(&app, "GET", "/locations", Some(&cookie), None).await;
    assert_eq!(response.status(), 403);
    let body = body_json(response).await;
    assert_eq!(body["message"], "onboarding required");

    let response = request(&app, "GET", "/tenants/current", Some(&cookie), None).await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn current_tenant_is_returned_after_onboarding() {
    let pool = setup_test_db().await;
    let app = create_test_app(pool.clone()).await;

    let (cookie, user_id) = sign_up_and_in(&app, "owner@x.com", "password123").await;
    let tenant_id = seed_tenant(&pool, "Acme Coffee", "ACME-001").await;
    assign_tenant(&pool, &user_id, &tenant_id).await;

    let response = request(&app, "GET", "/tenants/current", Some(&cookie), None).await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["id"], tenant_id.as_str());
    assert_eq!(body["name"], "Acme Coffee");
    assert_eq!(body["registrationCode"], "ACME-001");

    // The user projection reflects the completed onboarding
    let response = request(&app, "GET", "/users/me", Some(&cookie), None).await;
    let body = body_json(response).await;
    assert_eq!(body["tenantId"], tenant_id.as_str());
    assert_eq!(body["onboardingCompleted"], true);
}

#[tokio::test]
async fn location_crud_round_trip() {
    let pool = setup_test_db().await;
    let app = create_test_app(pool.clone()).await;

    let (cookie, user_id) = sign_up_and_in(&app, "crud@x.com", "password123").await;
    let tenant_id = seed_tenant(&pool, "Acme Coffee", "ACME-002").await;
    assign_tenant(&pool, &user_id, &tenant_id).await;

    // Empty list to start
    let response = request(&app, "GET", "/locations", Some(&cookie), None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // Create
    let response = request(
        &app,
        "POST",
        "/locations",
        Some(&cookie),
        Some(json!({"name": "Downtown", "address": "1 Main St"})),
    )
    .await;
    assert_eq!(response.status(), 200);
    let created = body_json(response).await;
    let location_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["tenantId"], tenant_id.as_str());
    assert_eq!(created["name"], "Downtown");

    // Name is mandatory
    let response = request(
        &app,
        "POST",
        "/locations",
        Some(&cookie),
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(response.status(), 400);

    // Read back
    let path = format!("/locations/{location_id}");
    let response = request(&app, "GET", &path, Some(&cookie), None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await["address"], "1 Main St");

    // Update
    let response = request(
        &app,
        "PUT",
        &path,
        Some(&cookie),
        Some(json!({"name": "Downtown", "address": "2 Main St"})),
    )
    .await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await["address"], "2 Main St");

    // Delete, then the row is gone
    let response = request(&app, "DELETE", &path, Some(&cookie), None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await["success"], true);

    let response = request(&app, "GET", &path, Some(&cookie), None).await;
    assert_eq!(response.status(), 404);
    let response = request(&app, "DELETE", &path, Some(&cookie), None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn locations_are_invisible_across_tenants() {
    let pool = setup_test_db().await;
    let app = create_test_app(pool.clone()).await;

    let (cookie_a, user_a) = sign_up_and_in(&app, "a@x.com", "password123").await;
    let (cookie_b, user_b) = sign_up_and_in(&app, "b@x.com", "password123").await;

    let tenant_a = seed_tenant(&pool, "Tenant A", "REG-A").await;
    let tenant_b = seed_tenant(&pool, "Tenant B", "REG-B").await;
    assign_tenant(&pool, &user_a, &tenant_a).await;
    assign_tenant(&pool, &user_b, &tenant_b).await;

    let response = request(
        &app,
        "POST",
        "/locations",
        Some(&cookie_a),
        Some(json!({"name": "A-only"})),
    )
    .await;
    let location_id = body_json(response).await["id"].as_str().unwrap().to_string();

    // Tenant B cannot see, update or delete tenant A's location
    let path = format!("/locations/{location_id}");
    let response = request(&app, "GET", &path, Some(&cookie_b), None).await;
    assert_eq!(response.status(), 404);

    let response = request(
        &app,
        "PUT",
        &path,
        Some(&cookie_b),
        Some(json!({"name": "hijacked"})),
    )
    .await;
    assert_eq!(response.status(), 404);

    let response = request(&app, "DELETE", &path, Some(&cookie_b), None).await;
    assert_eq!(response.status(), 404);

    let response = request(&app, "GET", "/locations", Some(&cookie_b), None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // Still intact for tenant A
    let response = request(&app, "GET", &path, Some(&cookie_a), None).await;
    assert_eq!(response.status(), 200);
}
