//! API integration tests
//!
//! These run against a live server with a migrated database:
//! start the server, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

const ADMIN_EMAIL: &str = "admin@agribook.test";
const ADMIN_PASSWORD: &str = "admin-secret";

/// Ensure the admin account exists (409 on re-registration is fine), then
/// log in and return the bearer token.
async fn get_admin_token(client: &Client) -> String {
    let _ = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Test Admin",
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD,
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["data"]["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

/// Create a category and return its ID
async fn create_category(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_i64().expect("No category ID")
}

/// Create equipment in the category and return its ID
async fn create_equipment(client: &Client, token: &str, category_id: i64, name: &str) -> i64 {
    let form = reqwest::multipart::Form::new()
        .text("name", name.to_string())
        .text("categoryId", category_id.to_string())
        .text("dailyRate", "150")
        .text("description", "Integration test equipment")
        .text("status", "available");

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_i64().expect("No equipment ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();
    get_admin_token(&client).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
    assert!(body["data"]["password"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    get_admin_token(&client).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": ADMIN_EMAIL,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
#[ignore]
async fn test_login_missing_password() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": ADMIN_EMAIL }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email() {
    let client = Client::new();
    get_admin_token(&client).await;

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Someone Else",
            "email": ADMIN_EMAIL,
            "password": "another-pass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_customer_cannot_list_users() {
    let client = Client::new();

    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let email = format!("customer-{}@agribook.test", nonce);
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Plain Customer",
            "email": email,
            "password": "customer-pass"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "customer-pass" }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().expect("No token").to_string();

    let response = client
        .get(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_category_round_trip() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let id = create_category(&client, &token, "Harvesters").await;

    // Public read, no token needed
    let response = client
        .get(format!("{}/categories/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Harvesters");
    assert!(body["data"]["equipmentCount"].is_number());

    // Update
    let response = client
        .put(format!("{}/categories/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "description": "Combine and forage harvesters" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["description"], "Combine and forage harvesters");

    // Delete
    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/categories/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_category_requires_name() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "description": "nameless" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Missing required field: name");
}

#[tokio::test]
#[ignore]
async fn test_equipment_missing_daily_rate() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let category_id = create_category(&client, &token, "Tillage").await;

    let form = reqwest::multipart::Form::new()
        .text("name", "Disc Harrow")
        .text("categoryId", category_id.to_string())
        .text("description", "No rate supplied")
        .text("status", "available");

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Missing required field: dailyRate");

    let _ = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_equipment_create_and_filter() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let category_id = create_category(&client, &token, "Sprayers").await;
    let equipment_id = create_equipment(&client, &token, category_id, "Boom Sprayer").await;

    // Created without an image, so the placeholder is used
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "available");
    assert_eq!(body["data"]["categoryName"], "Sprayers");
    assert!(body["data"]["image"].as_str().is_some());

    // Filtered listing includes it
    let response = client
        .get(format!(
            "{}/equipment?categoryId={}&status=available",
            BASE_URL, category_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["data"].as_array().expect("Expected equipment array");
    assert!(items
        .iter()
        .any(|e| e["id"].as_i64() == Some(equipment_id)));

    // Cleanup
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let _ = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle_and_overlap() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let category_id = create_category(&client, &token, "Tractors").await;
    let equipment_id = create_equipment(&client, &token, category_id, "Row Crop Tractor").await;

    // Totals are computed server-side: 4 days at 150/day
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipmentId": equipment_id,
            "customerName": "Ada Nkemelu",
            "startDate": "2030-06-01",
            "endDate": "2030-06-05"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["data"]["id"].as_i64().expect("No booking ID");
    assert_eq!(body["data"]["totalDays"], 4);
    assert_eq!(body["data"]["totalPrice"], 600.0);
    assert_eq!(body["data"]["status"], "pending");

    // Overlapping range on the same equipment is rejected
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipmentId": equipment_id,
            "customerName": "Someone Else",
            "startDate": "2030-06-04",
            "endDate": "2030-06-08"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Back-to-back booking starting on the previous end date is fine
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipmentId": equipment_id,
            "customerName": "Someone Else",
            "startDate": "2030-06-05",
            "endDate": "2030-06-07"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let second_booking_id = body["data"]["id"].as_i64().expect("No booking ID");

    // Cancelling the first booking frees its range
    let response = client
        .put(format!("{}/bookings/{}", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipmentId": equipment_id,
            "customerName": "Third Customer",
            "startDate": "2030-06-01",
            "endDate": "2030-06-05"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let third_booking_id = body["data"]["id"].as_i64().expect("No booking ID");

    // Cleanup
    for id in [booking_id, second_booking_id, third_booking_id] {
        let _ = client
            .delete(format!("{}/bookings/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
    let _ = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_booking_update_respects_overlap() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let category_id = create_category(&client, &token, "Balers").await;
    let equipment_id = create_equipment(&client, &token, category_id, "Round Baler").await;

    let create = |start: &str, end: &str, name: &str| {
        json!({
            "equipmentId": equipment_id,
            "customerName": name,
            "startDate": start,
            "endDate": end
        })
    };

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&create("2031-06-01", "2031-06-05", "First Customer"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let first_id = body["data"]["id"].as_i64().expect("No booking ID");

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&create("2031-06-10", "2031-06-12", "Second Customer"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let second_id = body["data"]["id"].as_i64().expect("No booking ID");

    // Moving the second booking onto the first one's range is rejected
    let response = client
        .put(format!("{}/bookings/{}", BASE_URL, second_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "startDate": "2031-06-03", "endDate": "2031-06-06" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Moving it to a free range works and reprices
    let response = client
        .put(format!("{}/bookings/{}", BASE_URL, second_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "startDate": "2031-06-20", "endDate": "2031-06-22" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["totalDays"], 2);

    // Cancel the first booking, rebook its range, then try to revive it
    let response = client
        .put(format!("{}/bookings/{}", BASE_URL, first_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&create("2031-06-01", "2031-06-05", "Third Customer"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let third_id = body["data"]["id"].as_i64().expect("No booking ID");

    // The range is taken again, so flipping back to pending conflicts
    let response = client
        .put(format!("{}/bookings/{}", BASE_URL, first_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "pending" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // A non-blocking status change on the same booking still goes through
    let response = client
        .put(format!("{}/bookings/{}", BASE_URL, first_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Cleanup
    for id in [first_id, second_id, third_id] {
        let _ = client
            .delete(format!("{}/bookings/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
    let _ = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_booking_rejects_bad_ranges() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let category_id = create_category(&client, &token, "Seeders").await;
    let equipment_id = create_equipment(&client, &token, category_id, "Grain Drill").await;

    // End before start
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipmentId": equipment_id,
            "customerName": "Ada Nkemelu",
            "startDate": "2030-06-05",
            "endDate": "2030-06-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "End date must be after start date");

    // Start in the past
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipmentId": equipment_id,
            "customerName": "Ada Nkemelu",
            "startDate": "2001-06-01",
            "endDate": "2030-06-05"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Start date cannot be in the past");

    // Missing end date
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipmentId": equipment_id,
            "customerName": "Ada Nkemelu",
            "startDate": "2030-06-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Cleanup
    let _ = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["totalEquipment"].is_number());
    assert!(body["data"]["totalBookings"].is_number());
    assert!(body["data"]["totalRevenue"].is_number());
    assert!(body["data"]["totalCategories"].is_number());
}
