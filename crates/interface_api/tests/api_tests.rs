//! HTTP API tests
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot` over the
//! in-memory store, with the clock pinned to 2024-01-15.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::FixedClock;
use infra_db::Storage;
use interface_api::{config::AppConfig, create_router, AppState};

struct TestApp {
    router: Router,
}

impl TestApp {
    async fn start() -> Self {
        let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
        let state = AppState::with_clock(Storage::memory(), AppConfig::default(), clock);
        state.identity.provision_default_admin().await.unwrap();
        Self {
            router: create_router(state),
        }
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Vec<u8>, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec(), content_type)
    }

    async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes, _) = self.send(method, uri, token, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }

    async fn admin(&self) -> String {
        self.login("admin", "admin123").await
    }

    async fn create_room(&self, token: &str, number: &str, price: &str) -> i64 {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/rooms",
                Some(token),
                Some(json!({ "room_number": number, "room_type": "ac", "price_per_night": price })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }

    async fn create_cashier(&self, admin: &str) -> i64 {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/users",
                Some(admin),
                Some(json!({ "username": "cashier1", "password": "cash123", "role": "cashier" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }
}

fn bill_body(room_id: i64, check_in: &str, check_out: &str) -> Value {
    json!({
        "room_id": room_id,
        "customer_name": "Nimal Perera",
        "customer_phone": "0771234567",
        "check_in_date": check_in,
        "check_out_date": check_out,
    })
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness_and_readiness() {
        let app = TestApp::start().await;

        let (status, body) = app.json(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = app.json(Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }
}

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_identity() {
        let app = TestApp::start().await;
        let (status, body) = app
            .json(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "username": "admin", "password": "admin123" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["user"]["username"], "admin");
        assert_eq!(body["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = TestApp::start().await;
        let (status, body) = app
            .json(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "username": "admin", "password": "nope" })),
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let app = TestApp::start().await;
        let (status, _) = app
            .json(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "username": "ghost", "password": "whatever" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_protected_routes_need_token() {
        let app = TestApp::start().await;
        let (status, _) = app.json(Method::GET, "/api/v1/rooms", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.json(Method::GET, "/api/v1/rooms", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_current_user_and_password_change() {
        let app = TestApp::start().await;
        let token = app.admin().await;

        let (status, body) = app.json(Method::GET, "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "admin");
        assert!(body.get("password_hash").is_none());

        let (status, _) = app
            .json(
                Method::PUT,
                "/api/v1/auth/password",
                Some(&token),
                Some(json!({ "current_password": "admin123", "new_password": "s3cret-pass" })),
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        app.login("admin", "s3cret-pass").await;
    }
}

mod rooms {
    use super::*;

    #[tokio::test]
    async fn test_room_lifecycle() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let id = app.create_room(&token, "101", "8500.00").await;

        let (status, body) = app
            .json(Method::PUT, &format!("/api/v1/rooms/{}", id), Some(&token), Some(json!({ "price_per_night": "9000" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["room_number"], "101");

        let (status, _) = app
            .json(Method::DELETE, &format!("/api/v1/rooms/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, rooms) = app.json(Method::GET, "/api/v1/rooms", Some(&token), None).await;
        assert_eq!(rooms.as_array().unwrap().len(), 0);

        // the number is free again once the old room is inactive
        app.create_room(&token, "101", "9500").await;
    }

    #[tokio::test]
    async fn test_duplicate_room_number_conflicts() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        app.create_room(&token, "101", "8500").await;

        let (status, body) = app
            .json(
                Method::POST,
                "/api/v1/rooms",
                Some(&token),
                Some(json!({ "room_number": "101", "room_type": "non_ac", "price_per_night": "5000" })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "duplicate_key");
    }

    #[tokio::test]
    async fn test_non_positive_price_rejected() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let (status, _) = app
            .json(
                Method::POST,
                "/api/v1/rooms",
                Some(&token),
                Some(json!({ "room_number": "102", "room_type": "ac", "price_per_night": "0" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cashier_cannot_manage_rooms() {
        let app = TestApp::start().await;
        let admin = app.admin().await;
        app.create_cashier(&admin).await;
        let cashier = app.login("cashier1", "cash123").await;

        let (status, _) = app
            .json(
                Method::POST,
                "/api/v1/rooms",
                Some(&cashier),
                Some(json!({ "room_number": "101", "room_type": "ac", "price_per_night": "8500" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.json(Method::GET, "/api/v1/rooms", Some(&cashier), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_availability_follows_bills() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let id = app.create_room(&token, "101", "8500").await;

        let (status, _) = app
            .json(Method::POST, "/api/v1/bills", Some(&token), Some(bill_body(id, "2024-01-15", "2024-01-18")))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/api/v1/rooms/{}/availability?check_in=2024-01-17&check_out=2024-01-19", id);
        let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
        assert_eq!(body["available"], false);

        let uri = format!("/api/v1/rooms/{}/availability?check_in=2024-01-18&check_out=2024-01-20", id);
        let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
        assert_eq!(body["available"], true);
    }

    #[tokio::test]
    async fn test_missing_room_is_not_found() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let (status, body) = app.json(Method::GET, "/api/v1/rooms/999", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }
}

mod bills {
    use super::*;

    #[tokio::test]
    async fn test_create_print_and_list() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let room = app.create_room(&token, "101", "8500.00").await;

        let (status, bill) = app
            .json(Method::POST, "/api/v1/bills", Some(&token), Some(bill_body(room, "2024-01-15", "2024-01-18")))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", bill);
        assert_eq!(bill["bill_number"], "VB20240115001");
        assert_eq!(bill["total_days"], 3);

        let id = bill["id"].as_i64().unwrap();
        let (status, details) = app
            .json(Method::GET, &format!("/api/v1/bills/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details["room_number"], "101");
        assert_eq!(details["created_by_username"], "admin");

        let (status, bytes, content_type) = app
            .send(Method::GET, &format!("/api/v1/bills/{}/print", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/plain"));
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("VB20240115001"));
        assert!(text.contains("Nimal Perera"));

        let (_, list) = app.json(Method::GET, "/api/v1/bills", Some(&token), None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generated_numbers_are_sequential() {
        let app = TestApp::start().await;
        let token = app.admin().await;

        let (_, first) = app.json(Method::POST, "/api/v1/bills/number", Some(&token), None).await;
        let (_, second) = app.json(Method::POST, "/api/v1/bills/number", Some(&token), None).await;
        assert_eq!(first["bill_number"], "VB20240115001");
        assert_eq!(second["bill_number"], "VB20240115002");
    }

    #[tokio::test]
    async fn test_overlapping_bill_conflicts() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let room = app.create_room(&token, "101", "8500").await;

        let (status, _) = app
            .json(Method::POST, "/api/v1/bills", Some(&token), Some(bill_body(room, "2024-01-15", "2024-01-18")))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .json(Method::POST, "/api/v1/bills", Some(&token), Some(bill_body(room, "2024-01-17", "2024-01-19")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn test_reversed_dates_rejected() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let room = app.create_room(&token, "101", "8500").await;

        let (status, _) = app
            .json(Method::POST, "/api/v1/bills", Some(&token), Some(bill_body(room, "2024-01-18", "2024-01-15")))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_bill_is_not_found() {
        let app = TestApp::start().await;
        let token = app.admin().await;
        let (status, _) = app.json(Method::GET, "/api/v1/bills/42", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = app.send(Method::GET, "/api/v1/bills/42/print", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cashier_bills_are_attributed() {
        let app = TestApp::start().await;
        let admin = app.admin().await;
        let room = app.create_room(&admin, "101", "8500").await;
        app.create_cashier(&admin).await;
        let cashier = app.login("cashier1", "cash123").await;

        let (status, bill) = app
            .json(Method::POST, "/api/v1/bills", Some(&cashier), Some(bill_body(room, "2024-01-15", "2024-01-16")))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, details) = app
            .json(Method::GET, &format!("/api/v1/bills/{}", bill["id"]), Some(&admin), None)
            .await;
        assert_eq!(details["created_by_username"], "cashier1");
    }

    #[tokio::test]
    async fn test_removed_cashier_token_cannot_bill() {
        let app = TestApp::start().await;
        let admin = app.admin().await;
        let room = app.create_room(&admin, "101", "8500").await;
        let cashier_id = app.create_cashier(&admin).await;
        let cashier = app.login("cashier1", "cash123").await;

        let (status, _) = app
            .json(Method::DELETE, &format!("/api/v1/users/{}", cashier_id), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app
            .json(Method::POST, "/api/v1/bills", Some(&cashier), Some(bill_body(room, "2024-01-15", "2024-01-18")))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", body);
        assert_eq!(body["error"], "not_found");

        let (_, availability) = app
            .json(
                Method::GET,
                &format!("/api/v1/rooms/{}/availability?check_in=2024-01-15&check_out=2024-01-18", room),
                Some(&admin),
                None,
            )
            .await;
        assert_eq!(availability["available"], true);
    }
}

mod reports {
    use super::*;

    #[tokio::test]
    async fn test_revenue_summary_for_admin_only() {
        let app = TestApp::start().await;
        let admin = app.admin().await;
        let room = app.create_room(&admin, "101", "8500").await;
        app.json(Method::POST, "/api/v1/bills", Some(&admin), Some(bill_body(room, "2024-01-15", "2024-01-18")))
            .await;

        let (status, body) = app
            .json(Method::GET, "/api/v1/reports/revenue?from=2024-01-01&to=2024-01-31", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["bill_count"], 1);
        assert_eq!(body["billed_days"], 3);

        app.create_cashier(&admin).await;
        let cashier = app.login("cashier1", "cash123").await;
        let (status, _) = app
            .json(Method::GET, "/api/v1/reports/revenue?from=2024-01-01&to=2024-01-31", Some(&cashier), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

mod users {
    use super::*;

    #[tokio::test]
    async fn test_user_management() {
        let app = TestApp::start().await;
        let admin = app.admin().await;
        let cashier_id = app.create_cashier(&admin).await;

        let (status, list) = app.json(Method::GET, "/api/v1/users", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 2);

        let (status, body) = app
            .json(
                Method::POST,
                "/api/v1/users",
                Some(&admin),
                Some(json!({ "username": "cashier1", "password": "other123", "role": "cashier" })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "duplicate_key");

        let (status, _) = app
            .json(Method::DELETE, &format!("/api/v1/users/{}", cashier_id), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_admin_cannot_be_removed() {
        let app = TestApp::start().await;
        let admin = app.admin().await;
        let (_, me) = app.json(Method::GET, "/api/v1/auth/me", Some(&admin), None).await;

        let (status, _) = app
            .json(Method::DELETE, &format!("/api/v1/users/{}", me["id"]), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_cashier_with_bills_cannot_be_removed() {
        let app = TestApp::start().await;
        let admin = app.admin().await;
        let room = app.create_room(&admin, "101", "8500").await;
        let cashier_id = app.create_cashier(&admin).await;
        let cashier = app.login("cashier1", "cash123").await;
        app.json(Method::POST, "/api/v1/bills", Some(&cashier), Some(bill_body(room, "2024-01-15", "2024-01-16")))
            .await;

        let (status, _) = app
            .json(Method::DELETE, &format!("/api/v1/users/{}", cashier_id), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
