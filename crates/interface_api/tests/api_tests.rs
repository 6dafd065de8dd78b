//! API tests running the router in database-less mode

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::{config::ApiConfig, create_router};

fn test_server() -> TestServer {
    let app = create_router(None, ApiConfig::default());
    TestServer::new(app).expect("router should start")
}

fn valid_request() -> Value {
    json!({
        "customer": {
            "name": "Ramesh Kumar",
            "phone": "9876543210",
            "vehicle_number": "AP 39 AB 1234"
        },
        "items": [
            { "description": "Alternator repair", "quantity": "2", "rate": "100" }
        ]
    })
}

// ============================================================================
// Health Tests
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let server = test_server();

        let response = server.get("/health/ready").await;
        response.assert_status_ok();
    }
}

// ============================================================================
// Invoice Generation Tests
// ============================================================================

mod generate_tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_returns_pdf() {
        let server = test_server();

        let response = server.post("/api/v1/invoices").json(&valid_request()).await;
        response.assert_status_ok();

        assert_eq!(response.header("content-type"), "application/pdf");
        assert_eq!(response.header("x-invoice-number"), "0001");
        assert_eq!(
            response.header("content-disposition"),
            "inline; filename=\"invoice_0001.pdf\""
        );
        assert!(response.as_bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_numbers_increment_per_invoice() {
        let server = test_server();

        let first = server.post("/api/v1/invoices").json(&valid_request()).await;
        let second = server.post("/api/v1/invoices").json(&valid_request()).await;

        assert_eq!(first.header("x-invoice-number"), "0001");
        assert_eq!(second.header("x-invoice-number"), "0002");
    }

    #[tokio::test]
    async fn test_failed_request_consumes_no_number() {
        let server = test_server();

        let first = server.post("/api/v1/invoices").json(&valid_request()).await;
        assert_eq!(first.header("x-invoice-number"), "0001");

        let bad = json!({
            "customer": { "name": "Ramesh Kumar" },
            "items": [
                { "description": "Horn relay", "quantity": "0", "rate": "100" }
            ]
        });
        let failed = server.post("/api/v1/invoices").json(&bad).await;
        failed.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let third = server.post("/api/v1/invoices").json(&valid_request()).await;
        assert_eq!(third.header("x-invoice-number"), "0002");
    }

    #[tokio::test]
    async fn test_overlong_item_list_consumes_no_number() {
        let server = test_server();

        let items: Vec<Value> = (0..60)
            .map(|i| json!({ "description": format!("Item {i}"), "quantity": "1", "rate": "10" }))
            .collect();
        let request = json!({
            "customer": { "name": "Ramesh Kumar" },
            "items": items
        });
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");

        let next = server.post("/api/v1/invoices").json(&valid_request()).await;
        assert_eq!(next.header("x-invoice-number"), "0001");
    }

    #[tokio::test]
    async fn test_cash_bill() {
        let server = test_server();

        let request = json!({
            "customer": { "name": "Ramesh Kumar" },
            "with_gst": false,
            "items": [
                { "description": "Fuse", "quantity": "1", "rate": "20" }
            ]
        });
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status_ok();
        assert!(response.as_bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_empty_items_rejected() {
        let server = test_server();

        let request = json!({
            "customer": { "name": "Ramesh Kumar" },
            "items": []
        });
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_blank_customer_name_rejected() {
        let server = test_server();

        let request = json!({
            "customer": { "name": "   " },
            "items": [
                { "description": "Fuse", "quantity": "1", "rate": "20" }
            ]
        });
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_negative_rate_rejected() {
        let server = test_server();

        let request = json!({
            "customer": { "name": "Ramesh Kumar" },
            "items": [
                { "description": "Fuse", "quantity": "1", "rate": "-5" }
            ]
        });
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_custom_rates_accepted() {
        let server = test_server();

        let request = json!({
            "customer": { "name": "Ramesh Kumar" },
            "cgst_rate": "14",
            "sgst_rate": "14",
            "items": [
                { "description": "Compressor motor", "quantity": "1", "rate": "2000" }
            ]
        });
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status_ok();
    }
}

// ============================================================================
// Invoice Lookup Tests
// ============================================================================

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_requires_database() {
        let server = test_server();

        let response = server.get("/api/v1/invoices/1").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = response.json();
        assert_eq!(body["error"], "unavailable");
    }
}
