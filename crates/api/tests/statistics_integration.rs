//! Integration tests for the statistics endpoint.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_default_test_app, create_test_pool, get_request, json_request, parse_response_body,
    sample_order, test_config,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_statistics_empty_database() {
    let pool = create_test_pool().await;
    let test_app = create_default_test_app(test_config(), pool);

    let response = test_app
        .app
        .oneshot(get_request("/api/v1/statistics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["total_count"], 0);
    assert_eq!(body["daily_count"], 0);
    assert_eq!(body["total_lading_count"], 0);
    assert_eq!(body["total_vask_lading_count"], 0);
}

#[tokio::test]
async fn test_statistics_product_categories() {
    let pool = create_test_pool().await;
    let config = test_config();

    // One plain wash, one combined wash and charge, one standalone charge
    let plain = sample_order("AA11111");

    let mut combined = sample_order("BB22222");
    combined["addLading"] = json!(true);

    let mut charge_only = sample_order("CC33333");
    charge_only["product"] = json!("Lading");

    for order in [plain, combined, charge_only] {
        let test_app = create_default_test_app(config.clone(), pool.clone());
        let request = json_request(Method::POST, "/api/v1/requests", order);
        let response = test_app.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let test_app = create_default_test_app(config, pool);
    let response = test_app
        .app
        .oneshot(get_request("/api/v1/statistics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["total_count"], 3);
    // lading counts cover every product containing the add-on name
    assert_eq!(body["total_lading_count"], 2);
    // vask_lading counts only the combined product
    assert_eq!(body["total_vask_lading_count"], 1);

    // Everything was created just now, so all windows agree with totals
    assert_eq!(body["daily_count"], 3);
    assert_eq!(body["weekly_count"], 3);
    assert_eq!(body["monthly_count"], 3);
    assert_eq!(body["yearly_count"], 3);
    assert_eq!(body["daily_lading_count"], 2);
    assert_eq!(body["daily_vask_lading_count"], 1);
}

#[tokio::test]
async fn test_statistics_include_picked_up_requests() {
    let pool = create_test_pool().await;
    let config = test_config();

    let test_app = create_default_test_app(config.clone(), pool.clone());
    let request = json_request(Method::POST, "/api/v1/requests", sample_order("AB12345"));
    let response = test_app.app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    let id = body["request"]["id"].as_i64().unwrap();

    let test_app = create_default_test_app(config.clone(), pool.clone());
    test_app
        .app
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/requests/{}/picked-up", id),
            json!({}),
        ))
        .await
        .unwrap();

    // Terminal requests leave the overview but stay in statistics
    let test_app = create_default_test_app(config, pool);
    let response = test_app
        .app
        .oneshot(get_request("/api/v1/statistics"))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total_count"], 1);
}
