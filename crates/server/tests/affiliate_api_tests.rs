mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

async fn register(app: &axum::Router, email: &str) -> String {
    let (status, body) = send(app, json_request("POST", "/api/v1/affiliate", json!({ "email": email }))).await;
    assert_eq!(status, StatusCode::OK);
    body["code"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_affiliate_returns_links() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/affiliate",
            json!({ "email": "a@x.com", "paypalEmail": "pay@x.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Affiliate account created");
    assert_eq!(body["commissionRate"], "20%");

    let code = body["code"].as_str().unwrap();
    assert!(code.starts_with("VN30_"));
    assert_eq!(code.len(), 11);
    assert_eq!(body["referralLink"], format!("https://vn30quantum.com?ref={}", code));
    assert_eq!(body["dashboardUrl"], format!("/affiliate/dashboard?code={}", code));
}

#[tokio::test]
async fn test_register_is_idempotent_per_email() {
    let app = test_app();
    let first = register(&app, "a@x.com").await;

    let (status, body) = send(&app, json_request("POST", "/api/v1/affiliate", json!({ "email": "a@x.com" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Already registered");
    assert_eq!(body["code"], first.as_str());
    assert!(body.get("commissionRate").is_none());
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = test_app();

    for payload in [json!({}), json!({ "email": "" }), json!({ "email": "not-an-email" })] {
        let (status, body) = send(&app, json_request("POST", "/api/v1/affiliate", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Valid email required");
    }
}

#[tokio::test]
async fn test_lookup_requires_code() {
    let app = test_app();

    let (status, body) = send(&app, get_request("/api/v1/affiliate", &[])).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Affiliate code required");

    let (status, body) = send(&app, get_request("/api/v1/affiliate", &[("x-affiliate-code", "VN30_ZZZZZZ")])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Affiliate not found");
}

#[tokio::test]
async fn test_fresh_affiliate_has_zero_state() {
    let app = test_app();
    let code = register(&app, "a@x.com").await;

    let (status, body) = send(&app, get_request("/api/v1/affiliate", &[("x-affiliate-code", &code)])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affiliate"]["email"], "a@x.com");
    assert_eq!(body["affiliate"]["commissionRate"], "20%");
    assert_eq!(body["affiliate"]["totalEarnings"], 0.0);
    assert_eq!(body["affiliate"]["pendingPayout"], 0.0);
    assert_eq!(body["affiliate"]["referralCount"], 0);
    assert_eq!(body["referrals"], json!([]));
}

#[tokio::test]
async fn test_record_referral_accumulates_commission() {
    let app = test_app();
    let code = register(&app, "a@x.com").await;

    for amount in [99, 29] {
        let (status, _) = send(
            &app,
            json_request_with_header(
                "PUT",
                "/api/v1/affiliate",
                json!({
                    "affiliateCode": code,
                    "customerEmail": "buyer@x.com",
                    "plan": "pro",
                    "amount": amount
                }),
                ("x-admin-secret", ADMIN_SECRET),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, get_request("/api/v1/affiliate", &[("x-affiliate-code", &code)])).await;
    assert_eq!(body["affiliate"]["referralCount"], 2);
    assert_eq!(body["affiliate"]["totalEarnings"], 25.6);
    assert_eq!(body["affiliate"]["pendingPayout"], 25.6);

    let referrals = body["referrals"].as_array().unwrap();
    assert_eq!(referrals.len(), 2);
    assert_eq!(referrals[0]["amount"], 99.0);
    assert_eq!(referrals[0]["commission"], 19.8);
    assert_eq!(referrals[0]["status"], "pending");
    assert_eq!(referrals[1]["commission"], 5.8);
}

#[tokio::test]
async fn test_record_referral_response_commission() {
    let app = test_app();
    let code = register(&app, "a@x.com").await;

    let (status, body) = send(
        &app,
        json_request_with_header(
            "PUT",
            "/api/v1/affiliate",
            json!({ "affiliateCode": code, "amount": 99 }),
            ("x-admin-secret", ADMIN_SECRET),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Referral recorded");
    assert_eq!(body["commission"], 19.8);
}

#[tokio::test]
async fn test_record_referral_requires_admin_and_does_not_mutate() {
    let app = test_app();
    let code = register(&app, "a@x.com").await;
    let payload = json!({ "affiliateCode": code, "amount": 99 });

    let (status, body) = send(&app, json_request("PUT", "/api/v1/affiliate", payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(
        &app,
        json_request_with_header("PUT", "/api/v1/affiliate", payload, ("x-admin-secret", "wrong")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, get_request("/api/v1/affiliate", &[("x-affiliate-code", &code)])).await;
    assert_eq!(body["affiliate"]["referralCount"], 0);
    assert_eq!(body["referrals"], json!([]));
}

#[tokio::test]
async fn test_record_referral_unknown_code_and_negative_amount() {
    let app = test_app();
    let code = register(&app, "a@x.com").await;

    let (status, body) = send(
        &app,
        json_request_with_header(
            "PUT",
            "/api/v1/affiliate",
            json!({ "affiliateCode": "VN30_NOPE00", "amount": 99 }),
            ("x-admin-secret", ADMIN_SECRET),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Affiliate not found");

    let (status, _) = send(
        &app,
        json_request_with_header(
            "PUT",
            "/api/v1/affiliate",
            json!({ "affiliateCode": code, "amount": -5 }),
            ("x-admin-secret", ADMIN_SECRET),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, get_request("/api/v1/affiliate", &[("x-affiliate-code", &code)])).await;
    assert_eq!(body["affiliate"]["referralCount"], 0);
}

#[tokio::test]
async fn test_admin_disabled_without_secret() {
    let mut config = utils::AppConfig::new_for_test();
    config.admin_secret = None;
    let app = test_app_with(config);
    let code = register(&app, "a@x.com").await;

    let (status, _) = send(
        &app,
        json_request_with_header(
            "PUT",
            "/api/v1/affiliate",
            json!({ "affiliateCode": code, "amount": 99 }),
            ("x-admin-secret", ""),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
