mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_free_tier_signals() {
    let app = test_app();

    let (status, body) = send(&app, get_request("/api/v1/signals", &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "free");
    assert_eq!(body["count"], 3);
    assert_eq!(body["meta"]["stockLimit"], 3);
    assert_eq!(body["meta"]["upgradeUrl"], "/pricing");

    let first = body["signals"][0].as_object().unwrap();
    assert_eq!(first["symbol"], "HPG");
    assert!(["STRONG_BUY", "BUY", "NEUTRAL", "SELL", "STRONG_SELL"].contains(&first["signal"].as_str().unwrap()));
    assert!(!first.contains_key("price"));
    assert!(!first.contains_key("reasons"));
}

#[tokio::test]
async fn test_pro_tier_signals_with_filters() {
    let app = test_app();

    let (status, body) = send(
        &app,
        get_request("/api/v1/signals?symbol=vic", &[("x-api-key", "pro_abc")]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "pro");
    assert_eq!(body["count"], 1);
    assert_eq!(body["meta"]["upgradeUrl"], json!(null));
    let vic = &body["signals"][0];
    assert_eq!(vic["symbol"], "VIC");
    assert!(vic["price"].as_f64().unwrap() > 0.0);
    assert!(vic["predictedPrice"].as_f64().is_some());
    assert!(vic["macd"].as_f64().is_some());
    assert!(vic["confidence"].as_f64().unwrap() >= 0.5);
    assert!(vic["reasons"].is_array());

    let (_, body) = send(
        &app,
        get_request("/api/v1/signals?type=buy", &[("x-api-key", "starter_abc")]),
    )
    .await;
    assert_eq!(body["tier"], "starter");
    for signal in body["signals"].as_array().unwrap() {
        assert!(signal["signal"].as_str().unwrap().contains("BUY"));
        assert!(signal["rsi"].as_f64().is_some());
        assert!(signal.get("macd").is_none());
        assert!(signal.get("confidence").is_none());
    }
}

#[tokio::test]
async fn test_signal_subscribe() {
    let app = test_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/api/v1/signals/subscribe", json!({ "symbols": ["HPG"] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "API key required");

    let (status, body) = send(
        &app,
        json_request_with_header(
            "POST",
            "/api/v1/signals/subscribe",
            json!({ "telegramChatId": "12345" }),
            ("x-api-key", "pro_abc"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Subscription created");
    assert_eq!(body["subscription"]["symbols"], json!(["ALL"]));
    assert_eq!(body["subscription"]["telegramChatId"], "12345");
}
