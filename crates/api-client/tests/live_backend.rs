//! Tests against a running backend.
//!
//! Run with `cargo test -p digipin-api-client --features integration` and
//! `DIGIPIN_AGENT_API` pointing at the server.

#![cfg(feature = "integration")]

use digipin_api_client::DigipinClient;

#[tokio::test]
async fn test_health() {
    let client = DigipinClient::new().unwrap();
    let health = client.health().check().await.unwrap();
    assert!(health.is_ok(), "status: {}", health.status);
}

#[tokio::test]
async fn test_encode_matches_local_codec() {
    let client = DigipinClient::new().unwrap();
    let encoded = client.digipin().encode(28.6139, 77.2090).await.unwrap();
    assert_eq!(encoded.pin, "39J-438-TJC7");
}

#[tokio::test]
async fn test_decode_and_distance() {
    let client = DigipinClient::new().unwrap();

    let decoded = client.digipin().decode("39J-438-TJC7").await.unwrap();
    assert!((decoded.latitude - 28.613901).abs() < 1e-5);

    let distance = client
        .digipin()
        .distance("39J-438-TJC7", "4FK-595-8823")
        .await
        .unwrap();
    assert!((distance.meters - 1_148_000.0).abs() < 5_000.0);
}

#[tokio::test]
async fn test_invalid_pin_is_a_client_error() {
    let client = DigipinClient::new().unwrap();
    let err = client.digipin().decode("NOT-A-PIN").await.unwrap_err();
    assert!(err.is_client_error(), "{err}");
}
