//! Token info: both requests must succeed.

use token_console::domain::query::{QueryState, TokenInfo, TokenInfoQuery};

use super::*;

#[tokio::test]
async fn test_token_info_success() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let name = backend.respond("GET", "/token-name", 200, r#""Test Token""#).await;
    let supply = backend
        .respond("GET", "/total-supply", 200, r#""1000000000000000000000000""#)
        .await;

    let mut query = TokenInfoQuery::new();
    query.begin();
    query.finish(backend.api.token_info().await);

    name.assert_async().await;
    supply.assert_async().await;
    assert_eq!(
        query.state,
        QueryState::Success(TokenInfo {
            name: "Test Token".to_string(),
            total_supply: "1000000000000000000000000".to_string(),
        })
    );
}

#[tokio::test]
async fn test_token_info_fails_if_either_request_fails() {
    if !localhost_binding_permitted() {
        return;
    }
    for (name_status, supply_status) in [(500, 200), (200, 404), (503, 503)] {
        let mut backend = TestBackend::start().await;
        let _name = backend
            .respond("GET", "/token-name", name_status, r#""Test Token""#)
            .await;
        let _supply = backend
            .respond("GET", "/total-supply", supply_status, r#""1000""#)
            .await;

        let mut query = TokenInfoQuery::new();
        query.begin();
        query.finish(backend.api.token_info().await);
        assert_eq!(
            query.state.error(),
            Some("Failed to fetch token information"),
            "name={name_status} supply={supply_status}"
        );
    }
}

#[tokio::test]
async fn test_token_info_refresh_reissues_both_requests() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let name = backend
        .server
        .mock("GET", "/token-name")
        .with_status(200)
        .with_body(r#"{"result":"Test Token"}"#)
        .expect(2)
        .create_async()
        .await;
    let supply = backend
        .server
        .mock("GET", "/total-supply")
        .with_status(200)
        .with_body(r#"{"result":"1000"}"#)
        .expect(2)
        .create_async()
        .await;

    let mut query = TokenInfoQuery::new();
    for _ in 0..2 {
        query.begin();
        query.finish(backend.api.token_info().await);
        assert!(query.state.success().is_some());
    }

    name.assert_async().await;
    supply.assert_async().await;
}
