//! Balance lookups end to end: validation, request, decimals scaling.

use token_console::{
    config::DEFAULT_TOKEN_ADDRESS,
    domain::{error::QueryError, query::BalanceQuery},
};

use super::*;

#[tokio::test]
async fn test_balance_scaled_by_contract_decimals() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let _decimals = backend.respond_decimals(18).await;
    let balance_mock = backend
        .respond("GET", &format!("/token-balance/{ALICE}"), 200, r#""1000000000000000000""#)
        .await;

    let decimals = backend
        .chain
        .decimals(&address(DEFAULT_TOKEN_ADDRESS))
        .await
        .expect("decimals read");
    assert_eq!(decimals, 18);

    let mut query = BalanceQuery::new();
    query.input = ALICE.to_string();
    let target = query.begin(None).expect("valid address");
    let outcome = backend.api.token_balance(&target).await;
    query.finish(outcome, Some(decimals));

    assert_eq!(query.state.success().map(String::as_str), Some("1"));
    balance_mock.assert_async().await;
}

#[tokio::test]
async fn test_balance_without_decimals_shows_raw() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let _m = backend
        .respond("GET", &format!("/token-balance/{BOB}"), 200, r#""1234500""#)
        .await;

    let mut query = BalanceQuery::new();
    let target = query.begin(Some(BOB)).expect("valid address");
    query.finish(backend.api.token_balance(&target).await, None);

    assert_eq!(query.state.success().map(String::as_str), Some("1234500"));
    // Explicit address filled the empty field.
    assert_eq!(query.input, BOB);
}

#[tokio::test]
async fn test_malformed_addresses_never_hit_backend() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let m = backend
        .server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for bad in MALFORMED {
        let mut query = BalanceQuery::new();
        query.input = bad.to_string();
        assert_eq!(query.begin(None), Err(QueryError::InvalidAddress), "{bad:?}");
        assert_eq!(query.state.error(), Some("Invalid Ethereum address format"));
    }
    m.assert_async().await;
}

#[tokio::test]
async fn test_balance_http_failure() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let _m = backend
        .respond("GET", &format!("/token-balance/{ALICE}"), 502, "null")
        .await;

    let mut query = BalanceQuery::new();
    let target = query.begin(Some(ALICE)).expect("valid address");
    query.finish(backend.api.token_balance(&target).await, Some(18));

    assert_eq!(query.state.error(), Some("HTTP error! status: 502"));
    // Field is only filled on success.
    assert!(query.input.is_empty());
}

#[tokio::test]
async fn test_overlapping_lookups_last_response_wins() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let _alice = backend
        .respond("GET", &format!("/token-balance/{ALICE}"), 200, r#""5000000""#)
        .await;
    let _bob = backend
        .respond("GET", &format!("/token-balance/{BOB}"), 200, r#""7000000""#)
        .await;

    let mut query = BalanceQuery::new();
    let first = query.begin(Some(ALICE)).expect("valid address");
    let second = query.begin(Some(BOB)).expect("valid address");

    let (first, second) = futures::future::join(
        backend.api.token_balance(&first),
        backend.api.token_balance(&second),
    )
    .await;

    // Second request resolves first, then the stale first one lands.
    query.finish(second, Some(6));
    query.finish(first, Some(6));
    assert_eq!(query.state.success().map(String::as_str), Some("5"));
}
