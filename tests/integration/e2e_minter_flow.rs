//! Minter role checks and minting end to end.

use token_console::domain::{
    error::QueryError,
    query::{MintCommand, MinterRoleQuery, QueryState},
};

use super::*;

#[tokio::test]
async fn test_role_check_defaults_to_connected_wallet() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let m = backend
        .server
        .mock("GET", "/check-minter-role")
        .match_query(mockito::Matcher::UrlEncoded("address".into(), ALICE.into()))
        .with_status(200)
        .with_body(r#"{"result":true}"#)
        .create_async()
        .await;

    let wallet = address(ALICE);
    let mut query = MinterRoleQuery::new();
    let target = query.begin(None, Some(&wallet)).expect("wallet address");
    let outcome = backend.api.check_minter_role(&target).await;
    query.finish(target, outcome);

    m.assert_async().await;
    let role = query.state.success().expect("role checked");
    assert!(role.is_minter);
    assert_eq!(role.describe(), format!("{ALICE} has minter role"));
    assert_eq!(query.input, ALICE);
}

#[tokio::test]
async fn test_role_check_for_typed_address() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let _m = backend.respond("GET", "/check-minter-role", 200, "false").await;

    let wallet = address(ALICE);
    let mut query = MinterRoleQuery::new();
    query.input = BOB.to_string();
    let target = query.begin(None, Some(&wallet)).expect("typed address");
    assert_eq!(target.as_str(), BOB);

    let outcome = backend.api.check_minter_role(&target).await;
    query.finish(target, outcome);
    assert_eq!(
        query.state.success().map(|r| r.describe()),
        Some(format!("{BOB} does not have minter role"))
    );
}

#[tokio::test]
async fn test_mint_reports_backend_outcome() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let wallet = address(ALICE);

    let ok = backend.respond("POST", "/mint-tokens", 200, "true").await;
    let mut command = MintCommand::new();
    let target = command.begin(Some(&wallet)).expect("wallet address");
    command.finish(backend.api.mint_tokens(&target).await);
    assert_eq!(command.state, QueryState::Success(true));
    assert_eq!(
        command.state.success().copied().map(MintCommand::describe),
        Some("Token minting successful")
    );
    ok.remove_async().await;

    let failed = backend.respond("POST", "/mint-tokens", 200, "false").await;
    let target = command.begin(Some(&wallet)).expect("filled address");
    command.finish(backend.api.mint_tokens(&target).await);
    assert_eq!(
        command.state.success().copied().map(MintCommand::describe),
        Some("Token minting failed")
    );
    failed.remove_async().await;

    let _error = backend.respond("POST", "/mint-tokens", 500, "null").await;
    let target = command.begin(Some(&wallet)).expect("filled address");
    command.finish(backend.api.mint_tokens(&target).await);
    assert_eq!(command.state.error(), Some("HTTP error! status: 500"));
}

#[tokio::test]
async fn test_mint_sends_resolved_address_in_body() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let m = backend
        .server
        .mock("POST", "/mint-tokens")
        .match_body(mockito::Matcher::Json(serde_json::json!({ "address": BOB })))
        .with_status(200)
        .with_body(r#"{"result":true}"#)
        .create_async()
        .await;

    let mut command = MintCommand::new();
    command.input = BOB.to_string();
    let target = command.begin(Some(&address(ALICE))).expect("typed address");
    command.finish(backend.api.mint_tokens(&target).await);

    m.assert_async().await;
    assert_eq!(command.state, QueryState::Success(true));
}

#[tokio::test]
async fn test_minter_actions_reject_malformed_addresses() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut backend = TestBackend::start().await;
    let get = backend
        .server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let post = backend
        .server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for bad in MALFORMED.iter().filter(|s| !s.is_empty()) {
        let mut role = MinterRoleQuery::new();
        role.input = bad.to_string();
        assert_eq!(role.begin(None, None), Err(QueryError::InvalidAddress), "{bad:?}");

        let mut mint = MintCommand::new();
        mint.input = bad.to_string();
        assert_eq!(mint.begin(None), Err(QueryError::InvalidAddress), "{bad:?}");
        assert_eq!(mint.state.error(), Some("Invalid Ethereum address format"));
    }

    // Nothing typed and no wallet connected.
    assert_eq!(MinterRoleQuery::new().begin(None, None), Err(QueryError::InvalidAddress));
    assert_eq!(MintCommand::new().begin(None), Err(QueryError::InvalidAddress));

    get.assert_async().await;
    post.assert_async().await;
}
