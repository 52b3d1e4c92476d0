//! Integration tests for the HTTP client against an in-process backend.
//!
//! Tests cover:
//! - One-or-many normalization of collection endpoints
//! - Bearer token propagation
//! - Session teardown on 401
//! - Not-found and error body handling

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_collections_accept_arrays() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.serve_samples();
    let client = stub.client(SessionState::ephemeral());

    assert_eq!(client.get_tags().await?, sample_tags());
    assert_eq!(client.get_centers().await?, sample_centers());
    assert_eq!(client.get_projects().await?, sample_projects());
    Ok(())
}

#[tokio::test]
async fn test_single_object_is_wrapped_into_a_list() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let only = sample_tags().remove(0);
    stub.respond(Method::GET, "/api/tags", StatusCode::OK, json!(only));
    stub.respond(Method::GET, "/api/centers", StatusCode::OK, json!([]));
    let client = stub.client(SessionState::ephemeral());

    assert_eq!(client.get_tags().await?, vec![only]);
    assert!(client.get_centers().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_tag_ids_decode_as_empty() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let project = sample_projects().remove(0);
    let mut body = json!(project);
    body.as_object_mut().unwrap().remove("tagIds");
    stub.respond(Method::GET, "/api/projects", StatusCode::OK, json!([body]));
    let client = stub.client(SessionState::ephemeral());

    let projects = client.get_projects().await?;
    assert_eq!(projects.len(), 1);
    assert!(projects[0].tag_ids.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_requests_carry_bearer_token_only_when_signed_in() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.serve_samples();
    let session = SessionState::ephemeral();
    let client = stub.client(session);

    client.get_tags().await?;
    client.session().establish(Session::issued_now("tok-123"))?;
    client.get_centers().await?;

    let requests = stub.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer tok-123"));
    Ok(())
}

#[tokio::test]
async fn test_expired_session_sends_no_token() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.serve_samples();
    let client = stub.client(SessionState::ephemeral());
    let issued = time::OffsetDateTime::now_utc() - time::Duration::hours(4);
    client.session().establish(Session::issued_at("stale", issued))?;

    client.get_tags().await?;

    assert!(!client.is_authenticated());
    assert_eq!(stub.requests()[0].authorization, None);
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_clears_persisted_session() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.respond(
        Method::GET,
        "/api/projects",
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Token expired." }),
    );
    let (session, store, _dir) = persistent_session();
    session.establish(Session::issued_now("tok"))?;
    assert!(store.path().exists());
    let client = stub.client(session);

    let err = client.get_projects().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Token expired.");
    assert!(!client.is_authenticated());
    assert!(!store.path().exists());
    assert!(store.load().is_none());
    Ok(())
}

#[tokio::test]
async fn test_unknown_project_is_none() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let client = stub.client(SessionState::ephemeral());

    let missing = client.get_project(uuid::Uuid::new_v4()).await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_known_project_is_fetched_by_id() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let project = sample_projects().remove(3);
    stub.respond(
        Method::GET,
        &format!("/api/projects/{}", project.id),
        StatusCode::OK,
        json!(project),
    );
    let client = stub.client(SessionState::ephemeral());

    assert_eq!(client.get_project(project.id).await?, Some(project));
    Ok(())
}

#[tokio::test]
async fn test_server_error_without_body_uses_reason_phrase() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.respond(Method::GET, "/api/tags", StatusCode::INTERNAL_SERVER_ERROR, json!(null));
    let client = stub.client(SessionState::ephemeral());

    let err = client.get_tags().await.unwrap_err();
    assert!(!err.is_unauthorized());
    assert_eq!(err.user_message(), "Internal Server Error");
    Ok(())
}

#[tokio::test]
async fn test_catalogs_fail_independently() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.respond(Method::GET, "/api/tags", StatusCode::OK, json!(sample_tags()));
    stub.respond(Method::GET, "/api/centers", StatusCode::BAD_GATEWAY, json!({}));
    let client = stub.client(SessionState::ephemeral());

    let load = actions::load_catalogs(&client).await;
    assert_eq!(load.tags?.tags().len(), 10);
    assert!(load.centers.is_err());
    Ok(())
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.serve_samples();
    let client = unilink::ApiClient::new(
        format!("{}/", stub.base_url),
        std::sync::Arc::new(SessionState::ephemeral()),
    )?;

    client.get_tags().await?;
    assert_eq!(stub.requests()[0].path, "/api/tags");
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_survives_failed_session_removal() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.respond(Method::GET, "/api/tags", StatusCode::UNAUTHORIZED, json!({}));
    let (session, store, _dir) = persistent_session();
    session.establish(Session::issued_now("tok"))?;
    // A directory in place of the session file makes removal fail.
    std::fs::remove_file(store.path())?;
    std::fs::create_dir(store.path())?;
    std::fs::write(store.path().join("keep"), "x")?;
    let client = stub.client(session);

    let err = client.get_tags().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Unauthorized");
    assert!(!client.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_not_found_keeps_backend_message() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.respond(
        Method::GET,
        "/api/centers",
        StatusCode::NOT_FOUND,
        json!({ "error": "No centers registered." }),
    );
    let client = stub.client(SessionState::ephemeral());

    let err = client.get_centers().await.unwrap_err();
    assert_eq!(err.user_message(), "No centers registered.");
    Ok(())
}
