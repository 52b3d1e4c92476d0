//! Integration tests for the project form and its tag editor.
//!
//! Tests cover:
//! - Field validation on blur and on submit
//! - Seeding the editor from an existing project
//! - The request body sent on create and update
//! - Invalid forms never reaching the backend

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

fn filled_form() -> ProjectForm {
    let mut form = ProjectForm::default();
    form.name = "Observatório".to_string();
    form.description = "Painéis de mobilidade urbana.".to_string();
    form.center_id = center_id(1).to_string();
    form.owner_id = owner_id(1).to_string();
    form.img_url = "https://picsum.photos/seed/obs/800/600".to_string();
    form.team_size = "8".to_string();
    form
}

#[test]
fn test_editing_seeds_tags_to_add_with_current_tags() {
    let x = tag_id(IA);
    let y = tag_id(WEB);
    let project = Project {
        tag_ids: [x, y].into_iter().collect(),
        ..make_project("6f6f0b1b-2d5a-4f4a-9d9b-111111111111", "Tutoria", 3, &[])
    };

    let editor = TagsEditor::for_project(&project);
    assert_eq!(editor.to_add().to_vec(), {
        let mut expected = vec![x, y];
        expected.sort();
        expected
    });
    assert!(editor.to_remove().is_empty());
}

#[test]
fn test_editor_allows_the_same_tag_in_both_sets() {
    let mut editor = TagsEditor::new();
    editor.toggle_add(tag_id(IA));
    editor.toggle_remove(tag_id(IA));
    editor.toggle_remove(tag_id(ML));

    assert!(editor.to_add().contains(&tag_id(IA)));
    assert!(editor.to_remove().contains(&tag_id(IA)));
    assert_eq!(editor.conflicts(), vec![tag_id(IA)]);

    editor.clear_remove();
    assert!(editor.conflicts().is_empty());
    assert_eq!(editor.to_add().len(), 1);
}

#[test]
fn test_blur_only_reports_the_blurred_field() {
    let mut form = ProjectForm::default();
    form.name = "ab".to_string();
    form.blur(Field::Name);
    assert_eq!(
        form.errors().get(Field::Name),
        Some("Name must have at least 3 characters.")
    );
    assert_eq!(form.errors().len(), 1);

    form.name = "abc".to_string();
    form.blur(Field::Name);
    assert!(form.errors().is_empty());
}

#[test]
fn test_submit_collects_every_field_error() {
    let mut form = ProjectForm::default();
    form.owner_id = "u1".to_string();
    form.img_url = "not a url".to_string();
    form.team_size = "0".to_string();
    let errors = form.submit().unwrap_err();

    assert_eq!(errors.get(Field::Name), Some("Name must have at least 3 characters."));
    assert_eq!(
        errors.get(Field::Description),
        Some("Description must have at least 10 characters.")
    );
    assert_eq!(errors.get(Field::CenterId), Some("Select a valid center."));
    assert_eq!(errors.get(Field::OwnerId), Some("Enter a valid identifier for the owner."));
    assert_eq!(errors.get(Field::ImgUrl), Some("Provide a valid image URL."));
    assert_eq!(errors.get(Field::TeamSize), Some("Minimum team size is 1."));
    assert_eq!(form.errors(), &errors);
}

#[test]
fn test_team_size_must_be_a_whole_number() {
    let mut form = filled_form();
    form.team_size = "2.5".to_string();
    form.blur(Field::TeamSize);
    assert_eq!(
        form.errors().get(Field::TeamSize),
        Some("Team size must be a whole number.")
    );
}

#[test]
fn test_valid_form_builds_request_with_both_tag_sets() {
    let mut form = filled_form();
    let valid = form.submit().expect("form is valid");
    assert_eq!(valid.team_size, 8);

    let mut editor = TagsEditor::new();
    editor.toggle_add(tag_id(DADOS));
    editor.toggle_remove(tag_id(WEB));
    let request = ProjectRequest::new(valid, &editor);

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["name"], "Observatório");
    assert_eq!(body["centerId"], center_id(1).to_string());
    assert_eq!(body["teamSize"], 8);
    assert_eq!(body["validForCreation"], true);
    assert_eq!(body["tagsToBeAdded"], json!([tag_id(DADOS)]));
    assert_eq!(body["tagsToBeRemoved"], json!([tag_id(WEB)]));
}

#[tokio::test]
async fn test_invalid_team_size_never_reaches_backend() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let client = stub.client(SessionState::ephemeral());
    let mut form = filled_form();
    form.team_size = "0".to_string();

    let result =
        actions::submit_project(&client, &mut form, &TagsEditor::new(), SubmitTarget::Create)
            .await;

    let err = result.unwrap_err();
    assert_eq!(
        err.field_errors().and_then(|e| e.get(Field::TeamSize)),
        Some("Minimum team size is 1.")
    );
    assert!(stub.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_posts_project_request() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let created = make_project("bbbb0b1b-2d5a-4f4a-9d9b-666666666666", "Observatório", 1, &[DADOS]);
    stub.respond(Method::POST, "/api/projects", StatusCode::CREATED, json!(created));
    let client = stub.client(SessionState::ephemeral());

    let mut editor = TagsEditor::new();
    editor.toggle_add(tag_id(DADOS));
    let mut form = filled_form();
    let project = actions::submit_project(&client, &mut form, &editor, SubmitTarget::Create).await?;

    assert_eq!(project.id, created.id);
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/api/projects");
    let body = requests[0].body.as_ref().expect("json body");
    assert_eq!(body["tagsToBeAdded"], json!([tag_id(DADOS)]));
    assert_eq!(body["tagsToBeRemoved"], json!([]));
    Ok(())
}

#[tokio::test]
async fn test_update_puts_to_project_path() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let existing = sample_projects().remove(1);
    let path = format!("/api/projects/{}", existing.id);
    stub.respond(Method::PUT, &path, StatusCode::OK, json!(existing));
    let client = stub.client(SessionState::ephemeral());

    let mut form = ProjectForm::from_project(&existing);
    let mut editor = TagsEditor::for_project(&existing);
    editor.toggle_remove(tag_id(WEB));
    actions::submit_project(&client, &mut form, &editor, SubmitTarget::Update(existing.id)).await?;

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].path, path);
    let body = requests[0].body.as_ref().expect("json body");
    // WEB is still in the seeded add set; both sets go out untouched.
    let added = body["tagsToBeAdded"].as_array().expect("array");
    assert_eq!(added.len(), 2);
    assert!(added.contains(&json!(tag_id(WEB))));
    assert_eq!(body["tagsToBeRemoved"], json!([tag_id(WEB)]));
    Ok(())
}

#[tokio::test]
async fn test_backend_rejection_surfaces_message() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.respond(
        Method::POST,
        "/api/projects",
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "message": "Center is archived." }),
    );
    let client = stub.client(SessionState::ephemeral());

    let mut form = filled_form();
    let err = actions::submit_project(&client, &mut form, &TagsEditor::new(), SubmitTarget::Create)
        .await
        .unwrap_err();

    match err {
        SubmitError::Api(ApiError::Backend { status, message }) => {
            assert_eq!(status.as_u16(), 422);
            assert_eq!(message, "Center is archived.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_backend_not_found_surfaces_message() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    stub.respond(
        Method::POST,
        "/api/projects",
        StatusCode::NOT_FOUND,
        json!({ "message": "Center does not exist." }),
    );
    let client = stub.client(SessionState::ephemeral());

    let mut form = filled_form();
    let err = actions::submit_project(&client, &mut form, &TagsEditor::new(), SubmitTarget::Create)
        .await
        .unwrap_err();

    match err {
        SubmitError::Api(api) => {
            assert!(matches!(api, ApiError::NotFound(_)));
            assert_eq!(api.user_message(), "Center does not exist.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_unchanged_edit_resends_current_tags() -> anyhow::Result<()> {
    let stub = StubBackend::start().await?;
    let existing = sample_projects().remove(1);
    assert_eq!(existing.tag_ids.len(), 2);
    let path = format!("/api/projects/{}", existing.id);
    stub.respond(Method::PUT, &path, StatusCode::OK, json!(existing));
    let client = stub.client(SessionState::ephemeral());

    let mut form = ProjectForm::from_project(&existing);
    let editor = TagsEditor::for_project(&existing);
    actions::submit_project(&client, &mut form, &editor, SubmitTarget::Update(existing.id)).await?;

    let requests = stub.requests();
    let body = requests[0].body.as_ref().expect("json body");
    let current: Vec<TagId> = existing.tag_ids.iter().copied().collect();
    assert_eq!(body["tagsToBeAdded"], json!(current));
    assert_eq!(body["tagsToBeRemoved"], json!([]));
    Ok(())
}
