mod helpers;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use helpers::{make_malicious_folder, TestApp, SANITIZED_IMAGE};
use noteful::application::FolderRepository;
use serde_json::{json, Value};

fn folders_json() -> Value {
    json!([
        { "id": 1, "folder_name": "First Test Folder" },
        { "id": 2, "folder_name": "Second Test Folder" },
        { "id": 3, "folder_name": "Third Test Folder" },
        { "id": 4, "folder_name": "Fourth Test Folder" },
    ])
}

#[tokio::test]
async fn given_no_folders_when_listing_then_returns_empty_array() -> Result<()> {
    // Arrange
    let app = TestApp::new()?;

    // Act
    let response = app.get("/api/folders").await?;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()?, json!([]));
    Ok(())
}

#[tokio::test]
async fn given_folders_when_listing_then_returns_all_in_order() -> Result<()> {
    let app = TestApp::with_folders()?;

    let response = app.get("/api/folders").await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()?, folders_json());
    Ok(())
}

#[tokio::test]
async fn given_malicious_folder_when_listing_then_removes_xss_content() -> Result<()> {
    // Arrange
    let app = TestApp::new()?;
    app.store.seed_folders(&[make_malicious_folder()])?;

    // Act
    let response = app.get("/api/folders").await?;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()?[0]["folder_name"], SANITIZED_IMAGE);
    Ok(())
}

#[tokio::test]
async fn given_no_folders_when_getting_by_id_then_returns_404() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.get("/api/folders/1000").await?;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json()?,
        json!({ "error": { "message": "Folder does not exist" } })
    );
    Ok(())
}

#[tokio::test]
async fn given_folders_when_getting_by_id_then_returns_that_folder() -> Result<()> {
    let app = TestApp::with_folders()?;

    let response = app.get("/api/folders/2").await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()?, folders_json()[1]);
    Ok(())
}

#[tokio::test]
async fn given_malicious_folder_when_getting_by_id_then_removes_xss_content() -> Result<()> {
    let app = TestApp::new()?;
    app.store.seed_folders(&[make_malicious_folder()])?;

    let response = app.get("/api/folders/911").await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()?["folder_name"], SANITIZED_IMAGE);
    Ok(())
}

#[tokio::test]
async fn given_non_numeric_id_when_getting_then_returns_404() -> Result<()> {
    let app = TestApp::with_folders()?;

    let response = app.get("/api/folders/not-a-number").await?;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn given_new_folder_when_posting_then_creates_and_fetch_matches() -> Result<()> {
    // Arrange
    let app = TestApp::new()?;

    // Act
    let created = app
        .post("/api/folders", json!({ "folder_name": "What could grapes replace?" }))
        .await?;

    // Assert
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json()?;
    assert_eq!(body["folder_name"], "What could grapes replace?");
    let id = body["id"].as_i64().expect("id is an integer");
    assert_eq!(
        created.header(header::LOCATION),
        Some(format!("/api/folders/{id}").as_str())
    );

    let fetched = app.get(&format!("/api/folders/{id}")).await?;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);
    Ok(())
}

#[tokio::test]
async fn given_missing_name_when_posting_then_returns_400() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.post("/api/folders", json!({})).await?;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()?,
        json!({ "error": { "message": "Folder name is required" } })
    );
    assert!(app.get("/api/folders").await?.json()?.as_array().is_some_and(Vec::is_empty));
    Ok(())
}

#[tokio::test]
async fn given_malicious_name_when_posting_then_response_is_sanitized() -> Result<()> {
    let app = TestApp::new()?;
    let malicious = make_malicious_folder();

    let response = app
        .post("/api/folders", json!({ "folder_name": malicious.folder_name }))
        .await?;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()?["folder_name"], SANITIZED_IMAGE);
    Ok(())
}

#[tokio::test]
async fn given_malformed_json_when_posting_then_returns_400() -> Result<()> {
    let app = TestApp::new()?;
    let response = app
        .send_raw(Method::POST, "/api/folders", "{\"folder_name\": ")
        .await?;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.list_folders()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_no_folders_when_deleting_then_returns_404() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.delete("/api/folders/1000").await?;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json()?,
        json!({ "error": { "message": "Folder does not exist" } })
    );
    Ok(())
}

#[tokio::test]
async fn given_folders_when_deleting_then_removes_exactly_one() -> Result<()> {
    // Arrange
    let app = TestApp::with_folders()?;
    let id_to_remove = 2;

    // Act
    let response = app.delete(&format!("/api/folders/{id_to_remove}")).await?;

    // Assert
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    let expected: Vec<Value> = folders_json()
        .as_array()
        .expect("fixture is an array")
        .iter()
        .filter(|folder| folder["id"] != id_to_remove)
        .cloned()
        .collect();
    let remaining = app.get("/api/folders").await?;
    assert_eq!(remaining.json()?, Value::Array(expected));
    Ok(())
}

#[tokio::test]
async fn given_no_folders_when_patching_without_body_then_returns_404() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.patch_empty("/api/folders/1000").await?;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json()?,
        json!({ "error": { "message": "Folder does not exist" } })
    );
    Ok(())
}

#[tokio::test]
async fn given_folders_when_patching_name_then_updates_folder() -> Result<()> {
    // Arrange
    let app = TestApp::with_folders()?;
    let new_name = "Hot Bagels Aren't Explicitly Threatening";

    // Act
    let response = app
        .patch("/api/folders/1", json!({ "folder_name": new_name }))
        .await?;

    // Assert
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());
    let fetched = app.get("/api/folders/1").await?;
    assert_eq!(fetched.json()?, json!({ "id": 1, "folder_name": new_name }));
    Ok(())
}

#[tokio::test]
async fn given_folders_when_patching_irrelevant_fields_then_returns_400() -> Result<()> {
    let app = TestApp::with_folders()?;

    let response = app
        .patch("/api/folders/2", json!({ "irrelevantField": "potatoes" }))
        .await?;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()?,
        json!({ "error": { "message": "Request body requires folder name" } })
    );
    Ok(())
}

#[tokio::test]
async fn given_empty_name_when_patching_then_treated_as_absent() -> Result<()> {
    let app = TestApp::with_folders()?;

    let response = app.patch("/api/folders/3", json!({ "folder_name": "" })).await?;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fetched = app.get("/api/folders/3").await?;
    assert_eq!(fetched.json()?, folders_json()[2]);
    Ok(())
}
