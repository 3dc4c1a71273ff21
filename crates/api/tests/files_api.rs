//! Integration tests for rooms and live files.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_file, create_room, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_room_defaults_name_to_slug(pool: PgPool) {
    let app = common::build_test_app(pool);

    let room = create_room(&app, "pair-session").await;

    assert_eq!(room["slug"], "pair-session");
    assert_eq!(room["name"], "pair-session");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_slug_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_room(&app, "demo").await;

    let response = post_json(app, "/api/v1/rooms", json!({"slug": "demo", "name": "Again"})).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_slug_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    for slug in ["No Caps", "-dash", "ab"] {
        let response = post_json(app.clone(), "/api/v1/rooms", json!({"slug": slug})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "slug {slug:?}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_room_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/room/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn kind_and_language_are_inferred_from_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_room(&app, "demo").await;

    let folder = create_file(&app, "demo", json!({"name": "src"})).await;
    let file = create_file(
        &app,
        "demo",
        json!({"name": "lib.rs", "parentId": folder["id"]}),
    )
    .await;
    let explicit = create_file(
        &app,
        "demo",
        json!({"name": "notes.txt", "language": "markdown"}),
    )
    .await;

    assert_eq!(folder["type"], "folder");
    assert_eq!(file["type"], "file");
    assert_eq!(file["language"], "rust");
    assert_eq!(file["parentId"], folder["id"]);
    assert_eq!(file["content"], "");
    assert_eq!(explicit["language"], "markdown");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn parent_must_be_a_folder_of_the_same_room(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_room(&app, "demo").await;
    create_room(&app, "other").await;
    let file = create_file(&app, "demo", json!({"name": "a.js"})).await;
    let foreign = create_file(&app, "other", json!({"name": "lib"})).await;

    let under_file = post_json(
        app.clone(),
        "/api/v1/room/demo/files",
        json!({"name": "b.js", "parentId": file["id"]}),
    )
    .await;
    assert_eq!(under_file.status(), StatusCode::BAD_REQUEST);

    let cross_room = post_json(
        app,
        "/api/v1/room/demo/files",
        json!({"name": "b.js", "parentId": foreign["id"]}),
    )
    .await;
    assert_eq!(cross_room.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bad_file_names_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_room(&app, "demo").await;

    for name in ["", "   ", "a/b.js"] {
        let response = post_json(app.clone(), "/api/v1/room/demo/files", json!({"name": name})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "name {name:?}");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_changes_only_given_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_room(&app, "demo").await;
    let file = create_file(&app, "demo", json!({"name": "a.js", "content": "1"})).await;
    let uri = format!("/api/v1/files/{}", file["id"]);

    let response = put_json(app.clone(), &uri, json!({"name": "b.js"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "b.js");
    assert_eq!(updated["content"], "1");
    assert_eq!(updated["language"], "javascript");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_unknown_file_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json(app, "/api/v1/files/777", json!({"content": "x"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Cascading delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_folder_removes_all_descendants(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_room(&app, "demo").await;
    let root = create_file(&app, "demo", json!({"name": "src"})).await;
    let nested = create_file(&app, "demo", json!({"name": "util", "parentId": root["id"]})).await;
    create_file(&app, "demo", json!({"name": "a.js", "parentId": root["id"]})).await;
    create_file(&app, "demo", json!({"name": "b.js", "parentId": nested["id"]})).await;
    create_file(&app, "demo", json!({"name": "keep.md"})).await;

    let response = delete(app.clone(), &format!("/api/v1/files/{}", root["id"])).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let room = body_json(get(app, "/api/v1/room/demo").await).await;
    let names: Vec<_> = room["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["keep.md"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_missing_file_is_noop_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = delete(app, "/api/v1/files/123456").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_file_history_survives(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_room(&app, "demo").await;
    let file = create_file(&app, "demo", json!({"name": "a.js", "content": "1"})).await;
    let created = body_json(
        post_json(
            app.clone(),
            "/api/v1/room/demo/commit",
            json!({"message": "init", "fileIds": [file["id"]]}),
        )
        .await,
    )
    .await;

    delete(app.clone(), &format!("/api/v1/files/{}", file["id"])).await;

    let commit = body_json(get(app, &format!("/api/v1/room/demo/commit/{}", created["id"])).await).await;
    assert_eq!(commit["files"][0]["content"], "1");
}
