//! Prefab API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use prefab_api::domain::AuthorizationLevel::{Edit, Own, View};
use prefab_api::domain::PrefabRepository;

use crate::common::{prefab, TestApp, TEST_USER};

fn valid_body() -> serde_json::Value {
    json!({"prefab": {"name": "S"}})
}

// GET /prefabs/{id}

#[tokio::test]
async fn test_get_prefab_non_existing() {
    let app = TestApp::new();

    let res = app.get("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_prefab_no_authorizations() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[]));

    let res = app.get("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_prefab_not_authorized() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("2", Own)]));

    let res = app.get("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_prefab() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", Edit)]));

    let res = app.get("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["_id"], "1");
    assert_eq!(res.body["authorizations"][0]["authorizationLevel"], "EDIT");
}

#[tokio::test]
async fn test_get_prefab_view_level() {
    let app = TestApp::new();
    app.store.insert(prefab("1", "other_test", &[("1", View)]));

    let res = app.get("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_prefab_requires_token() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", Own)]));

    let res = app.request("GET", "/api/v2/prefabs/1", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_prefab_rejects_bad_token() {
    let app = TestApp::new();

    let res = app
        .request("GET", "/api/v2/prefabs/1", None, Some("not-a-jwt"))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

// PUT /prefabs/{id}

#[tokio::test]
async fn test_update_prefab_missing_parameter() {
    let app = TestApp::new();

    let res = app.put("/api/v2/prefabs/1", None, TEST_USER).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_prefab_missing_prefab_field() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", Own)]));

    let res = app
        .put("/api/v2/prefabs/1", Some(json!({"name": "S"})), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let stored = app.store.find_by_id("1").await.unwrap().unwrap();
    assert_eq!(stored.name, "Rack");
}

#[tokio::test]
async fn test_update_prefab_non_existing() {
    let app = TestApp::new();

    let res = app
        .put("/api/v2/prefabs/1", Some(valid_body()), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_prefab_not_authorized() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", View)]));

    let res = app
        .put("/api/v2/prefabs/1", Some(valid_body()), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_prefab() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", Own)]));

    let res = app
        .put("/api/v2/prefabs/1", Some(valid_body()), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "S");

    let res = app.get("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.body["name"], "S");
}

#[tokio::test]
async fn test_update_prefab_with_edit_level() {
    let app = TestApp::new();
    app.store.insert(prefab("1", "other_test", &[("1", Edit)]));

    let res = app
        .put(
            "/api/v2/prefabs/1",
            Some(json!({"prefab": {"name": "S", "rack": {"capacity": 42}}})),
            TEST_USER,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["rack"]["capacity"], 42);
}

#[tokio::test]
async fn test_update_prefab_non_existing_ignores_body_contents() {
    let app = TestApp::new();

    let res = app
        .put("/api/v2/prefabs/1", Some(json!({"prefab": {"name": ""}})), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_prefab_accepts_empty_name() {
    let app = TestApp::new();
    app.store.insert(prefab("1", "other_test", &[("1", Edit)]));

    let res = app
        .put("/api/v2/prefabs/1", Some(json!({"prefab": {"name": ""}})), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "");
}

#[tokio::test]
async fn test_update_prefab_accepts_long_name() {
    let app = TestApp::new();
    app.store.insert(prefab("1", "other_test", &[("1", Edit)]));
    let name = "x".repeat(300);

    let res = app
        .put("/api/v2/prefabs/1", Some(json!({"prefab": {"name": name}})), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], name.as_str());
}

#[tokio::test]
async fn test_update_prefab_rejects_non_string_name() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", Own)]));

    let res = app
        .put("/api/v2/prefabs/1", Some(json!({"prefab": {"name": 7}})), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

// DELETE /prefabs/{id}

#[tokio::test]
async fn test_delete_prefab_non_existing() {
    let app = TestApp::new();

    let res = app.delete("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_prefab_different_user() {
    let app = TestApp::new();
    app.store.insert(prefab("1", "other_test", &[("1", View)]));

    let res = app.delete("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_delete_prefab_edit_level_forbidden() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", Edit)]));

    let res = app.delete("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_prefab() {
    let app = TestApp::new();
    app.store.insert(prefab("1", TEST_USER, &[("1", Own)]));

    let res = app.delete("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["ownerId"], TEST_USER);
    assert!(app.store.is_empty());

    let res = app.get("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_prefab_detaches_references() {
    let app = TestApp::new();
    let mut record = prefab("1", TEST_USER, &[("1", Own)]);
    record.topology_ids = vec!["t1".into(), "t2".into()];
    record.experiment_ids = vec!["e1".into()];
    app.store.insert(record);
    app.store.insert_topology("t1", vec!["1".into(), "9".into()]);
    app.store.insert_topology("t2", vec!["1".into()]);
    app.store.insert_experiment("e1", vec!["1".into()]);

    let res = app.delete("/api/v2/prefabs/1", TEST_USER).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["topologyIds"], json!(["t1", "t2"]));

    assert_eq!(app.store.topology_prefab_ids("t1"), Some(vec!["9".to_string()]));
    assert_eq!(app.store.topology_prefab_ids("t2"), Some(vec![]));
    assert_eq!(app.store.experiment_prefab_ids("e1"), Some(vec![]));
}

// POST /prefabs

#[tokio::test]
async fn test_create_prefab_missing_parameter() {
    let app = TestApp::new();

    let res = app.post("/api/v2/prefabs", None, TEST_USER).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_create_prefab_empty_name() {
    let app = TestApp::new();

    let res = app
        .post("/api/v2/prefabs", Some(json!({"prefab": {"name": ""}})), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["errors"][0]["field"], "prefab.name");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_create_prefab_lifecycle() {
    let app = TestApp::new();

    let res = app
        .post("/api/v2/prefabs", Some(json!({"prefab": {"name": "Rack A"}})), TEST_USER)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["ownerId"], TEST_USER);
    assert_eq!(res.body["authorizations"][0]["authorizationLevel"], "OWN");

    let id = res.body["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/v2/prefabs/{}", id);

    let res = app.get(&uri, TEST_USER).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.put(&uri, Some(valid_body()), TEST_USER).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.delete(&uri, "someone_else").await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.delete(&uri, TEST_USER).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "S");
}
