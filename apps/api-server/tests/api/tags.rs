use serde_json::json as body;

use crate::helpers::{json, spawn_app};

#[tokio::test]
async fn tags_require_authentication() {
    let app = spawn_app();

    assert_eq!(app.get("/tags/", None).await.status().as_u16(), 401);
    let create = app.post_json("/tags/", &body!({"name": "rust"}), None).await;
    assert_eq!(create.status().as_u16(), 401);
}

#[tokio::test]
async fn created_tags_are_listed_by_name() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;

    for name in ["web", "async"] {
        let response = app
            .post_json("/tags/", &body!({"name": name}), Some(&ada.token))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        assert_eq!(json(response).await["data"]["name"], name);
    }

    let listed = json(app.get("/tags/", Some(&ada.token)).await).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|tag| tag["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["async", "web"]);
}

#[tokio::test]
async fn tag_names_are_validated() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    app.create_tag("rust").await;

    let duplicate = app
        .post_json("/tags/", &body!({"name": "rust"}), Some(&ada.token))
        .await;
    assert_eq!(duplicate.status().as_u16(), 400);
    assert!(json(duplicate).await["errors"]["name"].is_array());

    let blank = app
        .post_json("/tags/", &body!({"name": "  "}), Some(&ada.token))
        .await;
    assert_eq!(blank.status().as_u16(), 400);

    let long = app
        .post_json("/tags/", &body!({"name": "t".repeat(51)}), Some(&ada.token))
        .await;
    assert_eq!(long.status().as_u16(), 400);
}
