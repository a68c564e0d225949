use reqwest::Method;
use serde_json::json as body;
use uuid::Uuid;

use crate::helpers::{TestApp, TestUser, json, spawn_app};

async fn comment_on(app: &TestApp, author: &TestUser, blog_id: Uuid, content: &str) -> Uuid {
    let response = app
        .post_json(
            "/comments/",
            &body!({"blog": blog_id, "content": content}),
            Some(&author.token),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let payload = json(response).await;
    payload["data"]["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn create_assigns_server_fields() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Post", "body").await;

    let response = app
        .post_json(
            "/comments/",
            &body!({"blog": blog.id, "content": "Nice", "likes": 99, "author": Uuid::new_v4()}),
            Some(&ada.token),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let payload = json(response).await;
    assert_eq!(payload["message"], "Comment created successfully");
    assert_eq!(payload["data"]["likes"], 0);
    assert_eq!(payload["data"]["author"], ada.id.to_string());
    assert_eq!(payload["data"]["blog"], blog.id.to_string());
}

#[tokio::test]
async fn create_requires_existing_blog_and_content() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Post", "body").await;

    let unknown_blog = app
        .post_json(
            "/comments/",
            &body!({"blog": Uuid::new_v4(), "content": "Hello?"}),
            Some(&ada.token),
        )
        .await;
    assert_eq!(unknown_blog.status().as_u16(), 400);
    assert!(json(unknown_blog).await["errors"]["blog"].is_array());

    let no_content = app
        .post_json("/comments/", &body!({"blog": blog.id}), Some(&ada.token))
        .await;
    assert_eq!(no_content.status().as_u16(), 400);
    assert!(json(no_content).await["errors"]["content"].is_array());

    let anonymous = app
        .post_json("/comments/", &body!({"blog": blog.id, "content": "hi"}), None)
        .await;
    assert_eq!(anonymous.status().as_u16(), 401);
}

#[tokio::test]
async fn read_requires_authentication() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Post", "body").await;
    let id = comment_on(&app, &ada, blog.id, "Readable").await;
    let path = format!("/comments/{id}/");

    assert_eq!(app.get(&path, None).await.status().as_u16(), 401);

    let response = app.get(&path, Some(&ada.token)).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json(response).await["content"], "Readable");

    let missing = app
        .get(&format!("/comments/{}/", Uuid::new_v4()), Some(&ada.token))
        .await;
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn liking_twice_counts_one_then_two() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let grace = app.create_user("grace").await;
    let blog = app.create_blog(&ada, "Post", "body").await;
    let id = comment_on(&app, &ada, blog.id, "Like me").await;
    let path = format!("/comments/{id}/");

    for expected in [1, 2] {
        let response = app
            .request(Method::POST, &path, Some(&grace.token))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let payload = json(response).await;
        assert_eq!(payload["message"], "Comment liked successfully");
        assert_eq!(payload["data"]["likes"], expected);
    }

    let unknown = app
        .request(
            Method::POST,
            &format!("/comments/{}/", Uuid::new_v4()),
            Some(&grace.token),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status().as_u16(), 404);
}

#[tokio::test]
async fn only_the_author_can_update_or_delete() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let grace = app.create_user("grace").await;
    let blog = app.create_blog(&ada, "Post", "body").await;
    let id = comment_on(&app, &ada, blog.id, "Original").await;
    let path = format!("/comments/{id}/");

    let stranger = app
        .put_json(&path, &body!({"content": "Defaced"}), Some(&grace.token))
        .await;
    assert_eq!(stranger.status().as_u16(), 403);
    assert_eq!(
        app.delete(&path, Some(&grace.token)).await.status().as_u16(),
        403
    );

    let author = app
        .put_json(&path, &body!({"content": "Edited", "likes": 50}), Some(&ada.token))
        .await;
    assert_eq!(author.status().as_u16(), 200);
    let payload = json(author).await;
    assert_eq!(payload["data"]["content"], "Edited");
    assert_eq!(payload["data"]["likes"], 0);

    assert_eq!(app.delete(&path, Some(&ada.token)).await.status().as_u16(), 204);
    assert_eq!(app.get(&path, Some(&ada.token)).await.status().as_u16(), 404);
}

#[tokio::test]
async fn deleting_a_blog_removes_its_comments() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Post", "body").await;
    let id = comment_on(&app, &ada, blog.id, "Doomed").await;

    let deleted = app
        .delete(&format!("/blogs/{}/", blog.id), Some(&ada.token))
        .await;
    assert_eq!(deleted.status().as_u16(), 204);

    let comment = app.get(&format!("/comments/{id}/"), Some(&ada.token)).await;
    assert_eq!(comment.status().as_u16(), 404);
}
