use serde_json::json as body;
use uuid::Uuid;

use crate::helpers::{json, spawn_app};

#[tokio::test]
async fn share_sends_the_composed_message() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Ownership", "Borrowing explained").await;

    let response = app
        .post_json(
            &format!("/blogs/share/{}/", blog.id),
            &body!({"email": "friend@example.com"}),
            Some(&ada.token),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json(response).await["message"], "Blog shared successfully");

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["friend@example.com".to_string()]);
    assert_eq!(sent[0].subject, "Blog Share: Ownership");
    assert_eq!(
        sent[0].body,
        "Check out this blog post titled 'Ownership': Borrowing explained"
    );
}

#[tokio::test]
async fn share_requires_an_email() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Ownership", "Borrowing explained").await;

    let response = app
        .post_json(
            &format!("/blogs/share/{}/", blog.id),
            &body!({}),
            Some(&ada.token),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(json(response).await["errors"]["email"].is_array());
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn share_unknown_blog_or_anonymous_fails() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Ownership", "Borrowing explained").await;

    let unknown = app
        .post_json(
            &format!("/blogs/share/{}/", Uuid::new_v4()),
            &body!({"email": "friend@example.com"}),
            Some(&ada.token),
        )
        .await;
    assert_eq!(unknown.status().as_u16(), 404);

    let anonymous = app
        .post_json(
            &format!("/blogs/share/{}/", blog.id),
            &body!({"email": "friend@example.com"}),
            None,
        )
        .await;
    assert_eq!(anonymous.status().as_u16(), 401);
    assert!(app.mailer.sent().is_empty());
}
