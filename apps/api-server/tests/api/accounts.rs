use reqwest::Method;
use serde_json::{Value, json as body};

use crate::helpers::{TestApp, json, spawn_app};

fn registration(username: &str, email: &str) -> Value {
    body!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "username": username,
        "password": "correct horse battery staple",
        "password2": "correct horse battery staple",
    })
}

async fn register(app: &TestApp, username: &str, email: &str) -> reqwest::Response {
    app.post_json("/register/", &registration(username, email), None)
        .await
}

#[tokio::test]
async fn register_creates_user() {
    let app = spawn_app();

    let response = register(&app, "ada", "ada@example.com").await;

    assert_eq!(response.status().as_u16(), 201);
    let payload = json(response).await;
    assert_eq!(payload["success"], true);
    assert_eq!(payload["message"], "User created successfully");

    let stored = app.state.users.find_by_username("ada").await.unwrap().unwrap();
    assert_eq!(stored.email, "ada@example.com");
    assert_ne!(stored.password_hash, "correct horse battery staple");
}

#[tokio::test]
async fn register_rejects_mismatched_passwords() {
    let app = spawn_app();
    let mut payload = registration("ada", "ada@example.com");
    payload["password2"] = Value::from("something else");

    let response = app.post_json("/register/", &payload, None).await;

    assert_eq!(response.status().as_u16(), 400);
    let problem = json(response).await;
    assert_eq!(problem["errors"]["password2"][0], "Passwords must match.");
    assert!(app.state.users.find_by_username("ada").await.unwrap().is_none());
}

#[tokio::test]
async fn register_reports_missing_fields() {
    let app = spawn_app();

    let response = app.post_json("/register/", &body!({}), None).await;

    assert_eq!(response.status().as_u16(), 400);
    let errors = &json(response).await["errors"];
    for field in ["email", "username", "password", "password2"] {
        assert_eq!(errors[field][0], "This field is required.", "{field}");
    }
    assert!(errors.get("first_name").is_none());
}

#[tokio::test]
async fn register_rejects_taken_username_and_email() {
    let app = spawn_app();
    assert_eq!(register(&app, "ada", "ada@example.com").await.status().as_u16(), 201);

    let same_username = register(&app, "ada", "other@example.com").await;
    assert_eq!(same_username.status().as_u16(), 400);
    assert!(json(same_username).await["errors"]["username"].is_array());

    let same_email = register(&app, "lovelace", "ada@example.com").await;
    assert_eq!(same_email.status().as_u16(), 400);
    assert!(json(same_email).await["errors"]["email"].is_array());
}

#[tokio::test]
async fn login_accepts_username_or_email() {
    let app = spawn_app();
    register(&app, "ada", "ada@example.com").await;

    for identifier in ["ada", "ada@example.com"] {
        let response = app
            .post_json(
                "/login/",
                &body!({"username": identifier, "password": "correct horse battery staple"}),
                None,
            )
            .await;

        assert_eq!(response.status().as_u16(), 200, "{identifier}");
        let payload = json(response).await;
        assert_eq!(payload["token_type"], "Bearer");
        assert!(payload["expires_in"].as_u64().unwrap() > 0);

        let token = payload["access_token"].as_str().unwrap();
        let protected = app.get("/tags/", Some(token)).await;
        assert_eq!(protected.status().as_u16(), 200);
    }
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn_app();
    register(&app, "ada", "ada@example.com").await;

    let wrong_password = app
        .post_json("/login/", &body!({"username": "ada", "password": "nope"}), None)
        .await;
    let unknown_user = app
        .post_json("/login/", &body!({"username": "grace", "password": "nope"}), None)
        .await;

    assert_eq!(wrong_password.status().as_u16(), 400);
    assert_eq!(unknown_user.status().as_u16(), 400);
    assert_eq!(
        json(wrong_password).await["detail"],
        json(unknown_user).await["detail"]
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = spawn_app();

    let response = app
        .request(Method::POST, "/login/", None)
        .header("Content-Type", "application/json")
        .body("{\"username\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(json(response).await["status"], 400);
}
