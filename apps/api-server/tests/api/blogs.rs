use serde_json::{Value, json as body};
use uuid::Uuid;

use crate::helpers::{json, spawn_app};

fn titles(page: &Value) -> Vec<String> {
    page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|blog| blog["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn listing_requires_a_valid_token() {
    let app = spawn_app();

    assert_eq!(app.get("/blogs/", None).await.status().as_u16(), 401);
    assert_eq!(app.get("/blogs/", Some("garbage")).await.status().as_u16(), 401);
}

#[tokio::test]
async fn create_blog_attaches_known_tags_only() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let rust = app.create_tag("rust").await;

    let response = app
        .post_json(
            "/blogs/",
            &body!({
                "title": "Ownership",
                "content": "Borrowing explained",
                "tags": [rust.id, Uuid::new_v4()],
            }),
            Some(&ada.token),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let payload = json(response).await;
    assert_eq!(payload["message"], "Blog created successfully");
    assert_eq!(payload["data"]["author"], ada.id.to_string());
    assert_eq!(payload["data"]["tags"].as_array().unwrap().len(), 1);
    assert_eq!(payload["data"]["tags"][0]["name"], "rust");
}

#[tokio::test]
async fn create_blog_validates_fields() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;

    let missing = app
        .post_json("/blogs/", &body!({"content": "body"}), Some(&ada.token))
        .await;
    assert_eq!(missing.status().as_u16(), 400);
    assert!(json(missing).await["errors"]["title"].is_array());

    let too_long = app
        .post_json(
            "/blogs/",
            &body!({"title": "x".repeat(201), "content": "body"}),
            Some(&ada.token),
        )
        .await;
    assert_eq!(too_long.status().as_u16(), 400);
    assert!(json(too_long).await["errors"]["title"].is_array());
}

#[tokio::test]
async fn read_is_public_and_embeds_relations() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let blog = app.create_blog(&ada, "Hello", "World").await;
    let tag = app.create_tag("intro").await;
    app.tag_blog(&blog, &tag).await;
    app.post_json(
        "/comments/",
        &body!({"blog": blog.id, "content": "First!"}),
        Some(&ada.token),
    )
    .await;

    let response = app.get(&format!("/blogs/{}/", blog.id), None).await;

    assert_eq!(response.status().as_u16(), 200);
    let payload = json(response).await;
    assert_eq!(payload["title"], "Hello");
    assert_eq!(payload["tags"][0]["name"], "intro");
    assert_eq!(payload["comments"][0]["content"], "First!");
}

#[tokio::test]
async fn read_unknown_blog_is_not_found() {
    let app = spawn_app();

    let unknown = app.get(&format!("/blogs/{}/", Uuid::new_v4()), None).await;
    assert_eq!(unknown.status().as_u16(), 404);

    let not_an_id = app.get("/blogs/42/", None).await;
    assert_eq!(not_an_id.status().as_u16(), 404);
}

#[tokio::test]
async fn only_the_author_can_update() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let grace = app.create_user("grace").await;
    let blog = app.create_blog(&ada, "Draft", "Original body").await;
    let path = format!("/blogs/{}/", blog.id);

    let anonymous = app.put_json(&path, &body!({"title": "Nope"}), None).await;
    assert_eq!(anonymous.status().as_u16(), 401);

    let stranger = app
        .put_json(&path, &body!({"title": "Hijacked"}), Some(&grace.token))
        .await;
    assert_eq!(stranger.status().as_u16(), 403);
    assert_eq!(
        json(stranger).await["detail"],
        "You do not have permission to edit this blog"
    );

    let author = app
        .put_json(&path, &body!({"title": "Final"}), Some(&ada.token))
        .await;
    assert_eq!(author.status().as_u16(), 200);
    let payload = json(author).await;
    assert_eq!(payload["data"]["title"], "Final");
    assert_eq!(payload["data"]["content"], "Original body");

    let missing = app
        .put_json(
            &format!("/blogs/{}/", Uuid::new_v4()),
            &body!({"title": "Ghost"}),
            Some(&ada.token),
        )
        .await;
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn only_the_author_can_delete() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let grace = app.create_user("grace").await;
    let blog = app.create_blog(&ada, "Ephemeral", "Soon gone").await;
    let path = format!("/blogs/{}/", blog.id);

    assert_eq!(app.delete(&path, Some(&grace.token)).await.status().as_u16(), 403);
    assert_eq!(app.delete(&path, Some(&ada.token)).await.status().as_u16(), 204);
    assert_eq!(app.get(&path, None).await.status().as_u16(), 404);
}

#[tokio::test]
async fn twelve_blogs_paginate_five_five_two() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    for i in 0..12 {
        app.create_blog(&ada, &format!("Post {i}"), "body").await;
    }

    let first = json(app.get("/blogs/", Some(&ada.token)).await).await;
    assert_eq!(first["count"], 12);
    assert_eq!(first["results"].as_array().unwrap().len(), 5);
    assert_eq!(first["next"], app.url("/blogs/?page=2"));
    assert!(first["previous"].is_null());

    let second = json(app.get("/blogs/?page=2", Some(&ada.token)).await).await;
    assert_eq!(second["results"].as_array().unwrap().len(), 5);
    assert_eq!(second["next"], app.url("/blogs/?page=3"));
    assert_eq!(second["previous"], app.url("/blogs/"));

    let third = json(app.get("/blogs/?page=3", Some(&ada.token)).await).await;
    assert_eq!(third["results"].as_array().unwrap().len(), 2);
    assert!(third["next"].is_null());
    assert_eq!(third["previous"], app.url("/blogs/?page=2"));

    let mut seen: Vec<String> = [titles(&first), titles(&second), titles(&third)].concat();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 12);
}

#[tokio::test]
async fn invalid_pages_are_not_found() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    app.create_blog(&ada, "Only", "one").await;

    for page in ["2", "0", "abc", "-1", "18446744073709551615"] {
        let response = app
            .get(&format!("/blogs/?page={page}"), Some(&ada.token))
            .await;
        assert_eq!(response.status().as_u16(), 404, "page={page}");
        assert_eq!(json(response).await["detail"], "Invalid page.");
    }

    let response = app
        .get("/blogs/?search=one&page=18446744073709551615", Some(&ada.token))
        .await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(json(response).await["detail"], "Invalid page.");
}

#[tokio::test]
async fn empty_listing_has_one_page() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;

    let response = app.get("/blogs/", Some(&ada.token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let page = json(response).await;
    assert_eq!(page["count"], 0);
    assert!(page["results"].as_array().unwrap().is_empty());
    assert!(page["next"].is_null());
}

#[tokio::test]
async fn tag_filter_matches_substring_case_insensitively() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let rustacean = app.create_tag("Rustacean").await;
    let rustlang = app.create_tag("rustlang").await;
    let python = app.create_tag("python").await;

    let both = app.create_blog(&ada, "Both rust tags", "body").await;
    app.tag_blog(&both, &rustacean).await;
    app.tag_blog(&both, &rustlang).await;
    let snake = app.create_blog(&ada, "Snakes", "body").await;
    app.tag_blog(&snake, &python).await;
    app.create_blog(&ada, "Untagged", "body").await;

    let page = json(app.get("/blogs/?tag=RUST", Some(&ada.token)).await).await;

    assert_eq!(page["count"], 1);
    assert_eq!(titles(&page), vec!["Both rust tags"]);
}

#[tokio::test]
async fn tag_filter_links_keep_the_filter() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let rust = app.create_tag("rust").await;
    for i in 0..6 {
        let blog = app.create_blog(&ada, &format!("Rust {i}"), "body").await;
        app.tag_blog(&blog, &rust).await;
    }

    let page = json(app.get("/blogs/?tag=rust", Some(&ada.token)).await).await;

    assert_eq!(page["count"], 6);
    assert_eq!(page["next"], app.url("/blogs/?tag=rust&page=2"));
}

#[tokio::test]
async fn search_finds_content_only_match() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    app.create_blog(&ada, "Gardening", "Tomatoes need plenty of sun").await;
    app.create_blog(&ada, "Cooking", "Boil the pasta in salted water").await;
    app.create_blog(&ada, "Travel", "Trains across the continent").await;

    let page = json(app.get("/blogs/?search=tomatoes", Some(&ada.token)).await).await;

    assert_eq!(page["count"], 1);
    assert_eq!(titles(&page), vec!["Gardening"]);
}

#[tokio::test]
async fn tag_takes_precedence_over_search() {
    let app = spawn_app();
    let ada = app.create_user("ada").await;
    let python = app.create_tag("python").await;
    let snake = app.create_blog(&ada, "Snakes", "Pythons are large").await;
    app.tag_blog(&snake, &python).await;
    app.create_blog(&ada, "Gardening", "Tomatoes need plenty of sun").await;

    let page = json(
        app.get("/blogs/?tag=python&search=tomatoes", Some(&ada.token))
            .await,
    )
    .await;

    assert_eq!(titles(&page), vec!["Snakes"]);
}
