use std::net::TcpListener;
use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use uuid::Uuid;

use api_server::startup;
use api_server::state::AppState;
use scribe_core::domain::{Blog, BlogDraft, Registration, Tag, User};
use scribe_infra::{JwtConfig, JwtTokenService, LogMailer};

pub struct TestApp {
    pub address: String,
    pub state: AppState,
    pub mailer: Arc<LogMailer>,
    client: Client,
}

/// A stored user together with a valid access token.
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

/// Start the server on a random port, backed by a fresh in-memory store.
pub fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let mailer = Arc::new(LogMailer::new("noreply@scribe.test"));
    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "integration-test-secret".to_string(),
        ..JwtConfig::default()
    }));
    let state = AppState::in_memory(mailer.clone(), tokens);

    let server = startup::run(listener, state.clone()).expect("Failed to start server");
    tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        state,
        mailer,
        client: Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, path, token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Response {
        self.request(Method::POST, path, token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Response {
        self.request(Method::PUT, path, token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Response {
        self.request(Method::DELETE, path, token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Store a user directly and mint a token for it. The user cannot log in.
    pub async fn create_user(&self, username: &str) -> TestUser {
        let registration = Registration {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        };
        let user = self
            .state
            .users
            .create(User::new(registration, "not-a-real-hash".to_string()))
            .await
            .unwrap();
        let token = self
            .state
            .tokens
            .generate_token(user.id, &user.username)
            .unwrap();

        TestUser { id: user.id, token }
    }

    pub async fn create_blog(&self, author: &TestUser, title: &str, content: &str) -> Blog {
        let draft = BlogDraft {
            title: title.to_string(),
            content: content.to_string(),
        };
        self.state
            .blogs
            .create(Blog::new(author.id, draft))
            .await
            .unwrap()
    }

    pub async fn create_tag(&self, name: &str) -> Tag {
        self.state
            .tags
            .create(Tag::new(name.to_string()))
            .await
            .unwrap()
    }

    pub async fn tag_blog(&self, blog: &Blog, tag: &Tag) {
        self.state.tags.attach(blog.id, tag.id).await.unwrap();
    }
}

pub async fn json(response: Response) -> serde_json::Value {
    response.json().await.expect("Response body is not JSON")
}
