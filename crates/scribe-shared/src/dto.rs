//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are optional so that missing values surface as field-level
//! validation errors instead of a generic JSON parse failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

/// Request to login with a username or an email address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Query parameters accepted by the blog listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogListQuery {
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

/// Request to create a blog. `tags` holds tag ids; unknown ids are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
}

/// Partial blog update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
    pub comments: Vec<CommentResponse>,
}

/// Request to comment on a blog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub blog: Option<Uuid>,
    pub content: Option<String>,
}

/// Partial comment update. Likes cannot be set through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub blog: Option<Uuid>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub blog: Uuid,
    pub author: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: i32,
}

/// Request to share a blog by email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareBlogRequest {
    pub email: Option<String>,
}
