use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ownership::Owned;
use crate::validation::FieldErrors;

/// Comment entity - attached to exactly one blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment; author, timestamp and likes are always server-assigned.
    pub fn new(author_id: Uuid, blog_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            blog_id,
            author_id,
            content,
            likes: 0,
            created_at: Utc::now(),
        }
    }

    /// Register one like.
    ///
    /// Not atomic at the storage level: two concurrent likes may both read the
    /// same count and one increment is lost.
    pub fn like(&mut self) {
        self.likes = match self.likes {
            n if n <= 0 => 1,
            n => n.saturating_add(1),
        };
    }

    pub fn apply(&mut self, changes: CommentChanges) {
        if let Some(blog_id) = changes.blog_id {
            self.blog_id = blog_id;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
    }
}

impl Owned for Comment {
    const KIND: &'static str = "comment";

    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

/// Validated fields for a new comment. The blog's existence is checked by the caller.
#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub blog_id: Uuid,
    pub content: String,
}

impl CommentDraft {
    pub fn validate(blog_id: Option<Uuid>, content: Option<&str>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        if blog_id.is_none() {
            errors.add("blog", crate::validation::REQUIRED);
        }
        let content = errors.require("content", content);

        errors.into_result()?;

        Ok(Self {
            blog_id: blog_id.unwrap_or_default(),
            content: content.unwrap_or_default().to_string(),
        })
    }
}

/// Partial comment update. `likes` is deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub blog_id: Option<Uuid>,
    pub content: Option<String>,
}

impl CommentChanges {
    pub fn validate(blog_id: Option<Uuid>, content: Option<&str>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let content = content.and_then(|c| errors.require("content", Some(c)));

        errors.into_result()?;

        Ok(Self {
            blog_id,
            content: content.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment() -> Comment {
        Comment::new(Uuid::new_v4(), Uuid::new_v4(), "Nice post".to_string())
    }

    #[test]
    fn test_new_comment_has_no_likes() {
        assert_eq!(comment().likes, 0);
    }

    #[test]
    fn test_like_initializes_then_increments() {
        let mut comment = comment();

        comment.like();
        assert_eq!(comment.likes, 1);

        comment.like();
        assert_eq!(comment.likes, 2);
    }

    #[test]
    fn test_like_recovers_from_negative_count() {
        let mut comment = comment();
        comment.likes = -3;

        comment.like();
        assert_eq!(comment.likes, 1);
    }

    #[test]
    fn test_apply_keeps_likes() {
        let mut comment = comment();
        comment.like();

        comment.apply(CommentChanges::validate(None, Some("Edited")).unwrap());

        assert_eq!(comment.content, "Edited");
        assert_eq!(comment.likes, 1);
    }

    #[test]
    fn test_draft_requires_blog_and_content() {
        let errors = CommentDraft::validate(None, None).unwrap_err();
        assert!(errors.contains("blog"));
        assert!(errors.contains("content"));
    }
}
