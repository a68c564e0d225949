use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ownership::Owned;
use crate::validation::FieldErrors;

pub const TITLE_MAX_LEN: usize = 200;

/// Blog entity - a post written by a single author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog owned by `author_id`.
    pub fn new(author_id: Uuid, draft: BlogDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update and bump `updated_at`.
    pub fn apply(&mut self, changes: BlogChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for Blog {
    const KIND: &'static str = "blog";

    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

/// Validated fields for a new blog.
#[derive(Debug, Clone)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
}

impl BlogDraft {
    pub fn validate(title: Option<&str>, content: Option<&str>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = errors.require("title", title);
        if let Some(title) = title {
            errors.max_length("title", title, TITLE_MAX_LEN);
        }
        let content = errors.require("content", content);

        errors.into_result()?;

        Ok(Self {
            title: title.unwrap_or_default().to_string(),
            content: content.unwrap_or_default().to_string(),
        })
    }
}

/// Partial blog update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl BlogChanges {
    pub fn validate(title: Option<&str>, content: Option<&str>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        // Present-but-blank is rejected the same way as on create.
        let title = title.and_then(|t| errors.require("title", Some(t)));
        if let Some(title) = title {
            errors.max_length("title", title, TITLE_MAX_LEN);
        }
        let content = content.and_then(|c| errors.require("content", Some(c)));

        errors.into_result()?;

        Ok(Self {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        })
    }
}
