use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::FieldErrors;

pub const TAG_NAME_MAX_LEN: usize = 50;

/// Tag entity - a label shared by many blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }

    /// Case-insensitive substring match used by the tag filter.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn validate_name(name: Option<&str>) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.require("name", name).map(str::trim);
        if let Some(name) = name {
            errors.max_length("name", name, TAG_NAME_MAX_LEN);
        }

        errors.into_result()?;
        Ok(name.unwrap_or_default().to_string())
    }
}
