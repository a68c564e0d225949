//! Ownership policy applied before any mutation of an authored resource.

use uuid::Uuid;

use crate::error::DomainError;

/// A resource with a single author who alone may mutate it.
pub trait Owned {
    /// Human-readable resource kind used in denial messages.
    const KIND: &'static str;

    fn author_id(&self) -> Uuid;

    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author_id() == user_id
    }
}

/// Operation being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Edit,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Edit => "edit",
            Mutation::Delete => "delete",
        }
    }
}

/// Fails with [`DomainError::Forbidden`] unless `user_id` authored `resource`.
pub fn ensure_owner<T: Owned>(
    resource: &T,
    user_id: Uuid,
    mutation: Mutation,
) -> Result<(), DomainError> {
    if resource.is_owned_by(user_id) {
        return Ok(());
    }

    Err(DomainError::Forbidden(format!(
        "You do not have permission to {} this {}",
        mutation.verb(),
        T::KIND
    )))
}
