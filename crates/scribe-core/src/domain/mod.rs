//! Domain entities - the core business objects.

mod blog;
mod comment;
mod ownership;
mod share;
mod tag;
mod user;

pub use blog::{Blog, BlogChanges, BlogDraft, TITLE_MAX_LEN};
pub use comment::{Comment, CommentChanges, CommentDraft};
pub use ownership::{Mutation, Owned, ensure_owner};
pub use share::compose_share;
pub use tag::{TAG_NAME_MAX_LEN, Tag};
pub use user::{Registration, RegistrationInput, User};
