use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, Comment, Tag, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with identity lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user whose username OR email equals `identifier`.
    async fn find_by_login(&self, identifier: &str) -> Result<Option<User>, RepoError>;
}

/// Which blogs a listing should contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogFilter {
    /// Every blog, newest first.
    All,
    /// Blogs with a tag whose name contains the value, case-insensitively.
    Tag(String),
    /// Blogs relevant to a full-text query, best match first.
    Search(String),
}

impl BlogFilter {
    /// `tag` wins over `search`; blank values are ignored.
    pub fn from_params(tag: Option<&str>, search: Option<&str>) -> Self {
        let non_blank = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(String::from);

        if let Some(tag) = non_blank(tag) {
            BlogFilter::Tag(tag)
        } else if let Some(search) = non_blank(search) {
            BlogFilter::Search(search)
        } else {
            BlogFilter::All
        }
    }
}

/// Blog repository.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, Uuid> {
    async fn list(&self, filter: &BlogFilter, page: PageRequest) -> Result<Page<Blog>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    /// All tags ordered by name.
    async fn list_all(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Link a tag to a blog; linking twice is a no-op.
    async fn attach(&self, blog_id: Uuid, tag_id: Uuid) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a blog, oldest first.
    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}
