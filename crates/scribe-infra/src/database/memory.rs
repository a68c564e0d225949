//! In-memory store - used when no database is configured, and by tests.
//!
//! Mirrors the relational schema closely enough for the handlers: unique
//! usernames, emails and tag names, foreign-key checks on insert and cascading
//! deletes. Data is lost on process restart.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Blog, Comment, Tag, User};
use scribe_core::error::RepoError;
use scribe_core::pagination::{Page, PageRequest};
use scribe_core::ports::{
    BaseRepository, BlogFilter, BlogRepository, CommentRepository, TagRepository, UserRepository,
};
use scribe_core::search::{is_relevant, relevance};

#[derive(Default)]
pub struct Tables {
    users: HashMap<Uuid, User>,
    blogs: HashMap<Uuid, Blog>,
    tags: HashMap<Uuid, Tag>,
    blog_tags: HashSet<(Uuid, Uuid)>,
    comments: HashMap<Uuid, Comment>,
}

/// A row type stored in one of the in-memory tables.
pub trait Row: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn table(tables: &Tables) -> &HashMap<Uuid, Self>;
    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self>;

    /// Unique and foreign-key constraints.
    fn check(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    /// Cascade after the row with `id` was removed.
    fn cascade(_id: Uuid, _tables: &mut Tables) {}
}

impl Row for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.users
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        for other in tables.users.values().filter(|u| u.id != self.id) {
            if other.username == self.username {
                return Err(RepoError::Constraint("users_username_key".to_string()));
            }
            if other.email == self.email {
                return Err(RepoError::Constraint("users_email_key".to_string()));
            }
        }
        Ok(())
    }

    fn cascade(id: Uuid, tables: &mut Tables) {
        let blogs: Vec<Uuid> = tables
            .blogs
            .values()
            .filter(|b| b.author_id == id)
            .map(|b| b.id)
            .collect();
        for blog_id in blogs {
            tables.blogs.remove(&blog_id);
            Blog::cascade(blog_id, tables);
        }
        tables.comments.retain(|_, c| c.author_id != id);
    }
}

impl Row for Blog {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.blogs
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.blogs
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        if !tables.users.contains_key(&self.author_id) {
            return Err(RepoError::Constraint("blogs_author_id_fkey".to_string()));
        }
        Ok(())
    }

    fn cascade(id: Uuid, tables: &mut Tables) {
        tables.comments.retain(|_, c| c.blog_id != id);
        tables.blog_tags.retain(|(blog_id, _)| *blog_id != id);
    }
}

impl Row for Tag {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.tags
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.tags
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        if tables
            .tags
            .values()
            .any(|t| t.id != self.id && t.name == self.name)
        {
            return Err(RepoError::Constraint("tags_name_key".to_string()));
        }
        Ok(())
    }

    fn cascade(id: Uuid, tables: &mut Tables) {
        tables.blog_tags.retain(|(_, tag_id)| *tag_id != id);
    }
}

impl Row for Comment {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.comments
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.comments
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        if !tables.blogs.contains_key(&self.blog_id) {
            return Err(RepoError::Constraint("comments_blog_id_fkey".to_string()));
        }
        if !tables.users.contains_key(&self.author_id) {
            return Err(RepoError::Constraint("comments_author_id_fkey".to_string()));
        }
        Ok(())
    }
}

/// In-memory implementation of every repository port.
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: Row> BaseRepository<T, Uuid> for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).get(&id).cloned())
    }

    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.tables.write().await;

        if T::table(&tables).contains_key(&entity.id()) {
            return Err(RepoError::Constraint("duplicate primary key".to_string()));
        }
        entity.check(&tables)?;

        T::table_mut(&mut tables).insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.tables.write().await;

        if !T::table(&tables).contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        entity.check(&tables)?;

        T::table_mut(&mut tables).insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;

        if T::table_mut(&mut tables).remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        T::cascade(id, &mut tables);

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_login(&self, identifier: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }
}

fn newest_first(blogs: &mut [Blog]) {
    blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl BlogRepository for InMemoryDatabase {
    async fn list(&self, filter: &BlogFilter, request: PageRequest) -> Result<Page<Blog>, RepoError> {
        let tables = self.tables.read().await;

        let blogs = match filter {
            BlogFilter::All => {
                let mut blogs: Vec<Blog> = tables.blogs.values().cloned().collect();
                newest_first(&mut blogs);
                blogs
            }
            BlogFilter::Tag(needle) => {
                let matching_tags: HashSet<Uuid> = tables
                    .tags
                    .values()
                    .filter(|t| t.name_contains(needle))
                    .map(|t| t.id)
                    .collect();
                let blog_ids: HashSet<Uuid> = tables
                    .blog_tags
                    .iter()
                    .filter(|(_, tag_id)| matching_tags.contains(tag_id))
                    .map(|(blog_id, _)| *blog_id)
                    .collect();

                let mut blogs: Vec<Blog> = blog_ids
                    .iter()
                    .filter_map(|id| tables.blogs.get(id).cloned())
                    .collect();
                newest_first(&mut blogs);
                blogs
            }
            BlogFilter::Search(query) => {
                let mut ranked: Vec<(f32, Blog)> = tables
                    .blogs
                    .values()
                    .map(|b| (relevance(&b.title, &b.content, query), b.clone()))
                    .filter(|(score, _)| is_relevant(*score))
                    .collect();
                ranked.sort_by(|(sa, a), (sb, b)| {
                    sb.total_cmp(sa)
                        .then(b.created_at.cmp(&a.created_at))
                        .then(a.id.cmp(&b.id))
                });
                ranked.into_iter().map(|(_, blog)| blog).collect()
            }
        };

        Ok(Page::from_all(blogs, request))
    }
}

#[async_trait]
impl TagRepository for InMemoryDatabase {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|t| t.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .blog_tags
            .iter()
            .filter(|(b, _)| *b == blog_id)
            .filter_map(|(_, tag_id)| tables.tags.get(tag_id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn attach(&self, blog_id: Uuid, tag_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.blogs.contains_key(&blog_id) {
            return Err(RepoError::Constraint("blog_tags_blog_id_fkey".to_string()));
        }
        if !tables.tags.contains_key(&tag_id) {
            return Err(RepoError::Constraint("blog_tags_tag_id_fkey".to_string()));
        }

        tables.blog_tags.insert((blog_id, tag_id));
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryDatabase {
    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.blog_id == blog_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }
}
