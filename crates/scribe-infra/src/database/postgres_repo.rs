//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, Statement,
};
use uuid::Uuid;

use scribe_core::domain::{Blog, Comment, Tag, User};
use scribe_core::error::RepoError;
use scribe_core::pagination::{Page, PageRequest};
use scribe_core::ports::{
    BlogFilter, BlogRepository, CommentRepository, TagRepository, UserRepository,
};
use scribe_core::search::MIN_RELEVANCE;

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::blog_tag::{self, Entity as BlogTagEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};
use crate::masking::mask_email;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL blog repository.
pub type PostgresBlogRepository = PostgresBaseRepository<BlogEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// Weighted document vector; must match the expression indexed by the migration.
const DOCUMENT_VECTOR: &str = "setweight(to_tsvector('english', coalesce(title, '')), 'A') \
     || setweight(to_tsvector('english', coalesce(content, '')), 'B')";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_login(&self, identifier: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(identifier))
                    .add(user::Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

impl PostgresBlogRepository {
    async fn paginate(
        &self,
        select: Select<BlogEntity>,
        request: PageRequest,
    ) -> Result<Page<Blog>, RepoError> {
        let paginator = select
            .order_by_desc(blog::Column::CreatedAt)
            .order_by_asc(blog::Column::Id)
            .paginate(&self.db, request.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let empty = Page::new(Vec::new(), total, request);
        if !empty.is_valid() {
            return Ok(empty);
        }

        let models = paginator
            .fetch_page(request.page - 1)
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            total,
            request,
        ))
    }

    async fn search(&self, query: &str, request: PageRequest) -> Result<Page<Blog>, RepoError> {
        let rank = format!("ts_rank({DOCUMENT_VECTOR}, plainto_tsquery('english', $1))");

        let count_sql = format!("SELECT COUNT(*) AS count FROM blogs WHERE {rank} >= $2");
        let count = self
            .db
            .query_one(Statement::from_sql_and_values(
                DbBackend::Postgres,
                count_sql,
                [query.into(), MIN_RELEVANCE.into()],
            ))
            .await
            .map_err(map_db_err)?
            .map(|row| row.try_get::<i64>("", "count"))
            .transpose()
            .map_err(map_db_err)?
            .unwrap_or(0);
        let total = u64::try_from(count).unwrap_or(0);

        // Out-of-range pages never reach the OFFSET below.
        let empty = Page::new(Vec::new(), total, request);
        if !empty.is_valid() {
            return Ok(empty);
        }

        let select_sql = format!(
            "SELECT id, author_id, title, content, created_at, updated_at \
             FROM (SELECT blogs.*, {rank} AS rank FROM blogs) AS ranked \
             WHERE rank >= $2 \
             ORDER BY rank DESC, created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        let models = BlogEntity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Postgres,
                select_sql,
                [
                    query.into(),
                    MIN_RELEVANCE.into(),
                    i64::try_from(request.limit()).unwrap_or(i64::MAX).into(),
                    i64::try_from(request.offset()).unwrap_or(i64::MAX).into(),
                ],
            ))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            total,
            request,
        ))
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn list(&self, filter: &BlogFilter, request: PageRequest) -> Result<Page<Blog>, RepoError> {
        match filter {
            BlogFilter::All => self.paginate(BlogEntity::find(), request).await,
            BlogFilter::Tag(name) => {
                tracing::debug!(tag = %name, "Filtering blogs by tag");
                let select = BlogEntity::find()
                    .join(JoinType::InnerJoin, blog::Relation::BlogTag.def())
                    .join(JoinType::InnerJoin, blog_tag::Relation::Tag.def())
                    .filter(
                        Expr::expr(Func::lower(Expr::col((TagEntity, tag::Column::Name))))
                            .like(LikeExpr::new(contains_pattern(name)).escape('\\')),
                    )
                    .distinct();
                self.paginate(select, request).await
            }
            BlogFilter::Search(query) => {
                tracing::debug!(query = %query, "Searching blogs");
                self.search(query, request).await
            }
        }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .join(JoinType::InnerJoin, tag::Relation::BlogTag.def())
            .filter(blog_tag::Column::BlogId.eq(blog_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn attach(&self, blog_id: Uuid, tag_id: Uuid) -> Result<(), RepoError> {
        let link = blog_tag::ActiveModel {
            blog_id: Set(blog_id),
            tag_id: Set(tag_id),
        };

        BlogTagEntity::insert(link)
            .on_conflict(
                OnConflict::columns([blog_tag::Column::BlogId, blog_tag::Column::TagId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::BlogId.eq(blog_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
