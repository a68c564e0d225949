//! Blog handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use scribe_core::DomainError;
use scribe_core::domain::{Blog, BlogChanges, BlogDraft, Mutation, ensure_owner};
use scribe_core::pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use scribe_core::ports::BlogFilter;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{BlogListQuery, BlogResponse, CreateBlogRequest, UpdateBlogRequest};

use super::comments::comment_response;
use super::pagination::{invalid_page, paginated};
use super::tags::tag_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Blog with its tags and comments embedded.
async fn blog_response(state: &AppState, blog: Blog) -> AppResult<BlogResponse> {
    let tags = state.tags.find_by_blog(blog.id).await?;
    let comments = state.comments.find_by_blog(blog.id).await?;

    Ok(BlogResponse {
        id: blog.id,
        title: blog.title,
        content: blog.content,
        author: blog.author_id,
        created_at: blog.created_at,
        updated_at: blog.updated_at,
        tags: tags.into_iter().map(tag_response).collect(),
        comments: comments.into_iter().map(comment_response).collect(),
    })
}

async fn find_blog(state: &AppState, id: Uuid) -> AppResult<Blog> {
    state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("blog", id).into())
}

/// GET /blogs/?tag=&search=&page=
///
/// `tag` takes precedence over `search`; both absent lists everything.
pub async fn list_blogs(
    _identity: Identity,
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<BlogListQuery>,
) -> AppResult<HttpResponse> {
    let request =
        PageRequest::parse(query.page.as_deref(), DEFAULT_PAGE_SIZE).ok_or_else(invalid_page)?;
    let filter = BlogFilter::from_params(query.tag.as_deref(), query.search.as_deref());

    let page = state.blogs.list(&filter, request).await?;
    if !page.is_valid() {
        return Err(invalid_page());
    }

    let mut results = Vec::with_capacity(page.items.len());
    for blog in &page.items {
        results.push(blog_response(&state, blog.clone()).await?);
    }

    Ok(HttpResponse::Ok().json(paginated(&req, &page, results)))
}

/// POST /blogs/
///
/// Unknown tag ids are skipped.
pub async fn create_blog(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = BlogDraft::validate(req.title.as_deref(), req.content.as_deref())?;

    let blog = state.blogs.create(Blog::new(identity.user_id, draft)).await?;

    for tag_id in req.tags {
        if state.tags.find_by_id(tag_id).await?.is_some() {
            state.tags.attach(blog.id, tag_id).await?;
        } else {
            tracing::debug!(tag_id = %tag_id, "Ignoring unknown tag");
        }
    }

    tracing::info!(blog_id = %blog.id, author_id = %identity.user_id, "Blog created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        blog_response(&state, blog).await?,
        "Blog created successfully",
    )))
}

/// GET /blogs/{id}/ - public.
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let blog = find_blog(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(blog_response(&state, blog).await?))
}

/// PUT /blogs/{id}/ - partial update by the author.
pub async fn update_blog(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let mut blog = find_blog(&state, path.into_inner()).await?;
    ensure_owner(&blog, identity.user_id, Mutation::Edit)?;

    let changes = BlogChanges::validate(body.title.as_deref(), body.content.as_deref())?;
    blog.apply(changes);
    let blog = state.blogs.update(blog).await?;

    tracing::info!(blog_id = %blog.id, "Blog updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        blog_response(&state, blog).await?,
        "Blog updated successfully",
    )))
}

/// DELETE /blogs/{id}/ - removes its comments and tag links too.
pub async fn delete_blog(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let blog = find_blog(&state, path.into_inner()).await?;
    ensure_owner(&blog, identity.user_id, Mutation::Delete)?;

    state.blogs.delete(blog.id).await?;
    tracing::info!(blog_id = %blog.id, "Blog deleted");

    Ok(HttpResponse::NoContent().finish())
}
