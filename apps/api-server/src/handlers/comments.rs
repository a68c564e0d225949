//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::DomainError;
use scribe_core::domain::{Comment, CommentChanges, CommentDraft, Mutation, ensure_owner};
use scribe_core::validation::FieldErrors;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        blog: comment.blog_id,
        author: comment.author_id,
        content: comment.content,
        created_at: comment.created_at,
        likes: comment.likes,
    }
}

async fn find_comment(state: &AppState, id: Uuid) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("comment", id).into())
}

/// Field error unless `blog_id` names an existing blog.
async fn ensure_blog_exists(state: &AppState, blog_id: Uuid) -> AppResult<()> {
    if state.blogs.find_by_id(blog_id).await?.is_none() {
        return Err(FieldErrors::single(
            "blog",
            format!("Invalid pk \"{blog_id}\" - object does not exist."),
        )
        .into());
    }
    Ok(())
}

/// POST /comments/
pub async fn create_comment(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let draft = CommentDraft::validate(body.blog, body.content.as_deref())?;
    ensure_blog_exists(&state, draft.blog_id).await?;

    let comment = state
        .comments
        .create(Comment::new(identity.user_id, draft.blog_id, draft.content))
        .await?;

    tracing::info!(
        comment_id = %comment.id,
        blog_id = %comment.blog_id,
        author_id = %identity.user_id,
        "Comment created"
    );

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        comment_response(comment),
        "Comment created successfully",
    )))
}

/// GET /comments/{id}/
pub async fn get_comment(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = find_comment(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(comment_response(comment)))
}

/// PUT /comments/{id}/ - partial update by the author.
pub async fn update_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let mut comment = find_comment(&state, path.into_inner()).await?;
    ensure_owner(&comment, identity.user_id, Mutation::Edit)?;

    let changes = CommentChanges::validate(body.blog, body.content.as_deref())?;
    if let Some(blog_id) = changes.blog_id {
        ensure_blog_exists(&state, blog_id).await?;
    }

    comment.apply(changes);
    let comment = state.comments.update(comment).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        comment_response(comment),
        "Comment updated successfully",
    )))
}

/// DELETE /comments/{id}/
pub async fn delete_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = find_comment(&state, path.into_inner()).await?;
    ensure_owner(&comment, identity.user_id, Mutation::Delete)?;

    state.comments.delete(comment.id).await?;
    tracing::info!(comment_id = %comment.id, "Comment deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// POST /comments/{id}/ - like. Any authenticated user, repeat likes allowed.
///
/// Read-modify-write: concurrent likes on one comment can lose increments.
pub async fn like_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mut comment = find_comment(&state, path.into_inner()).await?;
    comment.like();

    let comment = state.comments.update(comment).await?;
    tracing::debug!(
        comment_id = %comment.id,
        liked_by = %identity.user_id,
        likes = comment.likes,
        "Comment liked"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        comment_response(comment),
        "Comment liked successfully",
    )))
}
