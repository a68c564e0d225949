//! Sharing a blog by email.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::DomainError;
use scribe_core::domain::compose_share;
use scribe_core::validation::FieldErrors;
use scribe_infra::masking::mask_email;
use scribe_shared::ApiResponse;
use scribe_shared::dto::ShareBlogRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /blogs/share/{blog_id}/
///
/// The recipient address is passed through unchecked; success means the
/// transport accepted the message.
pub async fn share_blog(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ShareBlogRequest>,
) -> AppResult<HttpResponse> {
    let blog_id = path.into_inner();
    let blog = state
        .blogs
        .find_by_id(blog_id)
        .await?
        .ok_or_else(|| DomainError::not_found("blog", blog_id))?;

    let mut errors = FieldErrors::new();
    let Some(recipient) = errors.require("email", body.email.as_deref()) else {
        return Err(AppError::Validation(errors));
    };
    let recipient = recipient.trim();

    let message = compose_share(&blog, recipient);
    state.mailer.send(&message).await?;

    tracing::info!(
        blog_id = %blog.id,
        recipient = %mask_email(recipient),
        shared_by = %identity.user_id,
        "Blog shared"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Blog shared successfully")))
}
