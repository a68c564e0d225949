//! Tag handlers.

use actix_web::{HttpResponse, web};

use scribe_core::domain::Tag;
use scribe_core::validation::FieldErrors;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CreateTagRequest, TagResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
    }
}

/// GET /tags/
pub async fn list_tags(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.list_all().await?;

    Ok(HttpResponse::Ok().json(tags.into_iter().map(tag_response).collect::<Vec<_>>()))
}

/// POST /tags/
pub async fn create_tag(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    let name = Tag::validate_name(body.name.as_deref())?;

    if state.tags.find_by_name(&name).await?.is_some() {
        return Err(FieldErrors::single("name", "tag with this name already exists.").into());
    }

    let tag = state.tags.create(Tag::new(name)).await?;
    tracing::info!(tag_id = %tag.id, created_by = %identity.user_id, "Tag created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        tag_response(tag),
        "Tag created successfully",
    )))
}
