//! Comment endpoints, nested under a post.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use quill_shared::SuccessResponse;
use quill_shared::dto::CommentRequest;

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/{id}/comments
pub async fn list(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let resolved = state.comments.list(path.into_inner()).await?;

    let body: Vec<_> = resolved
        .value
        .iter()
        .map(|c| views::comment(c, &resolved.authors))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let resolved = state
        .comments
        .add(&identity.principal(), path.into_inner(), &req.text)
        .await?;

    Ok(HttpResponse::Ok().json(views::comment(&resolved.value, &resolved.authors)))
}

/// PUT /api/posts/{id}/comments/{comment_id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let resolved = state
        .comments
        .update(&identity.principal(), post_id, comment_id, &req.text)
        .await?;

    Ok(HttpResponse::Ok().json(views::comment(&resolved.value, &resolved.authors)))
}

/// DELETE /api/posts/{id}/comments/{comment_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    state
        .comments
        .delete(&identity.principal(), post_id, comment_id)
        .await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
