//! Post endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use quill_core::FilterKind;
use quill_core::domain::{NewPost, PostPatch};
use quill_shared::dto::{
    CreatePostRequest, LikesResponse, ListPostsQuery, UpdatePostRequest,
};
use quill_shared::{FieldError, SuccessResponse};

use super::views;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn filter_kind(raw: Option<&str>) -> AppResult<FilterKind> {
    match raw.map(str::trim) {
        None | Some("") => Ok(FilterKind::default()),
        Some(name) => name
            .parse()
            .map_err(|msg: String| AppError::Validation(vec![FieldError::new("filter", msg)])),
    }
}

/// GET /api/posts?filter=all|my|liked&q=...
pub async fn list(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let kind = filter_kind(query.filter.as_deref())?;
    let viewer = identity.principal();

    let resolved = state
        .posts
        .list(viewer.as_ref(), kind, query.q.as_deref())
        .await?;

    let body: Vec<_> = resolved
        .value
        .iter()
        .map(|p| views::post_summary(p, &resolved.authors))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let resolved = state.posts.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(views::post(&resolved.value, &resolved.authors)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let input = NewPost {
        title: req.title,
        content: req.content,
        tags: req.tags,
        status: req.status.map(views::status_from_dto),
    };
    let resolved = state.posts.create(&identity.principal(), input).await?;

    Ok(HttpResponse::Ok().json(views::post_summary(&resolved.value, &resolved.authors)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let patch = PostPatch {
        title: req.title,
        content: req.content,
        tags: req.tags,
        status: req.status.map(views::status_from_dto),
    };
    let resolved = state
        .posts
        .update(&identity.principal(), path.into_inner(), patch)
        .await?;

    Ok(HttpResponse::Ok().json(views::post(&resolved.value, &resolved.authors)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(&identity.principal(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// POST /api/posts/{id}/like
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let likes = state
        .posts
        .toggle_like(&identity.principal(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(LikesResponse { likes }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_kind_parsing() {
        assert_eq!(filter_kind(None).unwrap(), FilterKind::All);
        assert_eq!(filter_kind(Some(" ")).unwrap(), FilterKind::All);
        assert_eq!(filter_kind(Some("liked")).unwrap(), FilterKind::Liked);
        assert!(matches!(
            filter_kind(Some("popular")),
            Err(AppError::Validation(_))
        ));
    }
}
