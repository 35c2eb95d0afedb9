//! The caller's own profile.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::domain::ProfilePatch;
use quill_shared::dto::UpdateProfileRequest;

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(views::user(&identity.user)))
}

/// PUT /api/users/me
pub async fn update_me(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let mut req = body.into_inner();
    req.name = req.name.map(|n| n.trim().to_string());
    req.validate()?;

    let user = state
        .accounts
        .update_profile(
            identity.user.id,
            ProfilePatch {
                name: req.name,
                bio: req.bio,
                avatar_url: req.avatar_url,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(views::user(&user)))
}
