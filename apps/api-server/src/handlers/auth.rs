//! Registration and login.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::services::NewAccount;
use quill_shared::dto::{LoginRequest, RegisterRequest};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let mut req = body.into_inner();
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_string();
    req.validate()?;

    let session = state
        .accounts
        .register(NewAccount {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    let expires_in = state.accounts.token_lifetime_seconds();
    Ok(HttpResponse::Ok().json(views::session(&session, expires_in)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let session = state.accounts.login(&req.email, &req.password).await?;

    let expires_in = state.accounts.token_lifetime_seconds();
    Ok(HttpResponse::Ok().json(views::session(&session, expires_in)))
}
