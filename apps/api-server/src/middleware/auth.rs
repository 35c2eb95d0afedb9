//! Authentication extractors.
//!
//! The bearer token only proves who the caller is. Role and profile come
//! from a fresh user lookup on every request.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::Principal;
use quill_core::domain::User;
use quill_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

impl Identity {
    pub fn principal(&self) -> Principal {
        Principal::from(&self.user)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                return Err(AppError::Internal("AppState not found in app data".to_string()));
            };
            let token = token.map_err(quill_core::DomainError::from)?;

            let user = state.accounts.authenticate(&token).await?;
            Ok(Identity { user })
        })
    }
}

/// Optional identity extractor - a missing or bad token means anonymous.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn principal(&self) -> Option<Principal> {
        self.0.as_ref().map(Identity::principal)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload);

        Box::pin(async move {
            match identity.await {
                Ok(identity) => Ok(OptionalIdentity(Some(identity))),
                Err(e) => {
                    tracing::debug!(error = %e, "Treating request as anonymous");
                    Ok(OptionalIdentity(None))
                }
            }
        })
    }
}
