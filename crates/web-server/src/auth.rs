use crate::{AppState, error::AppError};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use core_types::SessionUser;
use dashboard::{AccessRule, check_access};
use std::sync::Arc;
use uuid::Uuid;

/// The caller behind a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: Uuid,
    pub user: SessionUser,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| Uuid::parse_str(token.trim()).ok())
            .ok_or(AppError::Unauthorized)?;
        let user = state.session(&token).ok_or(AppError::Unauthorized)?;
        Ok(Self { token, user })
    }
}

/// A `CurrentUser` that passes the admin panel's access rule.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;
        match check_access(AccessRule::Admin, Some(&user)) {
            Ok(()) => Ok(Self(user)),
            Err(_) => {
                tracing::info!(user_id = user.id, "Admin route refused.");
                Err(AppError::Forbidden)
            }
        }
    }
}
