use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::jwt::JwtKeys;
use crate::auth::repo::{Role, User};
use crate::error::ApiError;
use crate::state::AppState;

/// Scheme match is case-insensitive ("Bearer", "bearer", "BEARER" all work).
fn strip_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    Some(token)
}

/// Authentication gate: bearer token -> verified claims -> user record.
/// The user is re-resolved from the database on every request; the role
/// claim inside the token stays as issued.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".into()))?;

        let token = strip_bearer(auth_header)
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).ok_or_else(|| {
            warn!("invalid or expired token");
            ApiError::Unauthorized("Invalid authentication credentials".into())
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            warn!(sub = %claims.sub, "token subject is not a valid id");
            ApiError::Unauthorized("Invalid authentication credentials".into())
        })?;

        let user = User::find_by_id(&state.db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                warn!(%user_id, "token subject does not resolve to a user");
                ApiError::Unauthorized("User not found".into())
            })?;

        Ok(CurrentUser(user))
    }
}

/// Authorization gate on top of [`CurrentUser`]: admin role required.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Admin => Ok(AdminUser(user)),
            Role::User => {
                warn!(user_id = %user.id, "admin endpoint denied");
                Err(ApiError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_bearer_is_scheme_case_insensitive() {
        assert_eq!(strip_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(strip_bearer("bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(strip_bearer("BEARER abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn strip_bearer_rejects_other_schemes() {
        assert_eq!(strip_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(strip_bearer("Bearerabc"), None);
        assert_eq!(strip_bearer(""), None);
    }
}
