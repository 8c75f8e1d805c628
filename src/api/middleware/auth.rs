//! JWT authentication and role guards.
//!
//! `auth_middleware` validates the bearer token and stores an [`AuthUser`] in
//! the request extensions; `require_owner` / `require_admin` then gate route
//! groups on the principal's role.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Role, UserId};
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Extension type for authenticated user information
///
/// Handlers extract it with `Extension<AuthUser>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
        })
    }
}

fn bearer_token(request: &Request) -> AppResult<&str> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
    })
}

/// JWT authentication middleware
///
/// # Headers
/// Expects: `Authorization: Bearer <token>`
///
/// # Errors
/// Returns 401 Unauthorized if the header is missing or malformed, or the
/// token fails validation.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = validate_access_token(bearer_token(&request)?, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;

    tracing::debug!(user_id = %auth_user.user_id, role = %auth_user.role, "Authenticated request");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

fn require_role(request: &Request, role: Role) -> AppResult<()> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    if user.role == role {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "This action requires the {} role",
            role
        )))
    }
}

/// Lets only hotel owners through. Must run after `auth_middleware`.
pub async fn require_owner(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(&request, Role::Owner)?;
    Ok(next.run(request).await)
}

/// Lets only administrators through. Must run after `auth_middleware`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(&request, Role::Admin)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;
    use axum::body::Body;

    fn request_with(user: Option<AuthUser>) -> Request {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request
    }

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: UserId::new(),
            email: "someone@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_auth_user_from_claims() {
        let id = UserId::new();
        let claims = Claims::new(id, "owner@example.com", Role::Owner, TokenType::Access, 1);

        let auth_user = AuthUser::try_from(claims).unwrap();
        assert_eq!(auth_user.user_id, id);
        assert_eq!(auth_user.email, "owner@example.com");
        assert_eq!(auth_user.role, Role::Owner);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request).unwrap(), "abc.def.ghi");

        let request = Request::builder()
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert!(matches!(bearer_token(&request), Err(AppError::Unauthorized { .. })));

        assert!(matches!(
            bearer_token(&request_with(None)),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_role_guard() {
        assert!(require_role(&request_with(Some(user(Role::Owner))), Role::Owner).is_ok());
        assert!(matches!(
            require_role(&request_with(Some(user(Role::Customer))), Role::Owner),
            Err(AppError::Forbidden { .. })
        ));
        assert!(matches!(
            require_role(&request_with(Some(user(Role::Owner))), Role::Admin),
            Err(AppError::Forbidden { .. })
        ));
        assert!(matches!(
            require_role(&request_with(None), Role::Admin),
            Err(AppError::Unauthorized { .. })
        ));
    }
}
