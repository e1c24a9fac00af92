use crate::common::{AuthError, AuthUser};
use crate::domains::auth::JwtService;
use axum::{extract::Extension, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
///
/// Verifies the Authorization header and adds `AuthUser` to request extensions.
/// Requests without a valid token continue unauthenticated; routes that need
/// a caller use [`require_auth`].
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!(user_id = %user.user_id, role = %user.role, "Authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_str = request.headers().get("authorization")?.to_str().ok()?;

    // Accept both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();

    let claims = jwt_service.verify_token(token).ok()?;
    Some(claims.auth_user())
}

/// Handler-side guard for routes that need a caller
pub fn require_auth(auth: Option<Extension<AuthUser>>) -> Result<AuthUser, AuthError> {
    auth.map(|Extension(user)| user)
        .ok_or(AuthError::AuthenticationRequired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Role, UserId};

    fn service() -> JwtService {
        JwtService::new("test_secret", "test_issuer".to_string())
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = service();
        let user_id = UserId::new();
        let token = jwt_service.create_token(user_id, Role::Admin).unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.user_id, user_id);
        assert!(auth_user.is_admin());
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = service();
        let user_id = UserId::new();
        let token = jwt_service.create_token(user_id, Role::User).unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.user_id, user_id);
        assert_eq!(auth_user.role, Role::User);
    }

    #[test]
    fn test_no_auth_header() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service()).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service()).is_none());
    }

    #[test]
    fn require_auth_rejects_anonymous() {
        assert_eq!(require_auth(None), Err(AuthError::AuthenticationRequired));

        let user = AuthUser::new(UserId::new(), Role::Producer);
        assert_eq!(require_auth(Some(Extension(user.clone()))), Ok(user));
    }
}
