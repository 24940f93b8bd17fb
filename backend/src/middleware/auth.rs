//! Authentication middleware
//!
//! JWT bearer authentication. Tokens are issued elsewhere; this service only
//! verifies them and exposes the farmer they belong to.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

/// Authenticated farmer extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub farmer_id: Uuid,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Farmer ID
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return unauthorized("Missing or invalid Authorization header").into_response(),
    };

    let auth_user = match authenticate(token, &state.config.jwt.secret) {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// Decode a bearer token into the farmer it was issued for
fn authenticate(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;

    let farmer_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

    Ok(AuthUser { farmer_id })
}

fn unauthorized(message: &str) -> AppError {
    AppError::Unauthorized {
        message: message.to_string(),
        message_bn: "অনুমতি নেই".to_string(),
    }
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(sub: &str, exp_offset_secs: i64, secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: now + exp_offset_secs,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let farmer_id = Uuid::new_v4();
        let user = authenticate(&token(&farmer_id.to_string(), 3600, SECRET), SECRET).unwrap();
        assert_eq!(user.farmer_id, farmer_id);
    }

    #[test]
    fn test_expired_token() {
        let result = authenticate(&token(&Uuid::new_v4().to_string(), -3600, SECRET), SECRET);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret() {
        let result = authenticate(
            &token(&Uuid::new_v4().to_string(), 3600, "other-secret"),
            SECRET,
        );
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_subject_must_be_uuid() {
        let result = authenticate(&token("farmer-42", 3600, SECRET), SECRET);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
