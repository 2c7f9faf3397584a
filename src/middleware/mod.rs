use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Role, Viewer};

/// Claims issued by the session provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
}

/// Bearer-token extractor producing the explicit viewer of a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthViewer(pub Viewer);

pub fn verify_session_token(token: &str, secret: &str) -> Result<Viewer, AppError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        debug!("rejected session token: {}", e);
        AppError::Unauthenticated
    })?;

    Ok(Viewer {
        id: data.claims.sub,
        role: data.claims.role,
    })
}

impl FromRequestParts<Arc<crate::AppState>> for AuthViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthenticated)?;

        verify_session_token(token.trim(), &state.config.jwt.secret).map(AuthViewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> usize {
        (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize
    }

    #[test]
    fn test_valid_token_yields_viewer() {
        let id = Uuid::new_v4();
        let claims = SessionClaims {
            sub: id,
            role: Role::Customer,
            exp: future_exp(),
        };

        let viewer = verify_session_token(&token(&claims, "s3cret"), "s3cret").unwrap();
        assert_eq!(viewer, Viewer { id, role: Role::Customer });
    }

    #[test]
    fn test_wrong_secret_is_unauthenticated() {
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            role: Role::Photographer,
            exp: future_exp(),
        };

        let result = verify_session_token(&token(&claims, "one"), "other");
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            role: Role::Customer,
            exp: 1_000,
        };

        let result = verify_session_token(&token(&claims, "s3cret"), "s3cret");
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}
