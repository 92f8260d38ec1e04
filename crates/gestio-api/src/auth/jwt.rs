//! HS256 session tokens
//!
//! Gestio mints its own session tokens after the identity provider confirms
//! the credentials, so a single shared secret covers both signing and
//! verification.

use chrono::{Duration, Utc};
use gestio_core::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::models::{JwtClaims, TenantContext};

/// Symmetric key pair for session tokens. Cheap to clone; both halves wrap
/// the same shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a session token carrying the user's tenant and profile claims.
    pub fn mint(&self, context: &TenantContext, expiry_hours: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: context.user_id,
            tenant_id: context.tenant_id,
            name: context.name.clone(),
            email: context.email.clone(),
            company_name: context.company_name.clone(),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Validate and decode a session token
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        let token_data =
            decode::<JwtClaims>(token, &self.decoding, &Validation::default()).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        AppError::Unauthorized("Token is not yet valid (nbf)".to_string())
                    }
                    _ => AppError::Unauthorized(format!("Invalid or expired token: {}", e)),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn context() -> TenantContext {
        TenantContext {
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: Some("Giulia Ricci".to_string()),
            email: Some("giulia@esempio.it".to_string()),
            company_name: Some("Ricci Manutenzioni SRL".to_string()),
        }
    }

    #[test]
    fn test_mint_verify_round_trip() {
        let keys = JwtKeys::from_secret("a-test-secret-that-is-long-enough-1234");
        let ctx = context();

        let token = keys.mint(&ctx, 24).expect("mint");
        let claims = keys.verify(&token).expect("verify");

        assert_eq!(claims.sub, ctx.user_id);
        assert_eq!(claims.tenant_id, ctx.tenant_id);
        assert_eq!(claims.email, ctx.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let keys = JwtKeys::from_secret("a-test-secret-that-is-long-enough-1234");
        let err = keys.verify("not-a-jwt").expect_err("garbage must fail");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let minting = JwtKeys::from_secret("a-test-secret-that-is-long-enough-1234");
        let verifying = JwtKeys::from_secret("a-different-secret-also-long-enough-5678");

        let token = minting.mint(&context(), 24).expect("mint");
        let err = verifying.verify(&token).expect_err("foreign secret must fail");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let keys = JwtKeys::from_secret("a-test-secret-that-is-long-enough-1234");

        // Far enough in the past to clear the default leeway.
        let token = keys.mint(&context(), -2).expect("mint");
        let err = keys.verify(&token).expect_err("expired must fail");
        match err {
            AppError::Unauthorized(msg) => assert!(msg.contains("expired")),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }
}
