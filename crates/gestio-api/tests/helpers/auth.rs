//! Token minting for tests.
//!
//! Tokens are signed with the same secret the test server verifies with, so
//! tests never need a running identity provider.

use gestio_api::auth::jwt::JwtKeys;
use gestio_api::auth::models::TenantContext;
use uuid::Uuid;

/// Signing secret shared with the test config (must be at least 32 chars).
pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";

/// A tenant identity for requests, with a ready-to-send bearer token.
pub struct TestTenant {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub token: String,
}

/// Mint a token for a fresh tenant.
pub fn test_tenant() -> TestTenant {
    tenant_with_id(Uuid::new_v4())
}

/// Mint a token for a specific tenant id.
pub fn tenant_with_id(tenant_id: Uuid) -> TestTenant {
    let user_id = Uuid::new_v4();
    let context = TenantContext {
        tenant_id,
        user_id,
        name: Some("Test User".to_string()),
        email: Some("test@example.com".to_string()),
        company_name: Some("Test Company".to_string()),
    };

    let keys = JwtKeys::from_secret(TEST_JWT_SECRET);
    let token = keys.mint(&context, 24).expect("Failed to mint test token");

    TestTenant {
        tenant_id,
        user_id,
        token,
    }
}
