//! Authentication: login proxying, session tokens, and the per-request
//! tenant context.

pub mod gateway;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use gateway::{IdentityGateway, UpstreamSession};
pub use jwt::JwtKeys;
pub use middleware::{auth_middleware, AuthState};
pub use models::{JwtClaims, TenantContext};
