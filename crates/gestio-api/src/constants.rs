//! API-wide constants

/// URL prefix shared by every versioned endpoint.
pub const API_PREFIX: &str = "/api/v1";
