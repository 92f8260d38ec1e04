//! Shared constants.

use uuid::{uuid, Uuid};

/// Tenant id used by the demo seed dataset. Stable so a locally minted token
/// can address the seeded records across restarts.
pub const DEMO_TENANT_ID: Uuid = uuid!("7b69fe24-9b03-4c20-bb1a-a081f2dceb2d");

/// User id paired with [`DEMO_TENANT_ID`] for locally minted demo sessions.
pub const DEMO_USER_ID: Uuid = uuid!("c13a78a5-5611-4c47-9f27-5bf7e7a96ec4");

/// Default number of records returned by the upcoming-appointments view.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Display value substituted when an appointment references a client or
/// employee that no longer exists in the tenant.
pub const MISSING_REFERENCE_LABEL: &str = "N/A";
