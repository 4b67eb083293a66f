//! Authenticated identity as seen by the session engine
//!
//! The engine never issues credentials; it only reads the presence of an
//! identity to decide whether the free-action quota applies.

use serde::{Deserialize, Serialize};

/// An authenticated user, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub vip: bool,
}
