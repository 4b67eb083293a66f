//! Port traits at the engine boundary.

pub mod outbound;
