//! Outbound adapters: concrete implementations of the outbound ports.

pub mod audio;
pub mod identity;
pub mod producer;
pub mod store;
