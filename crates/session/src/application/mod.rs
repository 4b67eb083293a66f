//! Application layer: session orchestration and presentation services.

mod error;
pub mod services;
pub mod synth;

pub use error::SessionError;
