//! Netrift session engine.
//!
//! Client-side orchestration for a turn-based, producer-narrated text
//! adventure. This crate owns the session lifecycle, the character-by-
//! character text reveal, procedural audio, transient screen effects,
//! and single-slot persistence.
//!
//! ## Structure
//!
//! - `application/` - Session controller and presentation services
//! - `ports/` - Outbound port traits the controller depends on
//! - `infrastructure/` - Concrete adapters (HTTP producer, cpal audio,
//!   file-backed store and identity)

pub mod application;
pub mod infrastructure;
pub mod ports;

pub use application::services::{
    AudioDirector, EffectService, RevealFrame, RevealService, SaveService, SessionService,
};
pub use application::SessionError;
