mod audio_director;
mod effect_service;
mod reveal_service;
mod save_service;
mod session_service;

pub use audio_director::AudioDirector;
pub use effect_service::EffectService;
pub use reveal_service::{RevealFrame, RevealService};
pub use save_service::SaveService;
pub use session_service::{RejectReason, SessionPhase, SessionService, SubmitOutcome};
