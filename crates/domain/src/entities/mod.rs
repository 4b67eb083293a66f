//! Domain entities - core session objects

mod save;
mod session_state;
mod turn_record;

pub use save::SaveSnapshot;
pub use session_state::{
    Enemy, Quest, QuestStatus, SessionState, StoryProgress, StoryStatus, Vitality,
};
pub use turn_record::{Speaker, TurnRecord};
