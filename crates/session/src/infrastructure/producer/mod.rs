mod http_turn_producer;
mod prompt;
mod wire;

pub use http_turn_producer::{
    HttpTurnProducer, DEFAULT_PRODUCER_BASE_URL, DEFAULT_PRODUCER_MODEL,
};
pub use prompt::{system_prompt, BEGIN_MESSAGE};
pub use wire::parse_turn;
