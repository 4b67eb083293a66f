//! Outbound ports - contracts the session engine consumes.

mod audio;
mod error;
mod identity;
mod snapshot_store;
mod turn_producer;

pub use audio::{
    AmbiencePatch, AudioBackendPort, CuePatch, DecayShape, FrequencyRamp, LfoSpec, OscillatorSpec,
    Waveform,
};
pub use error::{AudioError, ProducerError, StoreError};
pub use identity::IdentityPort;
pub use snapshot_store::SnapshotStorePort;
pub use turn_producer::{TurnPayload, TurnProducerPort};

#[cfg(test)]
pub use audio::MockAudioBackendPort;
#[cfg(test)]
pub use identity::MockIdentityPort;
#[cfg(test)]
pub use snapshot_store::MockSnapshotStorePort;
#[cfg(test)]
pub use turn_producer::MockTurnProducerPort;
