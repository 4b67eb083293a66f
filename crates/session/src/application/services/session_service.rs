//! Session controller - the turn state machine.
//!
//! Accepts player actions, enforces the free-action quota, invokes the
//! external turn producer, applies the returned snapshot wholesale, and
//! fans the presentation fields out to the reveal engine, audio director,
//! and effect registry. Exactly one producer call is in flight at a time;
//! transcript order therefore equals turn application order.

use std::sync::Arc;
use std::time::Duration;

use netrift_domain::{
    AudioCue, Mood, QuotaCounter, SaveSnapshot, ScreenEffect, SessionConfig, SessionState,
    TurnRecord,
};

use crate::application::error::SessionError;
use crate::application::services::{AudioDirector, EffectService, RevealService, SaveService};
use crate::application::synth::CueKind;
use crate::ports::outbound::{IdentityPort, ProducerError, TurnPayload, TurnProducerPort};

/// Upper bound on one producer call; on expiry the turn is treated as a
/// transient connection failure.
const TURN_TIMEOUT: Duration = Duration::from_secs(120);

/// Delay between applying a turn and firing its audio cue, letting the
/// visual update land first.
const CUE_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Synthetic narrator text appended after a failed turn.
const CONNECTION_ERROR_NOTICE: &str = "System Error: Connection interrupted. Retrying packet...";

/// Synthetic narrator text shown when the free-action quota is exhausted.
const QUOTA_EXHAUSTED_NOTICE: &str =
    "Neural link capacity reached. Establish an identity to keep playing.";

/// Externally observable controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting input
    Idle,
    /// A producer request is in flight
    AwaitingTurn,
}

/// Why a submission was not sent to the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotStarted,
    RequestInFlight,
    RevealInProgress,
    /// Quota ceiling reached and no entitlement present. The upgrade
    /// prompt has been appended; input stays gated until sign-in.
    QuotaExhausted,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The turn was produced and applied
    Applied,
    /// The action never reached the producer
    Rejected(RejectReason),
    /// The producer failed; a connection-error record was appended and the
    /// consumed quota increment was not rolled back
    Failed,
}

pub struct SessionService {
    producer: Arc<dyn TurnProducerPort>,
    identity: Arc<dyn IdentityPort>,
    saves: SaveService,
    reveal: Arc<RevealService>,
    audio: Arc<AudioDirector>,
    effects: Arc<EffectService>,

    config: SessionConfig,
    started: bool,
    phase: SessionPhase,
    state: SessionState,
    transcript: Vec<TurnRecord>,
    choices: Vec<String>,
    quota: QuotaCounter,
    last_error: Option<String>,
}

impl SessionService {
    pub fn new(
        producer: Arc<dyn TurnProducerPort>,
        identity: Arc<dyn IdentityPort>,
        saves: SaveService,
        reveal: Arc<RevealService>,
        audio: Arc<AudioDirector>,
        effects: Arc<EffectService>,
    ) -> Self {
        Self {
            producer,
            identity,
            saves,
            reveal,
            audio,
            effects,
            config: SessionConfig::default(),
            started: false,
            phase: SessionPhase::Idle,
            state: SessionState::default(),
            transcript: Vec::new(),
            choices: Vec::new(),
            quota: QuotaCounter::default(),
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start a fresh session: reset everything, request the opening turn.
    ///
    /// On failure the session is left unstarted and the error is returned
    /// to the caller as a blocking start error.
    pub async fn start(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        self.reset_presentation();
        self.state = SessionState::default();
        self.transcript.clear();
        self.choices.clear();
        self.quota.reset();
        self.last_error = None;
        self.started = false;
        self.config = config;

        self.phase = SessionPhase::AwaitingTurn;
        let result = self.produce(None).await;
        self.phase = SessionPhase::Idle;

        match result {
            Ok(payload) => {
                self.started = true;
                // Start is user-driven, so audio may activate here.
                self.activate_audio();
                self.apply_turn(payload);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "session start failed");
                self.last_error = Some(e.to_string());
                Err(SessionError::StartFailed(e))
            }
        }
    }

    /// Discard the running session without saving.
    pub fn restart(&mut self) {
        self.reset_presentation();
        self.started = false;
        self.phase = SessionPhase::Idle;
        self.state = SessionState::default();
        self.transcript.clear();
        self.choices.clear();
        self.last_error = None;
    }

    /// Sign the current identity out; quota gating resumes on next submit.
    pub fn sign_out(&self) {
        self.identity.clear_identity();
    }

    // ------------------------------------------------------------------
    // Turn submission
    // ------------------------------------------------------------------

    /// Submit one player action.
    pub async fn submit_action(&mut self, action: &str) -> SubmitOutcome {
        if !self.started {
            return SubmitOutcome::Rejected(RejectReason::NotStarted);
        }
        if self.phase == SessionPhase::AwaitingTurn {
            return SubmitOutcome::Rejected(RejectReason::RequestInFlight);
        }
        if self.reveal.is_revealing() {
            return SubmitOutcome::Rejected(RejectReason::RevealInProgress);
        }

        let entitled = self.identity.current_identity().is_some();
        if !entitled && self.quota.is_exhausted() {
            self.transcript
                .push(TurnRecord::system_notice(QUOTA_EXHAUSTED_NOTICE));
            return SubmitOutcome::Rejected(RejectReason::QuotaExhausted);
        }

        self.audio.play_cue(CueKind::Click);
        self.transcript.push(TurnRecord::player(action));
        if !entitled {
            // Consumed even if the turn fails in transit.
            self.quota.consume();
        }

        self.phase = SessionPhase::AwaitingTurn;
        let result = self.produce(Some(action)).await;
        self.phase = SessionPhase::Idle;

        match result {
            Ok(payload) => {
                self.apply_turn(payload);
                SubmitOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "turn failed, session stays usable");
                self.transcript
                    .push(TurnRecord::system_notice(CONNECTION_ERROR_NOTICE));
                SubmitOutcome::Failed
            }
        }
    }

    /// Run one producer call under the bounded turn timeout and validate
    /// the payload at the intake boundary.
    async fn produce(&self, action: Option<&str>) -> Result<TurnPayload, ProducerError> {
        let call = async {
            match action {
                None => self.producer.begin_session(&self.config).await,
                Some(text) => self.producer.submit_turn(text).await,
            }
        };

        let payload = tokio::time::timeout(TURN_TIMEOUT, call)
            .await
            .map_err(|_| ProducerError::TimedOut(TURN_TIMEOUT.as_secs()))??;

        payload
            .validate()
            .map_err(|e| ProducerError::InvalidPayload(e.to_string()))?;
        Ok(payload)
    }

    /// Apply a validated turn: replace the state wholesale and fan out the
    /// presentation fields.
    fn apply_turn(&mut self, payload: TurnPayload) {
        self.state = payload.state;

        self.transcript.push(TurnRecord::narrator(
            payload.narrative.clone(),
            payload.combat_log,
            Some(payload.text_style),
        ));
        // Only the newest narrator record reveals progressively.
        self.reveal.start(&payload.narrative, payload.text_style);

        if payload.screen_effect != ScreenEffect::None {
            self.effects.trigger(payload.screen_effect);
        }
        if let Some(kind) = cue_kind_for(payload.audio_cue) {
            self.audio.play_cue_after(kind, CUE_SETTLE_DELAY);
        }

        self.choices = payload.choices;

        // Always re-derive the mood; the director detects no-ops itself.
        self.audio.set_mood(Mood::from_combat(self.state.in_combat));
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Save the running session into the single slot.
    pub async fn save(&self) -> Result<(), SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        let snapshot = SaveSnapshot::new(
            self.state.clone(),
            self.transcript.clone(),
            self.config.theme.clone(),
            self.config.language,
        );
        self.saves.save(&snapshot).await?;
        Ok(())
    }

    /// Restore the saved session, if one exists.
    ///
    /// Persisted fields come back exactly as saved; transient presentation
    /// state resets to defaults, and the audio mood stays at its default
    /// until the next turn re-derives it.
    pub async fn load(&mut self) -> Result<(), SessionError> {
        let snapshot = self.saves.load().await.ok_or(SessionError::NoSnapshot)?;

        self.reset_presentation();
        self.state = snapshot.state;
        self.transcript = snapshot.transcript;
        self.config.theme = snapshot.theme;
        self.config.language = snapshot.language;
        self.choices.clear();
        self.quota.reset();
        self.last_error = None;
        self.started = true;
        self.phase = SessionPhase::Idle;

        // Load is user-driven, so audio may activate here; the mood is not
        // re-derived from the restored state.
        self.activate_audio();
        Ok(())
    }

    /// Whether a saved session is available to load.
    pub async fn has_save(&self) -> bool {
        self.saves.has_snapshot().await
    }

    // ------------------------------------------------------------------
    // Presentation outputs
    // ------------------------------------------------------------------

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transcript(&self) -> &[TurnRecord] {
        &self.transcript
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn quota_remaining(&self) -> u32 {
        self.quota.remaining()
    }

    pub fn is_entitled(&self) -> bool {
        self.identity.current_identity().is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ------------------------------------------------------------------

    fn reset_presentation(&mut self) {
        self.reveal.stop();
        self.effects.clear();
    }

    fn activate_audio(&self) {
        // Activation failure degrades silently: the session plays without
        // sound.
        if let Err(e) = self.audio.activate() {
            tracing::warn!(error = %e, "audio activation failed, continuing muted");
        }
    }
}

/// Map a wire cue code to a one-shot kind.
///
/// Combat transitions carry no one-shot; the mood change covers them.
fn cue_kind_for(cue: AudioCue) -> Option<CueKind> {
    match cue {
        AudioCue::ItemPickup => Some(CueKind::Pickup),
        AudioCue::Damage | AudioCue::GameOver => Some(CueKind::Damage),
        AudioCue::QuestUpdate | AudioCue::GameWon => Some(CueKind::Success),
        AudioCue::None | AudioCue::CombatStart | AudioCue::CombatEnd => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use netrift_domain::{Enemy, Identity, Speaker, TextStyle, Vitality};

    use crate::infrastructure::audio::NullAudioBackend;
    use crate::ports::outbound::{
        AudioBackendPort, AudioError, MockAudioBackendPort, MockIdentityPort,
        MockTurnProducerPort, SnapshotStorePort,
    };

    fn opening_payload() -> TurnPayload {
        TurnPayload {
            narrative: "Rain hisses off the neon strip as you wake.".to_string(),
            combat_log: Vec::new(),
            state: SessionState {
                location: "Neon Strip".to_string(),
                ..SessionState::default()
            },
            choices: vec!["Look around".to_string(), "Enter the bar".to_string()],
            screen_effect: ScreenEffect::None,
            audio_cue: AudioCue::None,
            text_style: TextStyle::Normal,
        }
    }

    fn combat_payload() -> TurnPayload {
        TurnPayload {
            narrative: "A chrome hound lunges from the alley.".to_string(),
            combat_log: vec!["Chrome Hound bites you for 20 damage.".to_string()],
            state: SessionState {
                vitality: Vitality {
                    current: 80,
                    maximum: 100,
                },
                location: "Back Alley".to_string(),
                in_combat: true,
                enemies: vec![Enemy {
                    id: "hound-1".to_string(),
                    name: "Chrome Hound".to_string(),
                    hp: 30,
                    max_hp: 30,
                    description: None,
                }],
                ..SessionState::default()
            },
            choices: vec!["Fight".to_string(), "Run".to_string()],
            screen_effect: ScreenEffect::ShakeSmall,
            audio_cue: AudioCue::Damage,
            text_style: TextStyle::Normal,
        }
    }

    /// In-memory single-slot store for round-trip tests.
    #[derive(Default)]
    struct MemoryStore {
        slot: parking_lot::Mutex<Option<SaveSnapshot>>,
    }

    #[async_trait]
    impl SnapshotStorePort for MemoryStore {
        async fn save(&self, snapshot: &SaveSnapshot) -> Result<(), crate::ports::outbound::StoreError> {
            *self.slot.lock() = Some(snapshot.clone());
            Ok(())
        }

        async fn load(&self) -> Option<SaveSnapshot> {
            self.slot.lock().clone()
        }

        async fn has_snapshot(&self) -> bool {
            self.slot.lock().is_some()
        }
    }

    /// Producer whose turns never complete; exercises the turn timeout.
    struct SlowProducer;

    #[async_trait]
    impl TurnProducerPort for SlowProducer {
        async fn begin_session(
            &self,
            _config: &SessionConfig,
        ) -> Result<TurnPayload, ProducerError> {
            Ok(opening_payload())
        }

        async fn submit_turn(&self, _action: &str) -> Result<TurnPayload, ProducerError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Err(ProducerError::RequestFailed("unreachable".to_string()))
        }
    }

    fn anonymous() -> MockIdentityPort {
        let mut identity = MockIdentityPort::new();
        identity.expect_current_identity().returning(|| None);
        identity
    }

    fn entitled() -> MockIdentityPort {
        let mut identity = MockIdentityPort::new();
        identity.expect_current_identity().returning(|| {
            Some(Identity {
                id: "u-1".to_string(),
                display_name: "Nyx".to_string(),
                email: "nyx@example.net".to_string(),
                vip: false,
            })
        });
        identity
    }

    struct Fixture {
        service: SessionService,
        director: Arc<AudioDirector>,
    }

    fn build(
        producer: impl TurnProducerPort + 'static,
        identity: MockIdentityPort,
    ) -> Fixture {
        build_full(
            producer,
            identity,
            Arc::new(MemoryStore::default()),
            Arc::new(NullAudioBackend),
            Duration::ZERO,
        )
    }

    fn build_full(
        producer: impl TurnProducerPort + 'static,
        identity: MockIdentityPort,
        store: Arc<dyn SnapshotStorePort>,
        backend: Arc<dyn AudioBackendPort>,
        reveal_interval: Duration,
    ) -> Fixture {
        let reveal = Arc::new(RevealService::new(reveal_interval));
        let director = Arc::new(AudioDirector::new(backend));
        let effects = Arc::new(EffectService::new());
        let service = SessionService::new(
            Arc::new(producer),
            Arc::new(identity),
            SaveService::new(store),
            reveal,
            Arc::clone(&director),
            effects,
        );
        Fixture { service, director }
    }

    #[tokio::test(start_paused = true)]
    async fn start_applies_the_opening_turn() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));

        let mut fx = build(producer, anonymous());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        assert!(fx.service.is_started());
        assert_eq!(fx.service.phase(), SessionPhase::Idle);
        assert_eq!(fx.service.state().location, "Neon Strip");
        assert_eq!(fx.service.transcript().len(), 1);
        assert_eq!(fx.service.transcript()[0].speaker, Speaker::Narrator);
        assert_eq!(fx.service.choices().len(), 2);
        assert_eq!(fx.service.quota_remaining(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn start_failure_leaves_the_session_unstarted() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Err(ProducerError::RequestFailed("refused".to_string())));

        let mut fx = build(producer, anonymous());
        let err = fx
            .service
            .start(SessionConfig::default())
            .await
            .expect_err("start must fail");

        assert!(matches!(err, SessionError::StartFailed(_)));
        assert!(!fx.service.is_started());
        assert!(fx.service.last_error().is_some());
        assert!(fx.service.transcript().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn a_turn_replaces_state_and_fans_out_presentation() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));
        producer
            .expect_submit_turn()
            .withf(|action| action == "look around")
            .times(1)
            .returning(|_| Ok(combat_payload()));

        let mut fx = build(producer, anonymous());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        let outcome = fx.service.submit_action("look around").await;

        assert_eq!(outcome, SubmitOutcome::Applied);
        assert_eq!(fx.service.state().vitality.current, 80);
        assert!(fx.service.state().in_combat);
        assert_eq!(fx.service.transcript().len(), 3);
        assert_eq!(fx.service.transcript()[1].speaker, Speaker::Player);
        assert_eq!(fx.service.transcript()[2].speaker, Speaker::Narrator);
        assert_eq!(fx.service.choices(), ["Fight", "Run"]);
        assert_eq!(fx.service.quota_remaining(), 4);
        assert_eq!(fx.director.mood(), Mood::Combat);
    }

    #[tokio::test(start_paused = true)]
    async fn the_quota_gates_the_sixth_anonymous_action() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));
        producer
            .expect_submit_turn()
            .times(5)
            .returning(|_| Ok(opening_payload()));

        let mut fx = build(producer, anonymous());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        for n in 0..5 {
            assert_eq!(
                fx.service.submit_action("wait").await,
                SubmitOutcome::Applied,
                "action {n} should pass"
            );
        }
        assert_eq!(fx.service.quota_remaining(), 0);

        let before = fx.service.transcript().len();
        let outcome = fx.service.submit_action("wait").await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(RejectReason::QuotaExhausted)
        );

        // Only the upgrade notice was appended; the action text was not.
        let transcript = fx.service.transcript();
        assert_eq!(transcript.len(), before + 1);
        let notice = transcript.last().expect("notice record");
        assert_eq!(notice.speaker, Speaker::Narrator);
        assert_eq!(notice.style, Some(TextStyle::SystemLog));
        assert_eq!(notice.text, QUOTA_EXHAUSTED_NOTICE);
    }

    #[tokio::test(start_paused = true)]
    async fn an_entitled_identity_bypasses_the_quota() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));
        producer
            .expect_submit_turn()
            .times(6)
            .returning(|_| Ok(opening_payload()));

        let mut fx = build(producer, entitled());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        for _ in 0..6 {
            assert_eq!(fx.service.submit_action("wait").await, SubmitOutcome::Applied);
        }
        assert_eq!(fx.service.quota_remaining(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn a_failed_turn_keeps_the_prior_state_and_the_quota_spend() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));
        producer
            .expect_submit_turn()
            .times(1)
            .returning(|_| Err(ProducerError::RequestFailed("link dropped".to_string())));

        let mut fx = build(producer, anonymous());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        let outcome = fx.service.submit_action("run").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(fx.service.state().location, "Neon Strip");
        assert_eq!(fx.service.quota_remaining(), 4);
        let notice = fx.service.transcript().last().expect("notice record");
        assert_eq!(notice.text, CONNECTION_ERROR_NOTICE);
        assert_eq!(notice.style, Some(TextStyle::SystemLog));
        // The session stays usable.
        assert!(fx.service.is_started());
        assert_eq!(fx.service.phase(), SessionPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn an_invalid_payload_is_treated_as_a_failed_turn() {
        let mut invalid = combat_payload();
        invalid.state.enemies.clear(); // combat flag without enemies

        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));
        producer
            .expect_submit_turn()
            .times(1)
            .returning(move |_| Ok(invalid.clone()));

        let mut fx = build(producer, anonymous());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        let outcome = fx.service.submit_action("fight").await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!fx.service.state().in_combat);
        assert_eq!(fx.service.state().location, "Neon Strip");
    }

    #[tokio::test(start_paused = true)]
    async fn submission_is_rejected_while_text_reveals() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));

        let mut fx = build_full(
            producer,
            anonymous(),
            Arc::new(MemoryStore::default()),
            Arc::new(NullAudioBackend),
            Duration::from_millis(20),
        );
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        // The opening narrative is still ticking out.
        let outcome = fx.service.submit_action("look").await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(RejectReason::RevealInProgress)
        );
        assert_eq!(fx.service.transcript().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn a_turn_that_never_answers_times_out_as_a_failure() {
        let mut fx = build(SlowProducer, anonymous());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        let outcome = fx.service.submit_action("wait").await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        let notice = fx.service.transcript().last().expect("notice record");
        assert_eq!(notice.text, CONNECTION_ERROR_NOTICE);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_before_start_is_rejected() {
        let producer = MockTurnProducerPort::new();
        let mut fx = build(producer, anonymous());
        assert_eq!(
            fx.service.submit_action("look").await,
            SubmitOutcome::Rejected(RejectReason::NotStarted)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_the_running_session() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));

        let mut fx = build(producer, anonymous());
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");

        fx.service.restart();

        assert!(!fx.service.is_started());
        assert!(fx.service.transcript().is_empty());
        assert_eq!(fx.service.state().location, "Initializing...");
        assert_eq!(
            fx.service.submit_action("look").await,
            SubmitOutcome::Rejected(RejectReason::NotStarted)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn save_and_load_round_trip_restores_persisted_fields_only() {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::default());

        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));
        producer
            .expect_submit_turn()
            .times(1)
            .returning(|_| Ok(combat_payload()));

        let mut fx = build_full(
            producer,
            anonymous(),
            Arc::clone(&store) as Arc<dyn SnapshotStorePort>,
            Arc::new(NullAudioBackend),
            Duration::ZERO,
        );
        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start");
        fx.service.submit_action("look around").await;
        fx.service.save().await.expect("save");
        let saved_state = fx.service.state().clone();
        let saved_transcript = fx.service.transcript().to_vec();

        // A fresh engine, same slot.
        let mut restored = build_full(
            MockTurnProducerPort::new(),
            anonymous(),
            store as Arc<dyn SnapshotStorePort>,
            Arc::new(NullAudioBackend),
            Duration::ZERO,
        );
        assert!(restored.service.has_save().await);
        restored.service.load().await.expect("load");

        assert!(restored.service.is_started());
        assert_eq!(*restored.service.state(), saved_state);
        assert_eq!(restored.service.transcript(), saved_transcript);
        // Transient fields reset: full quota, no choices, default mood even
        // though the restored state is mid-combat.
        assert_eq!(restored.service.quota_remaining(), 5);
        assert!(restored.service.choices().is_empty());
        assert_eq!(restored.director.mood(), Mood::Exploration);
    }

    #[tokio::test(start_paused = true)]
    async fn load_without_a_snapshot_fails() {
        let mut fx = build(MockTurnProducerPort::new(), anonymous());
        assert!(!fx.service.has_save().await);
        assert!(matches!(
            fx.service.load().await,
            Err(SessionError::NoSnapshot)
        ));
        assert!(!fx.service.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn audio_activation_failure_does_not_block_the_session() {
        let mut producer = MockTurnProducerPort::new();
        producer
            .expect_begin_session()
            .times(1)
            .returning(|_| Ok(opening_payload()));

        let mut backend = MockAudioBackendPort::new();
        backend
            .expect_activate()
            .times(1)
            .returning(|| Err(AudioError::ActivationFailed("no device".to_string())));

        let mut fx = build_full(
            producer,
            anonymous(),
            Arc::new(MemoryStore::default()),
            Arc::new(backend),
            Duration::ZERO,
        );

        fx.service
            .start(SessionConfig::default())
            .await
            .expect("start must succeed without audio");
        assert!(fx.service.is_started());
    }
}
