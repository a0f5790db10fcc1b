//! Poll controller use case
//!
//! Orchestrates the session state machine, identity resolution, and the
//! ballot store for the presentation layer. The controller is purely
//! reactive: it drives `tick` on every public entry point, so phase
//! transitions are never missed even when no participant is active, and it
//! holds no internal timers; the presentation layer owns the polling
//! cadence.

use crate::ports::clock::Clock;
use crate::ports::identity::{ConnectionContext, IdentityError, IdentityResolver};
use crate::ports::vote_store::{RecordOutcome, VoteStore, VoteStoreError};
use chrono::TimeDelta;
use pitchpoll_domain::{
    Ballot, DomainError, Phase, SessionId, SessionLimits, Tally, Ticker, TradeDirection,
    TradeSubject, VoteChoice, VotingSession,
};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced to the presentation layer
///
/// Together with [`RecordOutcome`], every `cast_vote` call resolves to
/// exactly one of {Recorded, AlreadyVoted, VotingClosed,
/// IdentityUnavailable, Store}, never an ambiguous no-op.
#[derive(Error, Debug)]
pub enum PollError {
    #[error(transparent)]
    Session(#[from] DomainError),

    #[error("Voting is not open")]
    VotingClosed,

    #[error("Could not establish a participant identity; try again")]
    IdentityUnavailable,

    #[error(transparent)]
    Store(#[from] VoteStoreError),
}

impl From<IdentityError> for PollError {
    fn from(_: IdentityError) -> Self {
        PollError::IdentityUnavailable
    }
}

/// Read-only snapshot of the poll for rendering
#[derive(Debug, Clone)]
pub struct PollStatus {
    pub phase: Phase,
    pub session_id: Option<SessionId>,
    pub subject: Option<TradeSubject>,
    /// Time until the next automatic transition (countdown or window close)
    pub remaining: Option<TimeDelta>,
    /// Current counts; populated once voting has opened
    pub tally: Option<Tally>,
}

/// Use case orchestrating one live poll
///
/// Exclusively owns the single live [`VotingSession`] and its transitions.
/// Ports are injected, so the identity source and the persistence engine
/// are swappable without touching voting logic.
pub struct PollController<S, I, C> {
    store: Arc<S>,
    identity: Arc<I>,
    clock: C,
    session: Mutex<VotingSession>,
}

impl<S, I, C> PollController<S, I, C>
where
    S: VoteStore,
    I: IdentityResolver,
    C: Clock,
{
    pub fn new(store: Arc<S>, identity: Arc<I>, clock: C, limits: SessionLimits) -> Self {
        Self {
            store,
            identity,
            clock,
            session: Mutex::new(VotingSession::new(limits)),
        }
    }

    // The guard is never held across an await point
    fn lock_session(&self) -> MutexGuard<'_, VotingSession> {
        self.session.lock().expect("session lock poisoned")
    }

    /// Re-evaluate time-based transitions
    ///
    /// Returns the newly entered phase when a transition fired. Safe to
    /// call on any cadence; re-evaluation past a crossed threshold is a
    /// no-op.
    pub fn tick(&self) -> Option<Phase> {
        let now = self.clock.now();
        let mut session = self.lock_session();
        let entered = session.tick(now);
        if let Some(phase) = entered {
            match phase {
                Phase::Active => info!(
                    closes_at = %session.window_closes_at().map(|t| t.to_rfc3339()).unwrap_or_default(),
                    "Voting window opened"
                ),
                Phase::Closed => info!("Voting window closed"),
                _ => {}
            }
        }
        entered
    }

    /// Start a new poll over the given trade proposal
    ///
    /// Valid only while idle. The ticker is validated here (an empty
    /// symbol is rejected before it can reach the domain); duration and
    /// quantity bounds are enforced by the session limits.
    pub fn start_vote(
        &self,
        ticker: &str,
        direction: TradeDirection,
        quantity: u32,
        duration: TimeDelta,
    ) -> Result<SessionId, PollError> {
        self.tick();

        let ticker = Ticker::try_new(ticker).ok_or(DomainError::EmptyTicker)?;
        let subject = TradeSubject::new(ticker, direction, quantity);
        let description = subject.to_string();

        let now = self.clock.now();
        let mut session = self.lock_session();
        let id = session.start(subject, duration, now)?;
        info!(session_id = %id, subject = %description, "Poll started");
        Ok(id)
    }

    /// Cast one participant's vote
    ///
    /// Rejected with [`PollError::VotingClosed`] unless the session is
    /// Active; otherwise resolves the participant identity and delegates to
    /// the store, surfacing `Recorded`/`AlreadyVoted` for user feedback.
    /// At most one vote is ever recorded per participant regardless of how
    /// many times this is called, enforced by the store's uniqueness, not
    /// by client-side debouncing.
    pub async fn cast_vote(
        &self,
        context: &ConnectionContext,
        choice: VoteChoice,
    ) -> Result<RecordOutcome, PollError> {
        self.tick();

        let session_id = {
            let session = self.lock_session();
            if !session.phase().accepts_votes() {
                return Err(PollError::VotingClosed);
            }
            session.id().cloned().ok_or(PollError::VotingClosed)?
        };

        let participant_id = self.identity.resolve(context)?;
        let ballot = Ballot::new(session_id, participant_id, choice, self.clock.now());
        let outcome = self.store.record(ballot).await?;
        debug!(?outcome, %choice, "Vote processed");
        Ok(outcome)
    }

    /// The session's current phase
    pub fn current_phase(&self) -> Phase {
        self.tick();
        self.lock_session().phase()
    }

    /// Current counts for the live session, derived from the store
    ///
    /// Returns an empty tally while no session is live. History for past
    /// session ids stays in the store but is no longer exposed here.
    pub async fn current_tally(&self) -> Result<Tally, PollError> {
        self.tick();
        let session_id = { self.lock_session().id().cloned() };
        match session_id {
            Some(id) => Ok(self.store.tally(&id).await?),
            None => Ok(Tally::empty()),
        }
    }

    /// Time until the next automatic transition, for display
    pub fn remaining(&self) -> Option<TimeDelta> {
        self.tick();
        self.lock_session().remaining(self.clock.now())
    }

    /// Read-only snapshot of the whole poll for rendering
    pub async fn status(&self) -> Result<PollStatus, PollError> {
        self.tick();
        let now = self.clock.now();
        let (phase, session_id, subject, remaining, opened) = {
            let session = self.lock_session();
            (
                session.phase(),
                session.id().cloned(),
                session.subject().cloned(),
                session.remaining(now),
                session.window_opened_at().is_some(),
            )
        };

        let tally = match (&session_id, opened) {
            (Some(id), true) => Some(self.store.tally(id).await?),
            _ => None,
        };

        Ok(PollStatus {
            phase,
            session_id,
            subject,
            remaining,
            tally,
        })
    }

    /// Abandon the current session and return to idle
    ///
    /// Effective immediately from any phase. Recorded ballots are not
    /// rolled back; they remain attached to the defunct session id.
    pub fn reset_session(&self) {
        let mut session = self.lock_session();
        if let Some(id) = session.id() {
            info!(session_id = %id, "Session reset");
        }
        session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use pitchpoll_domain::ParticipantId;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// In-memory store mirroring the production adapter's check-then-insert
    #[derive(Default)]
    struct TestStore {
        ballots: Mutex<HashMap<(SessionId, ParticipantId), Ballot>>,
        unavailable: AtomicBool,
    }

    #[async_trait]
    impl VoteStore for TestStore {
        async fn record(&self, ballot: Ballot) -> Result<RecordOutcome, VoteStoreError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(VoteStoreError::Unavailable("test store down".into()));
            }
            let mut ballots = self.ballots.lock().unwrap();
            match ballots.entry(ballot.key()) {
                std::collections::hash_map::Entry::Occupied(_) => Ok(RecordOutcome::AlreadyVoted),
                std::collections::hash_map::Entry::Vacant(e) => {
                    e.insert(ballot);
                    Ok(RecordOutcome::Recorded)
                }
            }
        }

        async fn tally(&self, session_id: &SessionId) -> Result<Tally, VoteStoreError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(VoteStoreError::Unavailable("test store down".into()));
            }
            let ballots = self.ballots.lock().unwrap();
            Ok(Tally::from_choices(
                ballots
                    .values()
                    .filter(|b| &b.session_id == session_id)
                    .map(|b| b.choice),
            ))
        }
    }

    /// Identity resolver that uses the raw token as the participant id
    struct TokenEcho;

    impl IdentityResolver for TokenEcho {
        fn resolve(&self, context: &ConnectionContext) -> Result<ParticipantId, IdentityError> {
            context
                .session_token()
                .map(ParticipantId::new)
                .ok_or(IdentityError::Unavailable)
        }
    }

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn controller() -> (
        PollController<TestStore, TokenEcho, FixedClock>,
        Arc<TestStore>,
        FixedClock,
    ) {
        let store = Arc::new(TestStore::default());
        let clock = FixedClock::new(t(1_000));
        let controller = PollController::new(
            store.clone(),
            Arc::new(TokenEcho),
            clock.clone(),
            SessionLimits::default(),
        );
        (controller, store, clock)
    }

    fn start_default(controller: &PollController<TestStore, TokenEcho, FixedClock>) -> SessionId {
        controller
            .start_vote("AAPL", TradeDirection::Buy, 100, TimeDelta::seconds(60))
            .unwrap()
    }

    #[tokio::test]
    async fn test_full_poll_scenario() {
        let (controller, store, clock) = controller();

        let session_id = start_default(&controller);
        assert_eq!(controller.current_phase(), Phase::Countdown);

        // Countdown elapses, window opens
        clock.advance(TimeDelta::seconds(3));
        assert_eq!(controller.current_phase(), Phase::Active);

        let p1 = ConnectionContext::new("participant-1");
        let p2 = ConnectionContext::new("participant-2");

        let outcome = controller.cast_vote(&p1, VoteChoice::Yes).await.unwrap();
        assert_eq!(outcome, RecordOutcome::Recorded);
        assert_eq!(
            controller.current_tally().await.unwrap(),
            Tally { yes: 1, no: 0 }
        );

        // Second attempt from the same participant changes nothing
        let outcome = controller.cast_vote(&p1, VoteChoice::Yes).await.unwrap();
        assert_eq!(outcome, RecordOutcome::AlreadyVoted);
        assert_eq!(
            controller.current_tally().await.unwrap(),
            Tally { yes: 1, no: 0 }
        );

        let outcome = controller.cast_vote(&p2, VoteChoice::No).await.unwrap();
        assert_eq!(outcome, RecordOutcome::Recorded);
        assert_eq!(
            controller.current_tally().await.unwrap(),
            Tally { yes: 1, no: 1 }
        );

        // Window elapses
        clock.advance(TimeDelta::seconds(60));
        assert_eq!(controller.current_phase(), Phase::Closed);
        assert!(matches!(
            controller.cast_vote(&p2, VoteChoice::Yes).await,
            Err(PollError::VotingClosed)
        ));

        // Reset: controller goes idle, history stays queryable in the store
        controller.reset_session();
        assert_eq!(controller.current_phase(), Phase::Idle);
        assert_eq!(controller.current_tally().await.unwrap(), Tally::empty());
        assert_eq!(
            store.tally(&session_id).await.unwrap(),
            Tally { yes: 1, no: 1 }
        );
    }

    #[tokio::test]
    async fn test_cast_vote_rejected_outside_active() {
        let (controller, _, clock) = controller();
        let p1 = ConnectionContext::new("participant-1");

        // Idle
        assert!(matches!(
            controller.cast_vote(&p1, VoteChoice::Yes).await,
            Err(PollError::VotingClosed)
        ));

        // Countdown
        start_default(&controller);
        assert!(matches!(
            controller.cast_vote(&p1, VoteChoice::Yes).await,
            Err(PollError::VotingClosed)
        ));

        // A vote attempt at the countdown boundary drives the transition
        // itself; no separate tick needed
        clock.advance(TimeDelta::seconds(3));
        assert!(controller.cast_vote(&p1, VoteChoice::Yes).await.is_ok());
    }

    #[tokio::test]
    async fn test_identity_unavailable() {
        let (controller, store, clock) = controller();
        start_default(&controller);
        clock.advance(TimeDelta::seconds(3));

        let result = controller
            .cast_vote(&ConnectionContext::anonymous(), VoteChoice::Yes)
            .await;
        assert!(matches!(result, Err(PollError::IdentityUnavailable)));
        assert!(store.ballots.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let (controller, store, clock) = controller();
        start_default(&controller);
        clock.advance(TimeDelta::seconds(3));

        store.unavailable.store(true, Ordering::SeqCst);
        let result = controller
            .cast_vote(&ConnectionContext::new("p1"), VoteChoice::Yes)
            .await;
        assert!(matches!(result, Err(PollError::Store(_))));
    }

    #[tokio::test]
    async fn test_start_vote_validation() {
        let (controller, _, _) = controller();

        let err = controller
            .start_vote("   ", TradeDirection::Buy, 100, TimeDelta::seconds(60))
            .unwrap_err();
        assert!(matches!(err, PollError::Session(DomainError::EmptyTicker)));

        let err = controller
            .start_vote("AAPL", TradeDirection::Buy, 100, TimeDelta::seconds(5))
            .unwrap_err();
        assert!(matches!(
            err,
            PollError::Session(DomainError::DurationOutOfRange { .. })
        ));

        let err = controller
            .start_vote("AAPL", TradeDirection::Buy, 0, TimeDelta::seconds(60))
            .unwrap_err();
        assert!(matches!(
            err,
            PollError::Session(DomainError::QuantityOutOfRange { .. })
        ));

        // Nothing was started
        assert_eq!(controller.current_phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_start_vote_rejected_while_live() {
        let (controller, _, _) = controller();
        start_default(&controller);

        let err = controller
            .start_vote("MSFT", TradeDirection::Sell, 50, TimeDelta::seconds(30))
            .unwrap_err();
        assert!(matches!(
            err,
            PollError::Session(DomainError::SessionInProgress(Phase::Countdown))
        ));
    }

    #[tokio::test]
    async fn test_tally_counts_distinct_recorded_participants() {
        let (controller, _, clock) = controller();
        start_default(&controller);
        clock.advance(TimeDelta::seconds(3));

        let mut recorded = 0;
        for (token, choice) in [
            ("a", VoteChoice::Yes),
            ("b", VoteChoice::No),
            ("a", VoteChoice::No), // duplicate participant
            ("c", VoteChoice::Yes),
        ] {
            let outcome = controller
                .cast_vote(&ConnectionContext::new(token), choice)
                .await
                .unwrap();
            if outcome.is_recorded() {
                recorded += 1;
            }
        }

        let tally = controller.current_tally().await.unwrap();
        assert_eq!(tally.total(), recorded);
        assert_eq!(tally, Tally { yes: 2, no: 1 });
    }

    #[tokio::test]
    async fn test_transitions_fire_without_participant_activity() {
        let (controller, _, clock) = controller();
        start_default(&controller);

        // No explicit tick calls in between: a single late status read
        // observes the countdown transition. The window opens at the tick
        // that observes the threshold, so the full duration is remaining.
        clock.advance(TimeDelta::seconds(10));
        let status = controller.status().await.unwrap();
        assert_eq!(status.phase, Phase::Active);
        assert_eq!(status.tally, Some(Tally::empty()));
        assert_eq!(status.remaining, Some(TimeDelta::seconds(60)));
    }

    #[tokio::test]
    async fn test_status_idle() {
        let (controller, _, _) = controller();
        let status = controller.status().await.unwrap();
        assert_eq!(status.phase, Phase::Idle);
        assert!(status.session_id.is_none());
        assert!(status.subject.is_none());
        assert!(status.remaining.is_none());
        assert!(status.tally.is_none());
    }
}
