//! Voting session state machine (Entity)

use crate::core::error::DomainError;
use crate::core::subject::TradeSubject;
use crate::session::limits::SessionLimits;
use crate::session::phase::Phase;
use crate::session::value_objects::SessionId;
use chrono::{DateTime, TimeDelta, Utc};

/// The voting-session state machine (Entity)
///
/// Holds the configuration of the current poll (subject, duration) and its
/// phase, and owns every transition. The machine is purely reactive: all
/// time-dependent methods take `now` explicitly and it never reads a clock
/// itself, so the whole lifecycle can be exercised with fixed timestamps.
///
/// Transitions are strictly forward:
///
/// ```text
/// Idle --start--> Countdown --tick--> Active --tick--> Closed
///   ^                                                    |
///   +--------------------- reset ------------------------+
/// ```
///
/// `reset` is additionally accepted from any phase as an operator override.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, TimeDelta, Utc};
/// use pitchpoll_domain::{Phase, SessionLimits, Ticker, TradeDirection, TradeSubject, VotingSession};
///
/// let mut session = VotingSession::new(SessionLimits::default());
/// let t0 = DateTime::<Utc>::from_timestamp(1_000, 0).unwrap();
///
/// let subject = TradeSubject::new(Ticker::new("AAPL"), TradeDirection::Buy, 100);
/// session.start(subject, TimeDelta::seconds(60), t0).unwrap();
/// assert_eq!(session.phase(), Phase::Countdown);
///
/// session.tick(t0 + TimeDelta::seconds(3));
/// assert_eq!(session.phase(), Phase::Active);
/// ```
#[derive(Debug, Clone)]
pub struct VotingSession {
    limits: SessionLimits,
    phase: Phase,
    id: Option<SessionId>,
    subject: Option<TradeSubject>,
    duration: Option<TimeDelta>,
    countdown_started_at: Option<DateTime<Utc>>,
    window_opened_at: Option<DateTime<Utc>>,
    window_closes_at: Option<DateTime<Utc>>,
}

impl VotingSession {
    /// Create a new idle session with the given limits
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            limits,
            phase: Phase::Idle,
            id: None,
            subject: None,
            duration: None,
            countdown_started_at: None,
            window_opened_at: None,
            window_closes_at: None,
        }
    }

    /// Start a new poll
    ///
    /// Valid only from [`Phase::Idle`]. Validates the requested duration and
    /// share quantity against the configured limits; on success mints a
    /// fresh [`SessionId`], stores the subject, and enters
    /// [`Phase::Countdown`] with `countdown_started_at = now`.
    ///
    /// A rejected start leaves the session untouched: no id is minted and
    /// the phase does not change.
    pub fn start(
        &mut self,
        subject: TradeSubject,
        duration: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<SessionId, DomainError> {
        if self.phase != Phase::Idle {
            return Err(DomainError::SessionInProgress(self.phase));
        }
        if !self.limits.duration_in_bounds(duration) {
            return Err(DomainError::DurationOutOfRange {
                requested: duration.num_seconds(),
                min: self.limits.min_duration.num_seconds(),
                max: self.limits.max_duration.num_seconds(),
            });
        }
        if !self.limits.quantity_in_bounds(subject.quantity) {
            return Err(DomainError::QuantityOutOfRange {
                requested: subject.quantity,
                min: self.limits.min_quantity,
                max: self.limits.max_quantity,
            });
        }

        let id = SessionId::generate();
        self.id = Some(id.clone());
        self.subject = Some(subject);
        self.duration = Some(duration);
        self.phase = Phase::Countdown;
        self.countdown_started_at = Some(now);
        Ok(id)
    }

    /// Re-evaluate time-based transitions
    ///
    /// Returns the newly entered phase when a transition fires, `None`
    /// otherwise. Idle and Closed are stable; calling `tick` any number of
    /// times after a threshold has been crossed changes nothing beyond the
    /// first transition.
    ///
    /// A fresh session id per poll guarantees a clean vote slate when the
    /// window opens; the ballot store keys on it, so no explicit clearing
    /// happens here.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Phase> {
        match self.phase {
            Phase::Countdown => {
                let started = self
                    .countdown_started_at
                    .expect("countdown phase always has countdown_started_at");
                if now - started >= self.limits.countdown_length {
                    let duration = self.duration.expect("countdown phase always has duration");
                    self.phase = Phase::Active;
                    self.window_opened_at = Some(now);
                    self.window_closes_at = Some(now + duration);
                    Some(Phase::Active)
                } else {
                    None
                }
            }
            Phase::Active => {
                let closes = self
                    .window_closes_at
                    .expect("active phase always has window_closes_at");
                if now >= closes {
                    self.phase = Phase::Closed;
                    Some(Phase::Closed)
                } else {
                    None
                }
            }
            Phase::Idle | Phase::Closed => None,
        }
    }

    /// Return the session to [`Phase::Idle`], clearing all fields
    ///
    /// Valid from any phase as an operator override. Already-recorded
    /// ballots are not rolled back; they stay attached to the now-defunct
    /// session id in the store. The next `start` mints a new id.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.id = None;
        self.subject = None;
        self.duration = None;
        self.countdown_started_at = None;
        self.window_opened_at = None;
        self.window_closes_at = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn id(&self) -> Option<&SessionId> {
        self.id.as_ref()
    }

    pub fn subject(&self) -> Option<&TradeSubject> {
        self.subject.as_ref()
    }

    pub fn limits(&self) -> &SessionLimits {
        &self.limits
    }

    pub fn countdown_started_at(&self) -> Option<DateTime<Utc>> {
        self.countdown_started_at
    }

    pub fn window_opened_at(&self) -> Option<DateTime<Utc>> {
        self.window_opened_at
    }

    pub fn window_closes_at(&self) -> Option<DateTime<Utc>> {
        self.window_closes_at
    }

    /// Time left before the next automatic transition, for display
    ///
    /// In Countdown this is the time until voting opens; in Active the time
    /// until the window closes. `None` in Idle and Closed. Never negative:
    /// a crossed threshold reports zero until the next `tick` observes it.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let deadline = match self.phase {
            Phase::Countdown => self.countdown_started_at.map(|t| t + self.limits.countdown_length),
            Phase::Active => self.window_closes_at,
            Phase::Idle | Phase::Closed => None,
        }?;
        Some((deadline - now).max(TimeDelta::zero()))
    }
}
