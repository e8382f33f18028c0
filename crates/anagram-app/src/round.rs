//! Round state machine and countdown.
//!
//! A round is a guessing phase followed by a reveal phase. The server drives
//! every transition and supplies absolute deadlines; the client only counts
//! down to them.
//!
//! # State Machine
//!
//! ```text
//! ┌───────────────┐ RoundStarted  ┌────────┐ RoundFinished ┌──────────┐
//! │ AwaitingStart │──────────────>│ Active │──────────────>│ Revealed │
//! └───────────────┘               └────────┘               └──────────┘
//!         ^                                                      │
//!         └──────────────────────── GameFinished ────────────────┘
//! ```
//!
//! Every round event replaces the phase outright, whatever the current phase
//! is. Nothing is merged with the previous phase.

use std::time::Duration;

use anagram_proto::{DecodeError, InboundEvent};
use chrono::{DateTime, Utc};

/// Guide shown while no round is running.
pub const AWAITING_START_GUIDE: &str = "WAITING ROUND START!";

/// Guide shown while guessing is open.
pub const ACTIVE_GUIDE: &str = "PLEASE GUESS!";

/// Guide shown while the answer is revealed.
pub const REVEALED_GUIDE: &str = "TIME'S UP! THE ANSWER:";

const NANOS_PER_TENTH: u128 = 100_000_000;

/// Current round phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoundPhase {
    /// No active round.
    #[default]
    AwaitingStart,

    /// Guessing is open.
    Active {
        /// Puzzle text (not necessarily the answer).
        word: String,
        /// When guessing closes.
        deadline: DateTime<Utc>,
    },

    /// Round ended; answer is shown.
    Revealed {
        /// The solution.
        answer: String,
        /// When the next round starts.
        deadline: DateTime<Utc>,
    },
}

/// Result of applying an inbound event to a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Event does not affect the round.
    Unchanged,

    /// Phase was replaced.
    Entered {
        /// New phase.
        phase: RoundPhase,
        /// Deadline could not be parsed and was collapsed to "now".
        timestamp_error: Option<DecodeError>,
    },
}

impl RoundPhase {
    /// Compute the phase that follows `event`.
    ///
    /// Only round events transition. A malformed deadline still transitions,
    /// with the deadline set to `now`.
    pub fn apply(&self, event: &InboundEvent, now: DateTime<Utc>) -> Transition {
        match event {
            InboundEvent::RoundStarted { word, finish } => {
                let (deadline, timestamp_error) = finish.resolve(now);
                Transition::Entered {
                    phase: Self::Active { word: word.clone(), deadline },
                    timestamp_error,
                }
            },
            InboundEvent::RoundFinished { answer, next_round } => {
                let (deadline, timestamp_error) = next_round.resolve(now);
                Transition::Entered {
                    phase: Self::Revealed { answer: answer.clone(), deadline },
                    timestamp_error,
                }
            },
            InboundEvent::GameFinished => {
                Transition::Entered { phase: Self::AwaitingStart, timestamp_error: None }
            },
            InboundEvent::Chat(_) | InboundEvent::Pong | InboundEvent::Unrecognized(_) => {
                Transition::Unchanged
            },
        }
    }

    /// Heading text for this phase.
    pub fn guide(&self) -> &'static str {
        match self {
            Self::AwaitingStart => AWAITING_START_GUIDE,
            Self::Active { .. } => ACTIVE_GUIDE,
            Self::Revealed { .. } => REVEALED_GUIDE,
        }
    }

    /// Word to display: the puzzle, the answer, or nothing.
    pub fn display_word(&self) -> &str {
        match self {
            Self::AwaitingStart => "",
            Self::Active { word, .. } => word,
            Self::Revealed { answer, .. } => answer,
        }
    }

    /// Deadline to count down to. `None` while awaiting a round.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::AwaitingStart => None,
            Self::Active { deadline, .. } | Self::Revealed { deadline, .. } => Some(*deadline),
        }
    }
}

/// Countdown towards a phase deadline.
///
/// A new countdown (with a fresh id) is created on every transition that
/// carries a deadline. Ticks for any other id are stale and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    id: u64,
    deadline: DateTime<Utc>,
    remaining: Duration,
}

impl Countdown {
    /// Start counting down to `deadline`.
    pub fn new(id: u64, deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self { id, deadline, remaining: remaining_until(deadline, now) }
    }

    /// Countdown id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Instant being counted down to.
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Time left as of the last update.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Recompute the time left.
    pub fn update(&mut self, now: DateTime<Utc>) {
        self.remaining = remaining_until(self.deadline, now);
    }

    /// No time left.
    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }
}

/// `max(0, deadline - now)`.
pub fn remaining_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (deadline - now).to_std().unwrap_or(Duration::ZERO)
}

/// Format a duration as seconds with one decimal, rounded to the nearest
/// 100 ms (`9.5s`).
pub fn format_remaining(remaining: Duration) -> String {
    let tenths = (remaining.as_nanos() + NANOS_PER_TENTH / 2) / NANOS_PER_TENTH;
    format!("{}.{}s", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use anagram_proto::Timestamp;
    use chrono::TimeDelta;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    #[test]
    fn round_started_enters_active() {
        let now = at(1_000);
        let event =
            InboundEvent::RoundStarted { word: "lpepa".into(), finish: Timestamp::At(at(1_030)) };

        let transition = RoundPhase::AwaitingStart.apply(&event, now);

        assert_eq!(transition, Transition::Entered {
            phase: RoundPhase::Active { word: "lpepa".into(), deadline: at(1_030) },
            timestamp_error: None,
        });
    }

    #[test]
    fn malformed_deadline_collapses_to_now() {
        let now = at(1_000);
        let event = InboundEvent::RoundFinished {
            answer: "apple".into(),
            next_round: Timestamp::parse("not a time"),
        };

        let Transition::Entered { phase, timestamp_error } = RoundPhase::default().apply(&event, now)
        else {
            panic!("round finished must transition");
        };

        assert_eq!(phase, RoundPhase::Revealed { answer: "apple".into(), deadline: now });
        assert!(matches!(timestamp_error, Some(DecodeError::InvalidTimestamp { .. })));
    }

    #[test]
    fn game_finished_resets_from_any_phase() {
        let now = at(1_000);
        let phases = [
            RoundPhase::AwaitingStart,
            RoundPhase::Active { word: "x".into(), deadline: now },
            RoundPhase::Revealed { answer: "y".into(), deadline: now },
        ];

        for phase in phases {
            assert_eq!(phase.apply(&InboundEvent::GameFinished, now), Transition::Entered {
                phase: RoundPhase::AwaitingStart,
                timestamp_error: None,
            });
        }
    }

    #[test]
    fn non_round_events_do_not_transition() {
        let phase = RoundPhase::Active { word: "x".into(), deadline: at(5) };
        for event in [
            InboundEvent::Chat("hi".into()),
            InboundEvent::Pong,
            InboundEvent::Unrecognized("Weird".into()),
        ] {
            assert_eq!(phase.apply(&event, at(0)), Transition::Unchanged);
        }
    }

    #[test]
    fn guides_and_words() {
        assert_eq!(RoundPhase::AwaitingStart.guide(), "WAITING ROUND START!");
        assert_eq!(RoundPhase::AwaitingStart.display_word(), "");

        let revealed = RoundPhase::Revealed { answer: "pale".into(), deadline: at(0) };
        assert_eq!(revealed.guide(), "TIME'S UP! THE ANSWER:");
        assert_eq!(revealed.display_word(), "pale");
    }

    #[test]
    fn remaining_is_clamped_at_zero() {
        assert_eq!(remaining_until(at(10), at(20)), Duration::ZERO);
        assert_eq!(remaining_until(at(20), at(10)), Duration::from_secs(10));
    }

    #[test]
    fn countdown_expires() {
        let start = at(100);
        let mut countdown = Countdown::new(1, start + TimeDelta::milliseconds(250), start);
        assert!(!countdown.is_expired());

        countdown.update(start + TimeDelta::milliseconds(300));
        assert!(countdown.is_expired());
    }

    #[test]
    fn format_rounds_to_tenths() {
        assert_eq!(format_remaining(Duration::from_millis(9_500)), "9.5s");
        assert_eq!(format_remaining(Duration::from_millis(9_449)), "9.4s");
        assert_eq!(format_remaining(Duration::from_millis(9_450)), "9.5s");
        assert_eq!(format_remaining(Duration::from_millis(9_960)), "10.0s");
        assert_eq!(format_remaining(Duration::ZERO), "0.0s");
    }
}
