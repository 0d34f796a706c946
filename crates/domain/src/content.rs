use crate::reminder::EntityKind;
use chrono::{DateTime, Utc};

/// The datetime columns of a content store row, as far as reminders care.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentTarget {
    Event {
        start: DateTime<Utc>,
    },
    Match {
        kickoff: DateTime<Utc>,
    },
    Movie {
        cinema_release: Option<DateTime<Utc>>,
        platform_a_release: Option<DateTime<Utc>>,
        platform_b_release: Option<DateTime<Utc>>,
    },
    Countdown {
        target: DateTime<Utc>,
    },
}

impl ContentTarget {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Event { .. } => EntityKind::Event,
            Self::Match { .. } => EntityKind::Match,
            Self::Movie { .. } => EntityKind::Movie,
            Self::Countdown { .. } => EntityKind::Countdown,
        }
    }

    /// The datetime a reminder counts back from.
    /// Movies prefer the cinema release, then platform A, then platform B.
    pub fn target_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Event { start } => Some(*start),
            Self::Match { kickoff } => Some(*kickoff),
            Self::Movie {
                cinema_release,
                platform_a_release,
                platform_b_release,
            } => cinema_release.or(*platform_a_release).or(*platform_b_release),
            Self::Countdown { target } => Some(*target),
        }
    }
}
