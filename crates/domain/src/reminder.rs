use crate::{
    notification::NotificationChannel,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Discriminates which content store a `Reminder` target lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Event,
    Match,
    Movie,
    Countdown,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Match => "match",
            Self::Movie => "movie",
            Self::Countdown => "countdown",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown entity kind: `{0}`")]
pub struct InvalidEntityKindError(pub String);

impl FromStr for EntityKind {
    type Err = InvalidEntityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "event" => Ok(Self::Event),
            "match" => Ok(Self::Match),
            "movie" => Ok(Self::Movie),
            "countdown" => Ok(Self::Countdown),
            _ => Err(InvalidEntityKindError(s.to_string())),
        }
    }
}

/// How long before the target the `Reminder` should fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ReminderOffset {
    pub days: i32,
    pub hours: i32,
}

impl ReminderOffset {
    pub const MAX_DAYS: i32 = 365;
    pub const MAX_HOURS: i32 = 23;

    pub fn new(days: i32, hours: i32) -> Self {
        Self { days, hours }
    }

    /// Offsets accepted from clients. `apply_offset` itself does no bounds checking.
    pub fn is_valid(&self) -> bool {
        (0..=Self::MAX_DAYS).contains(&self.days) && (0..=Self::MAX_HOURS).contains(&self.hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Active,
    Paused,
    Cancelled,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
        }
    }

    /// Transitions a user may perform. Cancelled is terminal, only an upsert
    /// on the same natural key brings the `Reminder` back.
    pub fn can_transition_to(&self, next: ReminderStatus) -> bool {
        use ReminderStatus::*;
        matches!(
            (self, next),
            (Active, Paused) | (Active, Cancelled) | (Paused, Active) | (Paused, Cancelled)
        )
    }
}

impl FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::Error::msg(format!("Invalid reminder status: {}", s))),
        }
    }
}

/// Natural key of a `Reminder`. At most one `Reminder` exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderKey {
    pub user_id: ID,
    pub entity_type: EntityKind,
    pub entity_id: String,
    pub offset: ReminderOffset,
}

/// A `Reminder` is a user's request to be notified some time before
/// the target datetime of a piece of content.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    pub entity_type: EntityKind,
    /// Identifier of the content row in the store selected by `entity_type`
    pub entity_id: String,
    pub offset: ReminderOffset,
    pub channel: NotificationChannel,
    pub status: ReminderStatus,
    /// Quiet hours adjusted fire time, computed from the target that was
    /// resolved at the last upsert.
    pub next_fire_at: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Reminder {
    pub fn key(&self) -> ReminderKey {
        ReminderKey {
            user_id: self.user_id,
            entity_type: self.entity_type,
            entity_id: self.entity_id.clone(),
            offset: self.offset,
        }
    }

    pub fn has_key(&self, key: &ReminderKey) -> bool {
        self.user_id == key.user_id
            && self.entity_type == key.entity_type
            && self.entity_id == key.entity_id
            && self.offset == key.offset
    }

    pub fn is_due(&self, horizon: DateTime<Utc>) -> bool {
        self.status == ReminderStatus::Active && self.next_fire_at <= horizon
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn parses_entity_kinds() {
        assert_eq!("event".parse::<EntityKind>(), Ok(EntityKind::Event));
        assert_eq!("Match".parse::<EntityKind>(), Ok(EntityKind::Match));
        assert_eq!(" MOVIE ".parse::<EntityKind>(), Ok(EntityKind::Movie));
        assert_eq!("countdown".parse::<EntityKind>(), Ok(EntityKind::Countdown));
        assert!("concert".parse::<EntityKind>().is_err());
        assert!("".parse::<EntityKind>().is_err());
    }

    #[test]
    fn validates_offsets() {
        assert!(ReminderOffset::new(0, 0).is_valid());
        assert!(ReminderOffset::new(365, 23).is_valid());
        assert!(!ReminderOffset::new(-1, 0).is_valid());
        assert!(!ReminderOffset::new(0, -2).is_valid());
        assert!(!ReminderOffset::new(366, 0).is_valid());
        assert!(!ReminderOffset::new(0, 24).is_valid());
    }

    #[test]
    fn status_transitions() {
        use ReminderStatus::*;
        assert!(Active.can_transition_to(Paused));
        assert!(Active.can_transition_to(Cancelled));
        assert!(Paused.can_transition_to(Active));
        assert!(Paused.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Paused));
        assert!(!Active.can_transition_to(Active));
    }

    #[test]
    fn only_active_reminders_within_horizon_are_due() {
        let now = Utc.with_ymd_and_hms(2025, 8, 18, 12, 0, 0).unwrap();
        let mut reminder = Reminder {
            id: Default::default(),
            user_id: Default::default(),
            entity_type: EntityKind::Event,
            entity_id: "e1".into(),
            offset: ReminderOffset::new(1, 0),
            channel: NotificationChannel::Email,
            status: ReminderStatus::Active,
            next_fire_at: now + Duration::hours(48),
            created: now,
            updated: now,
        };
        let horizon = now + Duration::hours(48);
        assert!(reminder.is_due(horizon));

        reminder.next_fire_at = now + Duration::hours(49);
        assert!(!reminder.is_due(horizon));

        reminder.next_fire_at = now;
        reminder.status = ReminderStatus::Paused;
        assert!(!reminder.is_due(horizon));
    }
}
