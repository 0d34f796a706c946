use crate::{
    notification::NotificationChannel,
    reminder::{EntityKind, Reminder},
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderJobStatus {
    Pending,
    Sent,
    Failed,
}

impl ReminderJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl FromStr for ReminderJobStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(anyhow::Error::msg(format!("Invalid job status: {}", s))),
        }
    }
}

/// Minutes since the unix epoch. Two fire times in the same bucket are the
/// same notification as far as the queue is concerned.
pub fn minute_bucket(fire_at: DateTime<Utc>) -> i64 {
    fire_at.timestamp().div_euclid(60)
}

/// A notification that the delivery consumer should send at `fire_at`
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderQueueJob {
    pub id: ID,
    pub reminder_id: ID,
    pub user_id: ID,
    pub fire_at: DateTime<Utc>,
    pub kind: EntityKind,
    pub entity_id: String,
    pub channel: NotificationChannel,
    pub status: ReminderJobStatus,
    pub created: DateTime<Utc>,
}

impl ReminderQueueJob {
    pub fn pending(reminder: &Reminder, fire_at: DateTime<Utc>, created: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            reminder_id: reminder.id,
            user_id: reminder.user_id,
            fire_at,
            kind: reminder.entity_type,
            entity_id: reminder.entity_id.clone(),
            channel: reminder.channel,
            status: ReminderJobStatus::Pending,
            created,
        }
    }

    pub fn minute_bucket(&self) -> i64 {
        minute_bucket(self.fire_at)
    }

    /// Whether this job occupies the pending slot that `other` would need
    pub fn conflicts_with(&self, other: &ReminderQueueJob) -> bool {
        self.status == ReminderJobStatus::Pending
            && other.status == ReminderJobStatus::Pending
            && self.reminder_id == other.reminder_id
            && self.minute_bucket() == other.minute_bucket()
    }
}

impl Entity for ReminderQueueJob {
    fn id(&self) -> &ID {
        &self.id
    }
}
