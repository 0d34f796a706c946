use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{
    EntityKind, NotificationChannel, Reminder, ReminderOffset, ReminderStatus, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ReminderOffsetDTO {
    pub days: i32,
    pub hours: i32,
}

impl From<ReminderOffsetDTO> for ReminderOffset {
    fn from(offset: ReminderOffsetDTO) -> Self {
        ReminderOffset::new(offset.days, offset.hours)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub entity_type: EntityKind,
    pub entity_id: String,
    pub offsets: ReminderOffsetDTO,
    pub channel: NotificationChannel,
    pub status: ReminderStatus,
    pub next_fire_at: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            entity_type: reminder.entity_type,
            entity_id: reminder.entity_id,
            offsets: ReminderOffsetDTO {
                days: reminder.offset.days,
                hours: reminder.offset.hours,
            },
            channel: reminder.channel,
            status: reminder.status,
            next_fire_at: reminder.next_fire_at,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
