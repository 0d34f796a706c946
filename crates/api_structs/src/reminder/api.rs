use crate::dtos::{ReminderDTO, ReminderOffsetDTO};
use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod upsert_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub kind: String,
        pub entity_id: String,
        pub offsets: ReminderOffsetDTO,
        #[serde(default)]
        pub channel: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder_id: ID,
        pub next_fire_at: DateTime<Utc>,
    }

    impl APIResponse {
        pub fn new(reminder: &Reminder) -> Self {
            Self {
                reminder_id: reminder.id,
                next_fire_at: reminder.next_fire_at,
            }
        }
    }
}

pub mod get_reminder {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder_status {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub status: String,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod sweep_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub enqueued: i64,
        pub skipped: i64,
    }
}
