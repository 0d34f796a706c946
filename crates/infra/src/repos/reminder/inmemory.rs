use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{Reminder, ReminderStatus, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        // Lookup and write happen under the same lock
        let mut reminders = lock(&self.reminders)?;
        let key = reminder.key();
        match reminders.iter_mut().find(|r| r.has_key(&key)) {
            Some(existing) => {
                existing.channel = reminder.channel;
                existing.status = reminder.status;
                existing.next_fire_at = reminder.next_fire_at;
                existing.updated = reminder.updated;
                Ok(existing.clone())
            }
            None => {
                reminders.push(reminder.clone());
                Ok(reminder.clone())
            }
        }
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.user_id == *user_id)?;
        reminders.sort_by_key(|r| r.next_fire_at);
        Ok(reminders)
    }

    async fn find_due(&self, horizon: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.is_due(horizon))?;
        reminders.sort_by_key(|r| r.next_fire_at);
        Ok(reminders)
    }

    async fn set_status(
        &self,
        reminder_id: &ID,
        current: ReminderStatus,
        next: ReminderStatus,
        updated: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let updated_count = update_many(
            &self.reminders,
            |r| r.id == *reminder_id && r.status == current,
            |r| {
                r.status = next;
                r.updated = updated;
            },
        )?;
        Ok(updated_count == 1)
    }
}
