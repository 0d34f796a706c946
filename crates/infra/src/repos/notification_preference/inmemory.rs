use super::INotificationPreferenceRepo;
use crate::repos::shared::inmemory_repo::*;
use reminder_scheduler_domain::{NotificationChannel, NotificationPreference, ID};
use std::sync::Mutex;

pub struct InMemoryNotificationPreferenceRepo {
    preferences: Mutex<Vec<NotificationPreference>>,
}

impl InMemoryNotificationPreferenceRepo {
    pub fn new() -> Self {
        Self {
            preferences: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationPreferenceRepo for InMemoryNotificationPreferenceRepo {
    async fn is_enabled(
        &self,
        user_id: &ID,
        channel: NotificationChannel,
    ) -> anyhow::Result<bool> {
        let preferences = find_by(&self.preferences, |p| {
            p.user_id == *user_id && p.channel == channel
        })?;
        Ok(preferences.iter().all(|p| p.enabled))
    }

    async fn save(&self, preference: &NotificationPreference) -> anyhow::Result<()> {
        let mut preferences = lock(&self.preferences)?;
        preferences.retain(|p| !(p.user_id == preference.user_id && p.channel == preference.channel));
        preferences.push(preference.clone());
        Ok(())
    }
}
