mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationPreferenceRepo;
pub use postgres::PostgresNotificationPreferenceRepo;
use reminder_scheduler_domain::{NotificationChannel, NotificationPreference, ID};

#[async_trait::async_trait]
pub trait INotificationPreferenceRepo: Send + Sync {
    /// Users are opted in to a channel unless they stored a preference
    /// disabling it.
    async fn is_enabled(&self, user_id: &ID, channel: NotificationChannel)
        -> anyhow::Result<bool>;
    async fn save(&self, preference: &NotificationPreference) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::SchedulerContext;
    use reminder_scheduler_domain::{NotificationChannel, NotificationPreference, ID};

    #[tokio::test]
    async fn channels_are_enabled_by_default() {
        let ctx = SchedulerContext::create_inmemory();
        let user_id = ID::default();
        assert!(ctx
            .repos
            .notification_preferences
            .is_enabled(&user_id, NotificationChannel::Email)
            .await
            .unwrap());

        ctx.repos
            .notification_preferences
            .save(&NotificationPreference {
                user_id,
                channel: NotificationChannel::Email,
                enabled: false,
            })
            .await
            .unwrap();
        assert!(!ctx
            .repos
            .notification_preferences
            .is_enabled(&user_id, NotificationChannel::Email)
            .await
            .unwrap());
        assert!(ctx
            .repos
            .notification_preferences
            .is_enabled(&user_id, NotificationChannel::Push)
            .await
            .unwrap());

        ctx.repos
            .notification_preferences
            .save(&NotificationPreference {
                user_id,
                channel: NotificationChannel::Email,
                enabled: true,
            })
            .await
            .unwrap();
        assert!(ctx
            .repos
            .notification_preferences
            .is_enabled(&user_id, NotificationChannel::Email)
            .await
            .unwrap());
    }
}
