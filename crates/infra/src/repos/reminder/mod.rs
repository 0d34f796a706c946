mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use reminder_scheduler_domain::{Reminder, ReminderStatus, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Inserts the `Reminder` or, if one already exists with the same
    /// natural key, overwrites its channel, status, fire time and updated
    /// timestamp. Returns the stored row, which keeps the id of the
    /// existing row on conflict.
    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Active `Reminder`s firing at or before `horizon`
    async fn find_due(&self, horizon: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>>;
    /// Moves the `Reminder` from `current` to `next` in one atomic step.
    /// Returns false when the `Reminder` does not exist or no longer has
    /// the `current` status.
    async fn set_status(
        &self,
        reminder_id: &ID,
        current: ReminderStatus,
        next: ReminderStatus,
        updated: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::SchedulerContext;
    use chrono::{Duration, TimeZone, Utc};
    use reminder_scheduler_domain::{
        EntityKind, NotificationChannel, Reminder, ReminderOffset, ReminderStatus, ID,
    };

    fn reminder_factory(user_id: ID, entity_id: &str, offset: ReminderOffset) -> Reminder {
        let now = Utc.with_ymd_and_hms(2025, 8, 18, 12, 0, 0).unwrap();
        Reminder {
            id: Default::default(),
            user_id,
            entity_type: EntityKind::Event,
            entity_id: entity_id.into(),
            offset,
            channel: NotificationChannel::Email,
            status: ReminderStatus::Active,
            next_fire_at: now + Duration::hours(30),
            created: now,
            updated: now,
        }
    }

    #[tokio::test]
    async fn upsert_keeps_one_row_per_natural_key() {
        let ctx = SchedulerContext::create_inmemory();
        let user_id = ID::default();

        let first = reminder_factory(user_id, "e1", ReminderOffset::new(1, 0));
        let stored = ctx.repos.reminders.upsert(&first).await.unwrap();
        assert_eq!(stored.id, first.id);

        let mut second = reminder_factory(user_id, "e1", ReminderOffset::new(1, 0));
        second.next_fire_at = first.next_fire_at + Duration::hours(2);
        second.channel = NotificationChannel::Push;
        let stored = ctx.repos.reminders.upsert(&second).await.unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.next_fire_at, second.next_fire_at);
        assert_eq!(stored.channel, NotificationChannel::Push);
        assert_eq!(stored.created, first.created);

        let reminders = ctx.repos.reminders.find_by_user(&user_id).await.unwrap();
        assert_eq!(reminders.len(), 1);

        // Different offset is a different reminder
        let other = reminder_factory(user_id, "e1", ReminderOffset::new(0, 2));
        let stored = ctx.repos.reminders.upsert(&other).await.unwrap();
        assert_eq!(stored.id, other.id);
        let reminders = ctx.repos.reminders.find_by_user(&user_id).await.unwrap();
        assert_eq!(reminders.len(), 2);
    }

    #[tokio::test]
    async fn upsert_reactivates_cancelled_reminder() {
        let ctx = SchedulerContext::create_inmemory();
        let reminder = reminder_factory(ID::default(), "e1", ReminderOffset::new(1, 0));
        ctx.repos.reminders.upsert(&reminder).await.unwrap();
        ctx.repos
            .reminders
            .set_status(
                &reminder.id,
                ReminderStatus::Active,
                ReminderStatus::Cancelled,
                reminder.updated,
            )
            .await
            .unwrap();

        let again = reminder_factory(reminder.user_id, "e1", ReminderOffset::new(1, 0));
        let stored = ctx.repos.reminders.upsert(&again).await.unwrap();
        assert_eq!(stored.id, reminder.id);
        assert_eq!(stored.status, ReminderStatus::Active);
    }

    #[tokio::test]
    async fn finds_only_active_due_reminders() {
        let ctx = SchedulerContext::create_inmemory();
        let user_id = ID::default();
        let due = reminder_factory(user_id, "due", ReminderOffset::default());
        let mut later = reminder_factory(user_id, "later", ReminderOffset::default());
        later.next_fire_at = due.next_fire_at + Duration::hours(24);
        let paused = reminder_factory(user_id, "paused", ReminderOffset::default());

        for r in [&due, &later, &paused] {
            ctx.repos.reminders.upsert(r).await.unwrap();
        }
        ctx.repos
            .reminders
            .set_status(
                &paused.id,
                ReminderStatus::Active,
                ReminderStatus::Paused,
                paused.updated,
            )
            .await
            .unwrap();

        let found = ctx.repos.reminders.find_due(due.next_fire_at).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, due.id);

        let found = ctx
            .repos
            .reminders
            .find_due(later.next_fire_at)
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn set_status_requires_expected_current_status() {
        let ctx = SchedulerContext::create_inmemory();
        let reminder = reminder_factory(ID::default(), "e1", ReminderOffset::new(1, 0));
        ctx.repos.reminders.upsert(&reminder).await.unwrap();
        let later = reminder.updated + Duration::minutes(1);

        assert!(ctx
            .repos
            .reminders
            .set_status(&reminder.id, ReminderStatus::Active, ReminderStatus::Cancelled, later)
            .await
            .unwrap());
        // A second writer that still believes the reminder is active loses
        assert!(!ctx
            .repos
            .reminders
            .set_status(&reminder.id, ReminderStatus::Active, ReminderStatus::Paused, later)
            .await
            .unwrap());
        assert!(!ctx
            .repos
            .reminders
            .set_status(&ID::default(), ReminderStatus::Active, ReminderStatus::Paused, later)
            .await
            .unwrap());

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Cancelled);
        assert_eq!(stored.updated, later);
    }

    // Run with `DATABASE_URL=... cargo test -- --ignored`
    #[tokio::test]
    #[ignore = "requires a postgres DATABASE_URL"]
    async fn postgres_upsert_and_status_changes() {
        let connection_string =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must point to a postgres database");
        let repos = crate::Repos::create_postgres(&connection_string)
            .await
            .unwrap();
        let user_id = ID::default();

        let first = reminder_factory(user_id, "e1", ReminderOffset::new(1, 0));
        let stored = repos.reminders.upsert(&first).await.unwrap();
        assert_eq!(stored.id, first.id);

        let mut second = reminder_factory(user_id, "e1", ReminderOffset::new(1, 0));
        second.next_fire_at = first.next_fire_at + Duration::hours(2);
        let stored = repos.reminders.upsert(&second).await.unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.next_fire_at, second.next_fire_at);
        assert_eq!(repos.reminders.find_by_user(&user_id).await.unwrap().len(), 1);

        let (cancel, pause) = tokio::join!(
            repos.reminders.set_status(
                &first.id,
                ReminderStatus::Active,
                ReminderStatus::Cancelled,
                first.updated
            ),
            repos.reminders.set_status(
                &first.id,
                ReminderStatus::Active,
                ReminderStatus::Paused,
                first.updated
            )
        );
        assert!(cancel.unwrap() ^ pause.unwrap());
        let stored = repos.reminders.find(&first.id).await.unwrap().unwrap();
        assert_ne!(stored.status, ReminderStatus::Active);
    }
}
