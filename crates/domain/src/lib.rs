mod content;
mod notification;
mod reminder;
mod reminder_job;
mod scheduling;
mod shared;
mod sweep_log;

pub use content::ContentTarget;
pub use notification::{NotificationChannel, NotificationPreference};
pub use reminder::{
    EntityKind, InvalidEntityKindError, Reminder, ReminderKey, ReminderOffset, ReminderStatus,
};
pub use reminder_job::{minute_bucket, ReminderJobStatus, ReminderQueueJob};
pub use scheduling::{apply_offset, InvalidQuietHoursError, QuietHoursPolicy};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use sweep_log::{SweepLog, SweepLogStatus};

pub use chrono_tz::Tz;
