mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use reminder::ReminderClient;
pub use reminder::{UpdateReminderStatusInput, UpsertReminderInput};
pub use reminder_scheduler_api_structs::dtos::*;
pub use reminder_scheduler_domain::{EntityKind, NotificationChannel, ReminderStatus, ID};
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use reminder_scheduler_api_structs::dtos::ReminderDTO as Reminder;

/// Reminder Scheduler Server SDK
///
/// The SDK contains methods for interacting with the Reminder Scheduler
/// server API.
#[derive(Clone)]
pub struct ReminderSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl ReminderSDK {
    /// Acts on behalf of the user the token was issued to
    pub fn new<T: Into<String>>(address: String, user_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_user_token(user_token.into());
        Self::from_base(base)
    }

    /// Used by the cron trigger that starts reminder sweeps
    pub fn new_with_sweep_secret<T: Into<String>>(address: String, sweep_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_sweep_secret(sweep_secret.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
