use crate::{APIResponse, BaseClient, ID};
use reminder_scheduler_api_structs::{dtos::ReminderOffsetDTO, *};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct UpsertReminderInput {
    /// One of event, match, movie or countdown
    pub kind: String,
    pub entity_id: String,
    pub offset_days: i32,
    pub offset_hours: i32,
    /// Email when not given
    pub channel: Option<String>,
}

pub struct UpdateReminderStatusInput {
    pub reminder_id: ID,
    pub status: String,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn upsert(
        &self,
        input: UpsertReminderInput,
    ) -> APIResponse<upsert_reminder::APIResponse> {
        let body = upsert_reminder::RequestBody {
            kind: input.kind,
            entity_id: input.entity_id,
            offsets: ReminderOffsetDTO {
                days: input.offset_days,
                hours: input.offset_hours,
            },
            channel: input.channel,
        };
        self.base
            .post(body, "reminders".into(), StatusCode::OK)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    pub async fn update_status(
        &self,
        input: UpdateReminderStatusInput,
    ) -> APIResponse<update_reminder_status::APIResponse> {
        let body = update_reminder_status::RequestBody {
            status: input.status,
        };
        self.base
            .put(
                body,
                format!("reminders/{}/status", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    /// Requires the sdk to be created with the sweep secret
    pub async fn sweep(&self) -> APIResponse<sweep_reminders::APIResponse> {
        self.base
            .post_empty("reminders/sweep".into(), StatusCode::OK)
            .await
    }
}
