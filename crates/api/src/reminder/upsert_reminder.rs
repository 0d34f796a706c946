use super::target_resolver::{resolve_target, ResolveTargetError};
use crate::{
    error::SchedulerError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reminder_scheduler_api_structs::upsert_reminder::*;
use reminder_scheduler_domain::{
    apply_offset, EntityKind, NotificationChannel, Reminder, ReminderOffset, ReminderStatus, ID,
};
use reminder_scheduler_infra::SchedulerContext;

pub async fn upsert_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpsertReminderUseCase {
        user_id,
        kind: body.kind,
        entity_id: body.entity_id,
        offset: body.offsets.into(),
        channel: body.channel,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(&reminder)))
        .map_err(SchedulerError::from)
}

#[derive(Debug)]
pub struct UpsertReminderUseCase {
    pub user_id: ID,
    pub kind: String,
    pub entity_id: String,
    pub offset: ReminderOffset,
    pub channel: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidKind(String),
    InvalidEntityId,
    InvalidOffsets(ReminderOffset),
    InvalidChannel(String),
    PreferenceDisabled(NotificationChannel),
    NotFound(EntityKind, String),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidKind(kind) => Self::BadClientData(format!(
                "Invalid kind: `{}`. Expected one of event, match, movie or countdown.",
                kind
            )),
            UseCaseError::InvalidEntityId => Self::BadClientData(format!(
                "The entity id must be non-empty and at most {} characters long.",
                UpsertReminderUseCase::MAX_ENTITY_ID_LEN
            )),
            UseCaseError::InvalidOffsets(offset) => Self::BadClientData(format!(
                "Invalid offsets: {} days and {} hours. Days must be within 0-{} and hours within 0-{}.",
                offset.days,
                offset.hours,
                ReminderOffset::MAX_DAYS,
                ReminderOffset::MAX_HOURS
            )),
            UseCaseError::InvalidChannel(channel) => Self::BadClientData(format!(
                "Invalid channel: `{}`. Expected email or push.",
                channel
            )),
            UseCaseError::PreferenceDisabled(channel) => Self::PreferenceDisabled(format!(
                "The user has disabled {} notifications.",
                channel
            )),
            UseCaseError::NotFound(kind, entity_id) => Self::NotFound(format!(
                "The {} with id: {}, was not found or has no date to remind about.",
                kind, entity_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl UpsertReminderUseCase {
    pub const MAX_ENTITY_ID_LEN: usize = 255;
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpsertReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpsertReminder";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let kind = self
            .kind
            .parse::<EntityKind>()
            .map_err(|_| UseCaseError::InvalidKind(self.kind.clone()))?;

        let entity_id = self.entity_id.trim();
        if entity_id.is_empty() || entity_id.chars().count() > Self::MAX_ENTITY_ID_LEN {
            return Err(UseCaseError::InvalidEntityId);
        }

        if !self.offset.is_valid() {
            return Err(UseCaseError::InvalidOffsets(self.offset));
        }

        let channel = match &self.channel {
            Some(channel) => channel
                .parse::<NotificationChannel>()
                .map_err(|_| UseCaseError::InvalidChannel(channel.clone()))?,
            None => NotificationChannel::default(),
        };

        let enabled = ctx
            .repos
            .notification_preferences
            .is_enabled(&self.user_id, channel)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !enabled {
            return Err(UseCaseError::PreferenceDisabled(channel));
        }

        let target = resolve_target(kind, entity_id, ctx)
            .await
            .map_err(|e| match e {
                ResolveTargetError::NotFound => {
                    UseCaseError::NotFound(kind, entity_id.to_string())
                }
                ResolveTargetError::StorageError => UseCaseError::StorageError,
            })?;

        let raw_fire_at = apply_offset(target, &self.offset);
        let next_fire_at = ctx.config.quiet_hours.adjust(raw_fire_at);

        let now = ctx.sys.now();
        let reminder = Reminder {
            id: Default::default(),
            user_id: self.user_id,
            entity_type: kind,
            entity_id: entity_id.to_string(),
            offset: self.offset,
            channel,
            status: ReminderStatus::Active,
            next_fire_at,
            created: now,
            updated: now,
        };

        ctx.repos
            .reminders
            .upsert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
