use crate::{
    error::SchedulerError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reminder_scheduler_api_structs::update_reminder_status::*;
use reminder_scheduler_domain::{Reminder, ReminderStatus, ID};
use reminder_scheduler_infra::SchedulerContext;

pub async fn update_reminder_status_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = UpdateReminderStatusUseCase {
        user_id,
        reminder_id: path_params.reminder_id,
        status: body.0.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(SchedulerError::from)
}

/// Pauses, resumes or cancels a reminder of the user
#[derive(Debug)]
pub struct UpdateReminderStatusUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub status: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidStatus(String),
    NotFound(ID),
    IllegalTransition(ReminderStatus, ReminderStatus),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidStatus(status) => Self::BadClientData(format!(
                "Invalid status: `{}`. Expected active, paused or cancelled.",
                status
            )),
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::IllegalTransition(from, to) => Self::Conflict(format!(
                "A {} reminder can not be set to {}.",
                from.as_str(),
                to.as_str()
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderStatusUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminderStatus";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let status = self
            .status
            .parse::<ReminderStatus>()
            .map_err(|_| UseCaseError::InvalidStatus(self.status.clone()))?;

        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) if reminder.user_id == self.user_id => reminder,
            Ok(_) => return Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        if !reminder.status.can_transition_to(status) {
            return Err(UseCaseError::IllegalTransition(reminder.status, status));
        }

        let now = ctx.sys.now();
        let updated = ctx
            .repos
            .reminders
            .set_status(&reminder.id, reminder.status, status, now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !updated {
            // Another request changed the status after it was read
            return match ctx.repos.reminders.find(&reminder.id).await {
                Ok(Some(current)) => Err(UseCaseError::IllegalTransition(current.status, status)),
                Ok(None) => Err(UseCaseError::NotFound(self.reminder_id)),
                Err(_) => Err(UseCaseError::StorageError),
            };
        }

        reminder.status = status;
        reminder.updated = now;
        Ok(reminder)
    }
}
