use crate::{
    error::SchedulerError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reminder_scheduler_api_structs::get_reminder::*;
use reminder_scheduler_domain::{Reminder, ID};
use reminder_scheduler_infra::SchedulerContext;

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetReminderUseCase {
        user_id,
        reminder_id: path_params.reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(SchedulerError::from)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) if reminder.user_id == self.user_id => Ok(reminder),
            Ok(_) => Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
