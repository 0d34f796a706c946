use crate::{
    error::SchedulerError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use reminder_scheduler_api_structs::get_reminders::*;
use reminder_scheduler_domain::{Reminder, ID};
use reminder_scheduler_infra::SchedulerContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let user_id = protect_route(&http_req, &ctx)?;

    execute(GetRemindersUseCase { user_id }, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|_| SchedulerError::InternalError)
}

/// Reminders of the user, soonest first
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct StorageError;

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = StorageError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let mut reminders = ctx
            .repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| StorageError)?;
        reminders.sort_by_key(|reminder| reminder.next_fire_at);
        Ok(reminders)
    }
}
