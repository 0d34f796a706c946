use crate::{
    error::SchedulerError,
    shared::{
        auth::protect_sweep_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use futures::future;
use reminder_scheduler_api_structs::sweep_reminders::APIResponse;
use reminder_scheduler_domain::{Reminder, ReminderQueueJob, SweepLog};
use reminder_scheduler_infra::SchedulerContext;
use tracing::{error, info, warn};

pub async fn sweep_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    protect_sweep_route(&http_req, &ctx)?;

    execute(SweepRemindersUseCase {}, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                enqueued: summary.enqueued,
                skipped: summary.skipped,
            })
        })
        .map_err(SchedulerError::from)
}

/// Enqueues a pending job for every active reminder firing within the
/// horizon. Safe to run concurrently with itself.
#[derive(Debug)]
pub struct SweepRemindersUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct SweepSummary {
    pub enqueued: i64,
    pub skipped: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// The due reminders could not be queried, nothing was enqueued
    SystemicError(String),
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SystemicError(message) => Self::SweepFailed(message),
        }
    }
}

async fn enqueue_job(
    reminder: &Reminder,
    now: DateTime<Utc>,
    ctx: &SchedulerContext,
) -> anyhow::Result<bool> {
    // The stored fire time was computed at upsert, the window may have changed since
    let fire_at = ctx.config.quiet_hours.adjust(reminder.next_fire_at);
    let job = ReminderQueueJob::pending(reminder, fire_at, now);
    ctx.repos.reminder_jobs.insert_if_absent(&job).await
}

async fn write_sweep_log(log: SweepLog, ctx: &SchedulerContext) {
    if let Err(e) = ctx.repos.sweep_logs.insert(&log).await {
        error!("Unable to write the sweep log: {:?}. Log: {:?}", e, log);
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SweepRemindersUseCase {
    type Response = SweepSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SweepReminders";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let horizon = now + ctx.config.sweep_horizon;

        let reminders = match ctx.repos.reminders.find_due(horizon).await {
            Ok(reminders) => reminders,
            Err(e) => {
                let message = format!("Unable to query reminders due before {}: {}", horizon, e);
                write_sweep_log(SweepLog::error(message.clone(), now), ctx).await;
                return Err(UseCaseError::SystemicError(message));
            }
        };

        let results =
            future::join_all(reminders.iter().map(|reminder| enqueue_job(reminder, now, ctx)))
                .await;

        let mut summary = SweepSummary::default();
        for (reminder, result) in reminders.iter().zip(results) {
            match result {
                Ok(true) => summary.enqueued += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    warn!(
                        "Unable to enqueue a job for reminder {}: {:?}",
                        reminder.id, e
                    );
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "Reminder sweep up to {} enqueued {} jobs and skipped {}",
            horizon, summary.enqueued, summary.skipped
        );
        write_sweep_log(SweepLog::ok(summary.enqueued, summary.skipped, now), ctx).await;

        Ok(summary)
    }
}
