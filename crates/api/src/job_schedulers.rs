use crate::{reminder::SweepRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use reminder_scheduler_infra::SchedulerContext;
use std::time::Duration;
use tracing::info;

/// Seconds until `secs_into_minute` seconds past the next full minute
pub fn get_start_delay(now_ts_secs: i64, secs_into_minute: i64) -> u64 {
    let secs_to_next_minute = 60 - now_ts_secs.rem_euclid(60);
    (secs_to_next_minute + secs_into_minute) as u64
}

/// Runs a reminder sweep every `sweep_interval_secs`, starting on a minute
/// boundary. Does nothing when the interval is zero.
pub fn start_reminder_sweep_job(ctx: SchedulerContext) {
    let period = ctx.config.sweep_interval_secs;
    if period == 0 {
        info!("Reminder sweep job is disabled");
        return;
    }

    actix_web::rt::spawn(async move {
        let secs_to_first_run = get_start_delay(ctx.sys.now().timestamp(), 0);
        let start = Instant::now() + Duration::from_secs(secs_to_first_run);
        info!(
            "Reminder sweep job starts in {} seconds and runs every {} seconds",
            secs_to_first_run, period
        );

        let mut sweep_interval = interval_at(start, Duration::from_secs(period));
        loop {
            sweep_interval.tick().await;

            // Failures are logged by `execute` and the next tick tries again
            let _ = execute(SweepRemindersUseCase {}, &ctx).await;
        }
    });
}
