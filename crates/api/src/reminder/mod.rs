mod get_reminder;
mod get_reminders;
mod sweep_reminders;
mod target_resolver;
mod update_reminder_status;
mod upsert_reminder;

use actix_web::web;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
use sweep_reminders::sweep_reminders_controller;
use update_reminder_status::update_reminder_status_controller;
use upsert_reminder::upsert_reminder_controller;

pub use sweep_reminders::SweepRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(upsert_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    // Registered before the `{reminder_id}` routes
    cfg.route("/reminders/sweep", web::post().to(sweep_reminders_controller));
    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/status",
        web::put().to(update_reminder_status_controller),
    );
}
