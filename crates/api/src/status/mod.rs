use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::get_service_health::*;
use reminder_scheduler_infra::SchedulerContext;

async fn status(ctx: web::Data<SchedulerContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        timezone: ctx.config.quiet_hours.timezone().name().into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
