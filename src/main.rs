mod telemetry;

use reminder_scheduler_api::Application;
use reminder_scheduler_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("reminder_scheduler_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = match setup_context().await {
        Ok(context) => context,
        Err(e) => {
            error!("Unable to set up the infrastructure: {:?}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let app = Application::new(context).await?;
    app.start().await
}
