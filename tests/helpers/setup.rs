use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reminder_scheduler_api::{Application, Claims};
use reminder_scheduler_domain::{QuietHoursPolicy, ID};
use reminder_scheduler_infra::{ISys, SchedulerContext};
use reminder_scheduler_sdk::ReminderSDK;
use std::sync::Arc;

const JWT_SECRET: &str = "integration-test-jwt-secret";
const SWEEP_SECRET: &str = "integration-test-sweep-secret";

/// 15:00 in Athens
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 18, 12, 0, 0).unwrap()
}

struct StaticSys {}

impl ISys for StaticSys {
    fn now(&self) -> DateTime<Utc> {
        test_now()
    }
}

pub struct TestApp {
    /// Shares its repos with the running server, used to seed content
    pub ctx: SchedulerContext,
    pub address: String,
}

impl TestApp {
    pub fn user_token(&self, user_id: ID) -> String {
        let claims = Claims {
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
            user_id,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .unwrap()
    }

    pub fn user_sdk(&self, user_id: ID) -> ReminderSDK {
        ReminderSDK::new(self.address.clone(), self.user_token(user_id))
    }

    pub fn sweep_sdk(&self) -> ReminderSDK {
        ReminderSDK::new_with_sweep_secret(self.address.clone(), SWEEP_SECRET)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.sys = Arc::new(StaticSys {});
    ctx.config.port = 0; // Random port
    ctx.config.jwt_secret = JWT_SECRET.into();
    ctx.config.sweep_secret_code = SWEEP_SECRET.into();
    ctx.config.quiet_hours = QuietHoursPolicy::with_default_window(chrono_tz::Europe::Athens);
    ctx.config.sweep_horizon = Duration::hours(48);
    ctx.config.sweep_interval_secs = 0;

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp { ctx, address }
}
