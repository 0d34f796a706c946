use chrono::{DateTime, Duration, Utc};
use reminder_scheduler_domain::QuietHoursPolicy;
use reminder_scheduler_infra::{ISys, SchedulerContext};
use std::sync::{Arc, Mutex};

/// Clock that only moves when told to
pub struct MockSys {
    now: Mutex<DateTime<Utc>>,
}

impl MockSys {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + duration;
    }
}

impl ISys for MockSys {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// In memory context with an Athens 07-22 window and a 48 hour horizon
pub fn setup_context(now: DateTime<Utc>) -> (SchedulerContext, Arc<MockSys>) {
    let sys = Arc::new(MockSys::new(now));
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.sys = sys.clone();
    ctx.config.quiet_hours = QuietHoursPolicy::with_default_window(chrono_tz::Europe::Athens);
    ctx.config.sweep_horizon = Duration::hours(48);
    ctx.config.sweep_interval_secs = 0;
    (ctx, sys)
}
