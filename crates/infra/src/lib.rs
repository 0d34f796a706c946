mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::*;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::warn;

#[derive(Clone)]
pub struct SchedulerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl SchedulerContext {
    async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(connection_string).await?;
        Ok(Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment.
/// Without a `DATABASE_URL` everything is kept in memory.
pub async fn setup_context() -> anyhow::Result<SchedulerContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => SchedulerContext::create_postgres(&connection_string).await,
        Err(_) => {
            warn!(
                "{} env var is not set, reminders will only be stored in memory.",
                PSQL_CONNECTION_STRING
            );
            Ok(SchedulerContext::create_inmemory())
        }
    }
}
