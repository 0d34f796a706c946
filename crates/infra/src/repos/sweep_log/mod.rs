mod inmemory;
mod postgres;

pub use inmemory::InMemorySweepLogRepo;
pub use postgres::PostgresSweepLogRepo;
use reminder_scheduler_domain::SweepLog;

/// Audit log of reminder sweeps
#[async_trait::async_trait]
pub trait ISweepLogRepo: Send + Sync {
    async fn insert(&self, log: &SweepLog) -> anyhow::Result<()>;
    /// Newest first
    async fn find_latest(&self, limit: usize) -> anyhow::Result<Vec<SweepLog>>;
}
