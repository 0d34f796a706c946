use super::ISweepLogRepo;
use crate::repos::shared::inmemory_repo::*;
use reminder_scheduler_domain::SweepLog;
use std::sync::Mutex;

pub struct InMemorySweepLogRepo {
    logs: Mutex<Vec<SweepLog>>,
}

impl InMemorySweepLogRepo {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISweepLogRepo for InMemorySweepLogRepo {
    async fn insert(&self, log: &SweepLog) -> anyhow::Result<()> {
        insert(log, &self.logs)
    }

    async fn find_latest(&self, limit: usize) -> anyhow::Result<Vec<SweepLog>> {
        let mut logs = find_by(&self.logs, |_| true)?;
        logs.sort_by(|l1, l2| l2.created.cmp(&l1.created));
        logs.truncate(limit);
        Ok(logs)
    }
}
