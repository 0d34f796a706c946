use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepLogStatus {
    Ok,
    Error,
}

impl SweepLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Audit record written once per reminder sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepLog {
    pub id: ID,
    pub status: SweepLogStatus,
    pub message: String,
    pub enqueued: i64,
    pub skipped: i64,
    pub created: DateTime<Utc>,
}

impl SweepLog {
    pub fn ok(enqueued: i64, skipped: i64, created: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            status: SweepLogStatus::Ok,
            message: format!("enqueued {} reminder jobs, skipped {}", enqueued, skipped),
            enqueued,
            skipped,
            created,
        }
    }

    pub fn error(message: String, created: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            status: SweepLogStatus::Error,
            message,
            enqueued: 0,
            skipped: 0,
            created,
        }
    }
}

impl Entity for SweepLog {
    fn id(&self) -> &ID {
        &self.id
    }
}
