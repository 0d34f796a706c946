mod inmemory;
mod postgres;

pub use inmemory::InMemoryContentRepo;
pub use postgres::PostgresContentRepo;
use reminder_scheduler_domain::{ContentTarget, EntityKind};

/// Read access to the content stores that own events, matches, movies
/// and countdowns.
#[async_trait::async_trait]
pub trait IContentRepo: Send + Sync {
    async fn find(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> anyhow::Result<Option<ContentTarget>>;
    /// Stores the datetimes of a content row, keyed by its kind and id
    async fn save(&self, entity_id: &str, target: &ContentTarget) -> anyhow::Result<()>;
}
