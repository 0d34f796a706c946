use chrono::{DateTime, Utc};
use reminder_scheduler_domain::EntityKind;
use reminder_scheduler_infra::SchedulerContext;
use tracing::error;

#[derive(Debug, PartialEq)]
pub enum ResolveTargetError {
    /// No row, a row of another kind, or a row without a usable datetime
    NotFound,
    StorageError,
}

/// Finds the datetime a reminder on the given content counts back from
pub async fn resolve_target(
    kind: EntityKind,
    entity_id: &str,
    ctx: &SchedulerContext,
) -> Result<DateTime<Utc>, ResolveTargetError> {
    let content = ctx
        .repos
        .content
        .find(kind, entity_id)
        .await
        .map_err(|e| {
            error!("Unable to read {} {} from the content store: {:?}", kind, entity_id, e);
            ResolveTargetError::StorageError
        })?;

    content
        .filter(|content| content.kind() == kind)
        .and_then(|content| content.target_datetime())
        .ok_or(ResolveTargetError::NotFound)
}
