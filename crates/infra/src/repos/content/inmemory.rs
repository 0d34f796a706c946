use super::IContentRepo;
use reminder_scheduler_domain::{ContentTarget, EntityKind};
use std::{collections::HashMap, sync::Mutex};

pub struct InMemoryContentRepo {
    content: Mutex<HashMap<(EntityKind, String), ContentTarget>>,
}

impl InMemoryContentRepo {
    pub fn new() -> Self {
        Self {
            content: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IContentRepo for InMemoryContentRepo {
    async fn find(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> anyhow::Result<Option<ContentTarget>> {
        let content = self
            .content
            .lock()
            .map_err(|_| anyhow::Error::msg("In memory content lock was poisoned"))?;
        Ok(content.get(&(kind, entity_id.to_string())).cloned())
    }

    async fn save(&self, entity_id: &str, target: &ContentTarget) -> anyhow::Result<()> {
        let mut content = self
            .content
            .lock()
            .map_err(|_| anyhow::Error::msg("In memory content lock was poisoned"))?;
        content.insert((target.kind(), entity_id.to_string()), target.clone());
        Ok(())
    }
}
