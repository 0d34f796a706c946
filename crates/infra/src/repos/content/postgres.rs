use super::IContentRepo;
use chrono::{DateTime, Utc};
use reminder_scheduler_domain::{ContentTarget, EntityKind};
use sqlx::{FromRow, PgPool};

/// Reads the content read models. The tables are fed by the ingestion
/// pipelines of the content stores.
pub struct PostgresContentRepo {
    pool: PgPool,
}

impl PostgresContentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SingleDateRaw {
    target_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct MovieRaw {
    cinema_release_at: Option<DateTime<Utc>>,
    platform_a_release_at: Option<DateTime<Utc>>,
    platform_b_release_at: Option<DateTime<Utc>>,
}

impl PostgresContentRepo {
    async fn find_single_date(
        &self,
        query: &str,
        entity_id: &str,
    ) -> anyhow::Result<Option<DateTime<Utc>>> {
        let row: Option<SingleDateRaw> = sqlx::query_as(query)
            .bind(entity_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.target_at))
    }
}

#[async_trait::async_trait]
impl IContentRepo for PostgresContentRepo {
    async fn find(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> anyhow::Result<Option<ContentTarget>> {
        let target = match kind {
            EntityKind::Event => self
                .find_single_date(
                    "SELECT start_at AS target_at FROM content_events WHERE event_id = $1",
                    entity_id,
                )
                .await?
                .map(|start| ContentTarget::Event { start }),
            EntityKind::Match => self
                .find_single_date(
                    "SELECT kickoff_at AS target_at FROM content_matches WHERE match_id = $1",
                    entity_id,
                )
                .await?
                .map(|kickoff| ContentTarget::Match { kickoff }),
            EntityKind::Countdown => self
                .find_single_date(
                    "SELECT target_at FROM content_countdowns WHERE countdown_id = $1",
                    entity_id,
                )
                .await?
                .map(|target| ContentTarget::Countdown { target }),
            EntityKind::Movie => {
                let row: Option<MovieRaw> = sqlx::query_as(
                    r#"
                    SELECT cinema_release_at, platform_a_release_at, platform_b_release_at
                    FROM content_movies
                    WHERE movie_id = $1
                    "#,
                )
                .bind(entity_id)
                .fetch_optional(&self.pool)
                .await?;
                row.map(|m| ContentTarget::Movie {
                    cinema_release: m.cinema_release_at,
                    platform_a_release: m.platform_a_release_at,
                    platform_b_release: m.platform_b_release_at,
                })
            }
        };

        Ok(target)
    }

    async fn save(&self, entity_id: &str, target: &ContentTarget) -> anyhow::Result<()> {
        let query = match target {
            ContentTarget::Event { start } => sqlx::query(
                r#"
                INSERT INTO content_events (event_id, start_at) VALUES($1, $2)
                ON CONFLICT (event_id) DO UPDATE SET start_at = EXCLUDED.start_at
                "#,
            )
            .bind(entity_id)
            .bind(*start),
            ContentTarget::Match { kickoff } => sqlx::query(
                r#"
                INSERT INTO content_matches (match_id, kickoff_at) VALUES($1, $2)
                ON CONFLICT (match_id) DO UPDATE SET kickoff_at = EXCLUDED.kickoff_at
                "#,
            )
            .bind(entity_id)
            .bind(*kickoff),
            ContentTarget::Countdown { target } => sqlx::query(
                r#"
                INSERT INTO content_countdowns (countdown_id, target_at) VALUES($1, $2)
                ON CONFLICT (countdown_id) DO UPDATE SET target_at = EXCLUDED.target_at
                "#,
            )
            .bind(entity_id)
            .bind(*target),
            ContentTarget::Movie {
                cinema_release,
                platform_a_release,
                platform_b_release,
            } => sqlx::query(
                r#"
                INSERT INTO content_movies
                    (movie_id, cinema_release_at, platform_a_release_at, platform_b_release_at)
                VALUES($1, $2, $3, $4)
                ON CONFLICT (movie_id) DO UPDATE SET
                    cinema_release_at = EXCLUDED.cinema_release_at,
                    platform_a_release_at = EXCLUDED.platform_a_release_at,
                    platform_b_release_at = EXCLUDED.platform_b_release_at
                "#,
            )
            .bind(entity_id)
            .bind(*cinema_release)
            .bind(*platform_a_release)
            .bind(*platform_b_release),
        };
        query.execute(&self.pool).await?;
        Ok(())
    }
}
