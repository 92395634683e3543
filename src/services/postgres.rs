use crate::models::{Match, NewMatch, Participant, Response};
use crate::services::store::{materialize, MatchStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;

/// Advisory lock key serializing match replacement across connections
const REPLACE_MATCHES_LOCK: i64 = 0x4d41_5443_484d_5458;

/// PostgreSQL-backed store
///
/// Owns the connection pool and runs the bundled migrations on connect.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn match_from_row(row: &PgRow) -> Result<Match, StoreError> {
    let score: i32 = row.get("score");
    let score = u8::try_from(score).map_err(|_| StoreError::InvalidInput(format!("Stored score {} out of range", score)))?;

    Ok(Match {
        id: row.get("id"),
        p1_id: row.get("p1_id"),
        p2_id: row.get("p2_id"),
        score,
        title: row.get("title"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl MatchStore for PostgresClient {
    async fn add_participant(&self, participant: &Participant, responses: &[Response]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO participants (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(participant.id)
            .bind(&participant.name)
            .bind(participant.created_at)
            .execute(&mut *tx)
            .await?;

        if !responses.is_empty() {
            let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO responses (participant_id, question_id, trait, value) ");
            builder.push_values(responses, |mut row, response| {
                row.push_bind(response.participant_id)
                    .push_bind(response.question_id as i32)
                    .push_bind(response.trait_name.clone())
                    .push_bind(response.value.clone());
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!("Stored participant {} with {} responses", participant.id, responses.len());

        Ok(())
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let query = r#"
            SELECT id, name, created_at
            FROM participants
            ORDER BY created_at DESC, id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| Participant {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn list_responses(&self) -> Result<Vec<Response>, StoreError> {
        let query = r#"
            SELECT participant_id, question_id, trait, value
            FROM responses
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| Response {
                participant_id: row.get("participant_id"),
                question_id: row.get::<i32, _>("question_id") as u32,
                trait_name: row.get("trait"),
                value: row.get("value"),
            })
            .collect())
    }

    async fn list_matches(&self) -> Result<Vec<Match>, StoreError> {
        let query = r#"
            SELECT id, p1_id, p2_id, score, title, created_at
            FROM matches
            ORDER BY score DESC, p1_id, p2_id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter().map(match_from_row).collect()
    }

    /// Delete and insert inside one transaction holding an advisory lock
    ///
    /// Dropping the transaction on any error rolls it back, so the previous
    /// match set survives a failed insert.
    async fn replace_matches(&self, matches: &[NewMatch]) -> Result<Vec<Match>, StoreError> {
        let stored = materialize(matches)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REPLACE_MATCHES_LOCK)
            .execute(&mut *tx)
            .await?;

        let removed = sqlx::query("DELETE FROM matches").execute(&mut *tx).await?;

        if !stored.is_empty() {
            let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO matches (id, p1_id, p2_id, score, title, created_at) ");
            builder.push_values(&stored, |mut row, m| {
                row.push_bind(m.id)
                    .push_bind(m.p1_id)
                    .push_bind(m.p2_id)
                    .push_bind(i32::from(m.score))
                    .push_bind(m.title.clone())
                    .push_bind(m.created_at);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Replaced {} matches with {}",
            removed.rows_affected(),
            stored.len()
        );

        Ok(stored)
    }

    async fn clear_matches(&self) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REPLACE_MATCHES_LOCK)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM matches").execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!("Cleared {} matches", result.rows_affected());

        Ok(result.rows_affected())
    }

    async fn reset(&self) -> Result<u64, StoreError> {
        // Responses and matches go with their participants via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM participants").execute(&self.pool).await?;

        tracing::info!("Reset store ({} participants removed)", result.rows_affected());

        Ok(result.rows_affected())
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
