//! PostgreSQL implementation of the likes repository.
//!
//! Provides the production backend for the `LikesRepository` trait with
//! connection pooling and transaction safety.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - The toggle/change/remove state machine runs inside a single transaction,
//!   so the ledger and the tally table never diverge mid-mutation
//! - Tally adjustments are single UPDATE statements (`count + 1`,
//!   `GREATEST(count - 1, 0)`), atomic at the storage layer
//! - Upsert support with `ON CONFLICT DO UPDATE`
//!
//! ## Database Tables
//!
//! - `likes`: authoritative per-user picks, one row per (user, district, zone)
//! - `like_counts`: denormalized per-candidate tallies, never deleted
use async_trait::async_trait;
use likes_shared::{ledger_key, tally_key, Like, LikeAction, LikeCount, LikeTarget, PartyTotal};
use sqlx::Row;

use crate::{LikesRepository, LikesRepositoryError};

/// PostgreSQL implementation of the likes repository.
pub struct PostgresLikesRepository {
    pool: sqlx::PgPool,
}

impl PostgresLikesRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Upserts a tally row, creating it at 1 or incrementing the existing
    /// count, within an active transaction.
    async fn increment_tally_tx(
        &self,
        target: &LikeTarget,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), LikesRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO like_counts (id, district, zone, candidate_name, party, party_short, count)
            VALUES ($1, $2, $3, $4, $5, $6, 1)
            ON CONFLICT (id) DO UPDATE SET count = like_counts.count + 1
            "#,
        )
        .bind(tally_key(target.district(), target.zone, &target.candidate_name))
        .bind(target.district())
        .bind(target.zone)
        .bind(&target.candidate_name)
        .bind(&target.party)
        .bind(&target.party_short)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Decrements a tally row, floored at zero, within an active transaction.
    ///
    /// Rows are never deleted; a candidate that loses every like keeps a
    /// zero-count row.
    async fn decrement_tally_tx(
        &self,
        district: &str,
        zone: i32,
        candidate_name: &str,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), LikesRepositoryError> {
        sqlx::query("UPDATE like_counts SET count = GREATEST(count - 1, 0) WHERE id = $1")
            .bind(tally_key(district, zone, candidate_name))
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

fn row_to_like_count(row: &sqlx::postgres::PgRow) -> LikeCount {
    LikeCount {
        district: row.get("district"),
        zone: row.get("zone"),
        candidate_name: row.get("candidate_name"),
        party: row.get("party"),
        party_short: row.get("party_short"),
        count: row.get("count"),
    }
}

#[async_trait]
impl LikesRepository for PostgresLikesRepository {
    /// Applies the toggle/change/remove state machine in one transaction.
    ///
    /// The ledger read, the ledger mutation, and the tally adjustments all
    /// commit together; any failure rolls the whole mutation back.
    async fn apply_like(
        &self,
        user_id: &str,
        target: &LikeTarget,
    ) -> Result<LikeAction, LikesRepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row_id = ledger_key(user_id, target.district(), target.zone);
        let existing = sqlx::query("SELECT candidate_name FROM likes WHERE id = $1")
            .bind(&row_id)
            .fetch_optional(&mut *tx)
            .await?;

        let action = match existing {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO likes (id, user_id, district, zone, candidate_name, party, party_short)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(&row_id)
                .bind(user_id)
                .bind(target.district())
                .bind(target.zone)
                .bind(&target.candidate_name)
                .bind(&target.party)
                .bind(&target.party_short)
                .execute(&mut *tx)
                .await?;

                self.increment_tally_tx(target, &mut tx).await?;
                LikeAction::Liked
            }
            Some(row) => {
                let current: String = row.get("candidate_name");
                if current == target.candidate_name {
                    // Toggle off: the user re-liked their current pick.
                    sqlx::query("DELETE FROM likes WHERE id = $1")
                        .bind(&row_id)
                        .execute(&mut *tx)
                        .await?;
                    self.decrement_tally_tx(target.district(), target.zone, &current, &mut tx)
                        .await?;
                    LikeAction::Removed
                } else {
                    // Change vote: decrement the old pick, increment the new
                    // one, swap the ledger row. Touches both tallies even
                    // though only one ledger row changes.
                    self.decrement_tally_tx(target.district(), target.zone, &current, &mut tx)
                        .await?;
                    self.increment_tally_tx(target, &mut tx).await?;

                    sqlx::query(
                        r#"
                        UPDATE likes SET
                            candidate_name = $2,
                            party = $3,
                            party_short = $4,
                            updated_at = NOW()
                        WHERE id = $1
                        "#,
                    )
                    .bind(&row_id)
                    .bind(&target.candidate_name)
                    .bind(&target.party)
                    .bind(&target.party_short)
                    .execute(&mut *tx)
                    .await?;
                    LikeAction::Changed
                }
            }
        };

        tx.commit().await?;
        Ok(action)
    }

    async fn district_counts(
        &self,
        district: &str,
    ) -> Result<Vec<LikeCount>, LikesRepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT district, zone, candidate_name, party, party_short, count
            FROM like_counts
            WHERE district = $1 AND count > 0
            ORDER BY zone, count DESC
            "#,
        )
        .bind(district)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_like_count).collect())
    }

    async fn user_likes(
        &self,
        user_id: &str,
        district: &str,
    ) -> Result<Vec<Like>, LikesRepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, district, zone, candidate_name, party, party_short,
                   created_at, updated_at
            FROM likes
            WHERE user_id = $1 AND district = $2
            "#,
        )
        .bind(user_id)
        .bind(district)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Like {
                user_id: row.get("user_id"),
                district: row.get("district"),
                zone: row.get("zone"),
                candidate_name: row.get("candidate_name"),
                party: row.get("party"),
                party_short: row.get("party_short"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }

    async fn top_candidates(&self, limit: i64) -> Result<Vec<LikeCount>, LikesRepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT district, zone, candidate_name, party, party_short, count
            FROM like_counts
            WHERE count > 0
            ORDER BY count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_like_count).collect())
    }

    async fn district_party_totals(&self) -> Result<Vec<PartyTotal>, LikesRepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT district, party, party_short, SUM(count)::BIGINT AS total_likes
            FROM like_counts
            WHERE count > 0
            GROUP BY district, party, party_short
            ORDER BY district, total_likes DESC, party ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| PartyTotal {
                district: row.get("district"),
                party: row.get("party"),
                party_short: row.get("party_short"),
                total_likes: row.get("total_likes"),
            })
            .collect())
    }

    async fn total_likes(&self) -> Result<i64, LikesRepositoryError> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(count), 0)::BIGINT AS total FROM like_counts WHERE count > 0",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("total"))
    }
}
