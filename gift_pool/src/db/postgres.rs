//! PostgreSQL storage backend.
//!
//! The guarded increment is a single conditional `UPDATE ... RETURNING`, so
//! the capacity check and the write happen atomically at the storage layer.
//! Claimant uniqueness is additionally backstopped by a UNIQUE constraint on
//! `claims.claimant_name`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::catalog::{GiftId, GiftSeed, GiftType};
use crate::ledger::ClaimRecord;

use super::repository::{
    ClaimRepository, GiftRepository, IncrementOutcome, StoreError, StoreResult,
};

/// Create the gifts and claims tables if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS gifts (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            weight        DOUBLE PRECISION NOT NULL,
            total_stock   BIGINT NOT NULL,
            claimed_count BIGINT NOT NULL DEFAULT 0,
            image_url     TEXT,
            position      BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS claims (
            id             UUID PRIMARY KEY,
            claimant_name  TEXT NOT NULL UNIQUE,
            gift_id        TEXT NOT NULL,
            gift_name      TEXT NOT NULL,
            claimed_at     TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// PostgreSQL implementation of `GiftRepository`
pub struct PgGiftRepository {
    pool: PgPool,
}

impl PgGiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn gift_from_row(row: &sqlx::postgres::PgRow) -> GiftType {
    GiftType {
        id: row.get("id"),
        name: row.get("name"),
        weight: row.get("weight"),
        total_stock: row.get::<i64, _>("total_stock") as u32,
        claimed_count: row.get::<i64, _>("claimed_count") as u32,
        image_url: row.get("image_url"),
    }
}

#[async_trait]
impl GiftRepository for PgGiftRepository {
    async fn fetch_all(&self) -> StoreResult<Vec<GiftType>> {
        let rows = sqlx::query(
            "SELECT id, name, weight, total_stock, claimed_count, image_url
             FROM gifts
             ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(gift_from_row).collect())
    }

    async fn fetch(&self, gift_id: &str) -> StoreResult<Option<GiftType>> {
        let row = sqlx::query(
            "SELECT id, name, weight, total_stock, claimed_count, image_url
             FROM gifts
             WHERE id = $1",
        )
        .bind(gift_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(gift_from_row))
    }

    async fn try_increment_claimed(&self, gift_id: &str) -> StoreResult<IncrementOutcome> {
        // Guard and write in one statement; losing the race is a normal
        // outcome, not an error
        let row = sqlx::query(
            "UPDATE gifts
             SET claimed_count = claimed_count + 1
             WHERE id = $1 AND claimed_count < total_stock
             RETURNING claimed_count",
        )
        .bind(gift_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(IncrementOutcome::Applied {
                claimed_count: row.get::<i64, _>("claimed_count") as u32,
            }),
            None => {
                // Either the gift is at capacity or it does not exist
                let exists = sqlx::query("SELECT 1 FROM gifts WHERE id = $1")
                    .bind(gift_id)
                    .fetch_optional(&self.pool)
                    .await?;

                match exists {
                    Some(_) => Ok(IncrementOutcome::SoldOut),
                    None => Err(StoreError::GiftNotFound(gift_id.to_string())),
                }
            }
        }
    }

    async fn decrement_claimed(&self, gift_id: &str) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE gifts
             SET claimed_count = GREATEST(claimed_count - 1, 0)
             WHERE id = $1",
        )
        .bind(gift_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::GiftNotFound(gift_id.to_string()));
        }
        Ok(())
    }

    async fn replace_all(&self, seed: &[GiftSeed]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM gifts").execute(&mut *tx).await?;

        for (position, gift) in seed.iter().enumerate() {
            sqlx::query(
                "INSERT INTO gifts (id, name, weight, total_stock, claimed_count, image_url, position)
                 VALUES ($1, $2, $3, $4, 0, $5, $6)",
            )
            .bind(&gift.id)
            .bind(&gift.name)
            .bind(gift.weight)
            .bind(i64::from(gift.total_stock))
            .bind(&gift.image_url)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// PostgreSQL implementation of `ClaimRepository`
pub struct PgClaimRepository {
    pool: PgPool,
}

impl PgClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn claim_from_row(row: &sqlx::postgres::PgRow) -> ClaimRecord {
    ClaimRecord {
        id: row.get("id"),
        claimant_name: row.get("claimant_name"),
        gift_id: row.get("gift_id"),
        gift_name: row.get("gift_name"),
        claimed_at: row.get("claimed_at"),
    }
}

#[async_trait]
impl ClaimRepository for PgClaimRepository {
    async fn fetch_all(&self) -> StoreResult<Vec<ClaimRecord>> {
        let rows = sqlx::query(
            "SELECT id, claimant_name, gift_id, gift_name, claimed_at
             FROM claims
             ORDER BY claimed_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(claim_from_row).collect())
    }

    async fn find_by_claimant(&self, claimant_name: &str) -> StoreResult<Option<ClaimRecord>> {
        let row = sqlx::query(
            "SELECT id, claimant_name, gift_id, gift_name, claimed_at
             FROM claims
             WHERE claimant_name = $1",
        )
        .bind(claimant_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(claim_from_row))
    }

    async fn insert(&self, record: &ClaimRecord) -> StoreResult<()> {
        let result = sqlx::query(
            "INSERT INTO claims (id, claimant_name, gift_id, gift_name, claimed_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(&record.claimant_name)
        .bind(&record.gift_id)
        .bind(&record.gift_name)
        .bind(record.claimed_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateClaimant(record.claimant_name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, claim_id: Uuid) -> StoreResult<GiftId> {
        let row = sqlx::query("DELETE FROM claims WHERE id = $1 RETURNING gift_id")
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::ClaimNotFound(claim_id))?;

        Ok(row.get("gift_id"))
    }

    async fn delete_all(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM claims").execute(&self.pool).await?;
        Ok(())
    }
}
