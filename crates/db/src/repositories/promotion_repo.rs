//! Repository for the `promotions` table.
//!
//! Writes run inside a transaction. When a statement or the commit fails the
//! transaction is rolled back, the failure is logged, and the original
//! `sqlx::Error` is returned inside [`RepoError::Storage`].

use promotions_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::RepoError;
use crate::models::promotion::{Promotion, PromotionFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "promo_id, cust_promo_code, \"type\", value, quantity, \
                       start_date, end_date, active, product_id, dev_created_at";

/// Provides CRUD operations for promotions.
pub struct PromotionRepo;

impl PromotionRepo {
    /// Insert a new promotion, returning the stored row with its generated id.
    ///
    /// Any `promo_id` already on `promotion` is ignored.
    pub async fn create(pool: &PgPool, promotion: &Promotion) -> Result<Promotion, RepoError> {
        tracing::info!(cust_promo_code = %promotion.cust_promo_code, "Creating promotion");

        let query = format!(
            "INSERT INTO promotions
                (cust_promo_code, \"type\", value, quantity, start_date, end_date,
                 active, product_id, dev_created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let result = sqlx::query_as::<_, Promotion>(&query)
            .bind(&promotion.cust_promo_code)
            .bind(promotion.promo_type.as_str())
            .bind(promotion.value)
            .bind(promotion.quantity)
            .bind(promotion.start_date)
            .bind(promotion.end_date)
            .bind(promotion.active)
            .bind(promotion.product_id)
            .bind(promotion.dev_created_at)
            .fetch_one(&mut *tx)
            .await;

        finish(tx, result, "create").await
    }

    /// Overwrite every writable column of an existing promotion.
    ///
    /// Fails with [`RepoError::Validation`] without touching the database if
    /// `promotion.promo_id` is `None`. Returns `None` if no row has that id.
    pub async fn update(
        pool: &PgPool,
        promotion: &Promotion,
    ) -> Result<Option<Promotion>, RepoError> {
        let Some(promo_id) = promotion.promo_id else {
            return Err(RepoError::Validation(
                "Update called with empty promo_id field".to_string(),
            ));
        };
        tracing::info!(promo_id, "Saving promotion");

        let query = format!(
            "UPDATE promotions SET
                cust_promo_code = $2,
                \"type\" = $3,
                value = $4,
                quantity = $5,
                start_date = $6,
                end_date = $7,
                active = $8,
                product_id = $9,
                dev_created_at = $10
             WHERE promo_id = $1
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let result = sqlx::query_as::<_, Promotion>(&query)
            .bind(promo_id)
            .bind(&promotion.cust_promo_code)
            .bind(promotion.promo_type.as_str())
            .bind(promotion.value)
            .bind(promotion.quantity)
            .bind(promotion.start_date)
            .bind(promotion.end_date)
            .bind(promotion.active)
            .bind(promotion.product_id)
            .bind(promotion.dev_created_at)
            .fetch_optional(&mut *tx)
            .await;

        finish(tx, result, "update").await
    }

    /// Delete a promotion by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, promo_id: DbId) -> Result<bool, RepoError> {
        tracing::info!(promo_id, "Deleting promotion");

        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM promotions WHERE promo_id = $1")
            .bind(promo_id)
            .execute(&mut *tx)
            .await
            .map(|done| done.rows_affected() > 0);

        finish(tx, result, "delete").await
    }

    /// Find a promotion by its ID.
    pub async fn find_by_id(pool: &PgPool, promo_id: DbId) -> Result<Option<Promotion>, RepoError> {
        tracing::debug!(promo_id, "Processing lookup for promotion");

        let query = format!("SELECT {COLUMNS} FROM promotions WHERE promo_id = $1");
        let promotion = sqlx::query_as::<_, Promotion>(&query)
            .bind(promo_id)
            .fetch_optional(pool)
            .await?;
        Ok(promotion)
    }

    /// List all promotions ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Promotion>, RepoError> {
        tracing::debug!("Processing all promotions");

        let query = format!("SELECT {COLUMNS} FROM promotions ORDER BY promo_id");
        let promotions = sqlx::query_as::<_, Promotion>(&query)
            .fetch_all(pool)
            .await?;
        Ok(promotions)
    }

    /// List promotions matching every set field of `filter`, ordered by ID.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &PromotionFilter,
    ) -> Result<Vec<Promotion>, RepoError> {
        tracing::debug!(?filter, "Processing filtered promotion query");

        let query = format!(
            "SELECT {COLUMNS} FROM promotions
             WHERE ($1::TEXT IS NULL OR cust_promo_code = $1)
               AND ($2::TEXT IS NULL OR \"type\" = $2)
               AND ($3::BOOL IS NULL OR active = $3)
               AND ($4::INTEGER IS NULL OR product_id = $4)
             ORDER BY promo_id"
        );
        let promotions = sqlx::query_as::<_, Promotion>(&query)
            .bind(filter.cust_promo_code.as_deref())
            .bind(filter.promo_type.map(|t| t.as_str()))
            .bind(filter.active)
            .bind(filter.product_id)
            .fetch_all(pool)
            .await?;
        Ok(promotions)
    }
}

/// Commit `tx` if `result` succeeded, otherwise roll it back.
async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    result: Result<T, sqlx::Error>,
    action: &'static str,
) -> Result<T, RepoError> {
    match result {
        Ok(value) => {
            tx.commit().await.inspect_err(|err| {
                tracing::error!(error = %err, action, "Error committing promotion record");
            })?;
            Ok(value)
        }
        Err(err) => {
            tracing::error!(error = %err, action, "Error writing promotion record, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, action, "Rollback failed");
            }
            Err(RepoError::Storage(err))
        }
    }
}
