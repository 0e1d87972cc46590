//! Repository for the `pricing_plans` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::pricing::{CreatePricingPlan, PlanChanges, PricingPlan};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category, name, price, features, badge, highlight, is_active, \
                       sort_order, created_at, updated_at";

#[async_trait]
pub trait PricingRepo: Send + Sync {
    async fn create(&self, input: &CreatePricingPlan) -> Result<PricingPlan, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<PricingPlan>, sqlx::Error>;

    /// Every plan ordered by category name, then `sort_order`.
    async fn list(&self) -> Result<Vec<PricingPlan>, sqlx::Error>;

    /// Active plans only, same ordering as [`PricingRepo::list`].
    async fn list_active(&self) -> Result<Vec<PricingPlan>, sqlx::Error>;

    /// Apply price, feature and activation changes. `None` fields are left unchanged.
    async fn update(&self, id: DbId, changes: &PlanChanges) -> Result<Option<PricingPlan>, sqlx::Error>;

    async fn count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl PricingRepo for PgStore {
    async fn create(&self, input: &CreatePricingPlan) -> Result<PricingPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO pricing_plans (category, name, price, features, badge, highlight, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingPlan>(&query)
            .bind(input.category.as_str())
            .bind(&input.name)
            .bind(&input.price)
            .bind(&input.features)
            .bind(&input.badge)
            .bind(input.highlight)
            .bind(input.sort_order)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PricingPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pricing_plans WHERE id = $1");
        sqlx::query_as::<_, PricingPlan>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn list(&self) -> Result<Vec<PricingPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pricing_plans ORDER BY category ASC, sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, PricingPlan>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn list_active(&self) -> Result<Vec<PricingPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pricing_plans WHERE is_active = true
             ORDER BY category ASC, sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, PricingPlan>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn update(&self, id: DbId, changes: &PlanChanges) -> Result<Option<PricingPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE pricing_plans SET
                price = COALESCE($2, price),
                features = COALESCE($3, features),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingPlan>(&query)
            .bind(id)
            .bind(&changes.price)
            .bind(&changes.features)
            .bind(changes.is_active)
            .fetch_optional(self.pool())
            .await
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM pricing_plans")
            .fetch_one(self.pool())
            .await
    }
}
