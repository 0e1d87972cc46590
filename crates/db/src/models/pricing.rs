//! Pricing plan model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vows_core::pricing::{normalize_features, parse_features, PlanCategory};
use vows_core::types::{DbId, Timestamp};

/// A row from the `pricing_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingPlan {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub category: PlanCategory,
    pub name: String,
    /// Display price, e.g. `R$ 4.800`.
    pub price: String,
    pub features: Vec<String>,
    pub badge: Option<String>,
    pub highlight: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a plan (used by the catalogue seed).
#[derive(Debug, Clone)]
pub struct CreatePricingPlan {
    pub category: PlanCategory,
    pub name: String,
    pub price: String,
    pub features: Vec<String>,
    pub badge: Option<String>,
    pub highlight: bool,
    pub sort_order: i32,
}

/// Feature list as sent by the back-office: either a list or one line per feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeaturesInput {
    List(Vec<String>),
    Text(String),
}

impl FeaturesInput {
    pub fn into_features(self) -> Vec<String> {
        match self {
            Self::List(list) => normalize_features(&list),
            Self::Text(text) => parse_features(&text),
        }
    }
}

/// Body of `PUT /admin/pricing/{id}`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePricingPlan {
    pub price: Option<String>,
    pub features: Option<FeaturesInput>,
    pub is_active: Option<bool>,
}

/// Normalized column changes applied by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanChanges {
    pub price: Option<String>,
    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl From<UpdatePricingPlan> for PlanChanges {
    fn from(input: UpdatePricingPlan) -> Self {
        Self {
            price: input
                .price
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            features: input.features.map(FeaturesInput::into_features),
            is_active: input.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_accept_text_or_list() {
        let body: UpdatePricingPlan =
            serde_json::from_str(r#"{"features": "Galeria online\n\nÁlbum digital\n"}"#).unwrap();
        let changes = PlanChanges::from(body);
        assert_eq!(
            changes.features,
            Some(vec!["Galeria online".to_string(), "Álbum digital".to_string()])
        );

        let body: UpdatePricingPlan =
            serde_json::from_str(r#"{"features": [" Trailer ", ""], "is_active": false}"#).unwrap();
        let changes = PlanChanges::from(body);
        assert_eq!(changes.features, Some(vec!["Trailer".to_string()]));
        assert_eq!(changes.is_active, Some(false));
        assert_eq!(changes.price, None);
    }

    #[test]
    fn blank_price_is_ignored() {
        let changes = PlanChanges::from(UpdatePricingPlan {
            price: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(changes, PlanChanges::default());
    }
}
