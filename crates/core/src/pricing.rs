//! Pricing plan categories and feature-list helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Pricing plan category, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanCategory {
    Foto,
    Video,
    Combo,
}

impl PlanCategory {
    pub const ALL: [PlanCategory; 3] = [PlanCategory::Foto, PlanCategory::Video, PlanCategory::Combo];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Foto => "foto",
            Self::Video => "video",
            Self::Combo => "combo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Foto => "Fotografia",
            Self::Video => "Vídeo",
            Self::Combo => "Combos",
        }
    }
}

impl fmt::Display for PlanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foto" => Ok(Self::Foto),
            "video" => Ok(Self::Video),
            "combo" => Ok(Self::Combo),
            other => Err(CoreError::Validation(format!(
                "Unknown plan category '{other}'. Must be one of: foto, video, combo"
            ))),
        }
    }
}

impl TryFrom<String> for PlanCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Split newline-separated feature text into trimmed, non-empty lines.
pub fn parse_features(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a feature list received as an array.
pub fn normalize_features(features: &[String]) -> Vec<String> {
    features
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Plans of one category, as listed on the public pricing section.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<T> {
    pub category: PlanCategory,
    pub label: &'static str,
    pub plans: Vec<T>,
}

/// Group `plans` by category in display order, dropping empty categories.
///
/// Plans keep their relative order within a category.
pub fn group_by_category<T>(
    plans: Vec<T>,
    category_of: impl Fn(&T) -> PlanCategory,
) -> Vec<CategoryGroup<T>> {
    let mut groups: Vec<CategoryGroup<T>> = PlanCategory::ALL
        .iter()
        .map(|&category| CategoryGroup {
            category,
            label: category.label(),
            plans: Vec::new(),
        })
        .collect();

    for plan in plans {
        let category = category_of(&plan);
        if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
            group.plans.push(plan);
        }
    }

    groups.retain(|g| !g.plans.is_empty());
    groups
}
