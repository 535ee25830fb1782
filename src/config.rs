use crate::{
    alert::Thresholds,
    budget::FallbackBudget,
    card::{default_cards, find_prefix_conflict, CreditCard},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, num::NonZeroUsize};
use thiserror::Error;

/// Number of rows on a transaction page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

// The categories offered before any expenses have been recorded
const DEFAULT_CATEGORIES: [&str; 18] = [
    "Rent",
    "Storage",
    "Utilities",
    "Cell Phone",
    "Wellness",
    "Credit Cards",
    "Investments",
    "Transportation",
    "Groceries",
    "Entertainment",
    "Subscriptions",
    "Savings",
    "Business",
    "Wardrobe",
    "Eating Out",
    "Melany",
    "Mom",
    "Other",
];

/// Product configuration for the dashboard.
///
/// Every field may be omitted from a JSON document, in which case the built in
/// value is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub default_categories: Vec<String>,
    pub credit_cards: Vec<CreditCard>,
    pub fallback_budget: FallbackBudget,
    pub page_size: NonZeroUsize,
    pub thresholds: Thresholds,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse settings")]
    Json(#[from] serde_json::Error),
    #[error("credit card '{0}' is defined more than once")]
    DuplicateCard(String),
    #[error("credit card names '{0}' and '{1}' overlap - a card name must not prefix another")]
    AmbiguousCards(String, String),
    #[error("category '{0}' is listed more than once")]
    DuplicateCategory(String),
    #[error("the warning threshold must not exceed the danger threshold")]
    Thresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            credit_cards: default_cards(),
            fallback_budget: FallbackBudget::default(),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut categories = BTreeSet::new();
        for category in &self.default_categories {
            if !categories.insert(category) {
                return Err(ConfigError::DuplicateCategory(category.clone()));
            }
        }

        let mut names = BTreeSet::new();
        for card in &self.credit_cards {
            if !names.insert(&card.name) {
                return Err(ConfigError::DuplicateCard(card.name.clone()));
            }
        }

        // Payment methods are matched to cards by prefix, so overlapping names
        // would make some expenses impossible to attribute.
        if let Some((a, b)) = find_prefix_conflict(&self.credit_cards) {
            return Err(ConfigError::AmbiguousCards(a.to_owned(), b.to_owned()));
        }

        if self.thresholds.warning > self.thresholds.danger {
            return Err(ConfigError::Thresholds);
        }

        Ok(())
    }
}
