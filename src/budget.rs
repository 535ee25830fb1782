use crate::month::Month;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The spending plan for one month.
///
/// Categories that have no entry in `categories` are allocated nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub month: Month,
    #[serde(rename = "totalBudget")]
    pub total: Decimal,
    #[serde(rename = "categoryBudgets", default)]
    pub categories: BTreeMap<String, Decimal>,
}

/// The budget used for months that have no budget on or before them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackBudget {
    pub total: Decimal,
    #[serde(default)]
    pub categories: BTreeMap<String, Decimal>,
}

impl MonthlyBudget {
    pub fn new(month: Month, total: Decimal) -> Self {
        MonthlyBudget {
            id: None,
            month,
            total,
            categories: BTreeMap::new(),
        }
    }

    /// The amount allocated to `category`, or zero if it has no allocation.
    pub fn allocation(&self, category: &str) -> Decimal {
        self.categories
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of every category allocation. This may differ from `total`, which the
    /// user edits separately.
    pub fn allocated_total(&self) -> Decimal {
        self.categories.values().fold(Decimal::ZERO, |acc, v| acc + v)
    }

    pub fn with_total(&self, total: Decimal) -> Self {
        MonthlyBudget {
            total,
            ..self.clone()
        }
    }

    pub fn with_allocation<S: Into<String>>(&self, category: S, amount: Decimal) -> Self {
        let mut budget = self.clone();
        budget.categories.insert(category.into(), amount);
        budget
    }

    // A copy of this budget for another month. The copy never carries the store id
    // as it is a different record.
    fn carried_to(&self, month: Month) -> Self {
        MonthlyBudget {
            id: None,
            month,
            total: self.total,
            categories: self.categories.clone(),
        }
    }
}

impl FallbackBudget {
    pub fn for_month(&self, month: Month) -> MonthlyBudget {
        MonthlyBudget {
            id: None,
            month,
            total: self.total,
            categories: self.categories.clone(),
        }
    }
}

impl Default for FallbackBudget {
    fn default() -> Self {
        let categories = vec![
            ("Rent".to_owned(), dec!(2500)),
            ("Storage".to_owned(), dec!(300)),
            ("Utilities".to_owned(), dec!(200)),
        ];

        FallbackBudget {
            total: dec!(9401.00),
            categories: categories.into_iter().collect(),
        }
    }
}

/// Find the budget in effect for `target`.
///
/// An exact match is returned as is. Otherwise the most recent budget before
/// `target` is carried forward and stamped with `target`. If there is nothing to
/// carry forward, the fallback applies.
pub fn resolve(target: Month, budgets: &[MonthlyBudget], fallback: &FallbackBudget) -> MonthlyBudget {
    if let Some(exact) = budgets.iter().find(|b| b.month == target) {
        debug!("using budget defined for {}", target);
        return exact.clone();
    }

    // Keep the first of any equal months so that input order breaks ties
    let mut latest: Option<&MonthlyBudget> = None;
    for budget in budgets.iter().filter(|b| b.month <= target) {
        match latest {
            Some(l) if l.month >= budget.month => (),
            _ => latest = Some(budget),
        }
    }

    match latest {
        Some(source) => {
            debug!("carrying budget forward from {} to {}", source.month, target);
            source.carried_to(target)
        }
        None => {
            debug!("no budget on or before {} - using fallback", target);
            fallback.for_month(target)
        }
    }
}

/// Insert `budget`, replacing any existing budget for the same month. The store
/// id of a replaced record is kept.
pub fn upsert(budgets: &mut Vec<MonthlyBudget>, mut budget: MonthlyBudget) {
    match budgets.iter_mut().find(|b| b.month == budget.month) {
        Some(existing) => {
            if budget.id.is_none() {
                budget.id = existing.id.take();
            }
            *existing = budget;
        }
        None => budgets.push(budget),
    }
}
