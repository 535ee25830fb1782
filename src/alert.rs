use crate::{budget::MonthlyBudget, card::CreditCard};
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Danger,
}

/// A budget or credit limit that is close to, or over, its limit
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Alert {
    /// Position within the pass that produced this alert, starting at 1. Not
    /// stable between passes.
    pub id: u32,
    pub kind: AlertKind,
    /// The category or card name
    pub subject: String,
    pub message: String,
}

/// Utilization percentages that trigger alerts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// At or above this percentage, warn
    pub warning: Decimal,
    /// Strictly above this percentage, the limit has been exceeded
    pub danger: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            warning: dec!(95),
            danger: dec!(100),
        }
    }
}

#[derive(Clone, Copy)]
enum Limit {
    Budget,
    Credit,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Budget => write!(f, "budget"),
            Limit::Credit => write!(f, "credit limit"),
        }
    }
}

/// Derive alerts for a month.
///
/// Categories are checked in the order given, followed by the cards. Anything
/// with a zero allocation or limit is skipped rather than treated as 0% or as
/// infinitely over.
pub fn generate(
    categories: &[String],
    category_spend: &BTreeMap<String, Decimal>,
    budget: &MonthlyBudget,
    cards: &[CreditCard],
    card_spend: &BTreeMap<String, Decimal>,
    thresholds: Thresholds,
) -> Vec<Alert> {
    let lookup = |spend: &BTreeMap<String, Decimal>, name: &str| {
        spend.get(name).copied().unwrap_or(Decimal::ZERO)
    };

    let category_checks = categories.iter().map(|c| {
        let name = c.as_str();
        (name, lookup(category_spend, name), budget.allocation(name), Limit::Budget)
    });
    let card_checks = cards.iter().map(|c| {
        let name = c.name.as_str();
        (name, lookup(card_spend, name), c.limit, Limit::Credit)
    });

    let mut alerts = Vec::new();
    for (subject, spent, limit, kind) in category_checks.chain(card_checks) {
        if let Some((alert_kind, message)) = check(subject, spent, limit, kind, thresholds) {
            alerts.push(Alert {
                id: alerts.len() as u32 + 1,
                kind: alert_kind,
                subject: subject.to_owned(),
                message,
            });
        }
    }

    debug!("generated {} alerts", alerts.len());
    alerts
}

fn check(
    subject: &str,
    spent: Decimal,
    limit: Decimal,
    kind: Limit,
    thresholds: Thresholds,
) -> Option<(AlertKind, String)> {
    if limit.is_zero() {
        return None;
    }

    let percentage = spent * dec!(100) / limit;

    if percentage > thresholds.danger {
        let over = round(spent - limit, 2);
        Some((
            AlertKind::Danger,
            format!("You've exceeded your {} {} by ${:.2}.", subject, kind, over),
        ))
    } else if percentage >= thresholds.warning {
        Some((
            AlertKind::Warning,
            format!(
                "You've used {:.1}% of your {} {}.",
                round(percentage, 1),
                subject,
                kind
            ),
        ))
    } else {
        None
    }
}

// Half away from zero
fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
