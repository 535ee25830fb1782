use crate::{
    budget::MonthlyBudget,
    card::CreditCard,
    month::Month,
    transaction::{total, Expense, Income},
};
use log::{trace, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet};

/// Income, spend and budget for one month
#[derive(Clone, Debug, PartialEq)]
pub struct MonthSummary {
    pub month: Month,
    pub income: Decimal,
    pub spent: Decimal,
    /// Sum of the month's category allocations
    pub budget: Decimal,
    pub remaining: Decimal,
    /// `spent` as a percentage of `budget`, or zero when nothing is allocated
    pub spending_percentage: Decimal,
}

/// Total spend per recognised category for `month`.
///
/// Every recognised category appears in the result, with zero if nothing was
/// spent on it. Spend on categories outside `categories` is left out.
pub fn category_spend(
    expenses: &[Expense],
    month: Month,
    categories: &[String],
) -> BTreeMap<String, Decimal> {
    let mut spend: BTreeMap<String, Decimal> = categories
        .iter()
        .map(|c| (c.clone(), Decimal::ZERO))
        .collect();

    for expense in expenses.iter().filter(|e| e.month == month) {
        if let Some(acc) = spend.get_mut(&expense.category) {
            *acc += expense.amount;
        }
    }

    spend
}

/// Total credit card spend per card for `month`.
///
/// An expense is charged to a card when its payment method is marked as credit
/// and exactly one card name prefixes it. Anything else is ignored.
pub fn card_spend(expenses: &[Expense], month: Month, cards: &[CreditCard]) -> BTreeMap<String, Decimal> {
    let mut spend: BTreeMap<String, Decimal> = cards
        .iter()
        .map(|c| (c.name.clone(), Decimal::ZERO))
        .collect();

    for expense in expenses.iter().filter(|e| e.month == month && e.is_credit()) {
        let mut matched = cards.iter().filter(|c| c.matches(&expense.payment_method));

        match (matched.next(), matched.next()) {
            (Some(card), None) => {
                trace!(
                    "charging {} ({}) to {}",
                    expense.amount,
                    expense.description,
                    card.name
                );
                if let Some(acc) = spend.get_mut(&card.name) {
                    *acc += expense.amount;
                }
            }
            (Some(a), Some(b)) => {
                warn!(
                    "payment method '{}' matches both '{}' and '{}' - ignoring",
                    expense.payment_method, a.name, b.name
                );
            }
            _ => trace!("no card for payment method '{}'", expense.payment_method),
        }
    }

    spend
}

/// The category list offered by the dashboard: the defaults plus any category
/// that has been used on an expense, sorted and without duplicates.
pub fn recognized_categories(defaults: &[String], expenses: &[Expense]) -> Vec<String> {
    defaults
        .iter()
        .chain(expenses.iter().map(|e| &e.category))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every payment method used on an expense, sorted and without duplicates
pub fn payment_methods(expenses: &[Expense]) -> Vec<String> {
    expenses
        .iter()
        .map(|e| e.payment_method.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Total spend in `month` across every category
pub fn month_total(expenses: &[Expense], month: Month) -> Decimal {
    total(expenses.iter().filter(|e| e.month == month).map(|e| e.amount))
}

/// Total spend for each of `months`, in the same order
pub fn monthly_totals(expenses: &[Expense], months: &[Month]) -> Vec<(Month, Decimal)> {
    months
        .iter()
        .map(|m| (*m, month_total(expenses, *m)))
        .collect()
}

/// Percentage change in spend on `category` between the month before `month`
/// and `month`. There is no trend without spend in the previous month.
pub fn category_trend(expenses: &[Expense], month: Month, category: &str) -> Option<Decimal> {
    let spent_in = |m: Month| {
        total(
            expenses
                .iter()
                .filter(|e| e.month == m && e.category == category)
                .map(|e| e.amount),
        )
    };

    let previous = spent_in(month.pred());
    if previous.is_zero() {
        return None;
    }

    Some((spent_in(month) - previous) / previous * dec!(100))
}

pub fn summarize(
    expenses: &[Expense],
    incomes: &[Income],
    month: Month,
    budget: &MonthlyBudget,
) -> MonthSummary {
    let income = total(incomes.iter().filter(|i| i.month == month).map(|i| i.amount));
    let spent = month_total(expenses, month);
    let allocated = budget.allocated_total();

    let spending_percentage = if allocated > Decimal::ZERO {
        spent / allocated * dec!(100)
    } else {
        Decimal::ZERO
    };

    MonthSummary {
        month,
        income,
        spent,
        budget: allocated,
        remaining: allocated - spent,
        spending_percentage,
    }
}
