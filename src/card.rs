use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A credit card that expenses can be charged to.
///
/// `name` joins the card to expenses: an expense paid with "Capital One
/// (Credit)" belongs to the card named "Capital One".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub name: String,
    pub limit: Decimal,
    pub statement_day: u32,
    pub due_day: u32,
}

/// A card's position for one month
#[derive(Clone, Debug, PartialEq)]
pub struct CardStatus {
    pub name: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub available: Decimal,
    /// Percentage of the limit used. `None` if the card has no limit.
    pub utilization: Option<Decimal>,
    pub days_until_statement: i64,
    pub days_until_due: i64,
}

/// The summary row across every card
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardTotals {
    pub limit: Decimal,
    pub spent: Decimal,
    pub available: Decimal,
}

impl CreditCard {
    pub fn new<S: Into<String>>(name: S, limit: Decimal, statement_day: u32, due_day: u32) -> Self {
        CreditCard {
            name: name.into(),
            limit,
            statement_day,
            due_day,
        }
    }

    /// Whether this card's name prefixes the payment method
    pub fn matches(&self, payment_method: &str) -> bool {
        payment_method.starts_with(&self.name)
    }

    /// Days from `today` until this month's statement closes. Zero or less means it
    /// has already closed this month.
    pub fn days_until_statement(&self, today: NaiveDate) -> i64 {
        self.statement_day as i64 - today.day() as i64
    }

    /// Days from `today` until this month's payment is due. Zero or less means it
    /// is due today or overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        self.due_day as i64 - today.day() as i64
    }

    pub fn status(&self, spent: Decimal, today: NaiveDate) -> CardStatus {
        CardStatus {
            name: self.name.clone(),
            limit: self.limit,
            spent,
            available: self.limit - spent,
            utilization: utilization(spent, self.limit),
            days_until_statement: self.days_until_statement(today),
            days_until_due: self.days_until_due(today),
        }
    }
}

/// `spent` as a percentage of `limit`, or `None` if there is no limit to measure
/// against.
pub fn utilization(spent: Decimal, limit: Decimal) -> Option<Decimal> {
    if limit.is_zero() {
        None
    } else {
        Some(spent * dec!(100) / limit)
    }
}

/// The cards tracked by the dashboard out of the box
pub fn default_cards() -> Vec<CreditCard> {
    vec![
        CreditCard::new("Capital One", dec!(950), 17, 11),
        CreditCard::new("Capital Five", dec!(7500), 25, 19),
        CreditCard::new("Quicksilver One", dec!(300), 27, 23),
        CreditCard::new("American Express", dec!(300), 25, 22),
    ]
}

/// Sum limits, spend and available credit across `statuses`
pub fn totals(statuses: &[CardStatus]) -> CardTotals {
    statuses.iter().fold(CardTotals::default(), |mut acc, s| {
        acc.limit += s.limit;
        acc.spent += s.spent;
        acc.available += s.available;
        acc
    })
}

/// Find a pair of card names where one is a prefix of the other. Such a pair
/// makes payment methods ambiguous.
pub fn find_prefix_conflict(cards: &[CreditCard]) -> Option<(&str, &str)> {
    for (i, a) in cards.iter().enumerate() {
        for b in cards.iter().skip(i + 1) {
            if a.name.starts_with(&b.name) || b.name.starts_with(&a.name) {
                return Some((a.name.as_str(), b.name.as_str()));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn card_matches_prefix() {
        let card = CreditCard::new("Capital One", dec!(950), 17, 11);
        assert!(card.matches("Capital One (Credit)"));
        assert!(!card.matches("Capital Five (Credit)"));
        assert!(!card.matches("My Capital One (Credit)"));
    }

    #[test]
    fn card_days_until() {
        let card = CreditCard::new("Capital One", dec!(950), 17, 11);
        assert_eq!(card.days_until_statement(today(10)), 7);
        assert_eq!(card.days_until_due(today(10)), 1);
        assert_eq!(card.days_until_due(today(11)), 0);
        assert_eq!(card.days_until_due(today(20)), -9);
    }

    #[test]
    fn card_status() {
        let card = CreditCard::new("Capital One", dec!(950), 17, 11);
        let status = card.status(dec!(195), today(1));
        assert_eq!(status.available, dec!(755));
        assert_eq!(status.utilization.map(|u| u.round_dp(1)), Some(dec!(20.5)));
        assert_eq!(status.days_until_statement, 16);
    }

    #[test]
    fn utilization_without_limit() {
        assert_eq!(utilization(dec!(10), Decimal::ZERO), None);
        assert_eq!(utilization(dec!(150), dec!(300)), Some(dec!(50)));
    }

    #[test]
    fn totals_sum_statuses() {
        let statuses: Vec<CardStatus> = default_cards()
            .iter()
            .map(|c| c.status(dec!(100), today(1)))
            .collect();
        let t = totals(&statuses);
        assert_eq!(t.limit, dec!(9050));
        assert_eq!(t.spent, dec!(400));
        assert_eq!(t.available, dec!(8650));
    }

    #[test]
    fn default_cards_do_not_conflict() {
        assert_eq!(find_prefix_conflict(&default_cards()), None);
    }

    #[test]
    fn prefix_conflict_detected() {
        let cards = vec![
            CreditCard::new("Chase", dec!(1), 1, 1),
            CreditCard::new("Amex", dec!(1), 1, 1),
            CreditCard::new("Chase Sapphire", dec!(1), 1, 1),
        ];
        assert_eq!(find_prefix_conflict(&cards), Some(("Chase", "Chase Sapphire")));
    }
}
