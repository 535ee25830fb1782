use crate::{
    month::Month,
    transaction::{Expense, Income, Monthly},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::{cmp::Ordering, num::NonZeroUsize};

/// A column that rows can be ordered by
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Category,
    Description,
    PaymentMethod,
    Amount,
    Source,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// The value of a row's column, compared according to its type
#[derive(Clone, Debug, PartialEq)]
pub enum SortField<'a> {
    Text(&'a str),
    Date(NaiveDate),
    Amount(Decimal),
}

/// Rows that can be ordered by `SortKey`
pub trait Sortable {
    /// The field for `key`, or `None` if this kind of row has no such column.
    fn sort_field(&self, key: SortKey) -> Option<SortField<'_>>;
}

/// Equality filters over expense rows. An unset filter matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

/// One page of rows
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub number: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            key: SortKey::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        SortConfig { key, direction }
    }

    /// Select `key`. Selecting the current key flips the direction; a new key
    /// starts out descending.
    pub fn toggle(&mut self, key: SortKey) {
        self.direction = if self.key == key {
            match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            }
        } else {
            SortDirection::Descending
        };
        self.key = key;
    }
}

impl SortField<'_> {
    // Fields of different kinds never occur for the same key
    fn compare(&self, other: &SortField<'_>) -> Ordering {
        match (self, other) {
            (SortField::Text(a), SortField::Text(b)) => a.cmp(b),
            (SortField::Date(a), SortField::Date(b)) => a.cmp(b),
            (SortField::Amount(a), SortField::Amount(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl Sortable for Expense {
    fn sort_field(&self, key: SortKey) -> Option<SortField<'_>> {
        match key {
            SortKey::Date => Some(SortField::Date(self.date)),
            SortKey::Category => Some(SortField::Text(&self.category)),
            SortKey::Description => Some(SortField::Text(&self.description)),
            SortKey::PaymentMethod => Some(SortField::Text(&self.payment_method)),
            SortKey::Amount => Some(SortField::Amount(self.amount)),
            SortKey::Source => None,
        }
    }
}

impl Sortable for Income {
    fn sort_field(&self, key: SortKey) -> Option<SortField<'_>> {
        match key {
            SortKey::Date => Some(SortField::Date(self.date)),
            SortKey::Source => Some(SortField::Text(&self.source)),
            SortKey::Description => Some(SortField::Text(&self.description)),
            SortKey::Amount => Some(SortField::Amount(self.amount)),
            SortKey::Category | SortKey::PaymentMethod => None,
        }
    }
}

impl ExpenseFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.payment_method.is_none()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        let category = self.category.as_ref().map_or(true, |c| *c == expense.category);
        let method = self
            .payment_method
            .as_ref()
            .map_or(true, |m| *m == expense.payment_method);
        category && method
    }

    pub fn reset(&mut self) {
        *self = ExpenseFilter::default();
    }
}

impl<T> Page<T> {
    /// 1-based position of the first row on this page, or 0 if the page is empty
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based position of the last row on this page, or 0 if the page is empty
    pub fn last_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + self.items.len()
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1 && self.total_pages > 0
    }
}

/// The rows bucketed into `month`, in their original order
pub fn for_month<'a, T: Monthly>(records: &'a [T], month: Month) -> Vec<&'a T> {
    records.iter().filter(|r| r.month() == month).collect()
}

/// Stable sort by `config`. Rows with equal keys keep their relative order.
pub fn sort_records<T: Sortable>(records: &mut [T], config: SortConfig) {
    records.sort_by(|a, b| compare(a, b, config));
}

fn compare<T: Sortable>(a: &T, b: &T, config: SortConfig) -> Ordering {
    match (a.sort_field(config.key), b.sort_field(config.key)) {
        (Some(fa), Some(fb)) => config.direction.apply(fa.compare(&fb)),
        _ => Ordering::Equal,
    }
}

/// Slice `items` into the 1-based page `number`. Pages outside the range
/// `1..=total_pages` are empty.
pub fn paginate<T: Clone>(items: &[T], number: usize, per_page: NonZeroUsize) -> Page<T> {
    let per_page = per_page.get();
    let total_items = items.len();
    let total_pages = if total_items == 0 {
        0
    } else {
        (total_items - 1) / per_page + 1
    };

    let page_items = match number.checked_sub(1) {
        Some(index) => items
            .iter()
            .skip(index.saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    Page {
        items: page_items,
        number,
        per_page,
        total_items,
        total_pages,
    }
}

/// The expense table for `month`: filtered, sorted and paginated
pub fn expense_rows(
    expenses: &[Expense],
    month: Month,
    filter: &ExpenseFilter,
    sort: SortConfig,
    page: usize,
    per_page: NonZeroUsize,
) -> Page<Expense> {
    let mut rows: Vec<Expense> = for_month(expenses, month)
        .into_iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();
    sort_records(&mut rows, sort);
    paginate(&rows, page, per_page)
}

/// The income table for `month`: sorted and paginated
pub fn income_rows(
    incomes: &[Income],
    month: Month,
    sort: SortConfig,
    page: usize,
    per_page: NonZeroUsize,
) -> Page<Income> {
    let mut rows: Vec<Income> = for_month(incomes, month).into_iter().cloned().collect();
    sort_records(&mut rows, sort);
    paginate(&rows, page, per_page)
}
