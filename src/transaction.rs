use crate::month::{Month, MonthError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment methods containing this marker are credit card payments, e.g.
/// "Capital One (Credit)".
pub const CREDIT_MARKER: &str = "Credit";

/// A single outgoing payment.
///
/// `month` is stored alongside `date` rather than derived on demand, because
/// that is how the records are kept in the document store. Use `Expense::new`
/// and `Expense::edit` to keep the two consistent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    #[serde(default)]
    pub payment_method: String,
    pub month: Month,
}

/// The user-editable fields of an `Expense`
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub payment_method: String,
}

/// A single incoming payment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub source: String,
    pub description: String,
    pub amount: Decimal,
    pub month: Month,
}

/// The user-editable fields of an `Income`
#[derive(Clone, Debug, PartialEq)]
pub struct IncomeDraft {
    pub date: NaiveDate,
    pub source: String,
    pub description: String,
    pub amount: Decimal,
}

/// Records that are bucketed by month
pub trait Monthly {
    fn month(&self) -> Month;
}

impl Expense {
    /// Create an unsaved expense. The id is assigned by the store on creation.
    pub fn new(draft: ExpenseDraft) -> Result<Self, MonthError> {
        Ok(Expense {
            id: None,
            month: Month::from_date(draft.date)?,
            date: draft.date,
            category: draft.category,
            amount: draft.amount,
            description: draft.description,
            payment_method: draft.payment_method,
        })
    }

    /// Replace every mutable field, keeping the id. Leaves the expense
    /// untouched if the new date has no month bucket.
    pub fn edit(&mut self, draft: ExpenseDraft) -> Result<(), MonthError> {
        let edited = Expense::new(draft)?;
        *self = Expense {
            id: self.id.take(),
            ..edited
        };
        Ok(())
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether this expense was paid with a credit card
    pub fn is_credit(&self) -> bool {
        self.payment_method.contains(CREDIT_MARKER)
    }

    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            date: self.date,
            category: self.category.clone(),
            amount: self.amount,
            description: self.description.clone(),
            payment_method: self.payment_method.clone(),
        }
    }
}

impl Income {
    pub fn new(draft: IncomeDraft) -> Result<Self, MonthError> {
        Ok(Income {
            id: None,
            month: Month::from_date(draft.date)?,
            date: draft.date,
            source: draft.source,
            description: draft.description,
            amount: draft.amount,
        })
    }

    pub fn edit(&mut self, draft: IncomeDraft) -> Result<(), MonthError> {
        let edited = Income::new(draft)?;
        *self = Income {
            id: self.id.take(),
            ..edited
        };
        Ok(())
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn draft(&self) -> IncomeDraft {
        IncomeDraft {
            date: self.date,
            source: self.source.clone(),
            description: self.description.clone(),
            amount: self.amount,
        }
    }
}

impl Monthly for Expense {
    fn month(&self) -> Month {
        self.month
    }
}

impl Monthly for Income {
    fn month(&self) -> Month {
        self.month
    }
}

/// Sum the amounts of the given records
pub fn total<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, a| acc + a)
}
