//! Budget tracking for a personal finance dashboard.
//!
//! Records income and expenses bucketed by month, resolves each month's budget
//! (carrying the most recent budget forward where a month has none), totals
//! spend per category and per credit card, and raises alerts as budgets and
//! credit limits fill up. Persistence sits behind the `Store` trait.

pub mod alert;
pub mod budget;
pub mod card;
pub mod config;
pub mod dashboard;
pub mod month;
pub mod spend;
pub mod store;
pub mod table;
pub mod transaction;

pub use alert::{Alert, AlertKind, Thresholds};
pub use budget::{FallbackBudget, MonthlyBudget};
pub use card::{CardStatus, CreditCard};
pub use config::{ConfigError, Settings};
pub use dashboard::{Dashboard, DashboardError, MonthReport};
pub use month::{Month, MonthError};
pub use store::{MemoryStore, Store, StoreError};
pub use transaction::{Expense, ExpenseDraft, Income, IncomeDraft};
