use crate::{
    alert::{self, Alert},
    budget::{self, MonthlyBudget},
    card::{self, CardStatus, CardTotals},
    config::Settings,
    month::{Month, MonthError},
    spend::{self, MonthSummary},
    store::{Collection, Store, StoreError},
    table::{self, ExpenseFilter, Page, SortConfig, SortKey},
    transaction::{Expense, ExpenseDraft, Income, IncomeDraft},
};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

/// Everything the dashboard shows, owned by the caller.
///
/// Nothing here is cached: after any change the caller asks for a fresh
/// `report`, which recomputes every derived value from the records.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub settings: Settings,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub budgets: Vec<MonthlyBudget>,
    pub selected_month: Month,
    pub expense_sort: SortConfig,
    pub income_sort: SortConfig,
    pub expense_filter: ExpenseFilter,
    pub expense_page: usize,
    pub income_page: usize,
}

/// The result of one aggregation pass over a `Dashboard`
#[derive(Clone, Debug, PartialEq)]
pub struct MonthReport {
    pub month: Month,
    pub budget: MonthlyBudget,
    pub categories: Vec<String>,
    pub category_spend: BTreeMap<String, Decimal>,
    pub card_spend: BTreeMap<String, Decimal>,
    pub cards: Vec<CardStatus>,
    pub card_totals: CardTotals,
    pub alerts: Vec<Alert>,
    pub summary: MonthSummary,
    pub expenses: Page<Expense>,
    pub incomes: Page<Income>,
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("no expense with id '{0}'")]
    UnknownExpense(String),
    #[error("no income with id '{0}'")]
    UnknownIncome(String),
    #[error("the document store failed")]
    Store(#[from] StoreError),
    #[error("the date has no month bucket")]
    Month(#[from] MonthError),
}

impl Dashboard {
    pub fn new(settings: Settings, selected_month: Month) -> Self {
        Dashboard {
            settings,
            expenses: Vec::new(),
            incomes: Vec::new(),
            budgets: Vec::new(),
            selected_month,
            expense_sort: SortConfig::default(),
            income_sort: SortConfig::default(),
            expense_filter: ExpenseFilter::default(),
            expense_page: 1,
            income_page: 1,
        }
    }

    /// Fetch every record from `store`
    pub fn load<S: Store>(store: &S, settings: Settings, selected_month: Month) -> Result<Self, DashboardError> {
        let mut dashboard = Dashboard::new(settings, selected_month);
        dashboard.expenses = store.records()?;
        dashboard.incomes = store.records()?;
        dashboard.budgets = store.records()?;

        debug!(
            "loaded {} expenses, {} incomes and {} budgets",
            dashboard.expenses.len(),
            dashboard.incomes.len(),
            dashboard.budgets.len()
        );

        Ok(dashboard)
    }

    pub fn select_month(&mut self, month: Month) {
        self.selected_month = month;
        self.expense_page = 1;
        self.income_page = 1;
    }

    pub fn set_filter(&mut self, filter: ExpenseFilter) {
        self.expense_filter = filter;
        self.expense_page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.set_filter(ExpenseFilter::default());
    }

    pub fn toggle_expense_sort(&mut self, key: SortKey) {
        self.expense_sort.toggle(key);
    }

    pub fn toggle_income_sort(&mut self, key: SortKey) {
        self.income_sort.toggle(key);
    }

    pub fn categories(&self) -> Vec<String> {
        spend::recognized_categories(&self.settings.default_categories, &self.expenses)
    }

    pub fn payment_methods(&self) -> Vec<String> {
        spend::payment_methods(&self.expenses)
    }

    /// The budget in effect for the selected month
    pub fn current_budget(&self) -> MonthlyBudget {
        budget::resolve(
            self.selected_month,
            &self.budgets,
            &self.settings.fallback_budget,
        )
    }

    /// Run a full aggregation pass for the selected month. `today` positions the
    /// card statement and due dates.
    pub fn report(&self, today: NaiveDate) -> MonthReport {
        let month = self.selected_month;
        let settings = &self.settings;

        let categories = self.categories();
        let budget = self.current_budget();
        let category_spend = spend::category_spend(&self.expenses, month, &categories);
        let card_spend = spend::card_spend(&self.expenses, month, &settings.credit_cards);

        let cards: Vec<CardStatus> = settings
            .credit_cards
            .iter()
            .map(|c| {
                let spent = card_spend.get(&c.name).copied().unwrap_or(Decimal::ZERO);
                c.status(spent, today)
            })
            .collect();

        let alerts = alert::generate(
            &categories,
            &category_spend,
            &budget,
            &settings.credit_cards,
            &card_spend,
            settings.thresholds,
        );

        let summary = spend::summarize(&self.expenses, &self.incomes, month, &budget);

        let expenses = table::expense_rows(
            &self.expenses,
            month,
            &self.expense_filter,
            self.expense_sort,
            self.expense_page,
            settings.page_size,
        );
        let incomes = table::income_rows(
            &self.incomes,
            month,
            self.income_sort,
            self.income_page,
            settings.page_size,
        );

        debug!(
            "report for {}: spent {} of {}, {} alerts",
            month,
            summary.spent,
            summary.budget,
            alerts.len()
        );

        MonthReport {
            month,
            card_totals: card::totals(&cards),
            budget,
            categories,
            category_spend,
            card_spend,
            cards,
            alerts,
            summary,
            expenses,
            incomes,
        }
    }

    pub fn add_expense<S: Store>(&mut self, store: &mut S, draft: ExpenseDraft) -> Result<String, DashboardError> {
        let expense = Expense::new(draft)?;
        let id = store.insert(&expense)?;
        self.expenses.push(expense.with_id(id.clone()));
        Ok(id)
    }

    pub fn edit_expense<S: Store>(
        &mut self,
        store: &mut S,
        id: &str,
        draft: ExpenseDraft,
    ) -> Result<(), DashboardError> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .ok_or_else(|| DashboardError::UnknownExpense(id.to_owned()))?;

        let mut edited = self.expenses[index].clone();
        edited.edit(draft)?;
        store.replace(id, &edited)?;
        self.expenses[index] = edited;
        Ok(())
    }

    pub fn delete_expense<S: Store>(&mut self, store: &mut S, id: &str) -> Result<(), DashboardError> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .ok_or_else(|| DashboardError::UnknownExpense(id.to_owned()))?;

        store.delete(Collection::Expenses, id)?;
        self.expenses.remove(index);
        Ok(())
    }

    pub fn add_income<S: Store>(&mut self, store: &mut S, draft: IncomeDraft) -> Result<String, DashboardError> {
        let income = Income::new(draft)?;
        let id = store.insert(&income)?;
        self.incomes.push(income.with_id(id.clone()));
        Ok(id)
    }

    pub fn edit_income<S: Store>(
        &mut self,
        store: &mut S,
        id: &str,
        draft: IncomeDraft,
    ) -> Result<(), DashboardError> {
        let index = self
            .incomes
            .iter()
            .position(|i| i.id.as_deref() == Some(id))
            .ok_or_else(|| DashboardError::UnknownIncome(id.to_owned()))?;

        let mut edited = self.incomes[index].clone();
        edited.edit(draft)?;
        store.replace(id, &edited)?;
        self.incomes[index] = edited;
        Ok(())
    }

    pub fn delete_income<S: Store>(&mut self, store: &mut S, id: &str) -> Result<(), DashboardError> {
        let index = self
            .incomes
            .iter()
            .position(|i| i.id.as_deref() == Some(id))
            .ok_or_else(|| DashboardError::UnknownIncome(id.to_owned()))?;

        store.delete(Collection::Income, id)?;
        self.incomes.remove(index);
        Ok(())
    }

    /// Save `budget` as the budget for its month, replacing any existing one.
    pub fn set_budget<S: Store>(&mut self, store: &mut S, mut budget: MonthlyBudget) -> Result<(), DashboardError> {
        let existing = self
            .budgets
            .iter()
            .find(|b| b.month == budget.month)
            .and_then(|b| b.id.clone());

        match existing {
            Some(id) => {
                store.replace(&id, &budget)?;
                budget.id = Some(id);
            }
            None => {
                let id = store.insert(&budget)?;
                budget.id = Some(id);
            }
        }

        budget::upsert(&mut self.budgets, budget);
        Ok(())
    }

    /// Change the selected month's total. A carried forward budget becomes the
    /// month's own budget.
    pub fn set_total_budget<S: Store>(&mut self, store: &mut S, total: Decimal) -> Result<(), DashboardError> {
        let budget = self.current_budget().with_total(total);
        self.set_budget(store, budget)
    }

    /// Change one category's allocation for the selected month
    pub fn set_category_budget<S: Store>(
        &mut self,
        store: &mut S,
        category: &str,
        amount: Decimal,
    ) -> Result<(), DashboardError> {
        let budget = self.current_budget().with_allocation(category, amount);
        self.set_budget(store, budget)
    }
}
