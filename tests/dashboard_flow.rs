use budget_dashboard::{
    table::{SortDirection, SortKey},
    AlertKind, Dashboard, ExpenseDraft, IncomeDraft, MemoryStore, Month, MonthlyBudget, Settings,
    Store,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn month(s: &str) -> Month {
    s.parse().unwrap()
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

// A month of real spending: (day, category, amount, description, payment method)
fn march_expenses() -> Vec<(u32, &'static str, Decimal, &'static str, &'static str)> {
    vec![
    (1, "Rent", dec!(2232.53), "Rent", "Capital Five (Credit)"),
    (1, "Wellness", dec!(79.48), "Rappi - pharmacy", "Capital One (Credit)"),
    (1, "Groceries", dec!(6.61), "Food Lion", "Capital One (Credit)"),
    (2, "Storage", dec!(278.77), "StorQuest", "Capital Five (Credit)"),
    (2, "Groceries", dec!(79.48), "Rappi", "Capital One (Credit)"),
    (3, "Rent", dec!(14.00), "iPostal1", "Quicksilver One (Credit)"),
    (3, "Subscriptions", dec!(12.99), "Proton", "Quicksilver One (Credit)"),
    (3, "Business", dec!(50.00), "Harvard Business", "Quicksilver One (Credit)"),
    (3, "Transportation", dec!(10.30), "Uber", "Capital One (Credit)"),
    (4, "Subscriptions", dec!(20.00), "Claude AI", "Quicksilver One (Credit)"),
    (4, "Eating Out", dec!(61.24), "Rappi", "Capital One (Credit)"),
    (5, "Transportation", dec!(27.22), "Uber", "Capital One (Credit)"),
    (5, "Transportation", dec!(20.00), "Gas", "Capital One (Credit)"),
    (6, "Melany", dec!(189.71), "Western Union", "Capital One (Credit)"),
    (6, "Business", dec!(14.60), "USPS - stamps", "Capital One (Credit)"),
    (6, "Transportation", dec!(20.37), "Uber", "Capital One (Credit)"),
    (6, "Melany", dec!(53.99), "Western Union", "Capital One (Credit)"),
    (6, "Entertainment", dec!(20.36), "Netflix", "PayPal (Check)"),
    (7, "Eating Out", dec!(113.17), "Rappi", "Capital One (Credit)"),
    (7, "Entertainment", dec!(19.23), "Spotify", "PayPal (Check)"),
    (7, "Wardrobe", dec!(38.50), "Amiri", "PayPal (Check)"),
    (7, "Mom", dec!(795.00), "Mom", "360 (Debit)"),
    (8, "Entertainment", dec!(16.99), "Max", "Capital One (Credit)"),
    (8, "Subscriptions", dec!(6.99), "1Password", "Capital One (Credit)"),
    (8, "Wardrobe", dec!(40.50), "Under Armor", "PayPal (Check)"),
    (8, "Eating Out", dec!(25.02), "Rappi", "Quicksilver One (Credit)"),
    (8, "Entertainment", dec!(19.99), "HBO Max", "Capital One (Credit)"),
    (13, "Savings", dec!(50.00), "Goldman Sachs", "360 (Debit)"),
    ]
}

fn march_budget() -> MonthlyBudget {
    let allocations = vec![
        ("Rent", dec!(2500)),
        ("Storage", dec!(300)),
        ("Utilities", dec!(200)),
        ("Cell Phone", dec!(100)),
        ("Wellness", dec!(200)),
        ("Credit Cards", dec!(500)),
        ("Investments", dec!(1000)),
        ("Transportation", dec!(400)),
        ("Groceries", dec!(800)),
        ("Entertainment", dec!(300)),
        ("Subscriptions", dec!(100)),
        ("Savings", dec!(1000)),
        ("Business", dec!(500)),
        ("Wardrobe", dec!(300)),
        ("Eating Out", dec!(400)),
        ("Melany", dec!(300)),
        ("Mom", dec!(800)),
        ("Other", dec!(200)),
    ];

    allocations
        .into_iter()
        .fold(MonthlyBudget::new(month("2025-03"), dec!(9401.00)), |b, (c, a)| {
            b.with_allocation(c, a)
        })
}

fn seeded() -> (MemoryStore, Dashboard) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut store = MemoryStore::new();
    let mut dashboard = Dashboard::new(Settings::default(), month("2025-03"));

    for (day, category, amount, description, method) in march_expenses() {
        dashboard
            .add_expense(
                &mut store,
                ExpenseDraft {
                    date: march(day),
                    category: category.into(),
                    amount,
                    description: description.into(),
                    payment_method: method.into(),
                },
            )
            .unwrap();
    }

    dashboard
        .add_income(
            &mut store,
            IncomeDraft {
                date: march(1),
                source: "Tricentis".into(),
                description: "Salary".into(),
                amount: dec!(4084.16),
            },
        )
        .unwrap();

    dashboard.set_budget(&mut store, march_budget()).unwrap();

    (store, dashboard)
}

#[test]
fn march_report() {
    let (_, dashboard) = seeded();
    let report = dashboard.report(march(13));

    assert_eq!(report.category_spend["Rent"], dec!(2246.53));
    assert_eq!(report.category_spend["Groceries"], dec!(86.09));
    assert_eq!(report.category_spend["Eating Out"], dec!(199.43));
    assert_eq!(report.category_spend["Utilities"], Decimal::ZERO);

    assert_eq!(report.card_spend["Capital One"], dec!(720.14));
    assert_eq!(report.card_spend["Capital Five"], dec!(2511.30));
    assert_eq!(report.card_spend["Quicksilver One"], dec!(122.01));
    assert_eq!(report.card_spend["American Express"], Decimal::ZERO);
    assert_eq!(report.card_totals.spent, dec!(3353.45));
    assert_eq!(report.card_totals.limit, dec!(9050));

    assert_eq!(report.summary.income, dec!(4084.16));
    assert_eq!(report.summary.spent, dec!(4317.04));
    assert_eq!(report.summary.budget, dec!(9900));

    // Everything is under 95%
    assert!(report.alerts.is_empty());
}

#[test]
fn overspending_raises_alerts_in_category_order() {
    let (mut store, mut dashboard) = seeded();
    for (category, amount) in vec![("Storage", dec!(7.00)), ("Mom", dec!(10.00))] {
        dashboard
            .add_expense(
                &mut store,
                ExpenseDraft {
                    date: march(10),
                    category: category.into(),
                    amount,
                    description: category.into(),
                    payment_method: "360 (Debit)".into(),
                },
            )
            .unwrap();
    }

    let alerts = dashboard.report(march(13)).alerts;
    assert_eq!(alerts.len(), 2);

    assert_eq!(alerts[0].id, 1);
    assert_eq!(alerts[0].subject, "Mom");
    assert_eq!(alerts[0].kind, AlertKind::Danger);
    assert_eq!(alerts[0].message, "You've exceeded your Mom budget by $5.00.");

    assert_eq!(alerts[1].id, 2);
    assert_eq!(alerts[1].subject, "Storage");
    assert_eq!(alerts[1].kind, AlertKind::Warning);
    assert_eq!(alerts[1].message, "You've used 95.3% of your Storage budget.");
}

#[test]
fn next_month_carries_budget_forward() {
    let (_, mut dashboard) = seeded();
    dashboard.select_month(month("2025-04"));
    let report = dashboard.report(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());

    assert_eq!(report.budget.month, month("2025-04"));
    assert_eq!(report.budget.total, dec!(9401.00));
    assert_eq!(report.budget.allocation("Rent"), dec!(2500));
    assert!(report.category_spend.values().all(|v| v.is_zero()));
    assert_eq!(report.expenses.total_items, 0);
    assert!(report.expenses.items.is_empty());
    assert_eq!(report.summary.income, Decimal::ZERO);
}

#[test]
fn expense_table_pages_in_date_order() {
    let (_, mut dashboard) = seeded();

    let first = dashboard.report(march(13)).expenses;
    assert_eq!(first.total_items, 28);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items[0].description, "Goldman Sachs");

    let mut all = Vec::new();
    for page in 1..=first.total_pages + 1 {
        dashboard.expense_page = page;
        all.extend(dashboard.report(march(13)).expenses.items);
    }
    assert_eq!(all.len(), 28);
    assert!(all.windows(2).all(|w| w[0].date >= w[1].date));

    dashboard.toggle_expense_sort(SortKey::Amount);
    assert_eq!(dashboard.expense_sort.direction, SortDirection::Descending);
    dashboard.expense_page = 1;
    assert_eq!(dashboard.report(march(13)).expenses.items[0].amount, dec!(2232.53));
}

#[test]
fn store_holds_every_record() {
    let (store, dashboard) = seeded();
    let loaded = Dashboard::load(&store, Settings::default(), month("2025-03")).unwrap();

    assert_eq!(loaded.expenses.len(), 28);
    assert_eq!(loaded.incomes.len(), 1);
    assert_eq!(loaded.budgets.len(), 1);
    assert_eq!(
        loaded.expenses.iter().map(|e| e.id.clone()).collect::<Vec<_>>(),
        dashboard.expenses.iter().map(|e| e.id.clone()).collect::<Vec<_>>()
    );
    assert_eq!(store.records::<MonthlyBudget>().unwrap()[0].total, dec!(9401));
}
