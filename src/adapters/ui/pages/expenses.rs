//! Expenses: totals by category, create/edit/delete, CSV export.

use super::{now, today};
use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::prompt::{self, Labeled};
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::{bar, card, heading, table};
use crate::domain::format::{self, money_with};
use crate::domain::forms::ExpenseForm;
use crate::domain::{DomainError, Expense, ExpenseCategory, PaymentMethod, calc};
use crate::usecases::ExpensesOverview;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Open(String),
    New,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RowAction {
    Edit,
    Delete,
}

pub async fn run(app: &Services) -> Result<(), DomainError> {
    loop {
        let overview = match with_spinner("Loading expenses…", app.expenses.overview(&now())).await
        {
            Ok(o) => o,
            Err(e) => return notify::failure(e, "Failed to load expenses"),
        };
        let currency = app.session.currency().await;
        println!("{}", render(&overview, &currency));

        let mut options = vec![
            Labeled::new("+ Add expense", Entry::New),
            Labeled::new("Export CSV", Entry::Export),
        ];
        options.extend(overview.page.data.iter().map(|e| {
            Labeled::new(
                format!("{}  {}", e.title, money_with(&currency, e.amount)),
                Entry::Open(e.id.clone()),
            )
        }));
        match prompt::pick("Expenses", options)? {
            None => return Ok(()),
            Some(Entry::New) => edit(app, None).await?,
            Some(Entry::Export) => {
                match app
                    .exports
                    .export_expenses(&overview.page.data, today())
                    .await
                {
                    Ok(path) => notify::success(&format!("Saved {}", path.display())),
                    Err(e) => notify::failure(e, "Export failed")?,
                }
            }
            Some(Entry::Open(id)) => {
                let Some(expense) = overview.page.data.iter().find(|e| e.id == id) else {
                    continue;
                };
                let actions = vec![
                    Labeled::new("Edit", RowAction::Edit),
                    Labeled::new("Delete", RowAction::Delete),
                ];
                match prompt::pick(&expense.title, actions)? {
                    Some(RowAction::Edit) => edit(app, Some(expense)).await?,
                    Some(RowAction::Delete) => {
                        if prompt::confirm("Delete this expense?", None)? {
                            match app.expenses.delete(&id).await {
                                Ok(()) => notify::success("Expense deleted"),
                                Err(e) => notify::failure(e, "Failed to delete")?,
                            }
                        }
                    }
                    None => {}
                }
            }
        }
    }
}

pub fn render(o: &ExpensesOverview, currency: &str) -> String {
    let money = |d: Decimal| money_with(currency, d);
    let mut out = vec![heading("Expenses")];
    out.push(card("Total", &money(o.total), None));
    out.push(card("This month", &money(o.this_month), None));
    let top = o
        .top_category
        .map(|c| c.to_string())
        .unwrap_or_else(|| format::DASH.to_string());
    out.push(card("Top category", &top, None));

    if !o.by_category.is_empty() {
        out.push(heading("By category"));
        let totals: Vec<Decimal> = o.by_category.iter().map(|(_, t)| *t).collect();
        let shares = calc::amount_shares(&totals);
        for ((category, total), share) in o.by_category.iter().zip(shares) {
            out.push(format!(
                "{:<10} {} {:>4}  {}",
                category.to_string(),
                bar(share, 16),
                format::percent(share),
                money(*total)
            ));
        }
    }

    out.push(String::new());
    out.push(list_table(&o.page.data, currency));
    out.join("\n")
}

fn list_table(expenses: &[Expense], currency: &str) -> String {
    let rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                format::date(e.date.as_ref()),
                e.title.clone(),
                e.category.to_string(),
                if e.vendor.is_empty() {
                    format::DASH.to_string()
                } else {
                    e.vendor.clone()
                },
                e.payment_method.to_string(),
                money_with(currency, e.amount),
            ]
        })
        .collect();
    table(
        &["Date", "Title", "Category", "Vendor", "Method", "Amount"],
        &rows,
    )
}

async fn edit(app: &Services, existing: Option<&Expense>) -> Result<(), DomainError> {
    let mut form = match existing {
        Some(e) => ExpenseForm::from_expense(e, today()),
        None => ExpenseForm::new(today()),
    };
    loop {
        if !fill(&mut form)? {
            return Ok(());
        }
        let id = existing.map(|e| e.id.as_str());
        match with_spinner("Saving…", app.expenses.save(id, form.clone())).await {
            Ok(_) => {
                notify::success("Expense saved");
                return Ok(());
            }
            Err(DomainError::Validation(msg)) => notify::error(&msg),
            Err(e) => return notify::failure(e, "Failed to save expense"),
        }
    }
}

fn fill(form: &mut ExpenseForm) -> Result<bool, DomainError> {
    let Some(title) = prompt::text("Title:", &form.title)? else {
        return Ok(false);
    };
    form.title = title;
    let categories = ExpenseCategory::ALL
        .iter()
        .map(|c| Labeled::new(c.to_string(), *c))
        .collect();
    let Some(category) = prompt::pick_with("Category:", categories, &form.category)? else {
        return Ok(false);
    };
    form.category = category;
    let Some(amount) = prompt::amount("Amount:", form.amount)? else {
        return Ok(false);
    };
    form.amount = amount;
    let Some(date) = prompt::date("Date:", form.date, None)? else {
        return Ok(false);
    };
    form.date = date;
    let methods = PaymentMethod::FOR_EXPENSES
        .iter()
        .map(|m| Labeled::new(m.to_string(), *m))
        .collect();
    let Some(method) = prompt::pick_with("Paid via:", methods, &form.payment_method)? else {
        return Ok(false);
    };
    form.payment_method = method;
    let Some(vendor) = prompt::text("Vendor:", &form.vendor)? else {
        return Ok(false);
    };
    form.vendor = vendor;
    let Some(notes) = prompt::text("Notes:", &form.notes)? else {
        return Ok(false);
    };
    form.notes = notes;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Page;
    use crate::domain::dates::parse_timestamp;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_category_shares() {
        let now = parse_timestamp("2026-10-15").unwrap();
        let page = Page {
            data: vec![],
            total: Some(0),
            total_amount: Some(dec!(0)),
        };
        let mut o = ExpensesOverview::from_page(page, &now);
        o.by_category = vec![
            (ExpenseCategory::Travel, dec!(750)),
            (ExpenseCategory::Office, dec!(250)),
        ];
        let out = render(&o, "₹");
        assert!(out.contains("75%"));
        assert!(out.contains("25%"));
        assert!(out.contains("₹750"));
    }
}
