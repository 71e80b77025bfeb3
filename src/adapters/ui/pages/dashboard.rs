//! Dashboard: stat cards, monthly trend, status donut, recent activity.

use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::{bar, card, heading, table};
use crate::domain::dates::MONTHS;
use crate::domain::format::{self, money_with};
use crate::domain::{DashboardStats, DomainError, User};

const BAR_WIDTH: usize = 24;

pub async fn run(app: &Services) -> Result<(), DomainError> {
    let stats = match with_spinner("Loading dashboard…", app.insights.dashboard()).await {
        Ok(s) => s,
        Err(e) => return notify::failure(e, "Failed to load dashboard"),
    };
    let user = app.session.current_user().await.unwrap_or_default();
    let currency = app.session.currency().await;
    println!("{}", render(&stats, &user, &currency));
    Ok(())
}

pub fn render(stats: &DashboardStats, user: &User, currency: &str) -> String {
    let money = |d| money_with(currency, d);
    let mut out = Vec::new();
    out.push(heading(&format!("Welcome back, {}", user.first_name())));

    let growth = format!("{} vs last month", stats.growth_label());
    let pending = format!("{} invoices", stats.pending_invoices);
    let overdue = format!("{} invoices", stats.overdue_invoices);
    out.push(card("Total revenue", &money(stats.total_revenue), Some(&growth)));
    out.push(card("Total invoices", &stats.total_invoices.to_string(), None));
    out.push(card("Pending", &money(stats.pending_amount), Some(&pending)));
    out.push(card("Overdue", &money(stats.overdue_amount), Some(&overdue)));

    out.push(heading("Revenue vs expenses"));
    let (revenue, expenses) = stats.monthly_bars();
    for (i, month) in MONTHS.iter().enumerate() {
        let r = revenue.get(i).copied().unwrap_or(0.0);
        let e = expenses.get(i).copied().unwrap_or(0.0);
        if r == 0.0 && e == 0.0 {
            continue;
        }
        out.push(format!(
            "{}  rev {}\n     exp {}",
            month,
            bar(r * 100.0, BAR_WIDTH),
            bar(e * 100.0, BAR_WIDTH)
        ));
    }

    out.push(heading("Invoice status"));
    let donut = stats.donut();
    for (label, share) in [
        ("Paid", donut.paid),
        ("Pending", donut.pending),
        ("Overdue", donut.overdue),
    ] {
        out.push(format!("{:<8} {} {}", label, bar(share, BAR_WIDTH), format::percent(share)));
    }
    out.push(format!("Drafts: {}", stats.draft_invoices));

    if !stats.recent_invoices.is_empty() {
        out.push(heading("Recent invoices"));
        let rows: Vec<Vec<String>> = stats
            .recent_invoices
            .iter()
            .map(|i| {
                vec![
                    i.invoice_number.clone(),
                    i.client_name().to_string(),
                    i.status.to_string(),
                    money(i.total_amount),
                ]
            })
            .collect();
        out.push(table(&["Number", "Client", "Status", "Total"], &rows));
    }

    if !stats.recent_payments.is_empty() {
        out.push(heading("Recent payments"));
        let rows: Vec<Vec<String>> = stats
            .recent_payments
            .iter()
            .map(|p| {
                vec![
                    format::date_short(p.payment_date.as_ref()),
                    p.client_name().to_string(),
                    p.payment_method.to_string(),
                    money(p.amount),
                ]
            })
            .collect();
        out.push(table(&["Date", "Client", "Method", "Amount"], &rows));
    }
    out.join("\n")
}
