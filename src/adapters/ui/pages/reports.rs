//! Yearly report: profit summary, monthly trend, status mix, top clients, payment methods.

use super::now;
use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::prompt::{self, Labeled};
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::{bar, card, heading};
use crate::domain::dates::MONTHS;
use crate::domain::format::{self, money_with};
use crate::domain::{DomainError, ReportSummary, calc};
use crate::usecases::InsightService;
use chrono::Datelike;
use rust_decimal::Decimal;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Year,
    Export,
}

pub async fn run(app: &Services) -> Result<(), DomainError> {
    let mut year = now().year();
    loop {
        let report = match with_spinner("Loading report…", app.insights.report(year)).await {
            Ok(r) => r,
            Err(e) => return notify::failure(e, "Failed to load report"),
        };
        let currency = app.session.currency().await;
        println!("{}", render(year, &report, &currency));

        let options = vec![
            Labeled::new(format!("Year: {}", year), Action::Year),
            Labeled::new("Export Markdown", Action::Export),
        ];
        match prompt::pick("Reports", options)? {
            None => return Ok(()),
            Some(Action::Year) => {
                let years = InsightService::years(&now())
                    .iter()
                    .rev()
                    .map(|y| Labeled::new(y.to_string(), *y))
                    .collect();
                if let Some(y) = prompt::pick_with("Year", years, &year)? {
                    year = y;
                }
            }
            Some(Action::Export) => {
                match app
                    .exports
                    .export_report(year, &report, &currency, now())
                    .await
                {
                    Ok(path) => notify::success(&format!("Saved {}", path.display())),
                    Err(e) => notify::failure(e, "Export failed")?,
                }
            }
        }
    }
}

pub fn render(year: i32, r: &ReportSummary, currency: &str) -> String {
    let money = |d: Decimal| money_with(currency, d);
    let mut out = vec![heading(&format!("Report {}", year))];
    out.push(card("Revenue", &money(r.total_revenue), None));
    out.push(card("Expenses", &money(r.total_expenses), None));
    let margin = format!("{} margin", format::percent_1dp(r.profit_margin()));
    out.push(card("Net profit", &money(r.net_profit), Some(&margin)));
    out.push(card("Invoices", &r.invoice_count().to_string(), None));

    out.push(heading("Monthly trend"));
    let bars = calc::relative_bars(&[
        r.revenue_by_month.as_slice(),
        r.expense_by_month.as_slice(),
    ]);
    for (i, month) in MONTHS.iter().enumerate() {
        let rev = bars[0].get(i).copied().unwrap_or(0.0);
        let exp = bars[1].get(i).copied().unwrap_or(0.0);
        let rev_amount = r.revenue_by_month.get(i).copied().unwrap_or_default();
        let exp_amount = r.expense_by_month.get(i).copied().unwrap_or_default();
        out.push(format!(
            "{}  {} {}\n     {} {}",
            month,
            bar(rev * 100.0, BAR_WIDTH),
            money(rev_amount),
            bar(exp * 100.0, BAR_WIDTH),
            money(exp_amount)
        ));
    }

    if !r.status_breakdown.is_empty() {
        out.push(heading("Invoice status"));
        for (bucket, share) in r.status_breakdown.iter().zip(r.status_shares()) {
            let label = bucket
                .parsed_status()
                .map(|s| s.to_string())
                .unwrap_or_else(|| format::capitalize(&bucket.status));
            out.push(format!(
                "{:<10} {} {:>4}  {} invoices  {}",
                label,
                bar(share, BAR_WIDTH),
                format::percent(share),
                bucket.count,
                money(bucket.total_amount)
            ));
        }
    }

    if !r.top_clients.is_empty() {
        out.push(heading("Top clients"));
        for (client, width) in r.top_clients.iter().zip(r.top_client_bars()) {
            out.push(format!(
                "{:<20} {} {}",
                client.name(),
                bar(width * 100.0, BAR_WIDTH),
                money(client.total_paid)
            ));
        }
    }

    if !r.payment_methods.is_empty() {
        out.push(heading("Payment methods"));
        for (m, share) in r.payment_methods.iter().zip(r.method_shares()) {
            out.push(format!(
                "{:<14} {} {:>4}  {}",
                m.label(),
                bar(share, BAR_WIDTH),
                format::percent(share),
                money(m.total)
            ));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_margin_and_months() {
        let r = ReportSummary {
            total_revenue: dec!(200000),
            total_expenses: dec!(150000),
            net_profit: dec!(50000),
            revenue_by_month: vec![dec!(200000)],
            ..ReportSummary::default()
        };
        let out = render(2026, &r, "₹");
        assert!(out.contains("Report 2026"));
        assert!(out.contains("25.0% margin"));
        assert!(out.contains("₹2,00,000"));
        assert!(out.contains("Dec"));
    }
}
