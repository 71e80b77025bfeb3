//! Markdown digest of a yearly report.

use crate::domain::dates::MONTHS;
use crate::domain::format::{self, money_with};
use crate::domain::ReportSummary;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Render `report` for `year`. `currency` is the account's symbol.
pub fn report_to_markdown(
    year: i32,
    report: &ReportSummary,
    currency: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let money = |d: Decimal| money_with(currency, d);
    let mut md = String::new();

    // Header
    let _ = writeln!(md, "# Financial Report: {}\n", year);
    let _ = writeln!(
        md,
        "**Generated:** {}\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    md.push_str("---\n\n");

    // Summary
    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Value |\n|---|---|\n");
    let _ = writeln!(md, "| Gross revenue | {} |", money(report.total_revenue));
    let _ = writeln!(md, "| Total expenses | {} |", money(report.total_expenses));
    let _ = writeln!(md, "| Net profit | {} |", money(report.net_profit));
    let _ = writeln!(
        md,
        "| Profit margin | {} |",
        format::percent_1dp(report.profit_margin())
    );
    let _ = writeln!(md, "| Invoices | {} |", report.invoice_count());
    md.push('\n');

    // Monthly trend
    if !report.revenue_by_month.is_empty() || !report.expense_by_month.is_empty() {
        md.push_str("## Monthly Trend\n\n");
        md.push_str("| Month | Revenue | Expenses |\n|---|---|---|\n");
        for (i, month) in MONTHS.iter().enumerate() {
            let rev = report.revenue_by_month.get(i).copied().unwrap_or_default();
            let exp = report.expense_by_month.get(i).copied().unwrap_or_default();
            let _ = writeln!(md, "| {} | {} | {} |", month, money(rev), money(exp));
        }
        md.push('\n');
    }

    // Status breakdown
    if !report.status_breakdown.is_empty() {
        md.push_str("## Invoice Status\n\n");
        for (bucket, share) in report
            .status_breakdown
            .iter()
            .zip(report.status_shares())
        {
            let _ = writeln!(
                md,
                "- **{}**: {} invoices, {} ({})",
                format::capitalize(&bucket.status),
                bucket.count,
                money(bucket.total_amount),
                format::percent(share)
            );
        }
        md.push('\n');
    }

    // Top clients
    if !report.top_clients.is_empty() {
        md.push_str("## Top Clients\n\n");
        for (rank, client) in report.top_clients.iter().enumerate() {
            let _ = writeln!(
                md,
                "{}. {}: {}",
                rank + 1,
                client.name(),
                money(client.total_paid)
            );
        }
        md.push('\n');
    }

    // Payment methods
    if !report.payment_methods.is_empty() {
        md.push_str("## Payment Methods\n\n");
        for (m, share) in report.payment_methods.iter().zip(report.method_shares()) {
            let _ = writeln!(
                md,
                "- {}: {} payments, {} ({})",
                m.label(),
                m.count,
                money(m.total),
                format::percent(share)
            );
        }
        md.push('\n');
    }

    // Footer
    md.push_str("---\n");
    md.push_str("*Generated by kanakku*\n");
    md
}
