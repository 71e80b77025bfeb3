//! Payments: collection overview, standalone recording, reversal, CSV export.

use super::{now, today};
use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::prompt::{self, Labeled};
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::{card, heading, table};
use crate::domain::format::{self, money_with};
use crate::domain::forms::PaymentDraft;
use crate::domain::{DomainError, PaymentMethod};
use crate::usecases::PaymentsOverview;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Payment(String),
    Record,
    Export,
}

pub async fn run(app: &Services) -> Result<(), DomainError> {
    loop {
        let overview = match with_spinner("Loading payments…", app.payments.overview(&now())).await
        {
            Ok(o) => o,
            Err(e) => return notify::failure(e, "Failed to load payments"),
        };
        let currency = app.session.currency().await;
        println!("{}", render(&overview, &currency));

        let mut options = vec![
            Labeled::new("+ Record payment", Entry::Record),
            Labeled::new("Export CSV", Entry::Export),
        ];
        options.extend(overview.page.data.iter().map(|p| {
            Labeled::new(
                format!(
                    "{}  {}  {}",
                    format::date_short(p.payment_date.as_ref()),
                    p.client_name(),
                    money_with(&currency, p.amount)
                ),
                Entry::Payment(p.id.clone()),
            )
        }));

        match prompt::pick("Payments", options)? {
            None => return Ok(()),
            Some(Entry::Record) => record(app, &currency).await?,
            Some(Entry::Export) => {
                match app
                    .exports
                    .export_payments(&overview.page.data, today())
                    .await
                {
                    Ok(path) => notify::success(&format!("Saved {}", path.display())),
                    Err(e) => notify::failure(e, "Export failed")?,
                }
            }
            Some(Entry::Payment(id)) => {
                if prompt::confirm(
                    "Delete this payment?",
                    Some("This will reverse the payment from the invoice balance"),
                )? {
                    match app.payments.delete(&id).await {
                        Ok(()) => notify::success("Payment deleted"),
                        Err(e) => notify::failure(e, "Failed to delete")?,
                    }
                }
            }
        }
    }
}

async fn record(app: &Services, currency: &str) -> Result<(), DomainError> {
    let invoices = match app.payments.payable_invoices().await {
        Ok(list) => list,
        Err(e) => return notify::failure(e, "Failed to load invoices"),
    };
    if invoices.is_empty() {
        notify::info("No pending invoices");
        return Ok(());
    }
    let options = invoices
        .iter()
        .map(|i| {
            Labeled::new(
                format!(
                    "{}  {}  due {}",
                    i.invoice_number,
                    i.client_name(),
                    money_with(currency, i.balance_due)
                ),
                (i.id.clone(), i.balance_due),
            )
        })
        .collect();
    let Some((invoice_id, balance)) = prompt::pick("Invoice", options)? else {
        return Ok(());
    };
    let mut draft = PaymentDraft::for_invoice(&invoice_id, balance, today());
    if !fill(&mut draft)? {
        return Ok(());
    }
    match with_spinner("Recording…", app.payments.record(&draft)).await {
        Ok(_) => notify::success("Payment recorded"),
        Err(e) => notify::failure(e, "Failed to record payment")?,
    }
    Ok(())
}

/// Prompt for the payment fields. Returns `false` when the user backs out.
pub(crate) fn fill(draft: &mut PaymentDraft) -> Result<bool, DomainError> {
    let Some(amount) = prompt::amount("Amount:", draft.amount)? else {
        return Ok(false);
    };
    draft.amount = amount;
    let Some(date) = prompt::date("Payment date:", draft.payment_date, None)? else {
        return Ok(false);
    };
    draft.payment_date = date;
    let methods = PaymentMethod::FOR_PAYMENTS
        .iter()
        .map(|m| Labeled::new(m.to_string(), *m))
        .collect();
    let Some(method) = prompt::pick_with("Method:", methods, &draft.payment_method)? else {
        return Ok(false);
    };
    draft.payment_method = method;
    let Some(reference) = prompt::text("Reference (optional):", &draft.reference_number)? else {
        return Ok(false);
    };
    draft.reference_number = reference;
    let Some(notes) = prompt::text("Notes (optional):", &draft.notes)? else {
        return Ok(false);
    };
    draft.notes = notes;
    Ok(true)
}

pub fn render(o: &PaymentsOverview, currency: &str) -> String {
    let money = |d: Decimal| money_with(currency, d);
    let mut out = vec![heading("Payments")];
    out.push(card("Total collected", &money(o.total_collected), None));
    out.push(card("This month", &money(o.this_month), None));
    let top = o
        .top_method
        .map(|m| m.to_string())
        .unwrap_or_else(|| format::DASH.to_string());
    out.push(card("Top method", &top, None));
    out.push(card("Transactions", &o.transactions.to_string(), None));

    if !o.by_method.is_empty() {
        out.push(heading("By method"));
        for (method, total) in &o.by_method {
            out.push(format!("{:<14} {}", method.to_string(), money(*total)));
        }
    }

    let rows: Vec<Vec<String>> = o
        .page
        .data
        .iter()
        .map(|p| {
            vec![
                format::date(p.payment_date.as_ref()),
                p.invoice
                    .as_ref()
                    .and_then(|i| i.number())
                    .unwrap_or(format::DASH)
                    .to_string(),
                p.client_name().to_string(),
                p.payment_method.to_string(),
                if p.reference_number.is_empty() {
                    format::DASH.to_string()
                } else {
                    p.reference_number.clone()
                },
                money(p.amount),
            ]
        })
        .collect();
    out.push(String::new());
    out.push(table(
        &["Date", "Invoice", "Client", "Method", "Reference", "Amount"],
        &rows,
    ));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Payment;
    use crate::domain::aggregates::Page;
    use crate::domain::dates::parse_timestamp;

    #[test]
    fn test_render_shows_method_breakdown() {
        let p: Payment = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "amount": 1500,
            "paymentMethod": "bank_transfer",
            "paymentDate": "2026-10-02",
            "invoice": { "_id": "i1", "invoiceNumber": "INV-0001" }
        }))
        .unwrap();
        let now = parse_timestamp("2026-10-15").unwrap();
        let o = PaymentsOverview::from_page(Page::new(vec![p]), &now);
        let out = render(&o, "₹");
        assert!(out.contains("BANK TRANSFER"));
        assert!(out.contains("INV-0001"));
        assert!(out.contains("₹1,500"));
    }
}
