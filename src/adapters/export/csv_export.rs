//! CSV exports of list pages. Uses the `csv` crate for quoting and escaping.
//!
//! Amounts are written as plain decimals (no symbol, no grouping) so spreadsheets can sum them.

use crate::domain::{Expense, Invoice, Payment};
use chrono::{DateTime, Utc};

fn iso_date(at: Option<&DateTime<Utc>>) -> String {
    at.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Flatten free text onto one line.
fn one_line(text: &str) -> String {
    text.replace('\n', " ").replace('\r', "")
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// `Number,Client,Status,Issued,Due,Total,Paid,Balance`
pub fn invoices_to_csv(invoices: &[Invoice]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    wtr.write_record([
        "Number", "Client", "Status", "Issued", "Due", "Total", "Paid", "Balance",
    ])?;
    for inv in invoices {
        wtr.write_record([
            inv.invoice_number.clone(),
            inv.client_name().to_string(),
            inv.status.as_str().to_string(),
            iso_date(inv.issue_date.or(inv.created_at).as_ref()),
            iso_date(inv.due_date.as_ref()),
            inv.total_amount.to_string(),
            inv.amount_paid.to_string(),
            inv.balance_due.to_string(),
        ])?;
    }
    wtr.flush()?;
    finish(wtr)
}

/// `Date,Invoice,Client,Method,Reference,Amount`
pub fn payments_to_csv(payments: &[Payment]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    wtr.write_record(["Date", "Invoice", "Client", "Method", "Reference", "Amount"])?;
    for p in payments {
        let invoice = p
            .invoice
            .as_ref()
            .map(|r| r.number().unwrap_or(r.id()).to_string())
            .unwrap_or_default();
        wtr.write_record([
            iso_date(p.payment_date.as_ref()),
            invoice,
            p.client_name().to_string(),
            p.payment_method.as_str().to_string(),
            one_line(&p.reference_number),
            p.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    finish(wtr)
}

/// `Date,Title,Category,Vendor,Method,Amount,Notes`
pub fn expenses_to_csv(expenses: &[Expense]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    wtr.write_record([
        "Date", "Title", "Category", "Vendor", "Method", "Amount", "Notes",
    ])?;
    for e in expenses {
        wtr.write_record([
            iso_date(e.date.as_ref()),
            one_line(&e.title),
            e.category.as_str().to_string(),
            one_line(&e.vendor),
            e.payment_method.as_str().to_string(),
            e.amount.to_string(),
            one_line(&e.notes),
        ])?;
    }
    wtr.flush()?;
    finish(wtr)
}
