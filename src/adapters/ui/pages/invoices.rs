//! Invoices: status tabs, search, detail with actions, new-invoice builder.

use super::{Jump, follow, payments, today};
use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::prompt::{self, Labeled};
use crate::adapters::ui::theme::badge;
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::{bar, heading, table};
use crate::domain::aggregates::InvoiceDetail;
use crate::domain::format::{self, money_with};
use crate::domain::forms::{InvoiceDraft, LineItemDraft, PaymentDraft};
use crate::domain::{DomainError, Invoice, InvoiceAction, StatusTab, User};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Open(String),
    Tab,
    Search,
    New,
    Export,
}

pub async fn run(app: &Services) -> Result<(), DomainError> {
    let mut tab = StatusTab::All;
    let mut search: Option<String> = None;
    loop {
        let page = match with_spinner(
            "Loading invoices…",
            app.invoices.list(tab, search.as_deref()),
        )
        .await
        {
            Ok(p) => p,
            Err(e) => return notify::failure(e, "Failed to load invoices"),
        };
        let currency = app.session.currency().await;
        let title = match &search {
            Some(q) => format!("Invoices · {} · \"{}\" ({})", tab, q, page.count()),
            None => format!("Invoices · {} ({})", tab, page.count()),
        };
        println!("{}", heading(&title));
        println!("{}", list_table(&page.data, &currency));

        let mut options = vec![
            Labeled::new("+ New invoice", Entry::New),
            Labeled::new(format!("Status: {}", tab), Entry::Tab),
            Labeled::new("Search by number", Entry::Search),
            Labeled::new("Export CSV", Entry::Export),
        ];
        options.extend(page.data.iter().map(|i| {
            Labeled::new(
                format!(
                    "{}  {}  {}",
                    i.invoice_number,
                    i.client_name(),
                    money_with(&currency, i.total_amount)
                ),
                Entry::Open(i.id.clone()),
            )
        }));

        match prompt::pick("Invoices", options)? {
            None => return Ok(()),
            Some(Entry::Open(id)) => follow(app, Some(Jump::Invoice(id))).await?,
            Some(Entry::Tab) => {
                let tabs = StatusTab::TABS
                    .iter()
                    .map(|t| Labeled::new(t.to_string(), *t))
                    .collect();
                if let Some(t) = prompt::pick_with("Status", tabs, &tab)? {
                    tab = t;
                }
            }
            Some(Entry::Search) => {
                if let Some(q) = prompt::text("Invoice number:", search.as_deref().unwrap_or(""))? {
                    search = Some(q).filter(|q| !q.trim().is_empty());
                }
            }
            Some(Entry::New) => {
                let jump = create(app).await?;
                follow(app, jump).await?;
            }
            Some(Entry::Export) => match app.exports.export_invoices(&page.data, today()).await {
                Ok(path) => notify::success(&format!("Saved {}", path.display())),
                Err(e) => notify::failure(e, "Export failed")?,
            },
        }
    }
}

fn list_table(invoices: &[Invoice], currency: &str) -> String {
    let rows: Vec<Vec<String>> = invoices
        .iter()
        .map(|i| {
            vec![
                i.invoice_number.clone(),
                i.client_name().to_string(),
                i.status.to_string(),
                format::date(i.due_date.as_ref()),
                money_with(currency, i.total_amount),
                money_with(currency, i.balance_due),
            ]
        })
        .collect();
    table(
        &["Number", "Client", "Status", "Due", "Total", "Balance"],
        &rows,
    )
}

/// Detail view with status actions. Returns a cross-link when the user opens the client.
pub async fn detail(app: &Services, id: &str) -> Result<Option<Jump>, DomainError> {
    loop {
        let detail = match with_spinner("Loading invoice…", app.invoices.detail(id)).await {
            Ok(d) => d,
            Err(e) => {
                notify::failure(e, "Failed to load invoice")?;
                return Ok(None);
            }
        };
        let user = app.session.current_user().await.unwrap_or_default();
        let currency = app.session.currency().await;
        println!("{}", render_detail(&detail, &user, &currency));

        let actions = InvoiceAction::available(&detail.invoice)
            .into_iter()
            .map(|a| Labeled::new(a.to_string(), a))
            .collect();
        let Some(action) = prompt::pick("Action", actions)? else {
            return Ok(None);
        };
        match action {
            InvoiceAction::RecordPayment => record_payment(app, &detail, &currency).await?,
            InvoiceAction::Send | InvoiceAction::MarkPending => {
                match app.invoices.apply(id, action).await {
                    Ok(inv) => notify::success(&format!("Invoice marked {}", inv.status)),
                    Err(e) => notify::failure(e, "Failed to update status")?,
                }
            }
            InvoiceAction::OpenClient => {
                if let Some(client) = &detail.invoice.client {
                    return Ok(Some(Jump::Client(client.id().to_string())));
                }
            }
            InvoiceAction::Delete => {
                let msg = format!("Delete {}?", detail.invoice.invoice_number);
                if prompt::confirm(&msg, Some("This cannot be undone"))? {
                    match app.invoices.delete(id).await {
                        Ok(()) => {
                            notify::success("Invoice deleted");
                            return Ok(None);
                        }
                        Err(e) => notify::failure(e, "Failed to delete")?,
                    }
                }
            }
        }
    }
}

async fn record_payment(
    app: &Services,
    detail: &InvoiceDetail,
    currency: &str,
) -> Result<(), DomainError> {
    let inv = &detail.invoice;
    println!(
        "Balance due: {}",
        money_with(currency, inv.balance_due)
    );
    let mut draft = PaymentDraft::for_invoice(&inv.id, inv.balance_due, today());
    if !payments::fill(&mut draft)? {
        return Ok(());
    }
    match with_spinner(
        "Recording…",
        app.invoices.record_payment(detail, &draft, currency),
    )
    .await
    {
        Ok(_) => notify::success("Payment recorded"),
        Err(e) => notify::failure(e, "Failed to record payment")?,
    }
    Ok(())
}

pub fn render_detail(detail: &InvoiceDetail, user: &User, currency: &str) -> String {
    let inv = &detail.invoice;
    let money = |d: Decimal| money_with(currency, d);
    let mut out = vec![heading(&format!("{}  {}", inv.invoice_number, badge(inv.status)))];
    out.push(format!(
        "Created {}   Issued {}   Due {}",
        format::date(inv.created_at.as_ref()),
        format::date(inv.issue_date.as_ref()),
        format::date(inv.due_date.as_ref())
    ));

    let b = &user.business;
    out.push(String::new());
    out.push(format!("From: {}", user.billing_name()));
    for line in [&b.address, &b.city, &b.state, &b.pincode] {
        if !line.trim().is_empty() {
            out.push(format!("      {}", line));
        }
    }
    if !b.gstin.is_empty() {
        out.push(format!("      GSTIN {}", b.gstin));
    }
    out.push(format!("Billed to: {}", inv.client_name()));
    if let Some(c) = inv.client.as_ref().and_then(|c| c.record()) {
        if let Some(loc) = c.location() {
            out.push(format!("      {}", loc));
        }
        if !c.gstin.is_empty() {
            out.push(format!("      GSTIN {}", c.gstin));
        }
    }

    out.push(String::new());
    let rows: Vec<Vec<String>> = inv
        .line_items
        .iter()
        .map(|it| {
            vec![
                it.description.clone(),
                it.quantity.normalize().to_string(),
                money(it.rate),
                format!("{}%", it.tax_rate.normalize()),
                money(it.line_amount()),
            ]
        })
        .collect();
    out.push(table(&["Item", "Qty", "Rate", "Tax", "Amount"], &rows));
    out.push(String::new());
    out.push(format!("{:>12} {}", "Subtotal", money(inv.subtotal)));
    out.push(format!("{:>12} {}", "Tax", money(inv.tax_amount)));
    if inv.discount_amount > Decimal::ZERO {
        out.push(format!("{:>12} -{}", "Discount", money(inv.discount_amount)));
    }
    out.push(format!("{:>12} {}", "Total", money(inv.total_amount)));
    if !inv.notes.trim().is_empty() {
        out.push(format!("\nNotes: {}", inv.notes.trim()));
    }

    let progress = detail.paid_progress();
    out.push(String::new());
    out.push(format!(
        "Paid {} of {}  {} {}",
        money(inv.amount_paid),
        money(inv.total_amount),
        bar(progress, 20),
        format::percent(progress)
    ));
    out.push(format!("Balance due: {}", money(inv.balance_due)));

    if !detail.payments.is_empty() {
        out.push(heading("Payments"));
        let rows: Vec<Vec<String>> = detail
            .payments
            .iter()
            .map(|p| {
                vec![
                    format::date(p.payment_date.as_ref()),
                    p.payment_method.to_string(),
                    p.reference_number.clone(),
                    money(p.amount),
                ]
            })
            .collect();
        out.push(table(&["Date", "Method", "Reference", "Amount"], &rows));
    }
    out.join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftStep {
    AddItem,
    AddFromCatalog,
    EditItem,
    RemoveItem,
    DueDate,
    Notes,
    Create,
}

impl DraftStep {
    fn label(self) -> &'static str {
        match self {
            Self::AddItem => "+ Add item",
            Self::AddFromCatalog => "+ Add from catalog",
            Self::EditItem => "Edit item",
            Self::RemoveItem => "Remove item",
            Self::DueDate => "Due date",
            Self::Notes => "Notes",
            Self::Create => "Create invoice",
        }
    }
}

/// New-invoice builder. Returns a link to the created invoice.
async fn create(app: &Services) -> Result<Option<Jump>, DomainError> {
    let clients = match with_spinner("Loading clients…", app.invoices.client_options()).await {
        Ok(c) => c,
        Err(e) => {
            notify::failure(e, "Failed to load clients")?;
            return Ok(None);
        }
    };
    if clients.is_empty() {
        notify::info("Add a client first");
        return Ok(None);
    }
    let products = match app.invoices.product_options().await {
        Ok(p) => p,
        Err(e) => {
            notify::failure(e, "Failed to load catalog")?;
            Vec::new()
        }
    };
    let settings = app.session.invoice_settings().await;
    let currency = app.session.currency().await;
    let mut draft = app.invoices.new_draft(&settings, today());

    let client_options = clients
        .iter()
        .map(|c| Labeled::new(c.display_name(), c.id.clone()))
        .collect();
    let Some(client_id) = prompt::pick("Client", client_options)? else {
        return Ok(None);
    };
    draft.client = Some(client_id);
    if !edit_item(&mut draft, 0)? {
        return Ok(None);
    }

    loop {
        println!("{}", render_draft(&draft, &currency));
        let mut steps = vec![DraftStep::AddItem];
        if !products.is_empty() {
            steps.push(DraftStep::AddFromCatalog);
        }
        steps.push(DraftStep::EditItem);
        if draft.line_items.len() > 1 {
            steps.push(DraftStep::RemoveItem);
        }
        steps.extend([DraftStep::DueDate, DraftStep::Notes, DraftStep::Create]);
        let options = steps
            .into_iter()
            .map(|s| Labeled::new(s.label(), s))
            .collect();
        let Some(step) = prompt::pick("New invoice", options)? else {
            if prompt::confirm("Discard this draft?", None)? {
                return Ok(None);
            }
            continue;
        };
        match step {
            DraftStep::AddItem => {
                draft.add_item();
                let last = draft.line_items.len() - 1;
                if !edit_item(&mut draft, last)? {
                    draft.remove_item(last);
                }
            }
            DraftStep::AddFromCatalog => {
                let options = products
                    .iter()
                    .map(|p| {
                        Labeled::new(
                            format!("{}  {}/{}", p.name, money_with(&currency, p.rate), p.unit),
                            p,
                        )
                    })
                    .collect();
                if let Some(product) = prompt::pick("Catalog", options)? {
                    let item = LineItemDraft::from(product);
                    // Replace the untouched first row rather than leaving it blank.
                    let untouched = matches!(
                        draft.line_items.as_slice(),
                        [only] if only.description.is_empty() && only.rate.is_none()
                    );
                    if untouched {
                        draft.line_items[0] = item;
                    } else {
                        draft.line_items.push(item);
                    }
                }
            }
            DraftStep::EditItem => {
                if let Some(i) = pick_item(&draft, "Edit which item?")? {
                    edit_item(&mut draft, i)?;
                }
            }
            DraftStep::RemoveItem => {
                if let Some(i) = pick_item(&draft, "Remove which item?")? {
                    draft.remove_item(i);
                }
            }
            DraftStep::DueDate => {
                let current = draft.due_date.unwrap_or_else(today);
                if let Some(d) = prompt::date("Due date:", current, Some(today()))? {
                    draft.due_date = Some(d);
                }
            }
            DraftStep::Notes => {
                if let Some(n) = prompt::text("Notes:", &draft.notes)? {
                    draft.notes = n;
                }
            }
            DraftStep::Create => {
                match with_spinner("Creating invoice…", app.invoices.create(&draft, today())).await
                {
                    Ok(inv) => {
                        notify::success(&format!("Invoice {} created", inv.invoice_number));
                        return Ok(Some(Jump::Invoice(inv.id)));
                    }
                    Err(e) => notify::failure(e, "Failed to create invoice")?,
                }
            }
        }
    }
}

fn pick_item(draft: &InvoiceDraft, msg: &str) -> Result<Option<usize>, DomainError> {
    let options = draft
        .line_items
        .iter()
        .enumerate()
        .map(|(i, it)| {
            let name = if it.description.is_empty() {
                "(blank)"
            } else {
                &it.description
            };
            Labeled::new(format!("{}. {}", i + 1, name), i)
        })
        .collect();
    prompt::pick(msg, options)
}

/// Prompt for one row's fields. Returns `false` when the user backs out.
fn edit_item(draft: &mut InvoiceDraft, index: usize) -> Result<bool, DomainError> {
    let Some(item) = draft.line_items.get_mut(index) else {
        return Ok(false);
    };
    let Some(description) = prompt::text("Description:", &item.description)? else {
        return Ok(false);
    };
    item.description = description;
    let Some(quantity) = prompt::amount("Quantity:", Some(item.quantity))? else {
        return Ok(false);
    };
    item.quantity = quantity.unwrap_or_default();
    let Some(rate) = prompt::amount("Rate:", item.rate)? else {
        return Ok(false);
    };
    item.rate = rate;
    let Some(tax) = prompt::amount("Tax %:", Some(item.tax_rate))? else {
        return Ok(false);
    };
    item.tax_rate = tax.unwrap_or_default();
    Ok(true)
}

pub fn render_draft(draft: &InvoiceDraft, currency: &str) -> String {
    let money = |d: Decimal| money_with(currency, d);
    let rows: Vec<Vec<String>> = draft
        .line_items
        .iter()
        .enumerate()
        .map(|(i, it)| {
            let amount = it.quantity * it.rate.unwrap_or_default();
            vec![
                (i + 1).to_string(),
                it.description.clone(),
                it.quantity.normalize().to_string(),
                it.rate.map(money).unwrap_or_else(|| format::DASH.to_string()),
                format!("{}%", it.tax_rate.normalize()),
                money(amount),
            ]
        })
        .collect();
    let totals = draft.totals();
    let due = draft
        .due_date
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| format::DASH.to_string());
    format!(
        "{}\n{}\n\n{:>10} {}\n{:>10} {}\n{:>10} {}\nDue {}",
        heading("Draft invoice"),
        table(&["#", "Item", "Qty", "Rate", "Tax", "Amount"], &rows),
        "Subtotal",
        money(totals.subtotal),
        "Tax",
        money(totals.tax),
        "Total",
        money(totals.total()),
        due
    )
}
