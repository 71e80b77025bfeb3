//! Clients: search, create/edit form, detail with stats and invoices.

use super::Jump;
use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::prompt::{self, Labeled};
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::{card, heading, table};
use crate::domain::aggregates::ClientDetail;
use crate::domain::format::{self, money_with};
use crate::domain::forms::ClientForm;
use crate::domain::{Client, DomainError, RecordStatus};

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Open(String),
    Search,
    New,
}

pub async fn run(app: &Services) -> Result<(), DomainError> {
    let mut search: Option<String> = None;
    loop {
        let page = match with_spinner("Loading clients…", app.clients.list(search.as_deref())).await
        {
            Ok(p) => p,
            Err(e) => return notify::failure(e, "Failed to load clients"),
        };
        println!("{}", heading(&format!("Clients ({})", page.count())));
        println!("{}", list_table(&page.data));

        let mut options = vec![
            Labeled::new("+ New client", Entry::New),
            Labeled::new("Search", Entry::Search),
        ];
        options.extend(
            page.data
                .iter()
                .map(|c| Labeled::new(c.display_name(), Entry::Open(c.id.clone()))),
        );
        match prompt::pick("Clients", options)? {
            None => return Ok(()),
            Some(Entry::Search) => {
                if let Some(q) = prompt::text("Search:", search.as_deref().unwrap_or(""))? {
                    search = Some(q).filter(|q| !q.trim().is_empty());
                }
            }
            Some(Entry::New) => edit(app, None).await?,
            Some(Entry::Open(id)) => super::follow(app, Some(Jump::Client(id))).await?,
        }
    }
}

fn list_table(clients: &[Client]) -> String {
    let rows: Vec<Vec<String>> = clients
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                or_dash(&c.company),
                or_dash(&c.email),
                or_dash(&c.phone),
                c.location().unwrap_or_else(|| format::DASH.to_string()),
                c.status.to_string(),
            ]
        })
        .collect();
    table(
        &["Name", "Company", "Email", "Phone", "Location", "Status"],
        &rows,
    )
}

fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        format::DASH.to_string()
    } else {
        s.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DetailAction {
    Invoice(String),
    Edit,
    Delete,
}

/// Client detail. Returns a cross-link when the user opens one of the client's invoices.
pub async fn detail(app: &Services, id: &str) -> Result<Option<Jump>, DomainError> {
    loop {
        let detail = match with_spinner("Loading client…", app.clients.detail(id)).await {
            Ok(d) => d,
            Err(e) => {
                notify::failure(e, "Failed to load client")?;
                return Ok(None);
            }
        };
        let currency = app.session.currency().await;
        println!("{}", render_detail(&detail, &currency));

        let mut options = vec![
            Labeled::new("Edit", DetailAction::Edit),
            Labeled::new("Delete", DetailAction::Delete),
        ];
        options.extend(detail.invoices.iter().map(|i| {
            Labeled::new(
                format!("Open {}", i.invoice_number),
                DetailAction::Invoice(i.id.clone()),
            )
        }));
        match prompt::pick("Client", options)? {
            None => return Ok(None),
            Some(DetailAction::Invoice(inv)) => return Ok(Some(Jump::Invoice(inv))),
            Some(DetailAction::Edit) => edit(app, Some(&detail.client)).await?,
            Some(DetailAction::Delete) => {
                let msg = format!("Delete {}?", detail.client.name);
                if prompt::confirm(&msg, Some("This cannot be undone"))? {
                    match app.clients.delete(id).await {
                        Ok(()) => {
                            notify::success("Client deleted");
                            return Ok(None);
                        }
                        Err(e) => notify::failure(e, "Failed to delete")?,
                    }
                }
            }
        }
    }
}

pub fn render_detail(d: &ClientDetail, currency: &str) -> String {
    let c = &d.client;
    let mut out = vec![heading(&c.display_name())];
    for (label, value) in [
        ("Email", &c.email),
        ("Phone", &c.phone),
        ("GSTIN", &c.gstin),
        ("Address", &c.address),
    ] {
        if !value.trim().is_empty() {
            out.push(format!("{:<8} {}", label, value));
        }
    }
    if let Some(loc) = c.location() {
        out.push(format!("{:<8} {}", "", loc));
    }
    if !c.notes.trim().is_empty() {
        out.push(format!("{:<8} {}", "Notes", c.notes.trim()));
    }
    out.push(String::new());
    out.push(card("Total invoices", &d.stats.total_invoices.to_string(), None));
    out.push(card("Total paid", &money_with(currency, d.stats.total_paid), None));
    out.push(card("Outstanding", &money_with(currency, d.stats.outstanding), None));

    if !d.invoices.is_empty() {
        out.push(heading("Invoices"));
        let rows: Vec<Vec<String>> = d
            .invoices
            .iter()
            .map(|i| {
                vec![
                    i.invoice_number.clone(),
                    i.status.to_string(),
                    format::date(i.issue_date.as_ref()),
                    money_with(currency, i.total_amount),
                ]
            })
            .collect();
        out.push(table(&["Number", "Status", "Issued", "Total"], &rows));
    }
    out.join("\n")
}

/// Create (`existing = None`) or edit a client. Validation errors re-open the form.
async fn edit(app: &Services, existing: Option<&Client>) -> Result<(), DomainError> {
    let mut form = existing.map(ClientForm::from).unwrap_or_default();
    loop {
        if !fill(&mut form)? {
            return Ok(());
        }
        let id = existing.map(|c| c.id.as_str());
        match with_spinner("Saving…", app.clients.save(id, form.clone())).await {
            Ok(c) => {
                notify::success(&format!("Saved {}", c.name));
                return Ok(());
            }
            Err(DomainError::Validation(msg)) => notify::error(&msg),
            Err(e) => return notify::failure(e, "Failed to save client"),
        }
    }
}

fn fill(form: &mut ClientForm) -> Result<bool, DomainError> {
    let fields: [(&str, &mut String); 9] = [
        ("Name:", &mut form.name),
        ("Company:", &mut form.company),
        ("Email:", &mut form.email),
        ("Phone:", &mut form.phone),
        ("GSTIN:", &mut form.gstin),
        ("Address:", &mut form.address),
        ("City:", &mut form.city),
        ("State:", &mut form.state),
        ("Notes:", &mut form.notes),
    ];
    for (label, slot) in fields {
        let Some(value) = prompt::text(label, slot.as_str())? else {
            return Ok(false);
        };
        *slot = value;
    }
    let statuses = RecordStatus::ALL
        .iter()
        .map(|s| Labeled::new(s.to_string(), *s))
        .collect();
    let Some(status) = prompt::pick_with("Status:", statuses, &form.status)? else {
        return Ok(false);
    };
    form.status = status;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_detail_shows_stats() {
        let d = ClientDetail {
            client: Client {
                id: "c1".into(),
                name: "Asha".into(),
                company: "Asha Traders".into(),
                city: "Pune".into(),
                ..Client::default()
            },
            invoices: vec![],
            stats: crate::domain::aggregates::ClientStats {
                total_invoices: 4,
                total_paid: dec!(150000),
                outstanding: dec!(2500),
            },
        };
        let out = render_detail(&d, "₹");
        assert!(out.contains("Asha · Asha Traders"));
        assert!(out.contains("Pune"));
        assert!(out.contains("₹1,50,000"));
        assert!(out.contains("₹2,500"));
    }
}
