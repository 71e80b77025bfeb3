//! Products & services catalog.

use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::prompt::{self, Labeled};
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::{heading, table};
use crate::domain::format::{self, money_with};
use crate::domain::forms::ProductForm;
use crate::domain::{DomainError, Product, ProductCategory, ProductType, RecordStatus};

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Open(String),
    Filter,
    Search,
    New,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RowAction {
    Edit,
    Delete,
}

pub async fn run(app: &Services) -> Result<(), DomainError> {
    let mut search: Option<String> = None;
    let mut kind: Option<ProductType> = None;
    loop {
        let page = match with_spinner(
            "Loading catalog…",
            app.products.list(search.as_deref(), kind),
        )
        .await
        {
            Ok(p) => p,
            Err(e) => return notify::failure(e, "Failed to load catalog"),
        };
        let currency = app.session.currency().await;
        let filter = kind.map(|k| k.to_string()).unwrap_or_else(|| "All".into());
        println!("{}", heading(&format!("Products & services · {} ({})", filter, page.count())));
        println!("{}", list_table(&page.data, &currency));

        let mut options = vec![
            Labeled::new("+ New item", Entry::New),
            Labeled::new(format!("Type: {}", filter), Entry::Filter),
            Labeled::new("Search", Entry::Search),
        ];
        options.extend(
            page.data
                .iter()
                .map(|p| Labeled::new(p.name.clone(), Entry::Open(p.id.clone()))),
        );
        match prompt::pick("Catalog", options)? {
            None => return Ok(()),
            Some(Entry::New) => edit(app, None).await?,
            Some(Entry::Filter) => {
                let mut kinds = vec![Labeled::new("All", None)];
                kinds.extend(
                    ProductType::ALL
                        .iter()
                        .map(|k| Labeled::new(k.to_string(), Some(*k))),
                );
                if let Some(k) = prompt::pick_with("Type", kinds, &kind)? {
                    kind = k;
                }
            }
            Some(Entry::Search) => {
                if let Some(q) = prompt::text("Search:", search.as_deref().unwrap_or(""))? {
                    search = Some(q).filter(|q| !q.trim().is_empty());
                }
            }
            Some(Entry::Open(id)) => {
                let Some(product) = page.data.iter().find(|p| p.id == id) else {
                    continue;
                };
                let actions = vec![
                    Labeled::new("Edit", RowAction::Edit),
                    Labeled::new("Delete", RowAction::Delete),
                ];
                match prompt::pick(&product.name, actions)? {
                    Some(RowAction::Edit) => edit(app, Some(product)).await?,
                    Some(RowAction::Delete) => {
                        let msg = format!("Delete {}?", product.name);
                        if prompt::confirm(&msg, None)? {
                            match app.products.delete(&id).await {
                                Ok(()) => notify::success("Deleted"),
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

fn list_table(products: &[Product], currency: &str) -> String {
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            let stock = if p.track_stock {
                p.stock.to_string()
            } else {
                format::DASH.to_string()
            };
            vec![
                p.name.clone(),
                p.kind.to_string(),
                p.category.to_string(),
                format!("{}/{}", money_with(currency, p.rate), p.unit),
                format!("{}%", p.tax_rate.normalize()),
                stock,
                p.status.to_string(),
            ]
        })
        .collect();
    table(
        &["Name", "Type", "Category", "Rate", "Tax", "Stock", "Status"],
        &rows,
    )
}

async fn edit(app: &Services, existing: Option<&Product>) -> Result<(), DomainError> {
    let mut form = existing.map(ProductForm::from).unwrap_or_default();
    loop {
        if !fill(&mut form)? {
            return Ok(());
        }
        let id = existing.map(|p| p.id.as_str());
        match with_spinner("Saving…", app.products.save(id, form.clone())).await {
            Ok(p) => {
                notify::success(&format!("Saved {}", p.name));
                return Ok(());
            }
            Err(DomainError::Validation(msg)) => notify::error(&msg),
            Err(e) => return notify::failure(e, "Failed to save"),
        }
    }
}

fn fill(form: &mut ProductForm) -> Result<bool, DomainError> {
    let Some(name) = prompt::text("Name:", &form.name)? else {
        return Ok(false);
    };
    form.name = name;
    let kinds = ProductType::ALL
        .iter()
        .map(|k| Labeled::new(k.to_string(), *k))
        .collect();
    let Some(kind) = prompt::pick_with("Type:", kinds, &form.kind)? else {
        return Ok(false);
    };
    form.kind = kind;
    let categories = ProductCategory::ALL
        .iter()
        .map(|c| Labeled::new(c.to_string(), *c))
        .collect();
    let Some(category) = prompt::pick_with("Category:", categories, &form.category)? else {
        return Ok(false);
    };
    form.category = category;
    let Some(rate) = prompt::amount("Rate:", form.rate)? else {
        return Ok(false);
    };
    form.rate = rate;
    let Some(unit) = prompt::text("Unit:", &form.unit)? else {
        return Ok(false);
    };
    form.unit = unit;
    let Some(tax) = prompt::amount("Tax %:", Some(form.tax_rate))? else {
        return Ok(false);
    };
    form.tax_rate = tax.unwrap_or_default();
    let Some(sku) = prompt::text("SKU:", &form.sku)? else {
        return Ok(false);
    };
    form.sku = sku;
    let Some(description) = prompt::text("Description:", &form.description)? else {
        return Ok(false);
    };
    form.description = description;
    let statuses = RecordStatus::ALL
        .iter()
        .map(|s| Labeled::new(s.to_string(), *s))
        .collect();
    let Some(status) = prompt::pick_with("Status:", statuses, &form.status)? else {
        return Ok(false);
    };
    form.status = status;
    let Some(track) = prompt::toggle("Track stock?", form.track_stock)? else {
        return Ok(false);
    };
    form.track_stock = track;
    if form.track_stock {
        let Some(stock) = prompt::number("Stock:", form.stock)? else {
            return Ok(false);
        };
        form.stock = stock;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_table_shows_rate_per_unit() {
        let p = Product {
            id: "p1".into(),
            name: "Hosting".into(),
            rate: dec!(1500),
            unit: "month".into(),
            ..Product::default()
        };
        let out = list_table(&[p], "₹");
        assert!(out.contains("₹1,500/month"));
        assert!(out.contains("Hosting"));
    }
}
