//! Account settings: profile, business, invoice defaults, notifications, password.

use crate::adapters::ui::notify;
use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::prompt::{self, Labeled};
use crate::adapters::ui::tui::Services;
use crate::adapters::ui::widgets::heading;
use crate::domain::forms::PasswordChange;
use crate::domain::{DomainError, NotificationKey, User};
use inquire::{Password, PasswordDisplayMode};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Profile,
    Business,
    Invoice,
    Notifications,
    Password,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Profile,
        Section::Business,
        Section::Invoice,
        Section::Notifications,
        Section::Password,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Business => "Business",
            Self::Invoice => "Invoice settings",
            Self::Notifications => "Notifications",
            Self::Password => "Change password",
        }
    }
}

pub async fn run(app: &Services) -> Result<(), DomainError> {
    loop {
        let Some(user) = app.session.current_user().await else {
            return Err(DomainError::session_expired());
        };
        println!("{}", render(&user));
        let options = Section::ALL
            .iter()
            .map(|s| Labeled::new(s.label(), *s))
            .collect();
        let Some(section) = prompt::pick("Settings", options)? else {
            return Ok(());
        };
        match section {
            Section::Profile => profile(app, &user).await?,
            Section::Business => business(app, &user).await?,
            Section::Invoice => invoice(app, &user).await?,
            Section::Notifications => notifications(app).await?,
            Section::Password => password(app).await?,
        }
    }
}

pub fn render(user: &User) -> String {
    let s = &user.invoice_settings;
    let b = &user.business;
    let mut out = vec![heading(&format!("{} ({})", user.name, user.initials()))];
    out.push(format!("Email      {}", user.email));
    if !user.phone.is_empty() {
        out.push(format!("Phone      {}", user.phone));
    }
    if !b.name.is_empty() {
        out.push(format!("Business   {}", b.name));
    }
    if !b.gstin.is_empty() {
        out.push(format!("GSTIN      {}", b.gstin));
    }
    out.push(format!(
        "Invoices   prefix {}, due in {} days, tax {}%, currency {}",
        s.prefix,
        s.default_due_days,
        s.default_tax_rate.normalize(),
        s.currency_symbol
    ));
    out.join("\n")
}

async fn save<F>(fut: F, fallback: &str) -> Result<(), DomainError>
where
    F: std::future::Future<Output = Result<User, DomainError>>,
{
    match with_spinner("Saving…", fut).await {
        Ok(_) => {
            notify::success("Settings saved");
            Ok(())
        }
        Err(e) => notify::failure(e, fallback),
    }
}

async fn profile(app: &Services, user: &User) -> Result<(), DomainError> {
    let Some(name) = prompt::text("Name:", &user.name)? else {
        return Ok(());
    };
    let Some(email) = prompt::text("Email:", &user.email)? else {
        return Ok(());
    };
    let Some(phone) = prompt::text("Phone:", &user.phone)? else {
        return Ok(());
    };
    save(
        app.settings.save_profile(name, email, phone),
        "Failed to save profile",
    )
    .await
}

async fn business(app: &Services, user: &User) -> Result<(), DomainError> {
    let mut b = user.business.clone();
    let fields: [(&str, &mut String); 6] = [
        ("Business name:", &mut b.name),
        ("Address:", &mut b.address),
        ("City:", &mut b.city),
        ("State:", &mut b.state),
        ("Pincode:", &mut b.pincode),
        ("GSTIN:", &mut b.gstin),
    ];
    for (label, slot) in fields {
        let Some(value) = prompt::text(label, slot.as_str())? else {
            return Ok(());
        };
        *slot = value;
    }
    save(app.settings.save_business(b), "Failed to save business").await
}

async fn invoice(app: &Services, user: &User) -> Result<(), DomainError> {
    let mut s = user.invoice_settings.clone();
    let Some(prefix) = prompt::text("Invoice prefix:", &s.prefix)? else {
        return Ok(());
    };
    s.prefix = prefix;
    let Some(days) = prompt::number("Default due days:", s.default_due_days)? else {
        return Ok(());
    };
    s.default_due_days = days;
    let Some(tax) = prompt::amount("Default tax %:", Some(s.default_tax_rate))? else {
        return Ok(());
    };
    s.default_tax_rate = tax.unwrap_or_default();
    let Some(notes) = prompt::text("Default notes:", &s.default_notes)? else {
        return Ok(());
    };
    s.default_notes = notes;
    let Some(symbol) = prompt::text("Currency symbol:", &s.currency_symbol)? else {
        return Ok(());
    };
    s.currency_symbol = symbol;
    save(
        app.settings.save_invoice_settings(s),
        "Failed to save invoice settings",
    )
    .await
}

/// Each toggle is saved as soon as it is flipped.
async fn notifications(app: &Services) -> Result<(), DomainError> {
    loop {
        let Some(user) = app.session.current_user().await else {
            return Err(DomainError::session_expired());
        };
        let prefs = user.notifications;
        let options = NotificationKey::ALL
            .iter()
            .map(|k| {
                let mark = if prefs.get(*k) { "[x]" } else { "[ ]" };
                Labeled::new(format!("{} {} · {}", mark, k.label(), k.description()), *k)
            })
            .collect();
        let Some(key) = prompt::pick("Toggle", options)? else {
            return Ok(());
        };
        if let Err(e) = app.settings.toggle_notification(key).await {
            notify::failure(e, "Failed to update")?;
        }
    }
}

async fn password(app: &Services) -> Result<(), DomainError> {
    let ask = |msg: &str| {
        prompt::skippable(
            Password::new(msg)
                .without_confirmation()
                .with_display_mode(PasswordDisplayMode::Masked)
                .prompt_skippable(),
        )
    };
    let Some(current_password) = ask("Current password:")? else {
        return Ok(());
    };
    let Some(new_password) = ask("New password:")? else {
        return Ok(());
    };
    let Some(confirm_password) = ask("Confirm new password:")? else {
        return Ok(());
    };
    let change = PasswordChange {
        current_password,
        new_password,
        confirm_password,
    };
    match with_spinner("Updating…", app.settings.change_password(&change)).await {
        Ok(message) => {
            notify::success(message.as_deref().unwrap_or("Password updated"));
            Ok(())
        }
        Err(e) => notify::failure(e, "Failed to change password"),
    }
}
