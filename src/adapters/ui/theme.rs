//! Colours: brand gradient, status badges, and the inquire render config.

use crate::domain::InvoiceStatus;
use crossterm::style::{Color, Stylize};
use inquire::ui::{Attributes, Color as PromptColor, RenderConfig, StyleSheet, Styled};

/// Saffron (#ff9933).
pub const BRAND_START: (u8, u8, u8) = (0xff, 0x99, 0x33);
/// Leaf green (#138808).
pub const BRAND_END: (u8, u8, u8) = (0x13, 0x88, 0x08);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
pub fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

pub fn status_color(status: InvoiceStatus) -> Color {
    match status {
        InvoiceStatus::Draft => Color::Grey,
        InvoiceStatus::Sent => Color::Blue,
        InvoiceStatus::Pending => Color::Yellow,
        InvoiceStatus::Paid => Color::Green,
        InvoiceStatus::Overdue => Color::Red,
        InvoiceStatus::Cancelled | InvoiceStatus::Unknown => Color::DarkGrey,
    }
}

/// Coloured status label, e.g. `Paid` in green.
pub fn badge(status: InvoiceStatus) -> String {
    status.to_string().with(status_color(status)).bold().to_string()
}

/// Render config for every inquire prompt. Call once at startup.
pub fn apply_theme() {
    let accent = PromptColor::Rgb {
        r: BRAND_START.0,
        g: BRAND_START.1,
        b: BRAND_START.2,
    };
    let answer = PromptColor::Rgb {
        r: BRAND_END.0,
        g: BRAND_END.1,
        b: BRAND_END.2,
    };
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("›").with_fg(accent))
        .with_highlighted_option_prefix(Styled::new("▸").with_fg(accent))
        .with_answered_prompt_prefix(Styled::new("✓").with_fg(answer))
        .with_selected_option(Some(StyleSheet::new().with_fg(accent)))
        .with_answer(
            StyleSheet::new()
                .with_fg(answer)
                .with_attr(Attributes::BOLD),
        )
        .with_help_message(StyleSheet::new().with_fg(PromptColor::DarkGrey));
    inquire::set_global_render_config(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(BRAND_START, BRAND_END, 0.0), BRAND_START);
        assert_eq!(lerp_rgb(BRAND_START, BRAND_END, 1.0), BRAND_END);
        assert_eq!(lerp_rgb(BRAND_START, BRAND_END, 7.0), BRAND_END);
    }

    #[test]
    fn test_badge_contains_label() {
        assert!(badge(InvoiceStatus::Overdue).contains("Overdue"));
    }
}
