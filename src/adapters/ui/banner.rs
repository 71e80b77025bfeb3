//! Welcome banner: "KANAKKU" in figlet with a saffron-to-green gradient.

use super::theme::{BRAND_END, BRAND_START, lerp_rgb};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "KANAKKU";

/// Figlet art for the title, or the bare title when the font cannot render it.
fn art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|f| f.to_string()))
        .unwrap_or_else(|| TITLE.to_string())
}

/// Prints the banner, then version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let art = art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(BRAND_START, BRAND_END, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: BRAND_END.0,
        g: BRAND_END.1,
        b: BRAND_END.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Invoices, payments and books for small business\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_art_is_multiline() {
        assert!(art().lines().count() > 1);
    }
}
