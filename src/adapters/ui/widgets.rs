//! Text widgets: bars, stat cards, aligned tables.

use crossterm::style::Stylize;

/// Column width in characters. `₹` and `—` are one column wide.
fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Horizontal bar for a percentage in [0, 100]; out-of-range values are clamped.
pub fn bar(percent: f64, width: usize) -> String {
    let pct = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// `Label  value  (note)` line used for the summary cards.
pub fn card(label: &str, value: &str, note: Option<&str>) -> String {
    match note {
        Some(n) => format!("{:<18} {}  {}", label, value.bold(), n.dark_grey()),
        None => format!("{:<18} {}", label, value.bold()),
    }
}

pub fn heading(text: &str) -> String {
    format!("\n{}\n", text.bold().underlined())
}

/// Left-aligned columns padded to the widest cell. Cells may contain multi-byte glyphs.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(display_width(cell));
            }
        }
    }
    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{}{}", c, " ".repeat(w - display_width(c))))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let mut out = render(headers.to_vec());
    out.push('\n');
    out.push_str(&"─".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in rows {
        out.push('\n');
        out.push_str(&render(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_clamps() {
        assert_eq!(bar(50.0, 4), "██░░");
        assert_eq!(bar(250.0, 4), "████");
        assert_eq!(bar(-3.0, 2), "░░");
        assert_eq!(bar(f64::NAN, 2), "░░");
    }

    #[test]
    fn test_table_aligns_rupee_cells() {
        let rows = vec![
            vec!["INV-1".to_string(), "₹1,200".to_string()],
            vec!["INV-10".to_string(), "₹30".to_string()],
        ];
        let out = table(&["Number", "Total"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Number  Total");
        assert_eq!(lines[2], "INV-1   ₹1,200");
        assert_eq!(lines[3], "INV-10  ₹30");
    }
}
