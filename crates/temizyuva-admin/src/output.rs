//! Rendering command results on stdout

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for people
    #[default]
    Table,
    /// Pretty-printed JSON for scripts
    Json,
}

/// Plain aligned text table
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    footer: Option<String>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            footer: None,
        }
    }

    /// Key/value table with one row per field
    pub fn fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(["FIELD", "VALUE"]);
        for (key, value) in pairs {
            table.push([key.into(), value.into()]);
        }
        table
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Line printed under the rows
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let line = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let mut out = String::new();
            for (cell, width) in cells.iter().zip(&widths) {
                if !out.is_empty() {
                    out.push_str("  ");
                }
                out.push_str(cell);
                out.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.chars().count())));
            }
            writeln!(f, "{}", out.trim_end())
        };

        line(f, &self.headers)?;
        for row in &self.rows {
            line(f, row)?;
        }
        if let Some(footer) = &self.footer {
            writeln!(f, "\n{footer}")?;
        }
        Ok(())
    }
}

/// Print `value` as JSON, or as the table built from it
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn emit<T, F>(format: OutputFormat, value: &T, table: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> Table,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let table = table(value);
            if table.is_empty() {
                println!("No records.");
            } else {
                print!("{table}");
            }
        }
    }
    Ok(())
}

/// Print a confirmation line, or `{"ok": true, ...}` in JSON mode
///
/// # Errors
///
/// Returns an error if the JSON cannot be serialized.
pub fn done(format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "ok": true, "message": message }))?
        ),
        OutputFormat::Table => println!("{message}"),
    }
    Ok(())
}

/// Money with two decimals and the lira sign
pub fn money(amount: f64) -> String {
    format!("{amount:.2} ₺")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn date_time(value: chrono::DateTime<chrono::Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten `text` to `max` characters, marking the cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_aligns_columns() {
        let mut table = Table::new(["ID", "NAME", "STATUS"]);
        table.push(["1", "Şükrü Öztürk", "Approved"]);
        table.push(["12", "Ali", "Pending"]);

        assert_eq!(
            table.to_string(),
            "ID  NAME          STATUS\n1   Şükrü Öztürk  Approved\n12  Ali           Pending\n"
        );
    }

    #[test]
    fn test_field_table() {
        let table = Table::fields([("Email", "admin@temizyuva.com"), ("Role", "Admin")]);
        assert_eq!(
            table.to_string(),
            "FIELD  VALUE\nEmail  admin@temizyuva.com\nRole   Admin\n"
        );
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Çamaşır yıkama", 7), "Çamaşı…");
        assert_eq!(truncate("kısa", 10), "kısa");
        assert_eq!(money(1500.0), "1500.00 ₺");
    }
}
