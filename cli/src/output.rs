//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Result<Self, String> {
        <Self as ValueEnum>::from_str(name, true)
    }

    /// Print a list: a table of `to_row` rows, or the items themselves as json/yaml
    pub fn print_list<T, R>(&self, items: &[T], to_row: impl Fn(&T) -> R)
    where
        T: Serialize,
        R: Tabled,
    {
        match self {
            OutputFormat::Table => {
                if items.is_empty() {
                    println!("No results.");
                    return;
                }
                let rows: Vec<R> = items.iter().map(to_row).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
            _ => self.print(&items),
        }
    }

    /// Print one value; tables fall back to the `summary` line
    pub fn print_value<T: Serialize>(&self, data: &T, summary: impl std::fmt::Display) {
        match self {
            OutputFormat::Table => println!("{}", summary),
            _ => self.print(data),
        }
    }

    fn print<T: Serialize + ?Sized>(&self, data: &T) {
        let rendered = match self {
            OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
            _ => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
        };
        match rendered {
            Ok(text) => println!("{}", text.trim_end()),
            Err(e) => tracing::error!(error = %e, "Failed to render output"),
        }
    }
}

/// `1234567` as `1,234,567`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shorten long text for table cells
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}
