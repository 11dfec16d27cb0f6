use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Labelled identity fields with the values lined up in one column.
///
/// Empty values render as `-`; empty lists are skipped entirely.
#[derive(Debug, Default)]
pub struct Fields {
    rows: Vec<Option<(String, String)>>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, label: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        let value = if value.is_empty() { "-".to_string() } else { value };
        self.rows.push(Some((format!("{label}:"), value)));
        self
    }

    pub fn list(&mut self, label: &str, items: &[String]) -> &mut Self {
        if !items.is_empty() {
            self.field(label, items.join(", "));
        }
        self
    }

    /// Blank line between groups.
    pub fn gap(&mut self) -> &mut Self {
        self.rows.push(None);
        self
    }

    pub fn render(&self) -> String {
        let width = self
            .rows
            .iter()
            .flatten()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for row in &self.rows {
            if let Some((label, value)) = row {
                out.push_str(&format!("{label:width$}  {value}"));
            }
            out.push('\n');
        }
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}
