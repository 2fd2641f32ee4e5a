//! Table rendering: headers + rows in, display structure out.

use core::fmt;

use serde_json::Value;

/// One rendered row: the display text of each cell, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

/// A rendered table: exactly one header row plus one body row per input row.
///
/// Header and body widths are not checked against each other; callers keep
/// them in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: TableRow,
    pub body: Vec<TableRow>,
}

/// Build a [`Table`] from column headers and rows of JSON values.
pub fn render_table<H, R>(headers: &[H], rows: R) -> Table
where
    H: AsRef<str>,
    R: IntoIterator<Item = Vec<Value>>,
{
    let header = TableRow {
        cells: headers.iter().map(|h| h.as_ref().to_string()).collect(),
    };
    let body = rows
        .into_iter()
        .map(|row| TableRow {
            cells: row.iter().map(cell_text).collect(),
        })
        .collect();

    Table { header, body }
}

/// Display text of a single cell.
///
/// A record carrying a `name` field shows that name; everything else shows
/// its textual form.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("name") {
            Some(name) => cell_text(name),
            None => value.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in std::iter::once(&self.header).chain(self.body.iter()) {
            for (i, cell) in row.cells.iter().enumerate() {
                let w = cell.chars().count();
                match widths.get_mut(i) {
                    Some(existing) => *existing = (*existing).max(w),
                    None => widths.push(w),
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();

        let write_row = |f: &mut fmt::Formatter<'_>, row: &TableRow| -> fmt::Result {
            let line = row
                .cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{}", line.trim_end())
        };

        write_row(f, &self.header)?;
        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        writeln!(f, "{rule}")?;
        for row in &self.body {
            write_row(f, row)?;
        }
        Ok(())
    }
}
