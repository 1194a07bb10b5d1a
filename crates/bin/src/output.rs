//! Output formatting helpers for human-readable and JSON output.

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { OutputFormat::Json } else { OutputFormat::Human }
    }

    /// Print a JSON value, pretty for humans and compact otherwise.
    pub fn print_value(self, value: &serde_json::Value) -> serde_json::Result<()> {
        let text = match self {
            OutputFormat::Human => serde_json::to_string_pretty(value)?,
            OutputFormat::Json => serde_json::to_string(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Widest a table cell may get before it is shortened.
pub const MAX_CELL_WIDTH: usize = 60;

/// Print `rows` under `headers` as left-aligned columns.
///
/// Cells longer than [`MAX_CELL_WIDTH`] keep their tail, since the end of a
/// path is what tells entries apart.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in render_table(headers, rows, MAX_CELL_WIDTH) {
        println!("{line}");
    }
}

fn render_table(headers: &[&str], rows: &[Vec<String>], max_width: usize) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    let cells: Vec<Vec<String>> = std::iter::once(headers.iter().map(|h| h.to_string()).collect::<Vec<_>>())
        .chain(
            rows.iter()
                .map(|row| row.iter().map(|cell| shorten_front(cell, max_width)).collect()),
        )
        .collect();

    let mut widths = vec![0; headers.len()];
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    cells
        .iter()
        .map(|row| {
            let padded: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            padded.join("  ").trim_end().to_string()
        })
        .collect()
}

fn shorten_front(cell: &str, max_width: usize) -> String {
    let len = cell.chars().count();
    if len <= max_width || max_width == 0 {
        return cell.to_string();
    }
    let tail: String = cell.chars().skip(len - (max_width - 1)).collect();
    format!("…{tail}")
}
