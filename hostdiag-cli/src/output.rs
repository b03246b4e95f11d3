//! Plain-text rendering of view tables.

use hostdiag::view::Table;

const COLUMN_GAP: &str = "  ";

/// Formats a table as aligned columns under an underlined title.
pub fn format_table(table: &Table) -> String {
    let widths = column_widths(table);
    let mut out = String::new();

    out.push_str(&table.title);
    out.push('\n');
    out.push_str(&"=".repeat(table.title.chars().count()));
    out.push('\n');

    if table.is_empty() {
        out.push_str("(none)\n");
        return out;
    }

    push_row(&mut out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &table.rows {
        push_row(&mut out, row, &widths);
    }
    out
}

pub fn print_table(table: &Table) {
    println!("{}", format_table(table));
}

fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }
    widths
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(line.join(COLUMN_GAP).trim_end());
    out.push('\n');
}
