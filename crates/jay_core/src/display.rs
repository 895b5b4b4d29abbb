//! Plain-text rendering for reports and error tables.

use crate::model::container::Container;
use crate::model::item::Item;
use crate::model::listing::CatalogueRow;
use chrono::DateTime;
use unicode_width::UnicodeWidthStr;

/// Placeholder rendered for absent optional values.
pub const EMPTY_CELL: &str = "-";

pub fn format_optional(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

/// Formats an epoch-millisecond timestamp as UTC `YYYY-MM-DD HH:MM:SS`.
pub fn format_epoch_ms(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}

/// Renders a bordered table with one line per row.
///
/// Column widths use display width, so wide glyphs stay aligned.
pub fn render_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| header.width())
        .collect::<Vec<_>>();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(widths.len()) {
            widths[index] = widths[index].max(cell.as_ref().width());
        }
    }

    let border = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{border}+");

    let mut lines = vec![border.clone(), render_line(headers, &widths), border.clone()];
    for row in rows {
        lines.push(render_line(row, &widths));
    }
    lines.push(border);
    lines.join("\n")
}

fn render_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let rendered = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = cells.get(index).map(AsRef::as_ref).unwrap_or("");
            format!(" {cell}{} ", " ".repeat(width.saturating_sub(cell.width())))
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("|{rendered}|")
}

pub fn render_catalogue(rows: &[CatalogueRow]) -> String {
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                row.kind.to_string(),
                row.id.to_string(),
                row.name.clone(),
                format_optional(row.description.as_deref()),
                format_optional(row.category.as_deref()),
                format_epoch_ms(row.created_at),
            ]
        })
        .collect::<Vec<_>>();
    render_table(
        &["kind", "id", "name", "description", "type", "created"],
        &cells,
    )
}

pub fn render_containers(containers: &[Container]) -> String {
    let cells = containers
        .iter()
        .map(|container| {
            vec![
                container.id.to_string(),
                container.name.clone(),
                format_optional(container.description.as_deref()),
                container.category.clone(),
                format_epoch_ms(container.created_at),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["id", "name", "description", "type", "created"], &cells)
}

pub fn render_items(items: &[Item]) -> String {
    let cells = items
        .iter()
        .map(|item| {
            vec![
                item.id.to_string(),
                item.name.clone(),
                item.quantity.to_string(),
                format_optional(item.description.as_deref()),
                format_optional(item.category.as_deref()),
                item.status.clone(),
                item.location.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(
        &["id", "name", "qty", "description", "type", "status", "location"],
        &cells,
    )
}
