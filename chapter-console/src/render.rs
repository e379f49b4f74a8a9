//! Plain-text rendering of a page.
//!
//! The toolbar goes first (search box, filter pickers with counts, the reset
//! action, the column menu), then the grid and a pagination footer. Sticky
//! columns are separated from the scrolling ones by a double bar.

use std::fmt::Write;

use chapter_table::RenderedTable;
use chapter_table::RowState;
use chapter_table::SortDirection;
use chapter_table::ToolbarModel;
use chapter_table::truncate;
use unicode_width::UnicodeWidthStr;

/// Widest a grid column may get before its cells are truncated.
pub const MAX_CELL_WIDTH: usize = 32;

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads `s` with spaces up to `width` display columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(display_width(s))));
    out
}

pub fn render_toolbar(model: &ToolbarModel) -> String {
    let mut out = String::new();
    if let Some(search) = &model.search {
        let query = if search.query.is_empty() {
            search.placeholder.as_str()
        } else {
            search.query.as_str()
        };
        let _ = writeln!(out, "Search: {query}");
    }

    for picker in &model.pickers {
        let options: Vec<String> = picker
            .options
            .iter()
            .map(|option| {
                let mark = if option.selected { "x" } else { " " };
                format!("[{mark}] {} ({})", option.label, option.count)
            })
            .collect();
        let selected = picker.selected_count();
        if selected > 0 {
            let _ = writeln!(out, "{} ({selected} selected): {}", picker.label, options.join("  "));
        } else {
            let _ = writeln!(out, "{}: {}", picker.label, options.join("  "));
        }
    }

    if model.reset_enabled {
        out.push_str("[Reset]\n");
    }

    let columns: Vec<String> = model
        .visibility_menu
        .iter()
        .map(|item| format!("[{}] {}", if item.shown { "x" } else { " " }, item.header))
        .collect();
    if !columns.is_empty() {
        let _ = writeln!(out, "Columns: {}", columns.join("  "));
    }
    out
}

pub fn render_grid(table: &RenderedTable) -> String {
    let labels: Vec<String> = table
        .headers
        .iter()
        .map(|header| match header.sort {
            Some(SortDirection::Ascending) => format!("{} ^", header.label),
            Some(SortDirection::Descending) => format!("{} v", header.label),
            None => header.label.clone(),
        })
        .collect();

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| truncate(&cell.text, MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            rows.iter()
                .map(|cells| display_width(&cells[i]))
                .chain(std::iter::once(display_width(label)))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let sticky = table.headers.iter().filter(|h| h.sticky).count();

    let line = |marker: &str, cells: &[String]| {
        let mut out = String::from(marker);
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                out.push_str(if i == sticky { " || " } else { " | " });
            }
            out.push_str(&pad_to_width(cell, widths[i]));
        }
        out.trim_end().to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line("  ", &labels));
    let total: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1) + 2;
    let _ = writeln!(out, "{}", "-".repeat(total));
    for (row, cells) in table.rows.iter().zip(&rows) {
        let marker = match row.state {
            _ if row.clicked => "> ",
            RowState::Hovered => "~ ",
            RowState::Clicked | RowState::Selected | RowState::Idle => "  ",
        };
        let _ = writeln!(out, "{}", line(marker, cells));
    }
    if table.rows.is_empty() {
        out.push_str("  No results.\n");
    }

    if table.page_count > 1 {
        let _ = writeln!(
            out,
            "Page {} of {} ({} of {} rows)",
            table.page + 1,
            table.page_count,
            table.filtered_count,
            table.total_count
        );
    } else {
        let _ = writeln!(out, "{} of {} rows", table.filtered_count, table.total_count);
    }
    out
}

/// Heading, toolbar and grid of one table.
pub fn render_page(heading: &str, toolbar: &ToolbarModel, table: &RenderedTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{heading} ({})", toolbar.title);
    out.push_str(&render_toolbar(toolbar));
    out.push('\n');
    out.push_str(&render_grid(table));
    out
}

#[cfg(test)]
mod tests {
    use chapter_lib::model::Record;
    use chapter_table::ColumnDefinition;
    use chapter_table::TableOptions;
    use chapter_table::TableView;
    use chapter_table::register;

    use super::*;

    fn view() -> TableView {
        let columns = register(vec![
            ColumnDefinition::new("companyName", "Company"),
            ColumnDefinition::new("industry", "Industry"),
        ])
        .unwrap();
        let mut view = TableView::new(
            columns,
            vec![],
            TableOptions::new().row_selection(true).sticky_columns(2),
        )
        .unwrap();
        view.set_records(vec![
            Record::new("1").set("companyName", "Zürich Labs").set("industry", "Fintech"),
            Record::new("2").set("companyName", "Acme").set("industry", "Retail"),
        ]);
        view
    }

    #[test]
    fn test_pad_counts_display_width() {
        assert_eq!(pad_to_width("Zürich", 8), "Zürich  ");
        assert_eq!(pad_to_width("longer than", 3), "longer than");
    }

    #[test]
    fn test_grid_marks_sticky_boundary_and_selection() {
        let mut view = view();
        view.select_row("2");
        let grid = render_grid(&view.render());
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines[0], "      | Company     || Industry");
        assert_eq!(lines[3], "  [x] | Acme        || Retail");
        assert_eq!(lines[4], "2 of 2 rows");
    }

    #[test]
    fn test_selected_row_keeps_clicked_marker() {
        let mut view = view();
        view.select_row("1");
        view.click_cell("1", "industry").unwrap();
        let table = view.render();
        assert_eq!(table.rows[0].state, RowState::Selected);
        assert!(table.rows[0].clicked);

        let grid = render_grid(&table);
        assert!(grid.lines().nth(2).unwrap().starts_with("> [x]"));
    }

    #[test]
    fn test_clicked_row_marker() {
        let mut view = view();
        view.click_cell("1", "industry").unwrap();
        let grid = render_grid(&view.render());
        assert!(grid.lines().nth(2).unwrap().starts_with("> [ ]"));
    }
}
