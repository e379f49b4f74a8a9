//! Row sorting.

use std::cmp::Ordering;

use chapter_lib::model::Record;
use chapter_lib::model::Value;

use crate::column::ColumnDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Next state when the header of `column_id` is activated: ascending, then
/// descending, then unsorted. Another column starts over at ascending.
pub fn next_sort(current: Option<&SortState>, column_id: &str) -> Option<SortState> {
    let direction = match current {
        Some(state) if state.column_id == column_id => match state.direction {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => return None,
        },
        _ => SortDirection::Ascending,
    };
    Some(SortState {
        column_id: column_id.to_string(),
        direction,
    })
}

/// Stable sort of rows by one column. Missing and null values stay last in
/// both directions.
pub fn sort_rows(rows: &mut [&Record], column: &ColumnDefinition, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let a = column.value(a).filter(|v| !v.is_null());
        let b = column.value(b).filter(|v| !v.is_null());
        compare(column, a, b, direction)
    });
}

fn compare(
    column: &ColumnDefinition,
    a: Option<&Value>,
    b: Option<&Value>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = column.compare_present(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}
