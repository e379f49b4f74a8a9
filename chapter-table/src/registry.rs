//! Column registration.

use std::collections::HashMap;

use log::debug;

use crate::column::ColumnDefinition;
use crate::error::Result;
use crate::error::TableError;

/// Id of the synthetic checkbox column prepended when row selection is on.
pub const SELECT_COLUMN_ID: &str = "select";

/// Registers columns in declaration order, rejecting duplicate ids.
pub fn register(columns: Vec<ColumnDefinition>) -> Result<OrderedColumns> {
    let mut index = HashMap::with_capacity(columns.len());
    for (position, column) in columns.iter().enumerate() {
        if index.insert(column.id().to_string(), position).is_some() {
            return Err(TableError::DuplicateColumnId(column.id().to_string()));
        }
    }
    debug!("Registered {} columns", columns.len());
    Ok(OrderedColumns { columns, index })
}

/// Builder for a base column list followed by generated columns.
///
/// # Example
///
/// ```
/// use chapter_table::{ColumnDefinition, ColumnSet};
///
/// let columns = ColumnSet::new(vec![ColumnDefinition::new("date", "Date")])
///     .append(vec![ColumnDefinition::new("inputQuality", "Input Quality")])
///     .register()
///     .unwrap();
///
/// assert_eq!(columns.ids(), vec!["date", "inputQuality"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<ColumnDefinition>,
}

impl ColumnSet {
    pub fn new(base: Vec<ColumnDefinition>) -> Self {
        Self { columns: base }
    }

    /// Appends columns after everything declared so far.
    pub fn append(mut self, columns: impl IntoIterator<Item = ColumnDefinition>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn register(self) -> Result<OrderedColumns> {
        register(self.columns)
    }
}

/// Registered columns in their stable display order.
#[derive(Debug, Clone, Default)]
pub struct OrderedColumns {
    columns: Vec<ColumnDefinition>,
    index: HashMap<String, usize>,
}

impl OrderedColumns {
    pub fn get(&self, id: &str) -> Option<&ColumnDefinition> {
        self.index.get(id).map(|&i| &self.columns[i])
    }

    /// Like [`get`](Self::get), failing with `UnknownColumn`.
    pub fn require(&self, id: &str) -> Result<&ColumnDefinition> {
        self.get(id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.columns.iter().map(ColumnDefinition::id).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Prepends the synthetic selection column.
    pub(crate) fn with_selection_column(self) -> Result<OrderedColumns> {
        let select = ColumnDefinition::new(SELECT_COLUMN_ID, "")
            .sortable(false)
            .hideable(false);
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(select);
        columns.extend(self.columns);
        register(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_rejected() {
        let result = register(vec![
            ColumnDefinition::new("stage", "Stage"),
            ColumnDefinition::new("date", "Date"),
            ColumnDefinition::new("stage", "Pipeline"),
        ]);
        assert_eq!(result.unwrap_err(), TableError::DuplicateColumnId("stage".to_string()));
    }

    #[test]
    fn test_dynamic_columns_follow_base() {
        let columns = ColumnSet::new(vec![
            ColumnDefinition::new("date", "Date"),
            ColumnDefinition::new("participant", "Participant"),
        ])
        .append(vec![
            ColumnDefinition::new("inputQuality", "Input Quality"),
            ColumnDefinition::new("clarity", "Clarity"),
        ])
        .register()
        .unwrap();

        assert_eq!(columns.ids(), vec!["date", "participant", "inputQuality", "clarity"]);
        assert_eq!(columns.position("clarity"), Some(3));
    }

    #[test]
    fn test_dynamic_column_clashing_with_base() {
        let result = ColumnSet::new(vec![ColumnDefinition::new("stage", "Stage")])
            .append(vec![ColumnDefinition::new("stage", "Stage")])
            .register();
        assert!(matches!(result, Err(TableError::DuplicateColumnId(_))));
    }

    #[test]
    fn test_selection_column_prepended() {
        let columns = register(vec![ColumnDefinition::new("date", "Date")])
            .unwrap()
            .with_selection_column()
            .unwrap();
        assert_eq!(columns.ids(), vec![SELECT_COLUMN_ID, "date"]);
        let select = columns.require(SELECT_COLUMN_ID).unwrap();
        assert!(!select.is_hideable());
        assert!(!select.is_sortable());

        let clash = register(vec![ColumnDefinition::new("select", "Pick")])
            .unwrap()
            .with_selection_column();
        assert!(matches!(clash, Err(TableError::DuplicateColumnId(_))));
    }

    #[test]
    fn test_require_unknown() {
        let columns = register(vec![]).unwrap();
        assert_eq!(
            columns.require("nope").unwrap_err(),
            TableError::UnknownColumn("nope".to_string())
        );
    }
}
