//! Column visibility.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnDefinition;
use crate::error::Result;
use crate::registry::OrderedColumns;

/// Shown/hidden flag per column id. Columns without an entry are shown.
///
/// Serializes as a plain JSON object so hosts can persist it:
///
/// ```
/// use chapter_table::VisibilityState;
///
/// let state = VisibilityState::from_iter([("id", false), ("date", true)]);
/// assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"date":true,"id":false}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityState(BTreeMap<String, bool>);

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column_id: &str) -> Option<bool> {
        self.0.get(column_id).copied()
    }

    pub fn insert(&mut self, column_id: impl Into<String>, shown: bool) {
        self.0.insert(column_id.into(), shown);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, shown)| (id.as_str(), *shown))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for VisibilityState {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Owns the visibility state of one table.
///
/// Non-hideable columns are always shown; hiding them is a no-op. Visibility
/// never touches filter or selection state.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    state: VisibilityState,
}

impl VisibilityController {
    pub fn new(defaults: VisibilityState) -> Self {
        Self { state: defaults }
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    pub fn is_shown(&self, column: &ColumnDefinition) -> bool {
        !column.is_hideable() || self.state.get(column.id()).unwrap_or(true)
    }

    /// Flips a column. Returns whether it is shown afterwards.
    pub fn toggle(&mut self, columns: &OrderedColumns, column_id: &str) -> Result<bool> {
        let column = columns.require(column_id)?;
        let shown = !self.is_shown(column);
        self.set_column(column, shown);
        Ok(self.is_shown(column))
    }

    /// Shows or hides a column. Returns whether it is shown afterwards.
    pub fn set(&mut self, columns: &OrderedColumns, column_id: &str, shown: bool) -> Result<bool> {
        let column = columns.require(column_id)?;
        self.set_column(column, shown);
        Ok(self.is_shown(column))
    }

    /// Lays every entry of `defaults` over the current state and returns the
    /// result. Entries for unknown columns are kept so a persisted state
    /// survives a column being absent for one page load.
    pub fn apply(&mut self, columns: &OrderedColumns, defaults: &VisibilityState) -> VisibilityState {
        for (column_id, shown) in defaults.iter() {
            match columns.get(column_id) {
                Some(column) => self.set_column(column, shown),
                None => self.state.insert(column_id, shown),
            }
        }
        self.state.clone()
    }

    fn set_column(&mut self, column: &ColumnDefinition, shown: bool) {
        if !column.is_hideable() {
            if !shown {
                debug!("Ignoring hide for non-hideable column {}", column.id());
            }
            return;
        }
        self.state.insert(column.id(), shown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::registry::register;

    fn columns() -> OrderedColumns {
        register(vec![
            ColumnDefinition::new("id", "Id").hideable(false),
            ColumnDefinition::new("date", "Date"),
            ColumnDefinition::new("industry", "Industry"),
        ])
        .unwrap()
    }

    #[test]
    fn test_absent_means_shown() {
        let columns = columns();
        let controller = VisibilityController::default();
        assert!(columns.iter().all(|c| controller.is_shown(c)));
    }

    #[test]
    fn test_toggle_hideable() {
        let columns = columns();
        let mut controller = VisibilityController::default();
        assert_eq!(controller.toggle(&columns, "date"), Ok(false));
        assert_eq!(controller.state().get("date"), Some(false));
        assert_eq!(controller.toggle(&columns, "date"), Ok(true));
    }

    #[test]
    fn test_non_hideable_cannot_be_hidden() {
        let columns = columns();
        let mut controller = VisibilityController::default();
        assert_eq!(controller.toggle(&columns, "id"), Ok(true));
        assert_eq!(controller.set(&columns, "id", false), Ok(true));
        assert!(controller.state().get("id").is_none());

        let defaults = VisibilityState::from_iter([("id", false), ("industry", false)]);
        let applied = controller.apply(&columns, &defaults);
        assert_eq!(applied.get("id"), None);
        assert_eq!(applied.get("industry"), Some(false));
        assert!(controller.is_shown(columns.require("id").unwrap()));
    }

    #[test]
    fn test_unknown_column() {
        let columns = columns();
        let mut controller = VisibilityController::default();
        assert_eq!(
            controller.toggle(&columns, "nope"),
            Err(TableError::UnknownColumn("nope".to_string()))
        );
    }

    #[test]
    fn test_apply_overlays_user_overrides() {
        let columns = columns();
        let mut controller =
            VisibilityController::new(VisibilityState::from_iter([("date", true), ("industry", true)]));
        let saved = VisibilityState::from_iter([("industry", false)]);
        let state = controller.apply(&columns, &saved);
        assert_eq!(state.get("date"), Some(true));
        assert_eq!(state.get("industry"), Some(false));
    }
}
