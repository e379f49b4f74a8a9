//! Row selection.
//!
//! Selection is tracked by row id so it stays stable while records are
//! re-supplied, filtered or sorted.

use std::collections::BTreeSet;
use std::collections::HashSet;

/// Selection mode of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// No selection allowed
    #[default]
    None,
    /// At most one row
    Single,
    /// Checkbox selection of any number of rows
    Multiple,
}

/// Ids added to and removed from the selection by one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// ID-based selection state.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    selected: BTreeSet<String>,
}

impl SelectionController {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Selected ids in sorted order.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Adds a row. In single mode the previous row is replaced.
    pub fn select_row(&mut self, id: &str) -> SelectionChange {
        let mut change = SelectionChange::default();
        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                change.removed = self
                    .selected
                    .iter()
                    .filter(|&i| i != id)
                    .cloned()
                    .collect();
                let was_selected = self.selected.contains(id);
                self.selected.clear();
                self.selected.insert(id.to_string());
                if !was_selected {
                    change.added.push(id.to_string());
                }
            }
            SelectionMode::Multiple => {
                if self.selected.insert(id.to_string()) {
                    change.added.push(id.to_string());
                }
            }
        }
        change
    }

    pub fn deselect_row(&mut self, id: &str) -> SelectionChange {
        let mut change = SelectionChange::default();
        if self.selected.remove(id) {
            change.removed.push(id.to_string());
        }
        change
    }

    pub fn toggle(&mut self, id: &str) -> SelectionChange {
        if self.selected.contains(id) {
            self.deselect_row(id)
        } else {
            self.select_row(id)
        }
    }

    /// Selects every given id. Only meaningful in multiple mode; callers pass
    /// the currently visible rows, never the unfiltered set.
    pub fn select_all<'a>(&mut self, visible_ids: impl IntoIterator<Item = &'a str>) -> SelectionChange {
        let mut change = SelectionChange::default();
        if self.mode != SelectionMode::Multiple {
            return change;
        }
        for id in visible_ids {
            if self.selected.insert(id.to_string()) {
                change.added.push(id.to_string());
            }
        }
        change
    }

    pub fn clear(&mut self) -> SelectionChange {
        SelectionChange {
            added: Vec::new(),
            removed: std::mem::take(&mut self.selected).into_iter().collect(),
        }
    }

    /// Drops every selected id not in `present`.
    pub fn retain(&mut self, present: &HashSet<&str>) -> SelectionChange {
        let removed: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !present.contains(id.as_str()))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        SelectionChange {
            added: Vec::new(),
            removed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_mode_ignores_everything() {
        let mut selection = SelectionController::new(SelectionMode::None);
        assert!(selection.select_row("1").is_empty());
        assert!(selection.select_all(["1", "2"]).is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = SelectionController::new(SelectionMode::Single);
        selection.select_row("1");
        let change = selection.select_row("2");
        assert_eq!(change.added, vec!["2"]);
        assert_eq!(change.removed, vec!["1"]);
        assert_eq!(selection.len(), 1);
        assert!(selection.select_row("2").is_empty());
    }

    #[test]
    fn test_multiple_toggle_and_select_all() {
        let mut selection = SelectionController::new(SelectionMode::Multiple);
        assert_eq!(selection.toggle("2").added, vec!["2"]);

        let change = selection.select_all(["1", "2", "3"]);
        assert_eq!(change.added, vec!["1", "3"]);
        assert_eq!(selection.len(), 3);

        assert_eq!(selection.toggle("2").removed, vec!["2"]);
        assert!(!selection.is_selected("2"));
    }

    #[test]
    fn test_retain_drops_stale_ids() {
        let mut selection = SelectionController::new(SelectionMode::Multiple);
        selection.select_all(["1", "2", "3"]);
        let present: HashSet<&str> = ["1", "3", "4"].into_iter().collect();

        let change = selection.retain(&present);
        assert_eq!(change.removed, vec!["2"]);
        assert!(change.added.is_empty());
        assert_eq!(selection.selected().iter().collect::<Vec<_>>(), vec!["1", "3"]);
    }

    #[test]
    fn test_clear_reports_removed() {
        let mut selection = SelectionController::new(SelectionMode::Multiple);
        selection.select_all(["b", "a"]);
        assert_eq!(selection.clear().removed, vec!["a", "b"]);
        assert!(selection.clear().is_empty());
    }
}
