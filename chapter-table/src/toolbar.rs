//! Toolbar view model.
//!
//! The toolbar holds no state of its own. [`ToolbarModel::build`] reads a
//! [`TableView`] and [`TableView::dispatch`] routes every toolbar action back
//! into it.

use log::warn;

use crate::error::Result;
use crate::facet::Icon;
use crate::filter::FilterEngine;
use crate::view::TableView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
    pub icon: Option<Icon>,
    pub selected: bool,
    /// Rows this option would keep given the other columns' filters.
    pub count: usize,
}

/// Multi-select picker for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPicker {
    pub column_id: String,
    pub label: String,
    pub options: Vec<PickerOption>,
}

impl FilterPicker {
    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.selected).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    pub column_id: String,
    pub placeholder: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMenuItem {
    pub column_id: String,
    pub header: String,
    pub shown: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarModel {
    /// Record count title, e.g. "3 Responses".
    pub title: String,
    pub search: Option<SearchBox>,
    pub pickers: Vec<FilterPicker>,
    /// Enabled only while a filter or search is active.
    pub reset_enabled: bool,
    /// Hideable columns with their current flag.
    pub visibility_menu: Vec<VisibilityMenuItem>,
}

/// A user action on the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    ToggleOption { column: String, value: String },
    ResetFilters,
    ToggleColumn { column: String },
    Search { query: String },
}

impl ToolbarModel {
    pub fn build(view: &TableView) -> Self {
        let engine = FilterEngine::new(view.columns());
        let searched = view.searched_rows();
        let filtered = view.filtered_rows();

        let pickers = view
            .catalog()
            .iter()
            .map(|filter| {
                let counts = engine
                    .facet_counts(
                        searched.iter().copied(),
                        view.filters(),
                        &filter.column_id,
                        &filter.options,
                    )
                    .unwrap_or_else(|err| {
                        warn!("Facet counts unavailable: {err}");
                        vec![0; filter.options.len()]
                    });
                let options = filter
                    .options
                    .iter()
                    .zip(counts)
                    .map(|(option, count)| PickerOption {
                        value: option.value.clone(),
                        label: option.label.clone(),
                        icon: option.icon.clone(),
                        selected: view.filters().is_selected(&filter.column_id, &option.value),
                        count,
                    })
                    .collect();
                FilterPicker {
                    column_id: filter.column_id.clone(),
                    label: filter.label.clone(),
                    options,
                }
            })
            .collect();

        let search = view.search().column_id.as_ref().map(|column_id| {
            let header = view
                .columns()
                .get(column_id)
                .map_or(column_id.as_str(), |c| c.header());
            SearchBox {
                column_id: column_id.clone(),
                placeholder: format!("Filter {}...", header.to_lowercase()),
                query: view.search().query.clone(),
            }
        });

        let visibility_menu = view
            .columns()
            .iter()
            .filter(|c| c.is_hideable())
            .map(|c| VisibilityMenuItem {
                column_id: c.id().to_string(),
                header: c.header().to_string(),
                shown: view.is_column_shown(c.id()),
            })
            .collect();

        ToolbarModel {
            title: view.options().record_noun.count(filtered.len()),
            search,
            pickers,
            reset_enabled: view.filters().is_active() || view.search().is_active(),
            visibility_menu,
        }
    }
}

impl TableView {
    /// Applies a toolbar action.
    pub fn dispatch(&mut self, action: ToolbarAction) -> Result<()> {
        match action {
            ToolbarAction::ToggleOption { column, value } => {
                self.toggle_filter(&column, &value)?;
            }
            ToolbarAction::ResetFilters => self.reset_filters(),
            ToolbarAction::ToggleColumn { column } => {
                self.toggle_column(&column)?;
            }
            ToolbarAction::Search { query } => self.set_search(&query),
        }
        Ok(())
    }

    pub fn toolbar(&self) -> ToolbarModel {
        ToolbarModel::build(self)
    }
}
