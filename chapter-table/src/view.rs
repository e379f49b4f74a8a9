//! TableView: composes filtering, sorting, pagination, visibility and
//! selection over one record set and turns user interactions into host
//! callbacks.

use std::collections::BTreeSet;
use std::collections::HashSet;

use chapter_lib::model::Record;
use log::debug;
use log::info;

use crate::column::CellContent;
use crate::column::ColumnDefinition;
use crate::error::Result;
use crate::facet::Icon;
use crate::facet::ToolbarFilter;
use crate::filter::FacetSet;
use crate::filter::FilterEngine;
use crate::filter::FilterState;
use crate::filter::SearchState;
use crate::registry::OrderedColumns;
use crate::registry::SELECT_COLUMN_ID;
use crate::selection::SelectionChange;
use crate::selection::SelectionController;
use crate::selection::SelectionMode;
use crate::sort::SortDirection;
use crate::sort::SortState;
use crate::sort::next_sort;
use crate::sort::sort_rows;
use crate::visibility::VisibilityController;
use crate::visibility::VisibilityState;

/// What happens to the selection when the filter narrows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Keep selected rows even when they are filtered out.
    #[default]
    Preserve,
    /// Only rows that pass the filter can be selected. Rows that stop passing
    /// it, by a filter change or a record refresh, are dropped.
    PruneOnFilter,
}

/// Singular and plural noun of the record count title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNoun {
    pub singular: String,
    pub plural: String,
}

impl RecordNoun {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    /// "1 Response", "0 Responses", "12 Responses".
    pub fn count(&self, n: usize) -> String {
        if n == 1 {
            format!("{n} {}", self.singular)
        } else {
            format!("{n} {}", self.plural)
        }
    }
}

impl Default for RecordNoun {
    fn default() -> Self {
        Self::new("Response", "Responses")
    }
}

/// Host configuration of a table.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub enable_row_selection: bool,
    /// Leading rendered columns pinned during horizontal scroll.
    pub sticky_column_count: usize,
    /// Columns whose cells never open the row.
    pub non_clickable_columns: Vec<String>,
    pub default_visibility: VisibilityState,
    pub pre_selected_filters: FilterState,
    /// Column the toolbar's search box filters on.
    pub search_column: Option<String>,
    /// Rows per page; zero disables pagination.
    pub page_size: usize,
    pub selection_policy: SelectionPolicy,
    pub record_noun: RecordNoun,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_selection(mut self, enabled: bool) -> Self {
        self.enable_row_selection = enabled;
        self
    }

    pub fn sticky_columns(mut self, count: usize) -> Self {
        self.sticky_column_count = count;
        self
    }

    pub fn non_clickable<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_clickable_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_visibility(mut self, visibility: VisibilityState) -> Self {
        self.default_visibility = visibility;
        self
    }

    pub fn pre_selected_filters(mut self, filters: FilterState) -> Self {
        self.pre_selected_filters = filters;
        self
    }

    pub fn search_column(mut self, column_id: impl Into<String>) -> Self {
        self.search_column = Some(column_id.into());
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }

    pub fn record_noun(mut self, noun: RecordNoun) -> Self {
        self.record_noun = noun;
        self
    }
}

/// Interaction state of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Idle,
    Hovered,
    /// The row was opened by a click.
    Clicked,
    Selected,
}

/// Result of a click on one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The row-click callback fired with the row's record.
    RowClicked,
    /// The selection checkbox was toggled.
    SelectionToggled,
    /// A non-clickable column consumed the click for its own interaction.
    CellInteraction { column: String },
    /// The row is not in the current record set.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column_id: String,
    pub label: String,
    pub sticky: bool,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub column_id: String,
    pub text: String,
    pub icon: Option<Icon>,
    pub sticky: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: String,
    /// Dominant state; the flags below hold the ones it may shadow.
    pub state: RowState,
    pub selected: bool,
    /// The row was opened by the last row click.
    pub clicked: bool,
    pub cells: Vec<RenderedCell>,
}

/// Device-independent snapshot of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    /// Zero-based page index.
    pub page: usize,
    pub page_count: usize,
    /// Rows after filtering, across all pages.
    pub filtered_count: usize,
    pub total_count: usize,
}

type RowClickCallback = Box<dyn FnMut(&Record)>;
type SelectionCallback = Box<dyn FnMut(&[&Record])>;

/// One table instance: owns its filter, visibility, sort and selection state.
pub struct TableView {
    columns: OrderedColumns,
    catalog: Vec<ToolbarFilter>,
    records: Vec<Record>,
    filters: FilterState,
    search: SearchState,
    visibility: VisibilityController,
    selection: SelectionController,
    sort: Option<SortState>,
    page: usize,
    hovered: Option<String>,
    clicked: Option<String>,
    options: TableOptions,
    on_row_click: Option<RowClickCallback>,
    on_selected_rows_change: Option<SelectionCallback>,
}

impl TableView {
    /// Creates a view over registered columns and a filter catalog.
    ///
    /// With row selection enabled the synthetic `select` column is prepended.
    /// Catalog entries, pre-selected filters, the search column and
    /// non-clickable columns must all name registered columns.
    pub fn new(
        columns: OrderedColumns,
        catalog: Vec<ToolbarFilter>,
        options: TableOptions,
    ) -> Result<Self> {
        let columns = if options.enable_row_selection {
            columns.with_selection_column()?
        } else {
            columns
        };

        for filter in &catalog {
            columns.require(&filter.column_id)?;
        }
        for column_id in &options.non_clickable_columns {
            columns.require(column_id)?;
        }
        if let Some(column_id) = &options.search_column {
            columns.require(column_id)?;
        }
        FilterEngine::new(&columns).validate(&options.pre_selected_filters)?;

        let mut visibility = VisibilityController::default();
        visibility.apply(&columns, &options.default_visibility);

        let mode = if options.enable_row_selection {
            SelectionMode::Multiple
        } else {
            SelectionMode::None
        };

        Ok(Self {
            filters: options.pre_selected_filters.clone(),
            search: SearchState::new(options.search_column.clone()),
            visibility,
            selection: SelectionController::new(mode),
            columns,
            catalog,
            records: Vec::new(),
            sort: None,
            page: 0,
            hovered: None,
            clicked: None,
            options,
            on_row_click: None,
            on_selected_rows_change: None,
        })
    }

    /// Sets the callback fired when a row is opened.
    pub fn on_row_click(&mut self, callback: impl FnMut(&Record) + 'static) {
        self.on_row_click = Some(Box::new(callback));
    }

    /// Sets the callback fired with the selected records after every
    /// selection change.
    pub fn on_selected_rows_change(&mut self, callback: impl FnMut(&[&Record]) + 'static) {
        self.on_selected_rows_change = Some(Box::new(callback));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn columns(&self) -> &OrderedColumns {
        &self.columns
    }

    pub fn catalog(&self) -> &[ToolbarFilter] {
        &self.catalog
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn visibility(&self) -> &VisibilityState {
        self.visibility.state()
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn selected_ids(&self) -> &BTreeSet<String> {
        self.selection.selected()
    }

    /// Selected records in record-set order.
    pub fn selected_records(&self) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| self.selection.is_selected(r.id()))
            .collect()
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Replaces the record set. Filters, sort and visibility are kept;
    /// selected ids that disappeared are dropped, as are filtered-out ones
    /// under [`SelectionPolicy::PruneOnFilter`].
    pub fn set_records(&mut self, records: Vec<Record>) {
        info!("Table received {} records", records.len());
        self.records = records;

        let present: HashSet<&str> = self.records.iter().map(Record::id).collect();
        let change = self.selection.retain(&present);
        if self.hovered.as_deref().is_some_and(|id| !present.contains(id)) {
            self.hovered = None;
        }
        if self.clicked.as_deref().is_some_and(|id| !present.contains(id)) {
            self.clicked = None;
        }
        self.notify_selection(change);
        self.after_rows_changed(self.prunes_hidden());
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Flips one filter value. Returns `true` if it is selected afterwards.
    pub fn toggle_filter(&mut self, column_id: &str, value: &str) -> Result<bool> {
        self.columns.require(column_id)?;
        let selected = self.filters.toggle(column_id, value);
        debug!("Filter {column_id}={value} -> {selected}");
        self.after_filter_changed();
        Ok(selected)
    }

    /// Replaces one column's selection; an empty set clears it.
    pub fn set_filter(&mut self, column_id: &str, values: FacetSet) -> Result<()> {
        self.columns.require(column_id)?;
        self.filters.set(column_id, values);
        self.after_filter_changed();
        Ok(())
    }

    /// Clears every column filter and the search query.
    pub fn reset_filters(&mut self) {
        debug!("Resetting filters");
        self.filters.reset();
        self.search.query.clear();
        self.after_filter_changed();
    }

    /// Sets the search query. Ignored when no search column is configured.
    pub fn set_search(&mut self, query: &str) {
        if self.search.column_id.is_none() {
            return;
        }
        self.search.query = query.to_string();
        self.after_filter_changed();
    }

    /// Rows matching the search query, ignoring facet filters.
    pub fn searched_rows(&self) -> Vec<&Record> {
        let search_column = self
            .search
            .column_id
            .as_deref()
            .and_then(|id| self.columns.get(id));
        let (Some(mut matcher), Some(column)) = (self.search.matcher(), search_column) else {
            return self.records.iter().collect();
        };

        self.records
            .iter()
            .filter(|row| {
                column
                    .value(row)
                    .is_some_and(|value| matcher.matches(&value.to_string()))
            })
            .collect()
    }

    /// Rows passing filters and search, in record-set order.
    pub fn filtered_rows(&self) -> Vec<&Record> {
        let engine = FilterEngine::new(&self.columns);
        self.searched_rows()
            .into_iter()
            .filter(|row| engine.evaluate(row, &self.filters))
            .collect()
    }

    /// Rows passing filters and search, ordered by the active sort.
    pub fn sorted_rows(&self) -> Vec<&Record> {
        let mut rows = self.filtered_rows();
        if let Some(sort) = &self.sort {
            if let Some(column) = self.columns.get(&sort.column_id) {
                sort_rows(&mut rows, column, sort.direction);
            }
        }
        rows
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&Record> {
        let rows = self.sorted_rows();
        if self.options.page_size == 0 {
            return rows;
        }
        rows.into_iter()
            .skip(self.page * self.options.page_size)
            .take(self.options.page_size)
            .collect()
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered_rows().len(), self.options.page_size)
    }

    /// Moves to a page, clamped to the last page.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page.min(self.page_count() - 1);
        self.page
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Advances the sort cycle of a column. Non-sortable columns are left
    /// alone.
    pub fn toggle_sort(&mut self, column_id: &str) -> Result<Option<&SortState>> {
        let column = self.columns.require(column_id)?;
        if !column.is_sortable() {
            debug!("Column {column_id} is not sortable");
            return Ok(self.sort.as_ref());
        }
        self.sort = next_sort(self.sort.as_ref(), column_id);
        Ok(self.sort.as_ref())
    }

    pub fn set_sort(&mut self, column_id: &str, direction: SortDirection) -> Result<()> {
        let column = self.columns.require(column_id)?;
        if column.is_sortable() {
            self.sort = Some(SortState {
                column_id: column_id.to_string(),
                direction,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Flips a column's visibility. Returns whether it is shown afterwards.
    pub fn toggle_column(&mut self, column_id: &str) -> Result<bool> {
        self.visibility.toggle(&self.columns, column_id)
    }

    pub fn set_column_visible(&mut self, column_id: &str, shown: bool) -> Result<bool> {
        self.visibility.set(&self.columns, column_id, shown)
    }

    /// Lays a stored visibility state over the current one.
    pub fn apply_visibility(&mut self, state: &VisibilityState) -> VisibilityState {
        self.visibility.apply(&self.columns, state)
    }

    pub fn is_column_shown(&self, column_id: &str) -> bool {
        self.columns
            .get(column_id)
            .is_some_and(|c| self.visibility.is_shown(c))
    }

    /// Columns to render, in declared order.
    pub fn visible_columns(&self) -> Vec<&ColumnDefinition> {
        self.columns
            .iter()
            .filter(|c| self.visibility.is_shown(c))
            .collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select_row(&mut self, id: &str) -> SelectionChange {
        if !self.is_selectable(id) {
            return SelectionChange::default();
        }
        let change = self.selection.select_row(id);
        self.notify_selection(change.clone());
        change
    }

    pub fn deselect_row(&mut self, id: &str) -> SelectionChange {
        let change = self.selection.deselect_row(id);
        self.notify_selection(change.clone());
        change
    }

    pub fn toggle_row(&mut self, id: &str) -> SelectionChange {
        if !self.is_selectable(id) {
            return SelectionChange::default();
        }
        let change = self.selection.toggle(id);
        self.notify_selection(change.clone());
        change
    }

    /// Selects every row that passes the current filters, on all pages.
    pub fn select_all_visible(&mut self) -> SelectionChange {
        let ids: Vec<String> = self
            .filtered_rows()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        let change = self.selection.select_all(ids.iter().map(String::as_str));
        self.notify_selection(change.clone());
        change
    }

    pub fn clear_selection(&mut self) -> SelectionChange {
        let change = self.selection.clear();
        self.notify_selection(change.clone());
        change
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Marks a row as hovered, or clears the hover with `None`.
    pub fn hover(&mut self, row_id: Option<&str>) {
        self.hovered = row_id
            .filter(|id| self.record(id).is_some())
            .map(str::to_string);
    }

    pub fn row_state(&self, row_id: &str) -> RowState {
        if self.selection.is_selected(row_id) {
            RowState::Selected
        } else if self.clicked.as_deref() == Some(row_id) {
            RowState::Clicked
        } else if self.hovered.as_deref() == Some(row_id) {
            RowState::Hovered
        } else {
            RowState::Idle
        }
    }

    /// Handles a click on one cell.
    ///
    /// The selection column toggles the row. Other non-clickable columns keep
    /// the click to themselves. Every other cell opens the row.
    pub fn click_cell(&mut self, row_id: &str, column_id: &str) -> Result<ClickOutcome> {
        self.columns.require(column_id)?;
        let Some(index) = self.records.iter().position(|r| r.id() == row_id) else {
            return Ok(ClickOutcome::Ignored);
        };

        if column_id == SELECT_COLUMN_ID && self.options.enable_row_selection {
            self.toggle_row(row_id);
            return Ok(ClickOutcome::SelectionToggled);
        }

        if self.options.non_clickable_columns.iter().any(|c| c == column_id) {
            debug!("Click on non-clickable column {column_id} of row {row_id}");
            return Ok(ClickOutcome::CellInteraction {
                column: column_id.to_string(),
            });
        }

        self.clicked = Some(row_id.to_string());
        info!("Row {row_id} clicked");
        if let Some(callback) = self.on_row_click.as_mut() {
            callback(&self.records[index]);
        }
        Ok(ClickOutcome::RowClicked)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn render(&self) -> RenderedTable {
        let columns = self.visible_columns();
        let sticky = |i: usize| i < self.options.sticky_column_count;

        let headers = columns
            .iter()
            .enumerate()
            .map(|(i, column)| HeaderCell {
                column_id: column.id().to_string(),
                label: column.header().to_string(),
                sticky: sticky(i),
                sortable: column.is_sortable(),
                sort: self
                    .sort
                    .as_ref()
                    .filter(|s| s.column_id == column.id())
                    .map(|s| s.direction),
            })
            .collect();

        let rows = self
            .page_rows()
            .into_iter()
            .map(|row| {
                let selected = self.selection.is_selected(row.id());
                let cells = columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| {
                        let content = if column.id() == SELECT_COLUMN_ID
                            && self.options.enable_row_selection
                        {
                            CellContent::text(if selected { "[x]" } else { "[ ]" })
                        } else {
                            column.render(row)
                        };
                        RenderedCell {
                            column_id: column.id().to_string(),
                            text: content.text,
                            icon: content.icon,
                            sticky: sticky(i),
                        }
                    })
                    .collect();
                RenderedRow {
                    id: row.id().to_string(),
                    state: self.row_state(row.id()),
                    selected,
                    clicked: self.clicked.as_deref() == Some(row.id()),
                    cells,
                }
            })
            .collect();

        let filtered_count = self.filtered_rows().len();
        RenderedTable {
            headers,
            rows,
            page: self.page,
            page_count: page_count(filtered_count, self.options.page_size),
            filtered_count,
            total_count: self.records.len(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn prunes_hidden(&self) -> bool {
        self.options.selection_policy == SelectionPolicy::PruneOnFilter
    }

    fn is_selectable(&self, id: &str) -> bool {
        if self.prunes_hidden() {
            self.filtered_rows().iter().any(|r| r.id() == id)
        } else {
            self.record(id).is_some()
        }
    }

    fn after_filter_changed(&mut self) {
        self.after_rows_changed(self.prunes_hidden());
    }

    /// Clamps the page, and drops filtered-out selections when `prune` is set.
    fn after_rows_changed(&mut self, prune: bool) {
        let last_page = self.page_count() - 1;
        if self.page > last_page {
            self.page = last_page;
        }

        if prune {
            let filtered: Vec<String> = self
                .filtered_rows()
                .iter()
                .map(|r| r.id().to_string())
                .collect();
            let present: HashSet<&str> = filtered.iter().map(String::as_str).collect();
            let change = self.selection.retain(&present);
            self.notify_selection(change);
        }
    }

    fn notify_selection(&mut self, change: SelectionChange) {
        if change.is_empty() {
            return;
        }
        debug!(
            "Selection changed: +{:?} -{:?}",
            change.added, change.removed
        );
        let selected: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| self.selection.is_selected(r.id()))
            .collect();
        if let Some(callback) = self.on_selected_rows_change.as_mut() {
            callback(&selected);
        }
    }
}

fn page_count(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        1
    } else {
        rows.div_ceil(page_size).max(1)
    }
}
