//! Page drivers.
//!
//! A page builds its table from a preset, restores the stored column
//! visibility, replays the requested interactions against the view and
//! persists whatever the user changed. The table core stays synchronous;
//! all settings I/O happens here, before and after the interactions.

pub mod insights;
pub mod opportunities;
pub mod project;

use std::cell::RefCell;
use std::rc::Rc;

use chapter_lib::auth::UserProfile;
use chapter_lib::model::OpportunityStage;
use chapter_table::ClickOutcome;
use chapter_table::SortDirection;
use chapter_table::TableView;
use chapter_table::VisibilityState;
use log::debug;
use log::info;
use log::warn;

use crate::data::Dataset;
use crate::error::ConsoleError;
use crate::render;
use crate::settings::SettingsProvider;
use crate::tables::TablePreset;

/// Which page to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Opportunities,
    Project,
    Insights,
}

/// User interactions replayed against a page, in this order: column
/// visibility, filters, search, sort, selection, stage changes, clicks,
/// page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interactions {
    pub hide: Vec<String>,
    pub show: Vec<String>,
    pub filters: Vec<(String, String)>,
    pub search: Option<String>,
    pub sort: Option<(String, SortDirection)>,
    pub select: Vec<String>,
    pub select_all: bool,
    /// Opportunity id and its new stage.
    pub stage_changes: Vec<(String, OpportunityStage)>,
    /// Row id and column id.
    pub clicks: Vec<(String, String)>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// Drop the stored column visibility before anything else.
    pub reset_columns: bool,
}

/// What the table reported back to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEvents {
    /// Rows opened by a click, in click order.
    pub opened: Vec<String>,
    /// Selected row ids after the last selection change.
    pub selected: Vec<String>,
    /// Clicks a non-clickable column kept for itself.
    pub cell_interactions: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutput {
    pub text: String,
    pub events: PageEvents,
}

/// A table view wired to the host callbacks.
pub struct Page {
    key: String,
    title: String,
    view: TableView,
    events: Rc<RefCell<PageEvents>>,
    restored: VisibilityState,
}

impl Page {
    /// Builds the view and lays the stored visibility over the defaults,
    /// unless the interactions reset it.
    pub async fn open(
        mut preset: TablePreset,
        settings: &SettingsProvider,
        interactions: &Interactions,
    ) -> Result<Self, ConsoleError> {
        if let Some(size) = interactions.page_size {
            preset.options.page_size = size;
        }
        let key = preset.key.clone();
        let title = preset.title.clone();
        let mut view = preset.build()?;

        if interactions.reset_columns {
            settings.clear_visibility(&key).await?;
            info!("Reset column visibility of {key}");
        } else if let Some(stored) = settings.visibility(&key).await? {
            debug!("Restoring column visibility of {key}");
            view.apply_visibility(&stored);
        }
        let restored = view.visibility().clone();

        let events = Rc::new(RefCell::new(PageEvents::default()));
        let sink = events.clone();
        view.on_row_click(move |record| sink.borrow_mut().opened.push(record.id().to_string()));
        let sink = events.clone();
        view.on_selected_rows_change(move |rows| {
            sink.borrow_mut().selected = rows.iter().map(|r| r.id().to_string()).collect();
        });

        Ok(Self {
            key,
            title,
            view,
            events,
            restored,
        })
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TableView {
        &mut self.view
    }

    pub fn events(&self) -> PageEvents {
        self.events.borrow().clone()
    }

    /// Replays everything but stage changes and clicks.
    pub fn apply(&mut self, interactions: &Interactions) -> Result<(), ConsoleError> {
        for column in &interactions.hide {
            if self.view.set_column_visible(column, false)? {
                warn!("Column {column} cannot be hidden");
            }
        }
        for column in &interactions.show {
            self.view.set_column_visible(column, true)?;
        }
        // Repeated values select once.
        for (column, value) in &interactions.filters {
            if !self.view.filters().is_selected(column, value) {
                self.view.toggle_filter(column, value)?;
            }
        }
        if let Some(query) = &interactions.search {
            if self.view.search().column_id.is_none() {
                return Err(ConsoleError::InvalidArgument(format!(
                    "the {} table has no search box",
                    self.key
                )));
            }
            self.view.set_search(query);
        }
        if let Some((column, direction)) = &interactions.sort {
            self.view.set_sort(column, *direction)?;
        }
        if interactions.select_all {
            self.view.select_all_visible();
        }
        for id in &interactions.select {
            if self.view.select_row(id).is_empty() && !self.view.selected_ids().contains(id) {
                warn!("Cannot select row {id}");
            }
        }
        Ok(())
    }

    /// Clicks one cell, recording interactions kept by non-clickable columns.
    pub fn click(&mut self, row_id: &str, column_id: &str) -> Result<ClickOutcome, ConsoleError> {
        let outcome = self.view.click_cell(row_id, column_id)?;
        match &outcome {
            ClickOutcome::CellInteraction { column } => self
                .events
                .borrow_mut()
                .cell_interactions
                .push((row_id.to_string(), column.clone())),
            ClickOutcome::Ignored => warn!("Row {row_id} is not in the table"),
            ClickOutcome::RowClicked | ClickOutcome::SelectionToggled => {}
        }
        Ok(outcome)
    }

    pub fn turn_to(&mut self, page: Option<usize>) {
        if let Some(page) = page {
            let shown = self.view.set_page(page.saturating_sub(1));
            debug!("Showing page {} of {}", shown + 1, self.view.page_count());
        }
    }

    /// Stores the visibility if the interactions changed it.
    pub async fn persist_visibility(&self, settings: &SettingsProvider) -> Result<bool, ConsoleError> {
        if self.view.visibility() == &self.restored {
            return Ok(false);
        }
        settings.save_visibility(&self.key, self.view.visibility()).await?;
        info!("Saved column visibility of {}", self.key);
        Ok(true)
    }

    pub fn render(&self) -> String {
        render::render_page(&self.title, &self.view.toolbar(), &self.view.render())
    }
}

/// Opens one page of a dataset and returns its text.
pub async fn open_page(
    kind: PageKind,
    dataset: &Dataset,
    interactions: &Interactions,
    settings: &SettingsProvider,
    profile: Option<&UserProfile>,
) -> Result<PageOutput, ConsoleError> {
    match kind {
        PageKind::Opportunities => opportunities::run(dataset, interactions, settings, profile).await,
        PageKind::Project => project::run(dataset, interactions, settings).await,
        PageKind::Insights => insights::run(dataset, interactions, settings).await,
    }
}

/// Clicks shared by pages without special cell interactions.
pub(crate) fn replay_clicks(page: &mut Page, interactions: &Interactions) -> Result<(), ConsoleError> {
    for (row_id, column_id) in &interactions.clicks {
        page.click(row_id, column_id)?;
    }
    Ok(())
}
