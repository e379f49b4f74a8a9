//! Opportunities page

use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

use chapter_lib::auth::UserProfile;
use chapter_lib::model::Opportunity;
use chapter_lib::model::Record;
use chapter_table::ClickOutcome;
use log::info;
use log::warn;

use super::Interactions;
use super::Page;
use super::PageOutput;
use crate::data::Dataset;
use crate::error::ConsoleError;
use crate::settings::SettingsProvider;
use crate::store::OpportunityStore;
use crate::tables::opportunities;

/// Records pushed by the store, waiting to be handed to the view.
type PendingRecords = Rc<RefCell<Option<Vec<Record>>>>;

fn refresh(page: &mut Page, pending: &PendingRecords) {
    if let Some(records) = pending.borrow_mut().take() {
        page.view_mut().set_records(records);
    }
}

pub async fn run(
    dataset: &Dataset,
    interactions: &Interactions,
    settings: &SettingsProvider,
    profile: Option<&UserProfile>,
) -> Result<PageOutput, ConsoleError> {
    let mut store = OpportunityStore::new();
    let pending: PendingRecords = Rc::new(RefCell::new(None));
    let sink = pending.clone();
    store.subscribe(move |items| {
        *sink.borrow_mut() = Some(items.iter().map(Opportunity::to_record).collect());
    });

    let ticket = store.begin_fetch();
    store.complete_fetch(ticket, dataset.opportunities.clone());

    let preset = opportunities::preset(dataset.icp.as_ref());
    let mut page = Page::open(preset, settings, interactions).await?;
    refresh(&mut page, &pending);
    page.apply(interactions)?;

    // The stage cell keeps its click and opens the stage menu instead.
    for (id, stage) in &interactions.stage_changes {
        match page.click(id, "stage")? {
            ClickOutcome::CellInteraction { .. } => {
                if let Some(previous) = store.update_stage(id, *stage) {
                    info!("Stage of {id} changed from {previous} to {stage}");
                }
                refresh(&mut page, &pending);
            }
            other => warn!("Stage change on {id} ignored: {other:?}"),
        }
    }

    super::replay_clicks(&mut page, interactions)?;
    page.turn_to(interactions.page);
    page.persist_visibility(settings).await?;

    let events = page.events();
    let mut text = page.render();

    for id in &events.opened {
        if let Some(opportunity) = store.get(id) {
            let _ = writeln!(text, "\nOpened: {}", describe(opportunity));
        }
    }

    if !events.selected.is_empty() {
        let names: Vec<&str> = events
            .selected
            .iter()
            .filter_map(|id| store.get(id))
            .map(|o| o.name.as_str())
            .collect();
        let _ = writeln!(text, "\nSelected: {}", names.join(", "));
    }

    match profile {
        Some(profile) => {
            let mut recent = settings.recently_viewed(&profile.email).await?;
            for id in &events.opened {
                recent = settings.push_recently_viewed(&profile.email, id).await?;
            }
            let names: Vec<&str> = recent
                .iter()
                .filter_map(|id| store.get(id))
                .map(|o| o.name.as_str())
                .collect();
            if !names.is_empty() {
                let _ = writeln!(text, "\nRecently viewed by {}: {}", profile.display_name(), names.join(", "));
            }
        }
        None if !events.opened.is_empty() => {
            warn!("Not signed in, recently viewed list not updated");
        }
        None => {}
    }

    Ok(PageOutput { text, events })
}

/// One-line drawer summary of an opportunity.
fn describe(opportunity: &Opportunity) -> String {
    let mut line = format!("{} [{}]", opportunity.name, opportunity.stage);
    if let Some(company) = &opportunity.company {
        let _ = write!(line, " {}", company.name);
        if let Some(industry) = &company.industry {
            let _ = write!(line, ", {industry}");
        }
    }
    if !opportunity.contacts.is_empty() {
        let _ = write!(line, ", {} contacts", opportunity.contacts.len());
    }
    line
}
