//! Insight records page

use std::fmt::Write;

use chapter_lib::model::DataRecord;

use super::Interactions;
use super::Page;
use super::PageOutput;
use crate::data::Dataset;
use crate::error::ConsoleError;
use crate::settings::SettingsProvider;
use crate::tables::insights;

pub async fn run(
    dataset: &Dataset,
    interactions: &Interactions,
    settings: &SettingsProvider,
) -> Result<PageOutput, ConsoleError> {
    let mut page = Page::open(insights::preset(), settings, interactions).await?;
    page.view_mut()
        .set_records(dataset.records.iter().map(DataRecord::to_record).collect());

    page.apply(interactions)?;
    super::replay_clicks(&mut page, interactions)?;
    page.turn_to(interactions.page);
    page.persist_visibility(settings).await?;

    let events = page.events();
    let mut text = page.render();
    if !events.selected.is_empty() {
        let _ = writeln!(text, "\n{} selected", events.selected.len());
    }
    Ok(PageOutput { text, events })
}
