//! Project responses page

use std::fmt::Write;

use chapter_lib::model::ProjectResponse;

use super::Interactions;
use super::Page;
use super::PageOutput;
use crate::data::Dataset;
use crate::error::ConsoleError;
use crate::settings::SettingsProvider;
use crate::tables::project;

pub async fn run(
    dataset: &Dataset,
    interactions: &Interactions,
    settings: &SettingsProvider,
) -> Result<PageOutput, ConsoleError> {
    let current = dataset.project.as_ref().ok_or(ConsoleError::MissingProject)?;
    let preset = project::preset(current, &dataset.responses);
    let mut page = Page::open(preset, settings, interactions).await?;
    page.view_mut()
        .set_records(dataset.responses.iter().map(ProjectResponse::to_record).collect());

    page.apply(interactions)?;
    super::replay_clicks(&mut page, interactions)?;
    page.turn_to(interactions.page);
    page.persist_visibility(settings).await?;

    let events = page.events();
    let mut text = page.render();
    if let Some(id) = events.opened.last() {
        if let Some(response) = dataset.responses.iter().find(|r| r.id.to_string() == *id) {
            let _ = writeln!(text, "\nResponse from {} ({})", response.participant.name, response.state.stage);
            for score in &response.scores {
                let _ = writeln!(text, "  {}: {}", score.name, score.score);
            }
        }
    }
    Ok(PageOutput { text, events })
}
