//! Dataset loading.
//!
//! A dataset is one JSON document standing in for the backend API: the
//! tenant's ICP, its opportunities, one project with its responses and the
//! imported insight records.

use std::path::Path;

use chapter_lib::model::DataRecord;
use chapter_lib::model::Icp;
use chapter_lib::model::Opportunity;
use chapter_lib::model::Project;
use chapter_lib::model::ProjectResponse;
use log::info;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConsoleError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub icp: Option<Icp>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub responses: Vec<ProjectResponse>,
    #[serde(default)]
    pub records: Vec<DataRecord>,
}

impl Dataset {
    pub async fn load(path: &Path) -> Result<Self, ConsoleError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConsoleError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset = Self::parse(path, &text)?;
        info!(
            "Loaded {}: {} opportunities, {} responses, {} records",
            path.display(),
            dataset.opportunities.len(),
            dataset.responses.len(),
            dataset.records.len()
        );
        Ok(dataset)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, ConsoleError> {
        serde_json::from_str(text).map_err(|source| ConsoleError::Data {
            path: path.to_path_buf(),
            source,
        })
    }
}
