//! Research projects and their survey responses

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Record;

/// A qualitative research project (survey).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Scores every response is rated on.
    #[serde(default)]
    pub score_definitions: Vec<ScoreDefinition>,
    pub created_at: DateTime<Utc>,
}

/// One rating dimension of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Allowed score values, lowest first.
    #[serde(default)]
    pub scale: Vec<i64>,
}

impl ScoreDefinition {
    /// Record field the score is stored under.
    pub fn field_name(&self) -> String {
        camel_case(&self.name)
    }
}

/// A score given to a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub name: String,
    pub score: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Progress of a response through the interview flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseState {
    pub stage: String,
}

/// A participant's response to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub participant: Participant,
    pub state: ResponseState,
    #[serde(default)]
    pub scores: Vec<Score>,
}

impl ProjectResponse {
    /// Flattens the response into a table row: `id`, `date`, `participant`,
    /// `stage` and one field per score, keyed by the camel-cased score name.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.id.to_string())
            .set("date", self.started_at)
            .set("participant", self.participant.name.as_str())
            .set("stage", self.state.stage.as_str());
        for score in &self.scores {
            record.insert(camel_case(&score.name), score.score);
        }
        record
    }
}

/// Converts a title-cased name ("Input Quality") to a camel-cased field name
/// ("inputQuality").
///
/// The character after each whitespace run is upper-cased, whitespace is
/// dropped and the first character is lower-cased.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c.is_whitespace() {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("Input Quality"), "inputQuality");
        assert_eq!(camel_case("Willingness to pay"), "willingnessToPay");
        assert_eq!(camel_case("NPS"), "nPS");
        assert_eq!(camel_case("  Leading space"), "leadingSpace");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_response_to_record() {
        let response = ProjectResponse {
            id: Uuid::nil(),
            started_at: "2024-02-10T12:00:00Z".parse().unwrap(),
            participant: Participant {
                id: Uuid::nil(),
                name: "Ada".to_string(),
                email: None,
            },
            state: ResponseState { stage: "completed".to_string() },
            scores: vec![Score {
                name: "Input Quality".to_string(),
                score: 4,
                description: None,
            }],
        };

        let record = response.to_record();
        assert_eq!(record.get_string("participant").unwrap(), Some("Ada"));
        assert_eq!(record.get_string("stage").unwrap(), Some("completed"));
        assert_eq!(record.get_long("inputQuality").unwrap(), Some(4));
        assert!(record.get_datetime("date").unwrap().is_some());
    }
}
