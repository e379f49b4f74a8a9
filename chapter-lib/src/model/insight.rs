//! Insight data records (survey responses, transcripts, reviews)

use std::collections::HashMap;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Record;
use super::Value;

/// Kind of raw material an insight record was imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    SurveyResponse,
    Notes,
    ChatTranscript,
    CallTranscript,
    Review,
    Post,
}

impl RecordType {
    pub const ALL: [RecordType; 6] = [
        RecordType::SurveyResponse,
        RecordType::Notes,
        RecordType::ChatTranscript,
        RecordType::CallTranscript,
        RecordType::Review,
        RecordType::Post,
    ];

    /// Wire value, also used as the table facet key.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::SurveyResponse => "survey_response",
            RecordType::Notes => "notes",
            RecordType::ChatTranscript => "chat_transcript",
            RecordType::CallTranscript => "call_transcript",
            RecordType::Review => "review",
            RecordType::Post => "post",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single imported record an insight can cite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Name of the integration the record came from ("Intercom", "Gong").
    pub data_source_name: String,
    /// Title of the record in the source system.
    #[serde(default)]
    pub external_name: Option<String>,
    pub date: DateTime<Utc>,
    /// Scores keyed by their camel-cased name.
    #[serde(default)]
    pub scores: HashMap<String, i64>,
}

impl DataRecord {
    /// Flattens the record into a table row: `id`, `date`, `dataSourceName`,
    /// `externalName`, `type` and one field per score.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new(self.id.to_string())
            .set("date", self.date)
            .set("dataSourceName", self.data_source_name.as_str())
            .set("externalName", self.external_name.clone())
            .set("type", self.record_type.as_str());
        for (name, score) in &self.scores {
            record.insert(name.clone(), Value::Long(*score));
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_and_flatten() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "type": "call_transcript",
            "dataSourceName": "Gong",
            "externalName": "Discovery call",
            "date": "2024-04-02T08:30:00Z",
            "scores": {"inputQuality": 3}
        }"#;
        let data: DataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(data.record_type, RecordType::CallTranscript);

        let record = data.to_record();
        assert_eq!(record.get_string("type").unwrap(), Some("call_transcript"));
        assert_eq!(record.get_string("dataSourceName").unwrap(), Some("Gong"));
        assert_eq!(record.get_long("inputQuality").unwrap(), Some(3));
    }
}
