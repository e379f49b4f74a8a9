//! Opportunities (sales leads)

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Company;
use super::Record;
use super::Value;

/// Pipeline stage of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpportunityStage {
    #[serde(rename = "Identified")]
    Identified,
    #[serde(rename = "Qualified")]
    Qualified,
    #[serde(rename = "Contacted")]
    Contacted,
    #[serde(rename = "Engaged")]
    Engaged,
    #[serde(rename = "Proposed")]
    Proposed,
    #[serde(rename = "Negotiated")]
    Negotiated,
    #[serde(rename = "Deferred")]
    Deferred,
    #[serde(rename = "Suspended")]
    Suspended,
    #[serde(rename = "Customer")]
    Customer,
}

impl OpportunityStage {
    /// Every stage, in pipeline order.
    pub const ALL: [OpportunityStage; 9] = [
        OpportunityStage::Identified,
        OpportunityStage::Qualified,
        OpportunityStage::Contacted,
        OpportunityStage::Engaged,
        OpportunityStage::Proposed,
        OpportunityStage::Negotiated,
        OpportunityStage::Deferred,
        OpportunityStage::Suspended,
        OpportunityStage::Customer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OpportunityStage::Identified => "Identified",
            OpportunityStage::Qualified => "Qualified",
            OpportunityStage::Contacted => "Contacted",
            OpportunityStage::Engaged => "Engaged",
            OpportunityStage::Proposed => "Proposed",
            OpportunityStage::Negotiated => "Negotiated",
            OpportunityStage::Deferred => "Deferred",
            OpportunityStage::Suspended => "Suspended",
            OpportunityStage::Customer => "Customer",
        }
    }
}

impl fmt::Display for OpportunityStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a stage label is not one of [`OpportunityStage::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown opportunity stage: {0}")]
pub struct UnknownStage(pub String);

impl FromStr for OpportunityStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpportunityStage::ALL
            .into_iter()
            .find(|stage| stage.label() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

/// How certain the enrichment pipeline is about a detected tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Low,
    Medium,
    High,
}

/// A tool detected in a job post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub certainty: Scale,
}

/// A job post the tool stack was mined from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// A contact person at the opportunity's company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub work_email: Option<String>,
    #[serde(default)]
    pub linkedin_profile_url: Option<String>,
}

/// A sales lead enriched with company, funding and contact data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,
    pub name: String,
    pub stage: OpportunityStage,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub job_posts: Vec<JobPost>,
}

impl Opportunity {
    /// Names of every tool across all job posts, in post order, duplicates
    /// removed.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for tool in self.job_posts.iter().flat_map(|post| &post.tools) {
            if !names.contains(&tool.name) {
                names.push(tool.name.clone());
            }
        }
        names
    }

    /// Flattens the opportunity into a table row.
    ///
    /// Fields: `id`, `date`, `stage`, `companyName`, `companySize`
    /// (raw headcount), `orgSize`, `fundingRound`, `companyLocation`,
    /// `industry`, `tools` and `investors`. Absent company data becomes null.
    pub fn to_record(&self) -> Record {
        let company = self.company.as_ref();
        let funding = company.and_then(|c| c.last_funding.as_ref());

        Record::new(self.id.to_string())
            .set("date", self.created_at)
            .set("stage", self.stage.label())
            .set("companyName", company.map(|c| c.name.clone()))
            .set("companySize", company.and_then(|c| c.headcount))
            .set(
                "orgSize",
                company
                    .and_then(|c| c.org_size.as_ref())
                    .map_or(Value::Null, Value::from),
            )
            .set("fundingRound", funding.map(|f| f.round_name.label()))
            .set(
                "companyLocation",
                company
                    .and_then(|c| c.hq_location.as_ref())
                    .map_or(Value::Null, Value::from),
            )
            .set("industry", company.and_then(|c| c.industry.clone()))
            .set("tools", self.tool_names())
            .set(
                "investors",
                funding.map_or(Value::Null, |f| Value::from(f.investors.clone())),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Funding, FundingRound, Location};

    fn opportunity() -> Opportunity {
        Opportunity {
            id: Uuid::nil(),
            name: "Contoso expansion".to_string(),
            stage: OpportunityStage::Qualified,
            created_at: "2024-05-01T09:00:00Z".parse().unwrap(),
            notes: None,
            company: Some(Company {
                id: Uuid::nil(),
                slug: "contoso".to_string(),
                name: "Contoso".to_string(),
                description: None,
                industry: Some("Fintech".to_string()),
                headcount: Some(42),
                founded_year: None,
                url: None,
                linkedin_profile_url: None,
                hq_location: Some(Location {
                    country: Some("United Kingdom".to_string()),
                    ..Location::default()
                }),
                last_funding: Some(Funding {
                    round_name: FundingRound::SeriesA,
                    investors: vec!["Accel".to_string()],
                    money_raised: None,
                }),
                org_size: None,
            }),
            contacts: vec![],
            job_posts: vec![
                JobPost {
                    id: Uuid::nil(),
                    title: "Platform Engineer".to_string(),
                    url: None,
                    tools: vec![
                        Tool { name: "Rust".to_string(), certainty: Scale::High },
                        Tool { name: "Docker".to_string(), certainty: Scale::Low },
                    ],
                },
                JobPost {
                    id: Uuid::nil(),
                    title: "SRE".to_string(),
                    url: None,
                    tools: vec![Tool { name: "Rust".to_string(), certainty: Scale::Medium }],
                },
            ],
        }
    }

    #[test]
    fn test_stage_round_trips_label() {
        for stage in OpportunityStage::ALL {
            assert_eq!(stage.label().parse::<OpportunityStage>(), Ok(stage));
        }
        assert!("Closed".parse::<OpportunityStage>().is_err());
    }

    #[test]
    fn test_to_record_flattens_company() {
        let record = opportunity().to_record();

        assert_eq!(record.id(), Uuid::nil().to_string());
        assert_eq!(record.get_string("stage").unwrap(), Some("Qualified"));
        assert_eq!(record.get_long("companySize").unwrap(), Some(42));
        assert_eq!(record.get_string("fundingRound").unwrap(), Some("Series A"));
        assert_eq!(
            record.lookup("companyLocation.country"),
            Some(&Value::from("United Kingdom"))
        );
        assert_eq!(
            record.get("tools"),
            Some(&Value::from(vec!["Rust", "Docker"]))
        );
    }

    #[test]
    fn test_to_record_without_company() {
        let mut opp = opportunity();
        opp.company = None;
        let record = opp.to_record();

        assert_eq!(record.get("companySize"), Some(&Value::Null));
        assert_eq!(record.get("investors"), Some(&Value::Null));
        assert_eq!(record.get("companyLocation"), Some(&Value::Null));
    }
}
