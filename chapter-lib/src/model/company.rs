//! Company, funding and location types

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;

/// A company an opportunity is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Total headcount.
    #[serde(default)]
    pub headcount: Option<i64>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub linkedin_profile_url: Option<String>,
    #[serde(default)]
    pub hq_location: Option<Location>,
    #[serde(default)]
    pub last_funding: Option<Funding>,
    #[serde(default)]
    pub org_size: Option<OrgSize>,
}

/// Headquarters location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl From<&Location> for Value {
    fn from(location: &Location) -> Self {
        let mut map = BTreeMap::new();
        map.insert("city".to_string(), Value::from(location.city.clone()));
        map.insert("region".to_string(), Value::from(location.region.clone()));
        map.insert("country".to_string(), Value::from(location.country.clone()));
        Value::Object(map)
    }
}

/// Headcount per function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSize {
    #[serde(default)]
    pub engineering: Option<i64>,
    #[serde(default)]
    pub sales: Option<i64>,
    #[serde(default)]
    pub marketing: Option<i64>,
}

impl From<&OrgSize> for Value {
    fn from(size: &OrgSize) -> Self {
        let mut map = BTreeMap::new();
        map.insert("engineering".to_string(), Value::from(size.engineering));
        map.insert("sales".to_string(), Value::from(size.sales));
        map.insert("marketing".to_string(), Value::from(size.marketing));
        Value::Object(map)
    }
}

/// Most recent funding event of a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    pub round_name: FundingRound,
    #[serde(default)]
    pub investors: Vec<String>,
    #[serde(default)]
    pub money_raised: Option<i64>,
}

/// Funding round names as the backend reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingRound {
    #[serde(rename = "Grant")]
    Grant,
    #[serde(rename = "Pre-Seed")]
    PreSeed,
    #[serde(rename = "Seed")]
    Seed,
    #[serde(rename = "Series A")]
    SeriesA,
    #[serde(rename = "Series B")]
    SeriesB,
    #[serde(rename = "Series C")]
    SeriesC,
    #[serde(rename = "Series D")]
    SeriesD,
    #[serde(rename = "Series E")]
    SeriesE,
    #[serde(rename = "Series Unknown")]
    SeriesUnknown,
    #[serde(rename = "Public")]
    Public,
}

impl FundingRound {
    /// Every round, in funding order.
    pub const ALL: [FundingRound; 10] = [
        FundingRound::Grant,
        FundingRound::PreSeed,
        FundingRound::Seed,
        FundingRound::SeriesA,
        FundingRound::SeriesB,
        FundingRound::SeriesC,
        FundingRound::SeriesD,
        FundingRound::SeriesE,
        FundingRound::SeriesUnknown,
        FundingRound::Public,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FundingRound::Grant => "Grant",
            FundingRound::PreSeed => "Pre-Seed",
            FundingRound::Seed => "Seed",
            FundingRound::SeriesA => "Series A",
            FundingRound::SeriesB => "Series B",
            FundingRound::SeriesC => "Series C",
            FundingRound::SeriesD => "Series D",
            FundingRound::SeriesE => "Series E",
            FundingRound::SeriesUnknown => "Series Unknown",
            FundingRound::Public => "Public",
        }
    }
}

impl fmt::Display for FundingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
