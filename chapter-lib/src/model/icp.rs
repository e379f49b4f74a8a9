//! Ideal customer profile

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Segmentation profile describing which companies a tenant is looking for.
///
/// The opportunities page derives its tool-stack and investor filter options
/// from the active profile, so changing it regenerates the filter catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icp {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub company: Option<CompanyCriteria>,
    #[serde(default)]
    pub tool: Option<ToolCriteria>,
    #[serde(default)]
    pub pitch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCriteria {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub investors: Vec<String>,
    #[serde(default)]
    pub min_headcount: Option<i64>,
    #[serde(default)]
    pub max_headcount: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCriteria {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Icp {
    /// Tools the profile targets, in declaration order.
    pub fn tools(&self) -> &[String] {
        self.tool.as_ref().map_or(&[], |t| t.include.as_slice())
    }

    /// Investors the profile targets, in declaration order.
    pub fn investors(&self) -> &[String] {
        self.company.as_ref().map_or(&[], |c| c.investors.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_has_no_targets() {
        let icp = Icp::default();
        assert!(icp.tools().is_empty());
        assert!(icp.investors().is_empty());
    }

    #[test]
    fn test_deserialize_partial_profile() {
        let json = r#"{"name": "DevTools", "tool": {"include": ["Rust", "Docker"]}}"#;
        let icp: Icp = serde_json::from_str(json).unwrap();
        assert_eq!(icp.tools(), ["Rust".to_string(), "Docker".to_string()]);
        assert!(icp.investors().is_empty());
    }
}
