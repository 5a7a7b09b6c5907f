use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;

/// Numeric id of a monitoring location.
pub type LocationId = u64;

/// A pollutant or metric a project reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Parameter {
    /// Label shown on a parameter tab.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}

/// A data source contributing to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lifecycle_stage: Option<String>,
}

/// A project (dataset) as returned by `GET /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default, rename = "sourceType")]
    pub source_type: Option<String>,
    #[serde(default, rename = "isMobile")]
    pub is_mobile: bool,
    #[serde(default, rename = "locationIds")]
    pub location_ids: Vec<LocationId>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default, rename = "firstUpdated")]
    pub first_updated: Option<String>,
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub measurements: Option<u64>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub countries: Vec<String>,
}

impl Project {
    /// Lifecycle stages of the project's sources, skipping blanks.
    pub fn lifecycle_stages(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter_map(|s| s.lifecycle_stage.as_deref())
            .filter(|stage| !stage.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Project;

    const STR_RESULT: &str = r#"{
        "id": 22,
        "name": "Purple Air Network",
        "subtitle": "Low-cost sensors",
        "isMobile": false,
        "locationIds": [101, 102, 103],
        "parameters": [
            {"id": 2, "name": "pm25", "displayName": "PM2.5", "unit": "µg/m³"},
            {"id": "o3", "name": "o3"}
        ],
        "sources": [
            {"name": "a", "lifecycle_stage": "Pilot"},
            {"name": "b"},
            {"name": "c", "lifecycle_stage": ""},
            {"name": "d", "lifecycle_stage": "Active"}
        ],
        "firstUpdated": "2019-01-01T00:00:00Z",
        "lastUpdated": "2024-02-20T14:00:00Z",
        "measurements": 125000
    }"#;

    #[test]
    fn test_deserialize_project() {
        let project: Project = serde_json::from_str(STR_RESULT).unwrap();
        assert_eq!(project.id, "22");
        assert_eq!(project.location_ids, vec![101, 102, 103]);
        assert_eq!(project.parameters[0].id, "2");
        assert_eq!(project.parameters[0].label(), "PM2.5");
        assert_eq!(project.parameters[1].label(), "o3");
        assert!(project.bbox.is_none());
        assert!(project.countries.is_empty());
    }

    #[test]
    fn test_lifecycle_stages() {
        let project: Project = serde_json::from_str(STR_RESULT).unwrap();
        assert_eq!(project.lifecycle_stages(), vec!["Pilot", "Active"]);
    }
}
