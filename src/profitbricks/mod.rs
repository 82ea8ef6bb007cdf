// SPDX-License-Identifier: MIT OR Apache-2.0

//! ProfitBricks Cloud API (v3 JSON).
//!
//! Every resource arrives as an envelope of `id`, `metadata` and
//! `properties`; collections wrap their members in `items`. Unknown
//! properties are ignored and unknown enum labels become `Unrecognized`.

mod api;

pub use api::ProfitBricksApi;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Envelopes
// ============================================================================

/// A `{"items": [...]}` collection. Absent `items` is an empty list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceState {
    Available,
    Busy,
    Inactive,
    #[serde(other)]
    Unrecognized,
}

/// Bookkeeping the provider attaches to every resource.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_date: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub etag: Option<String>,
    pub last_modified_date: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
    pub state: Option<ResourceState>,
}

// ============================================================================
// Data centers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCenterProperties {
    pub name: String,
    pub description: Option<String>,
    /// Region identifier such as `us/las`.
    pub location: Option<String>,
    pub version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DataCenterEntities {
    #[serde(default)]
    pub servers: Collection<Server>,
    #[serde(default)]
    pub volumes: Collection<Volume>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataCenter {
    pub id: String,
    pub href: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub properties: DataCenterProperties,
    #[serde(default)]
    pub entities: DataCenterEntities,
}

impl DataCenter {
    #[must_use]
    pub fn servers(&self) -> &[Server] {
        &self.entities.servers.items
    }

    #[must_use]
    pub fn volumes(&self) -> &[Volume] {
        &self.entities.volumes.items
    }
}

/// Body of a create data center request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataCenterParams {
    properties: DataCenterParamsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct DataCenterParamsProperties {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    location: String,
}

impl DataCenterParams {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            properties: DataCenterParamsProperties {
                name: name.into(),
                description: None,
                location: location.into(),
            },
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.properties.description = Some(description.into());
        self
    }
}

// ============================================================================
// Servers and volumes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VmState {
    #[serde(rename = "NOSTATE")]
    NoState,
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "BLOCKED")]
    Blocked,
    #[serde(rename = "PAUSED")]
    Paused,
    #[serde(rename = "SHUTDOWN")]
    Shutdown,
    #[serde(rename = "SHUTOFF")]
    Shutoff,
    #[serde(rename = "CRASHED")]
    Crashed,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AvailabilityZone {
    #[serde(rename = "AUTO")]
    Auto,
    #[serde(rename = "ZONE_1")]
    Zone1,
    #[serde(rename = "ZONE_2")]
    Zone2,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenceType {
    Windows,
    Linux,
    Other,
    Unknown,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProperties {
    pub name: String,
    pub cores: Option<u32>,
    /// Memory in MiB.
    pub ram: Option<u32>,
    pub availability_zone: Option<AvailabilityZone>,
    pub vm_state: Option<VmState>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ServerEntities {
    #[serde(default)]
    pub volumes: Collection<Volume>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    pub id: String,
    pub href: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub properties: ServerProperties,
    #[serde(default)]
    pub entities: ServerEntities,
}

impl Server {
    /// Volumes attached to the server.
    #[must_use]
    pub fn volumes(&self) -> &[Volume] {
        &self.entities.volumes.items
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.properties.vm_state == Some(VmState::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeProperties {
    pub name: Option<String>,
    /// Size in GiB.
    pub size: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub bus: Option<String>,
    pub image: Option<String>,
    pub licence_type: Option<LicenceType>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Volume {
    pub id: String,
    pub href: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub properties: VolumeProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{parse_json, to_json};

    #[test]
    fn test_data_center_with_entities() {
        let dc: DataCenter =
            parse_json(include_bytes!("../../tests/fixtures/profitbricks/datacenter.json")).unwrap();
        assert_eq!(dc.id, "700e1cab-99b2-4c30-ba8c-1d273ddba022");
        assert_eq!(dc.properties.name, "JClouds-DC");
        assert_eq!(dc.properties.location.as_deref(), Some("de/fkb"));
        assert_eq!(dc.metadata.state, Some(ResourceState::Available));
        assert_eq!(
            dc.metadata.created_date.unwrap().to_rfc3339(),
            "2015-12-01T08:50:27+00:00"
        );
        assert_eq!(dc.servers().len(), 1);
        assert!(dc.servers()[0].is_running());
        assert_eq!(dc.volumes().len(), 1);
        assert_eq!(dc.volumes()[0].properties.licence_type, Some(LicenceType::Linux));
    }

    #[test]
    fn test_unknown_labels_and_missing_lists() {
        let server: Server = parse_json(
            br#"{"id":"s1","metadata":{"state":"DEPLOYING"},
                 "properties":{"name":"x","vmState":"HIBERNATED","availabilityZone":"ZONE_3"}}"#,
        )
        .unwrap();
        assert_eq!(server.metadata.state, Some(ResourceState::Unrecognized));
        assert_eq!(server.properties.vm_state, Some(VmState::Unrecognized));
        assert_eq!(
            server.properties.availability_zone,
            Some(AvailabilityZone::Unrecognized)
        );
        assert!(server.volumes().is_empty());

        let empty: Collection<Server> = parse_json(b"{}").unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_create_payload() {
        let body = to_json(&DataCenterParams::new("dc", "us/las")).unwrap();
        assert_eq!(body, r#"{"properties":{"name":"dc","location":"us/las"}}"#);

        let body = to_json(&DataCenterParams::new("dc", "de/fra").with_description("test")).unwrap();
        assert_eq!(
            body,
            r#"{"properties":{"name":"dc","description":"test","location":"de/fra"}}"#
        );
    }
}
