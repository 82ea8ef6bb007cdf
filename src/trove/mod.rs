// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenStack Trove (Reddwarf) database-as-a-service API.
//!
//! Responses wrap every resource in a named envelope such as
//! `{"instance": {...}}` or `{"flavors": [...]}`. Timestamps carry no
//! offset and are kept as naive UTC times.

mod api;

pub use api::TroveApi;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    Active,
    Blocked,
    Build,
    Backup,
    Reboot,
    Resize,
    Shutdown,
    Error,
    Failed,
    #[serde(other)]
    Unrecognized,
}

/// Flavor reference embedded in an instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlavorRef {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VolumeInfo {
    /// Size in GB.
    pub size: u32,
    /// Used space in GB, reported once the instance is active.
    pub used: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub status: Option<InstanceStatus>,
    pub hostname: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub updated: Option<NaiveDateTime>,
    pub flavor: Option<FlavorRef>,
    pub volume: Option<VolumeInfo>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Instance {
    /// The `self` link, if the provider sent one.
    #[must_use]
    pub fn self_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel.as_deref() == Some("self"))
            .map(|link| link.href.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flavor {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    /// Memory in MB.
    pub ram: Option<u32>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collate: Option<String>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character_set: None,
            collate: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default)]
    pub databases: Vec<Database>,
}

impl User {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: Some(password.into()),
            host: None,
            databases: Vec::new(),
        }
    }

    /// Grant access to a database.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.databases.push(Database::new(database));
        self
    }
}

/// Body of a create instance request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceParams {
    name: String,
    flavor_ref: String,
    volume: VolumeParams,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    databases: Vec<Database>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct VolumeParams {
    size: u32,
}

impl InstanceParams {
    /// `flavor` is a flavor id or href; `volume_size` is in GB.
    pub fn new(name: impl Into<String>, flavor: impl Into<String>, volume_size: u32) -> Self {
        Self {
            name: name.into(),
            flavor_ref: flavor.into(),
            volume: VolumeParams { size: volume_size },
            databases: Vec::new(),
            users: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_database(mut self, database: Database) -> Self {
        self.databases.push(database);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }
}

// ============================================================================
// Envelopes
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct InstanceEnvelope<I> {
    pub instance: I,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Instances {
    #[serde(default)]
    pub instances: Vec<Instance>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Flavors {
    #[serde(default)]
    pub flavors: Vec<Flavor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Databases {
    #[serde(default)]
    pub databases: Vec<Database>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Users {
    #[serde(default)]
    pub users: Vec<User>,
}

// Flavor ids are numbers on older deployments and strings on newer ones.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    })
}
