// SPDX-License-Identifier: MIT OR Apache-2.0

//! 1&1 Cloud Server API (v1 JSON, `snake_case` fields).

mod api;

pub use api::OneAndOneApi;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerState {
    PoweredOn,
    PoweredOff,
    PoweringOn,
    PoweringOff,
    Deploying,
    Rebooting,
    Removing,
    Configuring,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Status {
    pub state: ServerState,
    /// Progress of a running transition.
    pub percent: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hdd {
    pub id: String,
    /// Size in GB.
    pub size: f64,
    #[serde(default)]
    pub is_main: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hardware {
    pub fixed_instance_size_id: Option<String>,
    pub vcore: Option<f64>,
    pub cores_per_processor: Option<f64>,
    /// Memory in GB.
    pub ram: Option<f64>,
    #[serde(default)]
    pub hdds: Vec<Hdd>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IpType {
    Ipv4,
    Ipv6,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ip {
    pub id: String,
    pub ip: String,
    #[serde(rename = "type")]
    pub kind: Option<IpType>,
    pub reverse_dns: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataCenter {
    pub id: String,
    pub country_code: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub datacenter: Option<DataCenter>,
    pub status: Option<Status>,
    pub hardware: Option<Hardware>,
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ips: Vec<Ip>,
}

impl Server {
    #[must_use]
    pub fn state(&self) -> Option<ServerState> {
        self.status.as_ref().map(|status| status.state)
    }
}

// The API sends `null` for an empty list on freshly deployed servers.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Power transition requested through `status/action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerAction {
    PowerOn,
    PowerOff,
    Reboot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionMethod {
    #[default]
    Software,
    Hardware,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct StatusAction {
    pub action: ServerAction,
    pub method: ActionMethod,
}
