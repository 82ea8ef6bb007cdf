// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rackspace Auto Scale (v1.0 JSON, `camelCase` fields).
//!
//! A scaling group couples a [`GroupConfiguration`] (bounds and cooldown),
//! a [`LaunchConfiguration`] (what a new server looks like) and its
//! [`ScalingPolicy`] list. The live [`GroupState`] reports capacity.

mod api;

pub use api::AutoscaleApi;

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: Option<String>,
}

/// A server that belongs to a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActiveServer {
    pub id: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupStatus {
    Active,
    Error,
    Deleting,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupState {
    pub name: Option<String>,
    pub status: Option<GroupStatus>,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub active: Vec<ActiveServer>,
    #[serde(default)]
    pub active_capacity: u32,
    #[serde(default)]
    pub pending_capacity: u32,
    #[serde(default)]
    pub desired_capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfiguration {
    pub name: String,
    /// Seconds between two scaling actions.
    pub cooldown: u32,
    pub min_entities: u32,
    pub max_entities: Option<u32>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchConfigurationType {
    LaunchServer,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchServer {
    pub name: String,
    pub image_ref: Option<String>,
    pub flavor_ref: Option<String>,
    #[serde(rename = "OS-DCF:diskConfig")]
    pub disk_config: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    pub load_balancer_id: u64,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchArguments {
    pub server: Option<LaunchServer>,
    #[serde(default)]
    pub load_balancers: Vec<LoadBalancer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LaunchConfiguration {
    #[serde(rename = "type")]
    pub kind: LaunchConfigurationType,
    #[serde(default)]
    pub args: LaunchArguments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingPolicyType {
    Webhook,
    Schedule,
    #[serde(other)]
    Unrecognized,
}

/// How a policy changes capacity. Exactly one is set by the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalingTarget {
    /// Add or remove this many servers.
    Change(i64),
    /// Change capacity by a percentage.
    ChangePercent(f64),
    /// Converge to this many servers.
    DesiredCapacity(u32),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingPolicy {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ScalingPolicyType,
    pub cooldown: u32,
    change: Option<i64>,
    change_percent: Option<f64>,
    desired_capacity: Option<u32>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl ScalingPolicy {
    #[must_use]
    pub fn target(&self) -> Option<ScalingTarget> {
        self.change
            .map(ScalingTarget::Change)
            .or(self.change_percent.map(ScalingTarget::ChangePercent))
            .or(self.desired_capacity.map(ScalingTarget::DesiredCapacity))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Absent from list answers, which only carry id and state.
    pub group_configuration: Option<GroupConfiguration>,
    pub launch_configuration: Option<LaunchConfiguration>,
    #[serde(default)]
    pub scaling_policies: Vec<ScalingPolicy>,
    pub state: GroupState,
}

// ============================================================================
// Envelopes
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct Groups {
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupEnvelope {
    pub group: Group,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StateEnvelope {
    pub group: GroupState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::parse_json;

    #[test]
    fn test_group_fixture() {
        let group = parse_json::<GroupEnvelope>(include_bytes!(
            "../../tests/fixtures/autoscale/group.json"
        ))
        .unwrap()
        .group;
        assert_eq!(group.id, "6791761b-821a-4d07-820d-0b2afc7dd7f6");

        let config = group.group_configuration.unwrap();
        assert_eq!(config.cooldown, 60);
        assert_eq!(config.max_entities, Some(10));
        assert_eq!(config.metadata["gc_meta_key_2"], "gc_meta_value_2");

        let launch = group.launch_configuration.unwrap();
        assert_eq!(launch.kind, LaunchConfigurationType::LaunchServer);
        let server = launch.args.server.unwrap();
        assert_eq!(server.disk_config.as_deref(), Some("AUTO"));
        assert_eq!(launch.args.load_balancers[0].port, 8080);

        let targets: Vec<_> = group.scaling_policies.iter().map(ScalingPolicy::target).collect();
        assert_eq!(
            targets,
            vec![
                Some(ScalingTarget::Change(1)),
                Some(ScalingTarget::ChangePercent(-5.5)),
                Some(ScalingTarget::DesiredCapacity(3)),
            ]
        );
        assert_eq!(group.scaling_policies[2].kind, ScalingPolicyType::Schedule);

        assert_eq!(group.state.active_capacity, 2);
        assert_eq!(group.state.active.len(), 2);
        assert!(!group.state.paused);
    }

    #[test]
    fn test_defaults_and_unknown_labels() {
        let group: Group = parse_json(
            br#"{"id":"g","state":{"status":"SCALING"},
                 "launchConfiguration":{"type":"launch_stack"}}"#,
        )
        .unwrap();
        assert_eq!(group.state.status, Some(GroupStatus::Unrecognized));
        assert!(group.state.active.is_empty());
        assert!(group.scaling_policies.is_empty());
        let launch = group.launch_configuration.unwrap();
        assert_eq!(launch.kind, LaunchConfigurationType::Unrecognized);
        assert!(launch.args.server.is_none());
    }
}
