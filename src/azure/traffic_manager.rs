// SPDX-License-Identifier: MIT OR Apache-2.0

//! Traffic Manager profiles and their definitions.

use crate::error::Result;
use crate::xml::{xml_enum, Field, FromRecord, Record, Schema, XmlCollection, XmlEntity};

xml_enum! {
    pub enum ProfileStatus {
        Enabled => "Enabled",
        Disabled => "Disabled",
    }
}

xml_enum! {
    /// How DNS answers are spread over endpoints.
    pub enum LoadBalancingMethod {
        Performance => "Performance",
        Failover => "Failover",
        RoundRobin => "RoundRobin",
    }
}

xml_enum! {
    pub enum EndpointType {
        CloudService => "CloudService",
        AzureWebsite => "AzureWebsite",
        Any => "Any",
        TrafficManager => "TrafficManager",
    }
}

xml_enum! {
    /// Health of an endpoint or of the whole policy as seen by the monitor.
    pub enum MonitorStatus {
        CheckingEndpoint => "CheckingEndpoint",
        Online => "Online",
        Degraded => "Degraded",
        Inactive => "Inactive",
        Disabled => "Disabled",
        Stopped => "Stopped",
        EndpointUnmonitored => "EndpointUnmonitored",
    }
}

// ============================================================================
// Profiles
// ============================================================================

const DEFINITION_SUMMARY: Schema = Schema {
    name: "Definition",
    fields: &[Field::text("Status"), Field::text("Version")],
};

const STATUS_DETAILS: Schema = Schema {
    name: "StatusDetails",
    fields: &[Field::text("EnabledVersion")],
};

const PROFILE: Schema = Schema {
    name: "Profile",
    fields: &[
        Field::text("DomainName"),
        Field::text("Name"),
        Field::text("Status"),
        Field::entity("StatusDetails", &STATUS_DETAILS),
        Field::list("Definitions", &DEFINITION_SUMMARY),
    ],
};

/// Status and version of one profile definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSummary {
    pub status: Option<ProfileStatus>,
    pub version: Option<u32>,
}

impl FromRecord for DefinitionSummary {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            status: record.enumeration("Status"),
            version: record.number("Version")?,
        })
    }
}

/// A Traffic Manager profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub domain_name: Option<String>,
    pub status: Option<ProfileStatus>,
    /// Version of the definition currently in effect.
    pub enabled_version: Option<u32>,
    pub definitions: Vec<DefinitionSummary>,
}

impl FromRecord for Profile {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            domain_name: record.string("DomainName"),
            status: record.enumeration("Status"),
            enabled_version: record.section("StatusDetails").number("EnabledVersion")?,
            definitions: record.list("Definitions")?,
        })
    }
}

impl XmlEntity for Profile {
    const SCHEMA: &'static Schema = &PROFILE;
}

impl XmlCollection for Profile {
    const COLLECTION: &'static str = "Profiles";
}

// ============================================================================
// Definitions
// ============================================================================

const HTTP_OPTIONS: Schema = Schema {
    name: "HttpOptions",
    fields: &[
        Field::text("Verb"),
        Field::text("RelativePath"),
        Field::text("ExpectedStatusCode"),
    ],
};

const MONITOR: Schema = Schema {
    name: "Monitor",
    fields: &[
        Field::text("IntervalInSeconds"),
        Field::text("TimeoutInSeconds"),
        Field::text("ToleratedNumberOfFailures"),
        Field::text("Protocol"),
        Field::text("Port"),
        Field::entity("HttpOptions", &HTTP_OPTIONS),
    ],
};

/// Health probe of a profile definition. The `HttpOptions` group is
/// flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefinitionMonitor {
    pub interval_in_seconds: Option<u32>,
    pub timeout_in_seconds: Option<u32>,
    pub tolerated_failures: Option<u32>,
    pub protocol: Option<String>,
    pub port: Option<u16>,
    pub verb: Option<String>,
    pub relative_path: Option<String>,
    pub expected_status_code: Option<u16>,
}

impl FromRecord for ProfileDefinitionMonitor {
    fn from_record(record: &Record) -> Result<Self> {
        let http = record.section("HttpOptions");
        Ok(Self {
            interval_in_seconds: record.number("IntervalInSeconds")?,
            timeout_in_seconds: record.number("TimeoutInSeconds")?,
            tolerated_failures: record.number("ToleratedNumberOfFailures")?,
            protocol: record.string("Protocol"),
            port: record.number("Port")?,
            verb: http.string("Verb"),
            relative_path: http.string("RelativePath"),
            expected_status_code: http.number("ExpectedStatusCode")?,
        })
    }
}

const ENDPOINT: Schema = Schema {
    name: "Endpoint",
    fields: &[
        Field::text("DomainName"),
        Field::text("Status"),
        Field::text("Type"),
        Field::text("Location"),
        Field::text("MonitorStatus"),
        Field::text("Weight"),
        Field::text("MinChildEndpoints"),
    ],
};

/// One endpoint traffic is routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefinitionEndpoint {
    pub domain_name: String,
    pub status: Option<ProfileStatus>,
    pub kind: Option<EndpointType>,
    pub location: Option<String>,
    pub monitor_status: Option<MonitorStatus>,
    pub weight: Option<u32>,
    pub min_child_endpoints: Option<u32>,
}

impl FromRecord for ProfileDefinitionEndpoint {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            domain_name: record.required("DomainName")?,
            status: record.enumeration("Status"),
            kind: record.enumeration("Type"),
            location: record.string("Location"),
            monitor_status: record.enumeration("MonitorStatus"),
            weight: record.number("Weight")?,
            min_child_endpoints: record.number("MinChildEndpoints")?,
        })
    }
}

const DNS_OPTIONS: Schema = Schema {
    name: "DnsOptions",
    fields: &[Field::text("TimeToLiveInSeconds")],
};

const POLICY: Schema = Schema {
    name: "Policy",
    fields: &[
        Field::text("LoadBalancingMethod"),
        Field::list("Endpoints", &ENDPOINT),
        Field::text("MonitorStatus"),
    ],
};

const DEFINITION: Schema = Schema {
    name: "Definition",
    fields: &[
        Field::entity("DnsOptions", &DNS_OPTIONS),
        Field::text("Status"),
        Field::text("Version"),
        Field::list("Monitors", &MONITOR),
        Field::entity("Policy", &POLICY),
    ],
};

/// Full routing definition of a profile. The `DnsOptions` and `Policy`
/// groups are flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefinition {
    pub ttl_in_seconds: Option<u32>,
    pub status: Option<ProfileStatus>,
    pub version: Option<u32>,
    pub monitors: Vec<ProfileDefinitionMonitor>,
    pub load_balancing_method: Option<LoadBalancingMethod>,
    pub endpoints: Vec<ProfileDefinitionEndpoint>,
    pub monitor_status: Option<MonitorStatus>,
}

impl FromRecord for ProfileDefinition {
    fn from_record(record: &Record) -> Result<Self> {
        let policy = record.section("Policy");
        Ok(Self {
            ttl_in_seconds: record.section("DnsOptions").number("TimeToLiveInSeconds")?,
            status: record.enumeration("Status"),
            version: record.number("Version")?,
            monitors: record.list("Monitors")?,
            load_balancing_method: policy.enumeration("LoadBalancingMethod"),
            endpoints: policy.list("Endpoints")?,
            monitor_status: policy.enumeration("MonitorStatus"),
        })
    }
}

impl XmlEntity for ProfileDefinition {
    const SCHEMA: &'static Schema = &DEFINITION;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse, parse_list, XmlEnum};

    #[test]
    fn test_parse_profiles_fixture() {
        let profiles: Vec<Profile> =
            parse_list(include_bytes!("../../tests/fixtures/azure/profiles.xml")).unwrap();
        assert_eq!(
            profiles,
            vec![Profile {
                name: "neotys".to_string(),
                domain_name: Some("neotys.trafficmanager.net".to_string()),
                status: Some(ProfileStatus::Enabled),
                enabled_version: Some(1),
                definitions: vec![DefinitionSummary {
                    status: Some(ProfileStatus::Enabled),
                    version: Some(1),
                }],
            }]
        );
    }

    #[test]
    fn test_parse_definition_fixture() {
        let definition: ProfileDefinition =
            parse(include_bytes!("../../tests/fixtures/azure/definition.xml")).unwrap();
        assert_eq!(
            definition,
            ProfileDefinition {
                ttl_in_seconds: Some(300),
                status: Some(ProfileStatus::Enabled),
                version: Some(1),
                monitors: vec![ProfileDefinitionMonitor {
                    interval_in_seconds: Some(30),
                    timeout_in_seconds: Some(10),
                    tolerated_failures: Some(3),
                    protocol: Some("HTTP".to_string()),
                    port: Some(80),
                    verb: Some("GET".to_string()),
                    relative_path: Some("/".to_string()),
                    expected_status_code: Some(200),
                }],
                load_balancing_method: Some(LoadBalancingMethod::Performance),
                endpoints: vec![
                    ProfileDefinitionEndpoint {
                        domain_name: "neotys.cloudapp.net".to_string(),
                        status: Some(ProfileStatus::Enabled),
                        kind: Some(EndpointType::CloudService),
                        location: None,
                        monitor_status: Some(MonitorStatus::Online),
                        weight: Some(1),
                        min_child_endpoints: None,
                    },
                    ProfileDefinitionEndpoint {
                        domain_name: "www.example.com".to_string(),
                        status: Some(ProfileStatus::Disabled),
                        kind: Some(EndpointType::Any),
                        location: Some("North Europe".to_string()),
                        monitor_status: Some(MonitorStatus::Unrecognized),
                        weight: Some(2),
                        min_child_endpoints: None,
                    },
                ],
                monitor_status: Some(MonitorStatus::Online),
            }
        );
        assert!(!MonitorStatus::Unrecognized.is_recognized());
    }
}
