// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classic networking: reserved IPs, network security groups and virtual
//! network sites.

use crate::error::{CloudError, Result};
use crate::xml::{
    xml_enum, Field, FromRecord, Record, Schema, XmlCollection, XmlEntity, XmlEnum, XmlPayload,
};

// ============================================================================
// Reserved IP addresses
// ============================================================================

xml_enum! {
    /// Provisioning state of a reserved IP.
    pub enum ReservedIPState {
        Created => "Created",
        Creating => "Creating",
        Updating => "Updating",
        Deleting => "Deleting",
        Unavailable => "Unavailable",
    }
}

const RESERVED_IP: Schema = Schema {
    name: "ReservedIP",
    fields: &[
        Field::text("Name"),
        Field::text("Address"),
        Field::text("Id"),
        Field::text("Label"),
        Field::text("State"),
        Field::text("InUse"),
        Field::text("ServiceName"),
        Field::text("DeploymentName"),
        Field::text("Location"),
    ],
};

/// A public address reserved for the subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedIPAddress {
    pub name: String,
    pub address: Option<String>,
    pub id: Option<String>,
    pub label: Option<String>,
    pub state: Option<ReservedIPState>,
    pub in_use: Option<bool>,
    pub service_name: Option<String>,
    pub deployment_name: Option<String>,
    pub location: Option<String>,
}

impl FromRecord for ReservedIPAddress {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            address: record.string("Address"),
            id: record.string("Id"),
            label: record.string("Label"),
            state: record.enumeration("State"),
            in_use: record.boolean("InUse")?,
            service_name: record.string("ServiceName"),
            deployment_name: record.string("DeploymentName"),
            location: record.string("Location"),
        })
    }
}

impl XmlEntity for ReservedIPAddress {
    const SCHEMA: &'static Schema = &RESERVED_IP;
}

impl XmlCollection for ReservedIPAddress {
    const COLLECTION: &'static str = "ReservedIPs";
}

/// Parameters of a new reserved IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedIPAddressParams {
    pub name: String,
    pub label: Option<String>,
    pub location: String,
}

impl ReservedIPAddressParams {
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            location: location.into(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Render the `ReservedIP` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let mut payload = XmlPayload::new("ReservedIP")?;
        payload
            .element("Name", &self.name)?
            .optional("Label", self.label.as_deref())?
            .element("Location", &self.location)?;
        payload.finish()
    }
}

// ============================================================================
// Network security groups
// ============================================================================

xml_enum! {
    /// Traffic direction a rule applies to.
    pub enum RuleType {
        Inbound => "Inbound",
        Outbound => "Outbound",
    }
}

xml_enum! {
    pub enum RuleAction {
        Allow => "Allow",
        Deny => "Deny",
    }
}

xml_enum! {
    pub enum RuleProtocol {
        Tcp => "TCP",
        Udp => "UDP",
        Any => "*",
    }
}

const RULE: Schema = Schema {
    name: "Rule",
    fields: &[
        Field::text("Name"),
        Field::text("Type"),
        Field::text("Priority"),
        Field::text("Action"),
        Field::text("SourceAddressPrefix"),
        Field::text("SourcePortRange"),
        Field::text("DestinationAddressPrefix"),
        Field::text("DestinationPortRange"),
        Field::text("Protocol"),
        Field::text("State"),
        Field::text("IsDefault"),
    ],
};

/// One rule of a network security group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub kind: Option<RuleType>,
    pub priority: Option<u32>,
    pub action: Option<RuleAction>,
    pub source_address_prefix: Option<String>,
    pub source_port_range: Option<String>,
    pub destination_address_prefix: Option<String>,
    pub destination_port_range: Option<String>,
    pub protocol: Option<RuleProtocol>,
    pub state: Option<String>,
    pub is_default: Option<bool>,
}

impl FromRecord for Rule {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            kind: record.enumeration("Type"),
            priority: record.number("Priority")?,
            action: record.enumeration("Action"),
            source_address_prefix: record.string("SourceAddressPrefix"),
            source_port_range: record.string("SourcePortRange"),
            destination_address_prefix: record.string("DestinationAddressPrefix"),
            destination_port_range: record.string("DestinationPortRange"),
            protocol: record.enumeration("Protocol"),
            state: record.string("State"),
            is_default: record.boolean("IsDefault")?,
        })
    }
}

const NETWORK_SECURITY_GROUP: Schema = Schema {
    name: "NetworkSecurityGroup",
    fields: &[
        Field::text("Name"),
        Field::text("Label"),
        Field::text("Location"),
        Field::list("Rules", &RULE),
    ],
};

/// A network security group. Rules are only returned by the detailed get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSecurityGroup {
    pub name: String,
    pub label: Option<String>,
    pub location: Option<String>,
    pub rules: Vec<Rule>,
}

impl FromRecord for NetworkSecurityGroup {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            label: record.string("Label"),
            location: record.string("Location"),
            rules: record.list("Rules")?,
        })
    }
}

impl XmlEntity for NetworkSecurityGroup {
    const SCHEMA: &'static Schema = &NETWORK_SECURITY_GROUP;
}

impl XmlCollection for NetworkSecurityGroup {
    const COLLECTION: &'static str = "NetworkSecurityGroups";
}

/// Parameters of a new network security group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSecurityGroupParams {
    pub name: String,
    pub label: Option<String>,
    pub location: String,
}

impl NetworkSecurityGroupParams {
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            location: location.into(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Render the `NetworkSecurityGroup` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let mut payload = XmlPayload::new("NetworkSecurityGroup")?;
        payload
            .element("Name", &self.name)?
            .optional("Label", self.label.as_deref())?
            .element("Location", &self.location)?;
        payload.finish()
    }
}

/// Body associating a subnet with a security group.
pub(crate) fn subnet_association_xml(group: &str) -> Result<String> {
    let mut payload = XmlPayload::new("NetworkSecurityGroup")?;
    payload.element("Name", group)?;
    payload.finish()
}

/// Parameters of a rule added to, or replaced in, a security group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleParams {
    pub kind: RuleType,
    pub priority: u32,
    pub action: RuleAction,
    pub source_address_prefix: String,
    pub source_port_range: String,
    pub destination_address_prefix: String,
    pub destination_port_range: String,
    pub protocol: RuleProtocol,
}

impl RuleParams {
    /// Allow inbound traffic from anywhere, on any protocol, to any port.
    #[must_use]
    pub fn inbound(priority: u32) -> Self {
        Self {
            kind: RuleType::Inbound,
            priority,
            action: RuleAction::Allow,
            source_address_prefix: "*".to_string(),
            source_port_range: "*".to_string(),
            destination_address_prefix: "*".to_string(),
            destination_port_range: "*".to_string(),
            protocol: RuleProtocol::Any,
        }
    }

    /// Same defaults as [`RuleParams::inbound`], for outgoing traffic.
    #[must_use]
    pub fn outbound(priority: u32) -> Self {
        Self {
            kind: RuleType::Outbound,
            ..Self::inbound(priority)
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: RuleAction) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn with_source(mut self, prefix: impl Into<String>, ports: impl Into<String>) -> Self {
        self.source_address_prefix = prefix.into();
        self.source_port_range = ports.into();
        self
    }

    #[must_use]
    pub fn with_destination(mut self, prefix: impl Into<String>, ports: impl Into<String>) -> Self {
        self.destination_address_prefix = prefix.into();
        self.destination_port_range = ports.into();
        self
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: RuleProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Render the `Rule` payload.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Validation`] when a chosen enum value is
    /// `Unrecognized`, or an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        if !(self.kind.is_recognized()
            && self.action.is_recognized()
            && self.protocol.is_recognized())
        {
            return Err(CloudError::Validation(
                "rule type, action and protocol must be known values".to_string(),
            ));
        }
        let mut payload = XmlPayload::new("Rule")?;
        payload
            .element("Type", self.kind.as_str())?
            .element("Priority", self.priority.to_string())?
            .element("Action", self.action.as_str())?
            .element("SourceAddressPrefix", &self.source_address_prefix)?
            .element("SourcePortRange", &self.source_port_range)?
            .element("DestinationAddressPrefix", &self.destination_address_prefix)?
            .element("DestinationPortRange", &self.destination_port_range)?
            .element("Protocol", self.protocol.as_str())?;
        payload.finish()
    }
}

// ============================================================================
// Virtual networks
// ============================================================================

const ADDRESS_SPACE: Schema = Schema {
    name: "AddressSpace",
    fields: &[Field::texts("AddressPrefixes", "AddressPrefix")],
};

/// CIDR blocks of a virtual network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressSpace {
    pub address_prefixes: Vec<String>,
}

impl FromRecord for AddressSpace {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            address_prefixes: record.texts("AddressPrefixes"),
        })
    }
}

const SUBNET: Schema = Schema {
    name: "Subnet",
    fields: &[
        Field::text("Name"),
        Field::text("AddressPrefix"),
        Field::text("NetworkSecurityGroup"),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub name: String,
    pub address_prefix: Option<String>,
    pub network_security_group: Option<String>,
}

impl FromRecord for Subnet {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            address_prefix: record.string("AddressPrefix"),
            network_security_group: record.string("NetworkSecurityGroup"),
        })
    }
}

const VIRTUAL_NETWORK_SITE: Schema = Schema {
    name: "VirtualNetworkSite",
    fields: &[
        Field::text("Name"),
        Field::text("Label"),
        Field::text("Id"),
        Field::text("AffinityGroup"),
        Field::text("Location"),
        Field::text("State"),
        Field::entity("AddressSpace", &ADDRESS_SPACE),
        Field::list("Subnets", &SUBNET),
    ],
};

/// A virtual network defined in the subscription's network configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNetworkSite {
    pub name: String,
    pub label: Option<String>,
    pub id: Option<String>,
    pub affinity_group: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub address_space: Option<AddressSpace>,
    pub subnets: Vec<Subnet>,
}

impl FromRecord for VirtualNetworkSite {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            label: record.string("Label"),
            id: record.string("Id"),
            affinity_group: record.string("AffinityGroup"),
            location: record.string("Location"),
            state: record.string("State"),
            address_space: record.child("AddressSpace")?,
            subnets: record.list("Subnets")?,
        })
    }
}

impl XmlEntity for VirtualNetworkSite {
    const SCHEMA: &'static Schema = &VIRTUAL_NETWORK_SITE;
}

impl XmlCollection for VirtualNetworkSite {
    const COLLECTION: &'static str = "VirtualNetworkSites";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{parse, parse_list};

    #[test]
    fn test_parse_reserved_ips_fixture() {
        let ips: Vec<ReservedIPAddress> =
            parse_list(include_bytes!("../../tests/fixtures/azure/reservedips.xml")).unwrap();
        assert_eq!(
            ips,
            vec![
                ReservedIPAddress {
                    name: "myreservedip".to_string(),
                    address: Some("23.101.69.53".to_string()),
                    id: Some("8b2d1ebd-7b85-4d3a-9bd0-f5d4a8a1d0c1".to_string()),
                    label: Some("reserved ip".to_string()),
                    state: Some(ReservedIPState::Created),
                    in_use: Some(true),
                    service_name: Some("neotys".to_string()),
                    deployment_name: Some("neotys".to_string()),
                    location: Some("West Europe".to_string()),
                },
                ReservedIPAddress {
                    name: "spare".to_string(),
                    address: Some("23.101.69.54".to_string()),
                    id: None,
                    label: None,
                    state: Some(ReservedIPState::Unrecognized),
                    in_use: Some(false),
                    service_name: None,
                    deployment_name: None,
                    location: Some("West Europe".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_reserved_ip_payload() {
        let xml = ReservedIPAddressParams::new("myip", "West Europe")
            .with_label("a label")
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<ReservedIP xmlns=\"http://schemas.microsoft.com/windowsazure\"><Name>myip</Name>\
             <Label>a label</Label><Location>West Europe</Location></ReservedIP>"
        );
    }

    #[test]
    fn test_parse_security_groups_without_rules() {
        let groups: Vec<NetworkSecurityGroup> = parse_list(
            include_bytes!("../../tests/fixtures/azure/networksecuritygroups.xml"),
        )
        .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "nsg1");
        assert_eq!(groups[1].label.as_deref(), Some("second group"));
        assert!(groups.iter().all(|group| group.rules.is_empty()));
    }

    #[test]
    fn test_parse_security_group_with_rules() {
        let group: NetworkSecurityGroup = parse(include_bytes!(
            "../../tests/fixtures/azure/networksecuritygroup.xml"
        ))
        .unwrap();
        assert_eq!(group.name, "nsg1");
        assert_eq!(group.rules.len(), 2);
        assert_eq!(
            group.rules[0],
            Rule {
                name: "ssh".to_string(),
                kind: Some(RuleType::Inbound),
                priority: Some(100),
                action: Some(RuleAction::Allow),
                source_address_prefix: Some("INTERNET".to_string()),
                source_port_range: Some("*".to_string()),
                destination_address_prefix: Some("*".to_string()),
                destination_port_range: Some("22".to_string()),
                protocol: Some(RuleProtocol::Tcp),
                state: Some("Active".to_string()),
                is_default: Some(false),
            }
        );
        assert_eq!(group.rules[1].protocol, Some(RuleProtocol::Any));
        assert_eq!(group.rules[1].is_default, Some(true));
    }

    #[test]
    fn test_rule_payload() {
        let xml = RuleParams::inbound(100)
            .with_destination("*", "22")
            .with_protocol(RuleProtocol::Tcp)
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<Rule xmlns=\"http://schemas.microsoft.com/windowsazure\"><Type>Inbound</Type>\
             <Priority>100</Priority><Action>Allow</Action>\
             <SourceAddressPrefix>*</SourceAddressPrefix><SourcePortRange>*</SourcePortRange>\
             <DestinationAddressPrefix>*</DestinationAddressPrefix>\
             <DestinationPortRange>22</DestinationPortRange><Protocol>TCP</Protocol></Rule>"
        );

        let err = RuleParams::outbound(200)
            .with_action(RuleAction::Unrecognized)
            .to_xml()
            .unwrap_err();
        assert!(matches!(err, CloudError::Validation(_)));
    }

    #[test]
    fn test_subnet_association_payload() {
        assert_eq!(
            subnet_association_xml("nsg1").unwrap(),
            "<NetworkSecurityGroup xmlns=\"http://schemas.microsoft.com/windowsazure\">\
             <Name>nsg1</Name></NetworkSecurityGroup>"
        );
    }

    #[test]
    fn test_parse_virtual_networks_fixture() {
        let sites: Vec<VirtualNetworkSite> = parse_list(include_bytes!(
            "../../tests/fixtures/azure/virtualnetworksites.xml"
        ))
        .unwrap();
        assert_eq!(
            sites,
            vec![VirtualNetworkSite {
                name: "testvnet".to_string(),
                label: None,
                id: Some("c5a8fe4f-6b44-4d3b-9aab-0d6e4a8c3a21".to_string()),
                affinity_group: None,
                location: Some("West Europe".to_string()),
                state: Some("Created".to_string()),
                address_space: Some(AddressSpace {
                    address_prefixes: vec!["10.0.0.0/8".to_string()],
                }),
                subnets: vec![
                    Subnet {
                        name: "Subnet-1".to_string(),
                        address_prefix: Some("10.0.0.0/11".to_string()),
                        network_security_group: Some("nsg1".to_string()),
                    },
                    Subnet {
                        name: "Subnet-2".to_string(),
                        address_prefix: Some("10.32.0.0/11".to_string()),
                        network_security_group: None,
                    },
                ],
            }]
        );
    }
}
