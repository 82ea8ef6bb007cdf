// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deployments: a release slot holding roles and their running instances.

use url::Url;

use super::common::{HostCaching, OsType};
use super::role::{InputEndpoint, Role, ROLE};
use super::role_size::RoleSizeType;
use crate::error::{CloudError, Result};
use crate::xml::{
    encode_base64, xml_enum, Field, FromRecord, Record, Schema, XmlEntity, XmlEnum, XmlPayload,
};

xml_enum! {
    pub enum DeploymentSlot {
        Production => "Production",
        Staging => "Staging",
    }
}

xml_enum! {
    pub enum DeploymentStatus {
        Running => "Running",
        Suspended => "Suspended",
        RunningTransitioning => "RunningTransitioning",
        SuspendedTransitioning => "SuspendedTransitioning",
        Starting => "Starting",
        Suspending => "Suspending",
        Deploying => "Deploying",
        Deleting => "Deleting",
    }
}

xml_enum! {
    /// Runtime state of a role instance.
    pub enum InstanceStatus {
        Unknown => "Unknown",
        CreatingVM => "CreatingVM",
        StartingVM => "StartingVM",
        CreatingRole => "CreatingRole",
        StartingRole => "StartingRole",
        ReadyRole => "ReadyRole",
        BusyRole => "BusyRole",
        StoppingRole => "StoppingRole",
        StoppingVM => "StoppingVM",
        DeletingVM => "DeletingVM",
        StoppedVM => "StoppedVM",
        RestartingRole => "RestartingRole",
        CyclingRole => "CyclingRole",
        FailedStartingRole => "FailedStartingRole",
        FailedStartingVM => "FailedStartingVM",
        UnresponsiveRole => "UnresponsiveRole",
        StoppedDeallocated => "StoppedDeallocated",
        Preparing => "Preparing",
    }
}

xml_enum! {
    pub enum PowerState {
        Starting => "Starting",
        Started => "Started",
        Stopping => "Stopping",
        Stopped => "Stopped",
        Unknown => "Unknown",
    }
}

const VIRTUAL_IP: Schema = Schema {
    name: "VirtualIP",
    fields: &[
        Field::text("Address"),
        Field::text("IsDnsProgrammed"),
        Field::text("Name"),
    ],
};

/// Public address of a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualIP {
    pub address: Option<String>,
    pub is_dns_programmed: Option<bool>,
    pub name: Option<String>,
}

impl FromRecord for VirtualIP {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            address: record.string("Address"),
            is_dns_programmed: record.boolean("IsDnsProgrammed")?,
            name: record.string("Name"),
        })
    }
}

const INSTANCE_ENDPOINT: Schema = Schema {
    name: "InstanceEndpoint",
    fields: &[
        Field::text("Name"),
        Field::text("Vip"),
        Field::text("PublicPort"),
        Field::text("LocalPort"),
        Field::text("Protocol"),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceEndpoint {
    pub name: String,
    pub vip: Option<String>,
    pub public_port: Option<u16>,
    pub local_port: Option<u16>,
    pub protocol: Option<String>,
}

impl FromRecord for InstanceEndpoint {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            vip: record.string("Vip"),
            public_port: record.number("PublicPort")?,
            local_port: record.number("LocalPort")?,
            protocol: record.string("Protocol"),
        })
    }
}

const ROLE_INSTANCE: Schema = Schema {
    name: "RoleInstance",
    fields: &[
        Field::text("RoleName"),
        Field::text("InstanceName"),
        Field::text("InstanceStatus"),
        Field::text("InstanceUpgradeDomain"),
        Field::text("InstanceFaultDomain"),
        Field::text("InstanceSize"),
        Field::text("IpAddress"),
        Field::text("HostName"),
        Field::text("PowerState"),
        Field::text("InstanceStateDetails"),
        Field::text("InstanceErrorCode"),
        Field::list("InstanceEndpoints", &INSTANCE_ENDPOINT),
    ],
};

/// Runtime view of one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInstance {
    pub role_name: String,
    pub instance_name: Option<String>,
    pub instance_status: Option<InstanceStatus>,
    pub instance_upgrade_domain: Option<u32>,
    pub instance_fault_domain: Option<u32>,
    pub instance_size: Option<RoleSizeType>,
    pub ip_address: Option<String>,
    pub host_name: Option<String>,
    pub power_state: Option<PowerState>,
    pub instance_state_details: Option<String>,
    pub instance_error_code: Option<String>,
    pub instance_endpoints: Vec<InstanceEndpoint>,
}

impl FromRecord for RoleInstance {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            role_name: record.required("RoleName")?,
            instance_name: record.string("InstanceName"),
            instance_status: record.enumeration("InstanceStatus"),
            instance_upgrade_domain: record.number("InstanceUpgradeDomain")?,
            instance_fault_domain: record.number("InstanceFaultDomain")?,
            instance_size: record.enumeration("InstanceSize"),
            ip_address: record.string("IpAddress"),
            host_name: record.string("HostName"),
            power_state: record.enumeration("PowerState"),
            instance_state_details: record.string("InstanceStateDetails"),
            instance_error_code: record.string("InstanceErrorCode"),
            instance_endpoints: record.list("InstanceEndpoints")?,
        })
    }
}

pub(crate) const DEPLOYMENT: Schema = Schema {
    name: "Deployment",
    fields: &[
        Field::text("Name"),
        Field::text("DeploymentSlot"),
        Field::text("Status"),
        Field::text("Label"),
        Field::text("PrivateID"),
        Field::text("Url"),
        Field::list("RoleInstanceList", &ROLE_INSTANCE),
        Field::list("RoleList", &ROLE),
        Field::list("VirtualIPs", &VIRTUAL_IP),
        Field::text("VirtualNetworkName"),
        Field::text("ReservedIPName"),
    ],
};

/// A release slot of a cloud service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub slot: Option<DeploymentSlot>,
    pub status: Option<DeploymentStatus>,
    /// Decoded from base64.
    pub label: Option<String>,
    pub private_id: Option<String>,
    pub url: Option<String>,
    pub virtual_ips: Vec<VirtualIP>,
    pub role_instances: Vec<RoleInstance>,
    pub roles: Vec<Role>,
    pub virtual_network_name: Option<String>,
    pub reserved_ip_name: Option<String>,
}

impl FromRecord for Deployment {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            slot: record.enumeration("DeploymentSlot"),
            status: record.enumeration("Status"),
            label: record.label("Label")?,
            private_id: record.string("PrivateID"),
            url: record.string("Url"),
            virtual_ips: record.list("VirtualIPs")?,
            role_instances: record.list("RoleInstanceList")?,
            roles: record.list("RoleList")?,
            virtual_network_name: record.string("VirtualNetworkName"),
            reserved_ip_name: record.string("ReservedIPName"),
        })
    }
}

impl XmlEntity for Deployment {
    const SCHEMA: &'static Schema = &DEPLOYMENT;
}

// ============================================================================
// Create request
// ============================================================================

/// Parameters of a deployment holding a single virtual machine role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentParams {
    pub name: String,
    pub os: OsType,
    pub source_image_name: String,
    pub media_link: Url,
    pub role_size: RoleSizeType,
    pub username: String,
    pub password: Option<String>,
    /// Sent base64 encoded.
    pub custom_data: Option<String>,
    pub provision_guest_agent: bool,
    pub external_endpoints: Vec<InputEndpoint>,
    pub virtual_network_name: Option<String>,
    pub subnet_names: Vec<String>,
    pub reserved_ip_name: Option<String>,
}

impl DeploymentParams {
    /// A role provisioned from an OS image.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        os: OsType,
        source_image_name: impl Into<String>,
        media_link: Url,
        role_size: RoleSizeType,
        username: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            os,
            source_image_name: source_image_name.into(),
            media_link,
            role_size,
            username: username.into(),
            password: None,
            custom_data: None,
            provision_guest_agent: true,
            external_endpoints: Vec::new(),
            virtual_network_name: None,
            subnet_names: Vec::new(),
            reserved_ip_name: None,
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_custom_data(mut self, custom_data: impl Into<String>) -> Self {
        self.custom_data = Some(custom_data.into());
        self
    }

    #[must_use]
    pub fn with_provision_guest_agent(mut self, enabled: bool) -> Self {
        self.provision_guest_agent = enabled;
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: InputEndpoint) -> Self {
        self.external_endpoints.push(endpoint);
        self
    }

    /// Place the role in a subnet of a virtual network.
    #[must_use]
    pub fn with_virtual_network(
        mut self,
        virtual_network_name: impl Into<String>,
        subnet_name: impl Into<String>,
    ) -> Self {
        self.virtual_network_name = Some(virtual_network_name.into());
        self.subnet_names.push(subnet_name.into());
        self
    }

    #[must_use]
    pub fn with_reserved_ip(mut self, reserved_ip_name: impl Into<String>) -> Self {
        self.reserved_ip_name = Some(reserved_ip_name.into());
        self
    }

    /// Render the `Deployment` payload.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Validation`] for an image without a known OS
    /// family, or an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let mut payload = XmlPayload::new("Deployment")?;
        payload
            .element("Name", &self.name)?
            .element("DeploymentSlot", DeploymentSlot::Production.as_str())?
            .label("Label", &self.name)?
            .start("RoleList")?
            .start("Role")?
            .element("RoleName", &self.name)?
            .element("RoleType", "PersistentVMRole")?
            .start("ConfigurationSets")?;
        self.write_provisioning(&mut payload)?;
        self.write_network(&mut payload)?;
        payload
            .end()?
            .start("OSVirtualHardDisk")?
            .element("HostCaching", HostCaching::ReadWrite.as_str())?
            .element("MediaLink", self.media_link.as_str())?
            .element("SourceImageName", &self.source_image_name)?
            .element("OS", self.os.as_str())?
            .end()?
            .element("RoleSize", self.role_size.as_str())?
            .element("ProvisionGuestAgent", self.provision_guest_agent.to_string())?
            .end()?
            .end()?
            .optional("VirtualNetworkName", self.virtual_network_name.as_deref())?
            .optional("ReservedIPName", self.reserved_ip_name.as_deref())?;
        payload.finish()
    }

    fn write_provisioning(&self, payload: &mut XmlPayload) -> Result<()> {
        let custom_data = self.custom_data.as_deref().map(encode_base64);
        payload.start("ConfigurationSet")?;
        match self.os {
            OsType::Linux => {
                payload
                    .element("ConfigurationSetType", "LinuxProvisioningConfiguration")?
                    .element("HostName", &self.name)?
                    .element("UserName", &self.username)?
                    .optional("UserPassword", self.password.as_deref())?
                    .element(
                        "DisableSshPasswordAuthentication",
                        self.password.is_none().to_string(),
                    )?
                    .optional("CustomData", custom_data)?;
            }
            OsType::Windows => {
                payload
                    .element("ConfigurationSetType", "WindowsProvisioningConfiguration")?
                    .element("ComputerName", &self.name)?
                    .optional("AdminPassword", self.password.as_deref())?
                    .element("EnableAutomaticUpdates", "false")?
                    .element("AdminUsername", &self.username)?
                    .optional("CustomData", custom_data)?;
            }
            OsType::Unrecognized => {
                return Err(CloudError::Validation(format!(
                    "Deployment {} needs a Linux or Windows image",
                    self.name
                )));
            }
        }
        payload.end()?;
        Ok(())
    }

    fn write_network(&self, payload: &mut XmlPayload) -> Result<()> {
        payload
            .start("ConfigurationSet")?
            .element("ConfigurationSetType", "NetworkConfiguration")?;
        if !self.external_endpoints.is_empty() {
            payload.start("InputEndpoints")?;
            for endpoint in &self.external_endpoints {
                payload
                    .start("InputEndpoint")?
                    .optional("LocalPort", endpoint.local_port.map(|p| p.to_string()))?
                    .element("Name", &endpoint.name)?
                    .optional("Port", endpoint.port.map(|p| p.to_string()))?
                    .optional("Protocol", endpoint.protocol.as_deref())?
                    .end()?;
            }
            payload.end()?;
        }
        if !self.subnet_names.is_empty() {
            payload.start("SubnetNames")?;
            for subnet in &self.subnet_names {
                payload.element("SubnetName", subnet)?;
            }
            payload.end()?;
        }
        payload.end()?;
        Ok(())
    }
}
